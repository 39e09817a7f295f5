use crate::error::Result;
use crate::tools::{NoParams, NodeTarget, Tool, ToolContext, ToolResult};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters for the toggle tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToggleParams {
    /// Node id or structural path
    #[serde(flatten)]
    pub target: NodeTarget,
}

/// Tool for expanding or collapsing one node
#[derive(Default)]
pub struct ToggleTool;

#[async_trait]
impl Tool for ToggleTool {
    type Params = ToggleParams;

    fn name(&self) -> &str {
        "toggle"
    }

    async fn execute_typed(&self, params: ToggleParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let Some(id) = params.target.find(context.session).map(|node| node.id.clone()) else {
            return Ok(ToolResult::failure("No such node"));
        };

        context.session.toggle(&id);
        Ok(ToolResult::success_with(json!({
            "id": id,
            "expanded": context.session.is_expanded(&id),
        })))
    }
}

/// Tool for expanding every node with children
#[derive(Default)]
pub struct ExpandAllTool;

#[async_trait]
impl Tool for ExpandAllTool {
    type Params = NoParams;

    fn name(&self) -> &str {
        "expand_all"
    }

    async fn execute_typed(&self, _params: NoParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        context.session.expand_all();
        Ok(ToolResult::success_with(json!({
            "expanded": context.session.expanded().len(),
        })))
    }
}

/// Tool for collapsing the whole tree
#[derive(Default)]
pub struct CollapseAllTool;

#[async_trait]
impl Tool for CollapseAllTool {
    type Params = NoParams;

    fn name(&self) -> &str {
        "collapse_all"
    }

    async fn execute_typed(&self, _params: NoParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        context.session.collapse_all();
        Ok(ToolResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{page, ready_session};

    #[tokio::test]
    async fn test_toggle() {
        let page = page();
        let mut session = ready_session(&page).await;
        let mut context = ToolContext::new(&mut session);

        let params: ToggleParams = serde_json::from_value(json!({"path": "0"})).unwrap();
        let result = ToggleTool.execute_typed(params.clone(), &mut context).await.unwrap();
        assert_eq!(result.data.unwrap()["expanded"], true);

        let result = ToggleTool.execute_typed(params, &mut context).await.unwrap();
        assert_eq!(result.data.unwrap()["expanded"], false);

        let missing: ToggleParams = serde_json::from_value(json!({"path": "7"})).unwrap();
        let result = ToggleTool.execute_typed(missing, &mut context).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_expand_and_collapse_all() {
        let page = page();
        let mut session = ready_session(&page).await;
        let mut context = ToolContext::new(&mut session);

        // body, header, main, island
        let result = ExpandAllTool.execute_typed(NoParams {}, &mut context).await.unwrap();
        assert_eq!(result.data.unwrap()["expanded"], 4);
        assert_eq!(context.session.visible_nodes().len(), 6);

        CollapseAllTool.execute_typed(NoParams {}, &mut context).await.unwrap();
        assert_eq!(context.session.visible_nodes().len(), 1);
    }
}
