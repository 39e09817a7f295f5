use crate::error::Result;
use crate::tools::{NodeTarget, Tool, ToolContext, ToolResult};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters for the select tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectParams {
    /// Node id or structural path
    #[serde(flatten)]
    pub target: NodeTarget,
}

/// Tool for selecting a node and scrolling its element into view
#[derive(Default)]
pub struct SelectTool;

#[async_trait]
impl Tool for SelectTool {
    type Params = SelectParams;

    fn name(&self) -> &str {
        "select"
    }

    async fn execute_typed(&self, params: SelectParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let Some(id) = params.target.find(context.session).map(|node| node.id.clone()) else {
            return Ok(ToolResult::failure("No such node"));
        };

        context.session.select(&id).await;
        let node = context.session.selected_node();
        Ok(ToolResult::success_with(json!({
            "selected": id,
            "path": node.map(|n| n.path.as_str()),
            "label": node.map(|n| n.label()),
        })))
    }
}

/// Parameters for the key tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeyParams {
    /// Key name as in `KeyboardEvent.key`: ArrowUp, ArrowDown, ArrowLeft, ArrowRight or Enter
    pub key: String,
}

/// Tool for keyboard navigation of the tree
#[derive(Default)]
pub struct KeyTool;

#[async_trait]
impl Tool for KeyTool {
    type Params = KeyParams;

    fn name(&self) -> &str {
        "key"
    }

    async fn execute_typed(&self, params: KeyParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let handled = context.session.handle_key_down(&params.key).await;
        let session = &*context.session;

        Ok(ToolResult::success_with(json!({
            "key": params.key,
            "handled": handled,
            "selected": session.selected_id(),
            "path": session.selected_node().map(|n| n.path.as_str()),
            "expanded": session.selected_id().map(|id| session.is_expanded(id)),
        })))
    }
}
