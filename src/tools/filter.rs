use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters for the search tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search text; empty clears it
    #[serde(default)]
    pub query: String,
}

/// Tool for storing the search query
///
/// The query is kept with the session but does not filter the tree.
#[derive(Default)]
pub struct SearchTool;

#[async_trait]
impl Tool for SearchTool {
    type Params = SearchParams;

    fn name(&self) -> &str {
        "search"
    }

    async fn execute_typed(&self, params: SearchParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        context.session.set_search_query(params.query);
        Ok(ToolResult::success_with(json!({
            "search_query": context.session.search_query(),
        })))
    }
}

/// Parameters for the islands_only tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IslandsOnlyParams {
    /// Desired state of the filter; flips it when omitted
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Tool for switching the islands-only view
#[derive(Default)]
pub struct IslandsOnlyTool;

#[async_trait]
impl Tool for IslandsOnlyTool {
    type Params = IslandsOnlyParams;

    fn name(&self) -> &str {
        "islands_only"
    }

    async fn execute_typed(&self, params: IslandsOnlyParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let current = context.session.islands_only();
        if params.enabled.is_none_or(|enabled| enabled != current) {
            context.session.toggle_islands_only();
        }

        let session = &*context.session;
        Ok(ToolResult::success_with(json!({
            "islands_only": session.islands_only(),
            "visible": session.visible_nodes().len(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{page, ready_session};

    #[tokio::test]
    async fn test_search_keeps_tree() {
        let page = page();
        let mut session = ready_session(&page).await;
        let mut context = ToolContext::new(&mut session);

        let params = SearchParams { query: "counter".to_string() };
        let result = SearchTool.execute_typed(params, &mut context).await.unwrap();
        assert_eq!(result.data.unwrap()["search_query"], "counter");
        assert_eq!(context.session.visible_nodes().len(), 4);
    }

    #[tokio::test]
    async fn test_islands_only() {
        let page = page();
        let mut session = ready_session(&page).await;
        let mut context = ToolContext::new(&mut session);

        // body, main, island
        let result = IslandsOnlyTool
            .execute_typed(IslandsOnlyParams::default(), &mut context)
            .await
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["islands_only"], true);
        assert_eq!(data["visible"], 3);

        let keep_on = IslandsOnlyParams { enabled: Some(true) };
        let result = IslandsOnlyTool.execute_typed(keep_on, &mut context).await.unwrap();
        assert_eq!(result.data.unwrap()["islands_only"], true);

        let off = IslandsOnlyParams { enabled: Some(false) };
        let result = IslandsOnlyTool.execute_typed(off, &mut context).await.unwrap();
        assert_eq!(result.data.unwrap()["visible"], 4);
    }
}
