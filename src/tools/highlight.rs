use crate::error::{InspectorError, Result};
use crate::tools::{NoParams, NodeTarget, Tool, ToolContext, ToolResult};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Parameters for the highlight and scroll_into_view tools
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TargetParams {
    /// Node id or structural path
    #[serde(flatten)]
    pub target: NodeTarget,
}

fn failed(tool: &str, error: InspectorError) -> InspectorError {
    InspectorError::ToolExecutionFailed {
        tool: tool.to_string(),
        reason: error.to_string(),
    }
}

/// Tool for outlining a node's element on the page
#[derive(Default)]
pub struct HighlightTool;

#[async_trait]
impl Tool for HighlightTool {
    type Params = TargetParams;

    fn name(&self) -> &str {
        "highlight"
    }

    async fn execute_typed(&self, params: TargetParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let path = params.target.resolve_path(context.session)?;
        let drawn = context
            .session
            .highlighter()
            .highlight(&path)
            .await
            .map_err(|e| failed(self.name(), e))?;

        Ok(ToolResult::success_with(json!({
            "path": path,
            "drawn": drawn,
        })))
    }
}

/// Tool for removing the overlay
#[derive(Default)]
pub struct ClearHighlightTool;

#[async_trait]
impl Tool for ClearHighlightTool {
    type Params = NoParams;

    fn name(&self) -> &str {
        "clear_highlight"
    }

    async fn execute_typed(&self, _params: NoParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        context
            .session
            .highlighter()
            .clear()
            .await
            .map_err(|e| failed(self.name(), e))?;
        Ok(ToolResult::success())
    }
}

/// Tool for scrolling a node's element into view without selecting it
#[derive(Default)]
pub struct ScrollIntoViewTool;

#[async_trait]
impl Tool for ScrollIntoViewTool {
    type Params = TargetParams;

    fn name(&self) -> &str {
        "scroll_into_view"
    }

    async fn execute_typed(&self, params: TargetParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let path = params.target.resolve_path(context.session)?;
        let scrolled = context
            .session
            .highlighter()
            .scroll_into_view(&path)
            .await
            .map_err(|e| failed(self.name(), e))?;

        Ok(ToolResult::success_with(json!({
            "path": path,
            "scrolled": scrolled,
        })))
    }
}
