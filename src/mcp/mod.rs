//! MCP (Model Context Protocol) server for island inspection
//!
//! Each MCP tool forwards to the matching entry of the [`ToolRegistry`](crate::tools::ToolRegistry),
//! so agents and the terminal inspector run exactly the same operations.

pub mod handler;
pub use handler::InspectorServer;

use crate::error::InspectorError;
use crate::tools::{
    GetNodeParams, GetTreeParams, IslandsOnlyParams, KeyParams, SearchParams, SelectParams, TargetParams,
    ToggleParams, ToolResult as InternalToolResult,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use serde::Serialize;
use serde_json::Value;

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = if let Some(data) = result.data {
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        } else {
            "Success".to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

fn convert_error(error: InspectorError) -> McpError {
    match error {
        InspectorError::InvalidArgument(_) | InspectorError::UnknownTool(_) => {
            McpError::invalid_params(error.to_string(), None)
        }
        _ => McpError::internal_error(error.to_string(), None),
    }
}

impl InspectorServer {
    async fn call(&self, name: &str, params: impl Serialize) -> Result<CallToolResult, McpError> {
        let params = serde_json::to_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let result = self.run(name, params).await.map_err(convert_error)?;
        convert_result(result)
    }
}

#[tool_router]
impl InspectorServer {
    /// Rebuild the tree from the inspected page
    #[tool(description = "Capture the inspected page and rebuild the island tree; clears the selection")]
    async fn island_refresh(&self) -> Result<CallToolResult, McpError> {
        self.call("refresh", Value::Null).await
    }

    /// Read the displayed tree
    #[tool(description = "Read the displayed tree as indented text rows (format=text) or as JSON (format=json)")]
    async fn island_get_tree(&self, params: Parameters<GetTreeParams>) -> Result<CallToolResult, McpError> {
        self.call("get_tree", params.0).await
    }

    /// Read one node
    #[tool(description = "Read one node's details by id or path; the selected node when neither is given")]
    async fn island_get_node(&self, params: Parameters<GetNodeParams>) -> Result<CallToolResult, McpError> {
        self.call("get_node", params.0).await
    }

    /// Select a node
    #[tool(description = "Select a node by id or path and scroll its element into view")]
    async fn island_select(&self, params: Parameters<SelectParams>) -> Result<CallToolResult, McpError> {
        self.call("select", params.0).await
    }

    /// Expand or collapse a node
    #[tool(description = "Expand a collapsed node or collapse an expanded one")]
    async fn island_toggle(&self, params: Parameters<ToggleParams>) -> Result<CallToolResult, McpError> {
        self.call("toggle", params.0).await
    }

    #[tool(description = "Expand every node that has children")]
    async fn island_expand_all(&self) -> Result<CallToolResult, McpError> {
        self.call("expand_all", Value::Null).await
    }

    #[tool(description = "Collapse the whole tree")]
    async fn island_collapse_all(&self) -> Result<CallToolResult, McpError> {
        self.call("collapse_all", Value::Null).await
    }

    /// Store a search query
    #[tool(description = "Store a search query with the session (the tree is not filtered by it)")]
    async fn island_search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        self.call("search", params.0).await
    }

    /// Switch the islands-only view
    #[tool(description = "Show only islands and their ancestors; flips the filter when enabled is omitted")]
    async fn island_islands_only(&self, params: Parameters<IslandsOnlyParams>) -> Result<CallToolResult, McpError> {
        self.call("islands_only", params.0).await
    }

    /// Keyboard navigation
    #[tool(description = "Press a navigation key on the tree: ArrowUp, ArrowDown, ArrowLeft, ArrowRight or Enter")]
    async fn island_key(&self, params: Parameters<KeyParams>) -> Result<CallToolResult, McpError> {
        self.call("key", params.0).await
    }

    /// Outline a node's element
    #[tool(description = "Draw the highlight overlay over a node's element on the page")]
    async fn island_highlight(&self, params: Parameters<TargetParams>) -> Result<CallToolResult, McpError> {
        self.call("highlight", params.0).await
    }

    #[tool(description = "Remove the highlight overlay")]
    async fn island_clear_highlight(&self) -> Result<CallToolResult, McpError> {
        self.call("clear_highlight", Value::Null).await
    }

    /// Scroll without selecting
    #[tool(description = "Scroll a node's element into view without changing the selection")]
    async fn island_scroll_into_view(&self, params: Parameters<TargetParams>) -> Result<CallToolResult, McpError> {
        self.call("scroll_into_view", params.0).await
    }
}
