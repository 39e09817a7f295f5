use crate::error::Result;
use crate::session::SessionStatus;
use crate::tools::{NoParams, NodeTarget, Tool, ToolContext, ToolResult};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Tool for rebuilding the island tree from the inspected page
#[derive(Default)]
pub struct RefreshTool;

#[async_trait]
impl Tool for RefreshTool {
    type Params = NoParams;

    fn name(&self) -> &str {
        "refresh"
    }

    async fn execute_typed(&self, _params: NoParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        if let SessionStatus::Error(e) = context.session.refresh().await {
            return Ok(ToolResult::failure(e.to_string()));
        }

        Ok(ToolResult::success_with(json!({
            "status": "ready",
            "summary": context.session.summary(),
        })))
    }
}

/// Output format of `get_tree`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TreeFormat {
    /// Indented rows of the visible part of the tree
    #[default]
    Text,
    /// The displayed tree as JSON
    Json,
}

/// Parameters for the get_tree tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetTreeParams {
    /// Output format (default: text)
    #[serde(default)]
    pub format: TreeFormat,
}

/// Tool for reading the displayed tree
#[derive(Default)]
pub struct GetTreeTool;

#[async_trait]
impl Tool for GetTreeTool {
    type Params = GetTreeParams;

    fn name(&self) -> &str {
        "get_tree"
    }

    async fn execute_typed(&self, params: GetTreeParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let session = &*context.session;

        if let SessionStatus::Error(e) = session.status() {
            return Ok(ToolResult::failure(e.to_string()));
        }
        let Some(tree) = session.displayed_tree() else {
            let reason = if session.snapshot().is_some() {
                "No islands on this page"
            } else {
                "No snapshot yet, run refresh first"
            };
            return Ok(ToolResult::failure(reason));
        };

        let data = match params.format {
            TreeFormat::Text => json!({
                "lines": session.render(),
                "selected": session.selected_id(),
                "islands_only": session.islands_only(),
                "search_query": session.search_query(),
            }),
            TreeFormat::Json => json!({
                "tree": tree,
                "expanded": session.expanded(),
                "selected": session.selected_id(),
            }),
        };
        Ok(ToolResult::success_with(data))
    }
}

/// Parameters for the get_node tool; without either field the selected node is described
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetNodeParams {
    /// Node id from the current snapshot
    #[serde(default)]
    pub id: Option<String>,

    /// Structural path of the node
    #[serde(default)]
    pub path: Option<String>,
}

impl GetNodeParams {
    fn target(&self) -> Option<NodeTarget> {
        match (&self.id, &self.path) {
            (Some(id), _) => Some(NodeTarget::Id { id: id.clone() }),
            (None, Some(path)) => Some(NodeTarget::Path { path: path.clone() }),
            (None, None) => None,
        }
    }
}

/// Tool for reading one node's details without its subtree
#[derive(Default)]
pub struct GetNodeTool;

#[async_trait]
impl Tool for GetNodeTool {
    type Params = GetNodeParams;

    fn name(&self) -> &str {
        "get_node"
    }

    async fn execute_typed(&self, params: GetNodeParams, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let session = &*context.session;
        let node = match params.target() {
            Some(target) => target.find(session),
            None => session.selected_node(),
        };
        let Some(node) = node else {
            return Ok(ToolResult::failure("No such node"));
        };

        Ok(ToolResult::success_with(json!({
            "id": node.id,
            "tagName": node.tag_name,
            "isAstroIsland": node.is_island,
            "componentName": node.component_name,
            "clientDirective": node.client_directive,
            "framework": node.framework,
            "props": node.props,
            "path": node.path,
            "depth": node.depth,
            "childCount": node.children.len(),
        })))
    }
}
