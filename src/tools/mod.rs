//! Inspector operations as named tools
//!
//! Each tool takes typed, schema-described parameters and acts on an [`InspectorSession`]. The
//! [`ToolRegistry`] dispatches JSON calls by name, which is how the CLI and the MCP server
//! drive a session.

pub mod expansion;
pub mod filter;
pub mod highlight;
pub mod selection;
pub mod snapshot;

pub use expansion::{CollapseAllTool, ExpandAllTool, ToggleParams, ToggleTool};
pub use filter::{IslandsOnlyParams, IslandsOnlyTool, SearchParams, SearchTool};
pub use highlight::{ClearHighlightTool, HighlightTool, ScrollIntoViewTool, TargetParams};
pub use selection::{KeyParams, KeyTool, SelectParams, SelectTool};
pub use snapshot::{GetNodeParams, GetNodeTool, GetTreeParams, GetTreeTool, RefreshTool};

use crate::error::{InspectorError, Result};
use crate::session::InspectorSession;
use crate::tree::{TreeNode, find_by_path, find_node};
use async_trait::async_trait;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters shared by tools without any
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// A node of the current snapshot, by id or by structural path
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NodeTarget {
    /// Select by node id
    Id {
        /// Node id from the current snapshot
        id: String,
    },
    /// Select by structural path
    Path {
        /// Dot-joined child indices from the body, empty for the body itself
        path: String,
    },
}

impl NodeTarget {
    /// Structural path of the target
    ///
    /// Paths are taken as given; ids must exist in the session's snapshot.
    pub fn resolve_path(&self, session: &InspectorSession) -> Result<String> {
        match self {
            NodeTarget::Path { path } => Ok(path.clone()),
            NodeTarget::Id { id } => session
                .snapshot()
                .and_then(|tree| find_node(tree, id))
                .map(|node| node.path.clone())
                .ok_or_else(|| InspectorError::InvalidArgument(format!("No node with id {}", id))),
        }
    }

    /// Node of the snapshot the target names
    pub fn find<'a>(&self, session: &'a InspectorSession) -> Option<&'a TreeNode> {
        let tree = session.snapshot()?;
        match self {
            NodeTarget::Id { id } => find_node(tree, id),
            NodeTarget::Path { path } => find_by_path(tree, path),
        }
    }
}

/// What a tool call produced
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Execution context handed to tools
pub struct ToolContext<'a> {
    pub session: &'a mut InspectorSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a mut InspectorSession) -> Self {
        Self { session }
    }
}

/// A typed inspector operation
#[async_trait]
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema + Send;

    fn name(&self) -> &str;

    /// JSON schema of `Params`
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    async fn execute_typed(&self, params: Self::Params, context: &mut ToolContext<'_>) -> Result<ToolResult>;
}

/// Object-safe form of [`Tool`] taking JSON parameters
#[async_trait]
pub trait DynTool: Send + Sync {
    fn tool_name(&self) -> &str;

    fn schema(&self) -> Value;

    async fn execute_json(&self, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult>;
}

#[async_trait]
impl<T: Tool> DynTool for T {
    fn tool_name(&self) -> &str {
        self.name()
    }

    fn schema(&self) -> Value {
        self.parameters_schema()
    }

    async fn execute_json(&self, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        // tools without parameters accept a missing/null argument object
        let params = if params.is_null() { Value::Object(Default::default()) } else { params };
        let typed: T::Params = serde_json::from_value(params)
            .map_err(|e| InspectorError::InvalidArgument(format!("{}: {}", self.name(), e)))?;
        self.execute_typed(typed, context).await
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every inspector tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(RefreshTool);
        registry.register(GetTreeTool);
        registry.register(GetNodeTool);
        registry.register(SelectTool);
        registry.register(ToggleTool);
        registry.register(ExpandAllTool);
        registry.register(CollapseAllTool);
        registry.register(SearchTool);
        registry.register(IslandsOnlyTool);
        registry.register(KeyTool);
        registry.register(HighlightTool);
        registry.register(ClearHighlightTool);
        registry.register(ScrollIntoViewTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run a tool by name with JSON parameters
    pub async fn execute(&self, name: &str, params: Value, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| InspectorError::UnknownTool(name.to_string()))?;
        log::debug!("Executing tool {} with {}", name, params);
        tool.execute_json(params, context).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::InspectorConfig;
    use crate::dom::RawElement;
    use crate::page::MemoryPage;
    use crate::session::InspectorSession;
    use std::sync::Arc;

    /// body > [header > h1, main > astro-island(Counter) > button]
    pub fn page() -> Arc<MemoryPage> {
        Arc::new(MemoryPage::new(RawElement::new("BODY").with_children(vec![
            RawElement::new("HEADER").with_children(vec![
                RawElement::new("H1").with_bounding_box(0.0, 0.0, 100.0, 20.0),
            ]),
            RawElement::new("MAIN").with_children(vec![
                RawElement::new("ASTRO-ISLAND")
                    .with_attribute("opts", r#"{"name":"Counter"}"#)
                    .with_attribute("props", r#"{"start":[0,3]}"#)
                    .with_children(vec![
                        RawElement::new("BUTTON").with_bounding_box(10.0, 50.0, 80.0, 30.0),
                    ]),
            ]),
        ])))
    }

    pub async fn ready_session(page: &Arc<MemoryPage>) -> InspectorSession {
        let mut session = InspectorSession::new(page.clone(), InspectorConfig::default());
        session.refresh().await;
        session
    }
}
