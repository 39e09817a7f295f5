use crate::config::InspectorConfig;
use crate::error::InspectorError;
use crate::page::PageHost;
use crate::session::InspectorSession;
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{ServerHandler, tool_handler};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// MCP server driving one inspection session
///
/// Clones share the session, so every connection handler sees the same snapshot and selection.
#[derive(Clone)]
pub struct InspectorServer {
    session: Arc<Mutex<InspectorSession>>,
    registry: Arc<ToolRegistry>,
    pub(super) tool_router: ToolRouter<Self>,
}

impl InspectorServer {
    pub fn new(session: InspectorSession) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            registry: Arc::new(ToolRegistry::with_defaults()),
            tool_router: Self::tool_router(),
        }
    }

    /// Server inspecting whatever page `host` exposes
    pub fn with_host(host: Arc<dyn PageHost>, config: InspectorConfig) -> Self {
        Self::new(InspectorSession::new(host, config))
    }

    pub fn session(&self) -> &Arc<Mutex<InspectorSession>> {
        &self.session
    }

    /// Run a registry tool against the shared session
    pub async fn run(&self, name: &str, params: Value) -> Result<ToolResult, InspectorError> {
        let mut session = self.session.lock().await;
        let mut context = ToolContext::new(&mut session);
        self.registry.execute(name, params, &mut context).await
    }
}

#[tool_handler]
impl ServerHandler for InspectorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Astro island inspector. Call island_refresh first, then read the tree with \
                 island_get_tree and navigate it with island_select, island_toggle and island_key. \
                 Node ids change with every refresh; structural paths stay valid while the page \
                 does not change."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
