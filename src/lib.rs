//! # island-inspector
//!
//! Inspect the client-hydrated "islands" of a live Astro page over the Chrome DevTools Protocol
//! (CDP), built for terminal use and for AI agent integration.
//!
//! ## Features
//!
//! - **Tree extraction**: Capture the page body and rebuild it as a typed tree where every
//!   `<astro-island>` carries its component name, hydration directive, props and framework
//! - **Filtered views**: Auto-expansion of island ancestors, islands-only pruning, flattening into
//!   navigable rows
//! - **Highlighting**: Outline any node on the page, including `display: contents` islands whose
//!   box is synthesized from their descendants
//! - **Sessions**: Selection, expansion and keyboard navigation over the current snapshot
//! - **MCP Server**: Every session operation exposed as a Model Context Protocol tool
//!
//! ## Running
//!
//! ```bash
//! # Terminal inspector against a local dev server
//! cargo run --bin island-inspector -- --url 4321
//!
//! # MCP server over stdio
//! cargo run --bin mcp-server --features mcp-server -- --url 4321
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use island_inspector::{BrowserSession, ChromeHost, InspectorConfig, InspectorSession, LaunchOptions};
//! use std::sync::Arc;
//!
//! # async fn run() -> island_inspector::Result<()> {
//! let browser = BrowserSession::launch(LaunchOptions::default())?;
//! browser.navigate("http://localhost:4321")?;
//!
//! let host = Arc::new(ChromeHost::new(Arc::new(browser)));
//! let mut session = InspectorSession::new(host, InspectorConfig::default());
//! session.refresh().await;
//!
//! for row in session.render() {
//!     println!("{}", row);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Offline inspection
//!
//! A capture dumped to JSON can be inspected without a browser through [`MemoryPage`]:
//!
//! ```rust,no_run
//! use island_inspector::{InspectorConfig, InspectorSession, MemoryPage};
//! use island_inspector::tools::{ToolContext, ToolRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn run() -> island_inspector::Result<()> {
//! let page = Arc::new(MemoryPage::load("capture.json")?);
//! let mut session = InspectorSession::new(page, InspectorConfig::default());
//! let registry = ToolRegistry::with_defaults();
//! let mut context = ToolContext::new(&mut session);
//!
//! registry.execute("refresh", json!({}), &mut context).await?;
//! registry.execute("islands_only", json!({"enabled": true}), &mut context).await?;
//! let tree = registry.execute("get_tree", json!({"format": "text"}), &mut context).await?;
//! println!("{}", tree.data.unwrap_or_default());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`dom`]: Captured elements, bounding boxes and structural paths
//! - [`tree`]: Tree building, filtering and rendering
//! - [`highlight`]: Overlay drawing and scrolling for tree nodes
//! - [`page`]: The script-execution seam between the inspector and a page
//! - [`session`]: Inspection state and keyboard navigation
//! - [`tools`]: Session operations as named, schema-described tools
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: **Model Context Protocol server** (requires `mcp-handler` feature)

pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod page;
pub mod session;
pub mod tools;
pub mod tree;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use config::InspectorConfig;
pub use dom::{BoundingBox, ElementPath, RawElement};
pub use error::{InspectorError, Result};
pub use highlight::Highlighter;
pub use page::{ChromeHost, MemoryPage, PageHost, PageId, PageScript};
pub use session::{InspectorSession, SessionError, SessionStatus};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
pub use tree::{IslandConvention, TreeNode, build_tree};

#[cfg(feature = "mcp-handler")]
pub use mcp::InspectorServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
