//! Island inspector MCP Server
//!
//! Exposes the island inspector over the Model Context Protocol (stdio transport), so agents can
//! read the island tree of a page open in Chrome and highlight its elements.

use clap::Parser;
use island_inspector::browser::{BrowserSession, ConnectionOptions, LaunchOptions, normalize_url};
use island_inspector::mcp::InspectorServer;
use island_inspector::page::{ChromeHost, MemoryPage, PageHost};
use island_inspector::InspectorConfig;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "island-inspector-mcp")]
#[command(version)]
#[command(about = "Astro island inspector MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// WebSocket endpoint URL for remote browser connection
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Page to open at startup (a bare port means a local dev server)
    #[arg(long, short = 'u', value_name = "URL")]
    url: Option<String>,

    /// Serve a capture written by the terminal inspector instead of a browser
    #[arg(long, value_name = "FILE", conflicts_with_all = ["ws_endpoint", "url"])]
    snapshot: Option<PathBuf>,

    /// JSON config file (island convention, overlay color)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the protocol, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    eprintln!("Island inspector MCP Server v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => InspectorConfig::load(path)?,
        None => InspectorConfig::default(),
    };

    let host: Arc<dyn PageHost> = if let Some(path) = &cli.snapshot {
        eprintln!("Snapshot: {}", path.display());
        Arc::new(MemoryPage::load(path)?)
    } else {
        let session = match &cli.ws_endpoint {
            Some(endpoint) => {
                eprintln!("WebSocket endpoint: {}", endpoint);
                BrowserSession::connect(ConnectionOptions::new(endpoint.clone()))?
            }
            None => {
                let mut options = LaunchOptions::new().headless(!cli.headed);
                if let Some(path) = &cli.executable_path {
                    eprintln!("Browser executable: {}", path.display());
                    options = options.chrome_path(path.clone());
                }
                if let Some(dir) = &cli.user_data_dir {
                    eprintln!("User data directory: {}", dir.display());
                    options = options.user_data_dir(dir.clone());
                }
                eprintln!("Browser mode: {}", if cli.headed { "headed" } else { "headless" });
                BrowserSession::launch(options)
                    .map_err(|e| format!("Failed to create browser session: {}", e))?
            }
        };
        if let Some(url) = &cli.url {
            session.navigate(&normalize_url(url))?;
        }
        Arc::new(ChromeHost::new(Arc::new(session)))
    };

    eprintln!("Transport: stdio");
    eprintln!("Ready to accept MCP connections via stdio");
    let service = InspectorServer::with_host(host, config);
    let server = service.serve(stdio()).await?;
    let quit_reason = server.waiting().await?;
    eprintln!("Server quit with reason: {:?}", quit_reason);

    Ok(())
}
