//! Interactive island inspector
//!
//! Inspects the active tab of a launched or connected Chrome, or a capture previously dumped to
//! disk, and reads commands from stdin. Type `help` for the command list.

use clap::Parser;
use island_inspector::browser::{BrowserSession, ConnectionOptions, LaunchOptions, normalize_url};
use island_inspector::page::{ChromeHost, MemoryPage, PageHost};
use island_inspector::session::SessionStatus;
use island_inspector::tools::{ToolContext, ToolRegistry};
use island_inspector::{InspectorConfig, InspectorSession};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "island-inspector")]
#[command(version)]
#[command(about = "Browse the Astro island tree of a live page", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// WebSocket endpoint URL of a running browser to connect to
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Page to open before inspecting (a bare port means a local dev server)
    #[arg(long, short = 'u', value_name = "URL")]
    url: Option<String>,

    /// Inspect a capture written by `dump` instead of a browser
    #[arg(long, value_name = "FILE", conflicts_with_all = ["ws_endpoint", "url"])]
    snapshot: Option<PathBuf>,

    /// JSON config file (island convention, overlay color)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,
}

const HELP: &str = "\
COMMANDS:
    refresh                 Rebuild the tree from the page
    tree [json]             Print the displayed tree
    node [TARGET]           Print a node (default: the selection)
    up | down | left | right | enter
                            Keyboard navigation
    select TARGET           Select a node and scroll to it
    toggle TARGET           Expand or collapse a node
    expand | collapse       Expand or collapse everything
    search [TEXT]           Set the search query
    islands [on|off]        Islands-only view (flips without argument)
    highlight TARGET        Outline a node on the page
    clear                   Remove the outline
    scroll TARGET           Scroll a node into view
    summary                 Node and island counts
    dump FILE               Write the page capture as JSON
    help | quit

TARGET is a node id (node-3), a path (1.0.2) or `body`.";

fn open_host(cli: &Cli) -> Result<Arc<dyn PageHost>, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.snapshot {
        eprintln!("Snapshot: {}", path.display());
        return Ok(Arc::new(MemoryPage::load(path)?));
    }

    let session = if let Some(endpoint) = &cli.ws_endpoint {
        eprintln!("WebSocket endpoint: {}", endpoint);
        BrowserSession::connect(ConnectionOptions::new(endpoint.clone()))?
    } else {
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
        BrowserSession::launch(options)?
    };

    if let Some(url) = &cli.url {
        let url = normalize_url(url);
        eprintln!("Opening {}", url);
        session.navigate(&url)?;
    }

    Ok(Arc::new(ChromeHost::new(Arc::new(session))))
}

/// Tool parameters naming a node
fn target(arg: Option<&str>) -> Option<Value> {
    match arg? {
        "body" => Some(json!({ "path": "" })),
        id if id.starts_with("node-") => Some(json!({ "id": id })),
        path => Some(json!({ "path": path })),
    }
}

/// Translate one command line into a tool call
fn parse_command(line: &str) -> Result<(&'static str, Value), String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default();
    let arg = words.next();
    let need_target = || target(arg).ok_or_else(|| format!("{} needs a node id or path", command));

    let call = match command {
        "refresh" | "r" => ("refresh", Value::Null),
        "tree" | "t" => ("get_tree", json!({ "format": arg.unwrap_or("text") })),
        "node" | "n" => ("get_node", target(arg).unwrap_or(Value::Null)),
        "up" | "down" | "left" | "right" | "enter" => ("key", json!({ "key": command })),
        "select" | "s" => ("select", need_target()?),
        "toggle" => ("toggle", need_target()?),
        "expand" => ("expand_all", Value::Null),
        "collapse" => ("collapse_all", Value::Null),
        "search" => {
            let rest = line.trim_start().strip_prefix("search").unwrap_or_default().trim();
            ("search", json!({ "query": rest }))
        }
        "islands" | "i" => {
            let enabled = match arg {
                Some("on") => Some(true),
                Some("off") => Some(false),
                None => None,
                Some(other) => return Err(format!("islands takes on or off, not {}", other)),
            };
            ("islands_only", json!({ "enabled": enabled }))
        }
        "highlight" | "h" => ("highlight", need_target()?),
        "clear" => ("clear_highlight", Value::Null),
        "scroll" => ("scroll_into_view", need_target()?),
        other => return Err(format!("Unknown command: {} (try help)", other)),
    };
    Ok(call)
}

fn print_tree(session: &InspectorSession) {
    if let SessionStatus::Error(e) = session.status() {
        println!("{} (run refresh)", e);
        return;
    }
    for line in session.render() {
        println!("{}", line);
    }
}

async fn dump(session: &InspectorSession, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(document) = session.capture_document().await? else {
        return Err("No inspected page available".into());
    };
    tokio::fs::write(path, serde_json::to_string_pretty(&document)?).await?;
    println!("Wrote {} elements to {}", document.count_elements(), path);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => InspectorConfig::load(path)?,
        None => InspectorConfig::default(),
    };
    let host = open_host(&cli)?;
    let registry = ToolRegistry::with_defaults();
    let mut session = InspectorSession::new(host, config);

    eprintln!("Island inspector v{}", env!("CARGO_PKG_VERSION"));
    session.refresh().await;
    print_tree(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line.split_whitespace().next() {
            None => continue,
            Some("quit" | "q" | "exit") => break,
            Some("help" | "?") => {
                println!("{}", HELP);
                continue;
            }
            Some("summary") => {
                match session.summary() {
                    Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
                    None => println!("No snapshot yet"),
                }
                continue;
            }
            Some("dump") => {
                match line.split_whitespace().nth(1) {
                    Some(path) => {
                        if let Err(e) = dump(&session, path).await {
                            println!("Error: {}", e);
                        }
                    }
                    None => println!("dump needs a file name"),
                }
                continue;
            }
            Some(_) => {}
        }

        let (tool, params) = match parse_command(line) {
            Ok(call) => call,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        let mut context = ToolContext::new(&mut session);
        match registry.execute(tool, params, &mut context).await {
            Ok(result) if !result.success => {
                println!("Error: {}", result.error.unwrap_or_default());
            }
            Ok(result) => match tool {
                "get_tree" | "get_node" | "highlight" | "scroll_into_view" | "search" => {
                    let data = result.data.unwrap_or(Value::Null);
                    match data.get("lines").and_then(Value::as_array) {
                        Some(lines) => lines.iter().filter_map(Value::as_str).for_each(|l| println!("{}", l)),
                        None => println!("{}", serde_json::to_string_pretty(&data)?),
                    }
                }
                _ => print_tree(&session),
            },
            Err(e) => println!("Error: {}", e),
        }
    }

    session.unhover().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("down").unwrap(), ("key", json!({"key": "down"})));
        assert_eq!(parse_command("select node-4").unwrap(), ("select", json!({"id": "node-4"})));
        assert_eq!(parse_command("toggle 1.0").unwrap(), ("toggle", json!({"path": "1.0"})));
        assert_eq!(parse_command("highlight body").unwrap(), ("highlight", json!({"path": ""})));
        assert_eq!(parse_command("search  my counter ").unwrap(), ("search", json!({"query": "my counter"})));
        assert_eq!(parse_command("islands off").unwrap(), ("islands_only", json!({"enabled": false})));
        assert_eq!(parse_command("node").unwrap(), ("get_node", Value::Null));
        assert!(parse_command("select").is_err());
        assert!(parse_command("click 3").is_err());
    }
}
