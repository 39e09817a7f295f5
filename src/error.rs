use thiserror::Error;

/// Errors raised while driving the browser or the inspector
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The page returned something that is not a valid element capture
    #[error("Failed to decode page capture: {0}")]
    CaptureDecodeFailed(String),

    #[error("No inspected page available")]
    NoInspectedPage,

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to load config: {0}")]
    ConfigFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InspectorError>;
