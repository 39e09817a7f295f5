//! Chrome/Chromium sessions over CDP

pub mod config;
pub mod session;
pub mod url;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
pub use url::normalize_url;
