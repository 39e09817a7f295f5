//! Running scripts inside the inspected page
//!
//! The inspector never touches the page directly. Everything goes through a [`PageHost`], which
//! knows which page is being inspected and can run a [`PageScript`] in it, returning the
//! script's structured result. [`ChromeHost`] drives a real tab over CDP; [`MemoryPage`] serves a
//! capture held in memory.

pub mod chrome;
pub mod memory;
pub mod script;

pub use chrome::ChromeHost;
pub use memory::{MemoryPage, Overlay};
pub use script::{OverlayStyle, PageScript};

use crate::dom::{ElementPath, RawElement};
use crate::error::{InspectorError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Identifier of an inspectable page (a CDP target id for Chrome tabs)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(pub String);

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host capability to execute scripts in the inspected page
///
/// Calls cannot be cancelled. Overlapping calls are allowed; whichever lands last wins.
#[async_trait]
pub trait PageHost: Send + Sync {
    /// Page currently under inspection, if any
    async fn inspected_page(&self) -> Option<PageId>;

    /// Run `script` in `page` and return its result (`Value::Null` for "nothing")
    async fn execute(&self, page: &PageId, script: &PageScript) -> Result<Value>;
}

/// Capture the element at `path` with its whole subtree; `None` if no element is there
pub async fn capture(host: &dyn PageHost, page: &PageId, path: &ElementPath) -> Result<Option<RawElement>> {
    let value = host
        .execute(page, &PageScript::Capture { path: path.clone() })
        .await?;
    decode_capture(value)
}

/// Turn a capture result into an element
pub fn decode_capture(value: Value) -> Result<Option<RawElement>> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| InspectorError::CaptureDecodeFailed(e.to_string()))
}
