use crate::dom::{BoundingBox, ElementPath};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Id of the singleton overlay element injected into the page
pub const OVERLAY_ELEMENT_ID: &str = "__island-inspector-overlay";

/// Look of the highlight overlay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlayStyle {
    /// CSS color of the border, label background and (translucent) fill
    pub color: String,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: "#ff5d01".to_string(),
        }
    }
}

/// A function run inside the inspected page
#[derive(Debug, Clone, PartialEq)]
pub enum PageScript {
    /// Capture the element at `path` with its subtree; returns the element or null
    Capture { path: ElementPath },

    /// Replace the overlay with one covering `bounds`
    DrawOverlay {
        bounds: BoundingBox,
        label: String,
        style: OverlayStyle,
    },

    /// Remove the overlay if there is one
    ClearOverlay,

    /// Scroll the element at `path` to the center of the viewport; returns whether it existed
    ScrollIntoView { path: ElementPath },
}

impl PageScript {
    /// JavaScript expression evaluating to the script's result as a JSON string
    pub fn to_js(&self) -> String {
        match self {
            PageScript::Capture { path } => {
                format!("({})({})", include_str!("capture.js"), json!(path.indices()))
            }
            PageScript::DrawOverlay { bounds, label, style } => format!(
                "({})({}, {}, {}, {})",
                include_str!("overlay.js"),
                json!(OVERLAY_ELEMENT_ID),
                json!(bounds),
                json!(label),
                json!(style.color)
            ),
            PageScript::ClearOverlay => format!(
                "(function (id) {{ const el = document.getElementById(id); if (el) el.remove(); return JSON.stringify(!!el); }})({})",
                json!(OVERLAY_ELEMENT_ID)
            ),
            PageScript::ScrollIntoView { path } => {
                format!("({})({})", include_str!("scroll.js"), json!(path.indices()))
            }
        }
    }
}
