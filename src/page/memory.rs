use crate::dom::{BoundingBox, ElementPath, RawElement};
use crate::error::{InspectorError, Result};
use crate::page::{PageHost, PageId, PageScript};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::Mutex;

/// Overlay currently drawn on a [`MemoryPage`]
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub bounds: BoundingBox,
    pub label: String,
}

#[derive(Debug, Default)]
struct PageState {
    document: Option<RawElement>,
    overlay: Option<Overlay>,
    scrolled: Vec<ElementPath>,
    failure: Option<String>,
}

/// A page held in memory as a captured element tree
///
/// Scripts are interpreted directly against the capture: overlays and scrolls are recorded
/// instead of drawn. Used to inspect a capture dumped to disk, and in tests.
#[derive(Debug)]
pub struct MemoryPage {
    id: PageId,
    state: Mutex<PageState>,
}

impl MemoryPage {
    /// Page whose body is `document`
    pub fn new(document: RawElement) -> Self {
        Self::with_state(PageState {
            document: Some(document),
            ..Default::default()
        })
    }

    /// No page is being inspected
    pub fn empty() -> Self {
        Self::with_state(PageState::default())
    }

    /// Page on which every script fails with `reason`
    pub fn failing(document: RawElement, reason: impl Into<String>) -> Self {
        Self::with_state(PageState {
            document: Some(document),
            failure: Some(reason.into()),
            ..Default::default()
        })
    }

    fn with_state(state: PageState) -> Self {
        Self {
            id: PageId("memory".to_string()),
            state: Mutex::new(state),
        }
    }

    /// Load a capture previously written as JSON
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let document: RawElement = serde_json::from_str(&json).map_err(|e| {
            InspectorError::CaptureDecodeFailed(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(document))
    }

    /// Swap in a new document, as a navigation would
    pub fn set_document(&self, document: Option<RawElement>) {
        self.lock().document = document;
    }

    /// Make subsequent scripts fail (or succeed again with `None`)
    pub fn set_failure(&self, reason: Option<String>) {
        self.lock().failure = reason;
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.lock().overlay.clone()
    }

    /// Paths scrolled into view so far, oldest first
    pub fn scrolled(&self) -> Vec<ElementPath> {
        self.lock().scrolled.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageState> {
        // state stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PageHost for MemoryPage {
    async fn inspected_page(&self) -> Option<PageId> {
        self.lock().document.as_ref().map(|_| self.id.clone())
    }

    async fn execute(&self, page: &PageId, script: &PageScript) -> Result<Value> {
        let mut guard = self.lock();
        let state = &mut *guard;
        if let Some(reason) = &state.failure {
            return Err(InspectorError::EvaluationFailed(reason.clone()));
        }
        if *page != self.id {
            return Err(InspectorError::TabOperationFailed(format!("No page with id {}", page)));
        }
        let Some(document) = state.document.as_ref() else {
            return Err(InspectorError::NoInspectedPage);
        };

        match script {
            PageScript::Capture { path } => match path.resolve(document) {
                Some(element) => serde_json::to_value(element)
                    .map_err(|e| InspectorError::EvaluationFailed(e.to_string())),
                None => Ok(Value::Null),
            },
            PageScript::DrawOverlay { bounds, label, .. } => {
                state.overlay = Some(Overlay {
                    bounds: *bounds,
                    label: label.clone(),
                });
                Ok(Value::Bool(true))
            }
            PageScript::ClearOverlay => Ok(Value::Bool(state.overlay.take().is_some())),
            PageScript::ScrollIntoView { path } => {
                if path.resolve(document).is_none() {
                    return Ok(Value::Bool(false));
                }
                state.scrolled.push(path.clone());
                Ok(Value::Bool(true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{OverlayStyle, capture};

    fn document() -> RawElement {
        RawElement::new("BODY").with_children(vec![
            RawElement::new("DIV").with_bounding_box(0.0, 0.0, 10.0, 10.0),
        ])
    }

    #[tokio::test]
    async fn test_capture_subtree() {
        let page = MemoryPage::new(document());
        let id = page.inspected_page().await.unwrap();

        let root = capture(&page, &id, &ElementPath::root()).await.unwrap().unwrap();
        assert_eq!(root.children.len(), 1);

        let div = capture(&page, &id, &ElementPath::root().child(0)).await.unwrap().unwrap();
        assert_eq!(div.tag_name, "DIV");

        let missing = capture(&page, &id, &ElementPath::root().child(4)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_overlay_lifecycle() {
        let page = MemoryPage::new(document());
        let id = page.inspected_page().await.unwrap();
        let draw = PageScript::DrawOverlay {
            bounds: BoundingBox::new(1.0, 2.0, 3.0, 4.0),
            label: "<div>".to_string(),
            style: OverlayStyle::default(),
        };

        page.execute(&id, &draw).await.unwrap();
        assert_eq!(page.overlay().unwrap().label, "<div>");

        assert_eq!(page.execute(&id, &PageScript::ClearOverlay).await.unwrap(), Value::Bool(true));
        assert_eq!(page.execute(&id, &PageScript::ClearOverlay).await.unwrap(), Value::Bool(false));
        assert!(page.overlay().is_none());
    }

    #[tokio::test]
    async fn test_scroll_records_existing_paths_only() {
        let page = MemoryPage::new(document());
        let id = page.inspected_page().await.unwrap();

        let hit = ElementPath::root().child(0);
        page.execute(&id, &PageScript::ScrollIntoView { path: hit.clone() }).await.unwrap();
        page.execute(&id, &PageScript::ScrollIntoView { path: hit.child(0) }).await.unwrap();

        assert_eq!(page.scrolled(), vec![hit]);
    }

    #[tokio::test]
    async fn test_empty_and_failing_pages() {
        assert!(MemoryPage::empty().inspected_page().await.is_none());

        let page = MemoryPage::failing(document(), "target closed");
        let id = page.inspected_page().await.unwrap();
        let err = page.execute(&id, &PageScript::ClearOverlay).await.unwrap_err();
        assert_eq!(err.to_string(), "Script evaluation failed: target closed");
    }
}
