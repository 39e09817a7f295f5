//! Correlating tree nodes with the rendered page
//!
//! Islands render as `display: contents` wrappers with no box of their own, so the highlighter
//! synthesizes their extent from whatever their descendants draw. Every failure to locate an
//! element or a box is a silent no-op.

use crate::dom::{BoundingBox, ElementPath, RawElement};
use crate::error::Result;
use crate::page::{self, OverlayStyle, PageHost, PageScript};
use crate::tree::IslandConvention;
use crate::tree::island::declared_component_name;
use std::sync::Arc;

/// Draws, clears and scrolls to elements of the inspected page
#[derive(Clone)]
pub struct Highlighter {
    host: Arc<dyn PageHost>,
    convention: IslandConvention,
    style: OverlayStyle,
}

impl Highlighter {
    pub fn new(host: Arc<dyn PageHost>, convention: IslandConvention, style: OverlayStyle) -> Self {
        Self {
            host,
            convention,
            style,
        }
    }

    /// Overlay the element at `path`; `Ok(false)` when there is nothing to draw
    pub async fn highlight(&self, path: &str) -> Result<bool> {
        let Some(path) = ElementPath::parse(path) else {
            return Ok(false);
        };
        let Some(page_id) = self.host.inspected_page().await else {
            return Ok(false);
        };
        let Some(element) = page::capture(self.host.as_ref(), &page_id, &path).await? else {
            log::debug!("No element at path {:?}", path.to_string());
            return Ok(false);
        };
        let Some(bounds) = visual_bounds(&element) else {
            log::debug!("Element at path {:?} has no visible box", path.to_string());
            return Ok(false);
        };

        let script = PageScript::DrawOverlay {
            bounds,
            label: overlay_label(&element, &self.convention),
            style: self.style.clone(),
        };
        self.host.execute(&page_id, &script).await?;
        Ok(true)
    }

    /// Remove the overlay; does nothing when none is shown
    pub async fn clear(&self) -> Result<()> {
        if let Some(page_id) = self.host.inspected_page().await {
            self.host.execute(&page_id, &PageScript::ClearOverlay).await?;
        }
        Ok(())
    }

    /// Scroll the element at `path` into view, or for an island its first visible descendant
    pub async fn scroll_into_view(&self, path: &str) -> Result<bool> {
        let Some(path) = ElementPath::parse(path) else {
            return Ok(false);
        };
        let Some(page_id) = self.host.inspected_page().await else {
            return Ok(false);
        };
        let Some(element) = page::capture(self.host.as_ref(), &page_id, &path).await? else {
            return Ok(false);
        };

        let target = path.join(&scroll_target(&element, &self.convention));
        let scrolled = self
            .host
            .execute(&page_id, &PageScript::ScrollIntoView { path: target })
            .await?;
        Ok(scrolled.as_bool().unwrap_or(false))
    }
}

/// Box to outline for an element
///
/// A zero-sized element with children gets the union of every descendant box that is not
/// zero-sized, at any depth; `None` if all of them are.
pub fn visual_bounds(element: &RawElement) -> Option<BoundingBox> {
    if element.bounding_box.is_zero_sized() && !element.children.is_empty() {
        let mut extent = None;
        union_descendant_bounds(element, &mut extent);
        extent
    } else {
        Some(element.bounding_box)
    }
}

fn union_descendant_bounds(element: &RawElement, extent: &mut Option<BoundingBox>) {
    for child in &element.children {
        let bounds = child.bounding_box;
        if !bounds.is_zero_sized() {
            *extent = Some(extent.map_or(bounds, |current| current.union(&bounds)));
        }
        union_descendant_bounds(child, extent);
    }
}

/// Overlay caption: `<Counter />` for islands declaring a name, the tag name otherwise
pub fn overlay_label(element: &RawElement, convention: &IslandConvention) -> String {
    let tag_name = element.normalized_tag();
    if convention.is_island_tag(&tag_name) {
        if let Some(name) = declared_component_name(element, convention) {
            return format!("<{} />", name);
        }
    }
    tag_name
}

/// Path, relative to `element`, of what should be scrolled into view
///
/// Islands defer to their first descendant (pre-order) with a visible box; everything else,
/// and islands with nothing visible, scroll themselves.
pub fn scroll_target(element: &RawElement, convention: &IslandConvention) -> ElementPath {
    if convention.is_island_tag(&element.tag_name) && !element.children.is_empty() {
        if let Some(path) = first_visible_descendant(element, &ElementPath::root()) {
            return path;
        }
    }
    ElementPath::root()
}

fn first_visible_descendant(element: &RawElement, path: &ElementPath) -> Option<ElementPath> {
    element.children.iter().enumerate().find_map(|(index, child)| {
        let child_path = path.child(index);
        if !child.bounding_box.is_zero_sized() {
            Some(child_path)
        } else {
            first_visible_descendant(child, &child_path)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;

    fn island() -> RawElement {
        RawElement::new("ASTRO-ISLAND").with_attribute("opts", r#"{"name":"Counter"}"#)
    }

    #[test]
    fn test_sized_element_uses_own_box() {
        let element = RawElement::new("div").with_bounding_box(1.0, 2.0, 3.0, 4.0);
        assert_eq!(visual_bounds(&element), Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn test_zero_sized_leaf_keeps_its_box() {
        let element = RawElement::new("span");
        assert_eq!(visual_bounds(&element), Some(BoundingBox::default()));
    }

    #[test]
    fn test_island_takes_single_child_box() {
        let element = island().with_children(vec![
            RawElement::new("div").with_bounding_box(5.0, 10.0, 100.0, 40.0),
        ]);
        assert_eq!(visual_bounds(&element), Some(BoundingBox::new(5.0, 10.0, 100.0, 40.0)));
    }

    #[test]
    fn test_synthesis_reaches_through_zero_sized_wrappers() {
        let element = island().with_children(vec![
            RawElement::new("astro-slot").with_children(vec![
                RawElement::new("div").with_bounding_box(10.0, 10.0, 20.0, 20.0),
            ]),
            RawElement::new("p").with_bounding_box(50.0, 0.0, 10.0, 5.0).with_children(vec![
                RawElement::new("em").with_bounding_box(55.0, 100.0, 5.0, 5.0),
            ]),
            RawElement::new("hr").with_bounding_box(0.0, 500.0, 300.0, 0.0),
        ]);

        assert_eq!(visual_bounds(&element), Some(BoundingBox::new(0.0, 0.0, 300.0, 500.0)));
    }

    #[test]
    fn test_line_descendant_is_visible() {
        let convention = IslandConvention::default();
        let element = island().with_children(vec![
            RawElement::new("hr").with_bounding_box(5.0, 10.0, 300.0, 0.0),
        ]);

        assert_eq!(visual_bounds(&element), Some(BoundingBox::new(5.0, 10.0, 300.0, 0.0)));
        assert_eq!(scroll_target(&element, &convention).to_string(), "0");
    }

    #[test]
    fn test_synthesis_without_visible_descendants() {
        let element = island().with_children(vec![RawElement::new("template")]);
        assert_eq!(visual_bounds(&element), None);
    }

    #[test]
    fn test_overlay_label() {
        let convention = IslandConvention::default();

        assert_eq!(overlay_label(&island(), &convention), "<Counter />");
        assert_eq!(overlay_label(&RawElement::new("SECTION"), &convention), "section");

        let malformed = RawElement::new("astro-island").with_attribute("opts", "{oops");
        assert_eq!(overlay_label(&malformed, &convention), "astro-island");
    }

    #[test]
    fn test_scroll_target() {
        let convention = IslandConvention::default();
        let element = island().with_children(vec![
            RawElement::new("astro-slot").with_children(vec![
                RawElement::new("style"),
                RawElement::new("div").with_bounding_box(0.0, 0.0, 10.0, 10.0),
            ]),
            RawElement::new("p").with_bounding_box(0.0, 0.0, 10.0, 10.0),
        ]);
        assert_eq!(scroll_target(&element, &convention).to_string(), "0.1");

        let invisible = island().with_children(vec![RawElement::new("template")]);
        assert!(scroll_target(&invisible, &convention).is_root());

        let plain = RawElement::new("div").with_children(vec![
            RawElement::new("p").with_bounding_box(0.0, 0.0, 10.0, 10.0),
        ]);
        assert!(scroll_target(&plain, &convention).is_root());
    }

    fn highlighter(page: &Arc<MemoryPage>) -> Highlighter {
        Highlighter::new(page.clone(), IslandConvention::default(), OverlayStyle::default())
    }

    fn document() -> RawElement {
        RawElement::new("body").with_bounding_box(0.0, 0.0, 800.0, 600.0).with_children(vec![
            island().with_children(vec![
                RawElement::new("button").with_bounding_box(5.0, 10.0, 100.0, 40.0),
            ]),
            RawElement::new("astro-island").with_children(vec![RawElement::new("template")]),
        ])
    }

    #[tokio::test]
    async fn test_highlight_draws_overlay() {
        let page = Arc::new(MemoryPage::new(document()));
        let hl = highlighter(&page);

        assert!(hl.highlight("0").await.unwrap());
        let overlay = page.overlay().unwrap();
        assert_eq!(overlay.bounds, BoundingBox::new(5.0, 10.0, 100.0, 40.0));
        assert_eq!(overlay.label, "<Counter />");

        assert!(hl.highlight("").await.unwrap());
        assert_eq!(page.overlay().unwrap().label, "body");

        hl.clear().await.unwrap();
        assert!(page.overlay().is_none());
        hl.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_highlight_misses_are_silent() {
        let page = Arc::new(MemoryPage::new(document()));
        let hl = highlighter(&page);

        assert!(!hl.highlight("7").await.unwrap());
        assert!(!hl.highlight("0.x").await.unwrap());
        assert!(!hl.highlight("1").await.unwrap());
        assert!(page.overlay().is_none());

        let nothing = Arc::new(MemoryPage::empty());
        assert!(!highlighter(&nothing).highlight("0").await.unwrap());
        highlighter(&nothing).clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_scroll_into_view() {
        let page = Arc::new(MemoryPage::new(document()));
        let hl = highlighter(&page);

        assert!(hl.scroll_into_view("0").await.unwrap());
        assert!(hl.scroll_into_view("1").await.unwrap());
        assert!(!hl.scroll_into_view("9").await.unwrap());

        let scrolled: Vec<String> = page.scrolled().iter().map(|p| p.to_string()).collect();
        assert_eq!(scrolled, vec!["0.0", "1"]);
    }
}
