use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An element captured from the live page
///
/// Only element children are recorded (text and comment nodes are skipped), in document order,
/// so child indices line up with `Element.children` in the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawElement {
    /// Tag name as reported by the page (not normalized)
    pub tag_name: String,

    /// Element attributes in source order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,

    /// Viewport-relative bounding rectangle at capture time
    #[serde(default)]
    pub bounding_box: BoundingBox,

    /// Child elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawElement>,
}

/// Viewport-relative rectangle, `x`/`y` being the left/top edges
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RawElement {
    /// Create a new RawElement with no attributes, children or size
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            bounding_box: BoundingBox::default(),
            children: Vec::new(),
        }
    }

    /// Builder method: set an attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder method: set children
    pub fn with_children(mut self, children: Vec<RawElement>) -> Self {
        self.children = children;
        self
    }

    /// Builder method: set bounding box
    pub fn with_bounding_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = BoundingBox { x, y, width, height };
        self
    }

    /// Add a child element
    pub fn add_child(&mut self, child: RawElement) {
        self.children.push(child);
    }

    /// Get attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Lowercased tag name
    pub fn normalized_tag(&self) -> String {
        self.tag_name.to_ascii_lowercase()
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Count this element and all of its descendants
    pub fn count_elements(&self) -> usize {
        1 + self.children.iter().map(RawElement::count_elements).sum::<usize>()
    }
}

impl BoundingBox {
    /// Create a new BoundingBox
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Both dimensions are zero, as for `display: contents` wrappers
    pub fn is_zero_sized(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box containing both `self` and `other`
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_element_builder() {
        let element = RawElement::new("DIV")
            .with_attribute("id", "app")
            .with_bounding_box(1.0, 2.0, 3.0, 4.0)
            .with_children(vec![RawElement::new("span")]);

        assert!(element.is_tag("div"));
        assert_eq!(element.normalized_tag(), "div");
        assert_eq!(element.attribute("id"), Some("app"));
        assert_eq!(element.attribute("class"), None);
        assert_eq!(element.count_elements(), 2);
        assert_eq!(element.bounding_box, BoundingBox::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_deserialize_capture() {
        let json = r#"{
            "tag_name": "BODY",
            "attributes": {"class": "page"},
            "bounding_box": {"x": 0, "y": 0, "width": 800, "height": 600},
            "children": [{"tag_name": "ASTRO-ISLAND", "attributes": {"client": "idle"}}]
        }"#;
        let element: RawElement = serde_json::from_str(json).unwrap();

        assert_eq!(element.children.len(), 1);
        assert_eq!(element.children[0].attribute("client"), Some("idle"));
        assert!(element.children[0].bounding_box.is_zero_sized());
    }

    #[test]
    fn test_zero_sized() {
        assert!(BoundingBox::default().is_zero_sized());
        assert!(BoundingBox::new(40.0, 12.0, 0.0, 0.0).is_zero_sized());

        // a line still has a size
        assert!(!BoundingBox::new(0.0, 0.0, 100.0, 0.0).is_zero_sized());
        assert!(!BoundingBox::new(5.0, 5.0, 1.0, 1.0).is_zero_sized());
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        let b = BoundingBox::new(5.0, 50.0, 10.0, 20.0);
        let u = a.union(&b);

        assert_eq!(u, BoundingBox::new(5.0, 20.0, 35.0, 50.0));
        assert_eq!(a.union(&a), a);
    }
}
