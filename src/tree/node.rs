use crate::dom::ElementPath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of an island tree snapshot
///
/// Ids are assigned per traversal and only mean something within the snapshot that produced
/// them. `path` is the durable link back to the live page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,

    /// Lowercase tag name
    pub tag_name: String,

    #[serde(rename = "isAstroIsland", alias = "isIsland")]
    pub is_island: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_directive: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    /// Island props, only present when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<IndexMap<String, serde_json::Value>>,

    #[serde(default)]
    pub children: Vec<TreeNode>,

    pub depth: usize,

    /// Dot-joined sibling indices from the root, empty for the root
    pub path: String,
}

impl TreeNode {
    /// Create a plain (non-island) node
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>, path: &ElementPath) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            is_island: false,
            component_name: None,
            client_directive: None,
            framework: None,
            props: None,
            children: Vec::new(),
            depth: path.depth(),
            path: path.to_string(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Parsed form of `path`
    pub fn element_path(&self) -> Option<ElementPath> {
        ElementPath::parse(&self.path)
    }

    /// Short human label: `<Counter client:idle>` for islands, `<div>` otherwise
    pub fn label(&self) -> String {
        if !self.is_island {
            return format!("<{}>", self.tag_name);
        }
        let name = self.component_name.as_deref().unwrap_or(&self.tag_name);
        match &self.client_directive {
            Some(directive) => format!("<{} client:{}>", name, directive),
            None => format!("<{}>", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_depth_and_path() {
        let node = TreeNode::new("node-3", "div", &ElementPath::from_indices(vec![0, 2]));
        assert_eq!(node.depth, 2);
        assert_eq!(node.path, "0.2");
        assert_eq!(node.element_path(), Some(ElementPath::from_indices(vec![0, 2])));
        assert!(!node.has_children());
    }

    #[test]
    fn test_label() {
        let mut node = TreeNode::new("node-1", "astro-island", &ElementPath::root().child(0));
        assert_eq!(node.label(), "<astro-island>");

        node.is_island = true;
        node.component_name = Some("Counter".to_string());
        node.client_directive = Some("visible".to_string());
        assert_eq!(node.label(), "<Counter client:visible>");
    }

    #[test]
    fn test_serialized_field_names() {
        let mut node = TreeNode::new("node-0", "body", &ElementPath::root());
        node.is_island = false;
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["tagName"], "body");
        assert_eq!(json["isAstroIsland"], false);
        assert_eq!(json["path"], "");
        assert_eq!(json["depth"], 0);
        assert!(json.get("props").is_none());
        assert!(json.get("componentName").is_none());
    }
}
