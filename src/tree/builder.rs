use crate::dom::{ElementPath, RawElement};
use crate::tree::convention::IslandConvention;
use crate::tree::island::IslandMetadata;
use crate::tree::node::TreeNode;

/// Builds one island tree snapshot from a captured DOM
///
/// The id counter lives in the builder, so every `build` call starts a fresh sequence and two
/// builders never interfere.
pub struct TreeBuilder<'a> {
    convention: &'a IslandConvention,
    next_id: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(convention: &'a IslandConvention) -> Self {
        Self {
            convention,
            next_id: 0,
        }
    }

    /// Depth-first pre-order walk from `root`, which becomes the tree root (depth 0, empty path)
    pub fn build(&mut self, root: &RawElement) -> TreeNode {
        self.next_id = 0;
        self.visit(root, ElementPath::root())
    }

    fn visit(&mut self, element: &RawElement, path: ElementPath) -> TreeNode {
        let tag_name = element.normalized_tag();
        let id = format!("node-{}", self.next_id);
        self.next_id += 1;

        let mut node = TreeNode::new(id, tag_name, &path);

        if self.convention.is_island_tag(&node.tag_name) {
            let metadata = IslandMetadata::read(element, self.convention);
            node.is_island = true;
            node.component_name = Some(metadata.component_name);
            node.client_directive = Some(metadata.client_directive);
            node.framework = metadata.framework;
            node.props = metadata.props;
        }

        node.children = element
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| self.visit(child, path.child(index)))
            .collect();

        node
    }
}

/// Build a snapshot with a one-off builder
pub fn build_tree(root: &RawElement, convention: &IslandConvention) -> TreeNode {
    TreeBuilder::new(convention).build(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> RawElement {
        RawElement::new("BODY").with_children(vec![
            RawElement::new("HEADER").with_children(vec![RawElement::new("NAV")]),
            RawElement::new("MAIN").with_children(vec![
                RawElement::new("P"),
                RawElement::new("ASTRO-ISLAND")
                    .with_attribute("client", "visible")
                    .with_attribute("opts", r#"{"name":"Carousel"}"#)
                    .with_attribute("renderer-url", "/_astro/client.svelte.js")
                    .with_children(vec![RawElement::new("DIV")]),
            ]),
        ])
    }

    fn assert_structure(node: &TreeNode, parent: Option<&TreeNode>, index: usize) {
        match parent {
            None => {
                assert_eq!(node.path, "");
                assert_eq!(node.depth, 0);
            }
            Some(parent) if parent.path.is_empty() => assert_eq!(node.path, index.to_string()),
            Some(parent) => assert_eq!(node.path, format!("{}.{}", parent.path, index)),
        }
        let segments = if node.path.is_empty() { 0 } else { node.path.split('.').count() };
        assert_eq!(node.depth, segments);

        for (i, child) in node.children.iter().enumerate() {
            assert_structure(child, Some(node), i);
        }
    }

    #[test]
    fn test_paths_and_depths() {
        let tree = build_tree(&page(), &IslandConvention::default());
        assert_structure(&tree, None, 0);
    }

    #[test]
    fn test_tags_are_lowercased_and_ordered() {
        let tree = build_tree(&page(), &IslandConvention::default());

        assert_eq!(tree.tag_name, "body");
        let tags: Vec<&str> = tree.children.iter().map(|c| c.tag_name.as_str()).collect();
        assert_eq!(tags, vec!["header", "main"]);
        assert!(tree.children[0].children[0].children.is_empty());
    }

    #[test]
    fn test_ids_follow_pre_order() {
        let tree = build_tree(&page(), &IslandConvention::default());

        assert_eq!(tree.id, "node-0");
        assert_eq!(tree.children[0].id, "node-1");
        assert_eq!(tree.children[0].children[0].id, "node-2");
        assert_eq!(tree.children[1].id, "node-3");
        assert_eq!(tree.children[1].children[1].children[0].id, "node-6");
    }

    #[test]
    fn test_builder_restarts_ids() {
        let convention = IslandConvention::default();
        let mut builder = TreeBuilder::new(&convention);
        let first = builder.build(&page());
        let second = builder.build(&page());
        assert_eq!(first, second);
    }

    #[test]
    fn test_island_classification() {
        let tree = build_tree(&page(), &IslandConvention::default());
        let island = &tree.children[1].children[1];

        assert!(island.is_island);
        assert_eq!(island.path, "1.1");
        assert_eq!(island.component_name.as_deref(), Some("Carousel"));
        assert_eq!(island.client_directive.as_deref(), Some("visible"));
        assert_eq!(island.framework.as_deref(), Some("svelte"));
        assert_eq!(island.props, None);

        let plain = &tree.children[1].children[0];
        assert!(!plain.is_island);
        assert_eq!(plain.component_name, None);
        assert_eq!(plain.client_directive, None);
    }

    #[test]
    fn test_single_island_scenario() {
        let body = RawElement::new("body").with_children(vec![
            RawElement::new("astro-island")
                .with_attribute("client", "idle")
                .with_attribute("opts", r#"{"name":"Counter"}"#),
        ]);

        let tree = build_tree(&body, &IslandConvention::default());

        assert_eq!(tree.children.len(), 1);
        let island = &tree.children[0];
        assert!(island.is_island);
        assert_eq!(island.client_directive.as_deref(), Some("idle"));
        assert_eq!(island.component_name.as_deref(), Some("Counter"));
        assert_eq!(island.path, "0");
        assert_eq!(island.depth, 1);
    }
}
