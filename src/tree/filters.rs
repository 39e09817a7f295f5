//! Pure views derived from a snapshot tree
//!
//! Nothing here mutates its input; filtered trees are fresh copies.

use crate::tree::node::TreeNode;
use std::collections::HashSet;

/// The node is an island or has one anywhere below it
pub fn has_island_descendant(node: &TreeNode) -> bool {
    node.is_island || node.children.iter().any(has_island_descendant)
}

/// Ids that start expanded: the root, plus every node with a child subtree holding an island
///
/// Branches without islands stay collapsed, however large they are.
pub fn auto_expand_set(root: &TreeNode) -> HashSet<String> {
    let mut expanded = HashSet::new();
    expanded.insert(root.id.clone());
    collect_island_routes(root, &mut expanded);
    expanded
}

fn collect_island_routes(node: &TreeNode, expanded: &mut HashSet<String>) {
    for child in &node.children {
        if has_island_descendant(child) {
            expanded.insert(node.id.clone());
            collect_island_routes(child, expanded);
        }
    }
}

/// Copy of the tree keeping islands (with their whole subtree) and their ancestors
///
/// `None` when there is no island anywhere in the tree.
pub fn filter_islands_only(root: &TreeNode) -> Option<TreeNode> {
    if root.is_island {
        return Some(root.clone());
    }

    let children: Vec<TreeNode> = root.children.iter().filter_map(filter_islands_only).collect();
    if children.is_empty() {
        return None;
    }

    Some(TreeNode {
        id: root.id.clone(),
        tag_name: root.tag_name.clone(),
        is_island: root.is_island,
        component_name: root.component_name.clone(),
        client_directive: root.client_directive.clone(),
        framework: root.framework.clone(),
        props: root.props.clone(),
        children,
        depth: root.depth,
        path: root.path.clone(),
    })
}

/// Pre-order list of the rows currently visible: a node's children appear only if it is expanded
pub fn flatten_visible<'a>(root: &'a TreeNode, expanded: &HashSet<String>) -> Vec<&'a TreeNode> {
    let mut rows = Vec::new();
    push_visible(root, expanded, &mut rows);
    rows
}

fn push_visible<'a>(node: &'a TreeNode, expanded: &HashSet<String>, rows: &mut Vec<&'a TreeNode>) {
    rows.push(node);
    if expanded.contains(&node.id) {
        for child in &node.children {
            push_visible(child, expanded, rows);
        }
    }
}

/// Direct parent of the node with `target_id`; `None` for the root or an unknown id
pub fn find_parent<'a>(root: &'a TreeNode, target_id: &str) -> Option<&'a TreeNode> {
    for child in &root.children {
        if child.id == target_id {
            return Some(root);
        }
        if let Some(parent) = find_parent(child, target_id) {
            return Some(parent);
        }
    }
    None
}

/// Node with the given id
pub fn find_node<'a>(root: &'a TreeNode, id: &str) -> Option<&'a TreeNode> {
    if root.id == id {
        return Some(root);
    }
    root.children.iter().find_map(|child| find_node(child, id))
}

/// Node with the given structural path
pub fn find_by_path<'a>(root: &'a TreeNode, path: &str) -> Option<&'a TreeNode> {
    if root.path == path {
        return Some(root);
    }
    root.children.iter().find_map(|child| {
        let prefix_matches =
            child.path == path || path.starts_with(&format!("{}.", child.path));
        if prefix_matches {
            find_by_path(child, path)
        } else {
            None
        }
    })
}

/// Ids of every node that has children
pub fn expandable_ids(root: &TreeNode) -> HashSet<String> {
    let mut ids = HashSet::new();
    collect_expandable(root, &mut ids);
    ids
}

fn collect_expandable(node: &TreeNode, ids: &mut HashSet<String>) {
    if node.has_children() {
        ids.insert(node.id.clone());
    }
    for child in &node.children {
        collect_expandable(child, ids);
    }
}
