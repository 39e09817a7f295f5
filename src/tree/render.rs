use crate::tree::node::TreeNode;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Render visible rows as indented text lines
///
/// `▾`/`▸` mark expanded/collapsed nodes with children, `*` marks the selection.
pub fn render_rows(rows: &[&TreeNode], expanded: &HashSet<String>, selected: Option<&str>) -> Vec<String> {
    rows.iter()
        .map(|node| {
            let cursor = if selected == Some(node.id.as_str()) { '*' } else { ' ' };
            let marker = match (node.has_children(), expanded.contains(&node.id)) {
                (false, _) => ' ',
                (true, true) => '▾',
                (true, false) => '▸',
            };
            let mut line = format!("{}{}{} {}", cursor, "  ".repeat(node.depth), marker, node.label());
            if let Some(framework) = &node.framework {
                line.push_str(&format!(" [{}]", framework));
            }
            line
        })
        .collect()
}

/// Counts over a snapshot
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TreeSummary {
    pub node_count: usize,
    pub island_count: usize,
    pub islands_by_framework: BTreeMap<String, usize>,
    pub islands_by_directive: BTreeMap<String, usize>,
}

impl TreeSummary {
    pub fn of(root: &TreeNode) -> Self {
        let mut summary = Self::default();
        summary.add(root);
        summary
    }

    fn add(&mut self, node: &TreeNode) {
        self.node_count += 1;
        if node.is_island {
            self.island_count += 1;
            let framework = node.framework.clone().unwrap_or_else(|| "unknown".to_string());
            *self.islands_by_framework.entry(framework).or_default() += 1;
            if let Some(directive) = &node.client_directive {
                *self.islands_by_directive.entry(directive.clone()).or_default() += 1;
            }
        }
        for child in &node.children {
            self.add(child);
        }
    }
}
