//! Island tree snapshots
//!
//! - TreeBuilder: turns a captured DOM into a typed tree annotated with hydration metadata
//! - filters: pure views over a snapshot (auto-expansion, islands-only, flattening, lookups)
//! - IslandConvention: the tag and attribute names islands are recognised by

pub mod builder;
pub mod convention;
pub mod filters;
pub mod island;
pub mod node;
pub mod render;

pub use builder::{TreeBuilder, build_tree};
pub use convention::IslandConvention;
pub use filters::{
    auto_expand_set, expandable_ids, filter_islands_only, find_by_path, find_node, find_parent,
    flatten_visible, has_island_descendant,
};
pub use island::IslandMetadata;
pub use node::TreeNode;
pub use render::{TreeSummary, render_rows};
