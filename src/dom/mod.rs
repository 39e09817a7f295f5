//! Captured DOM model
//!
//! This module holds the read-only view of the inspected page the rest of the crate works on:
//! - RawElement: an element captured from the page, with its attributes and bounding box
//! - BoundingBox: viewport-relative rectangles and their unions
//! - ElementPath: structural paths that locate an element from the traversal root

pub mod element;
pub mod path;

pub use element::{BoundingBox, RawElement};
pub use path::ElementPath;
