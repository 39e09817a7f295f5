use crate::dom::element::RawElement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural path of an element: the element-child indices walked from the traversal root
///
/// Rendered as a dot-joined string (`"0.1.3"`); the root is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    /// The traversal root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Parse a dot-joined path
    ///
    /// Returns `None` when any segment is not a child index; such a path cannot name an element.
    pub fn parse(path: &str) -> Option<Self> {
        if path.is_empty() {
            return Some(Self::root());
        }
        path.split('.')
            .map(|segment| segment.parse::<usize>().ok())
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Path of the `index`-th child of this element
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Append a path relative to this one
    pub fn join(&self, relative: &ElementPath) -> Self {
        let mut indices = self.0.clone();
        indices.extend_from_slice(&relative.0);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk the path down from `root`; `None` if any step has no such child
    pub fn resolve<'a>(&self, root: &'a RawElement) -> Option<&'a RawElement> {
        self.0
            .iter()
            .try_fold(root, |element, &index| element.children.get(index))
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for index in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{}", index)?;
            first = false;
        }
        Ok(())
    }
}
