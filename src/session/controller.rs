use crate::config::InspectorConfig;
use crate::dom::{ElementPath, RawElement};
use crate::error::Result;
use crate::highlight::Highlighter;
use crate::page::{self, PageHost};
use crate::session::keys::NavKey;
use crate::tree::{
    IslandConvention, TreeNode, TreeSummary, auto_expand_set, build_tree, expandable_ids,
    filter_islands_only, find_node, find_parent, flatten_visible, render_rows,
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Why the last refresh produced no tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No inspected page available")]
    NoTarget,

    #[error("Failed to build tree: {}", .0.as_deref().unwrap_or("unknown error"))]
    BuildFailed(Option<String>),

    #[error("Failed to get tree")]
    NoTree,
}

/// Lifecycle of the session's snapshot
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Error(SessionError),
}

/// State of one inspection session
///
/// Holds the current snapshot and everything the tree view derives from it. Only `refresh`
/// replaces the snapshot; the other operations are local and keep the session `Ready`.
pub struct InspectorSession {
    host: Arc<dyn PageHost>,
    highlighter: Highlighter,
    convention: IslandConvention,
    status: SessionStatus,
    snapshot: Option<TreeNode>,
    /// `snapshot` filtered to islands, recomputed with every snapshot
    islands_view: Option<TreeNode>,
    selected: Option<String>,
    expanded: HashSet<String>,
    search_query: String,
    islands_only: bool,
}

impl InspectorSession {
    pub fn new(host: Arc<dyn PageHost>, config: InspectorConfig) -> Self {
        let highlighter = Highlighter::new(host.clone(), config.convention.clone(), config.overlay);
        Self {
            host,
            highlighter,
            convention: config.convention,
            status: SessionStatus::Idle,
            snapshot: None,
            islands_view: None,
            selected: None,
            expanded: HashSet::new(),
            search_query: String::new(),
            islands_only: false,
        }
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// The full snapshot, regardless of filters
    pub fn snapshot(&self) -> Option<&TreeNode> {
        self.snapshot.as_ref()
    }

    /// The tree the view shows: the islands-only copy when that filter is on
    ///
    /// Nothing is shown while the last refresh failed; the kept snapshot may describe a page that
    /// is no longer there.
    pub fn displayed_tree(&self) -> Option<&TreeNode> {
        if matches!(self.status, SessionStatus::Error(_)) {
            return None;
        }
        if self.islands_only {
            self.islands_view.as_ref()
        } else {
            self.snapshot.as_ref()
        }
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selected node, looked up in the full snapshot so filtering never hides it
    pub fn selected_node(&self) -> Option<&TreeNode> {
        find_node(self.snapshot.as_ref()?, self.selected.as_deref()?)
    }

    pub fn expanded(&self) -> &HashSet<String> {
        &self.expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn islands_only(&self) -> bool {
        self.islands_only
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Rows of the displayed tree in navigation order
    pub fn visible_nodes(&self) -> Vec<&TreeNode> {
        self.displayed_tree()
            .map(|tree| flatten_visible(tree, &self.expanded))
            .unwrap_or_default()
    }

    /// Visible rows as text
    pub fn render(&self) -> Vec<String> {
        render_rows(&self.visible_nodes(), &self.expanded, self.selected.as_deref())
    }

    pub fn summary(&self) -> Option<TreeSummary> {
        self.snapshot.as_ref().map(TreeSummary::of)
    }

    /// Rebuild the snapshot from the inspected page
    ///
    /// On success the expansion set is recomputed and the selection cleared, since ids of the
    /// old snapshot mean nothing in the new one. On failure the previous state is left alone.
    pub async fn refresh(&mut self) -> &SessionStatus {
        self.status = SessionStatus::Loading;

        match self.build_snapshot().await {
            Ok(tree) => {
                let summary = TreeSummary::of(&tree);
                log::info!(
                    "Snapshot ready: {} nodes, {} islands",
                    summary.node_count,
                    summary.island_count
                );
                self.expanded = auto_expand_set(&tree);
                self.islands_view = filter_islands_only(&tree);
                self.selected = None;
                self.snapshot = Some(tree);
                self.status = SessionStatus::Ready;
            }
            Err(e) => {
                log::warn!("Refresh failed: {}", e);
                self.status = SessionStatus::Error(e);
            }
        }

        &self.status
    }

    async fn build_snapshot(&self) -> std::result::Result<TreeNode, SessionError> {
        let page_id = self.host.inspected_page().await.ok_or(SessionError::NoTarget)?;
        let root = page::capture(self.host.as_ref(), &page_id, &ElementPath::root())
            .await
            .map_err(|e| {
                let cause = e.to_string();
                SessionError::BuildFailed((!cause.is_empty()).then_some(cause))
            })?
            .ok_or(SessionError::NoTree)?;

        Ok(build_tree(&root, &self.convention))
    }

    /// Capture the inspected page's body as it is now
    pub async fn capture_document(&self) -> Result<Option<RawElement>> {
        let Some(page_id) = self.host.inspected_page().await else {
            return Ok(None);
        };
        page::capture(self.host.as_ref(), &page_id, &ElementPath::root()).await
    }

    /// Select a node of the current snapshot and bring it into view
    ///
    /// `false` for unknown ids, and while the last refresh failed.
    pub async fn select(&mut self, id: &str) -> bool {
        if matches!(self.status, SessionStatus::Error(_)) {
            return false;
        }
        let path = match self.snapshot.as_ref().and_then(|tree| find_node(tree, id)) {
            Some(node) => node.path.clone(),
            None => return false,
        };
        self.selected = Some(id.to_string());
        self.request_scroll(&path).await;
        true
    }

    /// Flip a node between expanded and collapsed
    pub fn toggle(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Expand every node that has children
    pub fn expand_all(&mut self) {
        if let Some(tree) = &self.snapshot {
            self.expanded = expandable_ids(tree);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn toggle_islands_only(&mut self) {
        self.islands_only = !self.islands_only;
    }

    /// Highlight a node's element on the page
    pub async fn hover(&self, path: &str) {
        if let Err(e) = self.highlighter.highlight(path).await {
            log::debug!("Highlight of {:?} failed: {}", path, e);
        }
    }

    pub async fn unhover(&self) {
        if let Err(e) = self.highlighter.clear().await {
            log::debug!("Clearing highlight failed: {}", e);
        }
    }

    /// Handle a key press on the tree list
    ///
    /// Returns `true` when the key is a navigation key, whose default action must be suppressed.
    pub async fn handle_key_down(&mut self, key: &str) -> bool {
        let Ok(key) = key.parse::<NavKey>() else {
            return false;
        };
        if let Some(path) = self.apply_key(key) {
            self.request_scroll(&path).await;
        }
        true
    }

    /// Update selection/expansion for `key`; returns the path to scroll to, if any
    fn apply_key(&mut self, key: NavKey) -> Option<String> {
        let tree = self.displayed_tree()?;

        match key {
            NavKey::Up | NavKey::Down => {
                let rows = flatten_visible(tree, &self.expanded);
                let current = self
                    .selected
                    .as_deref()
                    .and_then(|id| rows.iter().position(|node| node.id == id));
                let next = match (key, current) {
                    (NavKey::Down, Some(index)) => (index + 1).min(rows.len() - 1),
                    (NavKey::Up, Some(index)) => index.saturating_sub(1),
                    _ => 0,
                };
                let node = rows[next];
                let (id, path) = (node.id.clone(), node.path.clone());
                self.selected = Some(id);
                Some(path)
            }
            NavKey::Right => {
                let node = find_node(tree, self.selected.as_deref()?)?;
                if !node.has_children() {
                    return None;
                }
                if !self.expanded.contains(&node.id) {
                    let id = node.id.clone();
                    self.expanded.insert(id);
                    return None;
                }
                let child = &node.children[0];
                let (id, path) = (child.id.clone(), child.path.clone());
                self.selected = Some(id);
                Some(path)
            }
            NavKey::Left => {
                let id = self.selected.clone()?;
                let node = find_node(tree, &id)?;
                if node.has_children() && self.expanded.contains(&id) {
                    self.expanded.remove(&id);
                    return None;
                }
                let parent = find_parent(tree, &id)?;
                let (parent_id, path) = (parent.id.clone(), parent.path.clone());
                self.selected = Some(parent_id);
                Some(path)
            }
            NavKey::Enter => self.selected_node().map(|node| node.path.clone()),
        }
    }

    async fn request_scroll(&self, path: &str) {
        if let Err(e) = self.highlighter.scroll_into_view(path).await {
            log::debug!("Scroll to {:?} failed: {}", path, e);
        }
    }
}
