#![forbid(unsafe_code)]

//! Expand/collapse state machine over a [`TagTree`].
//!
//! Expansion is stored on each [`TagNode`] and changed only here. Bulk
//! operations rewrite every node inside one call, so no render ever sees a
//! half-applied bulk change.

use apinav_core::config::RenderStyle;
use apinav_core::model::{NodePath, TagNode, TagTree};

/// Which bulk operation ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    ExpandAll,
    CollapseAll,
}

impl BulkAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExpandAll => "expand-all",
            Self::CollapseAll => "collapse-all",
        }
    }
}

/// Expansion as rendered: read mode shows every node expanded.
#[inline]
#[must_use]
pub fn effective_expanded(node: &TagNode, style: RenderStyle) -> bool {
    style.is_read() || node.is_expanded()
}

/// Flip one node's state. Descendants and ancestors are untouched.
///
/// Returns the new state, or `None` when the path is unknown or the node
/// has nothing to expand.
pub fn toggle(tree: &mut TagTree, path: &NodePath, source: &str) -> Option<bool> {
    let node = tree.node_mut(path)?;
    if !node.is_collapsible() {
        return None;
    }
    let expanded = node.toggle_expanded();
    tracing::debug!(
        message = "navbar.toggle",
        action = if expanded { "expand" } else { "collapse" },
        source,
        element_id = node.element_id(),
        level = node.level()
    );
    Some(expanded)
}

fn set_all(tree: &mut TagTree, action: BulkAction) -> usize {
    let expanded = action == BulkAction::ExpandAll;
    let mut changed = 0usize;
    tree.visit_mut(|node| {
        if node.is_expanded() != expanded {
            node.set_expanded(expanded);
            changed += 1;
        }
    });
    tracing::debug!(message = "navbar.bulk", action = action.as_str(), changed);
    changed
}

/// Expand every node at every level. Returns how many nodes changed.
pub fn expand_all(tree: &mut TagTree) -> usize {
    set_all(tree, BulkAction::ExpandAll)
}

/// Collapse every node at every level. Returns how many nodes changed.
pub fn collapse_all(tree: &mut TagTree) -> usize {
    set_all(tree, BulkAction::CollapseAll)
}

/// Aggregate state driving the global toggle.
///
/// True when every node with children is expanded. A tree without any
/// grouping node falls back to all of its nodes; an empty tree is never
/// "all expanded".
#[must_use]
pub fn all_expanded(tree: &TagTree) -> bool {
    let mut groups = tree.iter().filter(|(_, node)| node.has_children()).peekable();
    if groups.peek().is_some() {
        return groups.all(|(_, node)| node.is_expanded());
    }
    !tree.is_empty() && tree.iter().all(|(_, node)| node.is_expanded())
}

/// Collapse everything when [`all_expanded`], otherwise expand everything.
pub fn toggle_all_groups(tree: &mut TagTree) -> BulkAction {
    let action = if all_expanded(tree) {
        BulkAction::CollapseAll
    } else {
        BulkAction::ExpandAll
    };
    set_all(tree, action);
    action
}

/// Number of expanded nodes, for render diagnostics.
#[must_use]
pub fn expanded_count(tree: &TagTree) -> usize {
    tree.iter().filter(|(_, node)| node.is_expanded()).count()
}
