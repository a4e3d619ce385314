#![forbid(unsafe_code)]

//! Visibility resolver: decides which tag nodes appear under a search filter.
//!
//! Visibility is independent of expansion. A collapsed node can be visible
//! (its header shows); an invisible node is absent from the rendered tree.
//!
//! The child test is deliberately one level deep: a child counts when one of
//! its own operations matches, or when it has any children at all. Deeper
//! descendants are never inspected. Each child is resolved again on its own
//! when the renderer descends, so a visible parent does not force its
//! children visible.
//!
//! The "General ⦂" pseudo-tag is a divider: it is emitted even when the
//! filter hides its operations.

use apinav_core::model::{NodePath, PathEntry, TagNode, TagTree};

/// Search predicate consumed by the resolver.
///
/// Called as `matches(term, entry, context_name)` where `context_name` is the
/// owning node's full name (or name). `term` is already trimmed and never
/// empty.
pub trait MatchPredicate {
    fn matches(&self, term: &str, entry: &PathEntry, context_name: &str) -> bool;
}

impl<F> MatchPredicate for F
where
    F: Fn(&str, &PathEntry, &str) -> bool,
{
    fn matches(&self, term: &str, entry: &PathEntry, context_name: &str) -> bool {
        self(term, entry, context_name)
    }
}

/// Resolver verdict for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub visible: bool,
    pub has_matching_paths: bool,
    pub has_matching_children: bool,
}

impl Visibility {
    /// A node that is not rendered.
    pub const HIDDEN: Self = Self {
        visible: false,
        has_matching_paths: false,
        has_matching_children: false,
    };
}

/// Whether `entry` passes the filter. An empty term passes everything.
#[must_use]
pub fn path_matches<P>(term: &str, entry: &PathEntry, context_name: &str, predicate: &P) -> bool
where
    P: MatchPredicate + ?Sized,
{
    let term = term.trim();
    term.is_empty() || predicate.matches(term, entry, context_name)
}

fn any_path_matches<P>(node: &TagNode, term: &str, predicate: &P) -> bool
where
    P: MatchPredicate + ?Sized,
{
    let context = node.context_name();
    node.paths()
        .iter()
        .any(|entry| path_matches(term, entry, context, predicate))
}

/// Resolve one node against `term`.
///
/// An empty (or blank) term yields `has_matching_paths = true` for every
/// node, so nothing is filtered.
#[must_use]
pub fn resolve<P>(node: &TagNode, term: &str, predicate: &P) -> Visibility
where
    P: MatchPredicate + ?Sized,
{
    let term = term.trim();
    let has_matching_paths = term.is_empty() || any_path_matches(node, term, predicate);
    let has_matching_children = node
        .children()
        .iter()
        .any(|child| any_path_matches(child, term, predicate) || child.has_children());
    Visibility {
        visible: has_matching_paths || has_matching_children,
        has_matching_paths,
        has_matching_children,
    }
}

/// Whether a root node is left out of the rendered tree regardless of the
/// filter: it has neither operations nor children and is not the divider.
#[must_use]
pub fn skips_root(node: &TagNode) -> bool {
    node.paths().is_empty() && !node.has_children() && !node.is_general_divider()
}

/// Paths of every node the renderer would emit, in pre-order.
///
/// Invisible nodes are pruned together with their subtrees, except that the
/// divider pseudo-tag itself stays. Roots matched by [`skips_root`] are left
/// out.
#[must_use]
pub fn visible_nodes<P>(tree: &TagTree, term: &str, predicate: &P) -> Vec<NodePath>
where
    P: MatchPredicate + ?Sized,
{
    fn walk<P: MatchPredicate + ?Sized>(
        node: &TagNode,
        path: NodePath,
        term: &str,
        predicate: &P,
        out: &mut Vec<NodePath>,
    ) {
        let visible = resolve(node, term, predicate).visible;
        if visible || node.is_general_divider() {
            out.push(path.clone());
        }
        if !visible {
            return;
        }
        for (i, child) in node.children().iter().enumerate() {
            walk(child, path.child(i), term, predicate, out);
        }
    }

    let mut out = Vec::new();
    for (i, root) in tree.roots().iter().enumerate() {
        if skips_root(root) {
            continue;
        }
        walk(root, NodePath::root(i), term, predicate, &mut out);
    }
    out
}
