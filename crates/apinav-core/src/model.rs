#![forbid(unsafe_code)]

//! Tag-tree model for the navigation bar.
//!
//! A [`TagTree`] is the ordered forest of [`TagNode`]s produced by the spec
//! resolver (`resolvedSpec.tags`). Each node groups documented operations
//! ([`PathEntry`]) and may nest further groups. Everything except a node's
//! `expanded` flag is fixed once the tree is accepted.
//!
//! # Example
//!
//! ```
//! use apinav_core::model::{HttpMethod, PathEntry, TagNode, TagTree};
//!
//! let tree = TagTree::new(vec![
//!     TagNode::new("pets", "tag--pets")
//!         .path(PathEntry::new("p1", HttpMethod::Get, "/pets"))
//!         .child(
//!             TagNode::new("cats", "tag--cats")
//!                 .path(PathEntry::new("p2", HttpMethod::Post, "/cats")),
//!         ),
//! ])
//! .unwrap();
//!
//! assert_eq!(tree.roots()[0].children()[0].level(), 1);
//! assert_eq!(tree.roots()[0].display_name(), "Pets");
//! ```

use crate::error::ModelError;
use ahash::AHashMap;
use std::borrow::Cow;
use std::fmt;

/// Name of the divider pseudo-tag the resolver inserts before untagged
/// operations. It renders as a rule instead of a header.
pub const GENERAL_DIVIDER_NAME: &str = "General ⦂";

// ============================================================================
// Operations
// ============================================================================

/// HTTP verbs an operation entry can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "String"))]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Every supported verb, in display order.
    pub const ALL: [Self; 8] = [
        Self::Get,
        Self::Put,
        Self::Post,
        Self::Delete,
        Self::Options,
        Self::Head,
        Self::Patch,
        Self::Trace,
    ];

    /// Parse a verb case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_lower().eq_ignore_ascii_case(value))
    }

    /// Lowercase form used for matching.
    #[must_use]
    pub const fn as_lower(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }

    /// Uppercase form used for display.
    #[must_use]
    pub const fn as_upper(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        }
    }

    /// Three-letter uppercase badge (`DEL`, `OPT`, ...).
    #[must_use]
    pub fn abbrev(self) -> &'static str {
        let upper = self.as_upper();
        &upper[..upper.len().min(3)]
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_upper())
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(ModelError::UnknownMethod { method: value })
    }
}

/// A markdown heading extracted from a description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Header {
    /// Heading depth (1 for `#`, 2 for `##`, ...).
    pub depth: u8,
    /// Heading text.
    pub text: String,
}

impl Header {
    #[must_use]
    pub fn new(depth: u8, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

/// One documented API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PathEntry {
    pub element_id: String,
    pub method: HttpMethod,
    /// Endpoint path template, e.g. `/pets/{id}`.
    pub path: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub short_summary: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprecated: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_webhook: bool,
}

impl PathEntry {
    #[must_use]
    pub fn new(element_id: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            method,
            path: path.into(),
            summary: None,
            short_summary: None,
            deprecated: false,
            is_webhook: false,
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn with_short_summary(mut self, short_summary: impl Into<String>) -> Self {
        self.short_summary = Some(short_summary.into());
        self
    }

    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    #[must_use]
    pub fn with_webhook(mut self, is_webhook: bool) -> Self {
        self.is_webhook = is_webhook;
        self
    }

    /// Text shown for this entry: the path template, or the summary
    /// (falling back to the short summary).
    #[must_use]
    pub fn nav_label(&self, use_path: bool) -> &str {
        if use_path {
            return &self.path;
        }
        self.summary
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.short_summary.as_deref())
            .unwrap_or_default()
    }
}

// ============================================================================
// Tag nodes
// ============================================================================

/// One node of the tag hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TagNode {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    display_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    full_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    level: usize,
    element_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    is_leaf: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    expanded: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    paths: Vec<PathEntry>,
    #[cfg_attr(feature = "serde", serde(default))]
    children: Vec<TagNode>,
    #[cfg_attr(feature = "serde", serde(default))]
    headers: Vec<Header>,
}

impl TagNode {
    /// Create a collapsed root-level node.
    #[must_use]
    pub fn new(name: impl Into<String>, element_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            full_name: None,
            level: 0,
            element_id: element_id.into(),
            is_leaf: false,
            expanded: false,
            paths: Vec::new(),
            children: Vec::new(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn with_leaf(mut self, is_leaf: bool) -> Self {
        self.is_leaf = is_leaf;
        self
    }

    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Vec<Header>) -> Self {
        self.headers = headers;
        self
    }

    /// Place this node (and its subtree) at `level`.
    #[must_use]
    pub fn with_level(mut self, level: usize) -> Self {
        self.relevel(level);
        self
    }

    /// Append an operation.
    #[must_use]
    pub fn path(mut self, entry: PathEntry) -> Self {
        self.paths.push(entry);
        self
    }

    #[must_use]
    pub fn with_paths(mut self, paths: Vec<PathEntry>) -> Self {
        self.paths = paths;
        self
    }

    /// Append a child group one level below this node.
    #[must_use]
    pub fn child(mut self, mut node: TagNode) -> Self {
        node.relevel(self.level + 1);
        self.children.push(node);
        self
    }

    /// Replace the children, re-leveling each below this node.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<TagNode>) -> Self {
        self.children = nodes;
        let level = self.level;
        for child in &mut self.children {
            child.relevel(level + 1);
        }
        self
    }

    fn relevel(&mut self, level: usize) {
        self.level = level;
        for child in &mut self.children {
            child.relevel(level + 1);
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label shown in the header: the explicit display name, or the name
    /// with the first letter of each word capitalized.
    #[must_use]
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.display_name.as_deref() {
            Some(display) if !display.is_empty() => Cow::Borrowed(display),
            _ => capitalize_words(&self.name),
        }
    }

    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Name handed to the search predicate: the fully-qualified name when
    /// present, otherwise the plain name.
    #[must_use]
    pub fn context_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|full| !full.is_empty())
            .unwrap_or(&self.name)
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    /// Stored expansion state (read-only rendering ignores it).
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    #[must_use]
    pub fn paths(&self) -> &[PathEntry] {
        &self.paths
    }

    #[must_use]
    pub fn children(&self) -> &[TagNode] {
        &self.children
    }

    #[must_use]
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether expanding or collapsing this node changes what is shown.
    #[must_use]
    pub fn is_collapsible(&self) -> bool {
        self.has_children() || !self.paths.is_empty() || (self.is_leaf && !self.headers.is_empty())
    }

    /// Whether this is the "General ⦂" divider pseudo-tag.
    #[must_use]
    pub fn is_general_divider(&self) -> bool {
        self.name == GENERAL_DIVIDER_NAME
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip the stored state and return the new value.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }
}

fn capitalize_words(name: &str) -> Cow<'_, str> {
    let needs_change = name
        .split_whitespace()
        .any(|word| word.chars().next().is_some_and(char::is_lowercase));
    if !needs_change {
        return Cow::Borrowed(name);
    }

    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

// ============================================================================
// Tree
// ============================================================================

/// Index path from the roots to a node (`[2, 0]` = first child of the third root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root at `index`.
    #[must_use]
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path of this node's child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent node, or `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth (a root is depth 0).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// Where an element id lives in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementLocation {
    /// A tag node.
    Tag(NodePath),
    /// The `index`-th operation of a tag node.
    Path { tag: NodePath, index: usize },
}

impl ElementLocation {
    /// The tag node owning this element.
    #[must_use]
    pub fn tag(&self) -> &NodePath {
        match self {
            Self::Tag(tag) | Self::Path { tag, .. } => tag,
        }
    }
}

/// Validated tag forest with an element-id index.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "Vec<TagNode>")
)]
pub struct TagTree {
    roots: Vec<TagNode>,
    index: AHashMap<String, ElementLocation>,
}

impl TagTree {
    /// Accept a forest from the spec resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] when an element id is empty or repeated, a
    /// level disagrees with the nesting, or a leaf groups further operations.
    pub fn new(roots: Vec<TagNode>) -> Result<Self, ModelError> {
        let mut index = AHashMap::new();
        for (i, root) in roots.iter().enumerate() {
            if let Err(err) = index_node(root, 0, NodePath::root(i), &mut index) {
                tracing::warn!(message = "navbar.invalid_tree", error = %err);
                return Err(err);
            }
        }
        Ok(Self { roots, index })
    }

    /// A tree with no tags.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn roots(&self) -> &[TagNode] {
        &self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of tag nodes at all levels.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn node(&self, path: &NodePath) -> Option<&TagNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut current = self.roots.get(*first)?;
        for &idx in rest {
            current = current.children.get(idx)?;
        }
        Some(current)
    }

    pub fn node_mut(&mut self, path: &NodePath) -> Option<&mut TagNode> {
        let (first, rest) = path.indices().split_first()?;
        let mut current = self.roots.get_mut(*first)?;
        for &idx in rest {
            current = current.children.get_mut(idx)?;
        }
        Some(current)
    }

    /// Look up a tag or operation by element id.
    #[must_use]
    pub fn locate(&self, element_id: &str) -> Option<&ElementLocation> {
        self.index.get(element_id)
    }

    /// Pre-order walk over every node with its path.
    pub fn iter(&self) -> impl Iterator<Item = (NodePath, &TagNode)> {
        let mut stack: Vec<(NodePath, &TagNode)> = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (NodePath::root(i), node))
            .collect();
        std::iter::from_fn(move || {
            let (path, node) = stack.pop()?;
            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push((path.child(i), child));
            }
            Some((path, node))
        })
    }

    /// Visit every node mutably, parents before children.
    ///
    /// Only the expansion state is mutable through [`TagNode`], so the tree's
    /// structural invariants survive any visitor.
    pub fn visit_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut TagNode),
    {
        fn walk<F: FnMut(&mut TagNode)>(node: &mut TagNode, f: &mut F) {
            f(node);
            for child in &mut node.children {
                walk(child, f);
            }
        }
        for root in &mut self.roots {
            walk(root, &mut f);
        }
    }
}

impl TryFrom<Vec<TagNode>> for TagTree {
    type Error = ModelError;

    fn try_from(roots: Vec<TagNode>) -> Result<Self, Self::Error> {
        Self::new(roots)
    }
}

fn index_node(
    node: &TagNode,
    expected_level: usize,
    path: NodePath,
    index: &mut AHashMap<String, ElementLocation>,
) -> Result<(), ModelError> {
    if node.element_id.is_empty() {
        return Err(ModelError::EmptyTagElementId {
            name: node.name.clone(),
        });
    }
    if node.level != expected_level {
        return Err(ModelError::LevelMismatch {
            element_id: node.element_id.clone(),
            expected: expected_level,
            found: node.level,
        });
    }
    if node.is_leaf && node.children.iter().any(|c| !c.paths.is_empty()) {
        return Err(ModelError::LeafWithGroupedChildren {
            element_id: node.element_id.clone(),
        });
    }
    insert_unique(index, &node.element_id, ElementLocation::Tag(path.clone()))?;

    for (i, entry) in node.paths.iter().enumerate() {
        if entry.element_id.is_empty() {
            return Err(ModelError::EmptyPathElementId {
                tag: node.name.clone(),
                path: entry.path.clone(),
            });
        }
        insert_unique(
            index,
            &entry.element_id,
            ElementLocation::Path {
                tag: path.clone(),
                index: i,
            },
        )?;
    }

    for (i, child) in node.children.iter().enumerate() {
        index_node(child, expected_level + 1, path.child(i), index)?;
    }
    Ok(())
}

fn insert_unique(
    index: &mut AHashMap<String, ElementLocation>,
    element_id: &str,
    location: ElementLocation,
) -> Result<(), ModelError> {
    if index.contains_key(element_id) {
        return Err(ModelError::DuplicateElementId {
            element_id: element_id.to_owned(),
        });
    }
    index.insert(element_id.to_owned(), location);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pets_tree() -> Vec<TagNode> {
        vec![
            TagNode::new("pets", "tag--pets")
                .path(PathEntry::new("p1", HttpMethod::Get, "/pets"))
                .child(
                    TagNode::new("cats", "tag--cats")
                        .path(PathEntry::new("p2", HttpMethod::Post, "/cats"))
                        .child(TagNode::new("kittens", "tag--kittens")),
                ),
            TagNode::new("store", "tag--store"),
        ]
    }

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(HttpMethod::parse("GET"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse(" delete "), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::parse("Patch"), Some(HttpMethod::Patch));
        assert_eq!(HttpMethod::parse("fetch"), None);
    }

    #[test]
    fn method_display_forms() {
        assert_eq!(HttpMethod::Options.as_lower(), "options");
        assert_eq!(HttpMethod::Options.as_upper(), "OPTIONS");
        assert_eq!(HttpMethod::Options.abbrev(), "OPT");
        assert_eq!(HttpMethod::Get.abbrev(), "GET");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn method_try_from_reports_unknown() {
        let err = HttpMethod::try_from("LINK".to_string()).unwrap_err();
        assert_eq!(
            err,
            ModelError::UnknownMethod {
                method: "LINK".into()
            }
        );
    }

    #[test]
    fn builder_child_relevels_subtree() {
        let node = TagNode::new("a", "a").child(
            TagNode::new("b", "b")
                .with_level(7)
                .child(TagNode::new("c", "c")),
        );
        assert_eq!(node.level(), 0);
        assert_eq!(node.children()[0].level(), 1);
        assert_eq!(node.children()[0].children()[0].level(), 2);
    }

    #[test]
    fn display_name_capitalizes_words() {
        assert_eq!(TagNode::new("pet store", "x").display_name(), "Pet Store");
        assert_eq!(TagNode::new("Pets", "x").display_name(), "Pets");
        assert_eq!(
            TagNode::new("pets", "x").with_display_name("Our Pets").display_name(),
            "Our Pets"
        );
    }

    #[test]
    fn context_name_prefers_full_name() {
        let node = TagNode::new("cats", "x");
        assert_eq!(node.context_name(), "cats");
        let node = node.with_full_name("pets/cats");
        assert_eq!(node.context_name(), "pets/cats");
    }

    #[test]
    fn nav_label_falls_back_to_short_summary() {
        let entry = PathEntry::new("p", HttpMethod::Get, "/pets").with_short_summary("List");
        assert_eq!(entry.nav_label(false), "List");
        assert_eq!(entry.nav_label(true), "/pets");
        let entry = entry.with_summary("List all pets");
        assert_eq!(entry.nav_label(false), "List all pets");
        assert_eq!(PathEntry::new("q", HttpMethod::Get, "/q").nav_label(false), "");
    }

    #[test]
    fn collapsible_nodes() {
        assert!(!TagNode::new("empty", "e").is_collapsible());
        assert!(
            TagNode::new("ops", "o")
                .path(PathEntry::new("p", HttpMethod::Get, "/"))
                .is_collapsible()
        );
        assert!(
            TagNode::new("doc", "d")
                .with_leaf(true)
                .with_headers(vec![Header::new(2, "Intro")])
                .is_collapsible()
        );
        assert!(
            !TagNode::new("doc", "d")
                .with_headers(vec![Header::new(2, "Intro")])
                .is_collapsible()
        );
    }

    #[test]
    fn tree_indexes_tags_and_paths() {
        let tree = TagTree::new(pets_tree()).unwrap();
        assert_eq!(tree.node_count(), 4);
        assert_eq!(
            tree.locate("tag--cats"),
            Some(&ElementLocation::Tag(NodePath::from(vec![0, 0])))
        );
        assert_eq!(
            tree.locate("p2"),
            Some(&ElementLocation::Path {
                tag: NodePath::from(vec![0, 0]),
                index: 0
            })
        );
        assert!(tree.locate("nope").is_none());
    }

    #[test]
    fn tree_iter_is_pre_order() {
        let tree = TagTree::new(pets_tree()).unwrap();
        let names: Vec<&str> = tree.iter().map(|(_, n)| n.name()).collect();
        assert_eq!(names, ["pets", "cats", "kittens", "store"]);
    }

    #[test]
    fn node_lookup_by_path() {
        let mut tree = TagTree::new(pets_tree()).unwrap();
        let path = NodePath::from(vec![0, 0, 0]);
        assert_eq!(tree.node(&path).map(TagNode::name), Some("kittens"));
        assert!(tree.node(&NodePath::from(vec![0, 5])).is_none());
        assert!(tree.node(&NodePath::default()).is_none());

        tree.node_mut(&path).unwrap().set_expanded(true);
        assert!(tree.node(&path).unwrap().is_expanded());
    }

    #[test]
    fn node_path_parent_and_depth() {
        let path = NodePath::root(1).child(2).child(0);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.parent(), Some(NodePath::from(vec![1, 2])));
        assert_eq!(NodePath::root(1).parent(), None);
    }

    #[test]
    fn rejects_duplicate_element_ids() {
        let roots = vec![
            TagNode::new("a", "same"),
            TagNode::new("b", "b").path(PathEntry::new("same", HttpMethod::Get, "/")),
        ];
        assert_eq!(
            TagTree::new(roots).unwrap_err(),
            ModelError::DuplicateElementId {
                element_id: "same".into()
            }
        );
    }

    #[test]
    fn rejects_empty_element_ids() {
        assert!(matches!(
            TagTree::new(vec![TagNode::new("a", "")]),
            Err(ModelError::EmptyTagElementId { .. })
        ));
        assert!(matches!(
            TagTree::new(vec![
                TagNode::new("a", "a").path(PathEntry::new("", HttpMethod::Get, "/x"))
            ]),
            Err(ModelError::EmptyPathElementId { .. })
        ));
    }

    #[test]
    fn rejects_root_with_nonzero_level() {
        let err = TagTree::new(vec![TagNode::new("a", "a").with_level(2)]).unwrap_err();
        assert_eq!(
            err,
            ModelError::LevelMismatch {
                element_id: "a".into(),
                expected: 0,
                found: 2
            }
        );
    }

    #[test]
    fn rejects_leaf_grouping_operations() {
        let roots = vec![TagNode::new("leaf", "leaf").with_leaf(true).child(
            TagNode::new("inner", "inner").path(PathEntry::new("p", HttpMethod::Get, "/")),
        )];
        assert!(matches!(
            TagTree::new(roots),
            Err(ModelError::LeafWithGroupedChildren { .. })
        ));
    }

    #[test]
    fn visit_mut_reaches_every_node() {
        let mut tree = TagTree::new(pets_tree()).unwrap();
        tree.visit_mut(|node| node.set_expanded(true));
        assert!(tree.iter().all(|(_, node)| node.is_expanded()));
    }

    #[test]
    fn toggle_expanded_returns_new_state() {
        let mut node = TagNode::new("a", "a");
        assert!(node.toggle_expanded());
        assert!(!node.toggle_expanded());
    }

    #[test]
    fn general_divider_detection() {
        assert!(TagNode::new(GENERAL_DIVIDER_NAME, "general").is_general_divider());
        assert!(!TagNode::new("General", "general").is_general_divider());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_resolver_json() {
        let json = r#"[
            {
                "name": "pets",
                "elementId": "tag--pets",
                "level": 0,
                "paths": [{"elementId": "p1", "method": "GET", "path": "/pets"}],
                "children": [
                    {
                        "name": "cats",
                        "fullName": "pets/cats",
                        "elementId": "tag--cats",
                        "level": 1,
                        "isLeaf": true,
                        "paths": [{
                            "elementId": "p2",
                            "method": "post",
                            "path": "/cats",
                            "summary": "Add a cat",
                            "deprecated": true
                        }],
                        "headers": [{"depth": 2, "text": "Feeding"}]
                    }
                ]
            }
        ]"#;
        let tree: TagTree = serde_json::from_str(json).unwrap();
        let cats = &tree.roots()[0].children()[0];
        assert_eq!(cats.context_name(), "pets/cats");
        assert!(cats.is_leaf());
        assert_eq!(cats.paths()[0].method, HttpMethod::Post);
        assert!(cats.paths()[0].deprecated);
        assert_eq!(cats.headers()[0].text, "Feeding");
        assert!(tree.locate("p2").is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_rejects_bad_levels() {
        let json = r#"[{"name": "a", "elementId": "a", "children": [
            {"name": "b", "elementId": "b", "level": 4}
        ]}]"#;
        assert!(serde_json::from_str::<TagTree>(json).is_err());
    }
}
