#![forbid(unsafe_code)]

//! Element tree: the rendered projection of the navigation bar.
//!
//! The renderer produces an [`ElementTree`] from model state on every pass;
//! nothing in it is a source of truth. Elements that react to input carry a
//! typed [`Action`] tag, and elements that stand for a tag node carry its
//! [`NodePath`]. Interaction code finds its target by walking parent links,
//! the same way a delegated listener would walk up from the clicked element.
//!
//! # Example
//!
//! ```
//! use apinav_render::element::{Action, Element, ElementKind, ElementTree};
//!
//! let mut tree = ElementTree::new(Element::new(ElementKind::NavScroll));
//! let root = tree.root();
//! let row = tree.push(
//!     root,
//!     Element::new(ElementKind::PathRow)
//!         .with_action(Action::Navigate)
//!         .with_content_id("get-pets"),
//! );
//! let label = tree.push(row, Element::new(ElementKind::Label).with_label("List pets"));
//!
//! assert_eq!(tree.closest_action(label, root), Some((row, Action::Navigate)));
//! ```

use ahash::AHashMap;
use apinav_core::model::NodePath;
use smallvec::SmallVec;

/// Handle to an element inside one [`ElementTree`].
///
/// Ids are dense and assigned in render order, so the same model state
/// always yields the same ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ElementId(u32);

impl ElementId {
    /// Create an id from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Interaction handler an element asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Scroll the document to the element's content id.
    Navigate,
    /// Expand every group of the tree.
    ExpandAll,
    /// Collapse every group of the tree.
    CollapseAll,
    /// Toggle the nearest enclosing tag group.
    ExpandCollapseTag,
    /// Expand all or collapse all depending on the current aggregate state.
    ToggleAllGroups,
    /// Clear the search filter.
    ClearSearch,
    /// Tag reserved for hosts; the built-in router ignores it.
    Custom(u8),
}

impl Action {
    /// Kebab-case name, as used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::ExpandAll => "expand-all",
            Self::CollapseAll => "collapse-all",
            Self::ExpandCollapseTag => "expand-collapse-tag",
            Self::ToggleAllGroups => "toggle-all-groups",
            Self::ClearSearch => "clear-search",
            Self::Custom(_) => "custom",
        }
    }
}

/// What an element represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Outermost navigation element.
    NavRoot,
    /// Row holding the global buttons and the filter box.
    SearchBar,
    Button,
    /// Read-only view of the current filter text.
    SearchBox,
    /// Scrollable list; the delegation root for tree interaction.
    NavScroll,
    /// Overview, servers, or authentication entry.
    InfoEntry,
    /// "OPERATIONS" / "COMPONENTS" section title row.
    SectionHeader,
    /// Wrapper of one tag node: header plus content container.
    TagGroup,
    TagHeader,
    /// Small toggle affordance inside a leaf tag header.
    LeafIcon,
    /// Markdown heading link.
    HeadingEntry,
    /// Holds a tag's operations and child groups; zero height when collapsed.
    ContentContainer,
    PathRow,
    MethodBadge,
    WebhookBadge,
    Label,
    /// Horizontal rule.
    Divider,
    ComponentHeader,
    ComponentEntry,
}

impl ElementKind {
    /// Whether this element only groups other elements and draws nothing itself.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::NavRoot | Self::NavScroll | Self::TagGroup | Self::ContentContainer
        )
    }
}

/// One rendered element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub action: Option<Action>,
    /// Document anchor this element navigates to.
    pub content_id: Option<String>,
    /// Tag node this element stands for.
    pub node: Option<NodePath>,
    pub label: String,
    /// Left offset in columns, on top of container padding.
    pub indent: u16,
    /// Tag nesting level (0 for non-tag elements).
    pub level: usize,
    /// Zero-height container: its subtree is laid out but not shown.
    pub collapsed: bool,
    pub active: bool,
    /// Holds keyboard focus.
    pub focused: bool,
    pub deprecated: bool,
    /// Reachable with keyboard focus.
    pub focusable: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            action: None,
            content_id: None,
            node: None,
            label: String::new(),
            indent: 0,
            level: 0,
            collapsed: false,
            active: false,
            focused: false,
            deprecated: false,
            focusable: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Tag the element with an action; tagged elements are focusable.
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self.focusable = true;
        self
    }

    #[must_use]
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = Some(content_id.into());
        self
    }

    #[must_use]
    pub fn with_node(mut self, node: NodePath) -> Self {
        self.node = Some(node);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    #[must_use]
    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Arena of elements with parent links and a content-id index.
#[derive(Debug, Clone)]
pub struct ElementTree {
    elements: Vec<Element>,
    content_index: AHashMap<String, ElementId>,
}

impl ElementTree {
    /// Create a tree holding only `root`.
    #[must_use]
    pub fn new(root: Element) -> Self {
        let mut tree = Self {
            elements: Vec::with_capacity(64),
            content_index: AHashMap::new(),
        };
        tree.insert(None, root);
        tree
    }

    /// The root element.
    #[must_use]
    pub const fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Append `element` as the last child of `parent`.
    ///
    /// An unknown `parent` leaves the element detached: it exists but is
    /// not reachable from the root.
    pub fn push(&mut self, parent: ElementId, element: Element) -> ElementId {
        let parent = self.contains(parent).then_some(parent);
        self.insert(parent, element)
    }

    fn insert(&mut self, parent: Option<ElementId>, mut element: Element) -> ElementId {
        let id = ElementId(u32::try_from(self.elements.len()).unwrap_or(u32::MAX));
        element.parent = parent;
        element.children.clear();
        if let Some(content_id) = element.content_id.as_deref()
            && !content_id.is_empty()
        {
            self.content_index.entry(content_id.to_owned()).or_insert(id);
        }
        if let Some(parent) = parent {
            self.elements[parent.index()].children.push(id);
        }
        self.elements.push(element);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        id.index() < self.elements.len()
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.index())
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id)?.parent
    }

    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.get(id).map(Element::children).unwrap_or_default()
    }

    /// Iterate all elements in creation (render) order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .map(|(i, e)| (ElementId(i as u32), e))
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// `id` followed by its ancestors up to the tree root.
    #[must_use]
    pub fn path_to_root(&self, id: ElementId) -> SmallVec<[ElementId; 16]> {
        let mut path = SmallVec::new();
        if self.contains(id) {
            path.push(id);
            path.extend(self.ancestors(id));
        }
        path
    }

    /// Whether `id` lies strictly below `root`.
    #[must_use]
    pub fn is_descendant_of(&self, id: ElementId, root: ElementId) -> bool {
        self.ancestors(id).any(|a| a == root)
    }

    /// Nearest element at or above `origin`, below `root`, carrying an action.
    ///
    /// `root` itself is never a match. Returns `None` if the walk leaves the
    /// tree before reaching `root` (unknown or detached origin).
    #[must_use]
    pub fn closest_action(&self, origin: ElementId, root: ElementId) -> Option<(ElementId, Action)> {
        let mut current = origin;
        while current != root {
            let element = self.get(current)?;
            if let Some(action) = element.action {
                return Some((current, action));
            }
            current = element.parent?;
        }
        None
    }

    /// Nearest element at or above `origin` bound to a tag node.
    #[must_use]
    pub fn closest_node(&self, origin: ElementId) -> Option<(ElementId, &NodePath)> {
        let mut current = Some(origin);
        while let Some(id) = current {
            let element = self.get(id)?;
            if let Some(node) = element.node.as_ref() {
                return Some((id, node));
            }
            current = element.parent;
        }
        None
    }

    /// First element rendered for `content_id`.
    #[must_use]
    pub fn find_by_content_id(&self, content_id: &str) -> Option<ElementId> {
        self.content_index.get(content_id).copied()
    }

    /// Mark the element for `content_id` as the only active one.
    ///
    /// Returns `false` (and clears every mark) when nothing matches.
    pub fn set_active(&mut self, content_id: Option<&str>) -> bool {
        for element in &mut self.elements {
            element.active = false;
        }
        let Some(id) = content_id.and_then(|c| self.find_by_content_id(c)) else {
            return false;
        };
        self.elements[id.index()].active = true;
        true
    }

    /// Elements of `kind`, in render order.
    pub fn of_kind(&self, kind: ElementKind) -> impl Iterator<Item = (ElementId, &Element)> {
        self.iter().filter(move |(_, e)| e.kind == kind)
    }

    /// Pre-order walk of the subtree at `id`.
    #[must_use]
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }
}
