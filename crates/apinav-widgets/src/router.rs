#![forbid(unsafe_code)]

//! Interaction router: one delegated entry point per tree instance.
//!
//! An activation event (left click or Enter) lands on some origin element.
//! The router walks up from the origin toward the delegation root and stops
//! at the first element carrying an [`Action`]. That element is the target:
//! the event is consumed there and dispatched by action kind. Anything else
//! is ignored without consuming the event.
//!
//! Structural gaps (unknown or detached origin, target without an owning
//! tag node) are silent no-ops; the router never fails.

use crate::expansion::{self, BulkAction};
use apinav_core::event::Event;
use apinav_core::model::{NodePath, TagTree};
use apinav_render::element::{Action, ElementId, ElementTree};

/// Element handed to the navigation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTarget<'a> {
    /// The action-tagged element, not the nested element that was hit.
    pub element: ElementId,
    /// Anchor to scroll to; empty when the element has none.
    pub content_id: &'a str,
}

/// Scroll/navigation collaborator.
///
/// The router only triggers navigation. Scroll position and active-item
/// tracking stay with the implementor.
pub trait Navigator {
    fn scroll_to_target(&mut self, target: NavTarget<'_>);
}

impl<F> Navigator for F
where
    F: FnMut(NavTarget<'_>),
{
    fn scroll_to_target(&mut self, target: NavTarget<'_>) {
        self(target);
    }
}

/// Outcome of routing one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResult {
    /// Not an activation, or no action-tagged element below the root.
    Ignored,
    /// A target was found but nothing changed (unrecognized action, or no
    /// enclosing tag node).
    Consumed,
    Navigated {
        element: ElementId,
        content_id: String,
    },
    Toggled {
        node: NodePath,
        expanded: bool,
    },
    Bulk(BulkAction),
    /// The owner should clear its search term.
    ClearSearch,
}

impl RouteResult {
    /// Whether propagation stopped at this tree.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    /// Whether the owner must re-render.
    #[must_use]
    pub fn changes_state(&self) -> bool {
        matches!(
            self,
            Self::Toggled { .. } | Self::Bulk(_) | Self::ClearSearch
        )
    }
}

/// Delegated router bound to one rendered tree and its delegation root.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    elements: &'a ElementTree,
    root: ElementId,
}

impl<'a> Router<'a> {
    #[must_use]
    pub const fn new(elements: &'a ElementTree, root: ElementId) -> Self {
        Self { elements, root }
    }

    #[must_use]
    pub const fn root(&self) -> ElementId {
        self.root
    }

    /// Nearest action-tagged element at or above `origin`, below the root.
    ///
    /// Origins outside the root's subtree never match.
    #[must_use]
    pub fn target(&self, origin: ElementId) -> Option<(ElementId, Action)> {
        if !self.elements.is_descendant_of(origin, self.root) {
            return None;
        }
        self.elements.closest_action(origin, self.root)
    }

    /// Route `event` that landed on `origin`.
    ///
    /// Bulk and toggle actions mutate `tags`, the tree owned by this
    /// instance; navigation goes to `navigator`.
    pub fn route<N>(
        &self,
        event: &Event,
        origin: ElementId,
        tags: &mut TagTree,
        navigator: &mut N,
    ) -> RouteResult
    where
        N: Navigator + ?Sized,
    {
        if !event.is_activation() {
            return RouteResult::Ignored;
        }
        let Some((target, action)) = self.target(origin) else {
            return RouteResult::Ignored;
        };
        tracing::trace!(
            message = "navbar.route",
            action = action.as_str(),
            event = event.kind_name(),
            origin = origin.get(),
            target = target.get()
        );

        match action {
            Action::Navigate => self.navigate(target, navigator),
            Action::ExpandAll => {
                expansion::expand_all(tags);
                RouteResult::Bulk(BulkAction::ExpandAll)
            }
            Action::CollapseAll => {
                expansion::collapse_all(tags);
                RouteResult::Bulk(BulkAction::CollapseAll)
            }
            Action::ToggleAllGroups => RouteResult::Bulk(expansion::toggle_all_groups(tags)),
            Action::ExpandCollapseTag => self.toggle_enclosing(target, event, tags),
            Action::ClearSearch => RouteResult::ClearSearch,
            Action::Custom(_) => RouteResult::Consumed,
        }
    }

    fn navigate<N>(&self, target: ElementId, navigator: &mut N) -> RouteResult
    where
        N: Navigator + ?Sized,
    {
        let content_id = self
            .elements
            .get(target)
            .and_then(|e| e.content_id.as_deref())
            .unwrap_or_default();
        navigator.scroll_to_target(NavTarget {
            element: target,
            content_id,
        });
        RouteResult::Navigated {
            element: target,
            content_id: content_id.to_owned(),
        }
    }

    fn toggle_enclosing(&self, target: ElementId, event: &Event, tags: &mut TagTree) -> RouteResult {
        let Some((_, node)) = self.elements.closest_node(target) else {
            return RouteResult::Consumed;
        };
        match expansion::toggle(tags, node, event.kind_name()) {
            Some(expanded) => RouteResult::Toggled {
                node: node.clone(),
                expanded,
            },
            None => RouteResult::Consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apinav_core::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
    use apinav_core::model::{HttpMethod, PathEntry, TagNode};
    use apinav_render::element::{Element, ElementKind};

    struct Fixture {
        elements: ElementTree,
        scroll: ElementId,
        header: ElementId,
        row_badge: ElementId,
        outside: ElementId,
        custom: ElementId,
        plain: ElementId,
    }

    fn fixture() -> Fixture {
        let mut elements = ElementTree::new(Element::new(ElementKind::NavRoot));
        let outside = elements.push(
            elements.root(),
            Element::new(ElementKind::Button).with_action(Action::ExpandAll),
        );
        let scroll = elements.push(elements.root(), Element::new(ElementKind::NavScroll));
        let group = elements.push(
            scroll,
            Element::new(ElementKind::TagGroup).with_node(NodePath::root(0)),
        );
        let header = elements.push(
            group,
            Element::new(ElementKind::TagHeader)
                .with_action(Action::ExpandCollapseTag)
                .with_content_id("tag--pets"),
        );
        let container = elements.push(group, Element::new(ElementKind::ContentContainer));
        let row = elements.push(
            container,
            Element::new(ElementKind::PathRow)
                .with_action(Action::Navigate)
                .with_content_id("p1"),
        );
        let row_badge = elements.push(row, Element::new(ElementKind::MethodBadge));
        let custom = elements.push(
            scroll,
            Element::new(ElementKind::InfoEntry).with_action(Action::Custom(7)),
        );
        let plain = elements.push(scroll, Element::new(ElementKind::Label));
        Fixture {
            elements,
            scroll,
            header,
            row_badge,
            outside,
            custom,
            plain,
        }
    }

    fn tags() -> TagTree {
        TagTree::new(vec![
            TagNode::new("pets", "tag--pets").path(PathEntry::new("p1", HttpMethod::Get, "/pets")),
        ])
        .unwrap()
    }

    fn no_navigation(_: NavTarget<'_>) {
        panic!("no navigation expected");
    }

    fn click() -> Event {
        Event::Mouse(MouseEvent::click(0, 0))
    }

    #[test]
    fn nested_click_navigates_once_without_toggling() {
        let f = fixture();
        let mut t = tags();
        let mut calls = Vec::new();
        let mut nav = |target: NavTarget<'_>| calls.push(target.content_id.to_owned());
        let result = Router::new(&f.elements, f.scroll).route(&click(), f.row_badge, &mut t, &mut nav);

        assert!(matches!(result, RouteResult::Navigated { ref content_id, .. } if content_id == "p1"));
        assert_eq!(calls, vec!["p1".to_owned()]);
        assert!(!t.roots()[0].is_expanded());
    }

    #[test]
    fn header_toggles_enclosing_node() {
        let f = fixture();
        let mut t = tags();
        let mut nav = no_navigation;
        let router = Router::new(&f.elements, f.scroll);
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter));

        assert_eq!(
            router.route(&enter, f.header, &mut t, &mut nav),
            RouteResult::Toggled {
                node: NodePath::root(0),
                expanded: true
            }
        );
        assert!(t.roots()[0].is_expanded());
    }

    #[test]
    fn non_activation_events_are_ignored() {
        let f = fixture();
        let mut t = tags();
        let mut nav = no_navigation;
        let router = Router::new(&f.elements, f.scroll);
        let release = Event::Key(KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release));
        let other_key = Event::Key(KeyEvent::new(KeyCode::Char('x')));
        let resize = Event::Resize {
            width: 10,
            height: 10,
        };
        for event in [release, other_key, resize] {
            assert_eq!(router.route(&event, f.header, &mut t, &mut nav), RouteResult::Ignored);
        }
        assert!(!t.roots()[0].is_expanded());
    }

    #[test]
    fn origins_outside_root_are_ignored() {
        let f = fixture();
        let mut t = tags();
        let mut nav = |_: NavTarget<'_>| {};
        let router = Router::new(&f.elements, f.scroll);
        assert_eq!(router.route(&click(), f.outside, &mut t, &mut nav), RouteResult::Ignored);
        assert_eq!(router.route(&click(), f.scroll, &mut t, &mut nav), RouteResult::Ignored);
        assert_eq!(
            router.route(&click(), ElementId::new(999), &mut t, &mut nav),
            RouteResult::Ignored
        );
        assert!(!t.roots()[0].is_expanded());
    }

    #[test]
    fn untagged_origin_is_ignored() {
        let f = fixture();
        let mut t = tags();
        let mut nav = |_: NavTarget<'_>| {};
        let result = Router::new(&f.elements, f.scroll).route(&click(), f.plain, &mut t, &mut nav);
        assert!(!result.is_consumed());
    }

    #[test]
    fn custom_actions_are_consumed_silently() {
        let f = fixture();
        let mut t = tags();
        let mut nav = no_navigation;
        let result = Router::new(&f.elements, f.scroll).route(&click(), f.custom, &mut t, &mut nav);
        assert_eq!(result, RouteResult::Consumed);
        assert!(!result.changes_state());
    }

    #[test]
    fn bulk_actions_apply_to_owned_tree() {
        let mut f = fixture();
        let scroll = f.scroll;
        let expand = f.elements.push(
            scroll,
            Element::new(ElementKind::Button).with_action(Action::ExpandAll),
        );
        let toggle_all = f.elements.push(
            scroll,
            Element::new(ElementKind::Button).with_action(Action::ToggleAllGroups),
        );
        let mut mine = tags();
        let other = tags();
        let mut nav = |_: NavTarget<'_>| {};
        let router = Router::new(&f.elements, scroll);

        assert_eq!(
            router.route(&click(), expand, &mut mine, &mut nav),
            RouteResult::Bulk(BulkAction::ExpandAll)
        );
        assert!(mine.roots()[0].is_expanded());
        assert!(!other.roots()[0].is_expanded());
        assert_eq!(
            router.route(&click(), toggle_all, &mut mine, &mut nav),
            RouteResult::Bulk(BulkAction::CollapseAll)
        );
        assert!(!mine.roots()[0].is_expanded());
    }

    #[test]
    fn toggle_without_enclosing_node_is_noop() {
        let mut f = fixture();
        let loose = f.elements.push(
            f.scroll,
            Element::new(ElementKind::TagHeader).with_action(Action::ExpandCollapseTag),
        );
        let mut t = tags();
        let mut nav = |_: NavTarget<'_>| {};
        assert_eq!(
            Router::new(&f.elements, f.scroll).route(&click(), loose, &mut t, &mut nav),
            RouteResult::Consumed
        );
    }

    #[test]
    fn clear_search_is_reported() {
        let mut f = fixture();
        let clear = f.elements.push(
            f.scroll,
            Element::new(ElementKind::Button).with_action(Action::ClearSearch),
        );
        let mut t = tags();
        let mut nav = |_: NavTarget<'_>| {};
        let result = Router::new(&f.elements, f.scroll).route(&click(), clear, &mut t, &mut nav);
        assert_eq!(result, RouteResult::ClearSearch);
        assert!(result.changes_state());
    }
}
