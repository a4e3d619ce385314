#![forbid(unsafe_code)]

//! Navigation bar widget.
//!
//! A [`NavBar`] owns one tree instance: configuration, the resolved spec
//! (and with it every node's expansion state), the search term, and the
//! active content id. Every state change rebuilds the [`ElementTree`] view
//! from scratch; the view is never edited in place except for the active and
//! focus markers.
//!
//! The view has two delegation roots: the search bar (global buttons) and
//! the scroll container (overview entries, operations, components). Events
//! are routed inside one instance only, so several bars can coexist.
//!
//! # Example
//!
//! ```
//! use apinav_core::config::NavConfig;
//! use apinav_core::model::{HttpMethod, PathEntry, TagNode, TagTree};
//! use apinav_core::outline::ResolvedSpec;
//! use apinav_widgets::navbar::NavBar;
//!
//! let tags = TagTree::new(vec![
//!     TagNode::new("pets", "tag--pets").path(PathEntry::new("p1", HttpMethod::Get, "/pets")),
//! ])
//! .unwrap();
//! let mut bar = NavBar::new(NavConfig::default()).with_spec(ResolvedSpec::new(tags));
//!
//! assert_eq!(bar.toggle_tag("tag--pets"), Some(true));
//! let surface = bar.draw(30, 10);
//! assert!(surface.to_string().contains("GET"));
//! ```

use crate::expansion::{self, BulkAction};
use crate::matcher::TextMatcher;
use crate::router::{Navigator, RouteResult, Router};
use crate::sidebar::{INDENT_STEP, RenderContext, TreeRenderer, heading_indent};
use crate::slug::heading_content_id;
use crate::visibility::MatchPredicate;
use apinav_core::config::{NavConfig, RenderStyle};
use apinav_core::event::{Event, KeyCode, KeyEventKind};
use apinav_core::model::{ElementLocation, TagTree};
use apinav_core::outline::ResolvedSpec;
use apinav_render::element::{Action, Element, ElementId, ElementKind, ElementTree};
use apinav_render::surface::TextSurface;
use tracing::field::Empty;
use web_time::Instant;

/// Toggle-all label while every group is expanded.
pub const TOGGLE_ALL_EXPANDED: &str = "⊟";
/// Toggle-all label otherwise.
pub const TOGGLE_ALL_COLLAPSED: &str = "⊞";
/// Search box text while no term is set.
pub const SEARCH_PLACEHOLDER: &str = "Filter";

/// Rendered view plus its delegation roots.
struct Composition {
    view: ElementTree,
    search_root: Option<ElementId>,
    scroll_root: Option<ElementId>,
    visible_nodes: usize,
}

/// Identity of a focusable element that survives a rebuild of the view.
///
/// `anchor` is the element's own content id, or the nearest ancestor's for
/// inline affordances such as the leaf toggle icon.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FocusKey {
    kind: ElementKind,
    action: Option<Action>,
    anchor: Option<String>,
}

impl FocusKey {
    fn of(view: &ElementTree, id: ElementId) -> Option<Self> {
        let element = view.get(id)?;
        let anchor = view
            .path_to_root(id)
            .iter()
            .find_map(|&a| view.get(a)?.content_id.clone());
        Some(Self {
            kind: element.kind,
            action: element.action,
            anchor,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Focus {
    /// Position among the focusable elements of the current view.
    index: usize,
    key: FocusKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusMove {
    Next,
    Prev,
    First,
    Last,
}

/// Collapsible API navigation bar.
#[derive(Debug)]
pub struct NavBar<P = TextMatcher> {
    config: NavConfig,
    spec: Option<ResolvedSpec>,
    search_term: String,
    active: Option<String>,
    predicate: P,
    view: ElementTree,
    search_root: Option<ElementId>,
    scroll_root: Option<ElementId>,
    surface: Option<TextSurface>,
    focus: Option<Focus>,
}

impl NavBar<TextMatcher> {
    /// Create a bar using the plain-text matcher.
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self::with_predicate(config, TextMatcher)
    }
}

impl<P: MatchPredicate> NavBar<P> {
    /// Create a bar with a host-supplied search predicate.
    #[must_use]
    pub fn with_predicate(config: NavConfig, predicate: P) -> Self {
        tracing::debug!(message = "navbar.init", config = %config.to_json());
        let mut bar = Self {
            config,
            spec: None,
            search_term: String::new(),
            active: None,
            predicate,
            view: ElementTree::new(Element::new(ElementKind::NavRoot)),
            search_root: None,
            scroll_root: None,
            surface: None,
            focus: None,
        };
        bar.render();
        bar
    }

    #[must_use]
    pub fn with_spec(mut self, spec: ResolvedSpec) -> Self {
        self.set_spec(Some(spec));
        self
    }

    /// Replace the resolved spec; `None` shows an empty frame.
    pub fn set_spec(&mut self, spec: Option<ResolvedSpec>) {
        self.spec = spec;
        self.focus = None;
        self.render();
    }

    pub fn set_config(&mut self, config: NavConfig) {
        self.config = config;
        self.render();
    }

    #[must_use]
    pub const fn config(&self) -> &NavConfig {
        &self.config
    }

    #[must_use]
    pub fn spec(&self) -> Option<&ResolvedSpec> {
        self.spec.as_ref()
    }

    #[must_use]
    pub fn tags(&self) -> Option<&TagTree> {
        self.spec.as_ref().map(|spec| &spec.tags)
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Current rendered view.
    #[must_use]
    pub const fn view(&self) -> &ElementTree {
        &self.view
    }

    /// Delegation root of the search bar, when shown.
    #[must_use]
    pub const fn search_root(&self) -> Option<ElementId> {
        self.search_root
    }

    /// Delegation root of the scroll container, when a spec is loaded.
    #[must_use]
    pub const fn scroll_root(&self) -> Option<ElementId> {
        self.scroll_root
    }

    /// Last drawn surface; cleared whenever the view is rebuilt.
    #[must_use]
    pub fn surface(&self) -> Option<&TextSurface> {
        self.surface.as_ref()
    }

    /// Set the filter. The term is trimmed; returns whether it changed.
    pub fn set_search_term(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term == self.search_term {
            return false;
        }
        self.search_term = term.to_owned();
        tracing::debug!(message = "navbar.search", term_len = term.len());
        self.render();
        true
    }

    pub fn clear_search(&mut self) -> bool {
        self.set_search_term("")
    }

    /// Highlight the element for `content_id` (scroll-sync). Returns whether
    /// such an element is currently rendered.
    pub fn set_active(&mut self, content_id: Option<&str>) -> bool {
        self.active = content_id.map(str::to_owned);
        self.view.set_active(self.active.as_deref())
    }

    /// Aggregate expansion state shown on the toggle-all button.
    #[must_use]
    pub fn all_groups_expanded(&self) -> bool {
        self.tags().is_some_and(expansion::all_expanded)
    }

    /// Flip the tag with `element_id`. Returns the new state, or `None` for
    /// unknown ids, operation ids, and tags with nothing to expand.
    pub fn toggle_tag(&mut self, element_id: &str) -> Option<bool> {
        let spec = self.spec.as_mut()?;
        let path = match spec.tags.locate(element_id)? {
            ElementLocation::Tag(path) => path.clone(),
            ElementLocation::Path { .. } => return None,
        };
        let expanded = expansion::toggle(&mut spec.tags, &path, "api")?;
        self.render();
        Some(expanded)
    }

    pub fn expand_all(&mut self) -> usize {
        self.bulk(BulkAction::ExpandAll)
    }

    pub fn collapse_all(&mut self) -> usize {
        self.bulk(BulkAction::CollapseAll)
    }

    /// Collapse everything when all groups are expanded, else expand everything.
    pub fn toggle_all_groups(&mut self) -> Option<BulkAction> {
        let spec = self.spec.as_mut()?;
        let action = expansion::toggle_all_groups(&mut spec.tags);
        self.render();
        Some(action)
    }

    fn bulk(&mut self, action: BulkAction) -> usize {
        let Some(spec) = self.spec.as_mut() else {
            return 0;
        };
        let changed = match action {
            BulkAction::ExpandAll => expansion::expand_all(&mut spec.tags),
            BulkAction::CollapseAll => expansion::collapse_all(&mut spec.tags),
        };
        self.render();
        changed
    }

    /// Route an event that landed on `origin`, trying the scroll container
    /// first and then the search bar.
    pub fn route<N>(&mut self, event: &Event, origin: ElementId, navigator: &mut N) -> RouteResult
    where
        N: Navigator + ?Sized,
    {
        let Some(spec) = self.spec.as_mut() else {
            return RouteResult::Ignored;
        };
        let mut result = RouteResult::Ignored;
        for root in [self.scroll_root, self.search_root].into_iter().flatten() {
            result = Router::new(&self.view, root).route(event, origin, &mut spec.tags, navigator);
            if result.is_consumed() {
                break;
            }
        }

        if result == RouteResult::ClearSearch {
            self.search_term.clear();
        }
        if result.changes_state() {
            self.render();
        }
        result
    }

    /// Handle host input.
    ///
    /// Mouse events are hit-tested against the last drawn surface. Tab/Down
    /// and BackTab/Up (or Shift+Tab) move focus among interactive elements,
    /// Home/End jump, and Enter activates the focused element. Focus follows
    /// the element, not its position, when the view is rebuilt.
    pub fn handle_event<N>(&mut self, event: &Event, navigator: &mut N) -> RouteResult
    where
        N: Navigator + ?Sized,
    {
        match event {
            Event::Mouse(mouse) => {
                let Some(origin) = self
                    .surface
                    .as_ref()
                    .and_then(|surface| surface.hit_test(mouse.x, mouse.y))
                else {
                    return RouteResult::Ignored;
                };
                self.route(event, origin, navigator)
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Tab if key.shift() => self.move_focus(FocusMove::Prev),
                KeyCode::Tab | KeyCode::Down => self.move_focus(FocusMove::Next),
                KeyCode::BackTab | KeyCode::Up => self.move_focus(FocusMove::Prev),
                KeyCode::Home => self.move_focus(FocusMove::First),
                KeyCode::End => self.move_focus(FocusMove::Last),
                KeyCode::Enter => match self.focused() {
                    Some(origin) => self.route(event, origin, navigator),
                    None => RouteResult::Ignored,
                },
                _ => RouteResult::Ignored,
            },
            _ => RouteResult::Ignored,
        }
    }

    /// Element holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<ElementId> {
        focusable_elements(&self.view)
            .get(self.focus.as_ref()?.index)
            .copied()
    }

    /// Project the view onto a `width` x `height` text surface.
    pub fn draw(&mut self, width: u16, height: u16) -> &TextSurface {
        let surface = TextSurface::project(
            &self.view,
            width,
            height,
            self.config.nav_active_item_marker,
        );
        self.surface.insert(surface)
    }

    fn move_focus(&mut self, movement: FocusMove) -> RouteResult {
        let focusables = focusable_elements(&self.view);
        let len = focusables.len();
        if len == 0 {
            return RouteResult::Ignored;
        }
        let next = match (movement, self.focus.as_ref().map(|f| f.index)) {
            (FocusMove::First, _) | (FocusMove::Next, None) => 0,
            (FocusMove::Last, _) | (FocusMove::Prev, None) => len - 1,
            (FocusMove::Next, Some(i)) => (i + 1) % len,
            (FocusMove::Prev, Some(i)) => (i + len - 1) % len,
        };
        for &id in &focusables {
            if let Some(element) = self.view.get_mut(id) {
                element.focused = false;
            }
        }
        self.focus = focusables
            .get(next)
            .and_then(|&id| self.focus_on(id, next));
        RouteResult::Consumed
    }

    /// Mark `id` focused and return its focus record.
    fn focus_on(&mut self, id: ElementId, index: usize) -> Option<Focus> {
        let key = FocusKey::of(&self.view, id)?;
        self.view.get_mut(id)?.focused = true;
        Some(Focus { index, key })
    }

    /// Re-find the focused element in a rebuilt view. Falls back to the old
    /// position, clamped, when the element is gone.
    fn restore_focus(&mut self) {
        let Some(previous) = self.focus.take() else {
            return;
        };
        let focusables = focusable_elements(&self.view);
        if focusables.is_empty() {
            return;
        }
        let index = focusables
            .iter()
            .position(|&id| FocusKey::of(&self.view, id).as_ref() == Some(&previous.key))
            .unwrap_or_else(|| previous.index.min(focusables.len() - 1));
        self.focus = self.focus_on(focusables[index], index);
    }

    fn render(&mut self) {
        let render_start = Instant::now();
        let tags = self.tags();
        let total_nodes = tags.map_or(0, TagTree::node_count);
        let expanded_count = tags.map_or(0, expansion::expanded_count);
        let render_span = tracing::debug_span!(
            "navbar.render",
            total_nodes,
            visible_nodes = Empty,
            expanded_count,
            render_duration_us = Empty,
        );
        let _render_guard = render_span.enter();

        let composition = compose(
            self.spec.as_ref(),
            &self.config,
            &self.search_term,
            &self.predicate,
        );
        self.view = composition.view;
        self.search_root = composition.search_root;
        self.scroll_root = composition.scroll_root;
        self.surface = None;
        self.view.set_active(self.active.as_deref());

        self.restore_focus();

        let visible_nodes = composition.visible_nodes;
        let elapsed_us = u64::try_from(render_start.elapsed().as_micros()).unwrap_or(u64::MAX);
        render_span.record("visible_nodes", visible_nodes);
        render_span.record("render_duration_us", elapsed_us);
        tracing::debug!(
            message = "navbar.metrics",
            render_duration_us = elapsed_us,
            total_nodes,
            visible_nodes,
            expanded_count,
            elements = self.view.len()
        );
    }
}

/// Interactive elements not hidden inside a collapsed container, in order.
fn focusable_elements(view: &ElementTree) -> Vec<ElementId> {
    view.iter()
        .filter(|(_, element)| element.focusable)
        .map(|(id, _)| id)
        .filter(|&id| {
            !view.ancestors(id).any(|a| {
                view.get(a)
                    .is_some_and(|e| e.kind == ElementKind::ContentContainer && e.collapsed)
            })
        })
        .collect()
}

fn navigate_entry(kind: ElementKind, content_id: impl Into<String>, label: &str) -> Element {
    Element::new(kind)
        .with_action(Action::Navigate)
        .with_content_id(content_id)
        .with_label(label)
}

fn compose<P>(
    spec: Option<&ResolvedSpec>,
    config: &NavConfig,
    term: &str,
    predicate: &P,
) -> Composition
where
    P: MatchPredicate + ?Sized,
{
    let mut view = ElementTree::new(Element::new(ElementKind::NavRoot));
    let root = view.root();
    let Some(spec) = spec.filter(|spec| spec.is_loaded()) else {
        return Composition {
            view,
            search_root: None,
            scroll_root: None,
            visible_nodes: 0,
        };
    };
    let read = config.render_style.is_read();
    let focused = config.render_style == RenderStyle::Focused;

    let search_root = if config.allow_search {
        let bar = view.push(root, Element::new(ElementKind::SearchBar));
        if !read {
            let label = if expansion::all_expanded(&spec.tags) {
                TOGGLE_ALL_EXPANDED
            } else {
                TOGGLE_ALL_COLLAPSED
            };
            view.push(
                bar,
                Element::new(ElementKind::Button)
                    .with_action(Action::ToggleAllGroups)
                    .with_label(label),
            );
        }
        let shown = if term.is_empty() { SEARCH_PLACEHOLDER } else { term };
        view.push(bar, Element::new(ElementKind::SearchBox).with_label(shown));
        if !term.is_empty() {
            view.push(
                bar,
                Element::new(ElementKind::Button)
                    .with_action(Action::ClearSearch)
                    .with_label("CLEAR"),
            );
        }
        Some(bar)
    } else {
        None
    };

    let scroll = view.push(root, Element::new(ElementKind::NavScroll));

    if config.show_info
        && let Some(info) = spec.info.as_ref()
    {
        let headers = &spec.info_description_headers;
        if !config.info_description_headings_in_nav_bar || !headers.is_empty() {
            view.push(
                scroll,
                navigate_entry(ElementKind::InfoEntry, "overview", info.nav_title()),
            );
        }
        if config.info_description_headings_in_nav_bar {
            for header in headers {
                view.push(
                    scroll,
                    navigate_entry(
                        ElementKind::HeadingEntry,
                        heading_content_id("overview", &header.text),
                        &header.text,
                    )
                    .with_indent(heading_indent(0, header.depth)),
                );
            }
            if !headers.is_empty() {
                view.push(scroll, Element::new(ElementKind::Divider));
            }
        }
    }
    if config.allow_server_selection {
        view.push(scroll, navigate_entry(ElementKind::InfoEntry, "servers", "API Servers"));
    }
    if config.allow_authentication && spec.has_security_schemes {
        view.push(scroll, navigate_entry(ElementKind::InfoEntry, "auth", "Authentication"));
    }

    let operations = view.push(
        scroll,
        Element::new(ElementKind::SectionHeader)
            .with_action(Action::Navigate)
            .with_content_id(if focused { "" } else { "operations-top" }),
    );
    if focused {
        view.push(
            operations,
            Element::new(ElementKind::Button)
                .with_action(Action::ExpandAll)
                .with_label("▾"),
        );
        view.push(
            operations,
            Element::new(ElementKind::Button)
                .with_action(Action::CollapseAll)
                .with_label("▸"),
        );
    }
    view.push(operations, Element::new(ElementKind::Label).with_label("OPERATIONS"));

    let mut renderer = TreeRenderer::new(predicate);
    renderer.render_roots(&mut view, scroll, &spec.tags, RenderContext::new(config, term));

    if config.show_components && focused {
        view.push(
            scroll,
            Element::new(ElementKind::SectionHeader).with_label("COMPONENTS"),
        );
        for component in spec.components.iter().filter(|c| !c.sub_components.is_empty()) {
            view.push(
                scroll,
                navigate_entry(
                    ElementKind::ComponentHeader,
                    format!("cmp--{}", component.name.to_lowercase()),
                    &component.name,
                ),
            );
            for sub in component
                .sub_components
                .iter()
                .filter(|sub| sub.expanded != Some(false))
            {
                view.push(
                    scroll,
                    navigate_entry(ElementKind::ComponentEntry, format!("cmp--{}", sub.id), &sub.name)
                        .with_indent(INDENT_STEP),
                );
            }
        }
    }

    Composition {
        view,
        search_root,
        scroll_root: Some(scroll),
        visible_nodes: renderer.rendered(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::NavTarget;
    use apinav_core::config::NavTagClick;
    use apinav_core::event::{KeyEvent, Modifiers, MouseEvent};
    use apinav_core::model::{Header, HttpMethod, PathEntry, TagNode};
    use apinav_core::outline::{Component, SpecInfo, SubComponent};

    fn spec() -> ResolvedSpec {
        let tags = TagTree::new(vec![
            TagNode::new("pets", "tag--pets")
                .path(PathEntry::new("p1", HttpMethod::Get, "/pets").with_summary("List pets"))
                .child(
                    TagNode::new("cats", "tag--cats")
                        .path(PathEntry::new("p2", HttpMethod::Post, "/cats").with_summary("Add cat")),
                ),
            TagNode::new("store", "tag--store")
                .path(PathEntry::new("s1", HttpMethod::Get, "/orders").with_summary("Orders")),
        ])
        .unwrap();
        ResolvedSpec::new(tags)
            .with_info(SpecInfo::titled("Petstore"))
            .with_info_headers(vec![Header::new(1, "Introduction")])
            .with_security_schemes(true)
            .with_components(vec![
                Component::new(
                    "Schemas",
                    vec![
                        SubComponent::new("pet", "Pet"),
                        SubComponent::new("error", "Error").with_expanded(false),
                    ],
                ),
                Component::new("Empty", Vec::new()),
            ])
    }

    fn bar(config: NavConfig) -> NavBar {
        NavBar::new(config).with_spec(spec())
    }

    fn ignore_navigation(_: NavTarget<'_>) {}

    #[test]
    fn missing_or_failed_spec_renders_bare_frame() {
        let empty = NavBar::new(NavConfig::default());
        assert_eq!(empty.view().len(), 1);
        assert!(empty.scroll_root().is_none());

        let failed = NavBar::new(NavConfig::default()).with_spec(spec().with_load_error("404"));
        assert_eq!(failed.view().len(), 1);
    }

    #[test]
    fn composes_entries_in_order() {
        let bar = bar(NavConfig::default());
        let view = bar.view();
        let ids: Vec<&str> = view
            .iter()
            .filter_map(|(_, e)| e.content_id.as_deref())
            .take(5)
            .collect();
        assert_eq!(ids, ["overview", "servers", "auth", "operations-top", "tag--pets"]);
        assert!(bar.search_root().is_some());
    }

    #[test]
    fn info_headings_mode() {
        let bar = bar(NavConfig::default().with_info_headings(true));
        assert!(bar.view().find_by_content_id("overview").is_some());
        assert!(bar.view().find_by_content_id("overview--introduction").is_some());
        assert_eq!(bar.view().of_kind(ElementKind::Divider).count(), 1);

        let no_headers = NavBar::new(NavConfig::default().with_info_headings(true))
            .with_spec(spec().with_info_headers(Vec::new()));
        assert!(no_headers.view().find_by_content_id("overview").is_none());
    }

    #[test]
    fn disabled_sections_are_omitted() {
        let bar = bar(
            NavConfig::default()
                .with_allow_search(false)
                .with_show_info(false)
                .with_server_selection(false)
                .with_authentication(false),
        );
        assert!(bar.search_root().is_none());
        for id in ["overview", "servers", "auth"] {
            assert!(bar.view().find_by_content_id(id).is_none(), "{id}");
        }
    }

    #[test]
    fn focused_mode_offers_bulk_buttons_and_components() {
        let bar = bar(
            NavConfig::default()
                .with_render_style(RenderStyle::Focused)
                .with_components(true)
                .with_tag_click(NavTagClick::ExpandCollapse),
        );
        let view = bar.view();
        let actions: Vec<Action> = view.iter().filter_map(|(_, e)| e.action).collect();
        assert!(actions.contains(&Action::ExpandAll));
        assert!(actions.contains(&Action::CollapseAll));
        assert!(view.find_by_content_id("operations-top").is_none());
        assert!(view.find_by_content_id("cmp--schemas").is_some());
        assert!(view.find_by_content_id("cmp--pet").is_some());
        assert!(view.find_by_content_id("cmp--error").is_none());
        assert!(view.find_by_content_id("cmp--empty").is_none());
    }

    #[test]
    fn components_need_focused_mode() {
        let bar = bar(NavConfig::default().with_components(true));
        assert!(bar.view().find_by_content_id("cmp--schemas").is_none());
    }

    #[test]
    fn read_mode_drops_toggle_affordances() {
        let bar = bar(NavConfig::default().with_render_style(RenderStyle::Read));
        let view = bar.view();
        assert!(view.iter().all(|(_, e)| e.action != Some(Action::ToggleAllGroups)));
        assert!(view.iter().all(|(_, e)| e.action != Some(Action::ExpandCollapseTag)));
        assert!(
            view.of_kind(ElementKind::ContentContainer)
                .all(|(_, e)| !e.collapsed)
        );
    }

    #[test]
    fn search_term_is_trimmed_and_filters() {
        let mut bar = bar(NavConfig::default());
        assert!(bar.set_search_term("  cats "));
        assert_eq!(bar.search_term(), "cats");
        assert!(!bar.set_search_term("cats"));
        assert!(bar.view().find_by_content_id("p2").is_some());
        assert!(bar.view().find_by_content_id("tag--store").is_none());
        assert!(bar.clear_search());
        assert!(bar.view().find_by_content_id("tag--store").is_some());
    }

    #[test]
    fn active_marker_survives_rerender() {
        let mut bar = bar(NavConfig::default());
        assert!(bar.set_active(Some("servers")));
        bar.expand_all();
        let servers = bar.view().find_by_content_id("servers").unwrap();
        assert!(bar.view().get(servers).unwrap().active);
        assert!(!bar.set_active(Some("missing")));
        assert_eq!(bar.active(), Some("missing"));
    }

    #[test]
    fn toggle_tag_by_element_id() {
        let mut bar = bar(NavConfig::default());
        assert_eq!(bar.toggle_tag("tag--pets"), Some(true));
        assert_eq!(bar.toggle_tag("p1"), None);
        assert_eq!(bar.toggle_tag("nope"), None);
        assert!(bar.tags().unwrap().roots()[0].is_expanded());
    }

    #[test]
    fn toggle_all_label_tracks_state() {
        let mut bar = bar(NavConfig::default());
        let label = |bar: &NavBar| {
            bar.view()
                .iter()
                .find(|(_, e)| e.action == Some(Action::ToggleAllGroups))
                .map(|(_, e)| e.label.clone())
        };
        assert_eq!(label(&bar).as_deref(), Some(TOGGLE_ALL_COLLAPSED));
        assert_eq!(bar.toggle_all_groups(), Some(BulkAction::ExpandAll));
        assert_eq!(label(&bar).as_deref(), Some(TOGGLE_ALL_EXPANDED));
        assert!(bar.all_groups_expanded());
        assert_eq!(bar.collapse_all(), 3);
        assert!(!bar.all_groups_expanded());
    }

    #[test]
    fn click_on_drawn_header_toggles() {
        let mut bar = bar(NavConfig::default());
        let header = bar.view().find_by_content_id("tag--pets").unwrap();
        let y = bar.draw(40, 20).row_of(header).unwrap();
        let click = Event::Mouse(MouseEvent::click(10, y));
        let mut nav = ignore_navigation;
        let result = bar.handle_event(&click, &mut nav);
        assert!(matches!(result, RouteResult::Toggled { expanded: true, .. }));
        assert!(bar.surface().is_none());
        let surface = bar.draw(40, 20);
        assert!(surface.to_string().contains("List pets"));
    }

    #[test]
    fn mouse_without_surface_is_ignored() {
        let mut bar = bar(NavConfig::default());
        let mut nav = ignore_navigation;
        let click = Event::Mouse(MouseEvent::click(1, 1));
        assert_eq!(bar.handle_event(&click, &mut nav), RouteResult::Ignored);
    }

    #[test]
    fn clear_button_clears_search() {
        let mut bar = bar(NavConfig::default());
        bar.set_search_term("pets");
        let clear = bar
            .view()
            .iter()
            .find(|(_, e)| e.action == Some(Action::ClearSearch))
            .map(|(id, _)| id)
            .unwrap();
        let mut nav = ignore_navigation;
        let click = Event::Mouse(MouseEvent::click(0, 0));
        assert_eq!(bar.route(&click, clear, &mut nav), RouteResult::ClearSearch);
        assert_eq!(bar.search_term(), "");
    }

    #[test]
    fn keyboard_focus_and_enter() {
        let mut bar = bar(NavConfig::default().with_allow_search(false));
        let mut visited = Vec::new();
        let mut nav = |target: NavTarget<'_>| visited.push(target.content_id.to_owned());
        let tab = Event::Key(KeyEvent::new(KeyCode::Tab));
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter));

        assert_eq!(bar.handle_event(&enter, &mut nav), RouteResult::Ignored);
        assert_eq!(bar.handle_event(&tab, &mut nav), RouteResult::Consumed);
        let focused = bar.focused().unwrap();
        assert!(bar.view().get(focused).unwrap().focused);
        assert!(matches!(
            bar.handle_event(&enter, &mut nav),
            RouteResult::Navigated { .. }
        ));
        assert_eq!(visited, vec!["overview".to_owned()]);
    }

    #[test]
    fn focus_skips_collapsed_rows_and_wraps() {
        let mut bar = bar(NavConfig::default().with_allow_search(false));
        let mut nav = ignore_navigation;
        let back = Event::Key(KeyEvent::new(KeyCode::BackTab));
        bar.handle_event(&back, &mut nav);
        let last = bar.focused().unwrap();
        assert_eq!(bar.view().get(last).unwrap().content_id.as_deref(), Some("tag--store"));

        let down = Event::Key(KeyEvent::new(KeyCode::Down));
        bar.handle_event(&down, &mut nav);
        let first = bar.focused().unwrap();
        assert_eq!(bar.view().get(first).unwrap().content_id.as_deref(), Some("overview"));
    }

    #[test]
    fn focus_survives_toggle_by_keyboard() {
        let mut bar = bar(NavConfig::default().with_allow_search(false));
        let mut nav = ignore_navigation;
        let end = Event::Key(KeyEvent::new(KeyCode::End));
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter));
        bar.handle_event(&end, &mut nav);
        assert!(matches!(
            bar.handle_event(&enter, &mut nav),
            RouteResult::Toggled { expanded: true, .. }
        ));
        let focused = bar.focused().unwrap();
        assert_eq!(bar.view().get(focused).unwrap().content_id.as_deref(), Some("tag--store"));
    }

    #[test]
    fn divider_stays_under_a_filter() {
        let tags = TagTree::new(vec![
            TagNode::new("pets", "tag--pets").path(PathEntry::new("p1", HttpMethod::Get, "/pets")),
            TagNode::new(apinav_core::model::GENERAL_DIVIDER_NAME, "tag--general")
                .path(PathEntry::new("h1", HttpMethod::Get, "/health")),
            TagNode::new("store", "tag--store")
                .path(PathEntry::new("s1", HttpMethod::Get, "/orders")),
        ])
        .unwrap();
        let mut bar = NavBar::new(NavConfig::default()).with_spec(ResolvedSpec::new(tags));
        assert_eq!(bar.view().of_kind(ElementKind::Divider).count(), 1);
        assert!(bar.set_search_term("orders"));
        assert_eq!(bar.view().of_kind(ElementKind::Divider).count(), 1);
        assert!(bar.view().find_by_content_id("h1").is_none());
        assert!(bar.view().find_by_content_id("tag--pets").is_none());
    }

    #[test]
    fn deprecated_operation_draws_struck() {
        let tags = TagTree::new(vec![
            TagNode::new("pets", "tag--pets").with_expanded(true).path(
                PathEntry::new("old", HttpMethod::Get, "/old")
                    .with_summary("Old")
                    .with_deprecated(true),
            ),
        ])
        .unwrap();
        let mut bar = NavBar::new(NavConfig::default()).with_spec(ResolvedSpec::new(tags));
        let text = bar.draw(40, 20).to_string();
        assert!(text.contains("GET O\u{336}l\u{336}d\u{336}"));
    }

    fn focused_id(bar: &NavBar) -> Option<String> {
        let id = bar.focused()?;
        bar.view().get(id)?.content_id.clone()
    }

    #[test]
    fn focus_follows_element_when_earlier_group_expands() {
        let mut bar = bar(NavConfig::default().with_allow_search(false));
        let mut nav = ignore_navigation;
        bar.handle_event(&Event::Key(KeyEvent::new(KeyCode::End)), &mut nav);
        assert_eq!(focused_id(&bar).as_deref(), Some("tag--store"));

        let pets = bar.view().find_by_content_id("tag--pets").unwrap();
        let y = bar.draw(40, 20).row_of(pets).unwrap();
        let click = Event::Mouse(MouseEvent::click(10, y));
        assert!(matches!(
            bar.handle_event(&click, &mut nav),
            RouteResult::Toggled { expanded: true, .. }
        ));
        assert_eq!(focused_id(&bar).as_deref(), Some("tag--store"));
        assert_eq!(bar.view().iter().filter(|(_, e)| e.focused).count(), 1);

        let enter = Event::Key(KeyEvent::new(KeyCode::Enter));
        assert!(matches!(
            bar.handle_event(&enter, &mut nav),
            RouteResult::Toggled { expanded: true, .. }
        ));
        assert!(bar.tags().unwrap().roots()[1].is_expanded());
    }

    #[test]
    fn focus_falls_back_to_position_when_element_disappears() {
        let mut bar = bar(NavConfig::default().with_allow_search(false));
        let mut nav = ignore_navigation;
        bar.handle_event(&Event::Key(KeyEvent::new(KeyCode::End)), &mut nav);
        assert!(bar.set_search_term("cats"));
        assert_eq!(focused_id(&bar).as_deref(), Some("tag--pets"));
    }

    #[test]
    fn shift_tab_moves_backwards() {
        let mut bar = bar(NavConfig::default().with_allow_search(false));
        let mut nav = ignore_navigation;
        let shift_tab = Event::Key(KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT));
        bar.handle_event(&shift_tab, &mut nav);
        assert_eq!(focused_id(&bar).as_deref(), Some("tag--store"));
    }
}
