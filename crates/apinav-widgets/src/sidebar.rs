#![forbid(unsafe_code)]

//! Tree renderer: projects visible tag nodes into the element tree.
//!
//! For each node the [visibility resolver](crate::visibility) keeps, the
//! renderer emits a group holding a header (or a divider for the
//! "General ⦂" pseudo-tag), optional heading links, and a content container
//! with the matching operations and the child groups. The container is
//! marked collapsed when the node is not expanded; read mode expands
//! everything and drops the toggle affordances. A divider whose operations
//! are all filtered out is still drawn, as a bare rule.
//!
//! Indentation grows by [`INDENT_STEP`] per level up to
//! [`MAX_INDENT_LEVELS`]. Children rendered inside a parent's container get
//! no indentation of their own: the container already offsets them.

use crate::expansion::effective_expanded;
use crate::slug::heading_content_id;
use crate::visibility::{MatchPredicate, path_matches, resolve, skips_root};
use apinav_core::config::{MethodStyle, NavConfig, RenderStyle};
use apinav_core::model::{NodePath, PathEntry, TagNode, TagTree};
use apinav_render::element::{Action, Element, ElementId, ElementKind, ElementTree};

/// Columns added per nesting level.
pub const INDENT_STEP: u16 = 2;
/// Levels beyond this no longer indent.
pub const MAX_INDENT_LEVELS: usize = 8;

/// Header indentation for a node at `level`.
#[must_use]
pub fn indent_for_level(level: usize) -> u16 {
    // Capped at MAX_INDENT_LEVELS, so the cast cannot truncate.
    let capped = level.min(MAX_INDENT_LEVELS) as u16;
    capped * INDENT_STEP
}

/// Indentation of a heading link of markdown `depth` under a row at `base`.
#[must_use]
pub fn heading_indent(base: u16, depth: u8) -> u16 {
    base + INDENT_STEP * u16::from(depth.max(1))
}

/// Per-call render inputs, passed down by value.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub config: &'a NavConfig,
    /// Trimmed search term; empty means no filter.
    pub search_term: &'a str,
    /// Set for nodes drawn inside an already offset parent container.
    pub in_parent_container: bool,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(config: &'a NavConfig, search_term: &'a str) -> Self {
        Self {
            config,
            search_term: search_term.trim(),
            in_parent_container: false,
        }
    }

    /// Context for children drawn inside this node's container.
    #[must_use]
    pub const fn nested(self) -> Self {
        Self {
            in_parent_container: true,
            ..self
        }
    }

    const fn style(&self) -> RenderStyle {
        self.config.render_style
    }
}

/// Renders tag nodes, counting how many it emitted.
#[derive(Debug)]
pub struct TreeRenderer<'p, P: ?Sized> {
    predicate: &'p P,
    rendered: usize,
}

impl<'p, P> TreeRenderer<'p, P>
where
    P: MatchPredicate + ?Sized,
{
    #[must_use]
    pub fn new(predicate: &'p P) -> Self {
        Self {
            predicate,
            rendered: 0,
        }
    }

    /// Nodes emitted so far.
    #[must_use]
    pub const fn rendered(&self) -> usize {
        self.rendered
    }

    /// Render every root of `tree` under `parent`.
    ///
    /// Root nodes with neither operations nor children are skipped; the
    /// divider pseudo-tag is always kept.
    pub fn render_roots(
        &mut self,
        elements: &mut ElementTree,
        parent: ElementId,
        tree: &TagTree,
        ctx: RenderContext<'_>,
    ) {
        for (i, node) in tree.roots().iter().enumerate() {
            if skips_root(node) {
                continue;
            }
            self.render_node(elements, parent, node, NodePath::root(i), ctx);
        }
    }

    /// Render `node` and its visible descendants. Returns the group element,
    /// or `None` when the node is not visible. The divider pseudo-tag always
    /// yields a group.
    pub fn render_node(
        &mut self,
        elements: &mut ElementTree,
        parent: ElementId,
        node: &TagNode,
        path: NodePath,
        ctx: RenderContext<'_>,
    ) -> Option<ElementId> {
        let visibility = resolve(node, ctx.search_term, self.predicate);
        let divider = node.is_general_divider();
        if !visibility.visible && !divider {
            return None;
        }
        self.rendered += 1;

        let style = ctx.style();
        let expanded = effective_expanded(node, style);
        let indent = if ctx.in_parent_container {
            0
        } else {
            indent_for_level(node.level())
        };

        let group = elements.push(
            parent,
            Element::new(ElementKind::TagGroup)
                .with_node(path.clone())
                .with_level(node.level()),
        );

        if divider {
            elements.push(group, Element::new(ElementKind::Divider).with_level(node.level()));
            if !visibility.visible {
                return Some(group);
            }
        } else {
            Self::render_header(elements, group, node, expanded, indent, style);
        }

        let show_headings = ctx.config.info_description_headings_in_nav_bar
            && node.is_leaf()
            && !ctx.config.expands_on_tag_click();
        if show_headings {
            for header in node.headers() {
                elements.push(
                    group,
                    Element::new(ElementKind::HeadingEntry)
                        .with_action(Action::Navigate)
                        .with_content_id(heading_content_id(node.element_id(), &header.text))
                        .with_label(header.text.as_str())
                        .with_indent(heading_indent(indent, header.depth))
                        .with_level(node.level()),
                );
            }
        }

        if visibility.has_matching_paths || node.has_children() || !style.is_read() {
            let container = elements.push(
                group,
                Element::new(ElementKind::ContentContainer)
                    .with_indent(indent)
                    .with_level(node.level())
                    .with_collapsed(!expanded),
            );
            if visibility.has_matching_paths {
                let context = node.context_name();
                for entry in node.paths() {
                    if path_matches(ctx.search_term, entry, context, self.predicate) {
                        render_path(elements, container, entry, ctx.config);
                    }
                }
            }
            let nested = ctx.nested();
            for (i, child) in node.children().iter().enumerate() {
                self.render_node(elements, container, child, path.child(i), nested);
            }
        }

        Some(group)
    }

    fn render_header(
        elements: &mut ElementTree,
        group: ElementId,
        node: &TagNode,
        expanded: bool,
        indent: u16,
        style: RenderStyle,
    ) {
        let action = if style.is_read() {
            Action::Navigate
        } else {
            Action::ExpandCollapseTag
        };
        let header = elements.push(
            group,
            Element::new(ElementKind::TagHeader)
                .with_action(action)
                .with_content_id(node.element_id())
                .with_indent(indent)
                .with_level(node.level()),
        );
        elements.push(
            header,
            Element::new(ElementKind::Label).with_label(node.display_name()),
        );
        if node.is_leaf() && !style.is_read() {
            elements.push(
                header,
                Element::new(ElementKind::LeafIcon)
                    .with_action(Action::ExpandCollapseTag)
                    .with_label(if expanded { "▾" } else { "▸" }),
            );
        }
    }
}

/// Badge text for an operation's method.
#[must_use]
pub fn method_badge(entry: &PathEntry, style: MethodStyle) -> &'static str {
    match style {
        MethodStyle::ColoredBlock => entry.method.abbrev(),
        MethodStyle::PlainText | MethodStyle::ColoredText => entry.method.as_upper(),
    }
}

fn render_path(elements: &mut ElementTree, container: ElementId, entry: &PathEntry, config: &NavConfig) {
    let row = elements.push(
        container,
        Element::new(ElementKind::PathRow)
            .with_action(Action::Navigate)
            .with_content_id(entry.element_id.as_str())
            .with_deprecated(entry.deprecated),
    );
    elements.push(
        row,
        Element::new(ElementKind::MethodBadge)
            .with_label(method_badge(entry, config.show_method_in_nav_bar)),
    );
    if entry.is_webhook {
        elements.push(row, Element::new(ElementKind::WebhookBadge).with_label("WEBHOOK"));
    }
    elements.push(
        row,
        Element::new(ElementKind::Label).with_label(entry.nav_label(config.use_path_in_nav_bar)),
    );
}
