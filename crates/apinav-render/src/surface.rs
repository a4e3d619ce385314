#![forbid(unsafe_code)]

//! Line projection of an [`ElementTree`] onto a fixed-size text surface.
//!
//! Container elements draw nothing; every other element reached from the
//! root draws one line, with its descendants laid out inline after its own
//! label. A collapsed [`ElementKind::ContentContainer`] has zero height: its
//! subtree contributes no lines. Each open content container pads its
//! contents by two columns, up to eight.
//!
//! Labels of deprecated rows are struck through with a combining overlay,
//! which leaves their display width unchanged.
//!
//! Column 0 is reserved for the active-item and focus markers. Every drawn span is
//! registered in a [`HitGrid`] so pointer coordinates resolve back to the
//! innermost element under them.

use crate::element::{ElementId, ElementKind, ElementTree};
use crate::geometry::Rect;
use crate::hit::HitGrid;
use apinav_core::config::ActiveItemMarker;
use std::borrow::Cow;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Appended to labels cut at the right edge.
pub const ELLIPSIS: &str = "…";

/// Drawn in the marker column of the focused element when it is not active.
pub const FOCUS_GLYPH: char = '›';

/// Combining long stroke overlay appended to each grapheme of a struck label.
pub const STRIKE: char = '\u{0336}';

const CONTAINER_PADDING: u16 = 2;
const MAX_CONTAINER_PADDING: u16 = 8;

/// Display width of `text` in cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.len();
    }
    text.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Cut `text` to `max_width` cells, ending in [`ELLIPSIS`] when shortened.
///
/// Never splits a grapheme cluster.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_owned();
    }
    let ellipsis_width = display_width(ELLIPSIS);
    if ellipsis_width >= max_width {
        return truncate_to_width(text, max_width);
    }
    let mut out = truncate_to_width(text, max_width - ellipsis_width);
    out.push_str(ELLIPSIS);
    out
}

fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for grapheme in text.graphemes(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if width + w > max_width {
            break;
        }
        out.push_str(grapheme);
        width += w;
    }
    out
}

/// Strike `text` through, one overlay per grapheme.
#[must_use]
pub fn strike_through(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for grapheme in text.graphemes(true) {
        out.push_str(grapheme);
        out.push(STRIKE);
    }
    out
}

const fn marker_glyph(marker: ActiveItemMarker) -> char {
    match marker {
        ActiveItemMarker::LeftBar => '▌',
        ActiveItemMarker::ColoredBlock => '█',
    }
}

/// Drawn lines plus the hit grid that maps cells back to elements.
#[derive(Debug, Clone)]
pub struct TextSurface {
    width: u16,
    height: u16,
    lines: Vec<String>,
    rows: Vec<ElementId>,
    hits: HitGrid,
    clipped: bool,
}

impl TextSurface {
    /// Project `tree` onto a `width` x `height` surface.
    #[must_use]
    pub fn project(tree: &ElementTree, width: u16, height: u16, marker: ActiveItemMarker) -> Self {
        let mut surface = Self {
            width,
            height,
            lines: Vec::new(),
            rows: Vec::new(),
            hits: HitGrid::new(width, height),
            clipped: false,
        };
        let glyph = marker_glyph(marker);
        surface.walk(tree, tree.root(), 0, glyph);
        tracing::trace!(
            message = "surface.project",
            width,
            height,
            lines = surface.lines.len(),
            clipped = surface.clipped
        );
        surface
    }

    fn walk(&mut self, tree: &ElementTree, id: ElementId, padding: u16, glyph: char) {
        let Some(element) = tree.get(id) else {
            return;
        };
        if !element.kind.is_container() {
            self.draw_line(tree, id, padding, glyph);
            return;
        }
        if element.kind == ElementKind::ContentContainer && element.collapsed {
            return;
        }
        let padding = if element.kind == ElementKind::ContentContainer {
            padding
                .saturating_add(CONTAINER_PADDING)
                .min(MAX_CONTAINER_PADDING)
        } else {
            padding
        };
        for &child in tree.children(id) {
            self.walk(tree, child, padding, glyph);
        }
    }

    fn draw_line(&mut self, tree: &ElementTree, id: ElementId, padding: u16, glyph: char) {
        let Some(element) = tree.get(id) else {
            return;
        };
        let Ok(y) = u16::try_from(self.lines.len()) else {
            self.clipped = true;
            return;
        };
        if y >= self.height {
            self.clipped = true;
            return;
        }

        let inline = tree.descendants(id);
        let focused = inline
            .iter()
            .any(|&d| tree.get(d).is_some_and(|e| e.focused));

        let width = usize::from(self.width);
        let mut text = String::new();
        let mut col = 0usize;
        if width > 0 {
            text.push(if element.active {
                glyph
            } else if focused {
                FOCUS_GLYPH
            } else {
                ' '
            });
            col = 1;
        }
        self.hits.register(Rect::row(0, y, self.width), id);

        let offset = usize::from(padding.saturating_add(element.indent));
        while col < width && col < 1 + offset {
            text.push(' ');
            col += 1;
        }

        if element.kind == ElementKind::Divider && element.label.is_empty() {
            while col < width {
                text.push('─');
                col += 1;
            }
        }

        let segments = inline
            .into_iter()
            .filter_map(|seg| {
                let part = tree.get(seg)?;
                if part.label.is_empty() {
                    return None;
                }
                let label = if element.deprecated && part.kind == ElementKind::Label {
                    Cow::Owned(strike_through(&part.label))
                } else {
                    Cow::Borrowed(part.label.as_str())
                };
                Some((seg, label))
            });
        let mut first = true;
        for (seg, label) in segments {
            if !first {
                if col + 1 >= width {
                    break;
                }
                text.push(' ');
                col += 1;
            }
            first = false;
            if col >= width {
                break;
            }
            let shown = truncate_with_ellipsis(&label, width - col);
            let shown_width = display_width(&shown);
            if seg != id {
                // Bounded by `width`, which came from a u16.
                let x = u16::try_from(col).unwrap_or(u16::MAX);
                let w = u16::try_from(shown_width).unwrap_or(u16::MAX);
                self.hits.register(Rect::row(x, y, w), seg);
            }
            text.push_str(&shown);
            col += shown_width;
        }

        self.lines.push(text);
        self.rows.push(id);
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Lines in draw order, without trailing padding.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, y: u16) -> Option<&str> {
        self.lines.get(usize::from(y)).map(String::as_str)
    }

    /// Element owning line `y`.
    #[must_use]
    pub fn row_element(&self, y: u16) -> Option<ElementId> {
        self.rows.get(usize::from(y)).copied()
    }

    /// Line on which `id` starts, if it was drawn as a row.
    #[must_use]
    pub fn row_of(&self, id: ElementId) -> Option<u16> {
        let y = self.rows.iter().position(|&row| row == id)?;
        u16::try_from(y).ok()
    }

    /// Whether some lines did not fit the height.
    #[must_use]
    pub const fn is_clipped(&self) -> bool {
        self.clipped
    }

    /// Innermost element drawn at `(x, y)`.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ElementId> {
        self.hits.hit_test(x, y)
    }

    #[must_use]
    pub fn hit_grid(&self) -> &HitGrid {
        &self.hits
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line.trim_end())?;
        }
        Ok(())
    }
}
