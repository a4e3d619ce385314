#![forbid(unsafe_code)]

//! Cell-to-element lookup for pointer input.
//!
//! Each drawn line registers the spans its elements occupy; a mouse event's
//! coordinates then resolve to the innermost element under the pointer,
//! which is where the router starts its walk.

use crate::element::ElementId;
use crate::geometry::Rect;

/// Grid mapping surface cells to the element drawn there.
#[derive(Debug, Clone, Default)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<ElementId>>,
}

impl HitGrid {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![None; size],
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Map every cell of `rect` (clipped to the grid) to `id`.
    ///
    /// Later registrations win, so register containers before their children.
    pub fn register(&mut self, rect: Rect, id: ElementId) {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = Some(id);
                }
            }
        }
    }

    /// Element drawn at `(x, y)`, if any.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ElementId> {
        self.index(x, y).and_then(|i| self.cells[i])
    }

    /// Distinct elements registered inside `rect`, in first-seen order.
    #[must_use]
    pub fn hits_in(&self, rect: Rect) -> Vec<ElementId> {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        let mut hits = Vec::new();
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(id) = self.hit_test(x, y)
                    && !hits.contains(&id)
                {
                    hits.push(id);
                }
            }
        }
        hits
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
