#![forbid(unsafe_code)]

//! Render layer: the element tree a navigation bar projects into.
//!
//! # Role in apinav
//! `apinav-render` holds the output side of a render pass. The widgets crate
//! builds an [`ElementTree`] from model state; the tree is then projected
//! onto a [`TextSurface`] for terminal hosts, or walked directly by hosts
//! that draw their own markup.
//!
//! # Primary responsibilities
//! - **ElementTree**: arena of elements with typed [`Action`] tags, parent
//!   links, and ancestor queries used for delegated interaction.
//! - **HitGrid**: cell-to-element lookup for pointer events.
//! - **TextSurface**: fixed-width line projection with truncation and
//!   active-item markers.

pub mod element;
pub mod geometry;
pub mod hit;
pub mod surface;

pub use element::{Action, Element, ElementId, ElementKind, ElementTree};
pub use geometry::Rect;
pub use hit::HitGrid;
pub use surface::TextSurface;
