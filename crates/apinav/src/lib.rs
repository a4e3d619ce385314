#![forbid(unsafe_code)]

//! apinav public facade crate.
//!
//! Re-exports the types a host needs to embed the navigation bar: the tag
//! model and configuration from `apinav-core`, the element tree and text
//! surface from `apinav-render`, and the [`NavBar`] widget with its router
//! from `apinav-widgets`. Most hosts only need the [`prelude`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use apinav_core::ModelError;
pub use apinav_core::config::{ActiveItemMarker, MethodStyle, NavConfig, NavTagClick, RenderStyle};
pub use apinav_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use apinav_core::model::{
    ElementLocation, GENERAL_DIVIDER_NAME, Header, HttpMethod, NodePath, PathEntry, TagNode,
    TagTree,
};
pub use apinav_core::outline::{Component, ResolvedSpec, SpecInfo, SubComponent};

// --- Render re-exports -----------------------------------------------------

pub use apinav_render::{Action, Element, ElementId, ElementKind, ElementTree, HitGrid, Rect, TextSurface};

// --- Widget re-exports -----------------------------------------------------

pub use apinav_widgets::{
    BulkAction, MatchPredicate, NavBar, NavTarget, Navigator, RouteResult, TextMatcher, Visibility,
};

pub use apinav_core as core;
pub use apinav_render as render;
pub use apinav_widgets as widgets;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hosts feeding apinav.
#[derive(Debug)]
pub enum Error {
    /// The tag tree violates a model precondition.
    Model(ModelError),
    /// The resolver JSON could not be read.
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(err) => write!(f, "invalid tag tree: {err}"),
            #[cfg(feature = "serde")]
            Self::Json(err) => write!(f, "invalid resolved spec: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            #[cfg(feature = "serde")]
            Self::Json(err) => Some(err),
        }
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        Self::Model(err)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Standard result type for apinav APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse the resolver's JSON output into a [`ResolvedSpec`].
///
/// Tag-tree preconditions are checked during parsing, so a malformed tree
/// surfaces as [`Error::Json`].
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON or an invalid tag tree.
#[cfg(feature = "serde")]
pub fn spec_from_json(json: &str) -> Result<ResolvedSpec> {
    let spec: ResolvedSpec = serde_json::from_str(json).inspect_err(|err| {
        tracing::warn!(message = "navbar.spec_rejected", error = %err);
    })?;
    tracing::debug!(
        message = "navbar.spec_loaded",
        tags = spec.tags.node_count(),
        loaded = spec.is_loaded()
    );
    Ok(spec)
}

/// Build a validated [`TagTree`] from root nodes.
///
/// # Errors
///
/// Returns [`Error::Model`] when a precondition fails.
pub fn tag_tree(roots: Vec<TagNode>) -> Result<TagTree> {
    Ok(TagTree::new(roots)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Action, BulkAction, ElementId, ElementKind, Error, Event, HttpMethod, KeyCode, KeyEvent,
        MouseEvent, NavBar, NavConfig, NavTarget, Navigator, PathEntry, RenderStyle, ResolvedSpec,
        Result, RouteResult, TagNode, TagTree, TextSurface,
    };

    pub use crate::{core, render, widgets};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_errors_convert() {
        let err = tag_tree(vec![TagNode::new("a", "x"), TagNode::new("b", "x")]).unwrap_err();
        assert!(matches!(err, Error::Model(ModelError::DuplicateElementId { .. })));
        assert!(err.to_string().starts_with("invalid tag tree"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(spec_from_json("{"), Err(Error::Json(_))));
        assert!(matches!(
            spec_from_json(r#"{"tags": [{"name": "a", "elementId": ""}]}"#),
            Err(Error::Json(_))
        ));
    }
}
