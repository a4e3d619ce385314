#![forbid(unsafe_code)]

//! Errors raised while accepting a tag tree from the spec resolver.

use std::fmt;

/// Malformed input handed over by the spec-processing collaborator.
///
/// These are precondition failures: the tree is rejected as a whole and
/// nothing is reinterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A tag node carries an empty element id.
    EmptyTagElementId { name: String },
    /// An operation entry carries an empty element id.
    EmptyPathElementId { tag: String, path: String },
    /// Two tags or operations share one element id.
    DuplicateElementId { element_id: String },
    /// A node's level disagrees with its position in the tree.
    LevelMismatch {
        element_id: String,
        expected: usize,
        found: usize,
    },
    /// A leaf tag has a child that itself holds operations.
    LeafWithGroupedChildren { element_id: String },
    /// An HTTP method outside the supported verb set.
    UnknownMethod { method: String },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTagElementId { name } => {
                write!(f, "tag {name:?} has an empty element id")
            }
            Self::EmptyPathElementId { tag, path } => {
                write!(f, "operation {path:?} under tag {tag:?} has an empty element id")
            }
            Self::DuplicateElementId { element_id } => {
                write!(f, "element id {element_id:?} is used more than once")
            }
            Self::LevelMismatch {
                element_id,
                expected,
                found,
            } => write!(
                f,
                "tag {element_id:?} has level {found}, expected {expected}"
            ),
            Self::LeafWithGroupedChildren { element_id } => {
                write!(f, "leaf tag {element_id:?} has a child holding operations")
            }
            Self::UnknownMethod { method } => write!(f, "unknown HTTP method {method:?}"),
        }
    }
}

impl std::error::Error for ModelError {}
