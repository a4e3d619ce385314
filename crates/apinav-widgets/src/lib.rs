#![forbid(unsafe_code)]

//! Widgets: the navigation bar and the logic behind it.
//!
//! # Role in apinav
//! `apinav-widgets` turns a [`TagTree`](apinav_core::model::TagTree) plus a
//! search term into an element tree, keeps per-node expansion state, and
//! routes user input back to state changes or navigation requests.
//!
//! # Primary responsibilities
//! - **visibility**: which nodes survive a search term, with the shallow
//!   child-content rule.
//! - **expansion**: single toggles, bulk expand/collapse, the aggregate
//!   toggle-all state.
//! - **sidebar**: projection of visible nodes into headers, operation rows,
//!   and content containers.
//! - **router**: delegated dispatch from an event origin to the nearest
//!   action-tagged element.
//! - **navbar**: the [`NavBar`] widget tying all of the above together.
//!
//! # How it fits in the system
//! Hosts own the scroll position and supply a [`Navigator`]; the bar only
//! asks it to scroll. Each `NavBar` owns its tree, so instances never share
//! state.

pub mod expansion;
pub mod matcher;
pub mod navbar;
pub mod router;
pub mod sidebar;
pub mod slug;
pub mod visibility;

pub use expansion::BulkAction;
pub use matcher::TextMatcher;
pub use navbar::NavBar;
pub use router::{NavTarget, Navigator, RouteResult, Router};
pub use sidebar::{RenderContext, TreeRenderer};
pub use visibility::{MatchPredicate, Visibility};
