#![forbid(unsafe_code)]

//! Core: tag-tree model, input events, and configuration.
//!
//! # Role in apinav
//! `apinav-core` is the data layer. It owns the node model handed over by
//! the spec resolver, the canonical input events a host forwards, and the
//! render-mode flags. It has no rendering or interaction logic.
//!
//! # Primary responsibilities
//! - **TagTree / TagNode / PathEntry**: validated tag forest with an
//!   element-id index.
//! - **ResolvedSpec**: overview, servers, security, and components outline.
//! - **Event**: keyboard and mouse input, with the activation filter.
//! - **NavConfig**: render-mode flags from attributes or environment.

pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod model;
pub mod outline;

pub use error::ModelError;
