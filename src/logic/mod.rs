//! Logic modules: translate startup choices into the screens that run.
//!
//! The logic layer is pure: it takes already-parsed overrides and a catalog
//! and resolves them into a `ResolvedScreens` value.
//!
//! # Modules
//!
//! - `resolver`: Screen selection, ordering and initial-screen resolution

pub mod resolver;

pub use resolver::{resolve_screens, ResolvedScreens};
