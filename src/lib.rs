//! Screen Selector Library
//!
//! This library decides which screens a multi-screen application runs at
//! startup, in which order, whether an aggregator home screen exists, and
//! which screen is shown first.

pub mod catalog;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod logic;
pub mod params;
pub mod types;

// Re-export main types for convenience
pub use catalog::{AppScreen, ScreenCatalog, ScreenEntry};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NullSink, TracingSink};
pub use error::{ScreenSelectorError, SelectionError};
pub use params::{ParamError, ScreenOverrides, HOME_SCREEN, INITIAL_SCREEN, SCREENS};
pub use types::{OutputFormat, ValidationMode};

// Screen resolver
pub use logic::resolver::{resolve_screens, ResolvedScreens};
