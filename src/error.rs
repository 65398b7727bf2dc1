//! Error handling module for the screen selector
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Selection failures have their own `SelectionError` so callers can match on
//! them without going through the crate-wide error.

use thiserror::Error;

use crate::params::ParamError;

/// Fatal outcomes of a screen selection.
///
/// Every variant names the offending parameter and value in its message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The catalog declared no screens at all
    #[error("screen catalog is empty: at least one screen must be declared")]
    EmptyCatalog,

    /// Two or more overrides ask for something that cannot exist together
    #[error("incompatible override {parameter}={value}: {reason}")]
    IncompatibleOverrides {
        parameter: String,
        value: String,
        reason: String,
    },

    /// The initial screen is not part of the runtime screens
    #[error("screen not found: initialScreen={index}")]
    InitialScreenNotFound { index: usize },
}

impl SelectionError {
    /// Create an incompatible-override error
    pub fn incompatible(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::IncompatibleOverrides {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the parameter this error is about, if any
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::EmptyCatalog => None,
            Self::IncompatibleOverrides { parameter, .. } => Some(parameter.as_str()),
            Self::InitialScreenNotFound { .. } => Some(crate::params::INITIAL_SCREEN),
        }
    }
}

/// Main error type for the screen selector
#[derive(Error, Debug)]
pub enum ScreenSelectorError {
    /// IO errors (reading and writing catalog files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog validation errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Screen selection failures
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// Startup parameter errors
    #[error("Parameter error: {0}")]
    Params(#[from] ParamError),
}

/// Result type alias for screen selector operations
pub type Result<T> = std::result::Result<T, ScreenSelectorError>;

// Convenient error constructors
impl ScreenSelectorError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }
}
