//! Startup parameters that override screen selection.
//!
//! Three parameters are recognised, each with its own schema:
//!
//! | Parameter       | Schema                                   | Default      |
//! |-----------------|------------------------------------------|--------------|
//! | `homeScreen`    | `true` / `false`, bare key means `true`  | `true`       |
//! | `initialScreen` | integer >= 0                             | `0`          |
//! | `screens`       | comma list of unique integers >= 1       | all screens  |
//!
//! A parameter that is absent, or whose value fails its schema, stays `None`
//! in [`ScreenOverrides`] so "not provided" and "explicitly false" remain
//! distinguishable all the way into the selector.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::diagnostics::DiagnosticSink;
use crate::types::ValidationMode;

/// Whether an aggregator home screen is wanted
pub const HOME_SCREEN: &str = "homeScreen";
/// Which runtime screen is shown first
pub const INITIAL_SCREEN: &str = "initialScreen";
/// Subset and order of catalog screens to run
pub const SCREENS: &str = "screens";

/// Errors produced while reading startup parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Value does not satisfy the parameter's schema
    #[error("invalid value for {parameter}: '{value}' ({reason})")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Key is not one of the screen selection parameters
    #[error("unknown parameter: {name}")]
    UnknownParameter { name: String },
}

impl ParamError {
    fn invalid(parameter: &str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Short description suitable for a diagnostic message
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidValue { reason, .. } => reason.clone(),
            Self::UnknownParameter { .. } => "unknown parameter".to_string(),
        }
    }
}

/// Explicitly supplied screen selection overrides.
///
/// `None` means the parameter was not provided (or was rejected), in which
/// case the selector applies its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_screen: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_screen: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screens: Option<Vec<usize>>,
}

impl ScreenOverrides {
    /// No overrides: every parameter takes its default
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home_screen(mut self, wanted: bool) -> Self {
        self.home_screen = Some(wanted);
        self
    }

    pub fn with_initial_screen(mut self, index: usize) -> Self {
        self.initial_screen = Some(index);
        self
    }

    pub fn with_screens(mut self, positions: impl Into<Vec<usize>>) -> Self {
        self.screens = Some(positions.into());
        self
    }

    /// Effective `homeScreen` value (defaults to wanted)
    pub fn home_screen_wanted(&self) -> bool {
        self.home_screen.unwrap_or(true)
    }

    /// Effective `initialScreen` value (defaults to 0)
    pub fn initial_screen_index(&self) -> usize {
        self.initial_screen.unwrap_or(0)
    }

    /// True if no parameter was explicitly supplied
    pub fn is_empty(&self) -> bool {
        self.home_screen.is_none() && self.initial_screen.is_none() && self.screens.is_none()
    }

    /// Layer `other` on top of `self`; parameters set in `other` win.
    pub fn merge(self, other: ScreenOverrides) -> Self {
        Self {
            home_screen: other.home_screen.or(self.home_screen),
            initial_screen: other.initial_screen.or(self.initial_screen),
            screens: other.screens.or(self.screens),
        }
    }

    /// Parse a query string such as `?screens=2,3&homeScreen=false`.
    ///
    /// Every rejected value and unknown key is reported to `sink`. In lenient
    /// mode a rejected value leaves its parameter unset; in strict mode the
    /// first rejected value is returned as an error. Unknown keys never fail
    /// parsing since other components may own them. When a key repeats, the
    /// last occurrence wins.
    pub fn from_query(
        query: &str,
        mode: ValidationMode,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, ParamError> {
        let mut overrides = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (pair, None),
            };
            let key = decode(raw_key);
            let value = raw_value.map(decode);

            let parsed = match key.as_str() {
                HOME_SCREEN => {
                    parse_home_screen(value.as_deref()).map(|v| overrides.home_screen = Some(v))
                }
                INITIAL_SCREEN => parse_initial_screen(value.as_deref())
                    .map(|v| overrides.initial_screen = Some(v)),
                SCREENS => parse_screens(value.as_deref()).map(|v| overrides.screens = Some(v)),
                _ => {
                    debug!("Ignoring unrelated parameter: {}", key);
                    let err = ParamError::UnknownParameter { name: key.clone() };
                    sink.report(&key, value.as_deref().unwrap_or(""), &err.reason());
                    continue;
                }
            };

            if let Err(err) = parsed {
                sink.report(&key, value.as_deref().unwrap_or(""), &err.reason());
                if mode.is_strict() {
                    return Err(err);
                }
                // Rejected values revert to "not provided"
                match key.as_str() {
                    HOME_SCREEN => overrides.home_screen = None,
                    INITIAL_SCREEN => overrides.initial_screen = None,
                    _ => overrides.screens = None,
                }
            }
        }

        debug!("Parsed screen overrides: {}", overrides);
        Ok(overrides)
    }
}

impl fmt::Display for ScreenOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(home) = self.home_screen {
            parts.push(format!("{HOME_SCREEN}={home}"));
        }
        if let Some(index) = self.initial_screen {
            parts.push(format!("{INITIAL_SCREEN}={index}"));
        }
        if let Some(screens) = &self.screens {
            let list: Vec<String> = screens.iter().map(|s| s.to_string()).collect();
            parts.push(format!("{SCREENS}={}", list.join(",")));
        }
        if parts.is_empty() {
            write!(f, "(defaults)")
        } else {
            write!(f, "{}", parts.join("&"))
        }
    }
}

/// Parse a `homeScreen` value; a bare key means `true`.
pub fn parse_home_screen(value: Option<&str>) -> Result<bool, ParamError> {
    match value {
        None => Ok(true),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(other) => Err(ParamError::invalid(
            HOME_SCREEN,
            other,
            "expected true or false",
        )),
    }
}

/// Parse an `initialScreen` value (integer >= 0).
pub fn parse_initial_screen(value: Option<&str>) -> Result<usize, ParamError> {
    let value = value.ok_or_else(|| ParamError::invalid(INITIAL_SCREEN, "", "missing value"))?;
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ParamError::invalid(INITIAL_SCREEN, value, "expected an integer >= 0"))
}

/// Parse a `screens` value: comma-separated, unique, 1-based positions.
pub fn parse_screens(value: Option<&str>) -> Result<Vec<usize>, ParamError> {
    let value = value.ok_or_else(|| ParamError::invalid(SCREENS, "", "missing value"))?;

    let mut positions = Vec::new();
    for element in value.split(',') {
        let position = element
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| {
                ParamError::invalid(SCREENS, value, format!("invalid screen position: '{element}'"))
            })?;
        if positions.contains(&position) {
            return Err(ParamError::invalid(
                SCREENS,
                value,
                format!("duplicate screen position: {position}"),
            ));
        }
        positions.push(position);
    }

    Ok(positions)
}

/// Percent-decode a query component; undecodable input is kept as-is.
fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
