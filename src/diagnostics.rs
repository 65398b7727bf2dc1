//! Diagnostic reporting for startup parameters.
//!
//! Invalid or conflicting parameters are not always fatal. Whenever the
//! selector or the parameter parser finds one, it calls
//! [`DiagnosticSink::report`] with the parameter name, the offending value and
//! a human-readable message. The caller decides what a report means: collect
//! it for display, forward it to the log, or drop it.
//!
//! # Sinks
//!
//! - [`CollectingSink`] keeps every report in order
//! - [`TracingSink`] emits each report as a `tracing` warning
//! - [`NullSink`] discards everything

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// One non-fatal problem with a startup parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Parameter name as the user spells it (e.g. `screens`)
    pub parameter: String,

    /// Offending value, rendered as text
    pub value: String,

    /// What is wrong with it
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        parameter: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}: {}", self.parameter, self.value, self.message)
    }
}

/// Receiver for non-fatal parameter problems.
///
/// Reports never change the outcome of a resolution on their own; they only
/// describe what was ignored or overridden.
pub trait DiagnosticSink {
    /// Record one problem with `parameter`.
    fn report(&mut self, parameter: &str, value: &str, message: &str);
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn report(&mut self, parameter: &str, value: &str, message: &str) {
        (**self).report(parameter, value, message);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, parameter: &str, value: &str, message: &str) {
        self.push(Diagnostic::new(parameter, value, message));
    }
}

/// Sink that keeps every report in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Reports about a single parameter
    pub fn for_parameter<'a>(&'a self, parameter: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.parameter == parameter)
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Take the collected reports, leaving the sink empty
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, parameter: &str, value: &str, message: &str) {
        self.diagnostics.push(Diagnostic::new(parameter, value, message));
    }
}

/// Sink that forwards every report to the log as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, parameter: &str, value: &str, message: &str) {
        warn!(parameter, value, "{}", message);
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _parameter: &str, _value: &str, _message: &str) {}
}
