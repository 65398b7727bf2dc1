//! Type-safe option types for the screen selector
//!
//! Enums here replace stringly-typed switches with proper Rust types that
//! provide compile-time validation and exhaustive matching.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How incompatible override combinations are handled.
///
/// Both modes report every problem through the diagnostic sink. They differ in
/// what happens next:
///
/// | Mode      | Incompatible overrides            |
/// |-----------|-----------------------------------|
/// | `Lenient` | Reported, then the safe default wins |
/// | `Strict`  | Reported, then returned as an error  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ValidationMode {
    #[default]
    Lenient,
    Strict,
}

impl ValidationMode {
    /// Returns true if incompatible overrides must fail the resolution
    #[inline]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl From<bool> for ValidationMode {
    /// `true` selects strict mode
    fn from(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Output format of the CLI `resolve` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_validation_mode_serialization() {
        assert_eq!(ValidationMode::Strict.to_string(), "strict");
        assert_eq!(ValidationMode::Lenient.to_string(), "lenient");
    }

    #[test]
    fn test_validation_mode_parsing() {
        assert_eq!(ValidationMode::from_str("strict").unwrap(), ValidationMode::Strict);
        assert_eq!(ValidationMode::from_str("Lenient").unwrap(), ValidationMode::Lenient);
        assert!(ValidationMode::from_str("debug").is_err());
    }

    #[test]
    fn test_validation_mode_from_bool() {
        assert!(ValidationMode::from(true).is_strict());
        assert!(!ValidationMode::from(false).is_strict());
        assert_eq!(ValidationMode::default(), ValidationMode::Lenient);
    }

    #[test]
    fn test_output_format_iteration() {
        let formats: Vec<String> = OutputFormat::iter().map(|f| f.to_string()).collect();
        assert_eq!(formats, vec!["text", "json"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&ValidationMode::Strict).unwrap();
        assert_eq!(json, "\"strict\"");
        let parsed: ValidationMode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ValidationMode::Strict);
    }
}
