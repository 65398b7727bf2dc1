//! Screen catalog file handling.
//!
//! A catalog declares the screens of an application in order. It is stored as
//! JSON:
//!
//! ```json
//! {
//!   "name": "Energy Skate Park",
//!   "home_title": "Home",
//!   "screens": [
//!     { "name": "Intro", "description": "Guided introduction" },
//!     { "name": "Measure" }
//!   ]
//! }
//! ```

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::diagnostics::DiagnosticSink;
use crate::error::{Result, ScreenSelectorError};
use crate::logic::resolver::{resolve_screens, ResolvedScreens};
use crate::params::ScreenOverrides;
use crate::types::ValidationMode;

fn default_home_title() -> String {
    "Home".to_string()
}

/// One declared screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ScreenEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A screen at runtime: either the aggregator or a declared screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppScreen {
    /// Aggregator listing the selected screens by name
    Home { title: String, screens: Vec<String> },

    /// A screen from the catalog
    Declared(ScreenEntry),
}

impl AppScreen {
    pub fn name(&self) -> &str {
        match self {
            Self::Home { title, .. } => title,
            Self::Declared(entry) => &entry.name,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Self::Home { .. })
    }
}

impl fmt::Display for AppScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home { title, screens } => write!(f, "{} [{}]", title, screens.join(", ")),
            Self::Declared(entry) => write!(f, "{}", entry.name),
        }
    }
}

/// Declared screens of an application, in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenCatalog {
    pub name: String,

    /// Title given to the aggregator screen
    #[serde(default = "default_home_title")]
    pub home_title: String,

    pub screens: Vec<ScreenEntry>,
}

impl ScreenCatalog {
    /// Create an empty catalog; add screens with `with_screen`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            home_title: default_home_title(),
            screens: Vec::new(),
        }
    }

    pub fn with_screen(mut self, entry: ScreenEntry) -> Self {
        self.screens.push(entry);
        self
    }

    pub fn with_home_title(mut self, title: impl Into<String>) -> Self {
        self.home_title = title.into();
        self
    }

    /// Save catalog to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;

        debug!("Saved catalog '{}' to {:?}", self.name, path.as_ref());
        Ok(())
    }

    /// Load catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let catalog: Self = serde_json::from_str(&content)?;

        debug!(
            "Loaded catalog '{}' with {} screens",
            catalog.name,
            catalog.screens.len()
        );
        Ok(catalog)
    }

    /// Validate the catalog
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ScreenSelectorError::catalog("Catalog name must be specified"));
        }

        if self.home_title.trim().is_empty() {
            return Err(ScreenSelectorError::catalog(
                "Home screen title must not be empty",
            ));
        }

        if self.screens.is_empty() {
            return Err(ScreenSelectorError::catalog(
                "Catalog must declare at least one screen",
            ));
        }

        let mut seen = HashSet::new();
        for (i, entry) in self.screens.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ScreenSelectorError::catalog(format!(
                    "Screen {} has an empty name",
                    i + 1
                )));
            }
            if !seen.insert(name) {
                return Err(ScreenSelectorError::catalog(format!(
                    "Duplicate screen name: {}",
                    name
                )));
            }
        }

        Ok(())
    }

    /// 1-based position of the screen called `name`
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.screens
            .iter()
            .position(|entry| entry.name == name)
            .map(|i| i + 1)
    }

    /// Declared screens wrapped as runtime screens
    pub fn app_screens(&self) -> Vec<AppScreen> {
        self.screens.iter().cloned().map(AppScreen::Declared).collect()
    }

    /// Resolve the runtime screens of this catalog.
    ///
    /// The home screen, when created, lists the selected screens by name.
    pub fn resolve(
        &self,
        overrides: &ScreenOverrides,
        mode: ValidationMode,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ResolvedScreens<AppScreen>> {
        let catalog = self.app_screens();
        let title = self.home_title.clone();

        let resolved = resolve_screens(&catalog, overrides, mode, sink, |selected| {
            AppScreen::Home {
                title,
                screens: selected.iter().map(|s| s.name().to_string()).collect(),
            }
        })?;

        info!(
            "Catalog '{}': {} runtime screens, starting on '{}'",
            self.name,
            resolved.screens.len(),
            resolved.initial_screen.name()
        );
        Ok(resolved)
    }
}
