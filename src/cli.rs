use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::params::ScreenOverrides;
use crate::types::{OutputFormat, ValidationMode};

/// Screen Selector - resolve which screens an application starts with
#[derive(Parser)]
#[command(name = "screen-selector")]
#[command(about = "Select, order and validate the runtime screens of a multi-screen application")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the runtime screens for a catalog and a set of overrides
    Resolve(ResolveArgs),
    /// Validate a screen catalog file
    Validate {
        /// Path to the catalog file
        catalog: PathBuf,
    },
    /// List the declared screens with their 1-based positions
    List {
        /// Path to the catalog file
        catalog: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the catalog file
    pub catalog: PathBuf,

    /// Startup query string, e.g. "screens=2,3&homeScreen=false"
    #[arg(short, long)]
    pub query: Option<String>,

    /// Whether to create a home screen (overrides the query)
    #[arg(long, value_name = "BOOL")]
    pub home_screen: Option<bool>,

    /// Initial screen: 0 for the home screen, N for catalog screen N (overrides the query)
    #[arg(long, value_name = "INDEX")]
    pub initial_screen: Option<usize>,

    /// Comma-separated 1-based catalog positions to run (overrides the query)
    #[arg(long, value_delimiter = ',', value_name = "POSITIONS")]
    pub screens: Option<Vec<usize>>,

    /// Fail on incompatible or invalid parameters instead of falling back to defaults
    #[arg(long)]
    pub strict: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl ResolveArgs {
    /// Overrides given directly as flags
    pub fn flag_overrides(&self) -> ScreenOverrides {
        ScreenOverrides {
            home_screen: self.home_screen,
            initial_screen: self.initial_screen,
            screens: self.screens.clone(),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        ValidationMode::from(self.strict)
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
