//! Screen Selector - Main entry point
//!
//! Loads a screen catalog, applies startup overrides and prints the screens
//! the application would run.

use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use screen_selector::cli::{Cli, Commands, ResolveArgs};
use screen_selector::{
    AppScreen, CollectingSink, Diagnostic, DiagnosticSink, OutputFormat, ResolvedScreens,
    ScreenCatalog, ScreenOverrides, ScreenSelectorError, TracingSink, ValidationMode,
};

/// Initialize logging; RUST_LOG overrides the default `info` level
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// JSON document printed by `resolve --format json`
#[derive(Serialize)]
struct ResolveReport<'a> {
    catalog: &'a str,
    mode: ValidationMode,
    overrides: &'a ScreenOverrides,
    resolved: &'a ResolvedScreens<AppScreen>,
    diagnostics: &'a [Diagnostic],
}

/// Main application entry point
fn main() {
    init_logging();
    debug!("Screen selector starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let result = match &cli.command {
        Commands::Resolve(args) => run_resolve(args),
        Commands::Validate { catalog } => run_validate(catalog),
        Commands::List { catalog } => run_list(catalog),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

/// Resolve the runtime screens and print them
fn run_resolve(args: &ResolveArgs) -> anyhow::Result<()> {
    info!("Resolving screens for catalog: {:?}", args.catalog);

    let catalog = load_catalog(&args.catalog)?;
    catalog.validate()?;

    let mode = args.mode();
    let mut collected = CollectingSink::new();
    let mut logged = TracingSink;
    let sink: &mut dyn DiagnosticSink = match args.format {
        OutputFormat::Text => &mut logged,
        OutputFormat::Json => &mut collected,
    };
    let outcome = resolve_overrides(&catalog, args, mode, sink);

    // JSON output carries its diagnostics; a failed run logs them instead
    if outcome.is_err() {
        for diagnostic in collected.take() {
            logged.report(&diagnostic.parameter, &diagnostic.value, &diagnostic.message);
        }
    }
    let (overrides, resolved) = outcome?;

    match args.format {
        OutputFormat::Text => print_resolved(&catalog, &overrides, mode, &resolved),
        OutputFormat::Json => {
            let report = ResolveReport {
                catalog: &catalog.name,
                mode,
                overrides: &overrides,
                resolved: &resolved,
                diagnostics: collected.diagnostics(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Layer flag overrides on top of the query and resolve the catalog
fn resolve_overrides(
    catalog: &ScreenCatalog,
    args: &ResolveArgs,
    mode: ValidationMode,
    sink: &mut dyn DiagnosticSink,
) -> Result<(ScreenOverrides, ResolvedScreens<AppScreen>), ScreenSelectorError> {
    let from_query = match &args.query {
        Some(query) => ScreenOverrides::from_query(query, mode, &mut *sink)?,
        None => ScreenOverrides::new(),
    };
    let overrides = from_query.merge(args.flag_overrides());
    debug!("Effective overrides: {}", overrides);

    let resolved = catalog.resolve(&overrides, mode, sink)?;
    Ok((overrides, resolved))
}

fn print_resolved(
    catalog: &ScreenCatalog,
    overrides: &ScreenOverrides,
    mode: ValidationMode,
    resolved: &ResolvedScreens<AppScreen>,
) {
    println!("{} ({} mode, overrides: {})", catalog.name, mode, overrides);
    for (i, screen) in resolved.screens.iter().enumerate() {
        let marker = if i == resolved.initial_index() { "▶" } else { " " };
        match screen {
            AppScreen::Home { .. } => println!("{} {:>2}  {} (home)", marker, i, screen),
            AppScreen::Declared(entry) => {
                let position = catalog.position_of(&entry.name).unwrap_or_default();
                println!("{} {:>2}  {} (screen {})", marker, i, screen, position);
            }
        }
    }
}

/// Load a catalog file, naming the file on failure
fn load_catalog(path: &Path) -> anyhow::Result<ScreenCatalog> {
    ScreenCatalog::load_from_file(path)
        .with_context(|| format!("Failed to load catalog from {:?}", path))
}

/// Validate a catalog file
fn run_validate(path: &Path) -> anyhow::Result<()> {
    info!("Validating catalog file: {:?}", path);
    let catalog = load_catalog(path)?;
    catalog
        .validate()
        .with_context(|| format!("Invalid catalog {:?}", path))?;

    info!("Catalog validation successful");
    println!(
        "✓ Catalog '{}' is valid ({} screens)",
        catalog.name,
        catalog.screens.len()
    );
    Ok(())
}

/// List declared screens with the positions `screens` and `initialScreen` refer to
fn run_list(path: &Path) -> anyhow::Result<()> {
    let catalog = load_catalog(path)?;

    println!("{}", catalog.name);
    for (i, entry) in catalog.screens.iter().enumerate() {
        match &entry.description {
            Some(description) => println!("  {:>2}  {} - {}", i + 1, entry.name, description),
            None => println!("  {:>2}  {}", i + 1, entry.name),
        }
    }
    Ok(())
}
