//! Tests for Catalog Files and Startup Queries
//!
//! These tests verify:
//! - Catalog files load, validate and resolve end to end
//! - Query strings flow through to the resolved screens
//! - Diagnostics from parsing and resolution share one sink

use std::io::Write;

use screen_selector::{
    AppScreen, CollectingSink, ScreenCatalog, ScreenOverrides, ScreenSelectorError,
    SelectionError, ValidationMode, HOME_SCREEN, INITIAL_SCREEN,
};
use tempfile::NamedTempFile;

const CATALOG_JSON: &str = r#"{
  "name": "Energy Skate Park",
  "home_title": "Home",
  "screens": [
    { "name": "Intro", "description": "Guided introduction" },
    { "name": "Friction" },
    { "name": "Playground" }
  ]
}"#;

fn write_catalog(json: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(json.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

fn load_catalog() -> ScreenCatalog {
    let file = write_catalog(CATALOG_JSON);
    let catalog = ScreenCatalog::load_from_file(file.path()).unwrap();
    catalog.validate().unwrap();
    catalog
}

fn names(screens: &[AppScreen]) -> Vec<&str> {
    screens.iter().map(|s| s.name()).collect()
}

// =============================================================================
// Catalog Files
// =============================================================================

#[test]
fn test_catalog_file_loads_in_declaration_order() {
    let catalog = load_catalog();
    assert_eq!(catalog.name, "Energy Skate Park");
    let declared: Vec<&str> = catalog.screens.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(declared, vec!["Intro", "Friction", "Playground"]);
}

#[test]
fn test_catalog_without_screens_fails_validation() {
    let file = write_catalog(r#"{ "name": "Empty", "screens": [] }"#);
    let catalog = ScreenCatalog::load_from_file(file.path()).unwrap();
    assert!(catalog.validate().is_err());
}

#[test]
fn test_catalog_file_errors_are_typed() {
    let missing = ScreenCatalog::load_from_file("/nonexistent/screens.json");
    assert!(matches!(missing, Err(ScreenSelectorError::Io(_))));

    let file = write_catalog(r#"{ "name": "Broken", "screens": "#);
    let malformed = ScreenCatalog::load_from_file(file.path());
    assert!(matches!(malformed, Err(ScreenSelectorError::Json(_))));

    let file = write_catalog(r#"{ "name": "Twice", "screens": [ { "name": "A" }, { "name": "A" } ] }"#);
    let catalog = ScreenCatalog::load_from_file(file.path()).unwrap();
    assert!(matches!(catalog.validate(), Err(ScreenSelectorError::Catalog(_))));
}

#[test]
fn test_empty_catalog_resolution_is_an_error() {
    let catalog = ScreenCatalog::new("Empty");
    let mut sink = CollectingSink::new();
    let err = catalog
        .resolve(&ScreenOverrides::new(), ValidationMode::Lenient, &mut sink)
        .unwrap_err();
    assert!(matches!(
        err,
        ScreenSelectorError::Selection(SelectionError::EmptyCatalog)
    ));
}

// =============================================================================
// Query Strings
// =============================================================================

#[test]
fn test_query_selects_subset_and_initial_screen() {
    let catalog = load_catalog();
    let mut sink = CollectingSink::new();
    let overrides = ScreenOverrides::from_query(
        "?screens=3,2&initialScreen=2",
        ValidationMode::Strict,
        &mut sink,
    )
    .unwrap();

    let resolved = catalog
        .resolve(&overrides, ValidationMode::Strict, &mut sink)
        .unwrap();

    assert_eq!(names(&resolved.screens), vec!["Home", "Playground", "Friction"]);
    assert_eq!(resolved.initial_screen.name(), "Friction");
    assert_eq!(resolved.initial_index(), 2);
    assert!(sink.is_empty());
}

#[test]
fn test_query_without_home_screen() {
    let catalog = load_catalog();
    let mut sink = CollectingSink::new();
    let overrides =
        ScreenOverrides::from_query("homeScreen=false", ValidationMode::Lenient, &mut sink)
            .unwrap();

    let resolved = catalog
        .resolve(&overrides, ValidationMode::Lenient, &mut sink)
        .unwrap();

    assert_eq!(names(&resolved.screens), vec!["Intro", "Friction", "Playground"]);
    assert_eq!(resolved.initial_screen.name(), "Intro");
}

#[test]
fn test_lenient_query_collects_parse_and_conflict_diagnostics() {
    let catalog = load_catalog();
    let mut sink = CollectingSink::new();
    let overrides = ScreenOverrides::from_query(
        "screens=1,x&homeScreen=false&initialScreen=0",
        ValidationMode::Lenient,
        &mut sink,
    )
    .unwrap();
    assert_eq!(overrides.screens, None);

    let resolved = catalog
        .resolve(&overrides, ValidationMode::Lenient, &mut sink)
        .unwrap();

    assert!(!resolved.has_home_screen());
    assert_eq!(resolved.initial_screen.name(), "Intro");
    // screens parse failure, then the conflict reported against both parameters
    assert_eq!(sink.len(), 3);
    assert_eq!(sink.for_parameter(INITIAL_SCREEN).count(), 1);
    assert_eq!(sink.for_parameter(HOME_SCREEN).count(), 1);
}

#[test]
fn test_strict_conflict_surfaces_as_selection_error() {
    let catalog = load_catalog();
    let mut sink = CollectingSink::new();
    let overrides = ScreenOverrides::new().with_screens(vec![2]).with_initial_screen(0);

    let err = catalog
        .resolve(&overrides, ValidationMode::Strict, &mut sink)
        .unwrap_err();

    assert!(err.to_string().contains("initialScreen=0"));
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_resolved_screens_serialize_to_json() {
    let catalog = load_catalog();
    let mut sink = CollectingSink::new();
    let overrides = ScreenOverrides::new().with_screens(vec![1, 2]);
    let resolved = catalog
        .resolve(&overrides, ValidationMode::Strict, &mut sink)
        .unwrap();

    let json = serde_json::to_value(&resolved).unwrap();
    assert_eq!(json["home_screen"]["kind"], "home");
    assert_eq!(json["home_screen"]["screens"][1], "Friction");
    assert_eq!(json["screens"].as_array().unwrap().len(), 3);
    assert_eq!(json["initial_index"], 0);
}
