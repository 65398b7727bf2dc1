//! Screen Resolver
//!
//! Turns the declared screen catalog plus the startup overrides into the
//! screens that actually run, in order, and the screen shown first.
//!
//! # Design
//!
//! - **Pure logic**: No I/O and no global state. Problems go to the injected
//!   `DiagnosticSink`, fatal ones come back as `SelectionError`
//! - **Identity by position**: Screens are tracked by their catalog position,
//!   so `S` only needs `Clone`
//! - **Single factory call**: The home screen factory is `FnOnce`
//!
//! # Resolution Rules
//!
//! | Step | Input             | Rule |
//! |------|-------------------|------|
//! | 1    | `screens`         | 1-based positions; any invalid entry discards the whole subset |
//! | 2    | all overrides     | Conflicts are reported; strict mode fails on the first |
//! | 3    | `homeScreen`      | Home screen built iff more than one screen runs and it is not forbidden |
//! | 4    | `initialScreen`   | 0 = home screen (or first screen), N = catalog screen N |

use serde::Serialize;
use tracing::{debug, warn};

use crate::diagnostics::DiagnosticSink;
use crate::error::SelectionError;
use crate::params::{ScreenOverrides, HOME_SCREEN, INITIAL_SCREEN, SCREENS};
use crate::types::ValidationMode;

/// Outcome of a successful screen resolution.
///
/// # Invariants
///
/// - `selected_screens` is non-empty
/// - `screens` is `selected_screens`, prefixed by `home_screen` when present
/// - `initial_screen` is `screens[initial_index()]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedScreens<S> {
    /// Aggregator screen, if one was created
    pub home_screen: Option<S>,

    /// Screen displayed at startup
    pub initial_screen: S,

    /// Catalog screens in play, in run order
    pub selected_screens: Vec<S>,

    /// Every runtime screen: the home screen (if any) followed by `selected_screens`
    pub screens: Vec<S>,

    initial_index: usize,
}

impl<S> ResolvedScreens<S> {
    /// Position of `initial_screen` within `screens`
    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    /// Returns true if a home screen was created
    pub fn has_home_screen(&self) -> bool {
        self.home_screen.is_some()
    }

    /// Returns true if the run starts on the home screen
    pub fn starts_on_home_screen(&self) -> bool {
        self.has_home_screen() && self.initial_index == 0
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Select, order and validate the runtime screens.
///
/// `catalog` holds every declared screen in declaration order. `overrides`
/// carries the explicitly supplied parameters. `create_home_screen` builds the
/// aggregator from the selected screens and is called at most once.
///
/// # Errors
///
/// - `EmptyCatalog`: `catalog` has no screens
/// - `IncompatibleOverrides`: strict mode only, for the first conflicting
///   combination found
/// - `InitialScreenNotFound`: `initialScreen` names a screen that does not run,
///   regardless of mode
///
/// # What This Explicitly Refuses To Do
///
/// - Honour part of a `screens` subset: one bad entry discards all of it
/// - Build a home screen for a single running screen
pub fn resolve_screens<S, F>(
    catalog: &[S],
    overrides: &ScreenOverrides,
    mode: ValidationMode,
    sink: &mut dyn DiagnosticSink,
    create_home_screen: F,
) -> Result<ResolvedScreens<S>, SelectionError>
where
    S: Clone,
    F: FnOnce(&[S]) -> S,
{
    if catalog.is_empty() {
        return Err(SelectionError::EmptyCatalog);
    }

    // 1. Which catalog screens run, and in which order
    let positions = select_positions(catalog.len(), overrides.screens.as_deref(), sink);
    let selected_screens: Vec<S> = positions.iter().map(|&p| catalog[p].clone()).collect();
    debug!("Selected catalog positions: {:?}", positions);

    // 2. Conflicting overrides
    check_conflicts(catalog.len(), selected_screens.len(), overrides, mode, sink)?;

    // 3. Home screen
    let home_screen = if selected_screens.len() > 1 && overrides.home_screen != Some(false) {
        debug!("Creating home screen over {} screens", selected_screens.len());
        Some(create_home_screen(&selected_screens))
    } else {
        None
    };

    // 4. Initial screen
    let index = overrides.initial_screen_index();
    let initial_index = if index == 0 {
        // Home screen when present, otherwise the first selected screen
        0
    } else {
        let offset = usize::from(home_screen.is_some());
        positions
            .iter()
            .position(|&p| p == index - 1)
            .map(|pos| pos + offset)
            .ok_or(SelectionError::InitialScreenNotFound { index })?
    };

    let mut screens = Vec::with_capacity(selected_screens.len() + 1);
    screens.extend(home_screen.iter().cloned());
    screens.extend(selected_screens.iter().cloned());
    let initial_screen = screens[initial_index].clone();

    debug!(
        "Resolved {} runtime screens (home screen: {}, initial index: {})",
        screens.len(),
        home_screen.is_some(),
        initial_index
    );

    Ok(ResolvedScreens {
        home_screen,
        initial_screen,
        selected_screens,
        screens,
        initial_index,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Map the 1-based `screens` subset to 0-based catalog positions.
///
/// Falls back to every position, in catalog order, when no subset was given
/// or when any entry is out of range.
fn select_positions(
    catalog_len: usize,
    requested: Option<&[usize]>,
    sink: &mut dyn DiagnosticSink,
) -> Vec<usize> {
    let Some(requested) = requested else {
        return (0..catalog_len).collect();
    };

    if requested.is_empty() {
        sink.report(SCREENS, "", "screen subset must name at least one screen");
        return (0..catalog_len).collect();
    }

    let mut positions = Vec::with_capacity(requested.len());
    let mut all_valid = true;
    for &user_index in requested {
        if (1..=catalog_len).contains(&user_index) {
            positions.push(user_index - 1);
        } else {
            sink.report(
                SCREENS,
                &user_index.to_string(),
                &format!("invalid screen index: {user_index}"),
            );
            all_valid = false;
        }
    }

    if all_valid {
        positions
    } else {
        warn!("Ignoring screen subset {:?}, using all screens", requested);
        (0..catalog_len).collect()
    }
}

/// Report override combinations that cannot be honoured.
///
/// In strict mode the first conflict is returned after it is reported. In
/// lenient mode every conflict is reported and the later steps fall back to
/// the safe default on their own.
fn check_conflicts(
    catalog_len: usize,
    selected_len: usize,
    overrides: &ScreenOverrides,
    mode: ValidationMode,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), SelectionError> {
    if catalog_len == 1 && overrides.home_screen == Some(true) {
        let reason = "cannot specify homeScreen=true for a single-screen catalog";
        sink.report(HOME_SCREEN, "true", reason);
        if mode.is_strict() {
            return Err(SelectionError::incompatible(HOME_SCREEN, true, reason));
        }
    }

    if overrides.initial_screen == Some(0) && overrides.home_screen == Some(false) {
        let reason = "cannot specify initialScreen=0 when the home screen is disabled with homeScreen=false";
        sink.report(INITIAL_SCREEN, "0", reason);
        sink.report(HOME_SCREEN, "false", reason);
        if mode.is_strict() {
            return Err(SelectionError::incompatible(INITIAL_SCREEN, 0, reason));
        }
    }

    if overrides.initial_screen == Some(0) && selected_len == 1 {
        let reason = "cannot specify initialScreen=0 when only one screen is selected";
        sink.report(INITIAL_SCREEN, "0", reason);
        if mode.is_strict() {
            return Err(SelectionError::incompatible(INITIAL_SCREEN, 0, reason));
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
