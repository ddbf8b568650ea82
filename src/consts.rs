//! Shared numeric constants for the overlay engine.

// ── Layout ──────────────────────────────────────────────────────

/// Margin applied on every side when an item's anchor is not recognized.
pub const FALLBACK_MARGIN: f64 = 10.0;

// ── Gestures ────────────────────────────────────────────────────

/// Smallest width or height a resize may produce, in design units.
pub const MIN_RESIZE_SIZE: f64 = 10.0;

/// Angular step used when rotation snapping is active.
pub const ROTATION_SNAP_DEG: f64 = 15.0;

// ── Z allocation ────────────────────────────────────────────────

/// z assigned to the bottom-most layer after renumbering.
pub const Z_BASE: i64 = 10;

/// Gap between adjacent layers after renumbering.
pub const Z_STEP: i64 = 10;

/// Default lift applied to template layers during a merge.
pub const MERGE_Z_OFFSET: i64 = 100;

// ── Tier limits ─────────────────────────────────────────────────
//
// The default total (9) renumbers to at most z = 90, under MERGE_Z_OFFSET.

/// Default maximum number of text layers per overlay.
pub const DEFAULT_MAX_TEXTS: usize = 4;

/// Default maximum number of picture layers per overlay.
pub const DEFAULT_MAX_PICS: usize = 2;

/// Default maximum number of rectangle layers per overlay.
pub const DEFAULT_MAX_RECTS: usize = 3;
