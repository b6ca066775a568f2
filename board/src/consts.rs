//! Shared numeric constants for the board crate.

// ── Node sizing ─────────────────────────────────────────────────

/// Baseline card width in canvas units.
pub const DEFAULT_NODE_WIDTH: f64 = 300.0;

/// Baseline card height in canvas units.
pub const DEFAULT_NODE_HEIGHT: f64 = 280.0;

// ── Tidy layout ─────────────────────────────────────────────────

/// Spacing between grid cells, in canvas units.
pub const TIDY_GAP: f64 = 20.0;

/// Length of the tidy tween in milliseconds.
pub const TIDY_DURATION_MS: f64 = 800.0;

// ── Persistence ─────────────────────────────────────────────────

/// Storage key holding the persisted `{nodes, theme}` blob.
pub const STORAGE_KEY: &str = "zenboard-storage";

/// Filename prefix for exported boards.
pub const EXPORT_FILE_PREFIX: &str = "InchDesk-export-";
