//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and the summary/validation defaults so a rename only requires changing
//! this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "diffbrief";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple (set by `build.rs`).
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.diffbrief.toml` in the workspace root).
pub const CONFIG_FILENAME: &str = ".diffbrief.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "diffbrief";

// ── Diff summary ────────────────────────────────────────────────────

/// Marker line that opens a new file section in `git diff` output.
pub const DIFF_FILE_MARKER: &str = "diff --git";

/// File name used when a `diff --git` line carries no ` b/` segment.
pub const UNKNOWN_FILE: &str = "unknown file";

/// Maximum number of buffered lines per file block.
pub const MAX_LINES_PER_FILE: usize = 20;

/// Maximum number of added/removed lines counted per file block.
pub const MAX_CHANGED_LINES: usize = 100;

// ── Validation limits ───────────────────────────────────────────────

pub const MAX_DIFF_LENGTH: usize = 50_000;
pub const MAX_API_KEY_LENGTH: usize = 500;
pub const MAX_COMMIT_MESSAGE_LENGTH: usize = 200;
pub const MAX_MODEL_NAME_LENGTH: usize = 100;
pub const MAX_SANITIZED_INPUT_LENGTH: usize = 10_000;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_KEY: &str = "DIFFBRIEF_API_KEY";
pub const ENV_API_URL: &str = "DIFFBRIEF_API_URL";
pub const ENV_MODEL: &str = "DIFFBRIEF_MODEL";
pub const ENV_LOG: &str = "DIFFBRIEF_LOG";
