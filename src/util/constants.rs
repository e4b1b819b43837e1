// LogWeave - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogWeave";

/// Application identifier used for config directories.
pub const APP_ID: &str = "LogWeave";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Output tags
// =============================================================================

/// Tag prefixed to every line emitted from the left input.
pub const LEFT_TAG: &str = "L<<";

/// Tag prefixed to every line emitted from the right input.
pub const RIGHT_TAG: &str = ">>R";

/// Separator written between the tag and the original line content.
pub const TAG_SEPARATOR: &[u8] = b" ";

// =============================================================================
// Input limits
// =============================================================================

// Lines are unbounded unless `[input] max_line_bytes` is set. Only one pending
// line per side is held, so the limit caps the merge's working set.

/// Minimum user-configurable line length limit (terminator included).
pub const MIN_MAX_LINE_BYTES: usize = 1024; // 1 KiB

/// Hard upper bound on the line length limit (prevents configuration mistakes).
pub const ABSOLUTE_MAX_LINE_BYTES: usize = 64 * 1024 * 1024; // 64 MiB

/// Capacity of the buffered reader wrapped around each input file.
pub const INPUT_BUFFER_BYTES: usize = 64 * 1024; // 64 KiB

// =============================================================================
// Output
// =============================================================================

/// Capacity of the buffered writer wrapped around stdout.
pub const OUTPUT_BUFFER_BYTES: usize = 64 * 1024; // 64 KiB

// =============================================================================
// Exit codes
// =============================================================================

/// Process exit code for runtime failures (unreadable input, malformed
/// timestamp, write failure). Usage errors use clap's own code (2).
pub const EXIT_FAILURE: i32 = 1;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Quieter than a GUI app would use: stdout carries the
/// merged stream and stderr should stay clean unless something is wrong.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
/// Prevents accidental exposure of sensitive data in long lines.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum size of config.toml in bytes; larger files are ignored with a warning.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB
