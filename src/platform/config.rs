// LogWeave - platform/config.rs
//
// Platform-specific config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.
//
// config.toml never changes what the merge produces; it only tunes
// diagnostics and resource bounds.

use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LogWeave configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/logweave/ or %APPDATA%\LogWeave\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            Self { config_dir }
        } else {
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[input]` section.
    pub input: InputSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Maximum accepted length of one input line, in bytes.
    pub max_line_bytes: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Maximum accepted input line length in bytes; `None` accepts any length.
    pub max_line_bytes: Option<usize>,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: None,
            log_level: None,
        }
    }
}

/// Load and validate config.toml at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings. An unreadable, oversized,
/// or unparseable file yields defaults plus a warning; so does each
/// out-of-range value (only that value falls back).
///
/// Runs before logging is initialised (the log level comes from here), so
/// warnings are returned rather than logged. The caller logs them.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    let size = match std::fs::metadata(config_path) {
        Ok(meta) => meta.len(),
        Err(_) => return (AppConfig::default(), warnings),
    };

    if size > constants::MAX_CONFIG_FILE_SIZE {
        warnings.push(format!(
            "Config file '{}' is {size} bytes, exceeds maximum of {} bytes. Using defaults.",
            config_path.display(),
            constants::MAX_CONFIG_FILE_SIZE,
        ));
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    match toml::from_str::<RawConfig>(&content) {
        Ok(raw) => validate(raw),
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            (AppConfig::default(), warnings)
        }
    }
}

/// Validate each field against named constants, accumulating all warnings.
fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Input: max_line_bytes --
    if let Some(bytes) = raw.input.max_line_bytes {
        if (constants::MIN_MAX_LINE_BYTES..=constants::ABSOLUTE_MAX_LINE_BYTES).contains(&bytes) {
            config.max_line_bytes = Some(bytes);
        } else {
            warnings.push(format!(
                "[input] max_line_bytes = {bytes} is out of range ({}-{}). Lines will not be length-limited.",
                constants::MIN_MAX_LINE_BYTES,
                constants::ABSOLUTE_MAX_LINE_BYTES,
            ));
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let lowered = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lowered.as_str()) {
            config.log_level = Some(lowered);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    (config, warnings)
}
