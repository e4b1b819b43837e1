// LogWeave - util/logging.rs
//
// Diagnostics go to stderr through a tracing subscriber; stdout belongs to the
// merged stream and never receives log output.
//
// The filter is chosen from, in order: RUST_LOG, the --debug flag, the
// `[logging] level` key of config.toml, then DEFAULT_LOG_LEVEL.

use super::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL};
use tracing_subscriber::EnvFilter;

/// Filter directive used when RUST_LOG is not set.
///
/// `--debug` wins over the configured level; with neither, the quiet default
/// applies so a normal run leaves stderr empty.
fn fallback_directive(debug_flag: bool, config_level: Option<&str>) -> &str {
    match (debug_flag, config_level) {
        (true, _) => "debug",
        (false, Some(level)) => level,
        (false, None) => DEFAULT_LOG_LEVEL,
    }
}

/// Install the global subscriber. Call once, after config has been loaded.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    let filter = if from_env {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(fallback_directive(debug_flag, config_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .init();

    tracing::debug!(
        app = APP_NAME,
        version = APP_VERSION,
        rust_log = from_env,
        debug_flag,
        "Diagnostics enabled"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag_overrides_config_level() {
        assert_eq!(fallback_directive(true, Some("error")), "debug");
        assert_eq!(fallback_directive(true, None), "debug");
    }

    #[test]
    fn test_config_level_used_without_flag() {
        assert_eq!(fallback_directive(false, Some("trace")), "trace");
    }

    #[test]
    fn test_default_is_quiet() {
        assert_eq!(fallback_directive(false, None), DEFAULT_LOG_LEVEL);
        assert_eq!(DEFAULT_LOG_LEVEL, "warn");
    }
}
