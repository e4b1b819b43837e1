// LogWeave - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. The merge run and exit-code mapping

use clap::Parser;
use logweave::{app, platform, util};
use std::path::PathBuf;

/// LogWeave - interleave two timestamped log files.
///
/// Lines from both files are written to stdout in timestamp order, prefixed
/// with `L<<` (left file) or `>>R` (right file). Equal timestamps print the
/// left line first.
#[derive(Parser, Debug)]
#[command(name = "logweave", version, about)]
struct Cli {
    /// Left log file.
    left: PathBuf,

    /// Right log file.
    right: PathBuf,

    /// Enable debug logging on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_path = platform_paths.config_file();
    let (config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::debug!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        max_line_bytes = ?config.max_line_bytes,
        "LogWeave starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    match app::run::run(&cli.left, &cli.right, &config) {
        Ok(_) => {}
        Err(e) if e.is_broken_pipe() => {
            tracing::debug!("Output closed by reader; stopping");
        }
        Err(e) => {
            tracing::error!(error = %e, "Weave failed");
            eprintln!("Error: {e}");
            std::process::exit(util::constants::EXIT_FAILURE);
        }
    }
}
