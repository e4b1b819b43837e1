// LogWeave - app/run.rs
//
// One merge run: open both inputs, wrap them as LogSources, weave them into
// the output, and report what happened.

use crate::core::merge::weave;
use crate::core::model::{Side, WeaveSummary};
use crate::core::source::LogSource;
use crate::platform::config::AppConfig;
use crate::platform::fs::open_log;
use crate::util::constants;
use crate::util::error::Result;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Merge `left` and `right` into stdout.
pub fn run(left: &Path, right: &Path, config: &AppConfig) -> Result<WeaveSummary> {
    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(constants::OUTPUT_BUFFER_BYTES, stdout.lock());
    run_to(left, right, config, &mut out)
}

/// Merge `left` and `right` into `out`.
///
/// Both inputs are opened before anything is written, so an unavailable
/// input never produces partial output.
pub fn run_to<W: Write>(
    left: &Path,
    right: &Path,
    config: &AppConfig,
    out: &mut W,
) -> Result<WeaveSummary> {
    let left_reader = open_log(left)?;
    let right_reader = open_log(right)?;

    let mut left_source = LogSource::new(Side::Left, left, left_reader, config.max_line_bytes);
    let mut right_source = LogSource::new(Side::Right, right, right_reader, config.max_line_bytes);

    tracing::info!(
        left = %left.display(),
        right = %right.display(),
        "Weaving logs"
    );

    let summary = weave(&mut left_source, &mut right_source, out)?;

    for source in [&left_source, &right_source] {
        let count = source.out_of_order();
        if count > 0 {
            tracing::warn!(
                side = source.side().label(),
                path = %source.path().display(),
                lines = count,
                "Input had lines earlier than their predecessor"
            );
        }
    }

    tracing::info!(
        total = summary.total(),
        left = summary.left_lines,
        right = summary.right_lines,
        "Weave finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::error::LogWeaveError;
    use std::fs;

    #[test]
    fn test_run_to_merges_files() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.log");
        let right = dir.path().join("right.log");
        fs::write(&left, "2023-01-01T00:00:01Z a\n").unwrap();
        fs::write(&right, "2023-01-01T00:00:00Z b\n").unwrap();

        let mut out = Vec::new();
        let summary = run_to(&left, &right, &AppConfig::default(), &mut out).unwrap();

        assert_eq!(out, b">>R 2023-01-01T00:00:00Z b\nL<< 2023-01-01T00:00:01Z a\n");
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn test_missing_right_produces_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.log");
        fs::write(&left, "2023-01-01T00:00:01Z a\n").unwrap();
        let right = dir.path().join("nope.log");

        let mut out = Vec::new();
        let err = run_to(&left, &right, &AppConfig::default(), &mut out).unwrap_err();

        assert!(
            matches!(&err, LogWeaveError::InputUnavailable { path, .. } if path == &right),
            "got {err:?}"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_default_config_merges_multi_megabyte_line() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.log");
        let right = dir.path().join("right.log");
        let long = format!("2023-01-01T00:00:01Z {}\n", "x".repeat(1_500_000));
        fs::write(&left, &long).unwrap();
        fs::write(&right, "2023-01-01T00:00:00Z b\n").unwrap();

        let mut out = Vec::new();
        let summary = run_to(&left, &right, &AppConfig::default(), &mut out).unwrap();

        assert_eq!(summary.left_lines, 1);
        let expected = format!(">>R 2023-01-01T00:00:00Z b\nL<< {long}");
        assert!(out == expected.as_bytes(), "long line not passed through intact");
    }

    #[test]
    fn test_out_of_order_input_is_still_merged() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.log");
        let right = dir.path().join("right.log");
        fs::write(&left, "2023-01-01T00:00:05Z a\n2023-01-01T00:00:01Z b\n").unwrap();
        fs::write(&right, "").unwrap();

        let mut out = Vec::new();
        run_to(&left, &right, &AppConfig::default(), &mut out).unwrap();
        assert_eq!(out, b"L<< 2023-01-01T00:00:05Z a\nL<< 2023-01-01T00:00:01Z b\n");
    }

    #[test]
    fn test_configured_line_limit_applies() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.log");
        let right = dir.path().join("right.log");
        let long = format!("2023-01-01T00:00:01Z {}\n", "x".repeat(2000));
        fs::write(&left, long).unwrap();
        fs::write(&right, "").unwrap();

        let config = AppConfig {
            max_line_bytes: Some(constants::MIN_MAX_LINE_BYTES),
            ..AppConfig::default()
        };
        let mut out = Vec::new();
        let err = run_to(&left, &right, &config, &mut out).unwrap_err();
        assert!(matches!(err, LogWeaveError::LineTooLong { line_number: 1, .. }));
    }
}
