// LogWeave - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every variant names the file (and line, where one exists) that caused it,
// so the binary can print a single actionable diagnostic.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LogWeave operations.
///
/// Every error is fatal: the merge is a single-shot batch run with no retry.
#[derive(Debug)]
pub enum LogWeaveError {
    /// An input path could not be opened for reading.
    InputUnavailable { path: PathBuf, source: io::Error },

    /// Reading from an already-open input failed part way through.
    Read {
        path: PathBuf,
        line_number: u64,
        source: io::Error,
    },

    /// An input line exceeds the configured maximum length.
    LineTooLong {
        path: PathBuf,
        line_number: u64,
        length: usize,
        max_length: usize,
    },

    /// A non-blank line does not start with a parseable ISO-8601 timestamp.
    MalformedTimestamp {
        path: PathBuf,
        line_number: u64,
        raw_token: String,
    },

    /// Writing the merged stream failed.
    Output { source: io::Error },
}

impl LogWeaveError {
    /// True when the error is a write to a pipe whose reader has gone away
    /// (e.g. `logweave a.log b.log | head`). Callers treat this as a normal
    /// end of output rather than a failure.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(
            self,
            Self::Output { source } if source.kind() == io::ErrorKind::BrokenPipe
        )
    }
}

impl fmt::Display for LogWeaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputUnavailable { path, source } => {
                write!(f, "Cannot open input '{}': {source}", path.display())
            }
            Self::Read {
                path,
                line_number,
                source,
            } => write!(
                f,
                "'{}' line {line_number}: I/O error while reading: {source}",
                path.display()
            ),
            Self::LineTooLong {
                path,
                line_number,
                length,
                max_length,
            } => write!(
                f,
                "'{}' line {line_number}: line is at least {length} bytes, \
                 exceeds maximum of {max_length}. \
                 Increase [input] max_line_bytes in config.toml.",
                path.display()
            ),
            Self::MalformedTimestamp {
                path,
                line_number,
                raw_token,
            } => write!(
                f,
                "'{}' line {line_number}: cannot parse leading token \
                 '{raw_token}' as an ISO-8601 timestamp",
                path.display()
            ),
            Self::Output { source } => write!(f, "Failed to write output: {source}"),
        }
    }
}

impl std::error::Error for LogWeaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputUnavailable { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
            Self::Output { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for LogWeave results.
pub type Result<T> = std::result::Result<T, LogWeaveError>;
