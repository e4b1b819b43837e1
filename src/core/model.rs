// LogWeave - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use chrono::{DateTime, Utc};

// =============================================================================
// Side
// =============================================================================

/// Which of the two inputs a line came from.
///
/// Ordering matters: `Left` is preferred whenever two pending lines carry the
/// same timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Tag written in front of every line emitted from this side.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Left => constants::LEFT_TAG,
            Self::Right => constants::RIGHT_TAG,
        }
    }

    /// Lowercase name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

// =============================================================================
// Log line
// =============================================================================

/// A single line read from one input, with its ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Input the line was read from.
    pub side: Side,

    /// 1-based line number within its input.
    pub line_number: u64,

    /// Instant used for ordering, in UTC.
    ///
    /// For a timestamped line this is its own parsed timestamp. A blank line
    /// inherits the timestamp of the closest preceding timestamped line of the
    /// same input; blank lines before any timestamp carry `None`, which orders
    /// before every instant.
    pub timestamp: Option<DateTime<Utc>>,

    /// Exact bytes of the line, terminator included when present.
    pub raw: Vec<u8>,

    /// True when the line has no timestamp token of its own.
    pub blank: bool,
}

impl LogLine {
    /// Short, lossy preview of the line for debug logging.
    pub fn preview(&self) -> String {
        let end = self.raw.len().min(constants::DEBUG_MAX_LINE_PREVIEW);
        String::from_utf8_lossy(&self.raw[..end])
            .trim_end()
            .to_string()
    }
}

// =============================================================================
// Merge state
// =============================================================================

/// State of the merge loop, derived from the two cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    /// Both inputs have a pending line awaiting comparison.
    BothPending,
    /// Only the left input has a pending line; the right is exhausted.
    LeftOnly,
    /// Only the right input has a pending line; the left is exhausted.
    RightOnly,
    /// Both inputs are exhausted. Terminal.
    BothExhausted,
}

impl MergeState {
    /// Derive the state from whether each side has a pending line.
    pub fn from_pending(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Self::BothPending,
            (true, false) => Self::LeftOnly,
            (false, true) => Self::RightOnly,
            (false, false) => Self::BothExhausted,
        }
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Counters collected over one merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaveSummary {
    /// Lines emitted from the left input.
    pub left_lines: u64,
    /// Lines emitted from the right input.
    pub right_lines: u64,
    /// Blank lines passed through (both sides).
    pub blank_lines: u64,
    /// Comparisons where both timestamps were equal and the left side won.
    pub ties: u64,
}

impl WeaveSummary {
    /// Total lines emitted.
    pub fn total(&self) -> u64 {
        self.left_lines + self.right_lines
    }

    pub(crate) fn record(&mut self, line: &LogLine) {
        match line.side {
            Side::Left => self.left_lines += 1,
            Side::Right => self.right_lines += 1,
        }
        if line.blank {
            self.blank_lines += 1;
        }
    }
}
