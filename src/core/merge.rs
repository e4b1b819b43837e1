// LogWeave - core/merge.rs
//
// Stable two-pointer merge of two timestamp-ordered inputs.
// Core layer: reads from LogSource<BufRead>, writes to any Write.
//
// Each side holds at most one pending line. A side is refilled only after its
// pending line has been emitted; the other side's pending line is kept for the
// next comparison. Equal timestamps go to the left side first.

use crate::core::model::{LogLine, MergeState, Side, WeaveSummary};
use crate::core::source::LogSource;
use crate::util::constants;
use crate::util::error::{LogWeaveError, Result};
use std::io::{BufRead, Write};

/// Per-side merge state: either a pending line awaiting comparison, or
/// exhausted.
#[derive(Debug, Default)]
pub struct Cursor {
    pending: Option<LogLine>,
}

impl Cursor {
    /// Replace the (already consumed) pending line with the next line from
    /// `source`. End of input leaves the cursor exhausted.
    pub fn refill<R: BufRead>(&mut self, source: &mut LogSource<R>) -> Result<()> {
        self.pending = source.next_line()?;
        Ok(())
    }

    /// Consume the pending line, leaving the cursor empty until refilled.
    pub fn take(&mut self) -> Option<LogLine> {
        self.pending.take()
    }

    /// Put back a line that lost its comparison so it is compared again next
    /// round, ahead of anything still unread on its side.
    pub fn restore(&mut self, line: LogLine) {
        debug_assert!(self.pending.is_none());
        self.pending = Some(line);
    }
}

/// Decide which of two pending lines is emitted next.
///
/// Returns the winning side and whether the timestamps were tied.
pub fn choose_side(left: &LogLine, right: &LogLine) -> (Side, bool) {
    if left.timestamp <= right.timestamp {
        (Side::Left, left.timestamp == right.timestamp)
    } else {
        (Side::Right, false)
    }
}

/// Merge `left` and `right` into `out`, tagging every line with its side.
///
/// Runs until both inputs are exhausted or an error occurs. Lines written
/// before an error stay written; `out` is flushed on success.
pub fn weave<L, R, W>(
    left: &mut LogSource<L>,
    right: &mut LogSource<R>,
    out: &mut W,
) -> Result<WeaveSummary>
where
    L: BufRead,
    R: BufRead,
    W: Write,
{
    let mut summary = WeaveSummary::default();
    let mut left_cursor = Cursor::default();
    let mut right_cursor = Cursor::default();

    left_cursor.refill(left)?;
    right_cursor.refill(right)?;

    loop {
        let pending = (left_cursor.take(), right_cursor.take());
        let state = MergeState::from_pending(pending.0.is_some(), pending.1.is_some());

        let line = match pending {
            (None, None) => break,
            (Some(line), None) | (None, Some(line)) => line,
            (Some(l), Some(r)) => {
                let (side, tie) = choose_side(&l, &r);
                if tie {
                    summary.ties += 1;
                }
                match side {
                    Side::Left => {
                        right_cursor.restore(r);
                        l
                    }
                    Side::Right => {
                        left_cursor.restore(l);
                        r
                    }
                }
            }
        };

        tracing::trace!(
            state = ?state,
            side = line.side.label(),
            line = line.line_number,
            preview = %line.preview(),
            "Emit"
        );
        write_tagged(out, &line)?;
        summary.record(&line);

        match line.side {
            Side::Left => left_cursor.refill(left)?,
            Side::Right => right_cursor.refill(right)?,
        }
    }

    out.flush()
        .map_err(|source| LogWeaveError::Output { source })?;

    tracing::debug!(
        left = summary.left_lines,
        right = summary.right_lines,
        blank = summary.blank_lines,
        ties = summary.ties,
        "Merge complete"
    );

    Ok(summary)
}

/// Write `<TAG> <original bytes>`, adding a newline only when the original
/// line had none (final line of a file without a trailing newline).
pub fn write_tagged<W: Write>(out: &mut W, line: &LogLine) -> Result<()> {
    let write = |out: &mut W| -> std::io::Result<()> {
        out.write_all(line.side.tag().as_bytes())?;
        out.write_all(constants::TAG_SEPARATOR)?;
        out.write_all(&line.raw)?;
        if !line.raw.ends_with(b"\n") {
            out.write_all(b"\n")?;
        }
        Ok(())
    };
    write(out).map_err(|source| LogWeaveError::Output { source })
}
