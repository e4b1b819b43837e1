// LogWeave - core/source.rs
//
// Line-oriented reader over one input. Accepts any BufRead so the merge can be
// driven from files, stdin-like streams, or in-memory buffers in tests.

use crate::core::model::{LogLine, Side};
use crate::core::timestamp::{read_leading_timestamp, LeadingTimestamp};
use crate::util::error::{LogWeaveError, Result};
use chrono::{DateTime, Utc};
use std::io::{BufRead, Read};
use std::path::{Path, PathBuf};

/// One input of the merge: a reader plus the bookkeeping needed to turn its
/// lines into ordered `LogLine`s and to report errors against the right file.
#[derive(Debug)]
pub struct LogSource<R> {
    side: Side,
    path: PathBuf,
    reader: R,
    /// Optional cap on one line's length, terminator included.
    max_line_bytes: Option<usize>,
    /// Number of the last line handed out (1-based; 0 before the first read).
    line_number: u64,
    /// Timestamp of the closest preceding timestamped line.
    last_timestamp: Option<DateTime<Utc>>,
    /// Lines whose timestamp is earlier than the line before them.
    out_of_order: u64,
}

impl<R: BufRead> LogSource<R> {
    /// Wrap `reader`. `path` is used only for diagnostics.
    pub fn new(
        side: Side,
        path: impl Into<PathBuf>,
        reader: R,
        max_line_bytes: Option<usize>,
    ) -> Self {
        Self {
            side,
            path: path.into(),
            reader,
            max_line_bytes,
            line_number: 0,
            last_timestamp: None,
            out_of_order: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of timestamped lines seen so far that went backwards in time.
    pub fn out_of_order(&self) -> u64 {
        self.out_of_order
    }

    /// Read the next line. Returns `Ok(None)` at end of input.
    ///
    /// The returned line keeps its exact bytes, terminator included. A line
    /// longer than `max_line_bytes` (when set) or a non-blank line without a
    /// parseable leading timestamp is a hard error.
    pub fn next_line(&mut self) -> Result<Option<LogLine>> {
        let line_number = self.line_number + 1;
        let mut raw = Vec::new();

        // With a limit, read at most one byte past it so an oversized line is
        // detected without buffering all of it.
        let read = match self.max_line_bytes {
            Some(max) => self
                .reader
                .by_ref()
                .take(max as u64 + 1)
                .read_until(b'\n', &mut raw),
            None => self.reader.read_until(b'\n', &mut raw),
        }
        .map_err(|e| LogWeaveError::Read {
            path: self.path.clone(),
            line_number,
            source: e,
        })?;

        if read == 0 {
            return Ok(None);
        }
        self.line_number = line_number;

        if let Some(max) = self.max_line_bytes.filter(|max| raw.len() > *max) {
            return Err(LogWeaveError::LineTooLong {
                path: self.path.clone(),
                line_number,
                length: raw.len(),
                max_length: max,
            });
        }

        let (timestamp, blank) = match read_leading_timestamp(&raw) {
            LeadingTimestamp::Blank => (self.last_timestamp, true),
            LeadingTimestamp::Parsed(ts) => {
                if self.last_timestamp.is_some_and(|prev| ts < prev) {
                    self.out_of_order += 1;
                    if self.out_of_order == 1 {
                        tracing::warn!(
                            side = self.side.label(),
                            path = %self.path.display(),
                            line = line_number,
                            "Input is not in timestamp order; merged output will not be fully ordered"
                        );
                    }
                }
                self.last_timestamp = Some(ts);
                (Some(ts), false)
            }
            LeadingTimestamp::Malformed(token) => {
                return Err(LogWeaveError::MalformedTimestamp {
                    path: self.path.clone(),
                    line_number,
                    raw_token: String::from_utf8_lossy(token).into_owned(),
                });
            }
        };

        Ok(Some(LogLine {
            side: self.side,
            line_number,
            timestamp,
            raw,
            blank,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(content: &[u8]) -> LogSource<&[u8]> {
        LogSource::new(Side::Left, "left.log", content, None)
    }

    #[test]
    fn test_reads_lines_verbatim_with_numbers() {
        let mut src = source(b"2023-01-01T00:00:01Z a\r\n2023-01-01T00:00:02Z b");

        let first = src.next_line().unwrap().unwrap();
        assert_eq!(first.raw, b"2023-01-01T00:00:01Z a\r\n");
        assert_eq!(first.line_number, 1);
        assert!(!first.blank);

        let second = src.next_line().unwrap().unwrap();
        assert_eq!(second.raw, b"2023-01-01T00:00:02Z b");
        assert_eq!(second.line_number, 2);
        assert!(first.timestamp < second.timestamp);

        assert!(src.next_line().unwrap().is_none());
        assert!(src.next_line().unwrap().is_none());
    }

    #[test]
    fn test_empty_input_is_immediately_exhausted() {
        let mut src = source(b"");
        assert!(src.next_line().unwrap().is_none());
    }

    #[test]
    fn test_blank_line_inherits_previous_timestamp() {
        let mut src = source(b"\n2023-01-01T00:00:05Z a\n   \n");

        let leading = src.next_line().unwrap().unwrap();
        assert!(leading.blank);
        assert_eq!(leading.timestamp, None);

        let stamped = src.next_line().unwrap().unwrap();
        let trailing = src.next_line().unwrap().unwrap();
        assert!(trailing.blank);
        assert_eq!(trailing.timestamp, stamped.timestamp);
    }

    #[test]
    fn test_malformed_timestamp_reports_line_and_token() {
        let mut src = source(b"2023-01-01T00:00:01Z ok\nnot-a-time boom\n");
        src.next_line().unwrap();

        match src.next_line() {
            Err(LogWeaveError::MalformedTimestamp {
                path,
                line_number,
                raw_token,
            }) => {
                assert_eq!(path, PathBuf::from("left.log"));
                assert_eq!(line_number, 2);
                assert_eq!(raw_token, "not-a-time");
            }
            other => panic!("expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_line_too_long() {
        let mut line = b"2023-01-01T00:00:01Z ".to_vec();
        line.extend(std::iter::repeat(b'x').take(64));
        line.push(b'\n');
        let mut src = LogSource::new(Side::Right, "right.log", &line[..], Some(32));

        assert!(matches!(
            src.next_line(),
            Err(LogWeaveError::LineTooLong {
                line_number: 1,
                max_length: 32,
                ..
            })
        ));
    }

    #[test]
    fn test_unlimited_source_reads_multi_megabyte_line() {
        let mut line = b"2023-01-01T00:00:01Z ".to_vec();
        line.extend(std::iter::repeat(b'x').take(1_500_000));
        line.push(b'\n');
        let mut src = source(&line);

        let read = src.next_line().unwrap().unwrap();
        assert_eq!(read.raw.len(), line.len());
        assert!(!read.blank);
        assert!(src.next_line().unwrap().is_none());
    }

    #[test]
    fn test_line_exactly_at_limit_is_accepted() {
        let line = b"2023-01-01T00:00:01Z abc\n";
        let mut src = LogSource::new(Side::Left, "left.log", &line[..], Some(line.len()));
        assert_eq!(src.next_line().unwrap().unwrap().raw, line);
    }

    #[test]
    fn test_counts_out_of_order_lines() {
        let mut src = source(
            b"2023-01-01T00:00:05Z a\n2023-01-01T00:00:01Z b\n2023-01-01T00:00:09Z c\n",
        );
        while src.next_line().unwrap().is_some() {}
        assert_eq!(src.out_of_order(), 1);
    }
}
