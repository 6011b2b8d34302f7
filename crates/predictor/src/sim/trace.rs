//! Address Trace Replay.
//!
//! A trace is plain text with one address per line, decimal or `0x`-prefixed
//! hexadecimal. Blank lines and `#` comments are ignored.

use std::io::BufRead;

use super::{TraceReport, try_replay};
use crate::common::TraceError;
use crate::predictor::FootprintPredictor;

/// Parses one trace line, returning `None` for blank and comment lines.
fn parse_line(line: &str) -> Option<Result<u64, std::num::ParseIntError>> {
    let text = line.split('#').next().unwrap_or_default().trim();
    if text.is_empty() {
        return None;
    }
    let text = text.replace('_', "");
    Some(
        match text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => text.parse(),
        },
    )
}

/// Streaming iterator over the addresses of a trace.
///
/// Lines are read one at a time, so traces of any length replay in constant
/// memory. Yields the first [`TraceError`] encountered and then stops.
#[derive(Debug)]
pub struct TraceAddresses<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> TraceAddresses<R> {
    /// Wraps a reader positioned at the start of a trace.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for TraceAddresses<R> {
    type Item = Result<u64, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;
            match parse_line(&line) {
                None => {}
                Some(Ok(addr)) => return Some(Ok(addr)),
                Some(Err(_)) => {
                    self.failed = true;
                    return Some(Err(TraceError::Parse {
                        line: self.line_no,
                        text: line.trim().to_owned(),
                    }));
                }
            }
        }
    }
}

/// Reads every address of a trace into memory.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if reading fails and [`TraceError::Parse`] for
/// the first line that is not an address, blank, or comment.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<u64>, TraceError> {
    TraceAddresses::new(reader).collect()
}

/// Streams a trace through `predictor` line by line.
///
/// # Errors
///
/// Stops at the first [`TraceError`]. Queries from the lines before it have
/// already been applied to `predictor`.
pub fn replay_trace<R: BufRead>(
    predictor: &mut FootprintPredictor,
    reader: R,
) -> Result<TraceReport, TraceError> {
    try_replay(predictor, TraceAddresses::new(reader))
}
