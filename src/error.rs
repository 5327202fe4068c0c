use std::error::Error;
use std::fmt;

/// A failure signal produced by the query surface.
///
/// The two variants are deliberately distinguishable: an out-of-range
/// index is a caller programming error, while a mismatch is an ordinary
/// failed expectation. Neither is ever recovered internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The requested event index exceeds the captured sequence.
    OutOfRange {
        /// The index that was asked for.
        requested: usize,
        /// How many events the sink actually captured.
        available: usize,
    },
    /// A matcher expectation was not met. Carries the full, self-contained
    /// description of expected vs. actual.
    Mismatch(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                requested,
                available,
            } => write!(
                f,
                "requested event #{requested}, but only {available} event(s) were captured"
            ),
            Self::Mismatch(description) => f.write_str(description),
        }
    }
}

impl Error for QueryError {}
