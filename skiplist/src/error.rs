use std::error::Error;
use std::fmt;

/// Failures surfaced by the skiplist and its cursor.  None of them leaves the list in a
/// modified state.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SkipListError {
    /// A positional lookup was outside `[0, len)`.
    OutOfRange { index: usize, len: usize },
    /// The cursor was advanced after it had already run off the end.
    EndOfSequence,
    /// The cursor was asked to remove an element without a preceding `advance`, or twice for
    /// the same `advance`.
    IllegalCursorState,
}

impl fmt::Display for SkipListError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SkipListError::OutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            SkipListError::EndOfSequence => f.write_str("no more elements"),
            SkipListError::IllegalCursorState => f.write_str("illegal cursor state"),
        }
    }
}

impl Error for SkipListError {}
