use thiserror::Error;

/// Contract failures of the sliding window.
///
/// Every variant is a caller error: the structures never read past their
/// arrays or hand back stale data, they report the violated precondition instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window capacity must be at least 1")]
    ZeroCapacity,

    #[error("ring is full: {capacity} live slots")]
    RingFull { capacity: usize },

    #[error("ring is empty")]
    RingEmpty,

    #[error("window is empty")]
    EmptyWindow,

    #[error("window holds {len} of {capacity} values")]
    WindowNotFull { len: usize, capacity: usize },

    #[error("heap index {index} out of range (len {len})")]
    HeapIndexOutOfRange { index: usize, len: usize },

    #[error("stream of {len} values is shorter than window size {window_size}")]
    StreamTooShort { window_size: usize, len: usize },
}
