//! Errors surfaced at the checked boundaries of the engine.
//!
//! The interpreter itself never fails: malformed directives degrade to
//! literal output. Only the buffer destination can report a problem, because
//! it is the one destination with a fixed capacity.

use thiserror::Error;

/// Failure to deliver formatted output into a caller-supplied buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The output (plus its NUL terminator) did not fit. The buffer holds the
    /// truncated prefix, still NUL-terminated.
    #[error("buffer too small: {required} bytes required, capacity {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },
    /// The destination has no room even for the terminator.
    #[error("destination buffer is empty")]
    EmptyBuffer,
}

impl FormatError {
    /// Number of bytes the full output needs, terminator included.
    #[must_use]
    pub const fn required(&self) -> usize {
        match self {
            Self::BufferTooSmall { required, .. } => *required,
            Self::EmptyBuffer => 1,
        }
    }
}
