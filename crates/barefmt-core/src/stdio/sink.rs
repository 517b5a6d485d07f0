//! Output sinks.
//!
//! The engine never sees a destination directly: it calls [`Sink::emit`]
//! exactly once per output byte, in output order. Destinations decide what a
//! byte means to them.

use crate::error::FormatError;

/// A destination that accepts formatted output one byte at a time.
pub trait Sink {
    /// Accept the next output byte.
    fn emit(&mut self, byte: u8);

    /// Emit every byte of `bytes` in order.
    fn emit_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.emit(b);
        }
    }

    /// Emit `byte` `count` times.
    fn emit_repeat(&mut self, byte: u8, count: usize) {
        for _ in 0..count {
            self.emit(byte);
        }
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, byte: u8) {
        (**self).emit(byte);
    }
}

/// Writes output to successive positions of a byte buffer.
///
/// The cursor advances by exactly one per emitted byte. Once formatting is
/// done, [`BufferSink::finish`] stores the NUL terminator at the cursor.
///
/// Invariant: `cursor` counts every emitted byte; only the first
/// `dest.len() - 1` of them are stored so the terminator always fits.
#[derive(Debug)]
pub struct BufferSink<'a> {
    dest: &'a mut [u8],
    cursor: usize,
}

impl<'a> BufferSink<'a> {
    /// Start writing at the beginning of `dest`.
    pub fn new(dest: &'a mut [u8]) -> Self {
        Self { dest, cursor: 0 }
    }

    /// Bytes emitted so far (stored or not).
    #[must_use]
    pub fn written(&self) -> usize {
        self.cursor
    }

    /// Bytes the destination can hold before the terminator.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.dest.len().saturating_sub(1)
    }

    /// Write the NUL terminator and report the output length.
    ///
    /// The length excludes the terminator. When the output did not fit, the
    /// stored prefix is terminated and the shortfall is reported instead.
    pub fn finish(self) -> Result<usize, FormatError> {
        if self.dest.is_empty() {
            return Err(FormatError::EmptyBuffer);
        }
        let capacity = self.dest.len();
        let end = self.cursor.min(capacity - 1);
        self.dest[end] = 0;
        if self.cursor < capacity {
            Ok(self.cursor)
        } else {
            Err(FormatError::BufferTooSmall {
                required: self.cursor + 1,
                capacity,
            })
        }
    }
}

impl Sink for BufferSink<'_> {
    fn emit(&mut self, byte: u8) {
        if self.cursor < self.capacity() {
            self.dest[self.cursor] = byte;
        }
        self.cursor += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advances_once_per_byte() {
        let mut buf = [0xffu8; 8];
        let mut sink = BufferSink::new(&mut buf);
        sink.emit_all(b"abc");
        assert_eq!(sink.written(), 3);
        assert_eq!(sink.finish(), Ok(3));
        assert_eq!(&buf[..4], b"abc\0");
        assert_eq!(buf[4], 0xff);
    }

    #[test]
    fn exact_fit_leaves_room_for_terminator() {
        let mut buf = [0u8; 4];
        let mut sink = BufferSink::new(&mut buf);
        sink.emit_all(b"abc");
        assert_eq!(sink.finish(), Ok(3));
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn overflow_truncates_and_reports() {
        let mut buf = [0u8; 4];
        let mut sink = BufferSink::new(&mut buf);
        sink.emit_all(b"abcdef");
        assert_eq!(
            sink.finish(),
            Err(FormatError::BufferTooSmall {
                required: 7,
                capacity: 4
            })
        );
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn empty_destination() {
        let mut buf = [0u8; 0];
        let mut sink = BufferSink::new(&mut buf);
        sink.emit(b'x');
        assert_eq!(sink.finish(), Err(FormatError::EmptyBuffer));
    }

    #[test]
    fn emit_repeat_pads() {
        let mut buf = [0u8; 8];
        let mut sink = BufferSink::new(&mut buf);
        sink.emit_repeat(b'-', 3);
        assert_eq!(sink.finish(), Ok(3));
        assert_eq!(&buf[..4], b"---\0");
    }
}
