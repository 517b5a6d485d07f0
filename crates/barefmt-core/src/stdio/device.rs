//! Line-buffered character-device output.
//!
//! The device itself is an external collaborator reached through
//! [`DeviceWrite`]. [`DeviceSink`] owns the line buffer in front of it, so
//! every execution context that formats to the device holds its own buffer
//! and nothing is shared behind the caller's back.

use super::num::render_uint;
use super::sink::{BufferSink, Sink};
use crate::string::strlen;

/// Line-buffer capacity used when none is given.
pub const LINE_CAPACITY: usize = 64;

/// Raw write primitive of a character device.
///
/// Writes are treated as atomic and always succeeding; an implementation may
/// block until the device accepts the bytes.
pub trait DeviceWrite {
    fn write(&mut self, bytes: &[u8]);
}

impl<D: DeviceWrite + ?Sized> DeviceWrite for &mut D {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes);
    }
}

/// A [`Sink`] that batches bytes into lines before writing them to a device.
///
/// The buffer is written as one batch when a `\n` is emitted or when it
/// fills. Bytes of an unfinished line stay buffered until [`flush`] is called.
/// With `N == 0` there is no buffer and every byte is written on its own.
///
/// [`flush`]: DeviceSink::flush
#[derive(Debug)]
pub struct DeviceSink<D, const N: usize = LINE_CAPACITY> {
    device: D,
    line: [u8; N],
    len: usize,
}

impl<D: DeviceWrite, const N: usize> DeviceSink<D, N> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            line: [0; N],
            len: 0,
        }
    }

    /// Bytes waiting for the end of their line.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.line[..self.len]
    }

    /// Write out a partially filled line.
    pub fn flush(&mut self) {
        if self.len > 0 {
            self.device.write(&self.line[..self.len]);
            self.len = 0;
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Flush any pending bytes and hand the device back.
    pub fn into_inner(mut self) -> D {
        self.flush();
        self.device
    }

    /// Emit one byte. Always returns 0.
    pub fn putchar(&mut self, byte: u8) -> i32 {
        self.emit(byte);
        0
    }

    /// Write a NUL-terminated string straight to the device, bypassing the
    /// line buffer. Pending bytes are flushed first so output stays in order.
    pub fn print_str(&mut self, s: &[u8]) {
        self.flush();
        let len = strlen(s);
        if len > 0 {
            self.device.write(&s[..len]);
        }
    }

    /// Write `value` as exactly 16 lowercase hex digits.
    pub fn print_hex(&mut self, value: u64) {
        let mut text = [0u8; 17];
        let mut sink = BufferSink::new(&mut text);
        render_uint(&mut sink, value, 16, 16, b'0', true);
        if sink.finish().is_ok() {
            self.print_str(&text);
        }
    }
}

impl<D: DeviceWrite, const N: usize> Sink for DeviceSink<D, N> {
    fn emit(&mut self, byte: u8) {
        if N == 0 {
            return self.device.write(&[byte]);
        }
        self.line[self.len] = byte;
        self.len += 1;
        if byte == b'\n' || self.len == N {
            self.device.write(&self.line[..self.len]);
            self.len = 0;
        }
    }
}
