//! Host-side character devices.

use std::io::Write;

use barefmt_core::DeviceWrite;

/// Device backed by the process's stdout.
///
/// The device contract has no error path, so the first I/O error is kept for
/// the caller and later writes are dropped.
#[derive(Debug, Default)]
pub struct StdoutDevice {
    error: Option<std::io::Error>,
}

impl StdoutDevice {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the first write error, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
}

impl DeviceWrite for StdoutDevice {
    fn write(&mut self, bytes: &[u8]) {
        if self.error.is_some() {
            return;
        }
        let mut out = std::io::stdout().lock();
        if let Err(err) = out.write_all(bytes).and_then(|()| out.flush()) {
            self.error = Some(err);
        }
    }
}

/// Device that records each write as a separate batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CaptureDevice {
    pub batches: Vec<Vec<u8>>,
}

impl CaptureDevice {
    /// All captured bytes in write order.
    #[must_use]
    pub fn bytes(&self) -> Vec<u8> {
        self.batches.concat()
    }
}

impl DeviceWrite for CaptureDevice {
    fn write(&mut self, bytes: &[u8]) {
        self.batches.push(bytes.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barefmt_core::DeviceSink;

    #[test]
    fn capture_keeps_batches() {
        let mut sink: DeviceSink<CaptureDevice> = DeviceSink::new(CaptureDevice::default());
        sink.print_str(b"ab\0");
        sink.putchar(b'\n');
        let dev = sink.into_inner();
        assert_eq!(dev.batches, vec![b"ab".to_vec(), b"\n".to_vec()]);
        assert_eq!(dev.bytes(), b"ab\n");
    }

    #[test]
    fn stdout_device_starts_clean() {
        let mut dev = StdoutDevice::new();
        assert!(dev.take_error().is_none());
    }
}
