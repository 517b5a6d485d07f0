//! Formatted output.
//!
//! Implements the `printf` family over two destinations: a line-buffered
//! character device and a caller-supplied byte buffer.

pub mod args;
pub mod device;
pub mod float;
pub mod num;
pub mod printf;
pub mod report;
pub mod sink;

pub use args::{Arg, ArgCursor, Length};
pub use device::{DeviceSink, DeviceWrite, LINE_CAPACITY};
pub use float::{FloatBits, FloatClass, MAX_PRECISION, Real, render_float};
pub use num::render_uint;
pub use printf::{Conversion, ConversionSpec, vformat};
pub use report::{Counter, MAX_COUNTERS, write_counter_report};
pub use sink::{BufferSink, Sink};

use crate::error::FormatError;

/// Format to the device behind `sink`.
///
/// Output goes through the sink's line buffer; a trailing partial line stays
/// pending until the next `\n`, a full buffer, or [`DeviceSink::flush`].
/// The return value carries no information and is always 0.
pub fn format_to_device<D: DeviceWrite, const N: usize>(
    sink: &mut DeviceSink<D, N>,
    fmt: &[u8],
    args: &[Arg<'_>],
) -> i32 {
    vformat(sink, fmt, args);
    0
}

/// Format into `dest` and NUL-terminate it.
///
/// Returns the number of bytes produced, excluding the terminator. If the
/// output does not fit, `dest` holds a terminated prefix and the error
/// reports the size that was needed.
pub fn format_to_buffer(
    dest: &mut [u8],
    fmt: &[u8],
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    let mut sink = BufferSink::new(dest);
    vformat(&mut sink, fmt, args);
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[derive(Default)]
    struct Recorder(Vec<Vec<u8>>);

    impl DeviceWrite for Recorder {
        fn write(&mut self, bytes: &[u8]) {
            self.0.push(bytes.to_vec());
        }
    }

    #[test]
    fn device_output_is_line_batched() {
        let mut sink: DeviceSink<Recorder> = DeviceSink::new(Recorder::default());
        assert_eq!(format_to_device(&mut sink, b"a=%d\nb=", &args![1]), 0);
        assert_eq!(sink.device().0, vec![b"a=1\n".to_vec()]);
        assert_eq!(sink.pending(), b"b=");
    }

    #[test]
    fn buffer_length_excludes_terminator() {
        let mut out = [0xaau8; 16];
        let n = format_to_buffer(&mut out, b"%x-%o", &args![255, 8]).unwrap();
        assert_eq!(n, 5);
        assert_eq!(&out[..6], b"ff-10\0");
    }

    #[test]
    fn buffer_overflow_is_reported() {
        let mut out = [0u8; 4];
        let err = format_to_buffer(&mut out, b"%d", &args![123456]).unwrap_err();
        assert_eq!(err.required(), 7);
        assert_eq!(&out, b"123\0");
    }
}
