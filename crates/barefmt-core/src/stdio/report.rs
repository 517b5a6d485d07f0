//! End-of-run counter report.
//!
//! Each non-zero counter becomes one `"<name> = <value>\n"` line. All lines
//! are formatted into a single stack buffer and handed to the device in one
//! unbuffered write.

use super::device::{DeviceSink, DeviceWrite};
use super::format_to_buffer;
use crate::error::FormatError;

/// Counters a single report can carry.
pub const MAX_COUNTERS: usize = 2;

/// Report bytes reserved per counter line.
pub const LINE_BUDGET: usize = 32;

/// A named event count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter<'a> {
    pub name: &'a str,
    pub value: u64,
}

impl<'a> Counter<'a> {
    #[must_use]
    pub const fn new(name: &'a str, value: u64) -> Self {
        Self { name, value }
    }
}

/// Write the report for the first [`MAX_COUNTERS`] counters.
///
/// Zero-valued counters are skipped. A line that does not fit in what is left
/// of the buffer is cut short and ends the report. Returns the number of
/// bytes written to the device; nothing is written when every counter is 0.
pub fn write_counter_report<D: DeviceWrite, const N: usize>(
    sink: &mut DeviceSink<D, N>,
    counters: &[Counter<'_>],
) -> usize {
    let mut text = [0u8; MAX_COUNTERS * LINE_BUDGET];
    let mut len = 0;

    for counter in counters.iter().take(MAX_COUNTERS).filter(|c| c.value != 0) {
        let args = crate::args![counter.name, counter.value];
        match format_to_buffer(&mut text[len..], b"%s = %ld\n", &args) {
            Ok(n) => len += n,
            Err(FormatError::BufferTooSmall { capacity, .. }) => {
                len += capacity - 1;
                break;
            }
            Err(FormatError::EmptyBuffer) => break,
        }
    }

    if len > 0 {
        sink.print_str(&text[..len]);
    }
    len
}
