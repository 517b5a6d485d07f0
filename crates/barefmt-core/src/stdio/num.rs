//! Integer rendering in an arbitrary base.

use super::sink::Sink;

/// Digit slots needed for the widest integer in the smallest base (binary).
pub const DIGIT_CAPACITY: usize = u64::BITS as usize;

/// Map a digit value to its glyph: `0-9`, then lowercase `a-z`.
#[inline]
pub(crate) fn digit_glyph(digit: u8) -> u8 {
    if digit < 10 {
        b'0' + digit
    } else {
        b'a' + (digit - 10)
    }
}

/// Render `value` in `base` through `sink`.
///
/// Digits are collected least-significant first and emitted most-significant
/// first. When `apply_padding` is set and fewer than `width` digits were
/// produced, `pad` is emitted `width - digits` times before them. No sign is
/// ever emitted. Returns the number of digits.
///
/// `base` must lie in `2..=36`; this is a caller precondition.
pub fn render_uint<S: Sink + ?Sized>(
    sink: &mut S,
    mut value: u64,
    base: u32,
    width: usize,
    pad: u8,
    apply_padding: bool,
) -> usize {
    debug_assert!((2..=36).contains(&base), "base {base} out of range");
    let base = u64::from(base);
    let mut digits = [0u8; DIGIT_CAPACITY];
    let mut count = 0;

    loop {
        digits[count] = (value % base) as u8;
        count += 1;
        if value < base {
            break;
        }
        value /= base;
    }

    if apply_padding {
        sink.emit_repeat(pad, width.saturating_sub(count));
    }
    for &d in digits[..count].iter().rev() {
        sink.emit(digit_glyph(d));
    }
    count
}
