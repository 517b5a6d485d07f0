//! printf format interpreter.
//!
//! A single-pass state machine over the format bytes. Literal bytes are
//! emitted as they are scanned; each `%` starts a directive whose flags,
//! width, precision and length modifiers accumulate until a conversion byte
//! dispatches to a renderer.
//!
//! Accepted syntax: `%[-][0][width|*][.precision|*][l[l]]{c|s|d|u|o|p|x|f|%}`.
//! A directive ending in any other byte emits a literal `%` and rescans
//! everything after that `%` as ordinary text.
//!
//! The format string ends at its slice end or at the first NUL byte.

use super::args::{Arg, ArgCursor, Length};
use super::float::{FloatBits, Real, render_float};
use super::num::render_uint;
use super::sink::Sink;
use crate::string::strnlen;

// ---------------------------------------------------------------------------
// Directive state
// ---------------------------------------------------------------------------

/// Conversion selected by the final byte of a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Char,
    Str,
    Signed,
    Unsigned,
    Octal,
    Pointer,
    Hex,
    Float,
    Percent,
}

impl Conversion {
    /// Map a conversion byte; `None` means the directive is not recognized
    /// and degrades to literal output.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            b'c' => Self::Char,
            b's' => Self::Str,
            b'd' => Self::Signed,
            b'u' => Self::Unsigned,
            b'o' => Self::Octal,
            b'p' => Self::Pointer,
            b'x' => Self::Hex,
            b'f' => Self::Float,
            b'%' => Self::Percent,
            _ => return None,
        })
    }
}

/// Per-directive parse state, reset at every `%`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSpec {
    pub left_justify: bool, // '-'
    pub zero_pad: bool,     // '0'
    /// `#`: parsed, not used by any conversion.
    pub alternate: bool,
    /// Minimum field width. `Some(0)` records a `.` seen before any width.
    pub width: Option<i32>,
    pub precision: Option<i32>,
    /// Number of `l` modifiers seen.
    pub length_level: u32,
}

impl ConversionSpec {
    /// Byte used to fill up to the field width ahead of the value.
    #[must_use]
    pub const fn pad_byte(&self) -> u8 {
        if self.zero_pad && !self.left_justify {
            b'0'
        } else {
            b' '
        }
    }

    /// Width as a padding target; unset and negative widths pad nothing.
    #[must_use]
    pub fn pad_width(&self) -> usize {
        self.width.map_or(0, |w| w.max(0) as usize)
    }

    #[must_use]
    pub const fn length(&self) -> Length {
        Length::from_level(self.length_level)
    }

    fn width_unset(&self) -> bool {
        self.width.is_none_or(|w| w < 0)
    }

    /// A number just read lands in `precision`; it becomes the width unless
    /// a width (or the `.` marker) is already present.
    fn settle_number(&mut self) {
        if self.width_unset() {
            self.width = self.precision.take();
        }
    }
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

#[inline]
fn byte_at(fmt: &[u8], pos: usize) -> u8 {
    fmt.get(pos).copied().unwrap_or(0)
}

/// Interpret `fmt` against `args`, emitting every output byte through `sink`.
///
/// Arguments are consumed in order; missing ones read as zero or null.
pub fn vformat<S: Sink + ?Sized>(sink: &mut S, fmt: &[u8], args: &[Arg<'_>]) {
    let mut args = ArgCursor::new(args);
    let mut pos = 0usize;

    loop {
        loop {
            match byte_at(fmt, pos) {
                0 => return,
                b'%' => break,
                ch => {
                    pos += 1;
                    sink.emit(ch);
                }
            }
        }
        pos += 1;

        let restart = pos;
        let mut spec = ConversionSpec::default();
        loop {
            let ch = byte_at(fmt, pos);
            pos += 1;
            match ch {
                b'-' => spec.left_justify = true,
                b'0' => spec.zero_pad = true,
                b'1'..=b'9' => {
                    let mut n = i32::from(ch - b'0');
                    while let d @ b'0'..=b'9' = byte_at(fmt, pos) {
                        n = n.wrapping_mul(10).wrapping_add(i32::from(d - b'0'));
                        pos += 1;
                    }
                    spec.precision = Some(n);
                    spec.settle_number();
                }
                b'*' => {
                    spec.precision = Some(args.int(Length::Int) as i32);
                    spec.settle_number();
                }
                b'.' => {
                    if spec.width_unset() {
                        spec.width = Some(0);
                    }
                }
                b'#' => spec.alternate = true,
                b'l' => spec.length_level += 1,
                _ => {
                    match Conversion::from_byte(ch) {
                        Some(conv) => convert(sink, conv, &mut spec, &mut args),
                        None => {
                            sink.emit(b'%');
                            pos = restart;
                        }
                    }
                    break;
                }
            }
        }
    }
}

fn convert<S: Sink + ?Sized>(
    sink: &mut S,
    conv: Conversion,
    spec: &mut ConversionSpec,
    args: &mut ArgCursor<'_, '_>,
) {
    match conv {
        Conversion::Char => sink.emit(args.int(Length::Int) as u8),
        Conversion::Str => format_str(sink, args.string(), spec),
        Conversion::Signed => {
            let value = args.int(spec.length());
            if value < 0 {
                sink.emit(b'-');
            }
            format_number(sink, value.unsigned_abs(), 10, spec);
        }
        Conversion::Unsigned => format_number(sink, args.uint(spec.length()), 10, spec),
        Conversion::Octal => format_number(sink, args.uint(spec.length()), 8, spec),
        Conversion::Pointer => {
            spec.length_level = 1;
            sink.emit_all(b"0x");
            format_number(sink, args.uint(spec.length()), 16, spec);
        }
        Conversion::Hex => format_number(sink, args.uint(spec.length()), 16, spec),
        Conversion::Float => {
            let value = Real::from_f64(args.double());
            render_float(sink, value, spec.pad_width(), spec.precision);
        }
        Conversion::Percent => sink.emit(b'%'),
    }
}

/// Render an unsigned magnitude with the directive's padding.
fn format_number<S: Sink + ?Sized>(sink: &mut S, value: u64, base: u32, spec: &ConversionSpec) {
    let width = spec.pad_width();
    let digits = render_uint(sink, value, base, width, spec.pad_byte(), !spec.left_justify);
    if spec.left_justify {
        sink.emit_repeat(b' ', width.saturating_sub(digits));
    }
}

/// Render a string argument; a null pointer renders as `(null)`.
///
/// Precision caps the bytes taken from the string. Width pads ahead of the
/// text with the pad byte, or after it with spaces when left-justified.
fn format_str<S: Sink + ?Sized>(sink: &mut S, s: Option<&[u8]>, spec: &ConversionSpec) {
    let s = s.unwrap_or(b"(null)");
    let mut width = i64::from(spec.width.unwrap_or(-1));
    let mut remaining = spec.precision.filter(|&p| p >= 0).map(|p| p as usize);

    if width > 0 && !spec.left_justify {
        width -= strnlen(s, remaining.unwrap_or(usize::MAX)) as i64;
        while width > 0 {
            sink.emit(spec.pad_byte());
            width -= 1;
        }
    }
    for &ch in s.iter().take_while(|&&ch| ch != 0) {
        if let Some(left) = remaining.as_mut() {
            if *left == 0 {
                break;
            }
            *left -= 1;
        }
        sink.emit(ch);
        width -= 1;
    }
    while width > 0 {
        sink.emit(b' ');
        width -= 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::stdio::BufferSink;

    fn fmt(format: &str, args: &[Arg<'_>]) -> String {
        let mut buf = [0u8; 512];
        let mut sink = BufferSink::new(&mut buf);
        vformat(&mut sink, format.as_bytes(), args);
        let n = sink.finish().unwrap();
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn test_literal_passthrough() {
        assert_eq!(fmt("hello, world\n", &[]), "hello, world\n");
        assert_eq!(fmt("", &[]), "");
    }

    #[test]
    fn test_stops_at_nul() {
        assert_eq!(fmt("abc\0def", &[]), "abc");
    }

    #[test]
    fn test_conversion_from_byte() {
        assert_eq!(Conversion::from_byte(b'd'), Some(Conversion::Signed));
        assert_eq!(Conversion::from_byte(b'p'), Some(Conversion::Pointer));
        assert_eq!(Conversion::from_byte(b'X'), None);
        assert_eq!(Conversion::from_byte(b'i'), None);
    }

    #[test]
    fn test_signed() {
        assert_eq!(fmt("%d", &args![42]), "42");
        assert_eq!(fmt("%d", &args![-123]), "-123");
        assert_eq!(fmt("%d", &args![0]), "0");
        assert_eq!(fmt("%lld", &args![i64::MIN]), "-9223372036854775808");
    }

    #[test]
    fn test_int_class_truncates() {
        assert_eq!(fmt("%d", &args![0x1_0000_0007i64]), "7");
        assert_eq!(fmt("%u", &args![-1]), "4294967295");
        assert_eq!(fmt("%llu", &args![-1]), "18446744073709551615");
    }

    #[test]
    fn test_width_padding() {
        assert_eq!(fmt("%5d", &args![3]), "    3");
        assert_eq!(fmt("%-5d|", &args![3]), "3    |");
        assert_eq!(fmt("%05d", &args![3]), "00003");
        assert_eq!(fmt("%-05d|", &args![3]), "3    |");
        assert_eq!(fmt("%2d", &args![12345]), "12345");
    }

    #[test]
    fn test_sign_precedes_padding() {
        assert_eq!(fmt("%5d", &args![-3]), "-    3");
        assert_eq!(fmt("%05d", &args![-3]), "-00003");
    }

    #[test]
    fn test_star_width() {
        assert_eq!(fmt("%*d", &args![4, 7]), "   7");
        assert_eq!(fmt("%*d|", &args![-4, 7]), "7|");
    }

    #[test]
    fn test_unsigned_bases() {
        assert_eq!(fmt("%u", &args![4000000000u32]), "4000000000");
        assert_eq!(fmt("%o", &args![8]), "10");
        assert_eq!(fmt("%x", &args![255]), "ff");
        assert_eq!(fmt("%08x", &args![0xbeefu32]), "0000beef");
        assert_eq!(fmt("%llx", &args![0xdead_beef_cafeu64]), "deadbeefcafe");
    }

    #[test]
    fn test_pointer() {
        assert_eq!(fmt("%p", &args![0x1000 as *const u8]), "0x1000");
        assert_eq!(fmt("%p", &args![0usize]), "0x0");
    }

    #[test]
    fn test_char() {
        assert_eq!(fmt("%c%c", &args!['o', 'k']), "ok");
        assert_eq!(fmt("%c", &args![0x141]), "A");
    }

    #[test]
    fn test_string() {
        assert_eq!(fmt("%s", &args!["hello"]), "hello");
        assert_eq!(fmt("%s", &args![None::<&str>]), "(null)");
        assert_eq!(fmt("[%8s]", &args!["abc"]), "[     abc]");
        assert_eq!(fmt("[%-8s]", &args!["abc"]), "[abc     ]");
        assert_eq!(fmt("[%.2s]", &args!["abcdef"]), "[ab]");
        assert_eq!(fmt("[%6.2s]", &args!["abcdef"]), "[    ab]");
        assert_eq!(fmt("[%-6.2s]", &args!["abcdef"]), "[ab    ]");
        assert_eq!(fmt("[%2s]", &args!["abcdef"]), "[abcdef]");
    }

    #[test]
    fn test_string_stops_at_embedded_nul() {
        assert_eq!(fmt("[%s]", &args![b"ab\0cd".as_slice()]), "[ab]");
    }

    #[test]
    fn test_float() {
        assert_eq!(fmt("%.2f", &args![3.14159]), "3.14");
        assert_eq!(fmt("%f", &args![0.5]), "0.500000");
        assert_eq!(fmt("%f", &args![f64::INFINITY]), "Infinity");
        assert_eq!(fmt("%f", &args![f64::NEG_INFINITY]), "-Infinity");
        assert_eq!(fmt("%f", &args![f64::NAN]), "NaN");
    }

    #[test]
    fn test_float_precision_past_cap() {
        #[cfg(feature = "double-float")]
        assert_eq!(fmt("%.25f", &args![0.5]), "0.5000000000000000000");
        assert_eq!(fmt("%.25f", &args![0.123]), fmt("%.19f", &args![0.123]));
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt("100%%", &[]), "100%");
        assert_eq!(fmt("%-%", &[]), "%");
    }

    #[test]
    fn test_unknown_conversion_rescans_as_literal() {
        assert_eq!(fmt("%q", &[]), "%q");
        assert_eq!(fmt("%5q!", &[]), "%5q!");
        assert_eq!(fmt("a%zb%d", &args![1]), "a%zb1");
    }

    #[test]
    fn test_trailing_percent() {
        assert_eq!(fmt("50%", &[]), "50%");
        assert_eq!(fmt("x%-", &[]), "x%-");
    }

    #[test]
    fn test_alternate_flag_is_inert() {
        assert_eq!(fmt("%#x", &args![255]), "ff");
    }

    #[test]
    fn test_settle_number() {
        let mut spec = ConversionSpec {
            precision: Some(5),
            ..Default::default()
        };
        spec.settle_number();
        assert_eq!(spec.width, Some(5));
        assert_eq!(spec.precision, None);

        let mut spec = ConversionSpec {
            width: Some(0),
            precision: Some(3),
            ..Default::default()
        };
        spec.settle_number();
        assert_eq!(spec.width, Some(0));
        assert_eq!(spec.precision, Some(3));
    }

    #[test]
    fn test_pad_byte() {
        let spec = ConversionSpec {
            zero_pad: true,
            left_justify: true,
            ..Default::default()
        };
        assert_eq!(spec.pad_byte(), b' ');
        let spec = ConversionSpec {
            zero_pad: true,
            ..Default::default()
        };
        assert_eq!(spec.pad_byte(), b'0');
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(fmt("%d %s", &[]), "0 (null)");
    }
}
