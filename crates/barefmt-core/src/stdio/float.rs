//! `%f` rendering without a float-to-decimal library.
//!
//! Values are classified by inspecting their IEEE-754 fields directly. Finite
//! values are split into integral and fractional parts by masking mantissa
//! bits; the integral part is peeled one decimal digit at a time by scaling
//! with `0.1`, and the fractional part is scaled by `10^precision`, truncated
//! and handed to the integer renderer.
//!
//! Limitations, by construction:
//! - at most [`INT_DIGITS_MAX`] integral digits are produced; larger values
//!   lose their most significant digits;
//! - the fraction is truncated, not rounded, and rendered without leading
//!   zeros (`3.0625` at precision 2 renders as `3.6`);
//! - precision 0 cannot be requested: it selects the default of 6;
//! - precision is capped at [`MAX_PRECISION`], the largest power of ten a
//!   `u64` holds, so `%.25f` renders the same digits as `%.19f`.

use core::ops::{Add, Mul, Sub};

use super::num::render_uint;
use super::sink::Sink;

/// Capacity of the integral-part digit buffer.
pub const INT_DIGITS_MAX: usize = 256;

/// Fractional digits rendered when no positive precision is given.
pub const DEFAULT_PRECISION: u32 = 6;

/// Largest fractional digit count; `10^19` is the last power of ten below
/// `u64::MAX`.
pub const MAX_PRECISION: u32 = 19;

/// The floating type `%f` arguments are narrowed to.
#[cfg(feature = "double-float")]
pub type Real = f64;
/// The floating type `%f` arguments are narrowed to.
#[cfg(not(feature = "double-float"))]
pub type Real = f32;

/// Bit-level view of an IEEE-754 binary floating type.
pub trait FloatBits:
    Copy + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    /// Width of the biased exponent field.
    const EXP_BITS: u32;
    /// Width of the stored mantissa field.
    const MANT_BITS: u32;

    const ZERO: Self;
    const HALF: Self;
    const TENTH: Self;
    const TEN: Self;
    /// Added to each peeled digit fraction to absorb `0.1` scaling error.
    const NUDGE: Self;

    fn to_raw(self) -> u64;
    fn from_raw(bits: u64) -> Self;
    fn from_f64(v: f64) -> Self;
    fn from_u64(v: u64) -> Self;
    /// Truncating, saturating conversion.
    fn to_u64(self) -> u64;
}

macro_rules! impl_float_bits {
    ($t:ty, $bits:ty, $exp:expr, $mant:expr) => {
        impl FloatBits for $t {
            const EXP_BITS: u32 = $exp;
            const MANT_BITS: u32 = $mant;

            const ZERO: Self = 0.0;
            const HALF: Self = 0.5;
            const TENTH: Self = 0.1;
            const TEN: Self = 10.0;
            const NUDGE: Self = 0.01;

            fn to_raw(self) -> u64 {
                u64::from(self.to_bits())
            }

            fn from_raw(bits: u64) -> Self {
                <$t>::from_bits(bits as $bits)
            }

            fn from_f64(v: f64) -> Self {
                v as $t
            }

            fn from_u64(v: u64) -> Self {
                v as $t
            }

            fn to_u64(self) -> u64 {
                self as u64
            }
        }
    };
}

impl_float_bits!(f32, u32, 8, 23);
impl_float_bits!(f64, u64, 11, 52);

/// Category of a floating value, decided from its bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatClass {
    Finite,
    Nan,
    Infinite { negative: bool },
}

struct Fields {
    negative: bool,
    exponent: u64,
    mantissa: u64,
}

fn fields<F: FloatBits>(value: F) -> Fields {
    let bits = value.to_raw();
    let exp_mask = (1u64 << F::EXP_BITS) - 1;
    let mant_mask = (1u64 << F::MANT_BITS) - 1;
    Fields {
        negative: (bits >> (F::EXP_BITS + F::MANT_BITS)) & 1 == 1,
        exponent: (bits >> F::MANT_BITS) & exp_mask,
        mantissa: bits & mant_mask,
    }
}

/// Classify `value` by its exponent and mantissa fields.
pub fn classify<F: FloatBits>(value: F) -> FloatClass {
    let f = fields(value);
    let exp_all_ones = (1u64 << F::EXP_BITS) - 1;
    if f.exponent != exp_all_ones {
        return FloatClass::Finite;
    }
    if f.mantissa != 0 || value.partial_cmp(&value).is_none() {
        FloatClass::Nan
    } else {
        FloatClass::Infinite {
            negative: f.negative,
        }
    }
}

/// Split a finite value into `(integral, fractional)` parts, both carrying
/// the sign of `value`.
pub fn split<F: FloatBits>(value: F) -> (F, F) {
    let bits = value.to_raw();
    let f = fields(value);
    let bias = ((1u64 << (F::EXP_BITS - 1)) - 1) as i64;
    let exp = f.exponent as i64 - bias;

    if exp < 0 {
        // |value| < 1: the integral part is a zero of the same sign.
        let signed_zero = F::from_raw(bits & (1u64 << (F::EXP_BITS + F::MANT_BITS)));
        return (signed_zero, value);
    }
    if exp >= i64::from(F::MANT_BITS) {
        return (value, F::ZERO);
    }
    let frac_mask = ((1u64 << F::MANT_BITS) - 1) >> exp;
    let integral = F::from_raw(bits & !frac_mask);
    (integral, value - integral)
}

/// Render `value` the way `%f` does.
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`. Finite
/// values render as an optional `-`, the integral digits, `.`, and the
/// truncated fraction scaled by `10^precision`. `width` is forwarded to the
/// integer renderer with padding disabled.
pub fn render_float<S: Sink + ?Sized, F: FloatBits>(
    sink: &mut S,
    value: F,
    width: usize,
    precision: Option<i32>,
) {
    match classify(value) {
        FloatClass::Nan => return sink.emit_all(b"NaN"),
        FloatClass::Infinite { negative: true } => return sink.emit_all(b"-Infinity"),
        FloatClass::Infinite { negative: false } => return sink.emit_all(b"Infinity"),
        FloatClass::Finite => {}
    }

    let precision = match precision {
        Some(p) if p > 0 => (p as u32).min(MAX_PRECISION),
        _ => DEFAULT_PRECISION,
    };

    let magnitude = if value < F::ZERO {
        sink.emit(b'-');
        F::ZERO - value
    } else {
        value
    };

    let (mut integral, fraction) = split(magnitude);

    let mut digits = [0u8; INT_DIGITS_MAX];
    let mut count = 0;
    while integral > F::HALF && count < INT_DIGITS_MAX {
        let (rest, tail) = split(integral * F::TENTH);
        integral = rest;
        let digit = ((tail + F::NUDGE) * F::TEN).to_u64();
        digits[count] = digit.min(9) as u8;
        count += 1;
    }

    if count == 0 {
        sink.emit(b'0');
    } else {
        for &d in digits[..count].iter().rev() {
            sink.emit(b'0' + d);
        }
    }

    sink.emit(b'.');
    let scale = 10u64.pow(precision);
    let frac = (fraction * F::from_u64(scale)).to_u64();
    render_uint(sink, frac, 10, width, 0, false);
}
