//! Argument stream.
//!
//! Arguments are supplied as an ordered slice of [`Arg`] values and consumed
//! strictly in order, once. Each argument occupies a 64-bit slot just like a
//! promoted variadic register: integers hold their two's-complement bits,
//! floats their IEEE bits, strings and pointers their address. Reading a slot
//! as a different type reinterprets those bits; reading past the end yields a
//! zero slot.

use core::ffi::{c_long, c_ulong};

/// One type-erased argument value.
///
/// String arguments borrow their bytes; `Str(None)` is the null pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(Option<&'a [u8]>),
    Ptr(usize),
}

impl Arg<'_> {
    /// The raw 64-bit slot for this argument.
    #[must_use]
    pub fn raw(&self) -> u64 {
        match *self {
            Arg::Int(v) => v as u64,
            Arg::Uint(v) => v,
            Arg::Float(v) => v.to_bits(),
            Arg::Str(Some(s)) => s.as_ptr() as usize as u64,
            Arg::Str(None) => 0,
            Arg::Ptr(p) => p as u64,
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty; $($t:ty),+) => {
        $(
            impl From<$t> for Arg<'_> {
                fn from(v: $t) -> Self {
                    Arg::$variant(v as $wide)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64; i8, i16, i32, i64, isize);
impl_from_int!(Uint, u64; u8, u16, u32, u64, usize);

impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<f32> for Arg<'_> {
    fn from(v: f32) -> Self {
        Arg::Float(f64::from(v))
    }
}

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Uint(u64::from(u32::from(c)))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Arg::Str(Some(s.as_slice()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Arg::Str(s.map(str::as_bytes))
    }
}

impl<T> From<*const T> for Arg<'_> {
    fn from(p: *const T) -> Self {
        Arg::Ptr(p as usize)
    }
}

impl<T> From<*mut T> for Arg<'_> {
    fn from(p: *mut T) -> Self {
        Arg::Ptr(p as usize)
    }
}

/// Integer width class selected by the accumulated `l` count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// No modifier: C `int`.
    Int,
    /// `l`: C `long`.
    Long,
    /// `ll` (or more): C `long long`.
    LongLong,
}

impl Length {
    /// Map the number of `l` modifiers seen to a width class.
    #[must_use]
    pub const fn from_level(level: u32) -> Self {
        match level {
            0 => Self::Int,
            1 => Self::Long,
            _ => Self::LongLong,
        }
    }
}

/// Sequential reader over an argument slice.
#[derive(Debug, Clone)]
pub struct ArgCursor<'a, 'b> {
    args: &'b [Arg<'a>],
    next: usize,
}

impl<'a, 'b> ArgCursor<'a, 'b> {
    pub fn new(args: &'b [Arg<'a>]) -> Self {
        Self { args, next: 0 }
    }

    /// Number of arguments consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.next
    }

    fn next_arg(&mut self) -> Option<Arg<'a>> {
        let arg = self.args.get(self.next).copied();
        self.next += 1;
        arg
    }

    fn next_raw(&mut self) -> u64 {
        self.next_arg().map_or(0, |a| a.raw())
    }

    /// Pull a signed integer of the given width class, sign-extended.
    pub fn int(&mut self, length: Length) -> i64 {
        let raw = self.next_raw();
        match length {
            Length::Int => i64::from(raw as u32 as i32),
            Length::Long => raw as c_long as i64,
            Length::LongLong => raw as i64,
        }
    }

    /// Pull an unsigned integer of the given width class, zero-extended.
    pub fn uint(&mut self, length: Length) -> u64 {
        let raw = self.next_raw();
        match length {
            Length::Int => u64::from(raw as u32),
            Length::Long => raw as c_ulong as u64,
            Length::LongLong => raw,
        }
    }

    /// Pull a double-width float.
    pub fn double(&mut self) -> f64 {
        match self.next_arg() {
            Some(Arg::Float(v)) => v,
            other => f64::from_bits(other.map_or(0, |a| a.raw())),
        }
    }

    /// Pull a string pointer. Anything other than a string slot reads as null.
    pub fn string(&mut self) -> Option<&'a [u8]> {
        match self.next_arg() {
            Some(Arg::Str(s)) => s,
            _ => None,
        }
    }
}
