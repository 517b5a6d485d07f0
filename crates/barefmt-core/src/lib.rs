//! # barefmt-core
//!
//! Heap-free `printf`-style formatting for environments with no operating
//! system, no allocator and no float-to-string support.
//!
//! A format string is interpreted byte by byte against an ordered argument
//! list, and every output byte is pushed through a [`stdio::Sink`]. Two
//! destinations ship with the crate: a line-buffered device sink
//! ([`stdio::DeviceSink`]) and a NUL-terminated byte buffer
//! ([`stdio::BufferSink`]).
//!
//! ```
//! use barefmt_core::{args, stdio::format_to_buffer};
//!
//! let mut out = [0u8; 32];
//! let n = format_to_buffer(&mut out, b"%s = %5d", &args!["cycles", 42]).unwrap();
//! assert_eq!(&out[..n], b"cycles =    42");
//! assert_eq!(out[n], 0);
//! ```
//!
//! No `unsafe` code is permitted at the crate level.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod error;
pub mod stdio;
pub mod string;

pub use error::FormatError;
pub use stdio::{Arg, DeviceSink, DeviceWrite, Sink};

/// Build a fixed-size argument list from heterogeneous values.
///
/// Every element goes through `Arg::from`, so integers, floats, strings and
/// raw pointers can be mixed freely.
#[macro_export]
macro_rules! args {
    () => {{
        let empty: [$crate::stdio::Arg<'static>; 0] = [];
        empty
    }};
    ($($value:expr),+ $(,)?) => {
        [$($crate::stdio::Arg::from($value)),+]
    };
}
