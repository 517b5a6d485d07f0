//! C string helpers.
//!
//! Strings are `&[u8]` slices in which a NUL byte (`0x00`) marks the logical
//! end. A slice without a NUL ends at its length.

mod str;

pub use self::str::{atol, strcat, strcmp, strcpy, strlen, strnlen};
