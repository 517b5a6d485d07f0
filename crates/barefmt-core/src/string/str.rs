//! strlen, strnlen, strcmp, strcpy, strcat, atol.

use core::ffi::c_long;

/// Returns the length of a NUL-terminated byte string (not counting the NUL).
///
/// Equivalent to C `strlen`. Scans `s` for the first `0x00` byte and returns
/// its index. If no NUL is found, returns the full slice length.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&b| b == 0).unwrap_or(s.len())
}

/// Returns the length of `s`, scanning at most `n` bytes.
///
/// Equivalent to C `strnlen`.
pub fn strnlen(s: &[u8], n: usize) -> usize {
    let bound = s.len().min(n);
    strlen(&s[..bound])
}

/// Compares two NUL-terminated byte strings.
///
/// Equivalent to C `strcmp`: negative, zero or positive as `s1` sorts before,
/// equal to or after `s2`. The end of a slice counts as a NUL.
pub fn strcmp(s1: &[u8], s2: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let a = s1.get(i).copied().unwrap_or(0);
        let b = s2.get(i).copied().unwrap_or(0);
        if a != b || a == 0 {
            return i32::from(a) - i32::from(b);
        }
        i += 1;
    }
}

/// Copies the string in `src`, NUL included, to the start of `dest`.
///
/// Returns the number of bytes written, or `None` without touching `dest`
/// when it cannot hold the string and its terminator.
pub fn strcpy(dest: &mut [u8], src: &[u8]) -> Option<usize> {
    let len = strlen(src);
    if dest.len() <= len {
        return None;
    }
    dest[..len].copy_from_slice(&src[..len]);
    dest[len] = 0;
    Some(len + 1)
}

/// Appends the string in `src` to the string already in `dest`.
///
/// Returns the new length (not counting the NUL), or `None` without touching
/// `dest` when the result would not fit.
pub fn strcat(dest: &mut [u8], src: &[u8]) -> Option<usize> {
    let start = strlen(dest);
    let len = strlen(src);
    let total = start + len;
    if dest.len() <= total {
        return None;
    }
    dest[start..total].copy_from_slice(&src[..len]);
    dest[total] = 0;
    Some(total)
}

/// Parses a decimal integer the way C `atol` does.
///
/// Leading ASCII whitespace and one `+` or `-` are accepted; parsing stops at
/// the first non-digit. No digits gives 0. Overflow wraps.
pub fn atol(s: &[u8]) -> c_long {
    let s = &s[..strlen(s)];
    let mut i = s.iter().take_while(|b| b.is_ascii_whitespace()).count();
    let negative = match s.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let mut value: c_long = 0;
    for &b in s[i..].iter().take_while(|b| b.is_ascii_digit()) {
        value = value.wrapping_mul(10).wrapping_add(c_long::from(b - b'0'));
    }
    if negative { value.wrapping_neg() } else { value }
}
