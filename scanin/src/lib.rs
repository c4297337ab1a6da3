//! Formatted reads of single values from a byte stream
//!
//! Each function here is one `scanf()` conversion (or one `fgets()` call):
//! it consumes the literal it's asked for from the front of the reader and
//! returns its value. Reads never look further ahead than the buffered reader
//! already has, so whatever follows a value stays put for the next call.
//!
//! The reader is passed explicitly so tests (and anything else) can scan
//! in-memory input. [`stdin`] has the same functions bound to the process's
//! standard input.
//!
//! Integer and floating-point widths follow an LP64 C ABI:
//! `long` and `long long` are both 64 bits, and since Rust has no
//! extended-precision float, `long double` is read as an `f64`.
//!
//! Unlike their C counterparts, these report bad input as a [`ScanError`]
//! instead of leaving the result indeterminate.

use std::io::BufRead;

use log::*;

mod error;
pub mod read_primitives;
mod scalar;
pub mod stdin;

pub use crate::error::{Result, ScanError};
pub use crate::scalar::Scan;

use crate::read_primitives::read_line_limited;

/// The limit used by [`read_str()`]
pub const DEFAULT_STR_LEN: usize = 256;

/// Reads one value of any [`Scan`] type
#[inline]
pub fn scan<T: Scan, R: BufRead>(r: &mut R) -> Result<T> {
    T::scan(r)
}

/// Reads a line of up to [`DEFAULT_STR_LEN`] - 1 bytes
pub fn read_str<R: BufRead>(r: &mut R) -> Result<Vec<u8>> {
    read_str_n(r, DEFAULT_STR_LEN)
}

/// Reads a line like `fgets(buf, n, stream)` would:
/// at most `n - 1` bytes, stopping after the first newline, which is kept.
/// Anything past the limit stays in the reader.
///
/// The C version reserves the last byte for a NUL terminator;
/// here the vector's length marks the end instead.
/// The caller owns the returned buffer.
///
/// `n` must be at least 1. Zero is rejected without reading anything,
/// and 1 (room for only the terminator) returns an empty buffer.
pub fn read_str_n<R: BufRead>(r: &mut R, n: usize) -> Result<Vec<u8>> {
    if n == 0 {
        return Err(ScanError::ZeroLimit);
    }
    if n == 1 {
        return Ok(Vec::new());
    }

    let line = read_line_limited(r, n - 1)?;
    if line.is_empty() {
        return Err(ScanError::Eof);
    }
    trace!("Read {} byte string (limit {})", line.len(), n);
    Ok(line)
}

/// Reads a decimal `int`
#[inline]
pub fn read_int<R: BufRead>(r: &mut R) -> Result<i32> {
    scan(r)
}

/// Reads a decimal `long`
#[inline]
pub fn read_long<R: BufRead>(r: &mut R) -> Result<i64> {
    scan(r)
}

/// Reads a decimal `long long`
#[inline]
pub fn read_long_long<R: BufRead>(r: &mut R) -> Result<i64> {
    scan(r)
}

/// Reads a decimal `short`
#[inline]
pub fn read_short<R: BufRead>(r: &mut R) -> Result<i16> {
    scan(r)
}

/// Reads a decimal `unsigned int`
#[inline]
pub fn read_unsigned_int<R: BufRead>(r: &mut R) -> Result<u32> {
    scan(r)
}

/// Reads a decimal `unsigned long`
#[inline]
pub fn read_unsigned_long<R: BufRead>(r: &mut R) -> Result<u64> {
    scan(r)
}

/// Reads a decimal `unsigned long long`
#[inline]
pub fn read_unsigned_long_long<R: BufRead>(r: &mut R) -> Result<u64> {
    scan(r)
}

/// Reads a decimal `unsigned short`
#[inline]
pub fn read_unsigned_short<R: BufRead>(r: &mut R) -> Result<u16> {
    scan(r)
}

/// Reads an `unsigned char` as a decimal number (`%hhu`), not a character
#[inline]
pub fn read_unsigned_char<R: BufRead>(r: &mut R) -> Result<u8> {
    scan(r)
}

/// Reads a `float`
#[inline]
pub fn read_float<R: BufRead>(r: &mut R) -> Result<f32> {
    scan(r)
}

/// Reads a `double`
#[inline]
pub fn read_double<R: BufRead>(r: &mut R) -> Result<f64> {
    scan(r)
}

/// Reads a `long double`, which is just a `double` here.
#[inline]
pub fn read_long_double<R: BufRead>(r: &mut R) -> Result<f64> {
    scan(r)
}

/// Reads a single byte (`%c`). Whitespace is *not* skipped.
#[inline]
pub fn read_char<R: BufRead>(r: &mut R) -> Result<u8> {
    read_primitives::read_u8(r)?.ok_or(ScanError::Eof)
}
