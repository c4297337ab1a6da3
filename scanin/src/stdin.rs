//! The same reads, from the process's standard input
//!
//! Each call locks stdin for just that read. Since std buffers stdin
//! process-wide, anything a call doesn't consume is still there for the next.
//! Concurrent callers won't tear a single value, but which thread gets which
//! value is anyone's guess. Read from one thread.

use std::io;

use crate::{Result, Scan};

pub fn scan<T: Scan>() -> Result<T> {
    crate::scan(&mut io::stdin().lock())
}

/// Reads a line of up to [`DEFAULT_STR_LEN`](crate::DEFAULT_STR_LEN) - 1 bytes
pub fn read_str() -> Result<Vec<u8>> {
    crate::read_str(&mut io::stdin().lock())
}

/// See [`crate::read_str_n()`]
pub fn read_str_n(n: usize) -> Result<Vec<u8>> {
    crate::read_str_n(&mut io::stdin().lock(), n)
}

pub fn read_int() -> Result<i32> {
    crate::read_int(&mut io::stdin().lock())
}

pub fn read_long() -> Result<i64> {
    crate::read_long(&mut io::stdin().lock())
}

pub fn read_long_long() -> Result<i64> {
    crate::read_long_long(&mut io::stdin().lock())
}

pub fn read_short() -> Result<i16> {
    crate::read_short(&mut io::stdin().lock())
}

pub fn read_unsigned_int() -> Result<u32> {
    crate::read_unsigned_int(&mut io::stdin().lock())
}

pub fn read_unsigned_long() -> Result<u64> {
    crate::read_unsigned_long(&mut io::stdin().lock())
}

pub fn read_unsigned_long_long() -> Result<u64> {
    crate::read_unsigned_long_long(&mut io::stdin().lock())
}

pub fn read_unsigned_short() -> Result<u16> {
    crate::read_unsigned_short(&mut io::stdin().lock())
}

pub fn read_unsigned_char() -> Result<u8> {
    crate::read_unsigned_char(&mut io::stdin().lock())
}

pub fn read_float() -> Result<f32> {
    crate::read_float(&mut io::stdin().lock())
}

pub fn read_double() -> Result<f64> {
    crate::read_double(&mut io::stdin().lock())
}

pub fn read_long_double() -> Result<f64> {
    crate::read_long_double(&mut io::stdin().lock())
}

/// Reads one byte, whitespace included
pub fn read_char() -> Result<u8> {
    crate::read_char(&mut io::stdin().lock())
}
