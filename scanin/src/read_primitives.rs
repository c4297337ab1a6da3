//! Byte-level helpers for scanning text out of a buffered reader
use std::io::{BufRead, ErrorKind, Result};

/// C's `isspace()` in the "C" locale. Unlike `u8::is_ascii_whitespace`,
/// this includes vertical tab.
#[inline]
pub fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Returns the next byte of the provided reader without consuming it,
/// or `None` at the end of input.
#[inline]
pub fn peek_u8<R: BufRead>(r: &mut R) -> Result<Option<u8>> {
    loop {
        match r.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Reads a byte from the front of the provided reader
#[inline]
pub fn read_u8<R: BufRead>(r: &mut R) -> Result<Option<u8>> {
    let next = peek_u8(r)?;
    if next.is_some() {
        r.consume(1);
    }
    Ok(next)
}

/// Consumes leading whitespace, returning how many bytes were skipped.
pub fn skip_whitespace<R: BufRead>(r: &mut R) -> Result<usize> {
    let mut skipped = 0;
    while let Some(b) = peek_u8(r)? {
        if !is_c_space(b) {
            break;
        }
        r.consume(1);
        skipped += 1;
    }
    Ok(skipped)
}

/// Consumes the next byte into `out` if it satisfies `pred`.
#[inline]
pub fn take_if<R, F>(r: &mut R, out: &mut Vec<u8>, pred: F) -> Result<bool>
where
    R: BufRead,
    F: Fn(u8) -> bool,
{
    match peek_u8(r)? {
        Some(b) if pred(b) => {
            r.consume(1);
            out.push(b);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Consumes bytes into `out` as long as they satisfy `pred`,
/// returning how many were taken.
pub fn take_while<R, F>(r: &mut R, out: &mut Vec<u8>, pred: F) -> Result<usize>
where
    R: BufRead,
    F: Fn(u8) -> bool,
{
    let mut taken = 0;
    while take_if(r, out, &pred)? {
        taken += 1;
    }
    Ok(taken)
}

/// Reads up to `max` bytes, stopping after the first newline (which is kept).
///
/// This is `fgets()` minus the NUL terminator: anything past the limit
/// stays in the reader for the next call.
pub fn read_line_limited<R: BufRead>(r: &mut R, max: usize) -> Result<Vec<u8>> {
    let mut line = Vec::new();
    while line.len() < max {
        let buf = match r.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if buf.is_empty() {
            break;
        }

        let window = &buf[..buf.len().min(max - line.len())];
        let (used, done) = match window.iter().position(|&b| b == b'\n') {
            Some(newline) => (newline + 1, true),
            None => (window.len(), false),
        };
        line.extend_from_slice(&window[..used]);
        r.consume(used);
        if done {
            break;
        }
    }
    Ok(line)
}
