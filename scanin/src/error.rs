use std::io;

use thiserror::Error;

/// Why a read couldn't produce a value.
///
/// C's `scanf()` reports these as a short return count and leaves the
/// destination untouched. Here each one is a distinct outcome, and the
/// reader's cursor is left wherever consumption stopped.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input ended before the first byte of a value.
    #[error("end of input")]
    Eof,

    /// The next byte can't start (or continue) the expected literal.
    /// It is left in the reader.
    #[error("expected {expected}, found '{}'", .found.escape_ascii())]
    Mismatch { expected: &'static str, found: u8 },

    /// The digits were consumed but don't fit the target type.
    #[error("{text} is out of range for {type_name}")]
    OutOfRange { type_name: &'static str, text: String },

    /// `read_str_n()` needs room for at least the terminator.
    #[error("string reads need a limit of at least one byte")]
    ZeroLimit,

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ScanError {
    /// A matching failure on `next`, or end of input if there is no next byte.
    pub(crate) fn unexpected(expected: &'static str, next: Option<u8>) -> Self {
        match next {
            Some(found) => ScanError::Mismatch { expected, found },
            None => ScanError::Eof,
        }
    }

    /// True for the end of input, which callers looping until EOF
    /// usually want to treat as success.
    pub fn is_eof(&self) -> bool {
        matches!(self, ScanError::Eof)
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = ScanError::Mismatch {
            expected: "decimal digits",
            found: b'x',
        };
        assert_eq!(e.to_string(), "expected decimal digits, found 'x'");

        let e = ScanError::Mismatch {
            expected: "decimal digits",
            found: b'\n',
        };
        assert_eq!(e.to_string(), "expected decimal digits, found '\\n'");

        let e = ScanError::OutOfRange {
            type_name: "short",
            text: "40000".to_owned(),
        };
        assert_eq!(e.to_string(), "40000 is out of range for short");
    }

    #[test]
    fn unexpected_end_is_eof() {
        assert!(ScanError::unexpected("a sign or digits", None).is_eof());
        assert!(!ScanError::unexpected("a sign or digits", Some(b'q')).is_eof());
    }
}
