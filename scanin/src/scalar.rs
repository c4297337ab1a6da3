//! Literal grammars for the numeric conversions (`%d`, `%u`, `%f`, and friends)

use std::io::BufRead;

use log::*;

use crate::error::{Result, ScanError};
use crate::read_primitives::*;

/// A value read by a single `scanf()`-style conversion:
/// skip leading whitespace, then consume the longest prefix of the input
/// that can still be part of the literal.
pub trait Scan: Sized {
    /// The C name of the type, for error messages.
    const TYPE_NAME: &'static str;

    fn scan<R: BufRead>(r: &mut R) -> Result<Self>;
}

fn is_sign(b: u8) -> bool {
    b == b'+' || b == b'-'
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

// Everything we take is ASCII.
fn ascii_string(bytes: Vec<u8>) -> String {
    bytes.into_iter().map(char::from).collect()
}

/// Reads the sign and digits of an integer, returning (negative, digits).
fn integer_text<R: BufRead>(r: &mut R) -> Result<(bool, String)> {
    skip_whitespace(r)?;
    let negative = match peek_u8(r)? {
        None => return Err(ScanError::Eof),
        Some(b'-') => {
            r.consume(1);
            true
        }
        Some(b'+') => {
            r.consume(1);
            false
        }
        Some(_) => false,
    };

    let mut digits = Vec::new();
    if take_while(r, &mut digits, is_digit)? == 0 {
        return Err(ScanError::unexpected("decimal digits", peek_u8(r)?));
    }
    Ok((negative, ascii_string(digits)))
}

/// Reads the text of a floating-point literal:
/// a decimal number with optional fraction and exponent,
/// or one of `inf`, `infinity`, and `nan` in any case.
fn float_text<R: BufRead>(r: &mut R) -> Result<String> {
    skip_whitespace(r)?;
    let mut text = Vec::new();
    take_if(r, &mut text, is_sign)?;

    match peek_u8(r)? {
        None if text.is_empty() => return Err(ScanError::Eof),
        Some(b) if b.eq_ignore_ascii_case(&b'i') => {
            take_word(r, &mut text, b"inf")?;
            if peek_u8(r)?.map_or(false, |b| b.eq_ignore_ascii_case(&b'i')) {
                take_word(r, &mut text, b"inity")?;
            }
        }
        Some(b) if b.eq_ignore_ascii_case(&b'n') => take_word(r, &mut text, b"nan")?,
        _ => {
            let mut digits = take_while(r, &mut text, is_digit)?;
            if take_if(r, &mut text, |b| b == b'.')? {
                digits += take_while(r, &mut text, is_digit)?;
            }
            if digits == 0 {
                return Err(ScanError::unexpected("a number", peek_u8(r)?));
            }

            if take_if(r, &mut text, |b| b == b'e' || b == b'E')? {
                take_if(r, &mut text, is_sign)?;
                if take_while(r, &mut text, is_digit)? == 0 {
                    return Err(ScanError::unexpected("exponent digits", peek_u8(r)?));
                }
            }
        }
    }
    Ok(ascii_string(text))
}

/// Case-insensitively consumes `word`, byte by byte.
fn take_word<R: BufRead>(r: &mut R, text: &mut Vec<u8>, word: &[u8]) -> Result<()> {
    for &expected in word {
        if !take_if(r, text, |b| b.eq_ignore_ascii_case(&expected))? {
            return Err(ScanError::unexpected("\"inf\" or \"nan\"", peek_u8(r)?));
        }
    }
    Ok(())
}

macro_rules! scan_signed {
    ($($t:ty => $name:expr),*) => {$(
        impl Scan for $t {
            const TYPE_NAME: &'static str = $name;

            fn scan<R: BufRead>(r: &mut R) -> Result<Self> {
                let (negative, digits) = integer_text(r)?;
                let text = if negative {
                    format!("-{}", digits)
                } else {
                    digits
                };
                let value: Self = text.parse().map_err(|_| ScanError::OutOfRange {
                    type_name: Self::TYPE_NAME,
                    text,
                })?;
                trace!("Scanned {} {}", Self::TYPE_NAME, value);
                Ok(value)
            }
        }
    )*};
}

// Like strtoul(), a leading minus sign negates modulo 2^N,
// so "-1" reads as the type's maximum.
macro_rules! scan_unsigned {
    ($($t:ty => $name:expr),*) => {$(
        impl Scan for $t {
            const TYPE_NAME: &'static str = $name;

            fn scan<R: BufRead>(r: &mut R) -> Result<Self> {
                let (negative, digits) = integer_text(r)?;
                let magnitude: $t = match digits.parse() {
                    Ok(m) => m,
                    Err(_) => {
                        let text = if negative {
                            format!("-{}", digits)
                        } else {
                            digits
                        };
                        return Err(ScanError::OutOfRange {
                            type_name: Self::TYPE_NAME,
                            text,
                        });
                    }
                };
                let value = if negative {
                    magnitude.wrapping_neg()
                } else {
                    magnitude
                };
                trace!("Scanned {} {}", Self::TYPE_NAME, value);
                Ok(value)
            }
        }
    )*};
}

macro_rules! scan_float {
    ($($t:ty => $name:expr),*) => {$(
        impl Scan for $t {
            const TYPE_NAME: &'static str = $name;

            fn scan<R: BufRead>(r: &mut R) -> Result<Self> {
                let text = float_text(r)?;
                // float_text() only takes a subset of what str::parse() accepts,
                // and out-of-range values parse as infinity.
                let value: Self = text
                    .parse()
                    .expect("float_text() produced a literal str::parse() rejects");
                trace!("Scanned {} {}", Self::TYPE_NAME, value);
                Ok(value)
            }
        }
    )*};
}

// long and long long share i64 (and their unsigned versions, u64),
// so errors name the shorter spelling.
scan_signed!(i16 => "short", i32 => "int", i64 => "long");
scan_unsigned!(
    u8 => "unsigned char",
    u16 => "unsigned short",
    u32 => "unsigned int",
    u64 => "unsigned long"
);
scan_float!(f32 => "float", f64 => "double");

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all<T: Scan>(input: &[u8]) -> (Result<T>, &[u8]) {
        let mut r = input;
        let res = T::scan(&mut r);
        (res, r)
    }

    #[test]
    fn integers_stop_at_first_non_digit() {
        let (v, rest) = scan_all::<i32>(b"  \n-17abc");
        assert_eq!(v.unwrap(), -17);
        assert_eq!(rest, b"abc");

        let (v, rest) = scan_all::<i64>(b"+0042 7");
        assert_eq!(v.unwrap(), 42);
        assert_eq!(rest, b" 7");
    }

    #[test]
    fn integer_limits() {
        assert_eq!(scan_all::<i16>(b"-32768").0.unwrap(), i16::MIN);
        assert_eq!(scan_all::<i16>(b"32767").0.unwrap(), i16::MAX);
        assert_eq!(scan_all::<i64>(b"-9223372036854775808").0.unwrap(), i64::MIN);
        assert_eq!(scan_all::<u64>(b"18446744073709551615").0.unwrap(), u64::MAX);
        assert_eq!(scan_all::<u8>(b"255").0.unwrap(), 255);
    }

    #[test]
    fn out_of_range_consumes_digits() {
        let (v, rest) = scan_all::<i16>(b"40000 next");
        match v {
            Err(ScanError::OutOfRange { type_name, text }) => {
                assert_eq!(type_name, "short");
                assert_eq!(text, "40000");
            }
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
        assert_eq!(rest, b" next");

        let (v, _) = scan_all::<u8>(b"-256");
        match v {
            Err(ScanError::OutOfRange { text, .. }) => assert_eq!(text, "-256"),
            other => panic!("Expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn unsigned_negation_wraps() {
        assert_eq!(scan_all::<u32>(b"-1").0.unwrap(), u32::MAX);
        assert_eq!(scan_all::<u16>(b"-2").0.unwrap(), u16::MAX - 1);
        assert_eq!(scan_all::<u8>(b"-0").0.unwrap(), 0);
    }

    #[test]
    fn sign_without_digits() {
        let (v, rest) = scan_all::<i32>(b"-x");
        match v {
            Err(ScanError::Mismatch { found, .. }) => assert_eq!(found, b'x'),
            other => panic!("Expected Mismatch, got {:?}", other),
        }
        // Like scanf(), the sign is gone.
        assert_eq!(rest, b"x");

        assert!(scan_all::<i32>(b"+").0.unwrap_err().is_eof());
    }

    #[test]
    fn non_numeric_text_is_left_alone() {
        let (v, rest) = scan_all::<u64>(b"  hello");
        assert!(matches!(v, Err(ScanError::Mismatch { found: b'h', .. })));
        assert_eq!(rest, b"hello");

        let (v, rest) = scan_all::<f64>(b"\t.e5");
        assert!(matches!(v, Err(ScanError::Mismatch { found: b'e', .. })));
        assert_eq!(rest, b"e5");
    }

    #[test]
    fn whitespace_only_is_eof() {
        assert!(scan_all::<i32>(b"").0.unwrap_err().is_eof());
        assert!(scan_all::<u16>(b" \n\t").0.unwrap_err().is_eof());
        assert!(scan_all::<f32>(b"\n\n").0.unwrap_err().is_eof());
    }

    #[test]
    fn float_forms() {
        assert_eq!(scan_all::<f64>(b"3.25").0.unwrap(), 3.25);
        assert_eq!(scan_all::<f64>(b"-.5").0.unwrap(), -0.5);
        assert_eq!(scan_all::<f64>(b"7.").0.unwrap(), 7.0);
        assert_eq!(scan_all::<f64>(b"1e3").0.unwrap(), 1000.0);
        assert_eq!(scan_all::<f64>(b"2.5E-2").0.unwrap(), 0.025);
        assert_eq!(scan_all::<f32>(b"0.1").0.unwrap(), 0.1f32);
        assert_eq!(scan_all::<f32>(b"42").0.unwrap(), 42.0);
    }

    #[test]
    fn float_stops_at_first_non_literal_byte() {
        let (v, rest) = scan_all::<f64>(b"1.5.5");
        assert_eq!(v.unwrap(), 1.5);
        assert_eq!(rest, b".5");

        let (v, rest) = scan_all::<f64>(b"6e+x");
        assert!(matches!(v, Err(ScanError::Mismatch { found: b'x', .. })));
        assert_eq!(rest, b"x");
    }

    #[test]
    fn float_words() {
        assert_eq!(scan_all::<f64>(b"inf").0.unwrap(), f64::INFINITY);
        assert_eq!(scan_all::<f64>(b"-Infinity").0.unwrap(), f64::NEG_INFINITY);
        assert!(scan_all::<f32>(b"NaN").0.unwrap().is_nan());

        let (v, rest) = scan_all::<f64>(b"INF rest");
        assert_eq!(v.unwrap(), f64::INFINITY);
        assert_eq!(rest, b" rest");

        let (v, rest) = scan_all::<f64>(b"infinite");
        assert!(matches!(v, Err(ScanError::Mismatch { found: b'e', .. })));
        assert_eq!(rest, b"e");

        assert!(matches!(
            scan_all::<f64>(b"nope").0,
            Err(ScanError::Mismatch { found: b'o', .. })
        ));
    }

    #[test]
    fn every_float_form_parses() {
        let forms: &[&[u8]] = &[
            b"0", b"+1", b"-2.", b".3", b"+.4e5", b"-6E-7", b"8e+09", b"inf", b"-INF",
            b"+Infinity", b"nan", b"-NaN",
        ];
        for form in forms {
            assert!(scan_all::<f64>(form).0.is_ok());
            assert!(scan_all::<f32>(form).0.is_ok());
        }
    }

    #[test]
    fn errors_use_c_type_names() {
        let (v, _) = scan_all::<u32>(b"4294967296");
        assert_eq!(
            v.unwrap_err().to_string(),
            "4294967296 is out of range for unsigned int"
        );
        assert_eq!(<i64 as Scan>::TYPE_NAME, "long");
        assert_eq!(<f32 as Scan>::TYPE_NAME, "float");
    }

    #[test]
    fn float_overflow_is_infinite() {
        assert_eq!(scan_all::<f32>(b"1e40").0.unwrap(), f32::INFINITY);
        assert_eq!(scan_all::<f64>(b"-1e400").0.unwrap(), f64::NEG_INFINITY);
    }
}
