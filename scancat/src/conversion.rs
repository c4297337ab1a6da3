use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

use anyhow::{anyhow, ensure, Context, Error};
use serde_derive::Serialize;

use scanin::DEFAULT_STR_LEN;

/// One value to read, named after the C type it reads
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Conversion {
    Int,
    Long,
    LongLong,
    Short,
    UnsignedInt,
    UnsignedLong,
    UnsignedLongLong,
    UnsignedShort,
    UnsignedChar,
    Float,
    Double,
    LongDouble,
    Char,
    /// A line of up to N - 1 bytes
    Str(usize),
}

/// What we read, widened just enough to print it
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Signed(i64),
    Unsigned(u64),
    // Keep floats at their own width so 0.1 prints as 0.1
    Float(f32),
    Double(f64),
    Text(String),
}

impl Conversion {
    pub fn read<R: BufRead>(self, r: &mut R) -> scanin::Result<Value> {
        use Conversion::*;

        let v = match self {
            Int => Value::Signed(scanin::read_int(r)?.into()),
            Long => Value::Signed(scanin::read_long(r)?),
            LongLong => Value::Signed(scanin::read_long_long(r)?),
            Short => Value::Signed(scanin::read_short(r)?.into()),
            UnsignedInt => Value::Unsigned(scanin::read_unsigned_int(r)?.into()),
            UnsignedLong => Value::Unsigned(scanin::read_unsigned_long(r)?),
            UnsignedLongLong => Value::Unsigned(scanin::read_unsigned_long_long(r)?),
            UnsignedShort => Value::Unsigned(scanin::read_unsigned_short(r)?.into()),
            UnsignedChar => Value::Unsigned(scanin::read_unsigned_char(r)?.into()),
            Float => Value::Float(scanin::read_float(r)?),
            Double => Value::Double(scanin::read_double(r)?),
            LongDouble => Value::Double(scanin::read_long_double(r)?),
            Char => Value::Text(lossy(vec![scanin::read_char(r)?])),
            Str(n) if n == DEFAULT_STR_LEN => Value::Text(lossy(scanin::read_str(r)?)),
            Str(n) => Value::Text(lossy(scanin::read_str_n(r, n)?)),
        };
        Ok(v)
    }
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8_lossy(&bytes).into_owned()
}

impl FromStr for Conversion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        use Conversion::*;

        let c = match s {
            "int" => Int,
            "long" => Long,
            "longlong" => LongLong,
            "short" => Short,
            "uint" => UnsignedInt,
            "ulong" => UnsignedLong,
            "ulonglong" => UnsignedLongLong,
            "ushort" => UnsignedShort,
            "uchar" => UnsignedChar,
            "float" => Float,
            "double" => Double,
            "longdouble" => LongDouble,
            "char" => Char,
            "str" => Str(DEFAULT_STR_LEN),
            other => {
                let limit = other
                    .strip_prefix("str:")
                    .ok_or_else(|| anyhow!("Unknown conversion {:?}", other))?;
                let limit: usize = limit
                    .parse()
                    .with_context(|| format!("Bad string limit in {:?}", other))?;
                ensure!(limit > 0, "String limit must be at least 1 (got {:?})", other);
                Str(limit)
            }
        };
        Ok(c)
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Conversion::*;

        let name = match self {
            Int => "int",
            Long => "long",
            LongLong => "longlong",
            Short => "short",
            UnsignedInt => "uint",
            UnsignedLong => "ulong",
            UnsignedLongLong => "ulonglong",
            UnsignedShort => "ushort",
            UnsignedChar => "uchar",
            Float => "float",
            Double => "double",
            LongDouble => "longdouble",
            Char => "char",
            Str(n) if *n == DEFAULT_STR_LEN => "str",
            Str(n) => return write!(f, "str:{}", n),
        };
        f.write_str(name)
    }
}
