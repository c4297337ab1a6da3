use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, ensure, Context, Result};
use log::*;
use serde_derive::Serialize;
use structopt::StructOpt;

use scanin::read_primitives::read_line_limited;
use scanin::ScanError;

mod conversion;

use crate::conversion::*;

/// Reads values from stdin the way C's scanf() would,
/// printing each as a line of JSON.
///
/// Conversions are named after the C type they read:
///     int long longlong short
///     uint ulong ulonglong ushort uchar
///     float double longdouble
///     char (one byte, whitespace included)
///     str (one line of up to 255 bytes), str:N (up to N - 1 bytes)
#[derive(Debug, StructOpt)]
#[structopt(verbatim_doc_comment)]
struct Args {
    #[structopt(flatten)]
    log: logsetup::LogArgs,

    /// Print failed reads as null and keep going.
    /// The rest of the offending line is skipped.
    #[structopt(short, long, verbatim_doc_comment)]
    keep_going: bool,

    /// Cycle through the conversions until the input runs out
    #[structopt(short, long)]
    repeat: bool,

    /// Read from this file instead of stdin ("-" is also stdin)
    #[structopt(short, long, name = "path")]
    input: Option<PathBuf>,

    /// What to read, in order
    #[structopt(name = "conversion", required = true)]
    conversions: Vec<Conversion>,
}

#[derive(Debug, Copy, Clone, Default)]
struct Options {
    keep_going: bool,
    repeat: bool,
}

#[derive(Debug, Serialize)]
struct Record {
    conversion: String,
    value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    run().unwrap_or_else(|e| {
        error!("{:?}", e);
        std::process::exit(1);
    });
}

fn run() -> Result<()> {
    let start_time = Instant::now();

    let args = Args::from_args();
    args.log.init()?;

    let stdin = io::stdin();

    let mut input: Box<dyn BufRead> = match &args.input {
        None => Box::new(stdin.lock()),
        Some(file) => {
            if file.to_string_lossy() == "-" {
                Box::new(stdin.lock())
            } else {
                Box::new(io::BufReader::new(
                    File::open(file)
                        .with_context(|| format!("Couldn't open {}", file.display()))?,
                ))
            }
        }
    };

    let stdout = io::stdout();
    let mut output = stdout.lock();

    let opts = Options {
        keep_going: args.keep_going,
        repeat: args.repeat,
    };
    let count = scan_all(&args.conversions, &mut input, &mut output, opts)?;
    output.flush().context("Couldn't flush stdout")?;

    info!(
        "Read {} values in {:.3}s",
        count,
        start_time.elapsed().as_secs_f32()
    );
    Ok(())
}

/// Counts the bytes consumed from the inner reader.
struct CountedRead<R> {
    inner: R,
    posit: u64,
}

impl<R: BufRead> CountedRead<R> {
    fn new(inner: R) -> Self {
        Self { inner, posit: 0 }
    }

    fn get_posit(&self) -> u64 {
        self.posit
    }
}

impl<R: BufRead> Read for CountedRead<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.inner.read(buf)?;
        self.posit += count as u64;
        Ok(count)
    }
}

impl<R: BufRead> BufRead for CountedRead<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
        self.posit += amt as u64;
    }
}

/// Reads each conversion in turn (cycling if `opts.repeat`),
/// writing a JSON line per value. Returns how many values were read.
fn scan_all<R: BufRead, W: Write>(
    conversions: &[Conversion],
    r: R,
    w: &mut W,
    opts: Options,
) -> Result<usize> {
    let mut counted = CountedRead::new(r);
    let r = &mut counted;
    let mut count = 0;
    let mut position = 0;

    loop {
        let pass_start = r.get_posit();
        for (i, conversion) in conversions.iter().enumerate() {
            position += 1;
            match conversion.read(r) {
                Ok(value) => {
                    debug!("#{} ({}): {:?}", position, conversion, value);
                    write_record(w, conversion, Some(value), None)?;
                    count += 1;
                }
                Err(ScanError::Eof) => {
                    if opts.repeat && i == 0 {
                        debug!("Input ended after {} full passes", position / conversions.len());
                        return Ok(count);
                    }
                    bail!("Input ended before #{} ({})", position, conversion);
                }
                Err(e @ ScanError::Io(_)) => {
                    return Err(e).with_context(|| format!("Couldn't read #{}", position));
                }
                Err(e) if opts.keep_going => {
                    warn!("Couldn't read #{} ({}): {}", position, conversion, e);
                    write_record(w, conversion, None, Some(e.to_string()))?;
                    if matches!(e, ScanError::Mismatch { .. }) {
                        // Otherwise we'd trip over the same byte forever.
                        let skipped = read_line_limited(r, usize::MAX)?;
                        debug!("Skipped {:?}", String::from_utf8_lossy(&skipped));
                    }
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Couldn't read #{} ({})", position, conversion));
                }
            }
        }

        if !opts.repeat {
            return Ok(count);
        }
        // Say, a lone str:1, which reads nothing and never hits the end.
        ensure!(
            r.get_posit() != pass_start,
            "A full pass through the conversions read no input; stopping after {} values",
            count
        );
    }
}

fn write_record<W: Write>(
    w: &mut W,
    conversion: &Conversion,
    value: Option<Value>,
    error: Option<String>,
) -> Result<()> {
    let record = Record {
        conversion: conversion.to_string(),
        value,
        error,
    };
    serde_json::to_writer(&mut *w, &record)?;
    writeln!(w)?;
    Ok(())
}
