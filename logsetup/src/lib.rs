use anyhow::{Context, Result};
use simplelog::*;
use structopt::clap::arg_enum;
use structopt::StructOpt;

arg_enum! {
    #[derive(Debug, Copy, Clone, PartialEq)]
    pub enum Color {
        Auto,
        Always,
        Never
    }
}

/// Logging flags shared by every binary. `#[structopt(flatten)]` these in.
#[derive(Debug, StructOpt)]
pub struct LogArgs {
    /// Verbosity (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    pub verbose: u8,

    #[structopt(short, long, case_insensitive = true, default_value = "auto")]
    #[structopt(name = "always/auto/never")]
    pub color: Color,

    /// Prepend ISO-8601 timestamps to all messages
    /// (from --verbose). Useful for benchmarking.
    #[structopt(short, long, verbatim_doc_comment)]
    pub timestamps: bool,
}

impl LogArgs {
    pub fn init(&self) -> Result<()> {
        init_logger(self.verbose, self.timestamps, self.color)
    }
}

fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn color_choice(color: Color) -> ColorChoice {
    match color {
        Color::Always => ColorChoice::Always,
        Color::Auto => {
            if atty::is(atty::Stream::Stderr) {
                ColorChoice::Auto
            } else {
                ColorChoice::Never
            }
        }
        Color::Never => ColorChoice::Never,
    }
}

/// Set up simplelog to spit messages to stderr.
pub fn init_logger(verbosity: u8, timestamps: bool, color: Color) -> Result<()> {
    let mut builder = ConfigBuilder::new();
    // Shut a bunch of stuff off - we're just spitting to stderr.
    builder.set_location_level(LevelFilter::Trace);
    builder.set_target_level(LevelFilter::Off);
    builder.set_thread_level(LevelFilter::Off);
    if timestamps {
        builder.set_time_format_str("%+");
        builder.set_time_level(LevelFilter::Error);
    } else {
        builder.set_time_level(LevelFilter::Off);
    }

    let level = level_for(verbosity);
    let config = builder.build();

    if cfg!(test) {
        TestLogger::init(level, config).context("Couldn't init test logger")
    } else {
        TermLogger::init(
            level,
            config.clone(),
            TerminalMode::Stderr,
            color_choice(color),
        )
        .or_else(|_| SimpleLogger::init(level, config))
        .context("Couldn't init logger")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(3), LevelFilter::Trace);
        assert_eq!(level_for(200), LevelFilter::Trace);
    }

    #[test]
    fn parses_shared_flags() {
        #[derive(Debug, StructOpt)]
        struct Args {
            #[structopt(flatten)]
            log: LogArgs,
        }

        let args = Args::from_iter(&["test", "-vv", "--color", "NEVER", "-t"]);
        assert_eq!(args.log.verbose, 2);
        assert_eq!(args.log.color, Color::Never);
        assert!(args.log.timestamps);

        let args = Args::from_iter(&["test"]);
        assert_eq!(args.log.verbose, 0);
        assert_eq!(args.log.color, Color::Auto);
        assert!(!args.log.timestamps);
    }

    #[test]
    fn never_means_never() {
        assert!(matches!(color_choice(Color::Never), ColorChoice::Never));
        assert!(matches!(color_choice(Color::Always), ColorChoice::Always));
    }

    #[test]
    fn test_logger_init() {
        // Only one logger per process; a second init just errors.
        let first = init_logger(3, false, Color::Never);
        let second = init_logger(3, false, Color::Never);
        assert!(first.is_ok());
        assert!(second.is_err());
        log::debug!("Logging from tests");
    }
}
