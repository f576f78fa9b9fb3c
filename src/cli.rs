//! Command-line plumbing shared by `mdline` and `semln`.
//!
//! stdout carries data only. Diagnostics go to stderr, either as log events
//! or as the final `<tool>: <component>: <cause>` line:
//!
//! | Outcome | Exit |
//! |---------|------|
//! | stream exhausted | 0 |
//! | downstream closed the pipe | 0 |
//! | any library error | 1 |
//! | bad arguments (clap) | 2 |

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    run, Engine, Error, Filter, FilterConfig, DEFAULT_CHUNK_CAPACITY, MIN_CHUNK_CAPACITY,
};

/// Environment fallback for `--buffer-size`.
pub const BUFFER_SIZE_ENV: &str = "SEMLINE_BUFFER_SIZE";

/// Printed after a locale failure.
pub const LOCALE_HINT: &str = "hint: set the LC_ALL environment variable";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Arguments both tools accept.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Input file; standard input when absent or "-"
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Read chunk size in bytes
    #[arg(
        long,
        value_name = "BYTES",
        env = BUFFER_SIZE_ENV,
        default_value_t = DEFAULT_CHUNK_CAPACITY,
        value_parser = parse_capacity
    )]
    pub buffer_size: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl CommonArgs {
    /// Open the input stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StreamOpen`] if the file can't be opened.
    pub fn open_input(&self) -> crate::Result<Box<dyn Read>> {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                tracing::debug!(path = %path.display(), "opening input");
                let file = File::open(path).map_err(Error::StreamOpen)?;
                Ok(Box::new(file))
            }
            _ => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn parse_capacity(raw: &str) -> Result<usize, String> {
    let capacity: usize = raw.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
    if capacity < MIN_CHUNK_CAPACITY {
        return Err(format!("must be at least {MIN_CHUNK_CAPACITY}"));
    }
    Ok(capacity)
}

/// Default filter directive for a `-v` count.
pub fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(verbose: u8, format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbose)));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
            .try_init()?,
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .try_init()?,
    }
    Ok(())
}

/// Build the engine, open the streams and pump input through the filter
/// made by `make`.
///
/// # Errors
///
/// Any [`Error`] from setup or processing.
pub fn execute<M>(common: &CommonArgs, config: FilterConfig, make: M) -> anyhow::Result<()>
where
    M: FnOnce(&Engine) -> Box<dyn Filter + '_>,
{
    let capacity = config.capacity;
    let engine = Engine::new(config)?;
    let input = common.open_input()?;
    let output = BufWriter::new(io::stdout().lock());

    let mut filter = make(&engine);
    run(filter.as_mut(), input, output, capacity)?;
    Ok(())
}

/// Turn the outcome into an exit status, reporting failures on stderr.
pub fn finish(tool: &str, result: anyhow::Result<()>) -> ExitCode {
    let Err(err) = result else {
        return ExitCode::SUCCESS;
    };

    match err.downcast_ref::<Error>() {
        Some(Error::StreamWrite(source)) if source.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("output closed early");
            return ExitCode::SUCCESS;
        }
        Some(Error::LocaleResolution { .. }) => {
            eprintln!("{tool}: {err:#}");
            eprintln!("{tool}: {LOCALE_HINT}");
        }
        _ => eprintln!("{tool}: {err:#}"),
    }
    ExitCode::FAILURE
}
