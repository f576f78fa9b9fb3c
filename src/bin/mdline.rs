//! `mdline`: unwrap soft line breaks.

use std::process::ExitCode;

use clap::Parser;
use semline::cli::{self, CommonArgs};
use semline::{FilterConfig, Locale, Mdline};

/// Join wrapped lines: every run of line breaks becomes one space.
#[derive(Debug, Parser)]
#[command(name = "mdline", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::finish("mdline", try_main(&cli))
}

fn try_main(cli: &Cli) -> anyhow::Result<()> {
    cli::init_tracing(cli.common.verbose, cli.common.log_format)?;
    // No locale-dependent rules here, but an unusable locale is still fatal
    let locale = Locale::resolve(None)?;
    let config = FilterConfig::new(locale).with_capacity(cli.common.buffer_size);
    cli::execute(&cli.common, config, |engine| Box::new(Mdline::new(engine)))
}
