//! `semln`: one sentence per line.

use std::process::ExitCode;

use clap::Parser;
use semline::cli::{self, CommonArgs};
use semline::{FilterConfig, Locale, Semln};

/// Write one sentence per line, with a blank line between paragraphs.
#[derive(Debug, Parser)]
#[command(name = "semln", version, about)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Locale for sentence rules (default: LC_ALL, LC_CTYPE, LANG, then C)
    #[arg(long, value_name = "TAG")]
    locale: Option<String>,

    /// Show whitespace inside sentences as '-'
    #[arg(long)]
    show_whitespace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::finish("semln", try_main(&cli))
}

fn try_main(cli: &Cli) -> anyhow::Result<()> {
    cli::init_tracing(cli.common.verbose, cli.common.log_format)?;
    let locale = Locale::resolve(cli.locale.as_deref())?;
    let config = FilterConfig::new(locale)
        .with_capacity(cli.common.buffer_size)
        .with_show_whitespace(cli.show_whitespace);
    cli::execute(&cli.common, config, |engine| Box::new(Semln::new(engine)))
}
