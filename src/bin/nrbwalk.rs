//! Walk through an NRB file, verify it, and optionally print its contents.
//!
//! ```text
//! nrbwalk [--check] [FILE]
//! ```
//!
//! Reads standard input when no file is given.

use std::{
    io::{self, BufReader, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use nrb::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "nrb=warn";

/// Verify a NoiR Binary file and print a textual description of it
#[derive(Parser, Debug)]
#[command(name = "nrbwalk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Only verify the file; print nothing on success
    #[arg(long)]
    check: bool,

    /// File to read instead of standard input
    file: Option<PathBuf>,
}

fn setup_tracing() {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::builder().parse_lossy(directives))
        .init();
}

fn main() -> ExitCode {
    setup_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nrbwalk: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let parsed = match &cli.file {
        Some(path) => Composition::parse_path(path),
        None => Composition::parse(BufReader::new(io::stdin().lock())),
    };

    // the version status is reported even when parsing succeeds
    match parsed.version {
        VersionStatus::Ok => {}
        VersionStatus::MinorUnsupported => {
            eprintln!("nrbwalk: WARNING: Unsupported minor NRB version!")
        }
        VersionStatus::MajorUnsupported => {
            eprintln!("nrbwalk: ERROR: Unsupported major NRB version!")
        }
        VersionStatus::Unreadable => eprintln!("nrbwalk: Couldn't read valid NRB version!"),
    }

    let composition = parsed
        .into_result()
        .context("A valid NRB file could not be read")?;

    if !cli.check {
        let mut out = io::stdout().lock();
        write!(out, "{}", composition.report()).context("Writing report")?;
        out.flush().context("Writing report")?;
    }
    Ok(())
}
