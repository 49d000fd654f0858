//! Command-line surface: one positional network identifier, plus the
//! messages and exit codes each run outcome maps to.

use crate::invoker::RetriesExhausted;
use crate::network::{network_ids, MissingCredential, UnknownNetwork};
use crate::runtime::runner::RunSummary;
use clap::Parser;
use std::ffi::OsString;
use std::fmt::Write as _;
use std::process::ExitCode;

pub const BIN_NAME: &str = "winners-runner";

#[derive(Parser, Debug)]
#[command(
    name = BIN_NAME,
    about = "Compute PoolTogether V5 vault winners for one network",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Network identifier, for example `base-mainnet`
    #[arg(allow_hyphen_values = true)]
    pub network: Option<String>,

    /// Anything after the network is ignored.
    #[arg(hide = true, num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    pub ignored: Vec<String>,
}

/// Network identifier from the first argument after the program name.
///
/// Flag-looking values are kept so they reach the lookup (and fail there
/// with the network list); arguments after the first are ignored. A parse
/// failure is reported as "no network".
pub fn requested_network<I, T>(args: I) -> Option<String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).ok().and_then(|cli| cli.network)
}

/// Where a message is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Text shown on success and on each failure class, with the exit code it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub stream: Stream,
    pub text: String,
    pub success: bool,
}

impl Report {
    pub fn emit(&self) -> ExitCode {
        match self.stream {
            Stream::Stdout => println!("{}", self.text),
            Stream::Stderr => eprintln!("{}", self.text),
        }
        if self.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Network list plus usage, printed when no valid network was given.
pub fn usage() -> String {
    let mut text = String::from("Available networks:\n");
    for id in network_ids() {
        let _ = writeln!(text, "  - {id}");
    }
    let _ = writeln!(text, "\nUsage: {BIN_NAME} <network-name>");
    let _ = write!(text, "Example: {BIN_NAME} base-mainnet");
    text
}

pub fn success_report(summary: &RunSummary) -> Report {
    Report {
        stream: Stream::Stdout,
        text: format!(
            "\nSuccessfully computed winners for {}!\nResults saved to {}/",
            summary.network,
            summary.results_dir.display()
        ),
        success: true,
    }
}

pub fn failure_report(err: &anyhow::Error) -> Report {
    let (stream, text) = if err.downcast_ref::<UnknownNetwork>().is_some() {
        (Stream::Stdout, usage())
    } else if let Some(missing) = err.downcast_ref::<MissingCredential>() {
        (
            Stream::Stderr,
            format!(
                "Error: {missing}.\nPlease set it using: {}",
                missing.remediation()
            ),
        )
    } else if let Some(exhausted) = err.downcast_ref::<RetriesExhausted>() {
        (
            Stream::Stderr,
            format!(
                "Exceeded maximum retries ({}). Exiting.\nLast error: {}",
                exhausted.attempts, exhausted.last_error
            ),
        )
    } else {
        (Stream::Stderr, format!("Error: {err:#}"))
    };

    Report {
        stream,
        text,
        success: false,
    }
}
