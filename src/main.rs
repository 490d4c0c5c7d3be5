//! tcp-fsm - TCP lifecycle simulator
//!
//! Reads event tokens from stdin (or a file) and drives the table-driven
//! TCP state machine, printing the state after every token.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tablefsm::action::WriterReporter;
use tablefsm::tcp::{Session, SessionError, SessionOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tcp-fsm", version, about = "Simplified TCP connection state machine simulator")]
struct Cli {
    /// Read tokens from this file instead of stdin
    #[arg(short, long, env = "TCP_FSM_INPUT")]
    input: Option<PathBuf>,

    /// Require tokens to be uppercase already
    #[arg(long, env = "TCP_FSM_STRICT_CASE")]
    strict_case: bool,

    /// Do not print the banner
    #[arg(long, env = "TCP_FSM_NO_BANNER")]
    no_banner: bool,

    /// Stop at the first rejected token
    #[arg(long, env = "TCP_FSM_STOP_ON_ERROR")]
    stop_on_error: bool,
}

impl Cli {
    fn options(&self) -> SessionOptions {
        SessionOptions {
            uppercase: !self.strict_case,
            banner: !self.no_banner,
            stop_on_error: self.stop_on_error,
        }
    }

    fn open_input(&self) -> io::Result<Box<dyn BufRead>> {
        match &self.input {
            Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            None => Ok(Box::new(io::stdin().lock())),
        }
    }
}

fn run(cli: &Cli) -> Result<(), SessionError> {
    let reporter = Arc::new(WriterReporter::stdout());
    let mut session = Session::new(reporter, cli.options())?;
    let input = cli.open_input()?;
    session.run(input)?;
    Ok(())
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(?cli, "starting simulator");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("simulator stopped: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
