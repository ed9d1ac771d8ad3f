//! Labkit CLI
//!
//! Reads one JSON request per line from stdin and writes one JSON response
//! per line to stdout. Logs go to stderr.
//!
//! Methods:
//! - call: `{"function": name, "args": [...]}`
//! - help: `{"name"?: name}`
//! - list: `{"category"?: category}`
//! - ping
//!
//! Environment:
//! - LABKIT_LOG: error | warn | info | debug | trace (default info)
//! - LABKIT_TRACE: record and log every call (default off)
//! - LABKIT_MIN_NAME_LEN: minimum observer name length (default 2)

mod config;
mod protocol;

use config::Config;
use labkit::Labkit;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Serve requests until EOF; returns the number of responses written.
fn serve<R: BufRead, W: Write>(lab: &Labkit, reader: R, mut writer: W) -> Result<usize, CliError> {
    let mut served = 0;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = protocol::handle_line(lab, line);
        if let Some(err) = &response.error {
            warn!(code = %err.code, message = %err.message, "request failed");
        }
        writeln!(writer, "{}", serde_json::to_string(&response)?)?;
        writer.flush()?;
        served += 1;
    }
    Ok(served)
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        min_name_len = config.rules.min_name_len,
        trace = config.trace_calls,
        "labkit started"
    );

    let lab = Labkit::with_rules(config.rules).with_tracing(config.trace_calls);
    let stdin = io::stdin();
    let stdout = io::stdout();

    match serve(&lab, stdin.lock(), stdout.lock()) {
        Ok(served) => {
            info!(served, "input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "stopped");
            ExitCode::FAILURE
        }
    }
}
