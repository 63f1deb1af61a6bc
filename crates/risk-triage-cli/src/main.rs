//! predict-risk
//!
//! Single-shot risk classification: loads the vectorizer and both
//! classifiers from the executable's directory, classifies one text from
//! stdin and writes one JSON result to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use risk_triage_cli::{fatal_message, init_tracing, load_pipeline, run, Cli, ResultEmitter};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(&cli);

    match try_main() {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "predict-risk failed");
            let _ = writeln!(io::stderr(), "Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<ExitCode> {
    // Artifacts are loaded before stdin is touched
    let pipeline = match load_pipeline() {
        Ok(pipeline) => pipeline,
        Err(e) if e.is_startup_fatal() => {
            eprintln!("{}", fatal_message(&e));
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e).context("failed to locate artifacts"),
    };

    let outcome = run(&pipeline, io::stdin().lock());

    let mut emitter = ResultEmitter::new(io::stdout().lock());
    let code = emitter
        .emit(&outcome)
        .context("failed to write result to stdout")?;

    Ok(ExitCode::from(code))
}
