//! Result emission
//!
//! Each invocation writes at most one newline-terminated JSON object to the
//! result channel, and the outcome decides the exit status.

use risk_triage_core::{Error, PredictionResult};
use serde::Serialize;
use std::io::{self, Write};

/// Message reported when the input resolves to no text
pub const NO_TEXT_MESSAGE: &str = "No text provided";

/// What one invocation produced
#[derive(Debug)]
pub enum Outcome {
    /// Empty input: nothing is written
    Silent,
    /// Input resolved to no text
    NoText,
    /// Both classifiers ran
    Prediction(PredictionResult),
    /// Resolution, vectorization or prediction failed
    Failed(Error),
}

impl Outcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Silent | Self::NoText | Self::Prediction(_) => 0,
            Self::Failed(_) => 1,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Response<'a> {
    Prediction(&'a PredictionResult),
    Error { error: String },
}

/// Writes outcomes to the result channel
pub struct ResultEmitter<W: Write> {
    out: W,
}

impl<W: Write> ResultEmitter<W> {
    /// Create an emitter over a writer
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write the outcome and return the exit status
    pub fn emit(&mut self, outcome: &Outcome) -> io::Result<u8> {
        let response = match outcome {
            Outcome::Silent => return Ok(outcome.exit_code()),
            Outcome::NoText => Response::Error {
                error: NO_TEXT_MESSAGE.to_string(),
            },
            Outcome::Prediction(result) => Response::Prediction(result),
            Outcome::Failed(err) => Response::Error {
                error: err.to_string(),
            },
        };

        serde_json::to_writer(&mut self.out, &response)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;

        Ok(outcome.exit_code())
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}
