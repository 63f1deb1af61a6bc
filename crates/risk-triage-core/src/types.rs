//! Core types for Risk Triage

use serde::{Deserialize, Serialize};
use std::fmt;

/// The unit of classification: trimmed, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputText(String);

impl InputText {
    /// Normalize raw text, returning `None` when nothing is left after trimming
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Borrow the normalized text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for InputText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InputText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one classification: both labels and the risk confidence.
///
/// Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Label from the risk-severity classifier
    pub risk_severity: String,

    /// Label from the bank-action classifier
    pub bank_action: String,

    /// Highest class probability of the risk classifier, 0.0 when it has none
    pub risk_confidence: f64,
}

impl PredictionResult {
    /// Create a new prediction result
    pub fn new(
        risk_severity: impl Into<String>,
        bank_action: impl Into<String>,
        risk_confidence: f64,
    ) -> Self {
        Self {
            risk_severity: risk_severity.into(),
            bank_action: bank_action.into(),
            risk_confidence,
        }
    }
}
