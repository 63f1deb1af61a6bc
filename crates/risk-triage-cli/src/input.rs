//! Input resolution
//!
//! Stdin is read once, in full. A JSON object is treated as an envelope
//! carrying `text`; anything that does not parse as JSON is the text itself.

use risk_triage_core::{Error, InputText, Result};
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Where the text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// `{"text": ...}` envelope
    Envelope,
    /// Raw, non-JSON payload
    Raw,
}

/// Result of resolving one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedInput {
    /// Zero bytes were read
    Empty,
    /// Something was read, but no text remained after resolution
    Blank,
    /// Text ready for classification
    Text {
        text: InputText,
        source: InputSource,
    },
}

/// Read the whole input stream
pub fn read_input(mut reader: impl Read) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Resolve a raw payload into classification text
pub fn resolve(bytes: &[u8]) -> Result<ResolvedInput> {
    if bytes.is_empty() {
        return Ok(ResolvedInput::Empty);
    }

    let payload = std::str::from_utf8(bytes)
        .map_err(|e| Error::input(format!("input is not valid UTF-8: {}", e)))?;

    let (candidate, source) = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(envelope)) => {
            let text = match envelope.get("text") {
                None | Some(Value::Null) => "",
                Some(Value::String(text)) => text.as_str(),
                Some(other) => {
                    return Err(Error::input(format!(
                        "`text` must be a string, found {}",
                        json_type(other)
                    )))
                }
            };
            (text.to_string(), InputSource::Envelope)
        }
        Ok(other) => {
            return Err(Error::input(format!(
                "expected a JSON object with a `text` field, found {}",
                json_type(&other)
            )))
        }
        Err(_) => (payload.to_string(), InputSource::Raw),
    };

    let resolved = match InputText::new(&candidate) {
        Some(text) => {
            debug!(source = ?source, chars = text.as_str().chars().count(), "Resolved input");
            ResolvedInput::Text { text, source }
        }
        None => ResolvedInput::Blank,
    };

    Ok(resolved)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
