//! Error types for Risk Triage

use std::path::{Path, PathBuf};

/// Result type alias using Risk Triage's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Risk Triage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Artifact file does not exist
    #[error("model file {} not found", path.display())]
    ModelNotFound { path: PathBuf },

    /// Artifact file exists but could not be deserialized or validated
    #[error("failed to load {}: {reason}", path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Input could not be resolved into text
    #[error("input error: {0}")]
    Input(String),

    /// Vectorizer execution errors
    #[error("vectorizer error: {0}")]
    Vectorizer(String),

    /// Classifier execution errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new model-not-found error
    pub fn model_not_found(path: impl AsRef<Path>) -> Self {
        Self::ModelNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a new model load error
    pub fn model_load(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::ModelLoad {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a new input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a new vectorizer error
    pub fn vectorizer(msg: impl Into<String>) -> Self {
        Self::Vectorizer(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error happens while loading artifacts, before any input is read.
    ///
    /// Startup errors terminate the process with a plain-text diagnostic on
    /// stderr; every other error is reported as a JSON object on stdout.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. } | Self::ModelLoad { .. })
    }
}
