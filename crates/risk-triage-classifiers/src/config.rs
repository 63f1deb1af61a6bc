//! Artifact locations

use risk_triage_core::{Error, Result};
use std::path::{Path, PathBuf};

/// File name of the fitted vectorizer
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

/// File name of the risk-severity classifier
pub const RISK_MODEL_FILE: &str = "risk_severity_model.json";

/// File name of the bank-action classifier
pub const ACTION_MODEL_FILE: &str = "bank_action_model.json";

/// Where the three artifacts live. File names are fixed; only the directory varies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    dir: PathBuf,
}

impl ArtifactLayout {
    /// Layout rooted at an arbitrary directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Layout rooted at the directory containing the running executable
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe()
            .map_err(|e| Error::config(format!("Failed to locate executable: {}", e)))?;

        let dir = exe.parent().ok_or_else(|| {
            Error::config(format!("Executable path has no parent: {}", exe.display()))
        })?;

        Ok(Self::new(dir))
    }

    /// Artifact directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the vectorizer artifact
    pub fn vectorizer_path(&self) -> PathBuf {
        self.dir.join(VECTORIZER_FILE)
    }

    /// Path to the risk-severity classifier artifact
    pub fn risk_model_path(&self) -> PathBuf {
        self.dir.join(RISK_MODEL_FILE)
    }

    /// Path to the bank-action classifier artifact
    pub fn action_model_path(&self) -> PathBuf {
        self.dir.join(ACTION_MODEL_FILE)
    }
}
