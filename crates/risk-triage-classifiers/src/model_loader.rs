//! Artifact loading
//!
//! Reads an artifact file, tells "missing" apart from "unreadable or invalid",
//! and builds the matching vectorizer or classifier.

use crate::classifier::{Classifier, Vectorizer};
use crate::linear::LinearClassifier;
use crate::model_config::ArtifactSpec;
use crate::vectorizer::TfidfVectorizer;
use risk_triage_core::{Error, Result};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A parsed artifact file, not yet turned into a model
#[derive(Debug, Clone)]
pub struct LoadedArtifact {
    /// Parsed artifact contents
    pub spec: ArtifactSpec,

    /// Name derived from the file stem
    pub name: String,

    /// Path the artifact was read from
    pub path: PathBuf,
}

impl LoadedArtifact {
    /// Read and parse an artifact file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::model_not_found(path),
            _ => Error::model_load(path, e.to_string()),
        })?;

        let digest = format!("{:x}", Sha256::digest(&bytes));

        let spec: ArtifactSpec =
            serde_json::from_slice(&bytes).map_err(|e| Error::model_load(path, e.to_string()))?;

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        debug!(
            path = %path.display(),
            kind = spec.kind(),
            bytes = bytes.len(),
            sha256 = %digest,
            "Read artifact"
        );

        Ok(Self {
            spec,
            name,
            path: path.to_path_buf(),
        })
    }
}

/// Load a vectorizer artifact
pub fn load_vectorizer(path: impl AsRef<Path>) -> Result<Box<dyn Vectorizer>> {
    let artifact = LoadedArtifact::read(path)?;
    let path = artifact.path;

    match artifact.spec {
        ArtifactSpec::Tfidf(spec) => {
            let vectorizer = TfidfVectorizer::from_spec(artifact.name, spec)
                .map_err(|e| Error::model_load(&path, e.to_string()))?;

            debug!(
                name = vectorizer.name(),
                dimension = vectorizer.dimension(),
                "Loaded vectorizer"
            );
            Ok(Box::new(vectorizer))
        }
        other => Err(Error::model_load(
            &path,
            format!("expected a vectorizer artifact, found '{}'", other.kind()),
        )),
    }
}

/// Load a classifier artifact
pub fn load_classifier(path: impl AsRef<Path>) -> Result<Box<dyn Classifier>> {
    let artifact = LoadedArtifact::read(path)?;
    let path = artifact.path;
    let name = artifact.name;

    let classifier = match artifact.spec {
        ArtifactSpec::LogisticRegression(spec) => LinearClassifier::logistic_regression(name, spec),
        ArtifactSpec::LinearSvc(spec) => LinearClassifier::linear_svc(name, spec),
        ArtifactSpec::SgdClassifier(spec) => LinearClassifier::sgd_classifier(name, spec),
        ArtifactSpec::MultinomialNb(spec) => LinearClassifier::multinomial_nb(name, spec),
        ArtifactSpec::Tfidf(_) => {
            return Err(Error::model_load(
                &path,
                "expected a classifier artifact, found 'tfidf'",
            ))
        }
    }
    .map_err(|e| Error::model_load(&path, e.to_string()))?;

    debug!(
        name = classifier.name(),
        family = classifier.family(),
        classes = classifier.classes().len(),
        input_width = classifier.input_width(),
        probabilities = classifier.probabilities().is_some(),
        "Loaded classifier"
    );

    Ok(Box::new(classifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, file: &str, contents: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_vectorizer(dir.path().join("tfidf_vectorizer.json")).err().unwrap();
        assert!(matches!(err, Error::ModelNotFound { .. }));
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "risk_severity_model.json", "{not json");

        let err = load_classifier(&path).err().unwrap();
        assert!(matches!(err, Error::ModelLoad { .. }));
    }

    #[test]
    fn test_directory_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_classifier(dir.path()).err().unwrap();
        assert!(matches!(err, Error::ModelLoad { .. }));
    }

    #[test]
    fn test_wrong_slot_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "bank_action_model.json",
            r#"{"kind": "tfidf", "vocabulary": {"pay": 0}, "idf": [1.0]}"#,
        );

        let err = load_classifier(&path).err().unwrap();
        assert!(err.to_string().contains("expected a classifier artifact"));
        assert!(load_vectorizer(&path).is_ok());
    }

    #[test]
    fn test_invalid_shape_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "risk_severity_model.json",
            r#"{"kind": "linear_svc", "classes": ["A", "B", "C"], "coef": [[1.0]], "intercept": [0.0]}"#,
        );

        let err = load_classifier(&path).err().unwrap();
        assert!(matches!(err, Error::ModelLoad { .. }));
    }

    #[test]
    fn test_loads_classifier_with_name_from_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "risk_severity_model.json",
            r#"{"kind": "logistic_regression", "classes": ["Low", "High"], "coef": [[1.0, -1.0]], "intercept": [0.0]}"#,
        );

        let artifact = LoadedArtifact::read(&path).unwrap();
        assert_eq!(artifact.name, "risk_severity_model");
        assert_eq!(artifact.path, path);
        assert_eq!(artifact.spec.kind(), "logistic_regression");

        let classifier = load_classifier(&path).unwrap();
        assert_eq!(classifier.name(), "risk_severity_model");
        assert!(classifier.probabilities().is_some());
    }
}
