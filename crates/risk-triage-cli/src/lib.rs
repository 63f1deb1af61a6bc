//! Risk Triage command-line front end
//!
//! Wires the artifact pipeline to the process boundary: artifacts are loaded
//! from the executable's directory, one payload is read from stdin and one
//! JSON result is written to stdout.

pub mod cli;
pub mod emitter;
pub mod input;

pub use cli::{init_tracing, Cli};
pub use emitter::{Outcome, ResultEmitter, NO_TEXT_MESSAGE};
pub use input::{read_input, resolve, InputSource, ResolvedInput};

use risk_triage_classifiers::{ArtifactLayout, RiskPipeline};
use risk_triage_core::{Error, Result};
use std::io::Read;
use std::time::Instant;
use tracing::debug;

/// Load the three artifacts that sit next to the running executable
pub fn load_pipeline() -> Result<RiskPipeline> {
    let layout = ArtifactLayout::beside_executable()?;
    RiskPipeline::load(&layout)
}

/// Diagnostic line written to stderr when startup fails
pub fn fatal_message(err: &Error) -> String {
    match err {
        Error::ModelNotFound { path } => {
            format!("Error: Model file {} not found", path.display())
        }
        Error::ModelLoad { path, reason } => {
            format!("Error loading {}: {}", path.display(), reason)
        }
        other => format!("Error: {}", other),
    }
}

/// Resolve one payload from `reader` and classify it
pub fn run(pipeline: &RiskPipeline, reader: impl Read) -> Outcome {
    let start = Instant::now();

    let resolved = match read_input(reader).and_then(|bytes| resolve(&bytes)) {
        Ok(resolved) => resolved,
        Err(e) => return Outcome::Failed(e),
    };

    let outcome = match resolved {
        ResolvedInput::Empty => Outcome::Silent,
        ResolvedInput::Blank => Outcome::NoText,
        ResolvedInput::Text { text, .. } => match pipeline.classify(&text) {
            Ok(result) => Outcome::Prediction(result),
            Err(e) => Outcome::Failed(e),
        },
    };

    debug!(
        exit_code = outcome.exit_code(),
        total_us = start.elapsed().as_micros() as u64,
        "Request finished"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_triage_classifiers::{
        ArtifactSpec, FeatureMatrix, LinearClassifier, TfidfVectorizer, Vectorizer,
    };
    use serde_json::json;

    fn pipeline() -> RiskPipeline {
        let ArtifactSpec::Tfidf(tfidf) = serde_json::from_value(json!({
            "kind": "tfidf",
            "vocabulary": {"lost": 0, "job": 1, "pay": 2},
            "idf": [1.0, 1.0, 1.0]
        }))
        .unwrap() else {
            panic!("Expected tfidf artifact");
        };

        let ArtifactSpec::LogisticRegression(risk) = serde_json::from_value(json!({
            "kind": "logistic_regression",
            "classes": ["High", "Low"],
            "coef": [[-1.0, -1.0, 1.0]],
            "intercept": [0.0]
        }))
        .unwrap() else {
            panic!("Expected logistic regression artifact");
        };

        let ArtifactSpec::LinearSvc(action) = serde_json::from_value(json!({
            "kind": "linear_svc",
            "classes": ["LegalAction", "Reminder"],
            "coef": [[-1.0, -1.0, 1.0]],
            "intercept": [0.0]
        }))
        .unwrap() else {
            panic!("Expected linear svc artifact");
        };

        RiskPipeline::new(
            Box::new(TfidfVectorizer::from_spec("tfidf", tfidf).unwrap()),
            Box::new(LinearClassifier::logistic_regression("risk", risk).unwrap()),
            Box::new(LinearClassifier::linear_svc("action", action).unwrap()),
        )
    }

    #[test]
    fn test_run_classifies_envelope() {
        let outcome = run(&pipeline(), &br#"{"text": "lost my job"}"#[..]);
        match outcome {
            Outcome::Prediction(result) => {
                assert_eq!(result.risk_severity, "High");
                assert_eq!(result.bank_action, "LegalAction");
            }
            other => panic!("Expected prediction, got {:?}", other),
        }
    }

    #[test]
    fn test_run_raw_matches_envelope() {
        let pipeline = pipeline();
        let Outcome::Prediction(raw) = run(&pipeline, &b"  will pay  \n"[..]) else {
            panic!("Expected prediction");
        };
        let Outcome::Prediction(envelope) = run(&pipeline, &br#"{"text": "will pay"}"#[..]) else {
            panic!("Expected prediction");
        };
        assert_eq!(raw, envelope);
    }

    #[test]
    fn test_run_empty_and_blank() {
        let pipeline = pipeline();
        assert!(matches!(run(&pipeline, &b""[..]), Outcome::Silent));
        assert!(matches!(run(&pipeline, &b"   "[..]), Outcome::NoText));
        assert!(matches!(run(&pipeline, &br#"{"text": ""}"#[..]), Outcome::NoText));
    }

    #[test]
    fn test_run_resolution_failure() {
        let outcome = run(&pipeline(), &b"[\"lost\", \"job\"]"[..]);
        assert!(matches!(outcome, Outcome::Failed(Error::Input(_))));
        assert_eq!(outcome.exit_code(), 1);
    }

    struct BrokenVectorizer;

    impl Vectorizer for BrokenVectorizer {
        fn transform(&self, _batch: &[&str]) -> Result<FeatureMatrix> {
            Err(Error::vectorizer("token pattern rejected input"))
        }

        fn name(&self) -> &str {
            "broken"
        }

        fn dimension(&self) -> usize {
            3
        }
    }

    #[test]
    fn test_run_vectorizer_failure() {
        let ArtifactSpec::LinearSvc(action) = serde_json::from_value(json!({
            "kind": "linear_svc",
            "classes": ["LegalAction", "Reminder"],
            "coef": [[-1.0, -1.0, 1.0]],
            "intercept": [0.0]
        }))
        .unwrap() else {
            panic!("Expected linear svc artifact");
        };
        let ArtifactSpec::LinearSvc(risk) = serde_json::from_value(json!({
            "kind": "linear_svc",
            "classes": ["High", "Low"],
            "coef": [[-1.0, -1.0, 1.0]],
            "intercept": [0.0]
        }))
        .unwrap() else {
            panic!("Expected linear svc artifact");
        };

        let pipeline = RiskPipeline::new(
            Box::new(BrokenVectorizer),
            Box::new(LinearClassifier::linear_svc("risk", risk).unwrap()),
            Box::new(LinearClassifier::linear_svc("action", action).unwrap()),
        );

        let outcome = run(&pipeline, &br#"{"text": "lost my job"}"#[..]);
        assert!(matches!(outcome, Outcome::Failed(Error::Vectorizer(_))));
        assert_eq!(outcome.exit_code(), 1);

        let mut emitter = ResultEmitter::new(Vec::new());
        assert_eq!(emitter.emit(&outcome).unwrap(), 1);
        let body: serde_json::Value = serde_json::from_slice(&emitter.into_inner()).unwrap();
        assert_eq!(body["error"], "vectorizer error: token pattern rejected input");
    }

    #[test]
    fn test_fatal_messages() {
        assert_eq!(
            fatal_message(&Error::model_not_found("/opt/risk/tfidf_vectorizer.json")),
            "Error: Model file /opt/risk/tfidf_vectorizer.json not found"
        );
        assert_eq!(
            fatal_message(&Error::model_load("/opt/risk/bank_action_model.json", "unknown kind")),
            "Error loading /opt/risk/bank_action_model.json: unknown kind"
        );
        assert!(fatal_message(&Error::config("no parent")).starts_with("Error: "));
    }
}
