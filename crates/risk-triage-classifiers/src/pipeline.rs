//! Risk classification pipeline
//!
//! One vectorizer feeds two independent classifiers:
//! - the risk-severity classifier, which also supplies the confidence when it
//!   can estimate probabilities
//! - the bank-action classifier
//!
//! The two labels are never reconciled against each other.

use crate::classifier::{Classifier, Vectorizer};
use crate::config::ArtifactLayout;
use crate::features::FeatureMatrix;
use crate::model_loader::{load_classifier, load_vectorizer};
use risk_triage_core::{Error, InputText, PredictionResult, Result};
use std::time::Instant;
use tracing::{debug, info};

/// Vectorizer plus the risk and action classifiers
pub struct RiskPipeline {
    vectorizer: Box<dyn Vectorizer>,
    risk_model: Box<dyn Classifier>,
    action_model: Box<dyn Classifier>,
}

impl RiskPipeline {
    /// Assemble a pipeline from already loaded components
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        risk_model: Box<dyn Classifier>,
        action_model: Box<dyn Classifier>,
    ) -> Self {
        Self {
            vectorizer,
            risk_model,
            action_model,
        }
    }

    /// Load all three artifacts; the first failure aborts loading
    pub fn load(layout: &ArtifactLayout) -> Result<Self> {
        let start = Instant::now();

        let vectorizer = load_vectorizer(layout.vectorizer_path())?;
        let risk_model = load_classifier(layout.risk_model_path())?;
        let action_model = load_classifier(layout.action_model_path())?;

        info!(
            dir = %layout.dir().display(),
            load_us = start.elapsed().as_micros() as u64,
            "Artifacts loaded"
        );

        Ok(Self::new(vectorizer, risk_model, action_model))
    }

    /// Encode one text as a single-row feature matrix
    pub fn vectorize(&self, text: &InputText) -> Result<FeatureMatrix> {
        let start = Instant::now();
        let features = self.vectorizer.transform(&[text.as_str()])?;

        debug!(
            vectorizer = self.vectorizer.name(),
            width = features.width(),
            latency_us = start.elapsed().as_micros() as u64,
            "Vectorized input"
        );

        Ok(features)
    }

    /// Run both classifiers over the same features
    pub fn predict(&self, features: &FeatureMatrix) -> Result<PredictionResult> {
        let start = Instant::now();

        let risk_severity = first_label(self.risk_model.as_ref(), features)?;
        let bank_action = first_label(self.action_model.as_ref(), features)?;
        let risk_confidence = confidence(self.risk_model.as_ref(), features)?;

        debug!(
            risk_severity = %risk_severity,
            bank_action = %bank_action,
            risk_confidence,
            latency_us = start.elapsed().as_micros() as u64,
            "Predicted"
        );

        Ok(PredictionResult {
            risk_severity,
            bank_action,
            risk_confidence,
        })
    }

    /// Vectorize then predict
    pub fn classify(&self, text: &InputText) -> Result<PredictionResult> {
        let features = self.vectorize(text)?;
        self.predict(&features)
    }

    /// The loaded vectorizer
    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    /// The risk-severity classifier
    pub fn risk_model(&self) -> &dyn Classifier {
        self.risk_model.as_ref()
    }

    /// The bank-action classifier
    pub fn action_model(&self) -> &dyn Classifier {
        self.action_model.as_ref()
    }
}

fn first_label(classifier: &dyn Classifier, features: &FeatureMatrix) -> Result<String> {
    classifier
        .predict(features)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::classifier(format!("{} returned no prediction", classifier.name())))
}

/// Highest class probability of the first row, or 0.0 without the capability
fn confidence(classifier: &dyn Classifier, features: &FeatureMatrix) -> Result<f64> {
    let Some(estimator) = classifier.probabilities() else {
        return Ok(0.0);
    };

    let rows = estimator.predict_proba(features)?;
    let row = rows.first().ok_or_else(|| {
        Error::classifier(format!("{} returned no probabilities", classifier.name()))
    })?;

    Ok(row
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(0.0))
}
