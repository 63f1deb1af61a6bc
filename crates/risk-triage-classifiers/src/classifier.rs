//! Classifier and vectorizer traits

use crate::features::FeatureMatrix;
use risk_triage_core::Result;

/// Trait for fitted text vectorizers
pub trait Vectorizer: Send + Sync {
    /// Encode a batch of texts, one feature row per text
    fn transform(&self, batch: &[&str]) -> Result<FeatureMatrix>;

    /// Get the vectorizer name
    fn name(&self) -> &str;

    /// Number of feature columns produced per row
    fn dimension(&self) -> usize;
}

/// Trait for all classifiers
pub trait Classifier: Send + Sync {
    /// Predict one label per feature row
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<String>>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Class labels in column order of the probability rows
    fn classes(&self) -> &[String];

    /// Probability estimation capability, if the model supports it
    fn probabilities(&self) -> Option<&dyn ProbabilityEstimator> {
        None
    }
}

/// Optional capability: per-class probability estimates
pub trait ProbabilityEstimator: Send + Sync {
    /// One probability row per feature row, columns ordered like `classes()`
    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<Vec<f64>>>;
}
