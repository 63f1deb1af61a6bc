//! Risk Triage Classifiers
//!
//! Fitted text vectorizers and linear classifiers, loaded from JSON artifacts
//! and evaluated on CPU with Candle.
//!
//! The pipeline is single-shot: artifacts are loaded once per
//! process, one text is vectorized, and two classifiers label it.

pub mod classifier;
pub mod config;
pub mod features;
pub mod linear;
pub mod model_config;
pub mod model_loader;
pub mod pipeline;
pub mod vectorizer;

pub use classifier::{Classifier, ProbabilityEstimator, Vectorizer};
pub use config::{ArtifactLayout, ACTION_MODEL_FILE, RISK_MODEL_FILE, VECTORIZER_FILE};
pub use features::FeatureMatrix;
pub use linear::{LinearClassifier, ProbabilityLink};
pub use model_config::{
    ArtifactSpec, LinearModelSpec, LogisticRegressionSpec, MultiClass, MultinomialNbSpec, Norm,
    SgdClassifierSpec, SgdLoss, TfidfSpec,
};
pub use model_loader::{load_classifier, load_vectorizer, LoadedArtifact};
pub use pipeline::RiskPipeline;
pub use vectorizer::TfidfVectorizer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, ProbabilityEstimator, Vectorizer};
    pub use crate::config::ArtifactLayout;
    pub use crate::features::FeatureMatrix;
    pub use crate::linear::LinearClassifier;
    pub use crate::pipeline::RiskPipeline;
    pub use crate::vectorizer::TfidfVectorizer;
}
