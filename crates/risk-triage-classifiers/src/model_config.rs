//! Serialized artifact structures
//!
//! Every artifact file is one JSON object tagged by `kind`. Vectorizers and
//! classifiers share the envelope so the loader can report a vectorizer file
//! handed to a classifier slot (or the reverse) as a load error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fitted artifact as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArtifactSpec {
    /// TF-IDF text vectorizer
    Tfidf(TfidfSpec),

    /// Logistic regression (has probability estimates)
    LogisticRegression(LogisticRegressionSpec),

    /// Linear support vector classifier (no probability estimates)
    LinearSvc(LinearModelSpec),

    /// Linear model fitted by stochastic gradient descent
    SgdClassifier(SgdClassifierSpec),

    /// Multinomial naive Bayes (has probability estimates)
    MultinomialNb(MultinomialNbSpec),
}

impl ArtifactSpec {
    /// Artifact kind as written in the `kind` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tfidf(_) => "tfidf",
            Self::LogisticRegression(_) => "logistic_regression",
            Self::LinearSvc(_) => "linear_svc",
            Self::SgdClassifier(_) => "sgd_classifier",
            Self::MultinomialNb(_) => "multinomial_nb",
        }
    }

    /// Whether this artifact is a vectorizer rather than a classifier
    pub fn is_vectorizer(&self) -> bool {
        matches!(self, Self::Tfidf(_))
    }
}

/// TF-IDF vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfSpec {
    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column
    #[serde(default)]
    pub idf: Vec<f64>,

    /// Lowercase text before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Regex whose matches are tokens
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Tokens dropped before n-gram construction
    #[serde(default)]
    pub stop_words: Option<Vec<String>>,

    /// Use presence (1.0) instead of counts
    #[serde(default)]
    pub binary: bool,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Apply idf weights
    #[serde(default = "default_true")]
    pub use_idf: bool,

    /// Row normalization; `null` disables it
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

/// Row normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Coefficients shared by the linear model families
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelSpec {
    /// Class labels, in the column order of the model outputs
    pub classes: Vec<String>,

    /// One row per class, or a single row for binary models
    pub coef: Vec<Vec<f64>>,

    /// One bias per coefficient row
    pub intercept: Vec<f64>,
}

/// Logistic regression state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionSpec {
    #[serde(flatten)]
    pub linear: LinearModelSpec,

    /// Multi-class probability scheme
    #[serde(default)]
    pub multi_class: MultiClass,
}

/// Multi-class scheme for logistic regression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    /// Sigmoid for binary models, softmax otherwise
    #[default]
    Auto,
    /// Softmax over all class scores
    Multinomial,
    /// Independent sigmoids, normalized per row
    Ovr,
}

/// SGD classifier state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SgdClassifierSpec {
    #[serde(flatten)]
    pub linear: LinearModelSpec,

    /// Training loss; decides whether probabilities are available
    #[serde(default)]
    pub loss: SgdLoss,
}

/// SGD training loss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SgdLoss {
    #[default]
    Hinge,
    LogLoss,
    ModifiedHuber,
    SquaredHinge,
    Perceptron,
}

/// Multinomial naive Bayes state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNbSpec {
    /// Class labels
    pub classes: Vec<String>,

    /// Log probability of each feature per class
    pub feature_log_prob: Vec<Vec<f64>>,

    /// Log prior per class
    pub class_log_prior: Vec<f64>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    r"(?u)\b\w\w+\b".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}
