//! Linear classifiers evaluated with Candle
//!
//! Logistic regression, linear SVMs, SGD-trained models and multinomial
//! naive Bayes all score a feature row as `x · Wᵀ + b`. They differ only in
//! how scores become probabilities, and whether they can at all.

use crate::classifier::{Classifier, ProbabilityEstimator};
use crate::features::FeatureMatrix;
use crate::model_config::{
    LinearModelSpec, LogisticRegressionSpec, MultiClass, MultinomialNbSpec, SgdClassifierSpec,
    SgdLoss,
};
use candle_core::{Device, Tensor, D};
use candle_nn::{Linear, Module};
use risk_triage_core::{Error, Result};

/// How class scores are turned into probabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbabilityLink {
    /// Softmax over class scores; binary scores `z` become `[-z, z]`
    Softmax,
    /// Per-class sigmoid normalized per row; binary is `[1 - σ(z), σ(z)]`
    Sigmoid,
    /// `(clip(z, -1, 1) + 1) / 2` normalized per row
    ModifiedHuber,
}

/// A fitted linear classifier
pub struct LinearClassifier {
    name: String,
    family: &'static str,
    classes: Vec<String>,
    layer: Linear,
    outputs: usize,
    input_width: usize,
    link: Option<ProbabilityLink>,
}

impl LinearClassifier {
    /// Build a classifier from coefficients, validating their shapes
    pub fn new(
        name: impl Into<String>,
        family: &'static str,
        spec: LinearModelSpec,
        link: Option<ProbabilityLink>,
    ) -> Result<Self> {
        let LinearModelSpec {
            classes,
            coef,
            intercept,
        } = spec;

        if classes.len() < 2 {
            return Err(Error::config(format!(
                "{} needs at least two classes, found {}",
                family,
                classes.len()
            )));
        }

        let outputs = coef.len();
        let binary_rows = outputs == 1 && classes.len() == 2;
        if outputs != classes.len() && !binary_rows {
            return Err(Error::config(format!(
                "{} has {} coefficient rows for {} classes",
                family,
                outputs,
                classes.len()
            )));
        }

        let input_width = coef[0].len();
        if input_width == 0 {
            return Err(Error::config(format!("{} has empty coefficient rows", family)));
        }
        if let Some(row) = coef.iter().position(|row| row.len() != input_width) {
            return Err(Error::config(format!(
                "{} coefficient row {} has {} columns, expected {}",
                family,
                row,
                coef[row].len(),
                input_width
            )));
        }

        if intercept.len() != outputs {
            return Err(Error::config(format!(
                "{} has {} intercepts for {} coefficient rows",
                family,
                intercept.len(),
                outputs
            )));
        }

        let flat: Vec<f64> = coef.into_iter().flatten().collect();
        let weight = Tensor::from_vec(flat, (outputs, input_width), &Device::Cpu)
            .map_err(|e| Error::config(format!("Failed to create weight tensor: {}", e)))?;
        let bias = Tensor::from_vec(intercept, outputs, &Device::Cpu)
            .map_err(|e| Error::config(format!("Failed to create bias tensor: {}", e)))?;

        Ok(Self {
            name: name.into(),
            family,
            classes,
            layer: Linear::new(weight, Some(bias)),
            outputs,
            input_width,
            link,
        })
    }

    /// Logistic regression; always exposes probabilities
    pub fn logistic_regression(
        name: impl Into<String>,
        spec: LogisticRegressionSpec,
    ) -> Result<Self> {
        let binary = spec.linear.coef.len() == 1;
        let link = match spec.multi_class {
            MultiClass::Auto if binary => ProbabilityLink::Sigmoid,
            MultiClass::Auto | MultiClass::Multinomial => ProbabilityLink::Softmax,
            MultiClass::Ovr => ProbabilityLink::Sigmoid,
        };

        Self::new(name, "logistic_regression", spec.linear, Some(link))
    }

    /// Linear SVM; no probabilities
    pub fn linear_svc(name: impl Into<String>, spec: LinearModelSpec) -> Result<Self> {
        Self::new(name, "linear_svc", spec, None)
    }

    /// SGD-trained linear model; probabilities depend on the loss
    pub fn sgd_classifier(name: impl Into<String>, spec: SgdClassifierSpec) -> Result<Self> {
        let link = match spec.loss {
            SgdLoss::LogLoss => Some(ProbabilityLink::Sigmoid),
            SgdLoss::ModifiedHuber => Some(ProbabilityLink::ModifiedHuber),
            SgdLoss::Hinge | SgdLoss::SquaredHinge | SgdLoss::Perceptron => None,
        };

        Self::new(name, "sgd_classifier", spec.linear, link)
    }

    /// Multinomial naive Bayes, scored as a joint log likelihood
    pub fn multinomial_nb(name: impl Into<String>, spec: MultinomialNbSpec) -> Result<Self> {
        if spec.feature_log_prob.len() != spec.classes.len() {
            return Err(Error::config(format!(
                "multinomial_nb has {} feature_log_prob rows for {} classes",
                spec.feature_log_prob.len(),
                spec.classes.len()
            )));
        }

        let linear = LinearModelSpec {
            classes: spec.classes,
            coef: spec.feature_log_prob,
            intercept: spec.class_log_prior,
        };

        Self::new(name, "multinomial_nb", linear, Some(ProbabilityLink::Softmax))
    }

    /// Model family, as named in the artifact `kind`
    pub fn family(&self) -> &str {
        self.family
    }

    /// Feature width the coefficients were fitted on
    pub fn input_width(&self) -> usize {
        self.input_width
    }

    /// Raw scores: one column per coefficient row
    pub fn decision_function(&self, features: &FeatureMatrix) -> Result<Vec<Vec<f64>>> {
        self.scores(features)?
            .to_vec2::<f64>()
            .map_err(|e| Error::classifier(format!("{}: failed to read scores: {}", self.name, e)))
    }

    fn scores(&self, features: &FeatureMatrix) -> Result<Tensor> {
        self.layer
            .forward(features.tensor())
            .map_err(|e| Error::classifier(format!("{}: failed to score features: {}", self.name, e)))
    }

    fn class_index(&self, scores: &[f64]) -> usize {
        if self.outputs == 1 {
            return usize::from(scores[0] > 0.0);
        }

        // first maximum wins ties
        let mut best = 0;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }
        best
    }

    fn link_probabilities(&self, scores: &Tensor, link: ProbabilityLink) -> candle_core::Result<Tensor> {
        let binary = self.outputs == 1;
        match link {
            ProbabilityLink::Softmax if binary => {
                let negated = scores.neg()?;
                candle_nn::ops::softmax(&Tensor::cat(&[&negated, scores], 1)?, D::Minus1)
            }
            ProbabilityLink::Softmax => candle_nn::ops::softmax(scores, D::Minus1),
            ProbabilityLink::Sigmoid => {
                let positive = scores.neg()?.exp()?.affine(1.0, 1.0)?.recip()?;
                if binary {
                    Tensor::cat(&[&positive.affine(-1.0, 1.0)?, &positive], 1)
                } else {
                    Ok(positive)
                }
            }
            ProbabilityLink::ModifiedHuber => {
                let positive = scores.clamp(-1f64, 1f64)?.affine(0.5, 0.5)?;
                if binary {
                    Tensor::cat(&[&positive.affine(-1.0, 1.0)?, &positive], 1)
                } else {
                    Ok(positive)
                }
            }
        }
    }
}

/// Scale each row to sum to one; all-zero rows become uniform
fn normalize_rows(rows: &mut [Vec<f64>]) {
    for row in rows.iter_mut() {
        let total: f64 = row.iter().sum();
        if total > 0.0 {
            row.iter_mut().for_each(|p| *p /= total);
        } else {
            let uniform = 1.0 / row.len() as f64;
            row.iter_mut().for_each(|p| *p = uniform);
        }
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<String>> {
        let scores = self.decision_function(features)?;

        Ok(scores
            .iter()
            .map(|row| self.classes[self.class_index(row)].clone())
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn probabilities(&self) -> Option<&dyn ProbabilityEstimator> {
        self.link.map(|_| self as &dyn ProbabilityEstimator)
    }
}

impl ProbabilityEstimator for LinearClassifier {
    fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<Vec<f64>>> {
        let link = self.link.ok_or_else(|| {
            Error::classifier(format!("{} does not estimate probabilities", self.name))
        })?;

        let scores = self.scores(features)?;
        let mut rows = self
            .link_probabilities(&scores, link)
            .and_then(|probs| probs.to_vec2::<f64>())
            .map_err(|e| {
                Error::classifier(format!("{}: failed to estimate probabilities: {}", self.name, e))
            })?;

        if self.outputs > 1 && link != ProbabilityLink::Softmax {
            normalize_rows(&mut rows);
        }

        Ok(rows)
    }
}
