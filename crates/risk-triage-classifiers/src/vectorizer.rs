//! TF-IDF text vectorizer
//!
//! Reproduces the fitted transform of a word-level TF-IDF vectorizer:
//! tokenize with a regex, build word n-grams, count in-vocabulary terms,
//! weight by idf and normalize each row.

use crate::classifier::Vectorizer;
use crate::features::FeatureMatrix;
use crate::model_config::{Norm, TfidfSpec};
use regex::Regex;
use risk_triage_core::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Fitted TF-IDF vectorizer
pub struct TfidfVectorizer {
    name: String,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    token_pattern: Regex,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    binary: bool,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TfidfVectorizer {
    /// Build a vectorizer from its serialized state, validating it
    pub fn from_spec(name: impl Into<String>, spec: TfidfSpec) -> Result<Self> {
        let dimension = spec.vocabulary.len();

        let mut seen = vec![false; dimension];
        for (term, &index) in &spec.vocabulary {
            if index >= dimension {
                return Err(Error::config(format!(
                    "vocabulary index {} for term {:?} is out of range for {} terms",
                    index, term, dimension
                )));
            }
            if seen[index] {
                return Err(Error::config(format!(
                    "vocabulary index {} is assigned to more than one term",
                    index
                )));
            }
            seen[index] = true;
        }

        let idf = if spec.use_idf {
            if spec.idf.len() != dimension {
                return Err(Error::config(format!(
                    "idf has {} weights but vocabulary has {} terms",
                    spec.idf.len(),
                    dimension
                )));
            }
            Some(spec.idf)
        } else {
            None
        };

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::config(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        let token_pattern = Regex::new(&spec.token_pattern)
            .map_err(|e| Error::config(format!("invalid token_pattern: {}", e)))?;

        Ok(Self {
            name: name.into(),
            vocabulary: spec.vocabulary,
            idf,
            token_pattern,
            lowercase: spec.lowercase,
            ngram_range: spec.ngram_range,
            stop_words: spec.stop_words.unwrap_or_default().into_iter().collect(),
            binary: spec.binary,
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
        })
    }

    /// Split text into the terms counted against the vocabulary
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }

        terms
    }

    fn transform_one(&self, text: &str) -> Vec<f64> {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut row = vec![0.0f64; self.vocabulary.len()];
        for (index, count) in counts {
            let tf = if self.binary {
                1.0
            } else if self.sublinear_tf {
                1.0 + count.ln()
            } else {
                count
            };

            let weight = match &self.idf {
                Some(idf) => idf[index],
                None => 1.0,
            };

            row[index] = tf * weight;
        }

        if let Some(norm) = self.norm {
            normalize(&mut row, norm);
        }

        row
    }
}

/// Scale a row to unit norm; all-zero rows are left unchanged
fn normalize(row: &mut [f64], norm: Norm) {
    let magnitude = match norm {
        Norm::L1 => row.iter().map(|v| v.abs()).sum::<f64>(),
        Norm::L2 => row.iter().map(|v| v * v).sum::<f64>().sqrt(),
    };

    if magnitude > 0.0 {
        row.iter_mut().for_each(|v| *v /= magnitude);
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, batch: &[&str]) -> Result<FeatureMatrix> {
        let rows = batch.iter().map(|text| self.transform_one(text)).collect();
        FeatureMatrix::from_rows(rows, self.dimension())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
