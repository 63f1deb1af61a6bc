//! Risk Triage Core
//!
//! Core types and error handling shared across Risk Triage components.
//!
//! This crate provides:
//! - The error type and result alias used by every stage of the pipeline
//! - The normalized input text and prediction result types

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{InputText, PredictionResult};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{InputText, PredictionResult};
}
