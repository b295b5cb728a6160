//! Inference Service - URL → PredictionResult
//!
//! Stateless wrapper over an immutable `TrainedModel`. Cloning is cheap (one
//! `Arc`), and every call is a pure read, so any number of workers can share
//! one service without locking.
//!
//! Degradation ladder:
//! - no model at all (empty corpus)  → "Model not trained", features still work
//! - encoder only (features-only)    → "Model not trained", features still work
//! - encoder + classifier            → full prediction

use std::collections::BTreeMap;
use std::panic;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::vectorizer::EncodingError;
use crate::constants::MODEL_NOT_TRAINED;
use crate::logic::features::layout::{layout_hash, FEATURE_VERSION};
use crate::logic::features::{extract_url_features, FeatureVector};
use crate::logic::training::TrainedModel;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub url: String,
    pub is_phishing: bool,
    /// Probability of the predicted class, 0.0 - 1.0
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResult {
    /// Inline result when no classifier is available
    pub fn unavailable(url: &str) -> Self {
        Self::failed(url, MODEL_NOT_TRAINED)
    }

    /// Safe fallback carrying an error message
    pub fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            is_phishing: false,
            confidence: 0.0,
            error: Some(error.into()),
        }
    }
}

/// Diagnostic view of the extracted features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureReport {
    pub url: String,
    pub features_string: String,
    pub features: BTreeMap<String, i64>,
}

impl FeatureReport {
    fn new(url: &str, vector: &FeatureVector) -> Self {
        Self {
            url: url.to_string(),
            features_string: vector.to_feature_string(),
            features: vector.to_map(),
        }
    }
}

/// Model status for the status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatus {
    pub model_loaded: bool,
    pub features_only: bool,
    pub vocabulary_size: usize,
    pub corpus_size: usize,
    pub training_accuracy: Option<f64>,
    pub feature_version: u8,
    pub layout_hash: u32,
    pub trained_at: Option<DateTime<Utc>>,
    pub unavailable_reason: Option<String>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("{}", MODEL_NOT_TRAINED)]
    ModelUnavailable,

    #[error("feature extraction failed: {0}")]
    Extraction(String),

    #[error("feature encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}

// ============================================================================
// SERVICE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct InferenceService {
    model: Option<Arc<TrainedModel>>,
}

impl InferenceService {
    pub fn new(model: Arc<TrainedModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Service with nothing fitted: predictions report "Model not trained"
    pub fn untrained() -> Self {
        Self { model: None }
    }

    pub fn model(&self) -> Option<&TrainedModel> {
        self.model.as_deref()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model().map_or(false, |m| m.classifier().is_some())
    }

    /// Full prediction. `ModelUnavailable` comes back inline as `Ok`;
    /// extraction and encoding failures come back as `Err`.
    pub fn try_predict(&self, url: &str) -> Result<PredictionResult, InferenceError> {
        let (encoder, classifier) = match self.model() {
            Some(model) => match model.classifier() {
                Some(classifier) => (model.encoder(), classifier),
                None => return Ok(PredictionResult::unavailable(url)),
            },
            None => return Ok(PredictionResult::unavailable(url)),
        };

        let features = extract_guarded(url, extract_url_features)?;
        let row = encoder.transform_one(&features)?;
        let classification = classifier.classify(row.view())?;

        log::debug!(
            "Predicted {} for {} (p_phishing={:.3})",
            classification.label,
            url,
            classification.phishing_probability
        );

        Ok(PredictionResult {
            url: url.to_string(),
            is_phishing: classification.label.is_phishing(),
            confidence: classification.confidence,
            error: None,
        })
    }

    /// Prediction that never fails: errors are folded into the result
    pub fn predict(&self, url: &str) -> PredictionResult {
        match self.try_predict(url) {
            Ok(result) => result,
            Err(e) => {
                log::error!("Error during prediction for URL '{}': {}", url, e);
                PredictionResult::failed(url, e.to_string())
            }
        }
    }

    /// Canonical feature string plus named values
    pub fn extract_features(&self, url: &str) -> Result<FeatureReport, InferenceError> {
        let vector = extract_guarded(url, extract_url_features)?;
        Ok(FeatureReport::new(url, &vector))
    }

    pub fn status(&self) -> ModelStatus {
        match self.model() {
            Some(model) => {
                let report = model.report();
                ModelStatus {
                    model_loaded: model.classifier().is_some(),
                    features_only: model.classifier().is_none(),
                    vocabulary_size: report.vocabulary_size,
                    corpus_size: report.corpus_size,
                    training_accuracy: report.training_accuracy,
                    feature_version: model.encoder().feature_version(),
                    layout_hash: model.encoder().layout_hash(),
                    trained_at: Some(report.trained_at),
                    unavailable_reason: model.unavailable_reason().map(|e| e.to_string()),
                }
            }
            None => ModelStatus {
                model_loaded: false,
                features_only: true,
                vocabulary_size: 0,
                corpus_size: 0,
                training_accuracy: None,
                feature_version: FEATURE_VERSION,
                layout_hash: layout_hash(),
                trained_at: None,
                unavailable_reason: Some(MODEL_NOT_TRAINED.to_string()),
            },
        }
    }
}

/// Run the extractor, turning a panic into `InferenceError::Extraction`
fn extract_guarded<F>(url: &str, extract: F) -> Result<FeatureVector, InferenceError>
where
    F: FnOnce(&str) -> FeatureVector + panic::UnwindSafe,
{
    panic::catch_unwind(move || extract(url)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        InferenceError::Extraction(message)
    })
}
