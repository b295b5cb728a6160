//! Training Pipeline - Corpus → (Encoder, Classifier)
//!
//! Runs once, synchronously, before the service takes traffic:
//!
//! 1. extract features for every example (index-aligned with labels)
//! 2. fit the TF-IDF encoder on all of them
//! 3. fit the classifier on the encoded matrix
//!
//! A classifier failure (too few examples, one class only, divergence) does
//! not fail the pipeline: the encoder is kept and the model runs in
//! features-only mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logic::config::TrainingConfig;
use crate::logic::dataset::{LabelCounts, TrainingCorpus};
use crate::logic::features::{extract_url_features, FeatureVector};
use crate::logic::model::classifier::{ClassifierError, FittedClassifier, LogisticRegression};
use crate::logic::model::vectorizer::{EncodingError, FittedEncoder, TfIdfVectorizer};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingError {
    #[error("training corpus is empty")]
    EmptyCorpus,

    #[error("failed to encode training corpus: {0}")]
    Encoding(#[from] EncodingError),
}

// ============================================================================
// TRAINED MODEL (process-wide context, immutable)
// ============================================================================

/// Summary of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub corpus_size: usize,
    pub label_counts: LabelCounts,
    pub vocabulary_size: usize,
    pub training_accuracy: Option<f64>,
    pub iterations: Option<usize>,
    pub final_loss: Option<f64>,
    pub trained_at: DateTime<Utc>,
}

/// The fitted encoder and, when training succeeded, its classifier.
///
/// The pair is only ever built together here, so a classifier can never be
/// used with an encoder it was not fit against. Wrap in `Arc` and hand to
/// `InferenceService`; replacing a model means building a new one.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    encoder: FittedEncoder,
    classifier: Result<FittedClassifier, ClassifierError>,
    report: TrainingReport,
}

impl TrainedModel {
    pub fn encoder(&self) -> &FittedEncoder {
        &self.encoder
    }

    pub fn classifier(&self) -> Option<&FittedClassifier> {
        self.classifier.as_ref().ok()
    }

    /// Why the classifier is missing, in features-only mode
    pub fn unavailable_reason(&self) -> Option<&ClassifierError> {
        self.classifier.as_ref().err()
    }

    pub fn is_features_only(&self) -> bool {
        self.classifier.is_err()
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

pub fn train(corpus: &TrainingCorpus, config: &TrainingConfig) -> Result<TrainedModel, TrainingError> {
    if corpus.is_empty() {
        log::warn!("Training corpus is empty - no encoder or classifier will be available");
        return Err(TrainingError::EmptyCorpus);
    }

    log::info!("Training on {} labeled examples...", corpus.len());

    let features: Vec<FeatureVector> = corpus.urls().map(extract_url_features).collect();
    let labels = corpus.labels();

    let encoder = TfIdfVectorizer::new().fit(&features)?;
    let matrix = encoder.transform(&features)?;

    let classifier = LogisticRegression::new(config.clone()).fit(&matrix, &labels);

    let training_accuracy = match &classifier {
        Ok(model) => Some(model.accuracy(&matrix, &labels)?),
        Err(_) => None,
    };

    let report = TrainingReport {
        corpus_size: corpus.len(),
        label_counts: corpus.label_counts(),
        vocabulary_size: encoder.vocabulary_size(),
        training_accuracy,
        iterations: classifier.as_ref().ok().map(FittedClassifier::iterations),
        final_loss: classifier.as_ref().ok().map(FittedClassifier::final_loss),
        trained_at: Utc::now(),
    };

    match &classifier {
        Ok(_) => log::info!(
            "Classifier trained: {} terms, training accuracy {:.2}",
            report.vocabulary_size,
            report.training_accuracy.unwrap_or_default()
        ),
        Err(e) => log::warn!("Classifier unavailable ({}) - running in features-only mode", e),
    }

    Ok(TrainedModel {
        encoder,
        classifier,
        report,
    })
}
