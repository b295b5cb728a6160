//! PhishGuard Core - URL Phishing Classification Engine
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐   ┌─────────────┐
//! │   Dataset    │──▶│   Features    │──▶│  Vectorizer  │──▶│ Classifier  │
//! │ (url, label) │   │ (8 lexical)   │   │   (TF-IDF)   │   │ (LogReg)    │
//! └──────────────┘   └───────────────┘   └──────────────┘   └─────────────┘
//!                            │  training: once, at startup         │
//!                            ▼                                     ▼
//!                    ┌─────────────────────────────────────────────────┐
//!                    │ TrainedModel (immutable, Arc-shared)            │
//!                    │   └─▶ InferenceService::predict(url)            │
//!                    └─────────────────────────────────────────────────┘
//! ```
//!
//! The network boundary lives in the `phishguard-server` crate.

pub mod constants;
pub mod logic;

pub use logic::config::TrainingConfig;
pub use logic::dataset::{DatasetError, Label, LabeledExample, TrainingCorpus};
pub use logic::features::{extract_url_features, FeatureVector, FEATURE_COUNT};
pub use logic::model::{
    ClassifierError, EncodingError, FeatureReport, FittedClassifier, FittedEncoder,
    InferenceError, InferenceService, ModelStatus, PredictionResult,
};
pub use logic::training::{train, TrainedModel, TrainingError, TrainingReport};
