//! Model Module - Encoding, Classification, Inference
//!
//! `vectorizer` and `classifier` are fit once by the training pipeline;
//! `inference` only ever reads them.

pub mod vectorizer;
pub mod classifier;
pub mod inference;

// Re-export common types
pub use vectorizer::{EncodingError, FittedEncoder, TfIdfVectorizer};
pub use classifier::{Classification, ClassifierError, FittedClassifier, LogisticRegression};
pub use inference::{FeatureReport, InferenceError, InferenceService, ModelStatus, PredictionResult};
