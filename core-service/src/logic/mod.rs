//! Logic Module - Feature Extraction, Training & Inference
//!
//! - `features/` - Lexical URL features (fixed, versioned layout)
//! - `dataset/`  - Labeled corpus loading
//! - `model/`    - TF-IDF encoder, logistic regression, inference service
//! - `training`  - One-shot pipeline producing the immutable model context

pub mod config;
pub mod dataset;
pub mod features;
pub mod model;
pub mod training;
