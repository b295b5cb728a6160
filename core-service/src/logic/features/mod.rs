//! Features Module - URL Feature Extraction Engine
//!
//! Turns a raw URL into a fixed-layout, versioned numeric vector.
//! Adding or reordering a feature goes through `layout.rs` only.

pub mod layout;
pub mod url;
pub mod vector;


// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutMismatchError};
pub use url::{extract_url_features, UrlFeatureExtractor};
pub use vector::{FeatureExtractor, FeatureVector};
