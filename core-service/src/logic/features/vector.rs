//! Feature Vector - Core data structure for classifier input
//!
//! **Versioned feature vector with layout validation**
//!
//! Uses centralized layout from `layout.rs` for:
//! - Consistent feature ordering
//! - Version tracking
//! - Layout hash for compatibility checks
//!
//! The vector stays numeric until the vectorizer boundary, where it is
//! rendered once into its canonical `name_value` string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use super::layout::{
    FEATURE_COUNT, FEATURE_VERSION, FEATURE_LAYOUT,
    layout_hash, validate_layout, LayoutMismatchError,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned Feature Vector with layout metadata
///
/// All lexical features are integral; `num_subdomains` is the only one that
/// can go negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [i64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self::from_values([0; FEATURE_COUNT])
    }

    /// Create from raw values with current version
    pub fn from_values(values: [i64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<i64> {
        super::layout::feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by index
    pub fn set(&mut self, index: usize, value: i64) {
        if index < FEATURE_COUNT {
            self.values[index] = value;
        }
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    /// (name, value) pairs in layout order
    pub fn named_values(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        FEATURE_LAYOUT.iter().copied().zip(self.values.iter().copied())
    }

    /// Named values keyed by feature name
    pub fn to_map(&self) -> BTreeMap<String, i64> {
        self.named_values()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// Canonical textual encoding: `name_value` tokens, space-joined, in layout order
    pub fn to_feature_string(&self) -> String {
        self.named_values()
            .map(|(name, value)| format!("{}_{}", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_feature_string())
    }
}

// ============================================================================
// FEATURE EXTRACTOR TRAIT
// ============================================================================

/// Trait for feature extractors
///
/// Implementations must be pure and infallible: every input string yields a
/// complete vector.
pub trait FeatureExtractor {
    fn extract(&self, url: &str) -> FeatureVector;
}

// ============================================================================
// TESTS
// ============================================================================
