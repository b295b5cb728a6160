//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! A fitted encoder and classifier only make sense for the layout they were
//! trained on. Any layout change means retraining both together.

use crc32fast::Hasher;
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Lengths (0-2) ===
    "url_length",              // 0: Total character count
    "hostname_length",         // 1: Authority after `scheme://`
    "path_length",             // 2: Everything after the authority

    // === Structure (3-4) ===
    "num_subdomains",          // 3: Dot count minus one (may be negative)
    "contains_ip",             // 4: Dotted-quad present

    // === Lexical signals (5-7) ===
    "contains_https",          // 5: Starts with `https://`
    "num_special_chars",       // 6: Count of `-%@&=?#`
    "has_suspicious_keywords", // 7: Phishing keyword present
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 8;

// Indices into the vector, kept next to the layout they mirror
pub const URL_LENGTH: usize = 0;
pub const HOSTNAME_LENGTH: usize = 1;
pub const PATH_LENGTH: usize = 2;
pub const NUM_SUBDOMAINS: usize = 3;
pub const CONTAINS_IP: usize = 4;
pub const CONTAINS_HTTPS: usize = 5;
pub const NUM_SPECIAL_CHARS: usize = 6;
pub const HAS_SUSPICIOUS_KEYWORDS: usize = 7;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
     got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate an incoming (version, hash) pair against an expected one
pub fn validate_against(
    expected_version: u8,
    expected_hash: u32,
    incoming_version: u8,
    incoming_hash: u32,
) -> Result<(), LayoutMismatchError> {
    if incoming_version != expected_version || incoming_hash != expected_hash {
        return Err(LayoutMismatchError {
            expected_version,
            expected_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    validate_against(FEATURE_VERSION, layout_hash(), incoming_version, incoming_hash)
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 8);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_index_constants_match_layout() {
        assert_eq!(feature_index("url_length"), Some(URL_LENGTH));
        assert_eq!(feature_index("hostname_length"), Some(HOSTNAME_LENGTH));
        assert_eq!(feature_index("path_length"), Some(PATH_LENGTH));
        assert_eq!(feature_index("num_subdomains"), Some(NUM_SUBDOMAINS));
        assert_eq!(feature_index("contains_ip"), Some(CONTAINS_IP));
        assert_eq!(feature_index("contains_https"), Some(CONTAINS_HTTPS));
        assert_eq!(feature_index("num_special_chars"), Some(NUM_SPECIAL_CHARS));
        assert_eq!(feature_index("has_suspicious_keywords"), Some(HAS_SUSPICIOUS_KEYWORDS));
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());

        let err = validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).unwrap_err();
        assert_eq!(err.expected_hash, layout_hash());
        assert!(err.to_string().contains("Feature layout mismatch"));
    }
}
