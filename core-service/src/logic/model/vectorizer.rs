//! TF-IDF Vectorizer - Feature vector → numeric matrix
//!
//! Each `FeatureVector` is rendered to its canonical `name_value` string and
//! run through a term-frequency / inverse-document-frequency encoder. Numeric
//! and boolean features then share one sparse vocabulary. This only works
//! because the feature set is small and low-cardinality; continuous or
//! high-dimensional features should be encoded numerically instead.
//!
//! Column order is the sorted vocabulary, so fitting the same corpus twice
//! yields identical encoders.

use std::collections::{BTreeSet, HashMap};

use ndarray::{Array1, Array2, ArrayView1};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::TOKEN_PATTERN;
use crate::logic::features::layout::{layout_hash, validate_against, FEATURE_VERSION};
use crate::logic::features::{FeatureVector, LayoutMismatchError};

static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(TOKEN_PATTERN).expect("TOKEN_PATTERN is a valid regex"));

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("cannot fit encoder on an empty corpus")]
    EmptyCorpus,

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("encoded row has {actual} columns, model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

// ============================================================================
// TOKENIZER
// ============================================================================

/// Lowercase and split into tokens of two or more word characters
pub fn tokenize(document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    TOKEN_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

// ============================================================================
// UNFITTED VECTORIZER
// ============================================================================

/// TF-IDF vectorizer. `fit` is the only way to obtain a `FittedEncoder`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfVectorizer;

impl TfIdfVectorizer {
    pub fn new() -> Self {
        Self
    }

    /// Learn vocabulary and IDF weights from the training vectors
    pub fn fit(&self, vectors: &[FeatureVector]) -> Result<FittedEncoder, EncodingError> {
        if vectors.is_empty() {
            return Err(EncodingError::EmptyCorpus);
        }

        for vector in vectors {
            vector.validate()?;
        }

        let documents: Vec<Vec<String>> = vectors
            .iter()
            .map(|v| tokenize(&v.to_feature_string()))
            .collect();

        let terms: Vec<String> = documents
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        // Document frequency: count each term once per document
        let mut document_frequency = vec![0usize; terms.len()];
        for tokens in &documents {
            let unique: BTreeSet<usize> = tokens.iter().filter_map(|t| vocabulary.get(t).copied()).collect();
            for idx in unique {
                document_frequency[idx] += 1;
            }
        }

        // Smoothed IDF = ln((1 + N) / (1 + df)) + 1
        let n_documents = vectors.len();
        let idf = Array1::from_iter(
            document_frequency
                .iter()
                .map(|&df| ((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0),
        );

        log::debug!(
            "TF-IDF encoder fitted: {} documents, {} terms",
            n_documents,
            terms.len()
        );

        Ok(FittedEncoder {
            vocabulary,
            terms,
            idf,
            n_documents,
            feature_version: FEATURE_VERSION,
            layout_hash: layout_hash(),
        })
    }
}

// ============================================================================
// FITTED ENCODER
// ============================================================================

/// Vocabulary and IDF weights learned from the training corpus. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedEncoder {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Array1<f64>,
    n_documents: usize,
    feature_version: u8,
    layout_hash: u32,
}

impl FittedEncoder {
    /// Encode many vectors; one L2-normalised row per input
    pub fn transform(&self, vectors: &[FeatureVector]) -> Result<Array2<f64>, EncodingError> {
        let mut matrix = Array2::<f64>::zeros((vectors.len(), self.vocabulary_size()));

        for (row_idx, vector) in vectors.iter().enumerate() {
            validate_against(
                self.feature_version,
                self.layout_hash,
                vector.version,
                vector.layout_hash,
            )?;

            let mut row = matrix.row_mut(row_idx);
            for token in tokenize(&vector.to_feature_string()) {
                // Terms unseen during fit are ignored
                if let Some(&idx) = self.vocabulary.get(&token) {
                    row[idx] += 1.0;
                }
            }

            row *= &self.idf;

            let norm = row.dot(&row).sqrt();
            if norm > 0.0 {
                row /= norm;
            }
        }

        Ok(matrix)
    }

    /// Encode a single vector into a row
    pub fn transform_one(&self, vector: &FeatureVector) -> Result<Array1<f64>, EncodingError> {
        let matrix = self.transform(std::slice::from_ref(vector))?;
        Ok(matrix.row(0).to_owned())
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    pub fn feature_version(&self) -> u8 {
        self.feature_version
    }

    pub fn layout_hash(&self) -> u32 {
        self.layout_hash
    }

    /// Column index of a term, if it was seen during fit
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Terms in column order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn idf(&self) -> ArrayView1<'_, f64> {
        self.idf.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::extract_url_features;

    fn seed_vectors() -> Vec<FeatureVector> {
        [
            "http://example-login.com/secure",
            "https://legit-site.com/path",
            "https://google.com",
        ]
        .iter()
        .map(|u| extract_url_features(u))
        .collect()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("url_length_18 contains_https_1"),
            vec!["url_length_18", "contains_https_1"]
        );
        // The sign splits a negative value; the lone digit is dropped
        assert_eq!(tokenize("num_subdomains_-1"), vec!["num_subdomains_"]);
        assert_eq!(tokenize("URL_Length_5"), vec!["url_length_5"]);
    }

    #[test]
    fn test_fit_empty_corpus() {
        assert_eq!(TfIdfVectorizer::new().fit(&[]), Err(EncodingError::EmptyCorpus));
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let encoder = TfIdfVectorizer::new().fit(&seed_vectors()).unwrap();
        let terms = encoder.terms();
        assert!(terms.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(encoder.term_index(&terms[0]), Some(0));
        assert_eq!(encoder.n_documents(), 3);
    }

    #[test]
    fn test_idf_values() {
        let encoder = TfIdfVectorizer::new().fit(&seed_vectors()).unwrap();

        // contains_ip_0 appears in every document: ln(4/4) + 1 = 1
        let common = encoder.term_index("contains_ip_0").unwrap();
        assert!((encoder.idf()[common] - 1.0).abs() < 1e-12);

        // contains_https_1 appears in two of three: ln(4/3) + 1
        let https = encoder.term_index("contains_https_1").unwrap();
        assert!((encoder.idf()[https] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_l2_normalised() {
        let vectors = seed_vectors();
        let encoder = TfIdfVectorizer::new().fit(&vectors).unwrap();
        let matrix = encoder.transform(&vectors).unwrap();

        assert_eq!(matrix.dim(), (3, encoder.vocabulary_size()));
        for row in matrix.rows() {
            assert!((row.dot(&row).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transform_is_stable() {
        let encoder = TfIdfVectorizer::new().fit(&seed_vectors()).unwrap();
        let vector = extract_url_features("http://paypal.com.phish.co/login");

        let first = encoder.transform_one(&vector).unwrap();
        let second = encoder.transform_one(&vector).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unseen_terms_ignored() {
        let encoder = TfIdfVectorizer::new().fit(&seed_vectors()).unwrap();
        let row = encoder
            .transform_one(&extract_url_features("http://203.0.113.7/verify"))
            .unwrap();

        assert_eq!(row.len(), encoder.vocabulary_size());
        assert!(row.iter().all(|v| v.is_finite() && *v >= 0.0));
    }

    #[test]
    fn test_layout_mismatch_rejected() {
        let encoder = TfIdfVectorizer::new().fit(&seed_vectors()).unwrap();
        let mut vector = extract_url_features("https://google.com");
        vector.layout_hash = vector.layout_hash.wrapping_add(1);

        assert!(matches!(
            encoder.transform_one(&vector),
            Err(EncodingError::LayoutMismatch(_))
        ));
    }
}
