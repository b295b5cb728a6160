//! Central Configuration Constants
//!
//! Single source of truth for the lexical heuristics and training defaults.

// ============================================
// Lexical heuristics
// ============================================

/// Keywords whose presence (case-insensitive substring) flags a URL
pub const SUSPICIOUS_KEYWORDS: &[&str] = &[
    "login", "verify", "account", "secure", "update", "signin", "admin", "ebay", "paypal",
];

/// Characters counted by `num_special_chars`
pub const SPECIAL_CHARS: &[char] = &['-', '%', '@', '&', '=', '?', '#'];

/// Dotted-quad pattern. Lexical only: groups above 255 still match.
pub const IP_PATTERN: &str = r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b";

/// Scheme prefix for `contains_https`
pub const HTTPS_PREFIX: &str = "https://";

// ============================================
// Vectorizer
// ============================================

/// Token pattern applied to the canonical feature string
pub const TOKEN_PATTERN: &str = r"\b\w\w+\b";

// ============================================
// Classifier training defaults
// ============================================

/// Inverse L2 regularisation strength
pub const DEFAULT_L2_C: f64 = 1.0;

/// Gradient descent step size
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Upper bound on gradient descent iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 2_000;

/// Stop once the gradient norm falls below this
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Probability above which a URL is classified as phishing
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Message reported when no classifier is available
pub const MODEL_NOT_TRAINED: &str = "Model not trained";
