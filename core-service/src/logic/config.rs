//! Training Configuration
//!
//! Knobs for the one-shot classifier fit at startup.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DECISION_THRESHOLD, DEFAULT_L2_C, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS,
    DEFAULT_TOLERANCE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Inverse L2 regularisation strength (larger = weaker penalty)
    pub l2_c: f64,

    /// Gradient descent step size
    pub learning_rate: f64,

    /// Maximum full-batch iterations
    pub max_iterations: usize,

    /// Gradient norm at which training stops early
    pub tolerance: f64,

    /// P(phishing) above which a URL is flagged
    pub decision_threshold: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            l2_c: DEFAULT_L2_C,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            decision_threshold: DECISION_THRESHOLD,
        }
    }
}
