//! Logistic Regression Classifier
//!
//! Binary L2-regularised logistic regression fit by full-batch gradient
//! descent on the encoded TF-IDF matrix.
//!
//! Objective (intercept not penalised):
//!   mean(log_loss) + ||w||² / (2 · C · n)
//!
//! Weights start at zero, so a fit is fully deterministic.

use ndarray::{Array1, Array2, ArrayView1};
use thiserror::Error;

use super::vectorizer::EncodingError;
use crate::logic::config::TrainingConfig;
use crate::logic::dataset::Label;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("need at least 2 training examples, got {count}")]
    TooFewExamples { count: usize },

    #[error("training data has only {label} examples")]
    SingleClass { label: Label },

    #[error("{rows} encoded rows but {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },

    #[error("training diverged at iteration {iteration}")]
    Diverged { iteration: usize },
}

// ============================================================================
// HELPERS
// ============================================================================

/// Numerically stable logistic function
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Mean log loss, with probabilities clamped away from 0 and 1
fn log_loss(probabilities: &Array1<f64>, targets: &Array1<f64>) -> f64 {
    const EPS: f64 = 1e-15;
    let n = probabilities.len().max(1) as f64;
    probabilities
        .iter()
        .zip(targets.iter())
        .map(|(&p, &y)| {
            let p = p.clamp(EPS, 1.0 - EPS);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum::<f64>()
        / n
}

// ============================================================================
// TRAINER
// ============================================================================

#[derive(Debug, Clone)]
pub struct LogisticRegression {
    config: TrainingConfig,
}

impl LogisticRegression {
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    pub fn fit(&self, x: &Array2<f64>, labels: &[Label]) -> Result<FittedClassifier, ClassifierError> {
        let (n_rows, n_features) = x.dim();

        if labels.len() != n_rows {
            return Err(ClassifierError::LabelMismatch { rows: n_rows, labels: labels.len() });
        }
        if n_rows < 2 {
            return Err(ClassifierError::TooFewExamples { count: n_rows });
        }
        if let Some(&first) = labels.first() {
            if labels.iter().all(|&l| l == first) {
                return Err(ClassifierError::SingleClass { label: first });
            }
        }

        let y: Array1<f64> = labels.iter().map(Label::as_target).collect();
        let n = n_rows as f64;
        let penalty = 1.0 / (self.config.l2_c * n);
        let lr = self.config.learning_rate;

        let mut weights = Array1::<f64>::zeros(n_features);
        let mut bias = 0.0f64;
        let mut iterations = 0;

        for iteration in 0..self.config.max_iterations {
            iterations = iteration + 1;

            let p = (x.dot(&weights) + bias).mapv(sigmoid);
            let residual = &p - &y;

            let grad_w = x.t().dot(&residual) / n + &weights * penalty;
            let grad_b = residual.sum() / n;

            let grad_norm = (grad_w.dot(&grad_w) + grad_b * grad_b).sqrt();
            if !grad_norm.is_finite() {
                return Err(ClassifierError::Diverged { iteration });
            }
            if grad_norm < self.config.tolerance {
                break;
            }

            weights.scaled_add(-lr, &grad_w);
            bias -= lr * grad_b;
        }

        let p = (x.dot(&weights) + bias).mapv(sigmoid);
        let loss = log_loss(&p, &y) + 0.5 * penalty * weights.dot(&weights);
        if !loss.is_finite() {
            return Err(ClassifierError::Diverged { iteration: iterations });
        }

        log::debug!(
            "Logistic regression fitted: {} rows, {} features, {} iterations, loss {:.4}",
            n_rows,
            n_features,
            iterations,
            loss
        );

        Ok(FittedClassifier {
            weights,
            bias,
            iterations,
            final_loss: loss,
            decision_threshold: self.config.decision_threshold,
        })
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

// ============================================================================
// FITTED CLASSIFIER
// ============================================================================

/// Per-row classifier output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,
    /// P(phishing)
    pub phishing_probability: f64,
    /// Probability of `label`
    pub confidence: f64,
}

/// Learned weights. Immutable; only meaningful with the encoder it was fit against.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedClassifier {
    weights: Array1<f64>,
    bias: f64,
    iterations: usize,
    final_loss: f64,
    decision_threshold: f64,
}

impl FittedClassifier {
    fn check_width(&self, row: &ArrayView1<'_, f64>) -> Result<(), EncodingError> {
        if row.len() != self.weights.len() {
            return Err(EncodingError::DimensionMismatch {
                expected: self.weights.len(),
                actual: row.len(),
            });
        }
        Ok(())
    }

    /// P(phishing) for one encoded row, in [0, 1]
    pub fn predict_probability(&self, row: ArrayView1<'_, f64>) -> Result<f64, EncodingError> {
        self.check_width(&row)?;
        Ok(sigmoid(row.dot(&self.weights) + self.bias))
    }

    /// [P(legitimate), P(phishing)]
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Result<[f64; 2], EncodingError> {
        let p = self.predict_probability(row)?;
        Ok([1.0 - p, p])
    }

    pub fn predict_class(&self, row: ArrayView1<'_, f64>) -> Result<Label, EncodingError> {
        Ok(self.classify(row)?.label)
    }

    /// Label, P(phishing) and the probability of the predicted label
    pub fn classify(&self, row: ArrayView1<'_, f64>) -> Result<Classification, EncodingError> {
        let [p_legit, p_phish] = self.predict_proba(row)?;

        let (label, confidence) = if p_phish > self.decision_threshold {
            (Label::Phishing, p_phish)
        } else {
            (Label::Legitimate, p_legit)
        };

        Ok(Classification {
            label,
            phishing_probability: p_phish,
            confidence,
        })
    }

    /// Fraction of rows whose predicted label matches
    pub fn accuracy(&self, x: &Array2<f64>, labels: &[Label]) -> Result<f64, EncodingError> {
        if labels.is_empty() {
            return Ok(0.0);
        }
        let mut correct = 0usize;
        for (row, &label) in x.rows().into_iter().zip(labels) {
            if self.predict_class(row)? == label {
                correct += 1;
            }
        }
        Ok(correct as f64 / labels.len() as f64)
    }

    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn final_loss(&self) -> f64 {
        self.final_loss
    }
}
