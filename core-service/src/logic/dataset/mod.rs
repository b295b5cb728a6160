//! Dataset Module - Labeled Training Corpus
//!
//! Ordered (url, label) pairs. Index i of `urls()` and `labels()` always
//! refers to the same example.
//!
//! Corpora come from a JSONL file (one `{"url", "label"}` object per line)
//! or from the built-in seed set when nothing is configured.

pub mod record;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use record::CorpusRecord;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read corpus: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid corpus record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid label {label} on line {line} (expected 0 or 1)")]
    InvalidLabel { line: usize, label: u8 },

    #[error("{urls} urls but {labels} labels")]
    LengthMismatch { urls: usize, labels: usize },
}

// ============================================================================
// LABEL
// ============================================================================

/// Binary class label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    pub fn as_u8(&self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }

    pub fn is_phishing(&self) -> bool {
        matches!(self, Label::Phishing)
    }

    /// Numeric target for the classifier
    pub fn as_target(&self) -> f64 {
        self.as_u8() as f64
    }
}

impl TryFrom<u8> for Label {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Legitimate),
            1 => Ok(Label::Phishing),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Legitimate => write!(f, "legitimate"),
            Label::Phishing => write!(f, "phishing"),
        }
    }
}

// ============================================================================
// CORPUS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub url: String,
    pub label: Label,
}

impl LabeledExample {
    pub fn new(url: impl Into<String>, label: Label) -> Self {
        Self { url: url.into(), label }
    }
}

/// Per-label example counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub legitimate: usize,
    pub phishing: usize,
}

impl LabelCounts {
    /// Both classes are represented
    pub fn has_both_classes(&self) -> bool {
        self.legitimate > 0 && self.phishing > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingCorpus {
    examples: Vec<LabeledExample>,
}

impl TrainingCorpus {
    pub fn new(examples: Vec<LabeledExample>) -> Self {
        Self { examples }
    }

    /// Built-in corpus used when no dataset is supplied
    pub fn seed() -> Self {
        Self::new(vec![
            LabeledExample::new("http://example-login.com/secure", Label::Phishing),
            LabeledExample::new("https://legit-site.com/path", Label::Legitimate),
            LabeledExample::new("http://123.45.67.89/update-info", Label::Phishing),
            LabeledExample::new("https://google.com", Label::Legitimate),
            LabeledExample::new("http://paypal.com.phish.co/login", Label::Phishing),
            LabeledExample::new("https://www.mybank.com/personal/login", Label::Legitimate),
        ])
    }

    /// Build from parallel url/label lists of equal length
    pub fn from_pairs<I, S>(urls: I, labels: &[Label]) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.len() != labels.len() {
            return Err(DatasetError::LengthMismatch {
                urls: urls.len(),
                labels: labels.len(),
            });
        }

        Ok(Self::new(
            urls.into_iter()
                .zip(labels.iter().copied())
                .map(|(url, label)| LabeledExample::new(url, label))
                .collect(),
        ))
    }

    /// Load a JSONL corpus. Blank lines are skipped; line numbers are 1-based.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut examples = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let record: CorpusRecord = serde_json::from_str(&line)
                .map_err(|source| DatasetError::Parse { line: line_number, source })?;
            let label = Label::try_from(record.label)
                .map_err(|label| DatasetError::InvalidLabel { line: line_number, label })?;

            examples.push(LabeledExample::new(record.url, label));
        }

        log::info!("Loaded {} labeled examples from {}", examples.len(), path.display());
        Ok(Self::new(examples))
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.examples.iter().map(|e| e.url.as_str())
    }

    pub fn labels(&self) -> Vec<Label> {
        self.examples.iter().map(|e| e.label).collect()
    }

    pub fn label_counts(&self) -> LabelCounts {
        self.examples.iter().fold(LabelCounts::default(), |mut counts, e| {
            match e.label {
                Label::Legitimate => counts.legitimate += 1,
                Label::Phishing => counts.phishing += 1,
            }
            counts
        })
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn push(&mut self, example: LabeledExample) {
        self.examples.push(example);
    }
}
