use serde::{Deserialize, Serialize};

/// One line of a JSONL training corpus: `{"url": "...", "label": 0}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CorpusRecord {
    pub url: String,
    pub label: u8,
}
