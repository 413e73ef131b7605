use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::SearchError;

pub type DocId = i32;

/// Lifecycle label a caller assigns when adding a document; the engine never
/// changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

/// What survives of a document after indexing: its text does not.
#[derive(Debug, Clone)]
pub(crate) struct DocMeta {
    pub rating: i32,
    pub status: DocumentStatus,
}

#[derive(Debug, Default)]
pub(crate) struct InvertedIndex {
    /// word -> document -> normalized term frequency
    word_to_docs: HashMap<String, HashMap<DocId, f64>>,
    documents: HashMap<DocId, DocMeta>,
    /// Ids in insertion order, for positional lookup.
    order: Vec<DocId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every occurrence adds `1 / words.len()`, so one document's frequencies
    /// sum to 1. Words must already be validated.
    pub fn insert(&mut self, id: DocId, words: &[&str], meta: DocMeta) {
        if !words.is_empty() {
            let unit = 1.0 / words.len() as f64;
            for word in words {
                *self
                    .word_to_docs
                    .entry((*word).to_string())
                    .or_default()
                    .entry(id)
                    .or_insert(0.0) += unit;
            }
        }
        self.documents.insert(id, meta);
        self.order.push(id);
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn document(&self, id: DocId) -> Option<&DocMeta> {
        self.documents.get(&id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document_id_at(&self, index: usize) -> Result<DocId, SearchError> {
        self.order
            .get(index)
            .copied()
            .ok_or(SearchError::OutOfRange {
                index,
                count: self.order.len(),
            })
    }

    pub fn postings(&self, word: &str) -> Option<&HashMap<DocId, f64>> {
        self.word_to_docs.get(word)
    }

    // Existence required: callers skip words that are not indexed.
    pub fn inverse_document_frequency(&self, word: &str) -> f64 {
        let containing = self.word_to_docs[word].len();
        (self.document_count() as f64 / containing as f64).ln()
    }
}

/// Mean rating truncated toward zero; 0 when no ratings were given.
pub(crate) fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}
