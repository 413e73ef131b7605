use crate::index::DocId;
use thiserror::Error;

/// Failures surfaced by the search engine. A failed operation performs no
/// partial work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A stop word passed at construction carries a control character.
    #[error("invalid stop word {0:?}")]
    InvalidStopWord(String),
    /// `add_document` rejected the document; the index is left untouched.
    #[error("invalid document {id}: {reason}")]
    InvalidDocument { id: DocId, reason: String },
    /// A query term is empty, keeps a dangling `-`, or carries a control
    /// character.
    #[error("invalid query term {0:?}")]
    InvalidQuery(String),
    /// Positional document lookup outside the stored range.
    #[error("document position {index} is out of range ({count} documents)")]
    OutOfRange { index: usize, count: usize },
    /// The document id was never added.
    #[error("unknown document id {0}")]
    UnknownDocument(DocId),
}
