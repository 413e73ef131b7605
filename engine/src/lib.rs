//! In-memory document search: TF-IDF ranking over an inverted index, with
//! plus/minus query terms, per-document status and rating metadata, and
//! predicate-filtered top-K selection.
//!
//! Documents are added once and never change; every query operation is a
//! synchronous read of the index. [`SearchEngine`] is the entry point;
//! [`RequestQueue`] wraps it with an empty-result monitoring window.

mod error;
mod index;
mod paginate;
mod query;
mod request_queue;
mod search;
mod tokenizer;

pub use error::SearchError;
pub use index::{DocId, DocumentStatus};
pub use paginate::paginate;
pub use request_queue::RequestQueue;
pub use search::{SearchEngine, SearchHit, MAX_RESULT_COUNT};
pub use tokenizer::{is_valid_word, split_words};
