use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::error::SearchError;
use crate::index::{average_rating, DocId, DocMeta, DocumentStatus, InvertedIndex};
use crate::query::Query;
use crate::tokenizer::{is_valid_word, split_words};

/// Hard cap on the number of hits a query returns.
pub const MAX_RESULT_COUNT: usize = 5;

// Relevance gaps below this count as ties.
const RELEVANCE_EPSILON: f64 = 1e-6;

/// One ranked answer to a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl fmt::Display for SearchHit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.doc_id, self.relevance, self.rating
        )
    }
}

/// In-memory TF-IDF search over short text documents. Stop words are fixed at
/// construction; documents are added once and never change. No internal
/// locking, hosts serialize `add_document` against reads themselves.
#[derive(Debug)]
pub struct SearchEngine {
    stop_words: HashSet<String>,
    index: InvertedIndex,
}

impl SearchEngine {
    pub fn new(stop_words_text: &str) -> Result<SearchEngine, SearchError> {
        SearchEngine::from_stop_words(split_words(stop_words_text))
    }

    /// Empty entries are dropped; a word with a control character is rejected.
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<SearchEngine, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidStopWord(word.to_string()));
            }
            words.insert(word.to_string());
        }
        Ok(SearchEngine {
            stop_words: words,
            index: InvertedIndex::new(),
        })
    }

    /// Rejects a negative or duplicate id and words with control characters;
    /// a rejected document leaves the index untouched.
    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<(), SearchError> {
        if id < 0 {
            return Err(SearchError::InvalidDocument {
                id,
                reason: "id is negative".into(),
            });
        }
        if self.index.contains(id) {
            return Err(SearchError::InvalidDocument {
                id,
                reason: "id is already indexed".into(),
            });
        }
        let words = self.split_words_no_stop(text);
        if let Some(word) = words.iter().find(|word| !is_valid_word(word)) {
            return Err(SearchError::InvalidDocument {
                id,
                reason: format!("word {word:?} contains a control character"),
            });
        }
        let meta = DocMeta {
            rating: average_rating(ratings),
            status,
        };
        self.index.insert(id, &words, meta);
        tracing::debug!(document_id = id, words = words.len(), "indexed document");
        Ok(())
    }

    /// Top documents for `raw_query` among those with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<SearchHit>, SearchError> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Top documents among those the predicate accepts, ordered by descending
    /// relevance, near-ties by descending rating, capped at
    /// [`MAX_RESULT_COUNT`].
    pub fn find_top_documents_with<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<SearchHit>, SearchError>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words);
        query.validate()?;
        let mut hits = self.find_all_documents(&query, predicate);
        // Descending relevance under a total order, then every run of
        // sub-epsilon neighbours reorders by descending rating.
        hits.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance));
        for run in
            hits.chunk_by_mut(|prev, next| prev.relevance - next.relevance < RELEVANCE_EPSILON)
        {
            run.sort_by(|lhs, rhs| rhs.rating.cmp(&lhs.rating));
        }
        hits.truncate(MAX_RESULT_COUNT);
        tracing::debug!(
            plus_words = query.plus_words.len(),
            minus_words = query.minus_words.len(),
            hits = hits.len(),
            "query scored"
        );
        Ok(hits)
    }

    /// Plus words of the query occurring in document `id`, sorted, with the
    /// stored status. Empty as soon as any minus word occurs in the document.
    pub fn match_document(
        &self,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus), SearchError> {
        let query = Query::parse(raw_query, &self.stop_words);
        query.validate()?;
        let status = self
            .index
            .document(id)
            .ok_or(SearchError::UnknownDocument(id))?
            .status;
        for word in &query.minus_words {
            if self.word_occurs_in(word, id) {
                return Ok((Vec::new(), status));
            }
        }
        let matched = query
            .plus_words
            .iter()
            .filter(|word| self.word_occurs_in(word, id))
            .cloned()
            .collect();
        Ok((matched, status))
    }

    pub fn document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Id of the document at insertion-order position `index`.
    pub fn document_id_at(&self, index: usize) -> Result<DocId, SearchError> {
        self.index.document_id_at(index)
    }

    fn split_words_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(*word))
            .collect()
    }

    fn word_occurs_in(&self, word: &str, id: DocId) -> bool {
        self.index
            .postings(word)
            .is_some_and(|docs| docs.contains_key(&id))
    }

    fn find_all_documents<P>(&self, query: &Query, predicate: P) -> Vec<SearchHit>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        // BTreeMap keeps assembly in id order across calls.
        let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.index.inverse_document_frequency(word);
            for (&doc_id, &term_freq) in postings {
                let Some(meta) = self.index.document(doc_id) else {
                    continue;
                };
                if predicate(doc_id, meta.status, meta.rating) {
                    *relevance.entry(doc_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }
        for word in &query.minus_words {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            for doc_id in postings.keys() {
                relevance.remove(doc_id);
            }
        }
        relevance
            .into_iter()
            .filter_map(|(doc_id, relevance)| {
                self.index.document(doc_id).map(|meta| SearchHit {
                    doc_id,
                    relevance,
                    rating: meta.rating,
                })
            })
            .collect()
    }
}
