use std::collections::{BTreeSet, HashSet};

use crate::error::SearchError;
use crate::tokenizer::{is_valid_word, split_words};

/// Required and excluded terms of one query. Ordered sets keep iteration
/// deterministic.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl Query {
    /// A single leading `-` marks exclusion; stop words are skipped either
    /// way. Parsing itself never fails, `validate` decides usability.
    pub fn parse(text: &str, stop_words: &HashSet<String>) -> Query {
        let mut query = Query::default();
        for word in split_words(text) {
            let (word, is_minus) = match word.strip_prefix('-') {
                Some(stripped) => (stripped, true),
                None => (word, false),
            };
            if stop_words.contains(word) {
                continue;
            }
            if is_minus {
                query.minus_words.insert(word.to_string());
            } else {
                query.plus_words.insert(word.to_string());
            }
        }
        query
    }

    /// Rejects empty terms, dangling or doubled `-`, and control characters.
    pub fn validate(&self) -> Result<(), SearchError> {
        for word in self.plus_words.iter().chain(&self.minus_words) {
            if word.is_empty() || word.starts_with('-') || !is_valid_word(word) {
                return Err(SearchError::InvalidQuery(word.clone()));
            }
        }
        Ok(())
    }
}
