use std::collections::VecDeque;

use crate::error::SearchError;
use crate::index::{DocId, DocumentStatus};
use crate::search::{SearchEngine, SearchHit};

// Window span in queries (last 1440 calls), not wall-clock time.
const WINDOW_SIZE: usize = 1440;

/// Counts queries that came back empty over the most recent 1440 calls; only
/// empty-result requests are stored.
pub struct RequestQueue<'a> {
    engine: &'a SearchEngine,
    requests: VecDeque<EmptyResultRequest>,
    seen: usize,
    window_full: bool,
}

#[derive(Debug)]
struct EmptyResultRequest {
    raw_query: String,
}

impl<'a> RequestQueue<'a> {
    pub fn new(engine: &'a SearchEngine) -> RequestQueue<'a> {
        RequestQueue {
            engine,
            requests: VecDeque::new(),
            seen: 0,
            window_full: false,
        }
    }

    /// Run an `Actual`-status search and record the outcome in the window. A
    /// failed query propagates without touching the window.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<SearchHit>, SearchError> {
        let hits = self.engine.find_top_documents(raw_query)?;
        self.record(raw_query, &hits);
        Ok(hits)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let hits = self.engine.find_top_documents_by_status(raw_query, status)?;
        self.record(raw_query, &hits);
        Ok(hits)
    }

    pub fn add_find_request_with<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<SearchHit>, SearchError>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let hits = self.engine.find_top_documents_with(raw_query, predicate)?;
        self.record(raw_query, &hits);
        Ok(hits)
    }

    /// Number of empty-result queries among the last 1440 calls.
    pub fn no_result_requests(&self) -> usize {
        self.requests.len()
    }

    /// The stored empty-result queries, oldest first.
    pub fn recent_empty_queries(&self) -> impl Iterator<Item = &str> + '_ {
        self.requests.iter().map(|request| request.raw_query.as_str())
    }

    fn record(&mut self, raw_query: &str, hits: &[SearchHit]) {
        self.advance_window();
        if hits.is_empty() {
            self.requests.push_back(EmptyResultRequest {
                raw_query: raw_query.to_string(),
            });
            tracing::debug!(raw_query, "query returned no documents");
        }
    }

    // Once full, every admitted call evicts the oldest stored request;
    // popping with nothing stored is a no-op.
    fn advance_window(&mut self) {
        if self.window_full {
            self.requests.pop_front();
        } else if self.seen >= WINDOW_SIZE {
            self.window_full = true;
            self.requests.pop_front();
        } else {
            self.seen += 1;
        }
    }
}
