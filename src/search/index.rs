use crate::types::Record;

/// Default cap on the number of suggestions returned by [`SearchIndex::search`]
pub const MAX_SUGGESTIONS: usize = 8;

/// In-memory record set answering substring queries.
///
/// Results keep the order of the underlying record set; there is no relevance
/// score. The set is built once and never patched; reloading means building a
/// new index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    records: Vec<Record>,
    limit: usize,
}

impl SearchIndex {
    /// Build an index, dropping records without a title.
    pub fn new(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .filter(|r| !r.title.trim().is_empty())
            .collect();
        Self {
            records,
            limit: MAX_SUGGESTIONS,
        }
    }

    /// Override the result cap
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Find records whose title, author, category, description or tags
    /// contain `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<Record> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        self.records
            .iter()
            .filter(|r| r.matches(&needle))
            .take(self.limit)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
