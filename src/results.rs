//! Search results and the results factory boundary.
//!
//! The service never shapes results itself; it hands raw index hits and
//! the original query to a [`SearchResultsFactory`]. [`DefaultResultsFactory`]
//! echoes hits and metadata one-to-one and is sufficient for most callers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::index::RawHits;
use crate::query::Query;
use crate::search::paging;

/// One hit in a result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index-assigned document id.
    pub doc_id: u64,
    /// Relevance score.
    pub score: f32,
    /// Stored fields of the document.
    pub fields: HashMap<String, String>,
}

/// Structured results for one search call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    /// Hits for the requested page, in index order.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents before paging.
    pub total_hits: u64,
    /// Effective zero-based page the hits belong to.
    pub page: usize,
    /// Effective page size used.
    pub results_per_page: usize,
    /// Facet value counts per surfaced facet field.
    pub facets: HashMap<String, HashMap<String, u64>>,
}

/// Converts raw index hits plus the original query into a response object.
pub trait SearchResultsFactory: Send + Sync {
    /// Create results from raw hits. `query` is `None` for unpaged listing
    /// calls.
    fn create(&self, raw: RawHits, query: Option<&Query>) -> SearchResults;
}

/// Factory that echoes raw hits and metadata without reshaping.
#[derive(Debug, Default)]
pub struct DefaultResultsFactory;

impl SearchResultsFactory for DefaultResultsFactory {
    fn create(&self, raw: RawHits, query: Option<&Query>) -> SearchResults {
        let (page, results_per_page) = match query {
            Some(query) => (paging::effective_page(query), paging::effective_size(query)),
            None => (0, raw.hits.len()),
        };

        SearchResults {
            hits: raw
                .hits
                .into_iter()
                .map(|hit| SearchHit {
                    doc_id: hit.doc_id,
                    score: hit.score,
                    fields: hit.fields,
                })
                .collect(),
            total_hits: raw.total_hits,
            page,
            results_per_page,
            facets: raw.facet_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::RawHit;

    #[test]
    fn test_factory_echoes_paging_metadata() {
        let raw = RawHits {
            hits: vec![RawHit {
                doc_id: 7,
                score: 1.0,
                fields: HashMap::new(),
            }],
            total_hits: 42,
            facet_counts: HashMap::new(),
        };

        let query = Query::new(-3, 0);
        let results = DefaultResultsFactory.create(raw, Some(&query));

        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hits[0].doc_id, 7);
        assert_eq!(results.total_hits, 42);
        assert_eq!(results.page, 0);
        assert_eq!(results.results_per_page, 10);
    }

    #[test]
    fn test_factory_without_query() {
        let raw = RawHits {
            hits: Vec::new(),
            total_hits: 0,
            facet_counts: HashMap::new(),
        };
        let results = DefaultResultsFactory.create(raw, None);
        assert_eq!(results.page, 0);
        assert_eq!(results.results_per_page, 0);
    }
}
