//! Index collaborator boundary.
//!
//! The composition layer never talks to a physical index directly. It
//! resolves a [`ScopedSearchContext`] through a [`SearchIndexResolver`],
//! hands it one [`ExecutionPlan`], and receives [`RawHits`] back. Contexts
//! are scoped resources: acquired per request and released when dropped, on
//! every exit path. Execution failures are propagated to the caller
//! unchanged; retries, if any, belong to the index client.

pub mod memory;

use std::collections::HashMap;

use crate::error::Result;
use crate::predicate::Predicate;

/// The single value handed to the index for one request.
///
/// Construction is pure; the index performs all I/O during execution.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    /// The composed eligibility predicate.
    pub predicate: Predicate,
    /// Fields to compute facet counts for, independent of filtering.
    pub facet_fields: Vec<String>,
    /// Number of matching documents to skip.
    pub skip: usize,
    /// Maximum number of documents to return. `None` means no limit.
    pub take: Option<usize>,
}

impl ExecutionPlan {
    /// Create a plan with no facets and no paging.
    pub fn new(predicate: Predicate) -> Self {
        ExecutionPlan {
            predicate,
            facet_fields: Vec::new(),
            skip: 0,
            take: None,
        }
    }
}

/// One raw hit as returned by the index.
#[derive(Debug, Clone)]
pub struct RawHit {
    /// Index-assigned document id.
    pub doc_id: u64,
    /// Relevance score.
    pub score: f32,
    /// Stored fields of the document.
    pub fields: HashMap<String, String>,
}

/// Raw execution output: the hit page plus result-set metadata.
#[derive(Debug, Clone, Default)]
pub struct RawHits {
    /// Hits for the requested page, in index order.
    pub hits: Vec<RawHit>,
    /// Total number of matching documents before paging.
    pub total_hits: u64,
    /// Facet value counts per registered facet field, computed over the
    /// full matching set.
    pub facet_counts: HashMap<String, HashMap<String, u64>>,
}

/// Resolves the physical index for a scope anchor.
pub trait SearchIndexResolver: Send + Sync {
    /// Acquire a scoped search context for the given anchor.
    fn resolve(&self, scope_anchor: &str) -> Result<Box<dyn ScopedSearchContext>>;
}

/// A scoped handle to the physical index.
///
/// Dropped at the end of the request; implementations release whatever the
/// handle holds in their `Drop` impl.
pub trait ScopedSearchContext: Send {
    /// Execute the plan and return raw hits. May block.
    fn execute(&mut self, plan: &ExecutionPlan) -> Result<RawHits>;
}
