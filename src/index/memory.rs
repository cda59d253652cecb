//! In-memory reference index.
//!
//! A small, fully synchronous implementation of the index collaborator
//! traits, backed by a vector of documents. Used by the integration tests
//! and as a reference for wiring real index clients.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ahash::{AHashMap, AHashSet};

use crate::document::{IndexableItem, TypeId};
use crate::error::{QuarryError, Result};
use crate::index::{ExecutionPlan, RawHit, RawHits, ScopedSearchContext, SearchIndexResolver};

/// A document stored in the in-memory index.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    path: String,
    language: String,
    latest_version: bool,
    content_types: AHashSet<TypeId>,
    show_in_search_results: bool,
    has_result_formatter: bool,
    fields: AHashMap<String, String>,
}

impl MemoryDocument {
    /// Start building a document at the given path and language.
    pub fn builder<P: Into<String>, L: Into<String>>(path: P, language: L) -> MemoryDocumentBuilder {
        MemoryDocumentBuilder {
            doc: MemoryDocument {
                path: path.into(),
                language: language.into(),
                latest_version: true,
                content_types: AHashSet::new(),
                show_in_search_results: false,
                has_result_formatter: false,
                fields: AHashMap::new(),
            },
        }
    }
}

impl IndexableItem for MemoryDocument {
    fn path(&self) -> &str {
        &self.path
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn is_latest_version(&self) -> bool {
        self.latest_version
    }

    fn has_content_type(&self, id: &TypeId) -> bool {
        self.content_types.contains(id)
    }

    fn show_in_search_results(&self) -> bool {
        self.show_in_search_results
    }

    fn has_result_formatter(&self) -> bool {
        self.has_result_formatter
    }

    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.as_str())
    }
}

/// Builder for [`MemoryDocument`].
pub struct MemoryDocumentBuilder {
    doc: MemoryDocument,
}

impl MemoryDocumentBuilder {
    /// Set whether this is the latest version (defaults to true).
    pub fn latest_version(mut self, latest: bool) -> Self {
        self.doc.latest_version = latest;
        self
    }

    /// Add a content type, including any inherited types the document carries.
    pub fn content_type<T: Into<TypeId>>(mut self, id: T) -> Self {
        self.doc.content_types.insert(id.into());
        self
    }

    /// Mark the document as carrying the base indexable contract.
    pub fn indexed_item(self) -> Self {
        self.content_type(TypeId::indexed_item())
    }

    /// Set the search-result visibility opt-in (defaults to false).
    pub fn show_in_search_results(mut self, show: bool) -> Self {
        self.doc.show_in_search_results = show;
        self
    }

    /// Set whether a result formatter is registered (defaults to false).
    pub fn has_result_formatter(mut self, has: bool) -> Self {
        self.doc.has_result_formatter = has;
        self
    }

    /// Add a stored field value.
    pub fn field<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.doc.fields.insert(name.into(), value.into());
        self
    }

    /// Finish building the document.
    pub fn build(self) -> MemoryDocument {
        self.doc
    }
}

/// In-memory index resolver.
///
/// Tracks the number of live contexts so tests can assert that every
/// request releases its context, including on execution failure.
pub struct MemoryIndex {
    documents: Arc<Vec<MemoryDocument>>,
    open_contexts: Arc<AtomicUsize>,
    fail_execution: bool,
}

impl MemoryIndex {
    /// Create an index over the given documents.
    pub fn new(documents: Vec<MemoryDocument>) -> Self {
        MemoryIndex {
            documents: Arc::new(documents),
            open_contexts: Arc::new(AtomicUsize::new(0)),
            fail_execution: false,
        }
    }

    /// Make every execution fail with an index error.
    pub fn with_failing_execution(mut self) -> Self {
        self.fail_execution = true;
        self
    }

    /// Number of contexts currently acquired and not yet released.
    pub fn open_contexts(&self) -> usize {
        self.open_contexts.load(Ordering::SeqCst)
    }
}

impl SearchIndexResolver for MemoryIndex {
    fn resolve(&self, scope_anchor: &str) -> Result<Box<dyn ScopedSearchContext>> {
        if scope_anchor.is_empty() {
            return Err(QuarryError::index("empty scope anchor"));
        }
        self.open_contexts.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemorySearchContext {
            documents: Arc::clone(&self.documents),
            open_contexts: Arc::clone(&self.open_contexts),
            fail_execution: self.fail_execution,
        }))
    }
}

struct MemorySearchContext {
    documents: Arc<Vec<MemoryDocument>>,
    open_contexts: Arc<AtomicUsize>,
    fail_execution: bool,
}

impl ScopedSearchContext for MemorySearchContext {
    fn execute(&mut self, plan: &ExecutionPlan) -> Result<RawHits> {
        if self.fail_execution {
            return Err(QuarryError::index("execution failed"));
        }

        let matching: Vec<(u64, &MemoryDocument)> = self
            .documents
            .iter()
            .enumerate()
            .filter(|(_, doc)| plan.predicate.matches(*doc))
            .map(|(id, doc)| (id as u64, doc))
            .collect();

        // Facet counts cover the full matching set, not just the page.
        let mut facet_counts = HashMap::new();
        for field in &plan.facet_fields {
            let mut counts: AHashMap<String, u64> = AHashMap::new();
            for (_, doc) in &matching {
                if let Some(value) = doc.field(field) {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }
            facet_counts.insert(field.clone(), counts.into_iter().collect());
        }

        let total_hits = matching.len() as u64;
        let hits = matching
            .into_iter()
            .skip(plan.skip)
            .take(plan.take.unwrap_or(usize::MAX))
            .map(|(doc_id, doc)| RawHit {
                doc_id,
                score: 1.0,
                fields: doc.fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            })
            .collect();

        Ok(RawHits {
            hits,
            total_hits,
            facet_counts,
        })
    }
}

impl Drop for MemorySearchContext {
    fn drop(&mut self) {
        self.open_contexts.fetch_sub(1, Ordering::SeqCst);
    }
}
