//! # Quarry
//!
//! A composable, scoped query layer for faceted search indexes.
//!
//! Callers describe intent with a small [`query::Query`] object; Quarry
//! translates it into a fully-scoped, filtered query by combining
//! independently-sourced boolean conditions — root scoping, language and
//! version filters, visibility/type rules, pluggable content predicates,
//! and facet restrictions — executes it against an index collaborator, and
//! hands back structured results.
//!
//! ## Features
//!
//! - Tagged predicate tree with AND/OR/NOT combinators
//! - Provider plugins for roots, content predicates, and facets
//! - Default-deny scoping: an empty root set matches nothing
//! - Facet counting independent of facet restriction
//! - Pluggable index and results-factory collaborators

pub mod document;
pub mod error;
pub mod index;
pub mod predicate;
pub mod provider;
pub mod query;
pub mod results;
pub mod search;

pub mod prelude {
    //! Convenience re-exports for typical callers.

    pub use crate::document::{IndexableItem, TypeId};
    pub use crate::error::{QuarryError, Result};
    pub use crate::index::{ExecutionPlan, RawHit, RawHits, ScopedSearchContext, SearchIndexResolver};
    pub use crate::predicate::Predicate;
    pub use crate::provider::{
        ProviderRegistry, QueryFacetProvider, QueryPredicateProvider, QueryRootProvider,
    };
    pub use crate::query::{Query, QueryFacet, QueryRoot, SearchSettings};
    pub use crate::results::{DefaultResultsFactory, SearchResults, SearchResultsFactory};
    pub use crate::search::SearchService;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
