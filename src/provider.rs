//! Provider capabilities and the process-wide registry.
//!
//! Providers contribute independent pieces of a composed query: extra scope
//! roots, content-matching predicates, and facet definitions. The registry
//! is built once at startup through [`ProviderRegistryBuilder`] and is
//! read-only afterwards; request processing only ever reads it, so shared
//! access needs no locking.

use std::sync::Arc;

use crate::document::TypeId;
use crate::predicate::Predicate;
use crate::query::{Query, QueryFacet, QueryRoot};

/// Capability: supply an additional scope root.
pub trait QueryRootProvider: Send + Sync {
    /// The root this provider contributes, if any.
    fn root(&self) -> Option<QueryRoot>;
}

/// Capability: supply a content-matching condition for a query.
///
/// Content predicates are additive permission: a document matches the
/// aggregate when any provider's condition matches it.
pub trait QueryPredicateProvider: Send + Sync {
    /// Content types this provider is interested in.
    fn supported_content_types(&self) -> Vec<TypeId>;

    /// The matching condition for the given query.
    fn query_predicate(&self, query: &Query) -> Predicate;
}

/// Capability: supply facet definitions to surface on results.
pub trait QueryFacetProvider: Send + Sync {
    /// Facets this provider wants computed.
    fn facets(&self) -> Vec<QueryFacet>;
}

/// Read-only collection of registered providers.
///
/// Held by the composing application and passed into the search service at
/// construction, so tests can inject fakes.
#[derive(Default)]
pub struct ProviderRegistry {
    root_providers: Vec<Arc<dyn QueryRootProvider>>,
    predicate_providers: Vec<Arc<dyn QueryPredicateProvider>>,
    facet_providers: Vec<Arc<dyn QueryFacetProvider>>,
}

impl ProviderRegistry {
    /// Create a builder for registering providers.
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// An empty registry (no providers of any kind).
    pub fn empty() -> Self {
        ProviderRegistry::default()
    }

    /// Registered root providers, in registration order.
    pub fn root_providers(&self) -> &[Arc<dyn QueryRootProvider>] {
        &self.root_providers
    }

    /// Registered predicate providers, in registration order.
    pub fn predicate_providers(&self) -> &[Arc<dyn QueryPredicateProvider>] {
        &self.predicate_providers
    }

    /// Registered facet providers, in registration order.
    pub fn facet_providers(&self) -> &[Arc<dyn QueryFacetProvider>] {
        &self.facet_providers
    }
}

/// Builder for [`ProviderRegistry`].
#[derive(Default)]
pub struct ProviderRegistryBuilder {
    registry: ProviderRegistry,
}

impl ProviderRegistryBuilder {
    /// Register a root provider.
    pub fn root_provider(mut self, provider: Arc<dyn QueryRootProvider>) -> Self {
        self.registry.root_providers.push(provider);
        self
    }

    /// Register a predicate provider.
    pub fn predicate_provider(mut self, provider: Arc<dyn QueryPredicateProvider>) -> Self {
        self.registry.predicate_providers.push(provider);
        self
    }

    /// Register a facet provider.
    pub fn facet_provider(mut self, provider: Arc<dyn QueryFacetProvider>) -> Self {
        self.registry.facet_providers.push(provider);
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> ProviderRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRoot(&'static str);

    impl QueryRootProvider for FixedRoot {
        fn root(&self) -> Option<QueryRoot> {
            Some(QueryRoot::new(self.0))
        }
    }

    struct CategoryFacets;

    impl QueryFacetProvider for CategoryFacets {
        fn facets(&self) -> Vec<QueryFacet> {
            vec![QueryFacet::new("category")]
        }
    }

    #[test]
    fn test_registration_order_preserved() {
        let registry = ProviderRegistry::builder()
            .root_provider(Arc::new(FixedRoot("/a")))
            .root_provider(Arc::new(FixedRoot("/b")))
            .facet_provider(Arc::new(CategoryFacets))
            .build();

        let roots: Vec<_> = registry
            .root_providers()
            .iter()
            .filter_map(|p| p.root())
            .collect();
        assert_eq!(roots, vec![QueryRoot::new("/a"), QueryRoot::new("/b")]);
        assert_eq!(registry.facet_providers().len(), 1);
        assert!(registry.predicate_providers().is_empty());
    }

    #[test]
    fn test_empty_registry() {
        let registry = ProviderRegistry::empty();
        assert!(registry.root_providers().is_empty());
        assert!(registry.predicate_providers().is_empty());
        assert!(registry.facet_providers().is_empty());
    }
}
