//! The search service orchestrator.
//!
//! Sequences one request: compose the base predicate, fold in provider
//! content predicates, apply facets and paging, resolve a scoped index
//! context, execute, and delegate result shaping to the results factory.
//! All predicate construction happens before the index is touched, so
//! configuration failures surface without any index call; the scoped
//! context is a boxed RAII value and is released on every exit path.

use std::sync::Arc;

use log::debug;

use crate::error::{QuarryError, Result};
use crate::index::{ExecutionPlan, SearchIndexResolver};
use crate::predicate::Predicate;
use crate::provider::ProviderRegistry;
use crate::query::{Query, SearchSettings};
use crate::results::{SearchResults, SearchResultsFactory};
use crate::search::composer::QueryComposer;
use crate::search::{facet, paging};

/// Composes and executes scoped, filtered searches.
pub struct SearchService {
    settings: SearchSettings,
    registry: Arc<ProviderRegistry>,
    index_resolver: Arc<dyn SearchIndexResolver>,
    results_factory: Arc<dyn SearchResultsFactory>,
    refinement: Option<Predicate>,
}

impl SearchService {
    /// Create a service over the given settings, registry, and
    /// collaborators.
    pub fn new(
        settings: SearchSettings,
        registry: Arc<ProviderRegistry>,
        index_resolver: Arc<dyn SearchIndexResolver>,
        results_factory: Arc<dyn SearchResultsFactory>,
    ) -> Self {
        SearchService {
            settings,
            registry,
            index_resolver,
            results_factory,
            refinement: None,
        }
    }

    /// AND an extra predicate into the base composition.
    ///
    /// This is the hook for domain services that narrow every query the
    /// same way, e.g. an exhibition search that only surfaces exhibitions
    /// whose start date lies in the future.
    pub fn with_scope_refinement(mut self, predicate: Predicate) -> Self {
        self.refinement = Some(predicate);
        self
    }

    /// The settings this service was constructed with.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Run a full search for the given query.
    pub fn search(&self, query: &Query) -> Result<SearchResults> {
        let anchor = self.scope_anchor()?;

        let predicate = self.base_predicate()?.and(self.content_predicate(query));
        let mut plan = ExecutionPlan::new(predicate);
        facet::apply(&mut plan, &self.registry, query);
        paging::apply(&mut plan, query);

        debug!(
            "search: anchor={}, facets={}, skip={}, take={:?}",
            anchor,
            plan.facet_fields.len(),
            plan.skip,
            plan.take
        );

        let mut context = self.index_resolver.resolve(&anchor)?;
        let raw = context.execute(&plan)?;
        Ok(self.results_factory.create(raw, Some(query)))
    }

    /// List every document passing base eligibility, unpaged.
    pub fn find_all(&self) -> Result<SearchResults> {
        self.find_all_range(0, 0)
    }

    /// List documents passing base eligibility with manual skip/take.
    ///
    /// No content predicates and no facets are applied. A `skip` or `take`
    /// of 0 means "no limit" for that parameter.
    pub fn find_all_range(&self, skip: usize, take: usize) -> Result<SearchResults> {
        let anchor = self.scope_anchor()?;

        let mut plan = ExecutionPlan::new(self.base_predicate()?);
        if skip > 0 {
            plan.skip = skip;
        }
        if take > 0 {
            plan.take = Some(take);
        }

        debug!("find_all: anchor={}, skip={}, take={:?}", anchor, plan.skip, plan.take);

        let mut context = self.index_resolver.resolve(&anchor)?;
        let raw = context.execute(&plan)?;
        Ok(self.results_factory.create(raw, None))
    }

    /// The anchor used to resolve the physical index: the explicit root
    /// when configured, otherwise the context path. Having neither is a
    /// hard configuration failure, not an empty-result deny.
    fn scope_anchor(&self) -> Result<String> {
        self.settings
            .root
            .as_ref()
            .map(|root| root.path.clone())
            .or_else(|| self.settings.context_path.clone())
            .ok_or_else(|| {
                QuarryError::configuration("could not determine a scope anchor for the search")
            })
    }

    /// Base eligibility predicate plus any configured refinement.
    fn base_predicate(&self) -> Result<Predicate> {
        let mut predicate = QueryComposer::new(&self.settings, &self.registry).compose()?;
        if let Some(refinement) = &self.refinement {
            predicate = predicate.and(refinement.clone());
        }
        Ok(predicate)
    }

    /// OR over every predicate provider's content condition. With no
    /// providers registered this stays "match nothing": content predicates
    /// are additive permission, not restriction.
    fn content_predicate(&self, query: &Query) -> Predicate {
        let mut predicate = Predicate::none();
        for provider in self.registry.predicate_providers() {
            predicate = predicate.or(provider.query_predicate(query));
        }
        predicate
    }
}
