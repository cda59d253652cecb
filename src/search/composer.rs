//! Base query composition.
//!
//! Builds the eligibility predicate every request starts from, before any
//! content predicate or facet restriction is folded in: root scoping,
//! language filter, latest-version filter, and the visibility/type filter.
//! Construction is pure expression building; no index I/O happens here.

use crate::document::TypeId;
use crate::error::{QuarryError, Result};
use crate::predicate::Predicate;
use crate::provider::ProviderRegistry;
use crate::query::SearchSettings;

/// Composes the base eligible-document predicate from settings and
/// registered providers.
pub struct QueryComposer<'a> {
    settings: &'a SearchSettings,
    registry: &'a ProviderRegistry,
}

impl<'a> QueryComposer<'a> {
    /// Create a composer over the given settings and registry.
    pub fn new(settings: &'a SearchSettings, registry: &'a ProviderRegistry) -> Self {
        QueryComposer { settings, registry }
    }

    /// Build the base predicate: root scoping AND language AND latest
    /// version AND the visibility/type filter.
    pub fn compose(&self) -> Result<Predicate> {
        let mut predicate = self
            .root_predicate()
            .and(Predicate::language_equals(self.settings.language.clone()))
            .and(Predicate::LatestVersion);

        if self.settings.must_have_formatter {
            predicate = predicate.and(Predicate::HasResultFormatter);
        }

        if self.settings.templates.is_empty() {
            predicate = predicate.and(self.indexable_item_rule());
        } else {
            // Empty ids in explicit settings are a configuration error
            // rather than a silent drop.
            if self.settings.templates.iter().any(|id| id.is_empty()) {
                return Err(QuarryError::configuration(
                    "empty content-type id in type restriction",
                ));
            }
            predicate = predicate.and(Self::content_type_predicate(&self.settings.templates));
        }

        Ok(predicate)
    }

    /// OR over the union of the settings root and every root provider's
    /// root. An empty root set stays `None`: no scoping means no matches,
    /// never "everything".
    fn root_predicate(&self) -> Predicate {
        let mut roots = Predicate::none();

        if let Some(root) = &self.settings.root {
            roots = roots.or(Predicate::path_starts_with(root.path.clone()));
        }
        for provider in self.registry.root_providers() {
            if let Some(root) = provider.root() {
                roots = roots.or(Predicate::path_starts_with(root.path));
            }
        }

        roots
    }

    /// The default visibility rule used when no explicit templates are
    /// configured: documents outside the indexable contract are visible;
    /// documents inside it must opt in via `show_in_search_results`. The
    /// rule is conjoined with the union of the types the registered
    /// predicate providers declare, so with no providers registered this
    /// branch matches nothing.
    fn indexable_item_rule(&self) -> Predicate {
        let indexed_item = TypeId::indexed_item();

        let not_indexed_item = Predicate::has_content_type(indexed_item.clone()).not();
        let opted_in = Predicate::has_content_type(indexed_item).and(Predicate::ShowInSearchResults);
        let visibility = not_indexed_item.or(opted_in);

        let mut provider_types = Predicate::none();
        for provider in self.registry.predicate_providers() {
            provider_types =
                provider_types.or(Self::content_type_predicate(&provider.supported_content_types()));
        }

        visibility.and(provider_types)
    }

    /// OR over the given content types, seeded from "match nothing".
    fn content_type_predicate(types: &[TypeId]) -> Predicate {
        let mut predicate = Predicate::none();
        for id in types {
            predicate = predicate.or(Predicate::has_content_type(id.clone()));
        }
        predicate
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::index::memory::MemoryDocument;
    use crate::provider::{QueryPredicateProvider, QueryRootProvider};
    use crate::query::{Query, QueryRoot};

    struct FixedRoot(&'static str);

    impl QueryRootProvider for FixedRoot {
        fn root(&self) -> Option<QueryRoot> {
            Some(QueryRoot::new(self.0))
        }
    }

    struct TypedProvider(&'static str);

    impl QueryPredicateProvider for TypedProvider {
        fn supported_content_types(&self) -> Vec<TypeId> {
            vec![TypeId::new(self.0)]
        }

        fn query_predicate(&self, _query: &Query) -> Predicate {
            Predicate::all()
        }
    }

    fn eligible_doc() -> MemoryDocument {
        MemoryDocument::builder("/site/home/page", "en")
            .content_type("news")
            .build()
    }

    #[test]
    fn test_empty_root_set_denies_everything() -> Result<()> {
        let settings = SearchSettings::new("en").with_templates(vec![TypeId::new("news")]);
        let registry = ProviderRegistry::empty();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        assert!(!predicate.matches(&eligible_doc()));
        Ok(())
    }

    #[test]
    fn test_root_set_is_union_of_settings_and_providers() -> Result<()> {
        let settings = SearchSettings::new("en")
            .with_root(QueryRoot::new("/site"))
            .with_templates(vec![TypeId::new("news")]);
        let registry = ProviderRegistry::builder()
            .root_provider(Arc::new(FixedRoot("/extra")))
            .build();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        assert!(predicate.matches(&eligible_doc()));
        let extra = MemoryDocument::builder("/extra/page", "en")
            .content_type("news")
            .build();
        assert!(predicate.matches(&extra));
        let outside = MemoryDocument::builder("/elsewhere/page", "en")
            .content_type("news")
            .build();
        assert!(!predicate.matches(&outside));
        Ok(())
    }

    #[test]
    fn test_language_and_version_filters() -> Result<()> {
        let settings = SearchSettings::new("en")
            .with_root(QueryRoot::new("/site"))
            .with_templates(vec![TypeId::new("news")]);
        let registry = ProviderRegistry::empty();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        let wrong_language = MemoryDocument::builder("/site/page", "da")
            .content_type("news")
            .build();
        assert!(!predicate.matches(&wrong_language));

        let old_version = MemoryDocument::builder("/site/page", "en")
            .content_type("news")
            .latest_version(false)
            .build();
        assert!(!predicate.matches(&old_version));
        Ok(())
    }

    #[test]
    fn test_template_restriction() -> Result<()> {
        let settings = SearchSettings::new("en")
            .with_root(QueryRoot::new("/site"))
            .with_templates(vec![TypeId::new("news"), TypeId::new("event")]);
        let registry = ProviderRegistry::empty();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        let event = MemoryDocument::builder("/site/e", "en")
            .content_type("event")
            .build();
        assert!(predicate.matches(&event));
        let article = MemoryDocument::builder("/site/a", "en")
            .content_type("article")
            .build();
        assert!(!predicate.matches(&article));
        Ok(())
    }

    #[test]
    fn test_empty_template_id_is_configuration_error() {
        let settings = SearchSettings::new("en")
            .with_root(QueryRoot::new("/site"))
            .with_templates(vec![TypeId::new("  ")]);
        let registry = ProviderRegistry::empty();
        let result = QueryComposer::new(&settings, &registry).compose();

        assert!(matches!(result, Err(QuarryError::Configuration(_))));
    }

    #[test]
    fn test_must_have_formatter_applies_on_both_branches() -> Result<()> {
        let registry = ProviderRegistry::builder()
            .predicate_provider(Arc::new(TypedProvider("news")))
            .build();

        for templates in [vec![], vec![TypeId::new("news")]] {
            let settings = SearchSettings::new("en")
                .with_root(QueryRoot::new("/site"))
                .with_templates(templates)
                .with_must_have_formatter(true);
            let predicate = QueryComposer::new(&settings, &registry).compose()?;

            let without_formatter = MemoryDocument::builder("/site/a", "en")
                .content_type("news")
                .build();
            assert!(!predicate.matches(&without_formatter));

            let with_formatter = MemoryDocument::builder("/site/b", "en")
                .content_type("news")
                .has_result_formatter(true)
                .build();
            assert!(predicate.matches(&with_formatter));
        }
        Ok(())
    }

    #[test]
    fn test_default_rule_requires_opt_in_for_indexed_items() -> Result<()> {
        let settings = SearchSettings::new("en").with_root(QueryRoot::new("/site"));
        let registry = ProviderRegistry::builder()
            .predicate_provider(Arc::new(TypedProvider("news")))
            .build();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        // Not under the indexable contract: visible regardless of the flag.
        let plain = MemoryDocument::builder("/site/plain", "en")
            .content_type("news")
            .show_in_search_results(false)
            .build();
        assert!(predicate.matches(&plain));

        // Under the contract: needs the opt-in flag.
        let hidden = MemoryDocument::builder("/site/hidden", "en")
            .content_type("news")
            .indexed_item()
            .show_in_search_results(false)
            .build();
        assert!(!predicate.matches(&hidden));

        let visible = MemoryDocument::builder("/site/visible", "en")
            .content_type("news")
            .indexed_item()
            .show_in_search_results(true)
            .build();
        assert!(predicate.matches(&visible));
        Ok(())
    }

    #[test]
    fn test_default_rule_denies_all_without_predicate_providers() -> Result<()> {
        let settings = SearchSettings::new("en").with_root(QueryRoot::new("/site"));
        let registry = ProviderRegistry::empty();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        let doc = MemoryDocument::builder("/site/page", "en")
            .content_type("news")
            .show_in_search_results(true)
            .build();
        assert!(!predicate.matches(&doc));
        Ok(())
    }

    #[test]
    fn test_default_rule_requires_provider_declared_type() -> Result<()> {
        let settings = SearchSettings::new("en").with_root(QueryRoot::new("/site"));
        let registry = ProviderRegistry::builder()
            .predicate_provider(Arc::new(TypedProvider("news")))
            .build();
        let predicate = QueryComposer::new(&settings, &registry).compose()?;

        let undeclared = MemoryDocument::builder("/site/a", "en")
            .content_type("article")
            .build();
        assert!(!predicate.matches(&undeclared));
        Ok(())
    }
}
