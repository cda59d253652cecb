//! Facet registration and restriction.
//!
//! Facets do two independent things: every gathered facet field is
//! registered on the plan so the index computes value counts, and fields
//! the caller selected values for additionally narrow the result set. A
//! request with no selections still gets facet metadata but no narrowing.

use ahash::AHashSet;

use crate::index::ExecutionPlan;
use crate::predicate::Predicate;
use crate::provider::ProviderRegistry;
use crate::query::{Query, QueryFacet};

/// Gather facets from every registered provider, deduplicated by field
/// name. First occurrence wins; registration order is preserved.
pub fn gather_facets(registry: &ProviderRegistry) -> Vec<QueryFacet> {
    let mut seen: AHashSet<String> = AHashSet::new();
    let mut facets = Vec::new();

    for provider in registry.facet_providers() {
        for facet in provider.facets() {
            if seen.insert(facet.field_name.clone()) {
                facets.push(facet);
            }
        }
    }

    facets
}

/// Register facet fields on the plan and narrow by any caller-selected
/// facet values.
pub fn apply(plan: &mut ExecutionPlan, registry: &ProviderRegistry, query: &Query) {
    let mut restriction = Predicate::all();
    let mut restricted = false;

    for facet in gather_facets(registry) {
        if facet.field_name.is_empty() {
            continue;
        }

        if let Some(values) = query.selected_values(&facet.field_name) {
            let mut value_predicate = Predicate::none();
            for value in values.iter().flatten() {
                value_predicate = value_predicate
                    .or(Predicate::field_equals(facet.field_name.as_str(), value.as_str()));
            }
            restriction = restriction.and(value_predicate);
            restricted = true;
        }

        plan.facet_fields.push(facet.field_name);
    }

    // No selections at all must stay a no-op, not a deny.
    if restricted {
        let predicate = std::mem::replace(&mut plan.predicate, Predicate::None);
        plan.predicate = predicate.and(restriction);
    }
}
