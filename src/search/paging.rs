//! Paging rules.
//!
//! Pages are zero-based: page 0 is the first page. Out-of-range caller
//! input is clamped rather than rejected.

use crate::index::ExecutionPlan;
use crate::query::Query;

/// Page size used when the caller requests a non-positive size.
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Effective page for a query: negative pages clamp to the first page.
pub fn effective_page(query: &Query) -> usize {
    query.page.max(0) as usize
}

/// Effective page size for a query: non-positive sizes fall back to the
/// default.
pub fn effective_size(query: &Query) -> usize {
    if query.results_per_page > 0 {
        query.results_per_page as usize
    } else {
        DEFAULT_RESULTS_PER_PAGE
    }
}

/// Apply the query's paging to the plan as a single page operation.
///
/// The skip offset saturates: a page beyond the addressable range lands
/// past every result instead of overflowing.
pub fn apply(plan: &mut ExecutionPlan, query: &Query) {
    let page = effective_page(query);
    let size = effective_size(query);
    plan.skip = page.saturating_mul(size);
    plan.take = Some(size);
}
