//! Query composition and execution pipeline.
//!
//! One request flows through: base composition ([`composer`]) → content
//! predicates → facet registration/restriction ([`facet`]) → paging
//! ([`paging`]) → execution, sequenced by [`service::SearchService`].

pub mod composer;
pub mod facet;
pub mod paging;
pub mod service;

pub use self::composer::QueryComposer;
pub use self::facet::gather_facets;
pub use self::paging::DEFAULT_RESULTS_PER_PAGE;
pub use self::service::SearchService;
