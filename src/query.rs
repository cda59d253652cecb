//! Caller-facing query and settings value types.
//!
//! A [`Query`] describes intent for one search call: paging plus any facet
//! restrictions. [`SearchSettings`] is read-only configuration for the
//! service as a whole: scoping, language, type restrictions. Both are
//! immutable for the duration of a request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::TypeId;

/// A reference to a scope root path in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRoot {
    /// Full path of the root. Documents match when their path starts with it.
    pub path: String,
}

impl QueryRoot {
    /// Create a query root for the given path.
    pub fn new<S: Into<String>>(path: S) -> Self {
        QueryRoot { path: path.into() }
    }
}

/// A facet definition surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFacet {
    /// Index field the facet counts and restricts on.
    pub field_name: String,
}

impl QueryFacet {
    /// Create a facet over the given field.
    pub fn new<S: Into<String>>(field_name: S) -> Self {
        QueryFacet {
            field_name: field_name.into(),
        }
    }
}

/// Caller intent for a single search call.
///
/// `page` and `results_per_page` are taken as-is and clamped by the paging
/// rules (`page < 0` becomes `0`, `results_per_page <= 0` becomes the
/// default of 10). Facet selections map a facet field name to the values the
/// caller picked; `None` entries are skipped during restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Query {
    /// Zero-based page number. Negative values clamp to the first page.
    #[serde(default)]
    pub page: i64,
    /// Requested page size. Non-positive values fall back to the default.
    #[serde(default)]
    pub results_per_page: i64,
    /// Selected facet values, keyed by facet field name.
    #[serde(default)]
    pub facet_selections: HashMap<String, Vec<Option<String>>>,
}

impl Query {
    /// Create a query for the given page and page size.
    pub fn new(page: i64, results_per_page: i64) -> Self {
        Query {
            page,
            results_per_page,
            ..Query::default()
        }
    }

    /// Add a facet selection, replacing any previous selection for the field.
    pub fn with_facet_selection<S: Into<String>>(
        mut self,
        field_name: S,
        values: Vec<Option<String>>,
    ) -> Self {
        self.facet_selections.insert(field_name.into(), values);
        self
    }

    /// Get the selected values for a facet field, if any.
    pub fn selected_values(&self, field_name: &str) -> Option<&[Option<String>]> {
        self.facet_selections
            .get(field_name)
            .map(|values| values.as_slice())
    }
}

/// Read-only configuration for a search service instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Optional explicit root; also serves as the scope anchor for index
    /// resolution when present.
    #[serde(default)]
    pub root: Option<QueryRoot>,
    /// Fallback scope anchor when no explicit root is configured.
    #[serde(default)]
    pub context_path: Option<String>,
    /// Language documents must be stored in to be eligible.
    #[serde(default)]
    pub language: String,
    /// Explicit content-type restriction. Empty means "use the default
    /// indexable-item rule" instead.
    #[serde(default)]
    pub templates: Vec<TypeId>,
    /// Require documents to have a result formatter registered.
    #[serde(default)]
    pub must_have_formatter: bool,
}

impl SearchSettings {
    /// Create settings for the given language with no scoping configured.
    pub fn new<S: Into<String>>(language: S) -> Self {
        SearchSettings {
            language: language.into(),
            ..SearchSettings::default()
        }
    }

    /// Set the explicit root.
    pub fn with_root(mut self, root: QueryRoot) -> Self {
        self.root = Some(root);
        self
    }

    /// Set the fallback scope anchor.
    pub fn with_context_path<S: Into<String>>(mut self, path: S) -> Self {
        self.context_path = Some(path.into());
        self
    }

    /// Restrict results to the given content types.
    pub fn with_templates(mut self, templates: Vec<TypeId>) -> Self {
        self.templates = templates;
        self
    }

    /// Require documents to have a result formatter registered.
    pub fn with_must_have_formatter(mut self, required: bool) -> Self {
        self.must_have_formatter = required;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_facet_selection() {
        let query = Query::new(0, 10).with_facet_selection(
            "color",
            vec![Some("red".to_string()), None, Some("blue".to_string())],
        );

        let values = query.selected_values("color").unwrap();
        assert_eq!(values.len(), 3);
        assert!(query.selected_values("size").is_none());
    }

    #[test]
    fn test_query_deserialization_defaults() {
        let query: Query = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.results_per_page, 0);
        assert!(query.facet_selections.is_empty());

        let query: Query =
            serde_json::from_str(r#"{"page":2,"facet_selections":{"color":["red",null]}}"#)
                .unwrap();
        assert_eq!(query.page, 2);
        assert_eq!(
            query.selected_values("color").unwrap(),
            &[Some("red".to_string()), None]
        );
    }

    #[test]
    fn test_settings_builder() {
        let settings = SearchSettings::new("en")
            .with_root(QueryRoot::new("/site/home"))
            .with_templates(vec![TypeId::new("news")])
            .with_must_have_formatter(true);

        assert_eq!(settings.language, "en");
        assert_eq!(settings.root.as_ref().unwrap().path, "/site/home");
        assert_eq!(settings.templates.len(), 1);
        assert!(settings.must_have_formatter);
    }
}
