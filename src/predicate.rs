//! Composable boolean predicates over indexable documents.
//!
//! A [`Predicate`] is a tagged expression tree built before any index call
//! is made; evaluation happens later, against each candidate document. The
//! seed values matter: permissive OR-chains accumulate from
//! [`Predicate::none`] ("match nothing"), restrictive AND-chains from
//! [`Predicate::all`] ("match everything"). An OR-chain that never receives
//! a term therefore stays a deny, and an AND-chain that never receives a
//! term stays a no-op.

use std::fmt;
use std::sync::Arc;

use crate::document::{IndexableItem, TypeId};

/// Function type for custom predicate leaves.
pub type PredicateFn = dyn Fn(&dyn IndexableItem) -> bool + Send + Sync;

/// A caller-supplied matching function wrapped as a predicate leaf.
///
/// Used by predicate providers whose conditions fall outside the built-in
/// leaf vocabulary (e.g. domain-specific validity windows).
#[derive(Clone)]
pub struct CustomPredicate {
    label: String,
    func: Arc<PredicateFn>,
}

impl CustomPredicate {
    /// Create a custom leaf with a label used in debug output.
    pub fn new<S, F>(label: S, func: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn IndexableItem) -> bool + Send + Sync + 'static,
    {
        CustomPredicate {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    /// Evaluate the wrapped function against a document.
    pub fn matches(&self, item: &dyn IndexableItem) -> bool {
        (self.func)(item)
    }

    /// Get the label for this leaf.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPredicate")
            .field("label", &self.label)
            .finish()
    }
}

/// A composable boolean condition over [`IndexableItem`] attributes.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Matches every document.
    All,
    /// Matches no document.
    None,
    /// Matches when every sub-predicate matches.
    And(Vec<Predicate>),
    /// Matches when any sub-predicate matches.
    Or(Vec<Predicate>),
    /// Matches when the sub-predicate does not match.
    Not(Box<Predicate>),
    /// Document path starts with the given root path.
    PathStartsWith(String),
    /// Document language equals the given language.
    LanguageEquals(String),
    /// Document is the latest version.
    LatestVersion,
    /// Document carries the given content type (including ancestors).
    HasContentType(TypeId),
    /// Document has opted into search-result visibility.
    ShowInSearchResults,
    /// Document has a result formatter registered.
    HasResultFormatter,
    /// Dynamic field equals the given value.
    FieldEquals {
        /// Field name resolved through the dynamic accessor.
        field: String,
        /// Expected field value.
        value: String,
    },
    /// Caller-supplied matching function.
    Custom(CustomPredicate),
}

impl Predicate {
    /// The "match everything" seed for AND accumulation.
    pub fn all() -> Self {
        Predicate::All
    }

    /// The "match nothing" seed for OR accumulation.
    pub fn none() -> Self {
        Predicate::None
    }

    /// Leaf: document path starts with the given root path.
    pub fn path_starts_with<S: Into<String>>(path: S) -> Self {
        Predicate::PathStartsWith(path.into())
    }

    /// Leaf: document language equals the given language.
    pub fn language_equals<S: Into<String>>(language: S) -> Self {
        Predicate::LanguageEquals(language.into())
    }

    /// Leaf: document carries the given content type.
    pub fn has_content_type(id: TypeId) -> Self {
        Predicate::HasContentType(id)
    }

    /// Leaf: dynamic field equals the given value.
    pub fn field_equals<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Predicate::FieldEquals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Leaf: caller-supplied matching function.
    pub fn custom<S, F>(label: S, func: F) -> Self
    where
        S: Into<String>,
        F: Fn(&dyn IndexableItem) -> bool + Send + Sync + 'static,
    {
        Predicate::Custom(CustomPredicate::new(label, func))
    }

    /// Conjunction. `All` is the identity, `None` annihilates.
    pub fn and(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::All, p) | (p, Predicate::All) => p,
            (Predicate::None, _) | (_, Predicate::None) => Predicate::None,
            (Predicate::And(mut lhs), Predicate::And(rhs)) => {
                lhs.extend(rhs);
                Predicate::And(lhs)
            }
            (Predicate::And(mut lhs), p) => {
                lhs.push(p);
                Predicate::And(lhs)
            }
            (p, Predicate::And(mut rhs)) => {
                rhs.insert(0, p);
                Predicate::And(rhs)
            }
            (lhs, rhs) => Predicate::And(vec![lhs, rhs]),
        }
    }

    /// Disjunction. `None` is the identity, `All` annihilates.
    pub fn or(self, other: Predicate) -> Predicate {
        match (self, other) {
            (Predicate::None, p) | (p, Predicate::None) => p,
            (Predicate::All, _) | (_, Predicate::All) => Predicate::All,
            (Predicate::Or(mut lhs), Predicate::Or(rhs)) => {
                lhs.extend(rhs);
                Predicate::Or(lhs)
            }
            (Predicate::Or(mut lhs), p) => {
                lhs.push(p);
                Predicate::Or(lhs)
            }
            (p, Predicate::Or(mut rhs)) => {
                rhs.insert(0, p);
                Predicate::Or(rhs)
            }
            (lhs, rhs) => Predicate::Or(vec![lhs, rhs]),
        }
    }

    /// Negation.
    pub fn not(self) -> Predicate {
        match self {
            Predicate::All => Predicate::None,
            Predicate::None => Predicate::All,
            Predicate::Not(inner) => *inner,
            p => Predicate::Not(Box::new(p)),
        }
    }

    /// Check whether the predicate can match any document at all.
    pub fn is_none(&self) -> bool {
        matches!(self, Predicate::None)
    }

    /// Evaluate the predicate against a document. Pure, no I/O.
    pub fn matches(&self, item: &dyn IndexableItem) -> bool {
        match self {
            Predicate::All => true,
            Predicate::None => false,
            Predicate::And(preds) => preds.iter().all(|p| p.matches(item)),
            Predicate::Or(preds) => preds.iter().any(|p| p.matches(item)),
            Predicate::Not(pred) => !pred.matches(item),
            Predicate::PathStartsWith(root) => item.path().starts_with(root.as_str()),
            Predicate::LanguageEquals(language) => item.language() == language.as_str(),
            Predicate::LatestVersion => item.is_latest_version(),
            Predicate::HasContentType(id) => item.has_content_type(id),
            Predicate::ShowInSearchResults => item.show_in_search_results(),
            Predicate::HasResultFormatter => item.has_result_formatter(),
            Predicate::FieldEquals { field, value } => {
                item.field(field).is_some_and(|v| v == value.as_str())
            }
            Predicate::Custom(custom) => custom.matches(item),
        }
    }
}
