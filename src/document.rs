//! Document capability surface for query composition.
//!
//! The composition layer never assumes a concrete document schema. It only
//! requires the small set of attributes defined by [`IndexableItem`]; index
//! collaborators implement the trait for whatever document type they store.
//! Domain fields beyond this surface are reached through the dynamic
//! [`IndexableItem::field`] accessor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel content-type id for the base indexable contract.
///
/// Documents carrying this type have opted into the indexable contract and
/// must also set `show_in_search_results` to appear in default searches.
pub const INDEXED_ITEM_TYPE: &str = "indexed-item";

/// An opaque content-type identifier.
///
/// Type ids are compared case-insensitively after trimming, so ids sourced
/// from settings files and ids sourced from the index agree on equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(String);

impl TypeId {
    /// Create a type id, normalizing case and surrounding whitespace.
    pub fn new<S: AsRef<str>>(id: S) -> Self {
        TypeId(id.as_ref().trim().to_lowercase())
    }

    /// The sentinel type id for the base indexable contract.
    pub fn indexed_item() -> Self {
        TypeId::new(INDEXED_ITEM_TYPE)
    }

    /// Get the normalized id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the id is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeId {
    fn from(id: &str) -> Self {
        TypeId::new(id)
    }
}

/// The attribute surface a document must expose to be queryable.
pub trait IndexableItem: Send + Sync {
    /// Full path of the document in the content tree.
    fn path(&self) -> &str;

    /// Language the document version is stored in.
    fn language(&self) -> &str;

    /// Whether this is the latest version of the document.
    fn is_latest_version(&self) -> bool;

    /// Whether the document carries the given content type, including
    /// inherited/ancestor types.
    fn has_content_type(&self, id: &TypeId) -> bool;

    /// Opt-in visibility flag carried by the base indexable contract.
    fn show_in_search_results(&self) -> bool;

    /// Whether a result formatter is registered for the document.
    fn has_result_formatter(&self) -> bool;

    /// Dynamic accessor for fields outside the fixed attribute surface.
    ///
    /// Returns `None` when the document has no value for the field.
    fn field(&self, name: &str) -> Option<&str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id_normalization() {
        assert_eq!(TypeId::new(" Exhibition "), TypeId::new("exhibition"));
        assert_eq!(TypeId::new("NEWS").as_str(), "news");
    }

    #[test]
    fn test_sentinel_type_id() {
        assert_eq!(TypeId::indexed_item().as_str(), INDEXED_ITEM_TYPE);
        assert_eq!(TypeId::new("Indexed-Item"), TypeId::indexed_item());
    }

    #[test]
    fn test_empty_type_id() {
        assert!(TypeId::new("   ").is_empty());
        assert!(!TypeId::new("t1").is_empty());
    }
}
