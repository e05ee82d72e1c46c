//! Content classification
//!
//! A collection's shape is decided once, from the schema witness's key set,
//! the category name, and sidecar presence, never per record. The taxonomy
//! is closed: folder-bearing, captioned adventure, and exactly one fallback
//! shape.

use serde_json::{Map, Value};

/// Categories whose documents never get plain description extraction.
const DESCRIPTION_EXCLUDED: &[&str] = &["rules", "weapon"];

/// Category holding page-structured documents whose `pages` ids are
/// cross-linked against sibling records.
const LINKED_PAGES_CATEGORY: &str = "rules";

/// The fallback shape applied to records outside the adventure
/// substructures. First match wins; a document is never force-fit into more
/// than one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Plain `description` extraction from `system.description` or the
    /// top-level `description` field.
    Description,
    /// Macro-like document: name only.
    MacroName,
    /// Page-structured document: `pages` ids resolved against siblings.
    LinkedPages,
    /// No fallback block applies.
    None,
}

/// Shape decisions for one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionShape {
    /// Bundle exposes a `folders` field (sidecar present, or witness
    /// carries `color`/`folder`).
    pub folder_bearing: bool,
    /// Witness carries `name`: every record seeds an entry under its
    /// trimmed name.
    pub named: bool,
    /// Witness carries `caption`: adventure substructure extraction is
    /// enabled, each block gated by its own trigger key.
    pub captioned: bool,
    pub fallback: Fallback,
}

impl CollectionShape {
    /// Classify a collection from its witness key set.
    pub fn detect(
        category: &str,
        witness: Option<&Map<String, Value>>,
        sidecar_present: bool,
    ) -> Self {
        let has = |key: &str| witness.is_some_and(|w| w.contains_key(key));

        let fallback = if !has("prototypeToken") && !DESCRIPTION_EXCLUDED.contains(&category) {
            Fallback::Description
        } else if has("command") {
            Fallback::MacroName
        } else if category == LINKED_PAGES_CATEGORY {
            Fallback::LinkedPages
        } else {
            Fallback::None
        };

        Self {
            folder_bearing: sidecar_present || has("color") || has("folder"),
            named: has("name"),
            captioned: has("caption"),
            fallback,
        }
    }
}
