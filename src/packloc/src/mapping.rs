//! Field-substitution mapping table
//!
//! The bundle's `mapping` records which source field paths feed which
//! optional translatable fields, so a reimport can substitute translations
//! back into the right place. Entries accumulate as fields are actually
//! extracted; the table is created fresh per bundle and threaded through
//! the projector as an explicit argument.

use serde_json::{Map, Value};

/// Target paths for the actor detail fields seeded on captioned
/// collections.
const ACTOR_DETAIL_TARGETS: &[(&str, &str)] = &[
    ("publicNotes", "system.details.publicNotes"),
    ("privateNotes", "system.details.privateNotes"),
    ("blurb", "system.details.blurb"),
    ("languagesDetails", "system.details.languages.details"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingTable {
    entries: Map<String, Value>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a top-level field mapping.
    pub fn set(&mut self, field: &str, target: &str) {
        self.entries
            .insert(field.to_string(), Value::String(target.to_string()));
    }

    /// Record a field mapping under a named scope (one-level nesting).
    pub fn set_scoped(&mut self, scope: &str, field: &str, target: &str) {
        let slot = self
            .entries
            .entry(scope.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = slot {
            map.insert(field.to_string(), Value::String(target.to_string()));
        }
    }

    /// Seed the fixed `actors` scope used by captioned collections.
    pub fn seed_actor_details(&mut self) {
        for (field, target) in ACTOR_DETAIL_TARGETS {
            self.set_scoped("actors", field, target);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accumulates_flat_and_scoped_entries() {
        let mut mapping = MappingTable::new();
        mapping.set("gmNote", "system.description.gm");
        mapping.set_scoped("actors", "gmNote", "system.description.gm");
        mapping.set_scoped("actors", "unidentified", "system.identification.unidentified.name");

        assert_eq!(
            mapping.into_value(),
            json!({
                "gmNote": "system.description.gm",
                "actors": {
                    "gmNote": "system.description.gm",
                    "unidentified": "system.identification.unidentified.name",
                }
            })
        );
    }

    #[test]
    fn seeding_actor_details_is_idempotent() {
        let mut mapping = MappingTable::new();
        mapping.seed_actor_details();
        mapping.seed_actor_details();

        let value = mapping.into_value();
        let actors = value["actors"].as_object().expect("actors scope");
        assert_eq!(actors.len(), 4);
        assert_eq!(actors["blurb"], "system.details.blurb");
    }
}
