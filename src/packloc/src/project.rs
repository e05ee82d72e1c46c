//! Bundle projection
//!
//! Re-projects every record of a classified collection into the uniform
//! entry schema. Adventure substructure extraction is table-driven: each
//! row pairs a witness trigger key with the extractor that projects that
//! sub-collection, so new content categories are added as data, not as new
//! control flow.

use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::bundle::Bundle;
use crate::collection::Collection;
use crate::mapping::MappingTable;
use crate::shape::{CollectionShape, Fallback};
use crate::{Error, Result};

/// Actor detail fields copied when present and non-empty, in output order.
const ACTOR_DETAIL_FIELDS: &[(&str, &str)] = &[
    ("publicNotes", "/system/details/publicNotes"),
    ("blurb", "/system/details/blurb"),
    ("privateNotes", "/system/details/privateNotes"),
    ("description", "/system/details/description"),
    ("languagesDetails", "/system/details/languages/details"),
];

/// One row of the adventure substructure table.
struct SubBlock {
    /// Witness key that enables the block
    trigger: &'static str,
    /// Entry field the extraction is written to
    field: &'static str,
    extract: fn(&[Value], &mut MappingTable) -> Map<String, Value>,
}

/// The closed substructure taxonomy, in output order.
const ADVENTURE_BLOCKS: &[SubBlock] = &[
    SubBlock { trigger: "folders", field: "folders", extract: extract_folder_names },
    SubBlock { trigger: "journal", field: "journals", extract: extract_journals },
    SubBlock { trigger: "scenes", field: "scenes", extract: extract_scenes },
    SubBlock { trigger: "macros", field: "macros", extract: extract_macros },
    SubBlock { trigger: "tables", field: "tables", extract: extract_tables },
    SubBlock { trigger: "items", field: "items", extract: extract_items },
    SubBlock { trigger: "playlists", field: "playlists", extract: extract_playlists },
    SubBlock { trigger: "actors", field: "actors", extract: extract_actors },
];

/// Result of projecting one collection
#[derive(Debug)]
pub struct Projection {
    pub bundle: Bundle,
    /// Records dropped with a per-record error (missing name)
    pub skipped: usize,
    /// Records whose key set diverged from the schema witness
    pub divergent: usize,
}

/// Project a whole collection into a bundle.
///
/// Sidecar folder names pre-populate the `folders` field. Per-record errors
/// are logged and counted; they never abort the collection.
pub fn project(
    collection: &Collection,
    shape: &CollectionShape,
    sidecar_folders: &[String],
) -> Projection {
    let mut bundle = Bundle::new(&collection.category, shape.folder_bearing);
    for name in sidecar_folders {
        bundle.add_folder(name.trim());
    }
    if shape.captioned {
        bundle.mapping.seed_actor_details();
    }

    let mut skipped = 0;
    let mut divergent = 0;
    for (index, record) in collection.records.iter().enumerate() {
        if index > 0 && diverges_from_witness(collection, record) {
            divergent += 1;
            warn!(
                category = %collection.category,
                index,
                "record key set diverges from schema witness"
            );
        }
        if let Err(err) = project_record(record, index, collection, shape, &mut bundle) {
            error!(category = %collection.category, index, %err, "record skipped");
            skipped += 1;
        }
    }

    Projection { bundle, skipped, divergent }
}

fn diverges_from_witness(collection: &Collection, record: &Value) -> bool {
    match (collection.witness(), record.as_object()) {
        (Some(witness), Some(record)) => {
            witness.len() != record.len()
                || witness.keys().any(|key| !record.contains_key(key))
        }
        _ => false,
    }
}

fn project_record(
    record: &Value,
    index: usize,
    collection: &Collection,
    shape: &CollectionShape,
    bundle: &mut Bundle,
) -> Result<()> {
    let missing_name = || Error::MissingName {
        category: collection.category.clone(),
        index,
    };
    let obj = record.as_object().ok_or_else(missing_name)?;
    let name = trimmed_name(obj).ok_or_else(missing_name)?;

    // Folder records short-circuit to a folders entry and get no entries
    // node, regardless of how the witness classified the collection.
    if obj.contains_key("folder") && obj.contains_key("color") {
        bundle.add_folder(&name);
        return Ok(());
    }

    if shape.named {
        let slot = bundle
            .entries
            .entry(name.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(entry) = slot {
            entry.insert("name".to_string(), Value::String(name.clone()));

            if shape.captioned {
                if let Some(caption) = obj.get("caption") {
                    entry.insert("caption".to_string(), caption.clone());
                }
                if let Some(description) = obj.get("description") {
                    entry.insert("description".to_string(), description.clone());
                }
                for block in ADVENTURE_BLOCKS {
                    if !witness_has(collection, block.trigger) {
                        continue;
                    }
                    // A record missing the promised array is a tolerated
                    // shape miss; the field is simply omitted.
                    let Some(elements) = obj.get(block.trigger).and_then(Value::as_array) else {
                        continue;
                    };
                    let extracted = (block.extract)(elements, &mut bundle.mapping);
                    entry.insert(block.field.to_string(), Value::Object(extracted));
                }
            }

            if shape.fallback == Fallback::Description {
                let description = record
                    .pointer("/system/description")
                    .or_else(|| obj.get("description"));
                if let Some(description) = description {
                    entry.insert("description".to_string(), description.clone());
                }
            }
        }
    }

    match shape.fallback {
        Fallback::MacroName => {
            let mut node = Map::new();
            node.insert("name".to_string(), Value::String(name.clone()));
            bundle.entries.insert(name, Value::Object(node));
        }
        Fallback::LinkedPages => {
            let mut node = Map::new();
            node.insert("name".to_string(), Value::String(name.clone()));
            node.insert(
                "pages".to_string(),
                Value::Object(linked_pages(record, &collection.records)),
            );
            bundle.entries.insert(name, Value::Object(node));
        }
        Fallback::Description | Fallback::None => {}
    }

    Ok(())
}

fn witness_has(collection: &Collection, key: &str) -> bool {
    collection.witness().is_some_and(|w| w.contains_key(key))
}

fn trimmed_name(obj: &Map<String, Value>) -> Option<String> {
    let name = obj.get("name")?.as_str()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key)?.as_str()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Empty-string and null scalars are never worth carrying into an entry.
fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_str() == Some("")
}

fn extract_folder_names(elements: &[Value], _mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for folder in elements {
        if let Some(name) = str_field(folder, "name") {
            out.insert(name.to_string(), Value::String(name.to_string()));
        }
    }
    out
}

fn extract_journals(elements: &[Value], _mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for journal in elements {
        let Some(name) = str_field(journal, "name") else { continue };
        let mut node = Map::new();
        node.insert("name".to_string(), Value::String(name.to_string()));

        let mut pages = Map::new();
        if let Some(page_list) = journal.get("pages").and_then(Value::as_array) {
            for page in page_list {
                let Some(page_name) = str_field(page, "name").map(str::trim) else { continue };
                let text = page
                    .pointer("/text/content")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let mut page_node = Map::new();
                page_node.insert("name".to_string(), Value::String(page_name.to_string()));
                page_node.insert(
                    "text".to_string(),
                    Value::String(collapse_whitespace(text)),
                );
                pages.insert(page_name.to_string(), Value::Object(page_node));
            }
        }
        node.insert("pages".to_string(), Value::Object(pages));
        out.insert(name.trim().to_string(), Value::Object(node));
    }
    out
}

fn extract_scenes(elements: &[Value], _mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for scene in elements {
        let Some(name) = str_field(scene, "name") else { continue };
        let mut node = Map::new();
        node.insert("name".to_string(), Value::String(name.to_string()));

        // Note text doubles as both key and value.
        let mut notes = Map::new();
        if let Some(note_list) = scene.get("notes").and_then(Value::as_array) {
            for note in note_list {
                if let Some(text) = str_field(note, "text") {
                    notes.insert(text.to_string(), Value::String(text.to_string()));
                }
            }
        }
        node.insert("notes".to_string(), Value::Object(notes));
        out.insert(name.to_string(), Value::Object(node));
    }
    out
}

fn extract_macros(elements: &[Value], _mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for macro_doc in elements {
        if let Some(name) = str_field(macro_doc, "name") {
            let mut node = Map::new();
            node.insert("name".to_string(), Value::String(name.to_string()));
            out.insert(name.to_string(), Value::Object(node));
        }
    }
    out
}

fn extract_tables(elements: &[Value], _mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for table in elements {
        let Some(name) = str_field(table, "name") else { continue };
        let mut node = Map::new();
        node.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(description) = table.get("description") {
            node.insert("description".to_string(), description.clone());
        }

        let mut results = Map::new();
        if let Some(result_list) = table.get("results").and_then(Value::as_array) {
            for result in result_list {
                let Some(range) = result.get("range").and_then(Value::as_array) else { continue };
                let (Some(low), Some(high)) = (range.first(), range.get(1)) else { continue };
                if let Some(text) = result.get("text") {
                    results.insert(
                        format!("{}-{}", range_part(low), range_part(high)),
                        text.clone(),
                    );
                }
            }
        }
        node.insert("results".to_string(), Value::Object(results));
        out.insert(name.to_string(), Value::Object(node));
    }
    out
}

fn range_part(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn extract_items(elements: &[Value], mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for item in elements {
        let Some(name) = str_field(item, "name") else { continue };
        let mut node = Map::new();
        node.insert("name".to_string(), Value::String(name.to_string()));

        // Descriptions are only translatable on items that originate here:
        // no compendium source, or an item-typed one.
        let source = item.pointer("/_stats/compendiumSource");
        let source_absent = matches!(source, None | Some(Value::Null));
        let item_typed = source
            .and_then(Value::as_str)
            .is_some_and(|s| s.starts_with("Item"));
        if source_absent || item_typed {
            if let Some(description) = item.pointer("/system/description/value") {
                node.insert("description".to_string(), description.clone());
            }
            if let Some(gm_note) = item.pointer("/system/description/gm") {
                node.insert("gmNote".to_string(), gm_note.clone());
                mapping.set("gmNote", "system.description.gm");
            }
            let unidentified = item
                .pointer("/system/identification/unidentified/name")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty());
            if let Some(unidentified) = unidentified {
                node.insert(
                    "unidentified".to_string(),
                    Value::String(unidentified.to_string()),
                );
                if let Some(desc) =
                    item.pointer("/system/identification/unidentified/data/description/value")
                {
                    node.insert("unidentified_desc".to_string(), desc.clone());
                }
                mapping.set("unidentified", "system.identification.unidentified.name");
                mapping.set(
                    "unidentified_desc",
                    "system.identification.unidentified.data.description.value",
                );
            }
        }
        out.insert(name.to_string(), Value::Object(node));
    }
    out
}

fn extract_playlists(elements: &[Value], _mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for playlist in elements {
        let Some(name) = str_field(playlist, "name") else { continue };
        let mut node = Map::new();
        node.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(description) = playlist.get("description") {
            node.insert("description".to_string(), description.clone());
        }

        let mut sounds = Map::new();
        if let Some(sound_list) = playlist.get("sounds").and_then(Value::as_array) {
            for sound in sound_list {
                let Some(sound_name) = str_field(sound, "name") else { continue };
                let mut sound_node = Map::new();
                sound_node.insert("name".to_string(), Value::String(sound_name.to_string()));
                if let Some(description) = sound.get("description") {
                    sound_node.insert("description".to_string(), description.clone());
                }
                sounds.insert(sound_name.to_string(), Value::Object(sound_node));
            }
        }
        node.insert("sounds".to_string(), Value::Object(sounds));
        out.insert(name.to_string(), Value::Object(node));
    }
    out
}

fn extract_actors(elements: &[Value], mapping: &mut MappingTable) -> Map<String, Value> {
    let mut out = Map::new();
    for actor in elements {
        let Some(name) = str_field(actor, "name") else { continue };
        let mut node = Map::new();
        node.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(token_name) = actor.pointer("/prototypeToken/name") {
            node.insert("tokenName".to_string(), token_name.clone());
        }
        for (field, path) in ACTOR_DETAIL_FIELDS {
            if let Some(value) = actor.pointer(path) {
                if !is_blank(value) {
                    node.insert((*field).to_string(), value.clone());
                }
            }
        }

        let mut items = Map::new();
        if let Some(item_list) = actor.get("items").and_then(Value::as_array) {
            for item in item_list {
                if let Some((item_name, item_node)) = extract_actor_item(item, mapping) {
                    items.insert(item_name, Value::Object(item_node));
                }
            }
        }
        node.insert("items".to_string(), Value::Object(items));
        out.insert(name.to_string(), Value::Object(node));
    }
    out
}

/// An actor's item is included only when it carries translator-relevant
/// text of its own: a non-empty gm note, an unidentified variant, or no
/// compendium source at all.
fn extract_actor_item(
    item: &Value,
    mapping: &mut MappingTable,
) -> Option<(String, Map<String, Value>)> {
    let name = str_field(item, "name")?;

    let gm_note = item
        .pointer("/system/description/gm")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    let unidentified_status = item
        .pointer("/system/identification/status")
        .and_then(Value::as_str)
        == Some("unidentified");
    let source = item.pointer("/_stats/compendiumSource");
    let source_absent = matches!(source, None | Some(Value::Null));

    if gm_note.is_none() && !unidentified_status && !source_absent {
        return None;
    }

    let mut node = Map::new();
    node.insert("name".to_string(), Value::String(name.to_string()));
    if let Some(description) = item.pointer("/system/description/value") {
        node.insert("description".to_string(), description.clone());
    }
    if let Some(gm_note) = gm_note {
        node.insert("gmNote".to_string(), Value::String(gm_note.to_string()));
        mapping.set_scoped("actors", "gmNote", "system.description.gm");
    }
    if unidentified_status {
        if let Some(unidentified) = item.pointer("/system/identification/unidentified/name") {
            node.insert("unidentified".to_string(), unidentified.clone());
        }
        if let Some(desc) =
            item.pointer("/system/identification/unidentified/data/description/value")
        {
            node.insert("unidentified_desc".to_string(), desc.clone());
        }
        mapping.set_scoped("actors", "unidentified", "system.identification.unidentified.name");
        mapping.set_scoped(
            "actors",
            "unidentified_desc",
            "system.identification.unidentified.data.description.value",
        );
    }

    Some((name.to_string(), node))
}

/// Resolve a page-structured record's `pages` id list against sibling
/// records by internal identifier.
fn linked_pages(record: &Value, records: &[Value]) -> Map<String, Value> {
    let mut pages = Map::new();
    let Some(ids) = record.get("pages").and_then(Value::as_array) else {
        return pages;
    };
    for id in ids {
        for sibling in records {
            if sibling.get("_id") != Some(id) {
                continue;
            }
            let Some(name) = str_field(sibling, "name") else { continue };
            let mut node = Map::new();
            node.insert("name".to_string(), Value::String(name.to_string()));
            if let Some(text) = sibling.pointer("/text/content") {
                node.insert("text".to_string(), text.clone());
            }
            pages.insert(name.to_string(), Value::Object(node));
        }
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(category: &str, data: Value) -> Projection {
        let collection = Collection::from_value(category.into(), data).expect("collection");
        let shape = CollectionShape::detect(&collection.category, collection.witness(), false);
        project(&collection, &shape, &[])
    }

    #[test]
    fn named_records_seed_entries_by_trimmed_name() {
        let projection = run("feats", json!([{ "name": "  Power Attack  " }]));
        let entry = &projection.bundle.entries["Power Attack"];
        assert_eq!(entry["name"], "Power Attack");
    }

    #[test]
    fn record_without_name_is_skipped_not_fatal() {
        let projection = run("feats", json!([{ "name": "Good" }, { "img": "x.png" }]));
        assert_eq!(projection.skipped, 1);
        assert_eq!(projection.bundle.entries.len(), 1);
    }

    #[test]
    fn folder_records_short_circuit_to_folders() {
        let projection = run(
            "journals",
            json!([
                { "name": "Doc", "folder": "abc" },
                { "name": " Chapter One ", "folder": "abc", "color": "#ff0000" },
            ]),
        );
        let folders = projection.bundle.folders.expect("folders");
        assert_eq!(folders["Chapter One"], "Chapter One");
        // The folder record produced no entry of its own.
        assert!(!projection.bundle.entries.contains_key("Chapter One"));
        assert!(projection.bundle.entries.contains_key("Doc"));
    }

    #[test]
    fn captioned_record_projects_journal_pages() {
        let projection = run(
            "adventures",
            json!([{
                "name": "Keep",
                "caption": "An adventure",
                "description": "Long ago…",
                "journal": [{
                    "name": "J",
                    "pages": [
                        { "name": " P ", "text": { "content": "Hello\n  World" } },
                        { "name": "Empty", "text": {} },
                    ],
                }],
            }]),
        );
        let entry = &projection.bundle.entries["Keep"];
        assert_eq!(entry["caption"], "An adventure");
        let page = &entry["journals"]["J"]["pages"]["P"];
        assert_eq!(page["name"], "P");
        assert_eq!(page["text"], "Hello World");
        assert_eq!(entry["journals"]["J"]["pages"]["Empty"]["text"], "");
    }

    #[test]
    fn scene_notes_use_text_as_key_and_value() {
        let projection = run(
            "adventures",
            json!([{
                "name": "Keep",
                "caption": "c",
                "description": "d",
                "scenes": [{
                    "name": "Cave",
                    "notes": [{ "text": "A warning sign" }, { "entry": "no text" }],
                }],
            }]),
        );
        let notes = &projection.bundle.entries["Keep"]["scenes"]["Cave"]["notes"];
        assert_eq!(notes["A warning sign"], "A warning sign");
        assert_eq!(notes.as_object().expect("notes").len(), 1);
    }

    #[test]
    fn table_results_are_keyed_by_range() {
        let projection = run(
            "adventures",
            json!([{
                "name": "Keep",
                "caption": "c",
                "description": "d",
                "tables": [{
                    "name": "Loot",
                    "description": "Random loot",
                    "results": [
                        { "range": [1, 5], "text": "Goblin" },
                        { "range": [6, 10], "text": "Ogre" },
                        { "text": "no range" },
                    ],
                }],
            }]),
        );
        let results = &projection.bundle.entries["Keep"]["tables"]["Loot"]["results"];
        assert_eq!(results["1-5"], "Goblin");
        assert_eq!(results["6-10"], "Ogre");
        assert_eq!(results.as_object().expect("results").len(), 2);
    }

    #[test]
    fn item_descriptions_gate_on_compendium_source() {
        let projection = run(
            "adventures",
            json!([{
                "name": "Keep",
                "caption": "c",
                "description": "d",
                "items": [
                    {
                        "name": "Local Sword",
                        "_stats": { "compendiumSource": null },
                        "system": { "description": { "value": "Sharp", "gm": "Cursed" } },
                    },
                    {
                        "name": "Imported Shield",
                        "_stats": { "compendiumSource": "Compendium.pack.abc" },
                        "system": { "description": { "value": "Sturdy", "gm": "" } },
                    },
                    {
                        "name": "Item-typed Ring",
                        "_stats": { "compendiumSource": "Item.xyz" },
                        "system": {
                            "description": { "value": "Shiny", "gm": "" },
                            "identification": {
                                "unidentified": {
                                    "name": "Plain Ring",
                                    "data": { "description": { "value": "A plain ring" } },
                                },
                            },
                        },
                    },
                ],
            }]),
        );
        let items = &projection.bundle.entries["Keep"]["items"];
        assert_eq!(items["Local Sword"]["description"], "Sharp");
        assert_eq!(items["Local Sword"]["gmNote"], "Cursed");
        // Sourced from a non-item compendium: name only.
        assert!(items["Imported Shield"].get("description").is_none());
        assert_eq!(items["Item-typed Ring"]["unidentified"], "Plain Ring");
        assert_eq!(items["Item-typed Ring"]["unidentified_desc"], "A plain ring");

        let mapping = projection.bundle.mapping.into_value();
        assert_eq!(mapping["gmNote"], "system.description.gm");
        assert_eq!(
            mapping["unidentified"],
            "system.identification.unidentified.name"
        );
    }

    #[test]
    fn actor_items_gate_on_gm_note_unidentified_or_missing_source() {
        let projection = run(
            "adventures",
            json!([{
                "name": "Keep",
                "caption": "c",
                "description": "d",
                "actors": [{
                    "name": "Warden",
                    "prototypeToken": { "name": "The Warden" },
                    "system": {
                        "details": {
                            "publicNotes": "Seen at the gate",
                            "blurb": "",
                            "privateNotes": "Secretly a ghost",
                        },
                    },
                    "items": [
                        {
                            "name": "Haunted Key",
                            "_stats": { "compendiumSource": "Compendium.pack.k" },
                            "system": { "description": { "value": "Opens doors", "gm": "It whispers" } },
                        },
                        {
                            "name": "Strange Vial",
                            "_stats": { "compendiumSource": "Compendium.pack.v" },
                            "system": {
                                "description": { "value": "Murky", "gm": "" },
                                "identification": {
                                    "status": "unidentified",
                                    "unidentified": {
                                        "name": "Vial",
                                        "data": { "description": { "value": "A murky vial" } },
                                    },
                                },
                            },
                        },
                        {
                            "name": "Plain Dagger",
                            "_stats": { "compendiumSource": "Compendium.pack.d" },
                            "system": { "description": { "value": "Plain", "gm": "" } },
                        },
                        {
                            "name": "Handmade Charm",
                            "_stats": { "compendiumSource": null },
                            "system": { "description": { "value": "Rough", "gm": "" } },
                        },
                    ],
                }],
            }]),
        );
        let actor = &projection.bundle.entries["Keep"]["actors"]["Warden"];
        assert_eq!(actor["tokenName"], "The Warden");
        assert_eq!(actor["publicNotes"], "Seen at the gate");
        // Blank detail fields are not carried.
        assert!(actor.get("blurb").is_none());
        assert_eq!(actor["privateNotes"], "Secretly a ghost");

        let items = actor["items"].as_object().expect("items");
        assert_eq!(items["Haunted Key"]["gmNote"], "It whispers");
        assert_eq!(items["Strange Vial"]["unidentified"], "Vial");
        assert_eq!(items["Handmade Charm"]["description"], "Rough");
        assert!(!items.contains_key("Plain Dagger"));

        // Actor-scoped mapping entries, plus the seeded detail paths.
        let mapping = projection.bundle.mapping.into_value();
        assert_eq!(mapping["actors"]["gmNote"], "system.description.gm");
        assert_eq!(
            mapping["actors"]["unidentified_desc"],
            "system.identification.unidentified.data.description.value"
        );
        assert_eq!(mapping["actors"]["publicNotes"], "system.details.publicNotes");
    }

    #[test]
    fn playlists_carry_sound_names_and_descriptions() {
        let projection = run(
            "adventures",
            json!([{
                "name": "Keep",
                "caption": "c",
                "description": "d",
                "playlists": [{
                    "name": "Ambience",
                    "description": "Background",
                    "sounds": [{ "name": "Wind", "description": "Howling" }],
                }],
            }]),
        );
        let playlist = &projection.bundle.entries["Keep"]["playlists"]["Ambience"];
        assert_eq!(playlist["description"], "Background");
        assert_eq!(playlist["sounds"]["Wind"]["description"], "Howling");
    }

    #[test]
    fn plain_description_prefers_system_description() {
        let projection = run(
            "feats",
            json!([
                { "name": "A", "system": { "description": "From system" }, "description": "top" },
                { "name": "B", "description": "Top only" },
                { "name": "C" },
            ]),
        );
        assert_eq!(projection.bundle.entries["A"]["description"], "From system");
        assert_eq!(projection.bundle.entries["B"]["description"], "Top only");
        assert!(projection.bundle.entries["C"].get("description").is_none());
        // B and C diverge from A's key set.
        assert_eq!(projection.divergent, 2);
    }

    #[test]
    fn macro_like_records_keep_name_only() {
        let collection = Collection::from_value(
            "macros".into(),
            json!([{ "name": "Roll", "command": "r = roll()", "prototypeToken": {} }]),
        )
        .expect("collection");
        let shape = CollectionShape::detect("macros", collection.witness(), false);
        assert_eq!(shape.fallback, Fallback::MacroName);

        let projection = project(&collection, &shape, &[]);
        assert_eq!(
            projection.bundle.entries["Roll"],
            json!({ "name": "Roll" })
        );
    }

    #[test]
    fn linked_pages_resolve_sibling_ids() {
        let projection = run(
            "rules",
            json!([
                { "name": "Chapter", "pages": ["p1", "missing"] },
                { "name": "Intro", "_id": "p1", "text": { "content": "Read me" } },
            ]),
        );
        let entry = &projection.bundle.entries["Chapter"];
        let pages = entry["pages"].as_object().expect("pages");
        assert_eq!(pages["Intro"]["text"], "Read me");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn sidecar_folder_names_pre_populate_folders() {
        let collection =
            Collection::from_value("journals".into(), json!([{ "name": "Doc" }]))
                .expect("collection");
        let shape = CollectionShape::detect("journals", collection.witness(), true);
        let projection = project(&collection, &shape, &[" Maps ".to_string()]);
        let folders = projection.bundle.folders.expect("folders");
        assert_eq!(folders["Maps"], "Maps");
    }
}
