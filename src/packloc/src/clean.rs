//! Bundle cleaning
//!
//! Three structural passes make the bundle deterministic and noise-free:
//! entry sorting, bottom-up pruning of empty nodes, and control-character
//! scrubbing of text leaves. [`clean`] applies them in that order.

use serde_json::{Map, Value};

/// Sort every `entries` mapping by ascending ordinal key, recursing into
/// all nested mappings regardless of key name. Key positions of other
/// fields are untouched.
pub fn sort_entries(value: &mut Value) {
    if let Value::Object(map) = value {
        if let Some(Value::Object(entries)) = map.get_mut("entries") {
            let mut pairs: Vec<(String, Value)> =
                std::mem::take(entries).into_iter().collect();
            pairs.sort_by(|(a, _), (b, _)| a.cmp(b));
            *entries = pairs.into_iter().collect();
        }
        for nested in map.values_mut() {
            sort_entries(nested);
        }
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Drop every key whose value is null, an empty mapping, an empty sequence,
/// or an empty string.
///
/// One bottom-up traversal reaches the fixed point: children are pruned
/// before their parent's emptiness is judged. Exception: an empty `pages`
/// value is dropped together with its sibling `name` key; an entry whose
/// pages all pruned away has nothing left worth naming.
pub fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let pruned: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, nested)| (key, prune(nested)))
                .collect();
            let pages_empty = pruned
                .iter()
                .any(|(key, nested)| key == "pages" && is_empty_value(nested));

            let mut out = Map::new();
            for (key, nested) in pruned {
                if key == "name" && pages_empty {
                    continue;
                }
                if is_empty_value(&nested) {
                    continue;
                }
                out.insert(key, nested);
            }
            Value::Object(out)
        }
        other => other,
    }
}

/// Remove newlines and replace tabs with single spaces in every string
/// leaf. Containers and non-string leaves pass through untouched.
pub fn scrub_text(value: &mut Value) {
    match value {
        Value::String(text) => {
            if text.contains('\n') || text.contains('\t') {
                *text = text.replace('\n', "").replace('\t', " ");
            }
        }
        Value::Array(items) => {
            for item in items {
                scrub_text(item);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                scrub_text(item);
            }
        }
        _ => {}
    }
}

/// Apply the full cleaning sequence: sort, prune, scrub.
pub fn clean(value: Value) -> Value {
    let mut value = value;
    sort_entries(&mut value);
    let mut value = prune(value);
    scrub_text(&mut value);
    value
}
