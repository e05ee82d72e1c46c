//! Cross-reference label stripping
//!
//! Inline cross-reference markers carry a stable identifier and an optional
//! display label: `@UUID[Actor.abc123]{The Warden}`. The label is volatile
//! presentation data and irrelevant to translation, so it is dropped while
//! the identifier survives: `@UUID[Actor.abc123]`.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

static REF_LABEL: OnceLock<Regex> = OnceLock::new();

fn ref_label() -> &'static Regex {
    REF_LABEL.get_or_init(|| {
        Regex::new(r"(@[A-Za-z]+\[[^\]]+\])\{[^}]+\}").expect("valid reference pattern")
    })
}

/// Strip display labels from every cross-reference marker in the value,
/// recursively, regardless of nesting depth or field name.
pub fn strip_reference_labels(value: &mut Value) {
    match value {
        Value::String(text) => {
            if !text.contains('@') {
                return;
            }
            if let Cow::Owned(stripped) = ref_label().replace_all(text, "$1") {
                *text = stripped;
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_reference_labels(item);
            }
        }
        Value::Object(map) => {
            for item in map.values_mut() {
                strip_reference_labels(item);
            }
        }
        _ => {}
    }
}
