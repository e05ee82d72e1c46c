//! Stored value decoding

use serde_json::{json, Value};
use tracing::debug;

/// Decode one stored value into a document.
///
/// The value is decoded as UTF-8 with malformed sequences replaced rather
/// than rejected, then parsed as JSON. A value that is not valid JSON is
/// wrapped as `{"name": <raw text>}` so the raw string still reaches the
/// bundle stage.
pub fn decode_record(value: &[u8]) -> Value {
    let text = String::from_utf8_lossy(value);
    match serde_json::from_str(&text) {
        Ok(document) => document,
        Err(err) => {
            debug!("value is not JSON ({err}), wrapping as raw text");
            json!({ "name": text })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_object() {
        let record = decode_record(br#"{"name": "Goblin", "level": 1}"#);
        assert_eq!(record["name"], "Goblin");
        assert_eq!(record["level"], 1);
    }

    #[test]
    fn wraps_non_json_as_name() {
        let record = decode_record(b"just some text");
        assert_eq!(record, json!({ "name": "just some text" }));
    }

    #[test]
    fn keeps_non_object_json_as_is() {
        // Stored values are normally objects, but any valid JSON passes
        // through unchanged.
        assert_eq!(decode_record(b"[1, 2, 3]"), json!([1, 2, 3]));
    }

    #[test]
    fn tolerates_malformed_utf8() {
        // 0xff is not valid UTF-8; the replacement character makes the text
        // non-JSON, so it is wrapped.
        let record = decode_record(&[0xff, b'x']);
        assert!(record["name"].as_str().is_some());
    }

    #[test]
    fn preserves_non_ascii_text() {
        let record = decode_record("{\"name\": \"Götterdämmerung\"}".as_bytes());
        assert_eq!(record["name"], "Götterdämmerung");
    }
}
