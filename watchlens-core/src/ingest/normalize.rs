//! Record normalizer
//!
//! Turns loosely typed export entries into [`WatchRecord`]s. Entries without
//! a usable title are dropped; every other field is optional and malformed
//! optional fields are treated as absent rather than as errors.

use crate::error::{Error, Result};
use crate::types::{EntityReference, WatchRecord};
use serde_json::Value;

/// Shape every export must have at the top level.
pub const EXPECTED_SHAPE: &str = "array of watch-history entries";

/// Normalize the top-level value of an export.
///
/// Fails only when `value` is not an array; individual bad entries are
/// dropped silently.
pub fn normalize_export(value: &Value) -> Result<Vec<WatchRecord>> {
    match value {
        Value::Array(entries) => Ok(normalize_entries(entries)),
        other => Err(Error::InvalidShape {
            expected: EXPECTED_SHAPE,
            found: json_type_name(other),
        }),
    }
}

/// Normalize a sequence of candidate entries, keeping those with a non-empty title.
pub fn normalize_entries(entries: &[Value]) -> Vec<WatchRecord> {
    let records: Vec<WatchRecord> = entries.iter().filter_map(normalize_entry).collect();

    let dropped = entries.len() - records.len();
    if dropped > 0 {
        tracing::debug!(
            kept = records.len(),
            dropped,
            "Dropped watch-history entries without a title"
        );
    }

    records
}

/// Normalize one entry, or `None` if it has no usable title.
pub fn normalize_entry(entry: &Value) -> Option<WatchRecord> {
    let object = entry.as_object()?;

    let title = object
        .get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.is_empty())?;

    let time = object
        .get("time")
        .and_then(Value::as_str)
        .map(str::to_string);

    let subtitles = object
        .get("subtitles")
        .and_then(Value::as_array)
        // The first element is the primary entity; a nameless one must not
        // let a later reference take its place.
        .map(|refs| refs.iter().map_while(entity_reference).collect())
        .unwrap_or_default();

    Some(WatchRecord {
        title: title.to_string(),
        time,
        subtitles,
    })
}

fn entity_reference(value: &Value) -> Option<EntityReference> {
    let name = value.get("name").and_then(Value::as_str)?;
    let url = value.get("url").and_then(Value::as_str).map(str::to_string);
    Some(EntityReference {
        name: name.to_string(),
        url,
    })
}

/// JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
