use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::entry::{DictEntry, VariantSlot};
use super::DictError;

/// Top-level key holding the character map.
const DATA_KEY: &str = "data";

/// Documentation keys (`_comment`, `_comment_tones`, ...) may appear at any
/// depth of the source files.
fn is_comment_key(key: &str) -> bool {
    key.starts_with("_comment")
}

/// Recursively drop comment keys from objects, including objects nested
/// inside arrays.
pub(crate) fn strip_comments(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(k, _)| !is_comment_key(k))
                .map(|(k, v)| (k, strip_comments(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_comments).collect()),
        other => other,
    }
}

/// Raw entry as stored in the resource.
#[derive(Deserialize)]
struct RawEntry {
    s: i64,
    /// Absent or null means no variants.
    #[serde(default)]
    v: Option<Vec<Value>>,
    #[serde(default)]
    f: bool,
}

fn single_char(key: &str) -> Result<char, DictError> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(DictError::InvalidKey(key.to_string())),
    }
}

/// Slot strings may be written as bare scalars; use their text form.
fn slot_source(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn parse_dictionary(json: &str) -> Result<HashMap<char, DictEntry>, DictError> {
    let root = strip_comments(serde_json::from_str(json)?);
    let Value::Object(mut root) = root else {
        return Err(DictError::MissingData);
    };
    let Some(Value::Object(data)) = root.remove(DATA_KEY) else {
        return Err(DictError::MissingData);
    };

    let mut entries = HashMap::with_capacity(data.len());
    let mut rejected_total = 0usize;
    for (key, value) in data {
        let ch = single_char(&key)?;
        let raw: RawEntry = serde_json::from_value(value).map_err(|e| DictError::InvalidEntry {
            ch,
            reason: e.to_string(),
        })?;

        let sources = raw.v.unwrap_or_default();
        let mut variants = Vec::with_capacity(sources.len());
        for item in &sources {
            let src = slot_source(item);
            let (slot, rejected) = VariantSlot::parse(&src);
            for bad in &rejected {
                warn!(%ch, pattern = %bad, "dropping pattern without a single anchor");
            }
            rejected_total += rejected.len();
            variants.push(slot);
        }

        entries.insert(
            ch,
            DictEntry {
                default_tone: raw.s,
                variants,
                flag: raw.f,
            },
        );
    }

    debug!(
        entries = entries.len(),
        rejected = rejected_total,
        "parsed polyphone dictionary"
    );
    Ok(entries)
}

pub(crate) fn parse_tones(json: &str) -> Result<HashMap<char, u8>, DictError> {
    let root = strip_comments(serde_json::from_str(json)?);
    let Value::Object(map) = root else {
        return Err(DictError::InvalidTone {
            key: String::new(),
            value: "top level must be an object".to_string(),
        });
    };

    let mut tones = HashMap::with_capacity(map.len());
    for (key, value) in map {
        let ch = single_char(&key)?;
        let tone = value
            .as_u64()
            .filter(|t| (1..=5).contains(t))
            .ok_or_else(|| DictError::InvalidTone {
                key: key.clone(),
                value: value.to_string(),
            })?;
        tones.insert(ch, tone as u8);
    }
    debug!(tones = tones.len(), "parsed tone table");
    Ok(tones)
}
