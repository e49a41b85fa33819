//! Translation table input definitions.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// Used when a translation file carries no `missingTranslation` template.
pub const DEFAULT_MISSING_TRANSLATION: &str = "{key}";

fn default_keys() -> Value {
    Value::Object(Map::new())
}

fn default_missing_translation() -> String {
    DEFAULT_MISSING_TRANSLATION.to_string()
}

/// One language's translations as stored on disk:
///
/// ```json
/// {
///   "keys": { "error": { "404": "Not found" } },
///   "missingTranslation": "Missing: {key}"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationTable {
    #[serde(default = "default_keys")]
    keys: Value,
    #[serde(default = "default_missing_translation")]
    missing_translation: String,
}

/// Result of a dotted-path lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Value),
    /// An explicit `null` was reached along the path.
    Null,
    Missing,
}

impl TranslationTable {
    #[must_use]
    pub fn new(keys: Value, missing_translation: impl Into<String>) -> Self {
        Self { keys, missing_translation: missing_translation.into() }
    }

    /// Parses the JSON file format shown on [`TranslationTable`].
    ///
    /// # Errors
    /// Invalid JSON or a shape mismatch (e.g. `missingTranslation` not a string).
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Nested key mapping.
    #[must_use]
    pub const fn keys(&self) -> &Value {
        &self.keys
    }

    #[must_use]
    pub fn missing_translation(&self) -> &str {
        &self.missing_translation
    }

    /// Walks `key` split on `.` through nested objects (and array indices).
    ///
    /// A `null` anywhere on the path yields [`Lookup::Null`]; stepping into a
    /// string, number or absent member yields [`Lookup::Missing`].
    #[must_use]
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        let mut current = &self.keys;
        for segment in key.split('.') {
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
                Value::Null => return Lookup::Null,
                _ => None,
            };
            let Some(next) = next else {
                return Lookup::Missing;
            };
            current = next;
        }

        if current.is_null() { Lookup::Null } else { Lookup::Found(current) }
    }
}

/// Template text of a found value: strings as-is, anything else as compact JSON.
#[must_use]
pub fn template_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
