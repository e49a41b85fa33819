//! Named transforms applied inside placeholders (`{price, currency(de-DE)}`).

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc,
    LazyLock,
};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::format;

/// A pure string-to-string function. Must not panic on malformed input.
pub trait Transform: Send + Sync {
    fn apply(&self, input: &str, args: &[String]) -> String;
}

impl<F> Transform for F
where
    F: Fn(&str, &[String]) -> String + Send + Sync,
{
    fn apply(&self, input: &str, args: &[String]) -> String {
        self(input, args)
    }
}

/// Name to transform mapping.
///
/// Passed per call as overrides; lookups fall through to [`TransformRegistry::builtin`]
/// and finally to the identity function.
#[derive(Clone, Default)]
pub struct TransformRegistry {
    entries: HashMap<String, Arc<dyn Transform>>,
}

/// Built-in transforms: `date`, `number`, `currency` and `stringify`.
static BUILTIN: LazyLock<TransformRegistry> = LazyLock::new(|| {
    TransformRegistry::new()
        .with("date", date)
        .with("number", number)
        .with("currency", currency)
        .with("stringify", stringify)
});

impl TransformRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared registry of built-in transforms.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Registers `transform` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, transform: impl Transform + 'static) {
        self.entries.insert(name.into(), Arc::new(transform));
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, transform: impl Transform + 'static) -> Self {
        self.insert(name, transform);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Transform> {
        self.entries.get(name).map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TransformRegistry").field("entries", &names).finish()
    }
}

/// Runs the transform `name`: overrides first, then built-ins, else returns `input` unchanged.
#[must_use]
pub fn apply_transform(
    name: &str,
    input: &str,
    args: &[String],
    overrides: Option<&TransformRegistry>,
) -> String {
    overrides
        .and_then(|registry| registry.get(name))
        .or_else(|| TransformRegistry::builtin().get(name))
        .map_or_else(|| input.to_string(), |transform| transform.apply(input, args))
}

/// Argument at `index`, treating an empty string like a missing one.
fn arg(args: &[String], index: usize) -> Option<&str> {
    args.get(index).map(String::as_str).filter(|a| !a.is_empty())
}

/// `date(locale?, timezone?, full?)`
fn date(input: &str, args: &[String]) -> String {
    format::format_date(input, arg(args, 0), arg(args, 1), arg(args, 2) == Some("true"))
}

/// `number(locale?)`
fn number(input: &str, args: &[String]) -> String {
    format::format_number(input, arg(args, 0))
}

/// `currency(locale?, code?)`
fn currency(input: &str, args: &[String]) -> String {
    format::format_currency(input, arg(args, 0), arg(args, 1))
}

/// Longer indents are truncated.
const MAX_INDENT: usize = 10;

/// `stringify(indent?)`: pretty-prints JSON input, or quotes non-JSON input as a JSON string.
fn stringify(input: &str, args: &[String]) -> String {
    let indent = arg(args, 0).map_or("  ", strip_quotes);
    let indent: String = indent.chars().take(MAX_INDENT).collect();

    let value = serde_json::from_str::<Value>(input)
        .unwrap_or_else(|_| Value::String(input.to_string()));

    to_json_string(&value, &indent).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "stringify failed, returning input unchanged");
        input.to_string()
    })
}

/// Removes one pair of surrounding double quotes: `"\t"` -> `\t`.
fn strip_quotes(arg: &str) -> &str {
    if arg.len() >= 2 {
        arg.strip_prefix('"').and_then(|a| a.strip_suffix('"')).unwrap_or(arg)
    } else if arg == "\"" {
        ""
    } else {
        arg
    }
}

/// Serializes with `indent` per level; an empty indent gives compact output.
fn to_json_string(value: &Value, indent: &str) -> Result<String, serde_json::Error> {
    if indent.is_empty() {
        return serde_json::to_string(value);
    }
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
