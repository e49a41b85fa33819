//! Substitution values passed to `t()` and their flattening into a string map.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};
use indexmap::IndexMap;
use serde_json::{
    Map,
    Value,
};

/// Caller supplied values, keyed by the name used in placeholders.
///
/// Insertion order is kept; map snapshots list their children in that order.
pub type Values = IndexMap<String, SubstitutionValue>;

/// Deferred value, evaluated once per `t()` call.
pub type Producer = Arc<dyn Fn() -> SubstitutionValue + Send + Sync>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Integer(i64),
    Number(f64),
    /// Rendered with a trailing `n`, which the numeric transforms strip again.
    BigInt(i128),
    Bool(bool),
    /// Rendered as milliseconds since the Unix epoch.
    Date(DateTime<Utc>),
    Null,
}

impl Primitive {
    /// String form used for placeholder substitution.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Number(n) => render_number(*n),
            Self::BigInt(n) => format!("{n}n"),
            Self::Bool(b) => b.to_string(),
            Self::Date(d) => d.timestamp_millis().to_string(),
            Self::Null => "null".to_string(),
        }
    }

    /// JSON form used when the caller's values are echoed into the missing-translation text.
    fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(n) => Value::from(*n),
            Self::Number(n) => json_number(*n),
            Self::BigInt(n) => Value::String(format!("{n}n")),
            Self::Bool(b) => Value::Bool(*b),
            Self::Date(d) => Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Null => Value::Null,
        }
    }
}

/// Shortest decimal form; exponent notation below `1e-6` and from `1e21`.
fn render_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let rendered = if n.is_sign_negative() { "-Infinity" } else { "Infinity" };
        rendered.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        n.to_string()
    }
}

/// `1e+21`, `1.5e-7`: shortest mantissa and an explicitly signed exponent.
fn exponent_form(n: f64) -> String {
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => formatted,
    }
}

/// Integral floats serialize without a fractional part, non-finite ones as `null`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn json_number(n: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if n.is_finite() && n.trunc() == n && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
}

/// A value a placeholder can refer to.
///
/// Maps are flattened one level deep: `{user: {name: "Ann"}}` provides both
/// `user.name` and `user` (a JSON snapshot of the children). Children that
/// are maps or producers themselves are not substitutable.
#[derive(Clone)]
pub enum SubstitutionValue {
    Primitive(Primitive),
    Map(Values),
    Producer(Producer),
}

impl SubstitutionValue {
    /// Wraps a closure that is evaluated lazily when the values are flattened.
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> Self + Send + Sync + 'static,
    {
        Self::Producer(Arc::new(f))
    }

    /// Builds a nested map from key/value pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Self>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Runs a producer once; other variants are borrowed as they are.
    fn evaluate(&self) -> Cow<'_, Self> {
        match self {
            Self::Producer(produce) => Cow::Owned(produce()),
            other => Cow::Borrowed(other),
        }
    }

    /// JSON form, `None` for producers (they are skipped like functions in a JSON dump).
    fn to_json(&self) -> Option<Value> {
        match self {
            Self::Primitive(p) => Some(p.to_json()),
            Self::Map(children) => Some(Value::Object(
                children
                    .iter()
                    .filter_map(|(key, child)| child.to_json().map(|json| (key.clone(), json)))
                    .collect(),
            )),
            Self::Producer(_) => None,
        }
    }
}

impl fmt::Debug for SubstitutionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.debug_tuple("Primitive").field(p).finish(),
            Self::Map(children) => f.debug_tuple("Map").field(children).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

impl From<Primitive> for SubstitutionValue {
    fn from(value: Primitive) -> Self {
        Self::Primitive(value)
    }
}

impl From<&str> for SubstitutionValue {
    fn from(value: &str) -> Self {
        Self::Primitive(Primitive::String(value.to_string()))
    }
}

impl From<String> for SubstitutionValue {
    fn from(value: String) -> Self {
        Self::Primitive(Primitive::String(value))
    }
}

impl From<i32> for SubstitutionValue {
    fn from(value: i32) -> Self {
        Self::Primitive(Primitive::Integer(i64::from(value)))
    }
}

impl From<u32> for SubstitutionValue {
    fn from(value: u32) -> Self {
        Self::Primitive(Primitive::Integer(i64::from(value)))
    }
}

impl From<i64> for SubstitutionValue {
    fn from(value: i64) -> Self {
        Self::Primitive(Primitive::Integer(value))
    }
}

impl From<u64> for SubstitutionValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(
            |_| Self::Primitive(Primitive::BigInt(i128::from(value))),
            |n| Self::Primitive(Primitive::Integer(n)),
        )
    }
}

impl From<i128> for SubstitutionValue {
    fn from(value: i128) -> Self {
        Self::Primitive(Primitive::BigInt(value))
    }
}

impl From<f64> for SubstitutionValue {
    fn from(value: f64) -> Self {
        Self::Primitive(Primitive::Number(value))
    }
}

impl From<bool> for SubstitutionValue {
    fn from(value: bool) -> Self {
        Self::Primitive(Primitive::Bool(value))
    }
}

impl From<DateTime<Utc>> for SubstitutionValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Primitive(Primitive::Date(value))
    }
}

impl<V: Into<Self>> From<Option<V>> for SubstitutionValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Primitive(Primitive::Null), Into::into)
    }
}

/// Flattens caller values into the `key -> string` map placeholders read from.
///
/// # Examples
/// ```
/// use interp_i18n::values::{flatten_values, SubstitutionValue, Values};
///
/// let mut values = Values::new();
/// values.insert("user".into(), SubstitutionValue::map([("name", "Ann")]));
///
/// let flat = flatten_values(&values);
/// assert_eq!(flat.get("user.name"), Some(&"Ann".to_string()));
/// assert_eq!(flat.get("user"), Some(&r#"{"name":"Ann"}"#.to_string()));
/// ```
#[must_use]
pub fn flatten_values(values: &Values) -> HashMap<String, String> {
    let mut result = HashMap::new();
    for (key, value) in values {
        match value.evaluate().as_ref() {
            SubstitutionValue::Primitive(p) => {
                result.insert(key.clone(), p.render());
            }
            SubstitutionValue::Map(children) => {
                let mut snapshot = Map::new();
                for (child_key, child) in children {
                    let SubstitutionValue::Primitive(p) = child else {
                        continue;
                    };
                    let rendered = p.render();
                    result.insert(format!("{key}.{child_key}"), rendered.clone());
                    snapshot.insert(child_key.clone(), Value::String(rendered));
                }
                result.insert(key.clone(), Value::Object(snapshot).to_string());
            }
            SubstitutionValue::Producer(_) => {}
        }
    }
    result
}

/// Serializes caller values to compact JSON, leaving out `info` and producers.
#[must_use]
pub fn values_to_json(values: &Values) -> String {
    let object: Map<String, Value> = values
        .iter()
        .filter(|(key, _)| key.as_str() != "info")
        .filter_map(|(key, value)| value.to_json().map(|json| (key.clone(), json)))
        .collect();
    Value::Object(object).to_string()
}
