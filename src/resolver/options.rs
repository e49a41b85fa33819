//! Per-call options and results of [`Translator::t`](super::Translator::t).

use crate::template::TransformRegistry;
use crate::values::{
    SubstitutionValue,
    Values,
};

/// Options for a single lookup.
///
/// ```
/// use interp_i18n::resolver::TranslateOptions;
///
/// let options = TranslateOptions::new().count(3).context("girl").value("name", "Ann");
/// assert_eq!(options.count, Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Values placeholders can refer to.
    pub values: Values,
    /// Selects plural variants (`_<count>`, `_<category>`, `_other`).
    pub count: Option<u64>,
    /// Selects `_<context>` variants.
    pub context: Option<String>,
    /// When `false`, an unresolved key yields [`Translation::Missing`] instead
    /// of the rendered missing-translation template.
    pub use_missing_translation: bool,
    /// Transforms that take precedence over the built-ins for this call.
    pub replacement_functions: Option<TransformRegistry>,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            values: Values::new(),
            count: None,
            context: None,
            use_missing_translation: true,
            replacement_functions: None,
        }
    }
}

impl TranslateOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one substitution value.
    #[must_use]
    pub fn value(mut self, key: impl Into<String>, value: impl Into<SubstitutionValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Replaces all substitution values.
    #[must_use]
    pub fn values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    #[must_use]
    pub const fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub const fn use_missing_translation(mut self, enabled: bool) -> Self {
        self.use_missing_translation = enabled;
        self
    }

    #[must_use]
    pub fn replacement_functions(mut self, registry: TransformRegistry) -> Self {
        self.replacement_functions = Some(registry);
        self
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Expanded template (a found translation or the missing-translation text).
    Text(String),
    /// The table stores an explicit `null` for the key.
    Null,
    /// Not found, and missing-translation rendering was disabled.
    Missing,
}

impl Translation {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Null | Self::Missing => None,
        }
    }

    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Null | Self::Missing => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Keys accepted by [`Translator::t`](super::Translator::t): a single key or an
/// ordered list of fallbacks.
pub trait TranslationKeys {
    fn into_keys(self) -> Vec<String>;
}

impl TranslationKeys for &str {
    fn into_keys(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl TranslationKeys for String {
    fn into_keys(self) -> Vec<String> {
        vec![self]
    }
}

impl TranslationKeys for &String {
    fn into_keys(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl TranslationKeys for Vec<String> {
    fn into_keys(self) -> Vec<String> {
        self
    }
}

impl TranslationKeys for Vec<&str> {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}

impl TranslationKeys for &[&str] {
    fn into_keys(self) -> Vec<String> {
        self.iter().map(|k| (*k).to_string()).collect()
    }
}

impl TranslationKeys for &[String] {
    fn into_keys(self) -> Vec<String> {
        self.to_vec()
    }
}

impl<const N: usize> TranslationKeys for [&str; N] {
    fn into_keys(self) -> Vec<String> {
        self.into_iter().map(str::to_string).collect()
    }
}
