//! Key resolution against one language's table.

use std::sync::Arc;

use super::options::{
    TranslateOptions,
    Translation,
    TranslationKeys,
};
use super::plural::{
    candidate_keys,
    candidate_suffixes,
};
use super::table::{
    Lookup,
    TranslationTable,
    template_text,
};
use crate::template::{
    TemplateError,
    expand,
};
use crate::values::{
    SubstitutionValue,
    Values,
    values_to_json,
};

/// Value key under which resolution metadata is exposed to templates.
const INFO_KEY: &str = "info";

#[derive(Debug, Clone)]
enum Source {
    Table(Arc<TranslationTable>),
    /// The table could not be loaded; every lookup yields this message.
    Unavailable(Arc<str>),
}

/// Resolves keys for one language under an optional key prefix.
///
/// Cloning is cheap; the table is shared.
#[derive(Debug, Clone)]
pub struct Translator {
    language: String,
    prefix: String,
    source: Source,
}

impl Translator {
    #[must_use]
    pub fn from_table(table: Arc<TranslationTable>, language: impl Into<String>, prefix: Option<&str>) -> Self {
        Self {
            language: language.into(),
            prefix: prefix.unwrap_or_default().to_string(),
            source: Source::Table(table),
        }
    }

    /// A translator whose every lookup returns `message` as text.
    #[must_use]
    pub fn unavailable(language: impl Into<String>, message: impl Into<Arc<str>>) -> Self {
        Self { language: language.into(), prefix: String::new(), source: Source::Unavailable(message.into()) }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Key prefix, empty when unscoped.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.source, Source::Table(_))
    }

    /// Same table and language, scoped to `prefix` (replacing the current one).
    ///
    /// An unavailable translator is returned as is.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        match &self.source {
            Source::Table(_) => Self { prefix: prefix.to_string(), ..self.clone() },
            Source::Unavailable(_) => self.clone(),
        }
    }

    /// Resolves the first candidate of `keys` that has a stored value.
    ///
    /// Candidates are every key (in order) combined with the plural and
    /// context suffixes selected by `options`, each scoped by the prefix.
    ///
    /// # Errors
    /// [`TemplateError`] when the selected template (or the missing-translation
    /// template) contains a malformed placeholder.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use interp_i18n::resolver::{TranslateOptions, Translation, TranslationTable, Translator};
    /// use serde_json::json;
    ///
    /// let table = TranslationTable::new(json!({"hello": "Hi {name}"}), "{key}");
    /// let translator = Translator::from_table(Arc::new(table), "en", None);
    ///
    /// let text = translator.t("hello", TranslateOptions::new().value("name", "Ann")).unwrap();
    /// assert_eq!(text, Translation::Text("Hi Ann".into()));
    /// ```
    pub fn t(&self, keys: impl TranslationKeys, options: TranslateOptions) -> Result<Translation, TemplateError> {
        let table = match &self.source {
            Source::Table(table) => table,
            Source::Unavailable(message) => return Ok(Translation::Text(message.to_string())),
        };

        let TranslateOptions { mut values, count, context, use_missing_translation, replacement_functions } =
            options;
        values
            .entry(INFO_KEY.to_string())
            .or_insert_with(|| self.info(table, count, context.as_deref()));

        let keys = keys.into_keys();
        let suffixes = candidate_suffixes(count, context.as_deref());
        let candidates = candidate_keys(&keys, &self.prefix, &suffixes);

        let mut saw_null = false;
        for candidate in &candidates {
            match table.lookup(candidate) {
                Lookup::Found(value) => {
                    tracing::trace!(key = %candidate, language = %self.language, "translation found");
                    let text = expand(&template_text(value), &values, replacement_functions.as_ref())?;
                    return Ok(Translation::Text(text));
                }
                Lookup::Null => saw_null = true,
                Lookup::Missing => {}
            }
        }

        if saw_null {
            return Ok(Translation::Null);
        }
        if !use_missing_translation {
            return Ok(Translation::Missing);
        }

        let key = candidates.last().cloned().unwrap_or_default();
        tracing::debug!(key = %key, language = %self.language, "translation missing");

        let mut missing_values = Values::new();
        missing_values.insert("values".to_string(), values_to_json(&values).into());
        missing_values.insert(INFO_KEY.to_string(), self.info(table, None, None));
        missing_values.insert("key".to_string(), key.into());

        expand(table.missing_translation(), &missing_values, None).map(Translation::Text)
    }

    /// `{language, prefix, missingTranslation}` plus `count`/`context` when given.
    fn info(&self, table: &TranslationTable, count: Option<u64>, context: Option<&str>) -> SubstitutionValue {
        let mut info = Values::new();
        info.insert("language".to_string(), self.language.as_str().into());
        info.insert("prefix".to_string(), self.prefix.as_str().into());
        info.insert("missingTranslation".to_string(), table.missing_translation().into());
        if let Some(count) = count {
            info.insert("count".to_string(), count.into());
        }
        if let Some(context) = context {
            info.insert("context".to_string(), context.into());
        }
        SubstitutionValue::Map(info)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::{
        fixture,
        rstest,
    };
    use serde_json::json;

    use super::*;
    use crate::template::TransformRegistry;

    #[fixture]
    fn translator() -> Translator {
        let table = TranslationTable::new(
            json!({
                "hello": "Hello {name}",
                "friend_1": "one friend",
                "friend_few": "a few friends",
                "friend_other": "{count} friends",
                "friend_boy_1": "one boyfriend",
                "friend_boy_other": "{count} boyfriends",
                "error": {
                    "404": "Not found",
                    "default": "Error {code}"
                },
                "gone": null,
                "meta": "{info.language}/{info.prefix}",
                "meta_few": "{info.language}/{info.prefix}/{info.count}",
                "broken": "{a)}",
                "answer": 42,
                "dump": "{info}"
            }),
            "[{info.language}] missing {key} {values}",
        );
        Translator::from_table(Arc::new(table), "en", None)
    }

    fn text(translation: Translation) -> String {
        translation.into_text().unwrap()
    }

    #[rstest]
    fn simple_key_with_value(translator: Translator) {
        let result = translator.t("hello", TranslateOptions::new().value("name", "Ann")).unwrap();

        assert_that!(text(result), eq("Hello Ann"));
    }

    #[rstest]
    #[case::exact(1, "one friend")]
    #[case::category(10, "a few friends")]
    #[case::falls_back_to_other(50, "50 friends")]
    fn plural_variants(translator: Translator, #[case] count: u64, #[case] expected: &str) {
        let result = translator
            .t("friend", TranslateOptions::new().count(count).value("count", count))
            .unwrap();

        assert_that!(text(result), eq(expected));
    }

    #[rstest]
    #[case::exact(1, "one boyfriend")]
    #[case::other(7, "7 boyfriends")]
    fn context_variants(translator: Translator, #[case] count: u64, #[case] expected: &str) {
        let options = TranslateOptions::new().count(count).context("boy").value("count", count);

        assert_that!(text(translator.t("friend", options).unwrap()), eq(expected));
    }

    #[rstest]
    fn context_without_plural_entry_is_missing(translator: Translator) {
        let options = TranslateOptions::new().context("girl").use_missing_translation(false);

        assert_that!(translator.t("friend", options).unwrap(), eq(&Translation::Missing));
    }

    #[rstest]
    fn key_list_falls_back_in_order(translator: Translator) {
        let scoped = translator.with_prefix("error");
        let options = TranslateOptions::new().value("code", 500);

        let result = scoped.t(["500", "default"], options.clone()).unwrap();
        let first = scoped.t(["404", "default"], options).unwrap();

        assert_that!(text(result), eq("Error 500"));
        assert_that!(text(first), eq("Not found"));
    }

    #[rstest]
    fn missing_key_renders_missing_template(translator: Translator) {
        let options = TranslateOptions::new().value("name", "Ann").count(2);

        let result = translator.t(["nope", "still_nope"], options).unwrap();

        assert_that!(text(result), eq(r#"[en] missing still_nope_other {"name":"Ann"}"#));
    }

    #[rstest]
    fn missing_key_disabled(translator: Translator) {
        let result = translator.t("nope", TranslateOptions::new().use_missing_translation(false)).unwrap();

        assert_that!(result, eq(&Translation::Missing));
    }

    #[rstest]
    fn stored_null_yields_null(translator: Translator) {
        assert_that!(translator.t("gone", TranslateOptions::new()).unwrap(), eq(&Translation::Null));
    }

    #[rstest]
    fn null_wins_over_later_missing_keys(translator: Translator) {
        let result = translator.t(["gone", "nope"], TranslateOptions::new()).unwrap();

        assert_that!(result, eq(&Translation::Null));
    }

    #[rstest]
    fn info_is_available_to_templates(translator: Translator) {
        let result = translator.t("meta", TranslateOptions::new().count(3)).unwrap();

        assert_that!(text(result), eq("en//3"));
    }

    #[rstest]
    fn caller_info_is_kept(translator: Translator) {
        let options = TranslateOptions::new().value("info", SubstitutionValue::map([("language", "xx")]));

        assert_that!(text(translator.t("meta", options).unwrap()), eq("xx/"));
    }

    #[rstest]
    fn info_snapshot_keeps_insertion_order(translator: Translator) {
        let result = translator.t("dump", TranslateOptions::new()).unwrap();

        assert_that!(
            text(result),
            eq(r#"{"language":"en","prefix":"","missingTranslation":"[{info.language}] missing {key} {values}"}"#)
        );
    }

    #[rstest]
    fn non_string_value_renders_as_json(translator: Translator) {
        assert_that!(text(translator.t("answer", TranslateOptions::new()).unwrap()), eq("42"));
    }

    #[rstest]
    fn replacement_functions_override_builtins(translator: Translator) {
        let overrides = TransformRegistry::new().with("shout", |s: &str, _: &[String]| s.to_uppercase());
        let table = TranslationTable::new(json!({"k": "{name, shout()}"}), "{key}");
        let translator = Translator::from_table(Arc::new(table), translator.language(), None);

        let options = TranslateOptions::new().value("name", "ann").replacement_functions(overrides);

        assert_that!(text(translator.t("k", options).unwrap()), eq("ANN"));
    }

    #[rstest]
    fn malformed_template_is_an_error(translator: Translator) {
        assert_that!(translator.t("broken", TranslateOptions::new()), err(anything()));
    }

    #[rstest]
    fn with_prefix_replaces_scope(translator: Translator) {
        let scoped = translator.with_prefix("error").with_prefix("error");

        assert_that!(scoped.prefix(), eq("error"));
        assert_that!(text(scoped.t("404", TranslateOptions::new()).unwrap()), eq("Not found"));
        assert_that!(translator.prefix(), eq(""));
    }

    #[rstest]
    fn unavailable_translator_always_returns_message() {
        let translator = Translator::unavailable("fr", "no table");
        let scoped = translator.with_prefix("error");

        assert_that!(scoped.is_available(), eq(false));
        assert_that!(scoped.prefix(), eq(""));
        assert_that!(text(scoped.t("anything", TranslateOptions::new()).unwrap()), eq("no table"));
    }
}
