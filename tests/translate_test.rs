//! Loading a language folder and resolving keys end to end.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use googletest::prelude::*;
use interp_i18n::resolver::MemoryLoader;
use interp_i18n::{
    SubstitutionValue,
    TranslateOptions,
    Translation,
    TranslationTable,
    Translations,
};
use serde_json::json;
use tempfile::TempDir;

const EN: &str = r#"{
  "keys": {
    "friend_1": "A friend",
    "friend_few": "A few friends",
    "friend_many": "Many friends",
    "friend_other": "{count} friends",
    "friend_boy_1": "A boyfriend",
    "friend_boy_none": "Hardly any boyfriends",
    "friend_boy_other": "{count} boyfriends",
    "error_300": "Multiple choices ({values.code})",
    "error_other": "Error {values.code}",
    "error": {
      "404": "Page not found",
      "retry": "Retry after {seconds, number(en-US)} seconds"
    },
    "removed": null,
    "order": "{total, currency(en-US, USD)} on {placed, date(en-US, UTC, true)}",
    "profile": "{user.name} is {user.age}",
    "payload": "{data, stringify(\"\")}"
  },
  "missingTranslation": "Missing {key} in {info.language}"
}"#;

fn workspace() -> (TempDir, Translations) {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("en.json"), EN).unwrap();
    let translations = Translations::new(dir.path());
    (dir, translations)
}

fn text(translation: Translation) -> String {
    translation.into_text().unwrap()
}

fn code(value: i64) -> TranslateOptions {
    TranslateOptions::new().value("values", SubstitutionValue::map([("code", value)]))
}

#[tokio::test]
async fn plural_variants_are_selected_by_count() {
    let (_dir, translations) = workspace();
    let en = translations.translator("en", None).await;

    let resolve = |count: u64| text(en.t("friend", TranslateOptions::new().count(count).value("count", count)).unwrap());

    assert_that!(resolve(1), eq("A friend"));
    assert_that!(resolve(10), eq("A few friends"));
    assert_that!(resolve(50), eq("Many friends"));
    assert_that!(resolve(2), eq("2 friends"));
    assert_that!(resolve(0), eq("0 friends"));
}

#[tokio::test]
async fn context_is_probed_before_plain_keys() {
    let (_dir, translations) = workspace();
    let en = translations.translator("en", None).await;

    let options = |count: u64| TranslateOptions::new().count(count).context("boy").value("count", count);

    assert_that!(text(en.t("friend", options(1)).unwrap()), eq("A boyfriend"));
    assert_that!(text(en.t("friend", options(2)).unwrap()), eq("Hardly any boyfriends"));
    assert_that!(text(en.t("friend", options(40)).unwrap()), eq("40 boyfriends"));
}

#[tokio::test]
async fn key_list_falls_back_in_order() {
    let (_dir, translations) = workspace();
    let en = translations.translator("en", None).await;

    let found = en.t(["error_300", "error_other"], code(300)).unwrap();
    let fallback = en.t(["error_500", "error_other"], code(500)).unwrap();

    assert_that!(text(found), eq("Multiple choices (300)"));
    assert_that!(text(fallback), eq("Error 500"));
}

#[tokio::test]
async fn prefix_scopes_lookups() {
    let (_dir, translations) = workspace();
    let errors = translations.translator("en", Some("error")).await;

    let retry = errors.t("retry", TranslateOptions::new().value("seconds", 1500)).unwrap();
    let not_found = errors.with_prefix("error").t("404", TranslateOptions::new()).unwrap();

    assert_that!(errors.prefix(), eq("error"));
    assert_that!(text(retry), eq("Retry after 1,500 seconds"));
    assert_that!(text(not_found), eq("Page not found"));
}

#[tokio::test]
async fn missing_null_and_disabled_are_distinct() {
    let (_dir, translations) = workspace();
    let en = translations.translator("en", None).await;

    let missing = en.t(["nope", "still_nope"], TranslateOptions::new()).unwrap();
    let disabled = en.t("nope", TranslateOptions::new().use_missing_translation(false)).unwrap();
    let removed = en.t("removed", TranslateOptions::new()).unwrap();

    assert_that!(missing, eq(&Translation::Text("Missing still_nope in en".into())));
    assert_that!(disabled, eq(&Translation::Missing));
    assert_that!(removed, eq(&Translation::Null));
}

#[tokio::test]
async fn transforms_format_values() {
    let (_dir, translations) = workspace();
    let en = translations.translator("en", None).await;
    let options = TranslateOptions::new().value("total", 1234.5).value("placed", 1_705_314_600_000_i64);

    let order = en.t("order", options).unwrap();

    assert_that!(text(order), eq("$1,234.50 on Monday, January 15, 2024 at 10:30:00 AM UTC"));
}

#[tokio::test]
async fn nested_values_and_stringify() {
    let (_dir, translations) = workspace();
    let en = translations.translator("en", None).await;
    let user = SubstitutionValue::map([
        ("name", SubstitutionValue::from("Ann")),
        ("age", SubstitutionValue::from(5)),
    ]);

    let profile = en.t("profile", TranslateOptions::new().value("user", user)).unwrap();
    let payload =
        en.t("payload", TranslateOptions::new().value("data", r#"{ "a": [1, 2] }"#)).unwrap();

    assert_that!(text(profile), eq("Ann is 5"));
    assert_that!(text(payload), eq(r#"{"a":[1,2]}"#));
}

#[tokio::test]
async fn unknown_language_answers_with_diagnostic() {
    let (dir, translations) = workspace();

    let fr = translations.translator("fr", None).await;
    let answer = fr.t("friend", TranslateOptions::new().count(1)).unwrap();

    assert_that!(
        text(answer),
        eq(&format!(
            "Could not find the translation file for fr (path: {})",
            dir.path().join("fr.json").display()
        ))
    );
}

#[tokio::test]
async fn memory_loader_serves_tables() {
    let table = TranslationTable::new(json!({"hello": "Hallo {name}"}), "{key}");
    let translations = Translations::with_loader("mem", MemoryLoader::new().with_table("mem/de.json", table));

    let de = translations.translator("de", None).await;

    assert_that!(
        text(de.t("hello", TranslateOptions::new().value("name", "Ann")).unwrap()),
        eq("Hallo Ann")
    );
}

#[tokio::test]
async fn syntax_error_propagates_to_caller() {
    let table = TranslationTable::new(json!({"bad": "{a, f(x))}"}), "{key}");
    let translations = Translations::with_loader("mem", MemoryLoader::new().with_table("mem/en.json", table));

    let en = translations.translator("en", None).await;

    assert_that!(en.t("bad", TranslateOptions::new()), err(anything()));
}
