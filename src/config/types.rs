use std::path::{
    Component,
    Path,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "translationDir")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Folder holding `<language>.json` files, relative to the workspace root.
    pub translation_dir: String,

    /// Language used when none is given on the command line.
    pub default_language: String,

    /// Key prefix applied to every lookup.
    ///
    /// - `None`: keys are looked up from the table root (default)
    /// - `Some("error")`: `404` resolves `error.404`
    pub prefix: Option<String>,

    /// Render the file's `missingTranslation` template for unresolved keys.
    pub use_missing_translation: bool,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translation_dir: "languages".to_string(),
            default_language: "en".to_string(),
            prefix: None,
            use_missing_translation: true,
        }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Translation directory is empty
    /// - Default language is empty or not a plain file name
    /// - Prefix is blank
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.translation_dir.trim().is_empty() {
            errors.push(ValidationError::new(
                "translationDir",
                "The directory cannot be empty. Example: \"languages\"",
            ));
        }

        if self.default_language.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLanguage",
                "The language cannot be empty. Example: \"en\"",
            ));
        } else if !is_plain_file_stem(&self.default_language) {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "Invalid language '{}': must be a file name without path separators",
                    self.default_language
                ),
            ));
        }

        if let Some(prefix) = &self.prefix
            && prefix.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "prefix",
                "The prefix cannot be blank. Specify a key such as \"error\", or remove this field",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// `en`, `pt-BR`: exactly one normal path component.
fn is_plain_file_stem(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
        && !name.contains(['/', '\\'])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = I18nSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"prefix": "error", "useMissingTranslation": false}"#;

        let settings: I18nSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.translation_dir, eq("languages"));
        assert_that!(settings.prefix, some(eq("error")));
        assert_that!(settings.use_missing_translation, eq(false));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: I18nSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&I18nSettings::default()));
    }

    #[rstest]
    fn validate_translation_dir_empty() {
        let settings = I18nSettings { translation_dir: "  ".to_string(), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("translationDir")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    #[case::empty("", "cannot be empty")]
    #[case::nested("en/US", "Invalid language 'en/US'")]
    #[case::parent("..", "Invalid language '..'")]
    #[case::backslash("en\\x", "Invalid language")]
    fn validate_default_language(#[case] language: &str, #[case] message: &str) {
        let settings = I18nSettings { default_language: language.to_string(), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("defaultLanguage")),
                field!(ValidationError.message, contains_substring(message))
            ]])
        );
    }

    #[rstest]
    #[case("en")]
    #[case("pt-BR")]
    #[case("zh_Hant")]
    fn validate_accepts_language_tags(#[case] language: &str) {
        let settings = I18nSettings { default_language: language.to_string(), ..I18nSettings::default() };

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn validate_blank_prefix() {
        let settings = I18nSettings { prefix: Some(String::new()), ..I18nSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("prefix"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = I18nSettings {
            translation_dir: String::new(),
            default_language: String::new(),
            ..I18nSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let error_message = format!("{}", ConfigError::ValidationErrors(errors));

        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. translationDir"));
        assert_that!(error_message, contains_substring("2. defaultLanguage"));
    }
}
