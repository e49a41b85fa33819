//! Command-line lookup of a translation key.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use interp_i18n::config::{
    ConfigManager,
    I18nSettings,
};
use interp_i18n::{
    SubstitutionValue,
    TranslateOptions,
    Translation,
    Translations,
    Values,
};

#[derive(Parser, Debug)]
#[command(name = "interp-i18n", version, about = "Resolve a translation key and expand its placeholders")]
struct Cli {
    /// Workspace root holding `.interp-i18n.json`.
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Folder of `<language>.json` files (overrides `translationDir`).
    #[arg(short, long)]
    dir: Option<String>,

    /// Language to resolve in (overrides `defaultLanguage`).
    #[arg(short, long)]
    lang: Option<String>,

    /// Key prefix (overrides `prefix`).
    #[arg(short, long)]
    prefix: Option<String>,

    /// Selects plural variants.
    #[arg(short, long)]
    count: Option<u64>,

    /// Selects context variants.
    #[arg(long)]
    context: Option<String>,

    /// Substitution value as `name=value`; `user.name=Ann` nests one level.
    #[arg(short = 'v', long = "value", value_parser = parse_assignment)]
    values: Vec<(String, String)>,

    /// Print nothing for unresolved keys instead of the missing-translation text.
    #[arg(long)]
    no_missing: bool,

    /// Keys to try in order.
    #[arg(required = true)]
    keys: Vec<String>,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw.split_once('=').ok_or_else(|| format!("expected name=value, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("missing name in '{raw}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Integers, finite numbers and booleans keep their type; anything else is a string.
fn scalar(raw: &str) -> SubstitutionValue {
    if let Ok(integer) = raw.parse::<i64>() {
        return integer.into();
    }
    if let Ok(number) = raw.parse::<f64>()
        && number.is_finite()
    {
        return number.into();
    }
    match raw {
        "true" => true.into(),
        "false" => false.into(),
        _ => raw.into(),
    }
}

fn build_values(assignments: Vec<(String, String)>) -> Values {
    let mut values = Values::new();
    for (name, raw) in assignments {
        let Some((parent, child)) = name.split_once('.') else {
            values.insert(name, scalar(&raw));
            continue;
        };
        let entry = values
            .entry(parent.to_string())
            .or_insert_with(|| SubstitutionValue::Map(Values::new()));
        if let SubstitutionValue::Map(children) = entry {
            children.insert(child.to_string(), scalar(&raw));
        } else {
            *entry = SubstitutionValue::map([(child, scalar(&raw))]);
        }
    }
    values
}

fn settings_with_overrides(base: &I18nSettings, cli: &Cli) -> I18nSettings {
    I18nSettings {
        translation_dir: cli.dir.clone().unwrap_or_else(|| base.translation_dir.clone()),
        default_language: cli.lang.clone().unwrap_or_else(|| base.default_language.clone()),
        prefix: cli.prefix.clone().or_else(|| base.prefix.clone()),
        use_missing_translation: base.use_missing_translation && !cli.no_missing,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(Some(cli.workspace.clone()))
        .with_context(|| format!("failed to load settings from {}", cli.workspace.display()))?;
    let settings = settings_with_overrides(config_manager.get_settings(), &cli);
    config_manager.update_settings(settings).context("invalid command-line options")?;
    let settings = config_manager.get_settings();

    let translations = Translations::new(config_manager.translation_dir());
    let translator = translations.translator(&settings.default_language, settings.prefix.as_deref()).await;

    let mut options = TranslateOptions::new()
        .values(build_values(cli.values))
        .use_missing_translation(settings.use_missing_translation);
    if let Some(count) = cli.count {
        options = options.count(count);
    }
    if let Some(context) = cli.context {
        options = options.context(context);
    }

    let translation = translator.t(cli.keys, options)?;

    let mut stdout = std::io::stdout().lock();
    match translation {
        Translation::Text(text) => writeln!(stdout, "{text}")?,
        Translation::Null => writeln!(stdout, "null")?,
        Translation::Missing => {}
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::plain("name=Ann", "name", "Ann")]
    #[case::empty_value("name=", "name", "")]
    #[case::equals_in_value("expr=a=b", "expr", "a=b")]
    fn assignment_parses(#[case] raw: &str, #[case] name: &str, #[case] value: &str) {
        assert_that!(parse_assignment(raw), ok(eq(&(name.to_string(), value.to_string()))));
    }

    #[rstest]
    #[case("noequals")]
    #[case("=value")]
    fn assignment_rejects(#[case] raw: &str) {
        assert_that!(parse_assignment(raw), err(anything()));
    }

    #[rstest]
    fn values_keep_scalar_types_and_nest() {
        let values = build_values(vec![
            ("code".into(), "300".into()),
            ("price".into(), "1.5".into()),
            ("user.name".into(), "Ann".into()),
            ("user.admin".into(), "true".into()),
        ]);

        let flat = interp_i18n::values::flatten_values(&values);

        assert_that!(flat.get("code"), some(eq("300")));
        assert_that!(flat.get("price"), some(eq("1.5")));
        assert_that!(flat.get("user.name"), some(eq("Ann")));
        assert_that!(flat.get("user.admin"), some(eq("true")));
    }

    #[rstest]
    fn cli_overrides_settings() {
        let cli = Cli::parse_from(["interp-i18n", "--lang", "ja", "--no-missing", "greeting"]);
        let base = I18nSettings { prefix: Some("home".into()), ..I18nSettings::default() };

        let merged = settings_with_overrides(&base, &cli);

        assert_that!(merged.default_language, eq("ja"));
        assert_that!(merged.prefix, some(eq("home")));
        assert_that!(merged.use_missing_translation, eq(false));
        assert_that!(merged.translation_dir, eq("languages"));
    }

    #[rstest]
    fn cli_collects_keys_and_values() {
        let cli = Cli::parse_from(["interp-i18n", "-v", "a=1", "--value", "b=2", "-c", "3", "k1", "k2"]);

        assert_that!(cli.keys, elements_are![eq("k1"), eq("k2")]);
        assert_that!(cli.values, len(eq(2)));
        assert_that!(cli.count, some(eq(3)));
    }
}
