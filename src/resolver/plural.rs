//! Plural and context suffix handling for candidate lookup keys.

use std::fmt;

/// Suffix probed last whenever a count is given.
pub const OTHER_SUFFIX: &str = "_other";

/// Bucket a count falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    /// 0, 1 or 2
    None,
    /// 3 to 29
    Few,
    /// 30 to 99
    Many,
    /// 100 and above
    Lot,
}

impl PluralCategory {
    #[must_use]
    pub const fn from_count(count: u64) -> Self {
        match count {
            0..3 => Self::None,
            3..30 => Self::Few,
            30..100 => Self::Many,
            _ => Self::Lot,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Few => "few",
            Self::Many => "many",
            Self::Lot => "lot",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suffixes to try, most specific first.
///
/// With a count: `_<count>`, `_<category>`, `_other`, each preceded by the
/// context suffix (`_<context>`) if there is one. Without a count only the
/// context suffix (possibly empty) is tried.
#[must_use]
pub fn candidate_suffixes(count: Option<u64>, context: Option<&str>) -> Vec<String> {
    let context = context.map(|c| format!("_{c}")).unwrap_or_default();

    count.map_or_else(
        || vec![context.clone()],
        |count| {
            vec![
                format!("{context}_{count}"),
                format!("{context}_{}", PluralCategory::from_count(count)),
                format!("{context}{OTHER_SUFFIX}"),
            ]
        },
    )
}

/// Fully qualified lookup keys: every suffix of the first key, then every suffix of the next.
#[must_use]
pub fn candidate_keys<S: AsRef<str>>(keys: &[S], prefix: &str, suffixes: &[String]) -> Vec<String> {
    let scope = if prefix.is_empty() { String::new() } else { format!("{prefix}.") };
    let scope = scope.as_str();

    keys.iter()
        .flat_map(|key| {
            let key = key.as_ref();
            suffixes.iter().map(move |suffix| format!("{scope}{key}{suffix}"))
        })
        .collect()
}
