//! Locale-aware formatting primitives behind the built-in transforms.
//!
//! Only a handful of locales carry their own data; anything else renders
//! with `en-US` conventions. All functions are total: bad input degrades to
//! `NaN` / `Invalid Date` instead of failing.

mod date;
mod number;

pub use date::format_date;
pub use number::{
    format_currency,
    format_number,
};

/// Locale used when none is given or the given one is unknown.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CurrencyLayout {
    /// `€1,234.50`
    Prefix,
    /// `1.234,50 €`
    Suffix,
}

/// Formatting conventions of one locale.
#[derive(Debug)]
struct LocaleData {
    /// BCP 47 tag, e.g. `de-DE`.
    tag: &'static str,
    decimal: char,
    group: &'static str,
    currency: CurrencyLayout,
    /// chrono format string of the numeric date style.
    short_date: &'static str,
    /// chrono format string of the long time style (without zone).
    long_time: &'static str,
    /// Verbose pattern with `{weekday}`, `{day}`, `{month}`, `{year}`, `{time}` and `{zone}` slots.
    full_pattern: &'static str,
    months: [&'static str; 12],
    /// Monday first.
    weekdays: [&'static str; 7],
}

/// English month names, shared by the `en-*` entries.
const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English weekday names, shared by the `en-*` entries.
const EN_WEEKDAYS: [&str; 7] =
    ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Fallback locale data.
static EN_US: LocaleData = LocaleData {
    tag: DEFAULT_LOCALE,
    decimal: '.',
    group: ",",
    currency: CurrencyLayout::Prefix,
    short_date: "%-m/%-d/%Y",
    long_time: "%-I:%M:%S %p",
    full_pattern: "{weekday}, {month} {day}, {year} at {time} {zone}",
    months: EN_MONTHS,
    weekdays: EN_WEEKDAYS,
};

static EN_GB: LocaleData = LocaleData {
    tag: "en-GB",
    decimal: '.',
    group: ",",
    currency: CurrencyLayout::Prefix,
    short_date: "%d/%m/%Y",
    long_time: "%H:%M:%S",
    full_pattern: "{weekday} {day} {month} {year} at {time} {zone}",
    months: EN_MONTHS,
    weekdays: EN_WEEKDAYS,
};

static DE_DE: LocaleData = LocaleData {
    tag: "de-DE",
    decimal: ',',
    group: ".",
    currency: CurrencyLayout::Suffix,
    short_date: "%-d.%-m.%Y",
    long_time: "%H:%M:%S",
    full_pattern: "{weekday}, {day}. {month} {year} um {time} {zone}",
    months: [
        "Januar",
        "Februar",
        "März",
        "April",
        "Mai",
        "Juni",
        "Juli",
        "August",
        "September",
        "Oktober",
        "November",
        "Dezember",
    ],
    weekdays: ["Montag", "Dienstag", "Mittwoch", "Donnerstag", "Freitag", "Samstag", "Sonntag"],
};

static FR_FR: LocaleData = LocaleData {
    tag: "fr-FR",
    decimal: ',',
    group: "\u{202f}",
    currency: CurrencyLayout::Suffix,
    short_date: "%d/%m/%Y",
    long_time: "%H:%M:%S",
    full_pattern: "{weekday} {day} {month} {year} à {time} {zone}",
    months: [
        "janvier",
        "février",
        "mars",
        "avril",
        "mai",
        "juin",
        "juillet",
        "août",
        "septembre",
        "octobre",
        "novembre",
        "décembre",
    ],
    weekdays: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"],
};

static ES_ES: LocaleData = LocaleData {
    tag: "es-ES",
    decimal: ',',
    group: ".",
    currency: CurrencyLayout::Suffix,
    short_date: "%-d/%-m/%Y",
    long_time: "%-H:%M:%S",
    full_pattern: "{weekday}, {day} de {month} de {year}, {time} ({zone})",
    months: [
        "enero",
        "febrero",
        "marzo",
        "abril",
        "mayo",
        "junio",
        "julio",
        "agosto",
        "septiembre",
        "octubre",
        "noviembre",
        "diciembre",
    ],
    weekdays: ["lunes", "martes", "miércoles", "jueves", "viernes", "sábado", "domingo"],
};

static JA_JP: LocaleData = LocaleData {
    tag: "ja-JP",
    decimal: '.',
    group: ",",
    currency: CurrencyLayout::Prefix,
    short_date: "%Y/%-m/%-d",
    long_time: "%-H:%M:%S",
    full_pattern: "{year}年{month}{day}日{weekday} {time} {zone}",
    months: ["1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月"],
    weekdays: ["月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日", "日曜日"],
};

/// Known locales, searched in order.
static LOCALES: [&LocaleData; 6] = [&EN_US, &EN_GB, &DE_DE, &FR_FR, &ES_ES, &JA_JP];

/// Normalize a locale tag for comparison (lowercase, `_` -> `-`).
fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace('_', "-")
}

/// Finds locale data by exact tag, then by language subtag, then falls back to `en-US`.
fn locale_data(tag: Option<&str>) -> &'static LocaleData {
    let fallback = &EN_US;
    let Some(tag) = tag.filter(|t| !t.trim().is_empty()) else {
        return fallback;
    };
    let normalized = normalize_tag(tag);

    if let Some(exact) = LOCALES.iter().find(|l| normalize_tag(l.tag) == normalized) {
        return *exact;
    }

    let language = normalized.split('-').next().unwrap_or_default();
    LOCALES
        .iter()
        .find(|l| l.tag.split('-').next().is_some_and(|lang| lang.eq_ignore_ascii_case(language)))
        .copied()
        .unwrap_or(fallback)
}

/// Drops the `n` marker big integers carry.
fn strip_bigint_suffix(input: &str) -> &str {
    input.strip_suffix('n').unwrap_or(input)
}

/// Lenient numeric conversion of placeholder text.
///
/// Blank input is `0`, `0x`/`0o`/`0b` prefixes are honoured, and anything
/// that is not a numeric literal is `NaN`.
#[allow(clippy::cast_precision_loss)]
fn parse_numeric(input: &str) -> f64 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.starts_with(['+', '-']) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64);
        }
    }

    // `str::parse` would also accept `inf` and `nan`.
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
