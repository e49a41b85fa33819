//! Number and currency rendering.

use super::{
    CurrencyLayout,
    LocaleData,
    locale_data,
    parse_numeric,
    strip_bigint_suffix,
};

/// Currency used when none (or an invalid code) is given.
const DEFAULT_CURRENCY: &str = "EUR";

/// No-break space between an amount and a currency code or trailing symbol.
const NBSP: char = '\u{a0}';

/// Formats a numeric string with locale grouping and up to three fraction digits.
///
/// Non-numeric input renders as `NaN`.
#[must_use]
pub fn format_number(input: &str, locale: Option<&str>) -> String {
    let data = locale_data(locale);
    let value = parse_numeric(strip_bigint_suffix(input));
    render_decimal(value, 0, 3, data)
}

/// Formats a numeric string as an amount of `currency` (default `EUR`).
#[must_use]
pub fn format_currency(input: &str, locale: Option<&str>, currency: Option<&str>) -> String {
    let data = locale_data(locale);
    let code = currency_code(currency);
    let digits = fraction_digits(&code);
    let value = parse_numeric(strip_bigint_suffix(input));

    let sign = if value < 0.0 { "-" } else { "" };
    let amount = render_decimal(value.abs(), digits, digits, data);
    let symbol = currency_symbol(&code);

    match data.currency {
        CurrencyLayout::Prefix => symbol.map_or_else(
            || format!("{sign}{code}{NBSP}{amount}"),
            |symbol| format!("{sign}{symbol}{amount}"),
        ),
        CurrencyLayout::Suffix => {
            format!("{sign}{amount}{NBSP}{}", symbol.unwrap_or(code.as_str()))
        }
    }
}

/// Uppercased ISO 4217 code, or the default when `code` is not three letters.
fn currency_code(code: Option<&str>) -> String {
    code.map(str::trim)
        .filter(|c| c.len() == 3 && c.chars().all(|ch| ch.is_ascii_alphabetic()))
        .map_or_else(|| DEFAULT_CURRENCY.to_string(), str::to_ascii_uppercase)
}

/// Symbol for well-known currencies; others print their code.
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "CNY" => Some("CN¥"),
        "INR" => Some("₹"),
        "KRW" => Some("₩"),
        _ => None,
    }
}

/// Minor unit digits of a currency.
fn fraction_digits(code: &str) -> usize {
    match code {
        "JPY" | "KRW" => 0,
        _ => 2,
    }
}

/// Renders `value` rounded to `max_fraction` digits, keeping at least `min_fraction`.
fn render_decimal(
    value: f64,
    min_fraction: usize,
    max_fraction: usize,
    data: &LocaleData,
) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}∞");
    }

    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let trimmed = fraction.trim_end_matches('0');
    let fraction = if trimmed.len() >= min_fraction {
        trimmed
    } else {
        fraction.get(..min_fraction).unwrap_or(fraction)
    };

    let mut out = format!("{sign}{}", group_digits(integer, data.group));
    if !fraction.is_empty() {
        out.push(data.decimal);
        out.push_str(fraction);
    }
    out
}

/// Inserts `separator` between groups of three digits, counted from the right.
fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::default_locale("1234567.891", None, "1,234,567.891")]
    #[case::rounds_to_three("3.14159", None, "3.142")]
    #[case::trims_zeros("2.500", None, "2.5")]
    #[case::small("999", None, "999")]
    #[case::negative("-1234", None, "-1,234")]
    #[case::bigint("123456789n", None, "123,456,789")]
    #[case::german("1234567.5", Some("de-DE"), "1.234.567,5")]
    #[case::french("1234.5", Some("fr"), "1\u{202f}234,5")]
    #[case::unknown_locale("1234", Some("zz"), "1,234")]
    #[case::not_a_number("abc", None, "NaN")]
    #[case::infinity("Infinity", None, "∞")]
    #[case::blank("", None, "0")]
    fn number_formatting(#[case] input: &str, #[case] locale: Option<&str>, #[case] expected: &str) {
        assert_that!(format_number(input, locale), eq(expected));
    }

    #[rstest]
    #[case::defaults("1234.5", None, None, "€1,234.50")]
    #[case::usd("10", Some("en-US"), Some("USD"), "$10.00")]
    #[case::lowercase_code("10", None, Some("gbp"), "£10.00")]
    #[case::german_suffix("1234.5", Some("de-DE"), Some("EUR"), "1.234,50\u{a0}€")]
    #[case::yen_no_decimals("1500", Some("ja-JP"), Some("JPY"), "¥1,500")]
    #[case::code_without_symbol("5", None, Some("CHF"), "CHF\u{a0}5.00")]
    #[case::invalid_code("5", None, Some("euro"), "€5.00")]
    #[case::negative("-3.456", None, None, "-€3.46")]
    #[case::bigint("42n", None, Some("USD"), "$42.00")]
    #[case::not_a_number("x", None, None, "€NaN")]
    fn currency_formatting(
        #[case] input: &str,
        #[case] locale: Option<&str>,
        #[case] currency: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_that!(format_currency(input, locale, currency), eq(expected));
    }

    #[rstest]
    #[case("1", "1")]
    #[case("123", "123")]
    #[case("1234", "1,234")]
    #[case("123456", "123,456")]
    #[case("1234567", "1,234,567")]
    fn grouping(#[case] digits: &str, #[case] expected: &str) {
        assert_that!(group_digits(digits, ","), eq(expected));
    }
}
