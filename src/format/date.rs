//! Timestamp rendering.

use chrono::{
    DateTime,
    Datelike,
    FixedOffset,
    Offset,
    Utc,
};

use super::{
    LocaleData,
    locale_data,
    parse_numeric,
    strip_bigint_suffix,
};

/// Rendered for timestamps that are not numbers or out of range.
const INVALID_DATE: &str = "Invalid Date";

/// Formats a millisecond timestamp.
///
/// `timezone` accepts `UTC`/`GMT` and fixed offsets (`+09:00`, `-0530`,
/// `UTC+2`); anything else renders in UTC. `full` selects the weekday +
/// long time style, otherwise only the numeric date is printed.
#[must_use]
pub fn format_date(input: &str, locale: Option<&str>, timezone: Option<&str>, full: bool) -> String {
    let data = locale_data(locale);
    let Some(utc) = timestamp(strip_bigint_suffix(input)) else {
        return INVALID_DATE.to_string();
    };

    let offset = timezone.filter(|tz| !tz.trim().is_empty()).map_or_else(utc_offset, |tz| {
        parse_offset(tz.trim()).unwrap_or_else(|| {
            tracing::warn!(timezone = tz, "Unsupported time zone, formatting in UTC");
            utc_offset()
        })
    });
    let local = utc.with_timezone(&offset);

    if full { render_full(&local, data) } else { local.format(data.short_date).to_string() }
}

/// Parses the timestamp, dropping any fractional milliseconds.
#[allow(clippy::cast_possible_truncation)]
fn timestamp(input: &str) -> Option<DateTime<Utc>> {
    let millis = parse_numeric(input);
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.trunc() as i64)
}

/// Zero offset.
fn utc_offset() -> FixedOffset {
    Utc.fix()
}

/// Parses `UTC`, `GMT`, `Z` or a signed `HH[:MM]` / `HHMM` offset.
fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if matches!(tz, "Z" | "Etc/UTC" | "Etc/GMT") {
        return Some(utc_offset());
    }
    let body = tz.strip_prefix("UTC").or_else(|| tz.strip_prefix("GMT")).unwrap_or(tz);
    if body.is_empty() {
        return Some(utc_offset());
    }

    let (sign, rest) = if let Some(rest) = body.strip_prefix('+') {
        (1, rest)
    } else {
        (-1, body.strip_prefix('-')?)
    };
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit() || c == ':') {
        return None;
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Zone label printed by the long time style.
fn zone_label(offset: &FixedOffset) -> String {
    if offset.local_minus_utc() == 0 { "UTC".to_string() } else { format!("UTC{offset}") }
}

/// Fills the locale's verbose pattern.
fn render_full(local: &DateTime<FixedOffset>, data: &LocaleData) -> String {
    let weekday = data
        .weekdays
        .get(local.weekday().num_days_from_monday() as usize)
        .copied()
        .unwrap_or_default();
    let month = data.months.get(local.month0() as usize).copied().unwrap_or_default();
    let time = local.format(data.long_time).to_string();

    data.full_pattern
        .replace("{weekday}", weekday)
        .replace("{month}", month)
        .replace("{day}", &local.day().to_string())
        .replace("{year}", &local.year().to_string())
        .replace("{time}", &time)
        .replace("{zone}", &zone_label(local.offset()))
}
