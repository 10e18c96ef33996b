//! FILENAME: core/chart-format/src/date_format.rs
//! PURPOSE: Re-renders date-like cell values with a moment-style pattern.
//! CONTEXT: Datasources return dates as compact strings ("20130208"), ISO
//! strings, date-times, or epoch milliseconds. Parsing is permissive; anything
//! that does not parse is left for the caller to pass through.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::fmt::Write;

use crate::value::CellValue;

const DATE_TIME_PATTERNS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_PATTERNS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Format a date-like value with a moment-style pattern.
///
/// Returns `None` (meaning: pass the value through) when the value does not
/// parse as a date, or when it already starts with its own rendering under
/// `pattern`. The second rule makes the operation idempotent.
pub fn format_date(value: &CellValue, pattern: &str) -> Option<String> {
    if pattern.is_empty() {
        return None;
    }

    let parsed = parse_date_time(value)?;
    let rendered = render_pattern(&parsed, pattern)?;

    if let CellValue::Text(text) = value {
        if text.trim().starts_with(&rendered) {
            return None;
        }
    }
    Some(rendered)
}

/// Permissive date parsing over the shapes datasources commonly emit.
pub fn parse_date_time(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::Number(millis) if millis.is_finite() => {
            DateTime::from_timestamp_millis(*millis as i64).map(|dt| dt.naive_utc())
        }
        CellValue::Text(text) => parse_date_time_text(text.trim()),
        _ => None,
    }
}

fn parse_date_time_text(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        return parse_compact_digits(text);
    }

    for pattern in DATE_TIME_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(text, pattern).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// `YYYYMMDD` and `YYYYMMDDHHmmss`.
fn parse_compact_digits(text: &str) -> Option<NaiveDateTime> {
    let field = |range: std::ops::Range<usize>| text.get(range)?.parse::<u32>().ok();

    match text.len() {
        8 | 14 => {
            let year = text.get(0..4)?.parse::<i32>().ok()?;
            let date = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?;
            if text.len() == 8 {
                date.and_hms_opt(0, 0, 0)
            } else {
                date.and_hms_opt(field(8..10)?, field(10..12)?, field(12..14)?)
            }
        }
        _ => None,
    }
}

/// Render a date-time with a moment-style pattern.
///
/// Text inside `[...]` is copied literally, as is any character that is not a
/// moment token. Returns `None` when the pattern uses a token that cannot be
/// rendered here (quarters, week numbers, offsets, ...).
pub fn render_pattern(dt: &NaiveDateTime, pattern: &str) -> Option<String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'scan: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                out.push_str(&rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        for (token, kind) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                match kind {
                    Token::Chrono(spec) => write!(out, "{}", dt.format(spec)).ok()?,
                    Token::DayOrdinal => out.push_str(&ordinal(dt.day())),
                    Token::Unsupported => {
                        log::debug!("date token {:?} in {:?} is not supported", token, pattern);
                        return None;
                    }
                }
                rest = after;
                continue 'scan;
            }
        }

        if UNSUPPORTED_LETTERS.contains(c) {
            log::debug!("date token {:?} in {:?} is not supported", c, pattern);
            return None;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    Some(out)
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Chrono(&'static str),
    DayOrdinal,
    Unsupported,
}

/// Moment tokens, longest first within each letter.
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Chrono("%Y")),
    ("YY", Token::Chrono("%y")),
    ("MMMM", Token::Chrono("%B")),
    ("MMM", Token::Chrono("%b")),
    ("MM", Token::Chrono("%m")),
    ("Mo", Token::Unsupported),
    ("M", Token::Chrono("%-m")),
    ("DDDD", Token::Chrono("%j")),
    ("DDD", Token::Chrono("%-j")),
    ("DD", Token::Chrono("%d")),
    ("Do", Token::DayOrdinal),
    ("D", Token::Chrono("%-d")),
    ("dddd", Token::Chrono("%A")),
    ("ddd", Token::Chrono("%a")),
    ("dd", Token::Unsupported),
    ("do", Token::Unsupported),
    ("d", Token::Chrono("%w")),
    ("HH", Token::Chrono("%H")),
    ("H", Token::Chrono("%-H")),
    ("hh", Token::Chrono("%I")),
    ("h", Token::Chrono("%-I")),
    ("mm", Token::Chrono("%M")),
    ("m", Token::Chrono("%-M")),
    ("ss", Token::Chrono("%S")),
    ("s", Token::Chrono("%-S")),
    ("SSS", Token::Chrono("%3f")),
    ("A", Token::Chrono("%p")),
    ("a", Token::Chrono("%P")),
];

/// Letters that start a moment token missing from `TOKENS`.
const UNSUPPORTED_LETTERS: &str = "QEewWyYgGkSZzXxN";

/// `1st`, `2nd`, `3rd`, `4th`, `11th`, `21st`...
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_date_is_reformatted() {
        assert_eq!(
            format_date(&CellValue::from("20130208"), "YYYY-MM-DD"),
            Some("2013-02-08".to_string())
        );
    }

    #[test]
    fn test_value_already_in_pattern_passes_through() {
        assert_eq!(format_date(&CellValue::from("2013-02-08 00:00:00"), "YYYY-MM-DD"), None);
        assert_eq!(format_date(&CellValue::from("2013-02-08"), "YYYY-MM-DD"), None);
    }

    #[test]
    fn test_reformat_between_patterns() {
        assert_eq!(
            format_date(&CellValue::from("2022-03-01 13:05:09"), "YYYY/MM/DD HH:mm"),
            Some("2022/03/01 13:05".to_string())
        );
        assert_eq!(
            format_date(&CellValue::from("2022-03-01"), "D/M/YY"),
            Some("1/3/22".to_string())
        );
    }

    #[test]
    fn test_epoch_millis() {
        assert_eq!(
            format_date(&CellValue::from(0.0), "YYYY-MM-DD"),
            Some("1970-01-01".to_string())
        );
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(format_date(&CellValue::from("not a date"), "YYYY-MM-DD"), None);
        assert_eq!(format_date(&CellValue::from("20131399"), "YYYY-MM-DD"), None);
        assert_eq!(format_date(&CellValue::Null, "YYYY-MM-DD"), None);
    }

    fn march_first() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 3, 1)
            .and_then(|date| date.and_hms_opt(13, 5, 9))
            .unwrap()
    }

    #[test]
    fn test_render_numeric_tokens() {
        let dt = march_first();
        assert_eq!(render_pattern(&dt, "YYYY-MM-DD HH:mm:ss").as_deref(), Some("2022-03-01 13:05:09"));
        assert_eq!(render_pattern(&dt, "hh:mm A").as_deref(), Some("01:05 PM"));
        assert_eq!(render_pattern(&dt, "YYYY-MM-DDTHH:mm").as_deref(), Some("2022-03-01T13:05"));
        assert_eq!(render_pattern(&dt, "[Q]M 100%").as_deref(), Some("Q3 100%"));
    }

    #[test]
    fn test_render_name_tokens() {
        let dt = march_first();
        assert_eq!(render_pattern(&dt, "MMM D, YYYY").as_deref(), Some("Mar 1, 2022"));
        assert_eq!(render_pattern(&dt, "MMMM").as_deref(), Some("March"));
        assert_eq!(render_pattern(&dt, "dddd").as_deref(), Some("Tuesday"));
        assert_eq!(render_pattern(&dt, "ddd, MMM Do").as_deref(), Some("Tue, Mar 1st"));
        assert_eq!(render_pattern(&dt, "Do MMM").as_deref(), Some("1st Mar"));
    }

    #[test]
    fn test_unsupported_tokens_decline() {
        let dt = march_first();
        assert_eq!(render_pattern(&dt, "Q"), None);
        assert_eq!(render_pattern(&dt, "Mo"), None);
        assert_eq!(render_pattern(&dt, "YYYY-[W]WW"), None);
        assert_eq!(render_pattern(&dt, "dd"), None);
        assert_eq!(render_pattern(&dt, "HH:mm Z"), None);

        assert_eq!(format_date(&CellValue::from("2022-03-01"), "Qo"), None);
        assert_eq!(
            format_date(&CellValue::from("2022-03-01"), "MMM D, YYYY"),
            Some("Mar 1, 2022".to_string())
        );
    }

    #[test]
    fn test_ordinal() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31].into_iter().map(ordinal).collect();
        assert_eq!(
            rendered,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "31st"]
        );
    }
}
