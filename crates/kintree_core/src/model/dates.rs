//! Tolerant parsing for free-form member dates.
//!
//! # Responsibility
//! - Turn free-form `dob` text into a comparable calendar date.
//! - Order members with missing/unparsable dates after all dated members.
//!
//! # Invariants
//! - Parsing never fails hard; anything unrecognized is `None`.
//! - `cmp_birth_dates` is a total order usable by stable sorts.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

/// Formats tried in order. Year-first wins over day-first when both could
/// apply, so ISO-style input is never misread.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Matches a standalone four-digit year inside otherwise free text
/// ("abt 1920", "1920?").
static YEAR_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("year pattern is valid"));

/// Parses free-form date text into a calendar date for ordering.
///
/// Falls back to January 1st of a standalone four-digit year, so
/// year-only genealogy entries still sort among full dates. Returns
/// `None` for anything unrecognized.
pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    let year: i32 = YEAR_ONLY.captures(trimmed)?.get(1)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

/// Orders parsed birth dates ascending with missing dates last.
///
/// Equal and missing-vs-missing pairs compare `Equal`, so a stable sort
/// preserves the original relative order among undated siblings.
pub fn cmp_birth_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::{cmp_birth_dates, parse_birth_date};
    use chrono::NaiveDate;
    use std::cmp::Ordering;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_iso_and_slash_formats() {
        assert_eq!(parse_birth_date("1990-01-15"), Some(date(1990, 1, 15)));
        assert_eq!(parse_birth_date("1990/01/15"), Some(date(1990, 1, 15)));
        assert_eq!(parse_birth_date("15-01-1990"), Some(date(1990, 1, 15)));
        assert_eq!(parse_birth_date("15/01/1990"), Some(date(1990, 1, 15)));
    }

    #[test]
    fn iso_input_is_not_misread_as_day_first() {
        assert_eq!(parse_birth_date("2000-01-02"), Some(date(2000, 1, 2)));
    }

    #[test]
    fn standalone_year_sorts_as_january_first() {
        assert_eq!(parse_birth_date("abt 1920"), Some(date(1920, 1, 1)));
        assert_eq!(parse_birth_date("1920?"), Some(date(1920, 1, 1)));
    }

    #[test]
    fn garbage_and_blank_parse_to_none() {
        assert_eq!(parse_birth_date("unknown"), None);
        assert_eq!(parse_birth_date("  "), None);
        assert_eq!(parse_birth_date("12345"), None);
    }

    #[test]
    fn missing_dates_order_last() {
        let dated = Some(date(1990, 1, 1));
        assert_eq!(cmp_birth_dates(dated, None), Ordering::Less);
        assert_eq!(cmp_birth_dates(None, dated), Ordering::Greater);
        assert_eq!(cmp_birth_dates(None, None), Ordering::Equal);
        assert_eq!(
            cmp_birth_dates(dated, Some(date(1980, 1, 1))),
            Ordering::Greater
        );
    }
}
