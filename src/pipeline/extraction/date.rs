//! Report date resolution.
//!
//! Best-effort: collects every parseable date in the text and keeps the most
//! recent one. A lab report usually prints collection, report and print
//! dates; the latest is the safest single choice.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

/// `12/05/2024`, `2024-05-12`, `5-12-2024`.
static NUMERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,4})[/\-](\d{1,2})[/\-](\d{1,4})\b").unwrap());

/// `12 May 2024`, `12-May-2024`, `12th September 2024`.
static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?[\s\-]+([a-z]{3,9})\.?[\s\-,]+(\d{4})\b").unwrap()
});

/// `May 12, 2024`, `Sept 3 2024`.
static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]{3,9})\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})\b").unwrap()
});

/// Most recent date found in `text`, or `fallback` when none parse.
pub fn resolve_report_date(text: &str, fallback: NaiveDate) -> NaiveDate {
    find_dates(text).into_iter().max().unwrap_or(fallback)
}

/// Every calendar-valid date in `text`, in no particular order.
pub fn find_dates(text: &str) -> Vec<NaiveDate> {
    let numeric = NUMERIC_DATE.captures_iter(text).filter_map(|c| numeric_date(&c));
    let dmy = DAY_MONTH_YEAR.captures_iter(text).filter_map(|c| {
        let day = c[1].parse().ok()?;
        let month = month_number(&c[2])?;
        let year = c[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    });
    let mdy = MONTH_DAY_YEAR.captures_iter(text).filter_map(|c| {
        let month = month_number(&c[1])?;
        let day = c[2].parse().ok()?;
        let year = c[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    });
    numeric.chain(dmy).chain(mdy).collect()
}

/// Year-first when the first group has four digits, otherwise month-first
/// with the year last. A month-first reading whose month exceeds 12 is
/// retried day-first (`25/12/2024`).
fn numeric_date(caps: &Captures<'_>) -> Option<NaiveDate> {
    let (a, b, c) = (&caps[1], &caps[2], &caps[3]);
    let (first, second, third): (u32, u32, u32) =
        (a.parse().ok()?, b.parse().ok()?, c.parse().ok()?);

    if a.len() == 4 {
        return NaiveDate::from_ymd_opt(i32::try_from(first).ok()?, second, third);
    }
    if c.len() != 4 {
        return None;
    }
    let year = i32::try_from(third).ok()?;
    NaiveDate::from_ymd_opt(year, first, second)
        .or_else(|| NaiveDate::from_ymd_opt(year, second, first))
}

fn month_number(name: &str) -> Option<u32> {
    let name = name.to_ascii_lowercase();
    let month = match name.get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    // Reject words that merely start like a month ("mayor", "decimal").
    const FULL: [&str; 12] = [
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december",
    ];
    let full = FULL[month as usize - 1];
    (name.len() == 3 || full.starts_with(&name) || name == "sept").then_some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fallback() -> NaiveDate {
        make_date(2026, 1, 15)
    }

    #[test]
    fn no_date_returns_fallback() {
        assert_eq!(resolve_report_date("TSH 2.1 mIU/L", fallback()), fallback());
    }

    #[test]
    fn month_first_numeric() {
        assert_eq!(resolve_report_date("Date: 03/14/2024", fallback()), make_date(2024, 3, 14));
    }

    #[test]
    fn day_first_when_month_impossible() {
        assert_eq!(resolve_report_date("Date: 25/12/2024", fallback()), make_date(2024, 12, 25));
    }

    #[test]
    fn year_first_numeric() {
        assert_eq!(resolve_report_date("Collected 2024-05-12", fallback()), make_date(2024, 5, 12));
    }

    #[test]
    fn month_name_orderings() {
        assert_eq!(resolve_report_date("Reported: 12 May 2024", fallback()), make_date(2024, 5, 12));
        assert_eq!(resolve_report_date("Reported: May 12, 2024", fallback()), make_date(2024, 5, 12));
        assert_eq!(resolve_report_date("on 3rd Sept 2024", fallback()), make_date(2024, 9, 3));
        assert_eq!(resolve_report_date("12-Jan-2025", fallback()), make_date(2025, 1, 12));
    }

    #[test]
    fn latest_date_wins() {
        let text = "Collected: 01/10/2024 Reported: 2024-01-12 Printed: 11 Jan 2024";
        assert_eq!(resolve_report_date(text, fallback()), make_date(2024, 1, 12));
    }

    #[test]
    fn impossible_dates_are_ignored() {
        assert_eq!(resolve_report_date("31/31/2024 and 2024-02-30", fallback()), fallback());
    }

    #[test]
    fn blood_pressure_is_not_a_date() {
        assert!(find_dates("BP 120/80 mmHg").is_empty());
    }

    #[test]
    fn non_month_words_are_ignored() {
        assert!(find_dates("Mayor 12, 2024").is_empty());
        assert!(month_number("decimal").is_none());
        assert_eq!(month_number("September"), Some(9));
        assert_eq!(month_number("sept"), Some(9));
    }
}
