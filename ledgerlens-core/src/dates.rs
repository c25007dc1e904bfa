//! Statement date resolution.
//!
//! Statements print dates as `MM/DD/YYYY`, `MM/DD/YY` or bare `MM/DD`. Bare dates take
//! their year from the statement's filename, falling back to [`FALLBACK_YEAR`].

use chrono::{Month, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

use crate::transaction::StatementDate;

/// Year used for `MM/DD` dates when the filename carries no usable year.
pub const FALLBACK_YEAR: i32 = 2024;

/// Two-digit years at or below this pivot land in the 2000s, the rest in the 1900s.
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 68;

static FULL_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("valid regex"));
static SHORT_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{2})$").expect("valid regex"));
static NO_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})/(\d{2})$").expect("valid regex"));

/// How a filename pattern yields a year.
#[derive(Debug, Clone, Copy)]
enum YearSource {
    /// Capture group holding a four-digit year
    Group(usize),
    /// Month-name group and year group; the month must be a real month name
    MonthName { month: usize, year: usize },
    /// First four digits of a capture group
    Prefix(usize),
}

static FILENAME_PATTERNS: LazyLock<Vec<(Regex, YearSource)>> = LazyLock::new(|| {
    [
        // 20250405
        (r"(\d{4})(\d{2})(\d{2})", YearSource::Group(1)),
        // Statement_Apr_09_2025
        (r"[A-Za-z]+_(\w+)_\d{2}_(\d{4})", YearSource::MonthName { month: 1, year: 2 }),
        // 2025-04-06
        (r"(\d{4})-(\d{2})-(\d{2})", YearSource::Group(1)),
        // January 2025
        (r"(\w+)\s+(\d{4})", YearSource::MonthName { month: 1, year: 2 }),
        // Statement-20250323
        (r"Statement-(\d{8})", YearSource::Prefix(1)),
    ]
    .into_iter()
    .map(|(p, src)| (Regex::new(p).expect("valid regex"), src))
    .collect()
});

/// Resolve a raw statement date into a calendar date.
///
/// Never fails: anything that does not parse comes back as [`StatementDate::Unparsed`]
/// holding the input unchanged.
pub fn resolve(raw: &str, source_filename: &str) -> StatementDate {
    let s = raw.trim();
    let parsed = if let Some(c) = FULL_YEAR_RE.captures(s) {
        ymd(&c[3], &c[1], &c[2])
    } else if let Some(c) = SHORT_YEAR_RE.captures(s) {
        c[3].parse::<i32>()
            .ok()
            .and_then(|yy| ymd_num(expand_two_digit_year(yy), &c[1], &c[2]))
    } else if let Some(c) = NO_YEAR_RE.captures(s) {
        ymd_num(year_from_filename(source_filename), &c[1], &c[2])
    } else {
        None
    };

    match parsed {
        Some(d) => StatementDate::Resolved(d),
        None => StatementDate::Unparsed(raw.to_string()),
    }
}

/// Expand a two-digit year with the POSIX `%y` pivot.
pub fn expand_two_digit_year(yy: i32) -> i32 {
    if yy <= TWO_DIGIT_YEAR_PIVOT { 2000 + yy } else { 1900 + yy }
}

/// Infer the statement year from its filename. First matching pattern wins.
pub fn year_from_filename(filename: &str) -> i32 {
    for (re, src) in FILENAME_PATTERNS.iter() {
        let Some(caps) = re.captures(filename) else {
            continue;
        };
        let year = match *src {
            YearSource::Group(i) => caps[i].parse::<i32>().ok(),
            YearSource::Prefix(i) => caps[i].get(..4).and_then(|y| y.parse::<i32>().ok()),
            YearSource::MonthName { month, year } => month_from_name(&caps[month])
                .and_then(|_| caps[year].parse::<i32>().ok()),
        };
        if let Some(y) = year {
            return y;
        }
    }
    FALLBACK_YEAR
}

/// Full or three-letter English month name, any case.
fn month_from_name(name: &str) -> Option<Month> {
    name.parse::<Month>().ok()
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    ymd_num(year.parse().ok()?, month, day)
}

fn ymd_num(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}
