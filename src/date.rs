//! Calendar-day arithmetic
//!
//! Everything here works on [`NaiveDate`], so comparisons are by
//! (year, month, day) only and never by instant. There is no time-of-day and
//! no DST to trip over.

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime};
use crate::error::{Error, Result};

/// Number of cells in a month grid (6 weeks of 7 days)
pub const GRID_CELLS: usize = 42;

/// Short weekday headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Truncate a timestamp to its calendar day
pub fn normalize(dt: NaiveDateTime) -> NaiveDate {
    dt.date()
}

/// First day of the month containing `d`
pub fn start_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// Shift by whole months; the result is always the first of a month
///
/// `None` when the shifted month lies outside chrono's range.
pub fn checked_add_months(d: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let first = start_of_month(d);
    if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    }
}

/// Like [`checked_add_months`], saturating at the start month
pub fn add_months(d: NaiveDate, delta: i32) -> NaiveDate {
    checked_add_months(d, delta).unwrap_or_else(|| start_of_month(d))
}

/// Shift by whole days
pub fn add_days(d: NaiveDate, delta: i64) -> NaiveDate {
    d.checked_add_signed(chrono::Duration::days(delta)).unwrap_or(d)
}

/// Number of days in the month containing `d`
pub fn days_in_month(d: NaiveDate) -> u32 {
    let first = start_of_month(d);
    (add_months(first, 1) - first).num_days() as u32
}

/// Inclusive day count from `a` to `b` (`a == b` gives 1)
pub fn days_between_inclusive(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days() + 1
}

/// Whether two dates fall in the same calendar month
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Months since year 0, for comparing month distances
pub fn month_ordinal(d: NaiveDate) -> i64 {
    i64::from(d.year()) * 12 + i64::from(d.month0())
}

/// Never later than `today`
pub fn clamp_to_today(d: NaiveDate, today: NaiveDate) -> NaiveDate {
    d.min(today)
}

/// A single cell of a month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridCell {
    /// Padding before the first or after the last day of the month
    Blank,
    /// A day of the month
    Day(NaiveDate),
}

impl GridCell {
    /// The day in this cell, if any
    pub fn day(&self) -> Option<NaiveDate> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(d) => Some(*d),
        }
    }
}

/// Lazy iterator over the 42 cells of a month, Sunday in column 0
///
/// Cloning gives an independent iterator, so a grid can be walked as many
/// times as needed.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    first: NaiveDate,
    lead: usize,
    days: usize,
    pos: usize,
}

impl MonthGrid {
    /// First day of the month this grid shows
    pub fn month(&self) -> NaiveDate {
        self.first
    }
}

impl Iterator for MonthGrid {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        if self.pos >= GRID_CELLS {
            return None;
        }
        let index = self.pos;
        self.pos += 1;

        if index < self.lead || index >= self.lead + self.days {
            return Some(GridCell::Blank);
        }
        let offset = (index - self.lead) as i64;
        Some(GridCell::Day(add_days(self.first, offset)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = GRID_CELLS - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MonthGrid {}

/// Build the grid for the month containing `month`
pub fn month_grid(month: NaiveDate) -> MonthGrid {
    let first = start_of_month(month);
    MonthGrid {
        first,
        lead: first.weekday().num_days_from_sunday() as usize,
        days: days_in_month(first) as usize,
        pos: 0,
    }
}

/// Full English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "",
    }
}

/// Header label for a calendar: "June 2024"
pub fn month_label(d: NaiveDate) -> String {
    format!("{} {}", month_name(d.month()), d.year())
}

/// Years from `center - radius` to `center + radius`
pub fn year_options(center: i32, radius: i32) -> Vec<i32> {
    (center - radius..=center + radius).collect()
}

/// Format a date as `MM/DD/YYYY`
pub fn format_mmddyyyy(d: NaiveDate) -> String {
    d.format("%m/%d/%Y").to_string()
}

/// Format a pair of endpoints as `MM/DD/YYYY - MM/DD/YYYY`
///
/// A missing endpoint renders as an empty string on its side.
pub fn format_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    let s = start.map(format_mmddyyyy).unwrap_or_default();
    let e = end.map(format_mmddyyyy).unwrap_or_default();
    format!("{} - {}", s, e)
}

/// Day expression types
#[derive(Debug, Clone, PartialEq)]
pub enum DayExpression {
    /// Use today's date
    Today,
    /// Today minus a number of days
    DaysAgo(u32),
    /// Use an explicit date
    Explicit(NaiveDate),
}

/// Parse a day expression string
///
/// Supported formats:
/// - `"today"` → Today
/// - `"today-6"` → six days before today
/// - `"2024-06-15"` → Explicit date (ISO format)
/// - `"06/15/2024"` → Explicit date (US format)
pub fn parse_day_expression(expr: &str) -> Result<DayExpression> {
    let expr = expr.trim();

    if expr.eq_ignore_ascii_case("today") {
        return Ok(DayExpression::Today);
    }

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%Y-%m-%d") {
        return Ok(DayExpression::Explicit(date));
    }

    if let Ok(date) = NaiveDate::parse_from_str(expr, "%m/%d/%Y") {
        return Ok(DayExpression::Explicit(date));
    }

    if let Some((head, offset_str)) = expr.split_once('-') {
        if head.trim().eq_ignore_ascii_case("today") {
            let offset: u32 = offset_str.trim().parse()
                .map_err(|_| Error::InvalidDate(format!("Invalid offset: {}", offset_str)))?;
            return Ok(DayExpression::DaysAgo(offset));
        }
    }

    Err(Error::InvalidDate(format!("Unable to parse date expression: {}", expr)))
}

/// Resolve a DayExpression against a reference day
pub fn resolve_day(expr: &DayExpression, today: NaiveDate) -> NaiveDate {
    match expr {
        DayExpression::Today => today,
        DayExpression::DaysAgo(n) => add_days(today, -i64::from(*n)),
        DayExpression::Explicit(date) => *date,
    }
}

/// Parse and resolve in one step
pub fn parse_day(expr: &str, today: NaiveDate) -> Result<NaiveDate> {
    parse_day_expression(expr).map(|e| resolve_day(&e, today))
}

/// Parse a `YYYY-MM` month into its first day
pub fn parse_month(expr: &str) -> Result<NaiveDate> {
    let expr = expr.trim();
    NaiveDate::parse_from_str(&format!("{}-01", expr), "%Y-%m-%d")
        .map_err(|_| Error::InvalidMonth(format!("Expected YYYY-MM, got: {}", expr)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_drops_time() {
        let dt = ymd(2024, 3, 10).and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(normalize(dt), ymd(2024, 3, 10));
    }

    #[test]
    fn test_start_of_month() {
        assert_eq!(start_of_month(ymd(2024, 6, 15)), ymd(2024, 6, 1));
        assert_eq!(start_of_month(ymd(2024, 6, 1)), ymd(2024, 6, 1));
    }

    #[test]
    fn test_add_months_crosses_years() {
        assert_eq!(add_months(ymd(2024, 1, 31), -1), ymd(2023, 12, 1));
        assert_eq!(add_months(ymd(2024, 12, 15), 1), ymd(2025, 1, 1));
        assert_eq!(add_months(ymd(2024, 6, 15), 0), ymd(2024, 6, 1));
        assert_eq!(add_months(ymd(2024, 6, 15), -18), ymd(2022, 12, 1));
        assert_eq!(checked_add_months(NaiveDate::MIN, -1), None);
        assert_eq!(checked_add_months(NaiveDate::MAX, 1), None);
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(ymd(2024, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2024, 12, 1)), 31);
        assert_eq!(days_in_month(ymd(2024, 4, 30)), 30);
    }

    #[test]
    fn test_days_between_inclusive() {
        assert_eq!(days_between_inclusive(ymd(2024, 6, 15), ymd(2024, 6, 15)), 1);
        assert_eq!(days_between_inclusive(ymd(2024, 1, 1), ymd(2024, 2, 15)), 46);
        assert_eq!(days_between_inclusive(ymd(2024, 1, 1), ymd(2024, 12, 31)), 366);
    }

    #[test]
    fn test_month_grid_layout() {
        // June 2024 starts on a Saturday
        let cells: Vec<GridCell> = month_grid(ymd(2024, 6, 20)).collect();
        assert_eq!(cells.len(), GRID_CELLS);
        assert!(cells[..6].iter().all(|c| *c == GridCell::Blank));
        assert_eq!(cells[6], GridCell::Day(ymd(2024, 6, 1)));
        assert_eq!(cells[35], GridCell::Day(ymd(2024, 6, 30)));
        assert!(cells[36..].iter().all(|c| *c == GridCell::Blank));
    }

    #[test]
    fn test_month_grid_sunday_start() {
        // September 2024 starts on a Sunday
        let mut grid = month_grid(ymd(2024, 9, 1));
        assert_eq!(grid.len(), GRID_CELLS);
        assert_eq!(grid.next(), Some(GridCell::Day(ymd(2024, 9, 1))));
        let days = month_grid(ymd(2024, 9, 1)).filter_map(|c| c.day()).count();
        assert_eq!(days, 30);
    }

    #[test]
    fn test_month_grid_is_restartable() {
        let grid = month_grid(ymd(2024, 2, 1));
        let first: Vec<_> = grid.clone().collect();
        let second: Vec<_> = grid.collect();
        assert_eq!(first, second);
        assert_eq!(month_grid(ymd(2024, 2, 1)).month(), ymd(2024, 2, 1));
    }

    #[test]
    fn test_month_label_and_name() {
        assert_eq!(month_label(ymd(2024, 6, 15)), "June 2024");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "");
    }

    #[test]
    fn test_format_mmddyyyy() {
        assert_eq!(format_mmddyyyy(ymd(2024, 6, 5)), "06/05/2024");
        assert_eq!(
            format_range(Some(ymd(2024, 6, 1)), Some(ymd(2024, 6, 10))),
            "06/01/2024 - 06/10/2024"
        );
        assert_eq!(format_range(Some(ymd(2024, 6, 1)), None), "06/01/2024 - ");
    }

    #[test]
    fn test_parse_day_formats() {
        let today = ymd(2024, 6, 15);
        assert_eq!(parse_day("today", today).unwrap(), today);
        assert_eq!(parse_day("TODAY", today).unwrap(), today);
        assert_eq!(parse_day("today-6", today).unwrap(), ymd(2024, 6, 9));
        assert_eq!(parse_day("2024-01-31", today).unwrap(), ymd(2024, 1, 31));
        assert_eq!(parse_day("01/31/2024", today).unwrap(), ymd(2024, 1, 31));
    }

    #[test]
    fn test_parse_day_invalid() {
        let today = ymd(2024, 6, 15);
        assert!(parse_day("", today).is_err());
        assert!(parse_day("yesterday", today).is_err());
        assert!(parse_day("2024-13-01", today).is_err());
        assert!(parse_day("today-abc", today).is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-06").unwrap(), ymd(2024, 6, 1));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("June").is_err());
    }

    #[test]
    fn test_year_options() {
        assert_eq!(year_options(2024, 2), vec![2022, 2023, 2024, 2025, 2026]);
    }

    #[test]
    fn test_clamp_to_today() {
        let today = ymd(2024, 6, 15);
        assert_eq!(clamp_to_today(ymd(2024, 7, 1), today), today);
        assert_eq!(clamp_to_today(ymd(2024, 6, 1), today), ymd(2024, 6, 1));
    }
}
