//! Apply-time checks on a draft range
//!
//! Nothing here is fatal. A failed check only blocks Apply and gives the
//! host a message to show.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::config::PickerConfig;
use crate::date::days_between_inclusive;
use crate::picker::DateRange;

/// Why a draft cannot be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a start date.")]
    MissingStart,

    #[error("Please select an end date.")]
    MissingEnd,

    #[error("Please select a start and end date.")]
    MissingBoth,

    /// Complete, but longer than the configured cap
    #[error("{message}")]
    RangeTooLarge { limit: RangeLimit, message: String },
}

/// Maximum span a range may cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeLimit {
    /// Inclusive day count
    Days(u32),
    /// Calendar years from the start day
    Years(u32),
}

impl RangeLimit {
    /// Day cap when configured, otherwise the year cap
    pub fn from_config(config: &PickerConfig) -> Self {
        match config.max_range_days {
            Some(days) => RangeLimit::Days(days),
            None => RangeLimit::Years(config.max_range_years),
        }
    }

    pub fn amount(&self) -> u32 {
        match self {
            RangeLimit::Days(n) | RangeLimit::Years(n) => *n,
        }
    }

    /// Unit word, singular for a limit of one
    pub fn unit(&self) -> &'static str {
        match (self, self.amount()) {
            (RangeLimit::Days(_), 1) => "day",
            (RangeLimit::Days(_), _) => "days",
            (RangeLimit::Years(_), 1) => "year",
            (RangeLimit::Years(_), _) => "years",
        }
    }

    /// Whether `start..=end` goes past the limit
    ///
    /// A year cap that starts on Feb 29 ends on Mar 1 when the target year
    /// has no Feb 29.
    pub fn is_exceeded(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match self {
            RangeLimit::Days(days) => days_between_inclusive(start, end) > i64::from(*days),
            RangeLimit::Years(years) => match years_later(start, *years) {
                Some(limit_end) => end > limit_end,
                None => false,
            },
        }
    }

    /// Fill `{limit}` and `{unit}` in a message template
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{limit}", &self.amount().to_string())
            .replace("{unit}", self.unit())
    }
}

impl fmt::Display for RangeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount(), self.unit())
    }
}

/// The same month and day `years` later
///
/// Feb 29 rolls over to Mar 1 in a year without it. `None` past chrono's range.
fn years_later(start: NaiveDate, years: u32) -> Option<NaiveDate> {
    let year = start.year().checked_add(i32::try_from(years).ok()?)?;
    NaiveDate::from_ymd_opt(year, start.month(), start.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Which endpoints are missing, if any
pub fn check_complete(range: &DateRange) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    match (range.start(), range.end()) {
        (Some(s), Some(e)) => Ok((s, e)),
        (None, None) => Err(ValidationError::MissingBoth),
        (None, Some(_)) => Err(ValidationError::MissingStart),
        (Some(_), None) => Err(ValidationError::MissingEnd),
    }
}

/// Whether a range can be applied under `limit`
pub fn check_range(
    range: &DateRange,
    limit: RangeLimit,
    template: &str,
) -> Result<(), ValidationError> {
    let (start, end) = check_complete(range)?;
    if limit.is_exceeded(start, end) {
        return Err(ValidationError::RangeTooLarge {
            limit,
            message: limit.render(template),
        });
    }
    Ok(())
}
