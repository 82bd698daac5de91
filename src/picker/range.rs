//! Range value types

use std::fmt;

use chrono::NaiveDate;

use crate::date::format_range;

/// A pair of optional calendar days with `start <= end` whenever both are set
///
/// Complete when both endpoints are set, empty when neither is. A start
/// without an end only exists mid-selection inside an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range, swapping inverted endpoints
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        match (start, end) {
            (Some(s), Some(e)) if s > e => Self { start: Some(e), end: Some(s) },
            _ => Self { start, end },
        }
    }

    /// Neither endpoint set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Both endpoints set
    pub fn complete(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Only the start set
    pub(crate) fn started(start: NaiveDate) -> Self {
        Self { start: Some(start), end: None }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// `(start, end)` for a complete range
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?, self.end?))
    }

    /// Whether `d` lies within a complete range, endpoints included
    pub fn contains(&self, d: NaiveDate) -> bool {
        self.bounds().is_some_and(|(s, e)| s <= d && d <= e)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str(&format_range(self.start, self.end))
    }
}

/// Which endpoint the next day click edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveField {
    Start,
    End,
}

/// How a range should be shown: as a preset label or as explicit dates
///
/// This records where a value came from, not whether its dates happen to
/// equal a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Preset,
    Custom,
}
