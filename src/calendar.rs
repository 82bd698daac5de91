//! The two-month calendar window
//!
//! Two consecutive months are visible at a time. Every mutation keeps
//! `bottom == top + 1 month` and `bottom <= startOfMonth(today)`; operations
//! that cannot satisfy both are no-ops.

use chrono::{Datelike, NaiveDate};
use log::trace;

use crate::date::{
    add_months, checked_add_months, clamp_to_today, is_same_month, month_grid, month_label, month_ordinal,
    start_of_month, year_options, MonthGrid,
};
use crate::picker::{ActiveField, DateRange};

/// How many years either side of the shown year a year selector lists
pub const YEAR_RADIUS: i32 = 6;

/// Which of the two calendars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarId {
    Top,
    Bottom,
}

/// Two consecutive visible months, never past the current month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarWindow {
    top: NaiveDate,
    bottom: NaiveDate,
    today: NaiveDate,
}

impl CalendarWindow {
    /// A window showing last month and this month
    pub fn new(today: NaiveDate) -> Self {
        let mut window = Self { top: today, bottom: today, today };
        window.open_fresh();
        window
    }

    /// First day of the upper (earlier) month
    pub fn top_month(&self) -> NaiveDate {
        self.top
    }

    /// First day of the lower (later) month
    pub fn bottom_month(&self) -> NaiveDate {
        self.bottom
    }

    /// Reference day the window is bounded by
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn current_month(&self) -> NaiveDate {
        start_of_month(self.today)
    }

    fn month_of(&self, which: CalendarId) -> NaiveDate {
        match which {
            CalendarId::Top => self.top,
            CalendarId::Bottom => self.bottom,
        }
    }

    /// Both invariants hold
    pub fn is_consistent(&self) -> bool {
        self.bottom == add_months(self.top, 1) && self.bottom <= self.current_month()
    }

    /// Anchor `which` at `month` and derive the other side
    ///
    /// Returns false and leaves the window untouched when the neighbouring
    /// month does not exist.
    fn anchor(&mut self, which: CalendarId, month: NaiveDate) -> bool {
        let month = start_of_month(month);
        let (top, bottom) = match which {
            CalendarId::Top => (Some(month), checked_add_months(month, 1)),
            CalendarId::Bottom => (checked_add_months(month, -1), Some(month)),
        };
        let (Some(top), Some(bottom)) = (top, bottom) else {
            trace!("no month next to {}, window kept", month);
            return false;
        };
        self.top = top;
        self.bottom = bottom;
        debug_assert!(self.is_consistent(), "calendar window left inconsistent: {:?}", self);
        true
    }

    /// Previous month on top, current month on the bottom
    pub fn open_fresh(&mut self) {
        let current = self.current_month();
        self.anchor(CalendarId::Bottom, current);
    }

    /// Put `date`'s month on top, clamping so the bottom is not in the future
    pub fn position_at_start(&mut self, date: NaiveDate) {
        let top = start_of_month(date);
        if add_months(top, 1) > self.current_month() {
            self.open_fresh();
        } else {
            self.anchor(CalendarId::Top, top);
        }
    }

    /// Put `date`'s month on the bottom; future dates count as today
    pub fn position_at_end(&mut self, date: NaiveDate) {
        let bottom = start_of_month(clamp_to_today(date, self.today));
        self.anchor(CalendarId::Bottom, bottom);
    }

    /// Re-anchor around whichever endpoint is focused
    ///
    /// A focused endpoint in the current month gives the fresh window. A
    /// complete range whose endpoints are at most one month apart shows the
    /// start month on top, which always keeps two distinct months visible.
    /// Otherwise the focused endpoint decides. Nothing happens when the
    /// focused endpoint is unset.
    pub fn recenter_for_active_field(&mut self, field: ActiveField, draft: &DateRange) {
        let focused = match field {
            ActiveField::Start => draft.start(),
            ActiveField::End => draft.end(),
        };
        let Some(focused) = focused else {
            return;
        };

        if is_same_month(focused, self.today) {
            self.open_fresh();
            return;
        }

        if let Some((start, end)) = draft.bounds() {
            let end = clamp_to_today(end, self.today);
            if month_ordinal(end) - month_ordinal(start) <= 1 {
                self.position_at_start(start);
                return;
            }
        }

        match field {
            ActiveField::Start => self.position_at_start(focused),
            ActiveField::End => self.position_at_end(focused),
        }
    }

    /// Whether [`CalendarWindow::next_month`] would move
    ///
    /// Both calendars shift together, so the limit is the same for either.
    pub fn can_go_next(&self) -> bool {
        add_months(self.bottom, 1) <= self.current_month()
    }

    /// Shift both months one back
    pub fn prev_month(&mut self, which: CalendarId) {
        match checked_add_months(self.month_of(which), -1) {
            Some(shifted) => {
                self.anchor(which, shifted);
            }
            None => trace!("prev month rejected: {} is the earliest month", self.top),
        }
    }

    /// Shift both months one forward, unless the bottom would pass this month
    pub fn next_month(&mut self, which: CalendarId) {
        if !self.can_go_next() {
            trace!("next month rejected: bottom already at {}", self.bottom);
            return;
        }
        if let Some(shifted) = checked_add_months(self.month_of(which), 1) {
            self.anchor(which, shifted);
        }
    }

    /// Whether `(year, month)` is off limits for `which`
    ///
    /// The top calendar sits one month behind the bottom, so its limit is
    /// one month earlier.
    pub fn is_future_month(&self, which: CalendarId, month: u32, year: i32) -> bool {
        let Some(candidate) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return true;
        };
        let limit = match which {
            CalendarId::Top => add_months(self.current_month(), -1),
            CalendarId::Bottom => self.current_month(),
        };
        candidate > limit
    }

    /// Set the month (1-12) of one calendar, keeping its year
    ///
    /// Returns false and leaves the window untouched if the result would
    /// reach past the current month.
    pub fn set_month(&mut self, which: CalendarId, month: u32) -> bool {
        let year = self.month_of(which).year();
        self.set_year_month(which, year, month)
    }

    /// Set the year of one calendar, keeping its month
    pub fn set_year(&mut self, which: CalendarId, year: i32) -> bool {
        let month = self.month_of(which).month();
        self.set_year_month(which, year, month)
    }

    fn set_year_month(&mut self, which: CalendarId, year: i32, month: u32) -> bool {
        if self.is_future_month(which, month, year) {
            trace!("rejected {:?} calendar move to {}-{:02}", which, year, month);
            return false;
        }
        match NaiveDate::from_ymd_opt(year, month, 1) {
            Some(candidate) => self.anchor(which, candidate),
            None => false,
        }
    }

    /// Whether choosing `year` in `which`'s year selector would be rejected
    pub fn is_year_option_disabled(&self, which: CalendarId, year: i32) -> bool {
        self.is_future_month(which, self.month_of(which).month(), year)
    }

    /// Years offered by `which`'s year selector, capped at this year
    pub fn year_options(&self, which: CalendarId) -> Vec<i32> {
        let today_year = self.today.year();
        year_options(self.month_of(which).year(), YEAR_RADIUS)
            .into_iter()
            .filter(|y| *y <= today_year)
            .collect()
    }

    /// Day grid for one calendar
    pub fn grid(&self, which: CalendarId) -> MonthGrid {
        month_grid(self.month_of(which))
    }

    /// Header label for one calendar
    pub fn label(&self, which: CalendarId) -> String {
        month_label(self.month_of(which))
    }
}

/// Earliest end year a year page may scroll back to
pub const MIN_PAGE_END_YEAR: i32 = 1911;

/// Years shown per page
pub const YEARS_PER_PAGE: i32 = 12;

/// A 12-year page of a year picker, identified by its last year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearPage {
    end: i32,
    today_year: i32,
}

impl YearPage {
    /// The page to open for a selected year
    ///
    /// Years among the newest twelve open the newest page; older years open
    /// the page that ends at them.
    pub fn for_selected(selected: i32, today_year: i32) -> Self {
        let newest_start = today_year - (YEARS_PER_PAGE - 1);
        let end = if selected >= newest_start {
            today_year
        } else {
            selected.min(today_year)
        };
        Self { end, today_year }
    }

    /// Last year on the page
    pub fn end_year(&self) -> i32 {
        self.end
    }

    /// The twelve years on the page, oldest first
    pub fn years(&self) -> Vec<i32> {
        (self.end - (YEARS_PER_PAGE - 1)..=self.end).collect()
    }

    /// Scroll by whole pages; positive moves toward today
    pub fn scroll(&mut self, pages: i32) {
        let next = self.end + pages * YEARS_PER_PAGE;
        self.end = next.min(self.today_year).max(MIN_PAGE_END_YEAR);
    }
}
