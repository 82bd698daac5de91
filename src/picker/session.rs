//! Per-open editing state and the elastic day-pick rule

use chrono::NaiveDate;

use crate::config::EditRule;
use crate::date::add_days;
use crate::picker::{ActiveField, DateRange, DisplayMode};
use crate::presets::PresetKey;

/// Draft state for one open panel
///
/// Created on open, dropped on apply or cancel. Never shared between
/// panels. The calendar window is not part of the session; it lives on
/// [`RangePicker`](crate::picker::RangePicker), which re-seeds it on every open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingSession {
    pub(crate) draft: DateRange,
    pub(crate) active_field: ActiveField,
    pub(crate) show_validation: bool,
    pub(crate) draft_mode: DisplayMode,
    pub(crate) draft_preset: Option<PresetKey>,
}

impl EditingSession {
    /// Start editing from an applied value and its provenance
    pub fn from_applied(applied: DateRange, mode: DisplayMode, preset: Option<PresetKey>) -> Self {
        let (draft_mode, draft_preset) = match (mode, preset) {
            (DisplayMode::Preset, Some(key)) => (DisplayMode::Preset, Some(key)),
            _ => (DisplayMode::Custom, None),
        };
        Self {
            draft: applied,
            active_field: ActiveField::Start,
            show_validation: false,
            draft_mode,
            draft_preset,
        }
    }

    pub fn draft(&self) -> &DateRange {
        &self.draft
    }

    pub fn active_field(&self) -> ActiveField {
        self.active_field
    }

    pub fn show_validation(&self) -> bool {
        self.show_validation
    }

    pub fn draft_mode(&self) -> DisplayMode {
        self.draft_mode
    }

    pub fn draft_preset(&self) -> Option<PresetKey> {
        self.draft_preset
    }

    /// Replace the draft with a preset's range
    pub(crate) fn adopt_preset(&mut self, key: PresetKey, range: DateRange) {
        self.draft = range;
        self.draft_mode = DisplayMode::Preset;
        self.draft_preset = Some(key);
        self.active_field = ActiveField::Start;
        self.show_validation = false;
    }

    /// Replace the draft with a hand-picked range
    pub(crate) fn adopt_custom(&mut self, range: DateRange) {
        self.draft = range;
        self.disown_preset();
        self.active_field = ActiveField::Start;
        self.show_validation = false;
    }

    fn disown_preset(&mut self) {
        self.draft_mode = DisplayMode::Custom;
        self.draft_preset = None;
    }

    /// Apply one day click to the draft
    ///
    /// Days after `today` are ignored and return false. Any accepted click
    /// drops preset provenance.
    pub fn pick_day(&mut self, day: NaiveDate, today: NaiveDate, rule: EditRule) -> bool {
        if day > today {
            return false;
        }
        self.disown_preset();

        match rule {
            EditRule::Restart => self.pick_restarting(day, today),
            EditRule::Extend => self.pick_extending(day),
        }

        if self.show_validation {
            self.show_validation = !self.draft.is_complete();
        }
        true
    }

    /// Start a fresh range at `day` with the end on the next day, capped at today
    fn restart_at(&mut self, day: NaiveDate, today: NaiveDate) {
        let end = add_days(day, 1).min(today);
        self.draft = DateRange::complete(day, end);
        self.active_field = ActiveField::End;
    }

    fn pick_restarting(&mut self, day: NaiveDate, today: NaiveDate) {
        let (start, end) = match (self.draft.start(), self.draft.end()) {
            (Some(start), end) => (start, end),
            (None, _) => {
                self.draft = DateRange::started(day);
                self.active_field = ActiveField::End;
                return;
            }
        };

        let Some(end) = end else {
            if day >= start {
                self.draft = DateRange::complete(start, day);
                self.active_field = ActiveField::Start;
            } else {
                self.restart_at(day, today);
            }
            return;
        };

        match self.active_field {
            ActiveField::Start if day > end => self.restart_at(day, today),
            ActiveField::Start => {
                self.draft = DateRange::complete(day, end);
                self.active_field = ActiveField::End;
            }
            ActiveField::End if day >= start => {
                self.draft = DateRange::complete(start, day);
                self.active_field = ActiveField::Start;
            }
            ActiveField::End => self.restart_at(day, today),
        }
    }

    fn pick_extending(&mut self, day: NaiveDate) {
        let Some(start) = self.draft.start() else {
            self.draft = DateRange::started(day);
            self.active_field = ActiveField::End;
            return;
        };

        let Some(end) = self.draft.end() else {
            // DateRange::complete orders the endpoints
            self.draft = DateRange::complete(start, day);
            return;
        };

        match self.active_field {
            ActiveField::Start if day > end => {
                self.draft = DateRange::complete(start, day);
                self.active_field = ActiveField::End;
            }
            ActiveField::Start => self.draft = DateRange::complete(day, end),
            ActiveField::End if day < start => {
                self.draft = DateRange::complete(day, end);
                self.active_field = ActiveField::Start;
            }
            ActiveField::End => self.draft = DateRange::complete(start, day),
        }
    }
}
