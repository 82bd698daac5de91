//! The range selection state machine
//!
//! [`RangePicker`] owns the applied value, the editing session (while the
//! panel is open) and the calendar window. Every operation runs to
//! completion and leaves draft and window consistent with each other.
//! Operations that would break an invariant are no-ops or raise the
//! validation flag; none of them return errors.

use chrono::NaiveDate;
use log::{debug, trace};

use crate::calendar::{CalendarId, CalendarWindow};
use crate::config::{ClearPolicy, EntryMode, PickerConfig};
use crate::date::{self, days_between_inclusive, start_of_month};
use crate::picker::session::EditingSession;
use crate::picker::validation::{check_complete, check_range, RangeLimit, ValidationError};
use crate::picker::{ActiveField, DateRange, DisplayMode};
use crate::presets::{PresetCatalog, PresetKey, PresetMatch};

/// Placeholder shown on the trigger while nothing is applied
pub const PLACEHOLDER: &str = "Select start and end dates";

/// Trigger label while a menu-first panel is open
pub const CUSTOM_LABEL: &str = "Custom";

/// Which surface is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    /// Preset menu (premium, menu-first)
    MenuOpen,
    /// Calendar panel editing a draft
    PanelOpen,
}

/// Render hints for a single day cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayState {
    pub in_range: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_today: bool,
    pub disabled: bool,
}

/// A date-range picker: applied value, optional draft session, calendar window
#[derive(Debug, Clone)]
pub struct RangePicker {
    config: PickerConfig,
    catalog: PresetCatalog,
    today: NaiveDate,
    state: PickerState,
    applied: DateRange,
    applied_mode: DisplayMode,
    applied_preset: Option<PresetKey>,
    session: Option<EditingSession>,
    window: CalendarWindow,
    changes: Vec<DateRange>,
}

impl RangePicker {
    /// Create a picker for today's date
    pub fn new(config: PickerConfig, value: DateRange) -> Self {
        Self::with_today(config, value, date::today())
    }

    /// Create a picker against a fixed reference day
    ///
    /// When premium with an initial preset and `value` is empty, the preset
    /// is applied (and emitted) right away.
    pub fn with_today(config: PickerConfig, value: DateRange, today: NaiveDate) -> Self {
        let catalog = PresetCatalog::with_visible(&config.visible_presets);
        let mut picker = Self {
            catalog,
            today,
            state: PickerState::Closed,
            applied: value,
            applied_mode: DisplayMode::Custom,
            applied_preset: None,
            session: None,
            window: CalendarWindow::new(today),
            changes: Vec::new(),
            config,
        };

        match picker.config.initial_preset {
            Some(key) if picker.config.is_premium && value.is_empty() => {
                debug!("applying initial preset {}", key);
                let range = picker.catalog.resolve(key, today);
                picker.commit(range, Some(key));
            }
            _ => {
                picker.adopt_host_provenance();
                picker.rest_window();
            }
        }
        picker
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == PickerState::PanelOpen
    }

    pub fn is_menu_open(&self) -> bool {
        self.state == PickerState::MenuOpen
    }

    /// Last committed value
    pub fn applied(&self) -> DateRange {
        self.applied
    }

    /// How the applied value is labelled
    pub fn applied_display_mode(&self) -> DisplayMode {
        self.applied_mode
    }

    /// Preset the applied value was committed from, if shown as one
    pub fn applied_preset(&self) -> Option<PresetKey> {
        self.applied_preset
    }

    /// The open editing session
    pub fn session(&self) -> Option<&EditingSession> {
        self.session.as_ref()
    }

    /// The draft while editing, the applied value otherwise
    pub fn draft(&self) -> DateRange {
        self.session.as_ref().map_or(self.applied, |s| s.draft)
    }

    pub fn active_field(&self) -> ActiveField {
        self.session.as_ref().map_or(ActiveField::Start, |s| s.active_field)
    }

    pub fn show_validation(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.show_validation)
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    /// Presets a host should list
    pub fn visible_presets(&self) -> &[PresetKey] {
        if self.config.is_premium {
            self.catalog.visible()
        } else {
            &[]
        }
    }

    /// Take every value emitted since the last call, oldest first
    pub fn drain_changes(&mut self) -> Vec<DateRange> {
        std::mem::take(&mut self.changes)
    }

    // --- Host value ---

    /// Resynchronize the applied value from the host
    ///
    /// An open draft is left alone. Setting the value already applied is a
    /// no-op, so an echoed emission keeps its provenance.
    pub fn set_value(&mut self, value: DateRange) {
        if value == self.applied {
            return;
        }
        debug!("host value set to [{}]", value);
        self.applied = value;
        self.adopt_host_provenance();
        if self.session.is_none() {
            self.rest_window();
        }
    }

    /// Host values carry no provenance; label them by detection
    fn adopt_host_provenance(&mut self) {
        let detected = self.detect(&self.applied).and_then(|m| m.key());
        match detected {
            Some(key) if self.config.is_premium => {
                self.applied_mode = DisplayMode::Preset;
                self.applied_preset = Some(key);
            }
            _ => {
                self.applied_mode = DisplayMode::Custom;
                self.applied_preset = None;
            }
        }
    }

    // --- Opening and closing ---

    /// The trigger button
    ///
    /// Closes whatever is open (discarding any draft). When closed it opens
    /// the panel, or for premium menu-first pickers the preset menu, unless
    /// the applied value is custom and `open_custom_directly` is set.
    pub fn trigger(&mut self) {
        match self.state {
            PickerState::PanelOpen => self.cancel(),
            PickerState::MenuOpen => self.close_menu(),
            PickerState::Closed => {
                let menu_first =
                    self.config.is_premium && self.config.entry == EntryMode::MenuFirst;
                let applied_custom =
                    self.applied.is_complete() && self.applied_mode == DisplayMode::Custom;
                if menu_first && !(self.config.open_custom_directly && applied_custom) {
                    debug!("preset menu opened");
                    self.state = PickerState::MenuOpen;
                } else {
                    self.open_for_edit();
                }
            }
        }
    }

    /// Open the panel with a fresh session copied from the applied value
    pub fn open_for_edit(&mut self) {
        let session =
            EditingSession::from_applied(self.applied, self.applied_mode, self.applied_preset);
        match session.draft.start() {
            Some(start) => self.window.position_at_start(start),
            None => self.window.open_fresh(),
        }
        self.session = Some(session);
        self.state = PickerState::PanelOpen;
        debug!("panel opened with draft [{}]", self.applied);
    }

    /// "Custom" entry of the preset menu
    pub fn open_custom_from_menu(&mut self) {
        if self.state != PickerState::MenuOpen {
            trace!("custom-from-menu ignored: menu not open");
            return;
        }
        self.open_for_edit();
    }

    fn close_menu(&mut self) {
        if self.state == PickerState::MenuOpen {
            debug!("preset menu closed");
            self.state = PickerState::Closed;
        }
    }

    /// Discard the draft and close; never emits
    pub fn cancel(&mut self) {
        match self.state {
            PickerState::Closed => {}
            PickerState::MenuOpen => self.close_menu(),
            PickerState::PanelOpen => {
                self.session = None;
                self.state = PickerState::Closed;
                self.rest_window();
                debug!("panel cancelled, applied stays [{}]", self.applied);
            }
        }
    }

    /// Pointer activity outside the widget
    pub fn dismiss(&mut self) {
        self.cancel();
    }

    /// Window at the applied start, or fresh when nothing is applied
    fn rest_window(&mut self) {
        match self.applied.start() {
            Some(start) => self.window.position_at_start(start),
            None => self.window.open_fresh(),
        }
    }

    // --- Presets ---

    /// Pick a preset from the menu; commits and emits immediately
    pub fn apply_preset_from_menu(&mut self, key: PresetKey) {
        if !self.config.is_premium {
            trace!("menu preset {} ignored: presets need premium", key);
            return;
        }
        debug!("menu preset {} applied", key);
        let range = self.catalog.resolve(key, self.today);
        self.commit(range, Some(key));
    }

    /// Pick a preset inside the panel; provisional until Apply
    pub fn select_preset(&mut self, key: PresetKey) {
        if !self.config.is_premium {
            trace!("panel preset {} ignored: presets need premium", key);
            return;
        }
        let range = self.catalog.resolve(key, self.today);
        let Some(session) = self.session.as_mut() else {
            trace!("panel preset {} ignored: panel closed", key);
            return;
        };
        session.adopt_preset(key, range);
        if let Some(start) = range.start() {
            self.window.position_at_start(start);
        }
        debug!("draft set to preset {} [{}]", key, range);
    }

    /// The in-panel "Custom" entry: this month up to today
    pub fn select_custom(&mut self) {
        let start = start_of_month(self.today);
        let Some(session) = self.session.as_mut() else {
            trace!("custom entry ignored: panel closed");
            return;
        };
        session.adopt_custom(DateRange::complete(start, self.today));
        self.window.position_at_start(start);
        debug!("draft reset to month-to-date");
    }

    // --- Editing ---

    /// A click on a day cell
    pub fn pick_day(&mut self, day: NaiveDate) {
        let (today, rule) = (self.today, self.config.edit_rule);
        let Some(session) = self.session.as_mut() else {
            trace!("pick {} ignored: panel closed", day);
            return;
        };
        if session.pick_day(day, today, rule) {
            debug!("picked {}, draft [{}], editing {:?}", day, session.draft, session.active_field);
        } else {
            trace!("pick {} ignored: after today", day);
        }
    }

    /// Focus the start or end input directly
    pub fn set_active_field(&mut self, field: ActiveField) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.active_field = field;
        self.window.recenter_for_active_field(field, &session.draft);
    }

    /// "Clear" according to the configured policy
    pub fn clear(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match self.config.clear_policy {
            ClearPolicy::DiscardToApplied => {
                *session = EditingSession::from_applied(
                    self.applied,
                    self.applied_mode,
                    self.applied_preset,
                );
                self.rest_window();
                debug!("draft reverted to applied [{}]", self.applied);
            }
            ClearPolicy::HardClear => {
                session.adopt_custom(DateRange::empty());
                session.show_validation = true;
                self.window.open_fresh();
                debug!("draft cleared");
                if self.config.close_on_hard_clear {
                    self.cancel();
                }
            }
        }
    }

    /// Commit the draft
    ///
    /// Returns false (and raises validation) when the draft is incomplete or
    /// too long. On success the draft is emitted and the panel closes.
    pub fn apply(&mut self) -> bool {
        let limit = self.range_limit();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if let Err(err) = check_range(&session.draft, limit, &self.config.max_range_message_template) {
            trace!("apply rejected: {}", err);
            session.show_validation = true;
            return false;
        }

        let draft = session.draft;
        let preset = match session.draft_mode {
            DisplayMode::Preset => session.draft_preset,
            DisplayMode::Custom => None,
        };
        debug!("applying [{}]", draft);
        self.commit(draft, preset);
        true
    }

    /// Store, emit, label, reposition, close
    fn commit(&mut self, range: DateRange, preset: Option<PresetKey>) {
        self.applied = range;
        self.changes.push(range);

        let key = if self.config.track_provenance {
            preset
        } else {
            self.detect(&range).and_then(|m| m.key())
        };
        match key {
            Some(key) if self.config.is_premium => {
                self.applied_mode = DisplayMode::Preset;
                self.applied_preset = Some(key);
            }
            _ => {
                self.applied_mode = DisplayMode::Custom;
                self.applied_preset = None;
            }
        }

        self.session = None;
        self.state = PickerState::Closed;
        self.rest_window();
    }

    // --- Calendar navigation ---

    pub fn prev_month(&mut self, which: CalendarId) {
        self.window.prev_month(which);
    }

    pub fn next_month(&mut self, which: CalendarId) {
        self.window.next_month(which);
    }

    /// Jump one calendar to a month (1-12); false when rejected
    pub fn set_month(&mut self, which: CalendarId, month: u32) -> bool {
        self.window.set_month(which, month)
    }

    /// Jump one calendar to a year; false when rejected
    pub fn set_year(&mut self, which: CalendarId, year: i32) -> bool {
        self.window.set_year(which, year)
    }

    // --- Derived values ---

    fn detect(&self, range: &DateRange) -> Option<PresetMatch> {
        self.catalog.detect(range, self.today)
    }

    pub fn range_limit(&self) -> RangeLimit {
        RangeLimit::from_config(&self.config)
    }

    /// Text for the trigger button; empty means show [`PLACEHOLDER`]
    pub fn trigger_label(&self) -> String {
        if self.is_open() && self.config.is_premium && self.config.entry == EntryMode::MenuFirst {
            return CUSTOM_LABEL.to_string();
        }
        if !self.applied.is_complete() {
            return String::new();
        }
        match self.applied_preset {
            Some(key) if self.config.is_premium && self.applied_mode == DisplayMode::Preset => {
                key.label().to_string()
            }
            _ => self.applied.to_string(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        if self.applied.is_complete() {
            ""
        } else {
            PLACEHOLDER
        }
    }

    /// "Current selection: ..." under the trigger
    pub fn selection_message(&self) -> String {
        if !self.applied.is_complete() {
            return String::new();
        }
        format!("Current selection: {}", self.applied)
    }

    /// Which endpoints the applied value is missing, empty when complete
    pub fn date_range_message(&self) -> String {
        match check_complete(&self.applied) {
            Ok(_) => String::new(),
            Err(err) => err.to_string(),
        }
    }

    /// The open draft is complete and within the cap
    pub fn can_apply(&self) -> bool {
        self.session.as_ref().is_some_and(|s| {
            check_range(&s.draft, self.range_limit(), &self.config.max_range_message_template)
                .is_ok()
        })
    }

    pub fn range_too_large(&self) -> bool {
        self.range_too_large_message().is_some()
    }

    /// Filled-in template when the draft exceeds the cap
    pub fn range_too_large_message(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let (start, end) = session.draft.bounds()?;
        let limit = self.range_limit();
        limit
            .is_exceeded(start, end)
            .then(|| limit.render(&self.config.max_range_message_template))
    }

    /// Messages to show now
    ///
    /// Missing endpoints only appear once validation is raised; an
    /// oversized range always does.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let mut errors = Vec::new();
        if session.show_validation {
            if let Err(err) = check_complete(&session.draft) {
                errors.push(err);
            }
        }
        if let Some(message) = self.range_too_large_message() {
            errors.push(ValidationError::RangeTooLarge { limit: self.range_limit(), message });
        }
        errors
    }

    /// Tooltip for a disabled Apply; standard users only
    pub fn apply_hint(&self) -> Option<&'static str> {
        if self.config.is_premium {
            return None;
        }
        let session = self.session.as_ref()?;
        match check_complete(&session.draft) {
            Ok(_) => None,
            Err(ValidationError::MissingBoth) => Some("Select a start and end date to apply"),
            Err(ValidationError::MissingEnd) => Some("Select an end date to apply"),
            Err(_) => Some("Select a start date to apply"),
        }
    }

    /// Preset list entry to highlight
    ///
    /// Follows the draft while editing and the applied value otherwise.
    pub fn highlighted_preset(&self) -> Option<PresetMatch> {
        if !self.config.is_premium {
            return None;
        }
        let (range, mode, key) = match self.session.as_ref() {
            Some(s) => (s.draft, s.draft_mode, s.draft_preset),
            None => (self.applied, self.applied_mode, self.applied_preset),
        };
        match (mode, key) {
            (DisplayMode::Preset, Some(key)) => Some(PresetMatch::Preset(key)),
            _ if range.is_complete() => Some(PresetMatch::Custom),
            _ => None,
        }
    }

    /// Render hints for a day against the current draft
    pub fn day_state(&self, day: NaiveDate) -> DayState {
        let draft = self.draft();
        DayState {
            in_range: draft.contains(day),
            is_start: draft.start() == Some(day),
            is_end: draft.end() == Some(day),
            is_today: day == self.today,
            disabled: day > self.today,
        }
    }

    /// Days in the draft, inclusive
    pub fn draft_length(&self) -> Option<i64> {
        let (start, end) = self.draft().bounds()?;
        Some(days_between_inclusive(start, end))
    }
}
