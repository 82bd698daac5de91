//! Host events and their text form
//!
//! One event per line, e.g. `pick 2024-06-01`, `preset last7`,
//! `month top 3`, `value today-6 today`. Day arguments accept anything
//! [`parse_day`] does.

use chrono::NaiveDate;

use crate::calendar::CalendarId;
use crate::date::parse_day;
use crate::error::{Error, Result};
use crate::picker::{ActiveField, DateRange, RangePicker};
use crate::presets::PresetKey;

/// Something the host tells the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    Trigger,
    Open,
    OpenCustomFromMenu,
    ApplyPresetFromMenu(PresetKey),
    SelectPreset(PresetKey),
    SelectCustom,
    Pick(NaiveDate),
    Focus(ActiveField),
    Clear,
    Apply,
    Cancel,
    Dismiss,
    PrevMonth(CalendarId),
    NextMonth(CalendarId),
    SetMonth(CalendarId, u32),
    SetYear(CalendarId, i32),
    SetValue(DateRange),
}

fn invalid(line: &str, reason: &str) -> Error {
    Error::InvalidEvent(format!("'{}': {}", line, reason))
}

fn calendar_id(word: Option<&str>, line: &str) -> Result<CalendarId> {
    match word {
        Some("top") => Ok(CalendarId::Top),
        Some("bottom") => Ok(CalendarId::Bottom),
        _ => Err(invalid(line, "expected 'top' or 'bottom'")),
    }
}

fn preset_key(word: Option<&str>, line: &str) -> Result<PresetKey> {
    word.ok_or_else(|| invalid(line, "missing preset key"))?.parse()
}

fn day(word: Option<&str>, line: &str, today: NaiveDate) -> Result<NaiveDate> {
    parse_day(word.ok_or_else(|| invalid(line, "missing day"))?, today)
}

impl PickerEvent {
    /// Parse one line, resolving relative days against `today`
    pub fn parse(line: &str, today: NaiveDate) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words
            .next()
            .ok_or_else(|| Error::InvalidEvent("empty event".to_string()))?
            .to_lowercase();

        let event = match command.as_str() {
            "trigger" => PickerEvent::Trigger,
            "open" => PickerEvent::Open,
            "custom-from-menu" => PickerEvent::OpenCustomFromMenu,
            "menu-preset" => PickerEvent::ApplyPresetFromMenu(preset_key(words.next(), line)?),
            "preset" => PickerEvent::SelectPreset(preset_key(words.next(), line)?),
            "custom" => PickerEvent::SelectCustom,
            "pick" => PickerEvent::Pick(day(words.next(), line, today)?),
            "focus" => match words.next() {
                Some("start") => PickerEvent::Focus(ActiveField::Start),
                Some("end") => PickerEvent::Focus(ActiveField::End),
                _ => return Err(invalid(line, "expected 'start' or 'end'")),
            },
            "clear" => PickerEvent::Clear,
            "apply" => PickerEvent::Apply,
            "cancel" => PickerEvent::Cancel,
            "dismiss" => PickerEvent::Dismiss,
            "prev" => PickerEvent::PrevMonth(calendar_id(words.next(), line)?),
            "next" => PickerEvent::NextMonth(calendar_id(words.next(), line)?),
            "month" => {
                let which = calendar_id(words.next(), line)?;
                let month = words
                    .next()
                    .and_then(|w| w.parse::<u32>().ok())
                    .ok_or_else(|| invalid(line, "expected a month number"))?;
                PickerEvent::SetMonth(which, month)
            }
            "year" => {
                let which = calendar_id(words.next(), line)?;
                let year = words
                    .next()
                    .and_then(|w| w.parse::<i32>().ok())
                    .ok_or_else(|| invalid(line, "expected a year"))?;
                PickerEvent::SetYear(which, year)
            }
            "value" => match words.next() {
                Some("none") => PickerEvent::SetValue(DateRange::empty()),
                first => {
                    let start = day(first, line, today)?;
                    let end = day(words.next(), line, today)?;
                    PickerEvent::SetValue(DateRange::complete(start, end))
                }
            },
            other => return Err(invalid(line, &format!("unknown event '{}'", other))),
        };

        if words.next().is_some() {
            return Err(invalid(line, "unexpected trailing input"));
        }
        Ok(event)
    }
}

impl RangePicker {
    /// Route an event to its operation
    pub fn dispatch(&mut self, event: PickerEvent) {
        match event {
            PickerEvent::Trigger => self.trigger(),
            PickerEvent::Open => self.open_for_edit(),
            PickerEvent::OpenCustomFromMenu => self.open_custom_from_menu(),
            PickerEvent::ApplyPresetFromMenu(key) => self.apply_preset_from_menu(key),
            PickerEvent::SelectPreset(key) => self.select_preset(key),
            PickerEvent::SelectCustom => self.select_custom(),
            PickerEvent::Pick(d) => self.pick_day(d),
            PickerEvent::Focus(field) => self.set_active_field(field),
            PickerEvent::Clear => self.clear(),
            PickerEvent::Apply => {
                self.apply();
            }
            PickerEvent::Cancel => self.cancel(),
            PickerEvent::Dismiss => self.dismiss(),
            PickerEvent::PrevMonth(which) => self.prev_month(which),
            PickerEvent::NextMonth(which) => self.next_month(which),
            PickerEvent::SetMonth(which, month) => {
                self.set_month(which, month);
            }
            PickerEvent::SetYear(which, year) => {
                self.set_year(which, year);
            }
            PickerEvent::SetValue(range) => self.set_value(range),
        }
    }
}
