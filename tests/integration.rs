//! Integration tests for the date range picker library

use chrono::NaiveDate;
use date_range_picker::calendar::CalendarId;
use date_range_picker::config::{ClearPolicy, EntryMode, PickerConfig};
use date_range_picker::picker::{
    ActiveField, DateRange, DisplayMode, PickerEvent, PickerState, RangePicker, ValidationError,
};
use date_range_picker::presets::PresetKey;
use std::fs;
use tempfile::TempDir;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn today() -> NaiveDate {
    ymd(2024, 6, 15)
}

fn premium() -> PickerConfig {
    PickerConfig { initial_preset: None, ..PickerConfig::default() }
}

/// Run a script of text events against a picker
fn run(picker: &mut RangePicker, script: &[&str]) {
    for line in script {
        let event = PickerEvent::parse(line, today())
            .unwrap_or_else(|e| panic!("bad event {:?}: {}", line, e));
        picker.dispatch(event);
        assert!(picker.window().is_consistent(), "window broken after {:?}", line);
        if let Some((start, end)) = picker.draft().bounds() {
            assert!(start <= end, "draft inverted after {:?}", line);
        }
    }
}

#[test]
fn test_day_cap_rejects_long_range() {
    let config = PickerConfig { max_range_days: Some(30), ..premium() };
    let mut picker = RangePicker::with_today(config, DateRange::empty(), today());

    run(&mut picker, &["open", "pick 2024-01-01", "pick 2024-02-15", "apply"]);

    assert!(picker.is_open());
    assert!(picker.drain_changes().is_empty());
    let errors = picker.validation_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "Please select a date range that does not exceed 30 days."
    );

    // Shrinking the range makes it applicable
    run(&mut picker, &["focus end", "pick 2024-01-30", "apply"]);
    assert!(!picker.is_open());
    assert_eq!(
        picker.drain_changes(),
        vec![DateRange::complete(ymd(2024, 1, 1), ymd(2024, 1, 30))]
    );
}

#[test]
fn test_cancel_restores_applied_value() {
    let applied = DateRange::complete(ymd(2024, 3, 4), ymd(2024, 3, 20));
    let mut picker = RangePicker::with_today(premium(), applied, today());

    run(
        &mut picker,
        &["open", "pick 2024-05-01", "next top", "focus end", "preset last7", "cancel"],
    );

    assert_eq!(picker.state(), PickerState::Closed);
    assert_eq!(picker.applied(), applied);
    assert_eq!(picker.draft(), applied);
    assert!(picker.drain_changes().is_empty());
    assert_eq!(picker.window().top_month(), ymd(2024, 3, 1));

    run(&mut picker, &["open"]);
    assert_eq!(picker.draft(), applied);
    assert_eq!(picker.active_field(), ActiveField::Start);
    assert!(!picker.show_validation());
}

#[test]
fn test_apply_is_idempotent() {
    let mut picker = RangePicker::with_today(premium(), DateRange::empty(), today());

    run(&mut picker, &["open", "pick 2024-02-10", "pick 2024-04-02", "apply"]);
    let first = picker.drain_changes();
    assert_eq!(first, vec![DateRange::complete(ymd(2024, 2, 10), ymd(2024, 4, 2))]);
    assert_eq!(picker.window().top_month(), ymd(2024, 2, 1));

    run(&mut picker, &["open", "apply"]);
    assert_eq!(picker.drain_changes(), first);
    assert_eq!(picker.applied(), first[0]);
    assert_eq!(picker.window().top_month(), ymd(2024, 2, 1));
}

#[test]
fn test_preset_provenance_survives_round_trip() {
    let mut picker = RangePicker::with_today(premium(), DateRange::empty(), today());

    run(&mut picker, &["open", "preset last30", "apply"]);
    assert_eq!(picker.applied_display_mode(), DisplayMode::Preset);
    assert_eq!(picker.trigger_label(), "Last 30 days");

    // Hand-picking the same dates is still custom
    run(&mut picker, &["open", "pick 2024-05-17", "pick today", "apply"]);
    assert_eq!(picker.applied(), DateRange::complete(ymd(2024, 5, 17), today()));
    assert_eq!(picker.applied_display_mode(), DisplayMode::Custom);
    assert_eq!(picker.trigger_label(), "05/17/2024 - 06/15/2024");
}

#[test]
fn test_menu_first_session() {
    let config = PickerConfig {
        entry: EntryMode::MenuFirst,
        initial_preset: Some(PresetKey::Last7),
        ..PickerConfig::default()
    };
    let mut picker = RangePicker::with_today(config, DateRange::empty(), today());
    assert_eq!(picker.drain_changes().len(), 1);
    assert_eq!(picker.trigger_label(), "Last 7 days");

    run(&mut picker, &["trigger"]);
    assert_eq!(picker.state(), PickerState::MenuOpen);
    run(&mut picker, &["menu-preset lastYear"]);
    assert_eq!(picker.state(), PickerState::Closed);
    assert_eq!(
        picker.drain_changes(),
        vec![DateRange::complete(ymd(2023, 1, 1), ymd(2023, 12, 31))]
    );
    assert_eq!(picker.window().top_month(), ymd(2023, 1, 1));

    run(&mut picker, &["trigger", "dismiss"]);
    assert_eq!(picker.state(), PickerState::Closed);
}

#[test]
fn test_future_is_never_reachable() {
    let mut picker = RangePicker::with_today(premium(), DateRange::empty(), today());

    run(
        &mut picker,
        &[
            "open",
            "next bottom",
            "next top",
            "month top 6",
            "month bottom 7",
            "year bottom 2025",
            "pick 2024-06-16",
        ],
    );

    assert_eq!(picker.window().top_month(), ymd(2024, 5, 1));
    assert_eq!(picker.window().bottom_month(), ymd(2024, 6, 1));
    assert!(picker.draft().is_empty());
    assert!(picker.day_state(ymd(2024, 6, 16)).disabled);
}

#[test]
fn test_navigation_keeps_window_adjacent() {
    let mut picker = RangePicker::with_today(premium(), DateRange::empty(), today());

    run(&mut picker, &["open", "prev top", "prev bottom", "year top 2020", "month bottom 2"]);

    let window = picker.window();
    assert!(window.is_consistent());
    assert_eq!(window.bottom_month(), ymd(2020, 2, 1));
    assert_eq!(window.top_month(), ymd(2020, 1, 1));
    assert_eq!(window.label(CalendarId::Top), "January 2020");
}

#[test]
fn test_hard_clear_policy() {
    let config = PickerConfig { clear_policy: ClearPolicy::HardClear, ..premium() };
    let applied = DateRange::complete(ymd(2024, 4, 1), ymd(2024, 4, 30));
    let mut picker = RangePicker::with_today(config, applied, today());

    run(&mut picker, &["open", "clear", "apply"]);
    assert!(picker.is_open());
    assert_eq!(picker.validation_errors(), vec![ValidationError::MissingBoth]);
    assert_eq!(picker.applied(), applied);

    run(&mut picker, &["pick 2024-06-01", "pick 2024-06-02", "apply"]);
    assert_eq!(picker.applied(), DateRange::complete(ymd(2024, 6, 1), ymd(2024, 6, 2)));
}

#[test]
fn test_host_value_sync() {
    let mut picker = RangePicker::with_today(premium(), DateRange::empty(), today());

    run(&mut picker, &["value 2024-06-09 today"]);
    assert_eq!(picker.trigger_label(), "Last 7 days");
    assert_eq!(picker.selection_message(), "Current selection: 06/09/2024 - 06/15/2024");

    run(&mut picker, &["value none"]);
    assert!(picker.applied().is_empty());
    assert_eq!(picker.trigger_label(), "");
    assert!(picker.drain_changes().is_empty());
}

#[test]
fn test_config_file_drives_session() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("date-range-picker.toml");
    fs::write(
        &path,
        r#"
is_premium = true
initial_preset = "today"
max_range_days = 14
visible_presets = ["today", "last7"]
"#,
    )
    .expect("Failed to write config");

    let config = PickerConfig::load_from_file(&path).expect("Failed to load config");
    let mut picker = RangePicker::with_today(config, DateRange::empty(), today());

    assert_eq!(picker.visible_presets(), &[PresetKey::Today, PresetKey::Last7]);
    assert_eq!(picker.drain_changes(), vec![DateRange::complete(today(), today())]);

    run(&mut picker, &["open", "preset last7", "apply"]);
    assert!(!picker.is_open());

    run(&mut picker, &["open", "pick 2024-05-01", "focus end", "pick 2024-05-31", "apply"]);
    assert!(picker.is_open());
    assert!(picker.range_too_large());
}

#[test]
fn test_config_file_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let missing = temp_dir.path().join("missing.toml");
    assert!(PickerConfig::load_from_file(&missing).is_err());

    let bad = temp_dir.path().join("bad.toml");
    fs::write(&bad, "max_range_days = \"lots\"").expect("Failed to write config");
    assert!(PickerConfig::load_from_file(&bad).is_err());

    // Only a missing file falls back to defaults
    let config = PickerConfig::load_or_default_from(&missing).expect("Missing file is not an error");
    assert_eq!(config, PickerConfig::default());
    assert!(PickerConfig::load_or_default_from(&bad).is_err());

    let zero = temp_dir.path().join("zero.toml");
    fs::write(&zero, "max_range_days = 0").expect("Failed to write config");
    assert!(PickerConfig::load_or_default_from(&zero).is_err());
}
