//! Date Range Picker Library
//!
//! A headless date-range picker: the selection state machine behind a
//! two-calendar range widget, without any rendering. This library provides:
//! - Preset ranges (today, last 7/30/90 days, this year, last year)
//! - An editing session with the elastic day-pick rule
//! - A two-month calendar window that never shows the future
//! - Apply-time validation with a configurable range cap
//! - TOML configuration with environment overrides
//!
//! # Example
//!
//! ```no_run
//! use date_range_picker::config::PickerConfig;
//! use date_range_picker::picker::{DateRange, RangePicker};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let mut picker = RangePicker::with_today(PickerConfig::default(), DateRange::empty(), today);
//!
//! picker.open_for_edit();
//! picker.pick_day(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//! picker.pick_day(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap());
//! assert!(picker.apply());
//!
//! for value in picker.drain_changes() {
//!     println!("onChange: {}", value);
//! }
//! ```

pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod picker;
pub mod presets;

// Re-export commonly used items
pub use error::{Error, Result};
