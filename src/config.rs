//! Picker configuration
//!
//! Loaded from `date-range-picker.toml` (or any TOML file), with a few
//! environment overrides layered on top. Every field has a default, so an
//! empty file is a valid configuration.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::presets::PresetKey;

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "date-range-picker.toml";

/// Default template for the range-too-large message
pub const DEFAULT_MAX_RANGE_TEMPLATE: &str =
    "Please select a date range that does not exceed {limit} {unit}.";

/// What a premium trigger press opens first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    /// Preset menu; presets there apply immediately
    MenuFirst,
    /// Calendar panel with an in-panel preset list
    PanelFirst,
}

/// What "Clear" does to the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearPolicy {
    /// Revert to the applied value and keep editing
    DiscardToApplied,
    /// Empty the draft and raise validation
    HardClear,
}

/// How a click outside the current bounds is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditRule {
    /// Restart the range at the clicked day, end on the following day
    Restart,
    /// Move the nearer endpoint out to the clicked day
    Extend,
}

/// Configuration for one picker instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Enables presets and the preset/custom display distinction
    pub is_premium: bool,
    /// Applied once at startup when premium and the incoming value is empty
    pub initial_preset: Option<PresetKey>,
    /// Day cap; takes priority over `max_range_years` when set
    pub max_range_days: Option<u32>,
    /// Calendar-year cap used when no day cap is set
    pub max_range_years: u32,
    /// Message with `{limit}` and `{unit}` placeholders
    pub max_range_message_template: String,
    pub entry: EntryMode,
    /// Menu-first only: open the panel directly when the applied value is custom
    pub open_custom_directly: bool,
    pub clear_policy: ClearPolicy,
    /// Hard-clear only: close the panel after clearing
    pub close_on_hard_clear: bool,
    pub edit_rule: EditRule,
    /// When false, the applied label follows pure preset detection
    pub track_provenance: bool,
    /// Presets shown in lists; detection always uses every preset
    pub visible_presets: Vec<PresetKey>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            is_premium: true,
            initial_preset: Some(PresetKey::Last90),
            max_range_days: None,
            max_range_years: 2,
            max_range_message_template: DEFAULT_MAX_RANGE_TEMPLATE.to_string(),
            entry: EntryMode::PanelFirst,
            open_custom_directly: true,
            clear_policy: ClearPolicy::DiscardToApplied,
            close_on_hard_clear: false,
            edit_rule: EditRule::Restart,
            track_provenance: true,
            visible_presets: PresetKey::ALL.to_vec(),
        }
    }
}

impl PickerConfig {
    /// Settings for a standard (non-premium) user: no presets, hard clear that closes
    pub fn standard() -> Self {
        Self {
            is_premium: false,
            initial_preset: None,
            clear_policy: ClearPolicy::HardClear,
            close_on_hard_clear: true,
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `date-range-picker.toml` from the working directory, or defaults
    ///
    /// Only a missing file falls back to defaults; a file that fails to
    /// parse or validate is an error.
    pub fn load_or_default() -> Result<Self> {
        Self::load_or_default_from(DEFAULT_CONFIG_FILE)
    }

    /// Load `path`, or defaults when it does not exist
    pub fn load_or_default_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load_from_file(path.as_ref()) {
            Err(Error::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.as_ref().display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment overrides
    ///
    /// Recognized: `DRP_PREMIUM`, `DRP_INITIAL_PRESET` (`none` clears it),
    /// `DRP_MAX_RANGE_DAYS`, `DRP_MAX_RANGE_YEARS`. Unparseable values are
    /// ignored.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("DRP_PREMIUM") {
            self.is_premium = val == "1" || val.eq_ignore_ascii_case("true");
        }
        if let Ok(val) = std::env::var("DRP_INITIAL_PRESET") {
            if val.eq_ignore_ascii_case("none") {
                self.initial_preset = None;
            } else if let Ok(key) = val.parse::<PresetKey>() {
                self.initial_preset = Some(key);
            }
        }
        if let Ok(val) = std::env::var("DRP_MAX_RANGE_DAYS") {
            if let Ok(days) = val.parse::<u32>() {
                self.max_range_days = Some(days);
            }
        }
        if let Ok(val) = std::env::var("DRP_MAX_RANGE_YEARS") {
            if let Ok(years) = val.parse::<u32>() {
                self.max_range_years = years;
            }
        }
    }

    /// Reject values no picker can work with
    pub fn validate(&self) -> Result<()> {
        if self.max_range_days == Some(0) {
            return Err(Error::Config("max_range_days must be at least 1".to_string()));
        }
        if self.max_range_days.is_none() && self.max_range_years == 0 {
            return Err(Error::Config("max_range_years must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert!(config.is_premium);
        assert_eq!(config.initial_preset, Some(PresetKey::Last90));
        assert_eq!(config.max_range_years, 2);
        assert_eq!(config.clear_policy, ClearPolicy::DiscardToApplied);
        assert_eq!(config.edit_rule, EditRule::Restart);
        assert_eq!(config.visible_presets.len(), 6);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PickerConfig::from_toml("").unwrap(), PickerConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = PickerConfig::from_toml(
            r#"
            is_premium = true
            initial_preset = "thisYear"
            max_range_days = 30
            entry = "menu_first"
            clear_policy = "hard_clear"
            edit_rule = "extend"
            visible_presets = ["last7", "last30"]
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_preset, Some(PresetKey::ThisYear));
        assert_eq!(config.max_range_days, Some(30));
        assert_eq!(config.entry, EntryMode::MenuFirst);
        assert_eq!(config.clear_policy, ClearPolicy::HardClear);
        assert_eq!(config.edit_rule, EditRule::Extend);
        assert_eq!(config.visible_presets, vec![PresetKey::Last7, PresetKey::Last30]);
        // Untouched fields keep defaults
        assert!(config.track_provenance);
    }

    #[test]
    fn test_parse_rejects_unknown_preset() {
        assert!(PickerConfig::from_toml("initial_preset = \"last14\"").is_err());
    }

    #[test]
    fn test_validate_zero_caps() {
        assert!(PickerConfig::from_toml("max_range_days = 0").is_err());
        assert!(PickerConfig::from_toml("max_range_years = 0").is_err());
        assert!(PickerConfig::from_toml("max_range_years = 0\nmax_range_days = 5").is_ok());
    }

    #[test]
    fn test_standard_preset() {
        let config = PickerConfig::standard();
        assert!(!config.is_premium);
        assert_eq!(config.initial_preset, None);
        assert!(config.close_on_hard_clear);
    }
}
