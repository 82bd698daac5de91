//! Named quick ranges relative to a reference day

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::add_days;
use crate::error::Error;
use crate::picker::DateRange;

/// Preset identifiers, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetKey {
    Today,
    Last7,
    Last30,
    Last90,
    ThisYear,
    LastYear,
}

impl PresetKey {
    /// Every preset, in catalog order
    pub const ALL: [PresetKey; 6] = [
        PresetKey::Today,
        PresetKey::Last7,
        PresetKey::Last30,
        PresetKey::Last90,
        PresetKey::ThisYear,
        PresetKey::LastYear,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            PresetKey::Today => "Today",
            PresetKey::Last7 => "Last 7 days",
            PresetKey::Last30 => "Last 30 days",
            PresetKey::Last90 => "Last 90 days",
            PresetKey::ThisYear => "This year",
            PresetKey::LastYear => "Last year",
        }
    }

    /// Identifier used in config files and scripts
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKey::Today => "today",
            PresetKey::Last7 => "last7",
            PresetKey::Last30 => "last30",
            PresetKey::Last90 => "last90",
            PresetKey::ThisYear => "thisYear",
            PresetKey::LastYear => "lastYear",
        }
    }
}

impl fmt::Display for PresetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PresetKey::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

/// Outcome of matching a complete range against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetMatch {
    /// The range equals this preset's range exactly
    Preset(PresetKey),
    /// No preset matches
    Custom,
}

impl PresetMatch {
    /// The matched key, if any
    pub fn key(&self) -> Option<PresetKey> {
        match self {
            PresetMatch::Preset(k) => Some(*k),
            PresetMatch::Custom => None,
        }
    }
}

/// Resolve a preset to concrete endpoints relative to `today`
///
/// Returns `(start, end)`; both are always present.
pub fn preset_bounds(key: PresetKey, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let trailing = |days: i64| (add_days(today, -(days - 1)), today);
    match key {
        PresetKey::Today => (today, today),
        PresetKey::Last7 => trailing(7),
        PresetKey::Last30 => trailing(30),
        PresetKey::Last90 => trailing(90),
        PresetKey::ThisYear => {
            let jan1 = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
            (jan1, today)
        }
        PresetKey::LastYear => {
            let y = today.year() - 1;
            match (NaiveDate::from_ymd_opt(y, 1, 1), NaiveDate::from_ymd_opt(y, 12, 31)) {
                (Some(s), Some(e)) => (s, e),
                _ => (today, today),
            }
        }
    }
}

/// The catalog of presets
///
/// Detection always walks the full catalog in order; the list returned by
/// [`PresetCatalog::visible`] only controls which entries a host shows.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    visible: Vec<PresetKey>,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PresetCatalog {
    /// All six presets visible
    pub fn standard() -> Self {
        Self { visible: PresetKey::ALL.to_vec() }
    }

    /// Restrict the visible list; order is normalized to catalog order
    pub fn with_visible(keys: &[PresetKey]) -> Self {
        let visible = PresetKey::ALL
            .iter()
            .copied()
            .filter(|k| keys.contains(k))
            .collect();
        Self { visible }
    }

    /// Presets a host should list
    pub fn visible(&self) -> &[PresetKey] {
        &self.visible
    }

    /// Resolve a preset into a complete range
    pub fn resolve(&self, key: PresetKey, today: NaiveDate) -> DateRange {
        let (start, end) = preset_bounds(key, today);
        DateRange::complete(start, end)
    }

    /// Match a range against every preset in catalog order
    ///
    /// `None` for an incomplete range, `Some(Custom)` when nothing matches.
    pub fn detect(&self, range: &DateRange, today: NaiveDate) -> Option<PresetMatch> {
        let (start, end) = range.bounds()?;
        let found = PresetKey::ALL
            .iter()
            .copied()
            .find(|k| preset_bounds(*k, today) == (start, end));
        Some(found.map_or(PresetMatch::Custom, PresetMatch::Preset))
    }
}
