//! # Common Types
//!
//! This module contains the types shared by the loader, the aggregation
//! pipeline and the presentation layer: the seven weekday series, one raw
//! time bucket, the per-day visibility toggles and the derived display rows.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the seven fixed weekday series.
///
/// The declaration order is the display order: toggles, legend entries and
/// chart colours all follow `Weekday::ALL`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The field name used for this day in the sales JSON
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Position of the day in `Weekday::ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Series colour as an RGB triple
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            Weekday::Monday => (0xFF, 0x6B, 0x6B),
            Weekday::Tuesday => (0x4E, 0xCD, 0xC4),
            Weekday::Wednesday => (0x45, 0xB7, 0xD1),
            Weekday::Thursday => (0xFF, 0xA0, 0x7A),
            Weekday::Friday => (0x98, 0xD8, 0xC8),
            Weekday::Saturday => (0xF0, 0x62, 0x92),
            Weekday::Sunday => (0xAE, 0xD5, 0x81),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// One time bucket of sales figures.
///
/// Raw buckets are labelled `"HH:MM"` at a 30 minute cadence. Any weekday
/// may be missing from the source JSON; missing values read as zero when
/// summed but are never invented when projected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Bucket label, e.g. `"09:30"` (or `"09"` once aggregated hourly)
    pub time: String,
    #[serde(rename = "Monday", default, skip_serializing_if = "Option::is_none")]
    pub monday: Option<f64>,
    #[serde(rename = "Tuesday", default, skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<f64>,
    #[serde(rename = "Wednesday", default, skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<f64>,
    #[serde(rename = "Thursday", default, skip_serializing_if = "Option::is_none")]
    pub thursday: Option<f64>,
    #[serde(rename = "Friday", default, skip_serializing_if = "Option::is_none")]
    pub friday: Option<f64>,
    #[serde(rename = "Saturday", default, skip_serializing_if = "Option::is_none")]
    pub saturday: Option<f64>,
    #[serde(rename = "Sunday", default, skip_serializing_if = "Option::is_none")]
    pub sunday: Option<f64>,
}

impl TimeRecord {
    /// Create a bucket with no weekday values
    pub fn new(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter, mostly useful for fixtures
    pub fn with(mut self, day: Weekday, value: f64) -> Self {
        self.set(day, Some(value));
        self
    }

    /// The value for `day`, if the source carried one
    pub fn get(&self, day: Weekday) -> Option<f64> {
        match day {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday => self.saturday,
            Weekday::Sunday => self.sunday,
        }
    }

    pub fn set(&mut self, day: Weekday, value: Option<f64>) {
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *slot = value;
    }

    /// The value for `day`, with a missing field read as zero
    pub fn value_or_zero(&self, day: Weekday) -> f64 {
        self.get(day).unwrap_or(0.0)
    }
}

/// Which weekday series are currently selected for display.
///
/// Normal interaction never leaves every day hidden: `toggle` refuses to
/// hide the last visible day.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct DayVisibility {
    flags: [bool; 7],
}

impl DayVisibility {
    /// Build a visibility set showing exactly `days`
    pub fn from_visible(days: &[Weekday]) -> Self {
        let mut flags = [false; 7];
        for day in days {
            flags[day.index()] = true;
        }
        Self { flags }
    }

    pub fn is_visible(&self, day: Weekday) -> bool {
        self.flags[day.index()]
    }

    /// Visible days in display order
    pub fn visible_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.is_visible(*day))
            .collect()
    }

    pub fn any_visible(&self) -> bool {
        self.flags.iter().any(|v| *v)
    }

    /// Flip one day's flag.
    ///
    /// Returns `false` and leaves the set untouched when the flip would hide
    /// every day.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        let mut candidate = self.flags;
        candidate[day.index()] = !candidate[day.index()];
        if candidate.iter().all(|v| !v) {
            return false;
        }
        self.flags = candidate;
        true
    }
}

impl Default for DayVisibility {
    fn default() -> Self {
        Self { flags: [true; 7] }
    }
}

/// Time granularity of the chart
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default)]
pub enum ViewMode {
    #[default]
    HalfHourly,
    Hourly,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::HalfHourly => ViewMode::Hourly,
            ViewMode::Hourly => ViewMode::HalfHourly,
        }
    }

    /// Caption for the button that switches *to* the other mode
    pub fn switch_label(self) -> &'static str {
        match self {
            ViewMode::HalfHourly => "Hourly view",
            ViewMode::Hourly => "Half-hourly view",
        }
    }
}

/// A bucket projected onto the visible weekdays.
///
/// Derived on every state change and never stored on its own. Hidden days,
/// and days the bucket had no value for, are absent from `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub time: String,
    pub values: BTreeMap<Weekday, f64>,
}

impl DisplayRecord {
    pub fn get(&self, day: Weekday) -> Option<f64> {
        self.values.get(&day).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_json_with_missing_days() {
        let json = r#"{"time":"09:00","Monday":3.5,"Sunday":1,"note":"ignored"}"#;
        let record: TimeRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.time, "09:00");
        assert_eq!(record.get(Weekday::Monday), Some(3.5));
        assert_eq!(record.get(Weekday::Sunday), Some(1.0));
        assert_eq!(record.get(Weekday::Tuesday), None);
        assert_eq!(record.value_or_zero(Weekday::Tuesday), 0.0);
    }

    #[test]
    fn test_record_serialization_skips_absent_days() {
        let record = TimeRecord::new("10:30").with(Weekday::Friday, 12.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"time": "10:30", "Friday": 12.0}));
    }

    #[test]
    fn test_default_visibility_shows_every_day() {
        let visibility = DayVisibility::default();
        assert_eq!(visibility.visible_days(), Weekday::ALL.to_vec());
        assert!(visibility.any_visible());
    }

    #[test]
    fn test_toggle_round_trip() {
        let original = DayVisibility::from_visible(&[Weekday::Monday, Weekday::Wednesday]);
        for day in Weekday::ALL {
            let mut visibility = original;
            assert!(visibility.toggle(day));
            assert!(visibility.toggle(day));
            assert_eq!(visibility, original);
        }
    }

    #[test]
    fn test_toggle_last_visible_day_is_rejected() {
        let mut visibility = DayVisibility::from_visible(&[Weekday::Thursday]);
        assert!(!visibility.toggle(Weekday::Thursday));
        assert_eq!(visibility, DayVisibility::from_visible(&[Weekday::Thursday]));
        assert!(visibility.any_visible());
    }

    #[test]
    fn test_toggle_hidden_day_from_single_visible() {
        let mut visibility = DayVisibility::from_visible(&[Weekday::Thursday]);
        assert!(visibility.toggle(Weekday::Sunday));
        assert_eq!(
            visibility.visible_days(),
            vec![Weekday::Thursday, Weekday::Sunday]
        );
    }

    #[test]
    fn test_view_mode_toggles() {
        assert_eq!(ViewMode::default(), ViewMode::HalfHourly);
        assert_eq!(ViewMode::HalfHourly.toggled(), ViewMode::Hourly);
        assert_eq!(ViewMode::Hourly.toggled(), ViewMode::HalfHourly);
    }

    #[test]
    fn test_chrono_weekday_conversion() {
        assert_eq!(Weekday::from(chrono::Weekday::Mon), Weekday::Monday);
        assert_eq!(Weekday::from(chrono::Weekday::Sun), Weekday::Sunday);
    }
}
