//! Domain models for air-alert records and their calendar buckets.
//!
//! An [`AlertRecord`] is one event-log row, typed at the parse boundary. A
//! [`MonthKey`] is the `YYYY-MM` bucket derived from a record's start time;
//! the sorted set of month keys is the timeline every view is keyed by.

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of weekday rows in a heatmap (Monday = 0 ... Sunday = 6).
pub const WEEKDAYS: usize = 7;

/// Number of hour columns in a heatmap.
pub const HOURS_PER_DAY: usize = 24;

const MONTH_NAMES_UK: [&str; 12] = [
    "січень",
    "лютий",
    "березень",
    "квітень",
    "травень",
    "червень",
    "липень",
    "серпень",
    "вересень",
    "жовтень",
    "листопад",
    "грудень",
];

const WEEKDAY_NAMES_UK: [&str; WEEKDAYS] = [
    "Понеділок",
    "Вівторок",
    "Середа",
    "Четвер",
    "П'ятниця",
    "Субота",
    "Неділя",
];

const WEEKDAY_SHORT_UK: [&str; WEEKDAYS] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Нд"];

/// One row of the event log.
///
/// Every field is the trimmed text of its column; columns absent from a row
/// are empty strings. Timestamps are kept verbatim because validity is only
/// decided when they are bucketed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertRecord {
    /// 1-based line number in the source text
    pub line_number: usize,
    /// Granularity tag (`oblast`, `raion`, `hromada`, ...)
    pub level: String,
    /// Region name in the event-log vocabulary
    pub region_name: String,
    pub started_at: String,
    pub finished_at: String,
}

impl AlertRecord {
    /// Convenience constructor used by tests and in-memory sources.
    pub fn new(
        level: impl Into<String>,
        region_name: impl Into<String>,
        started_at: impl Into<String>,
        finished_at: impl Into<String>,
    ) -> Self {
        Self {
            line_number: 0,
            level: level.into(),
            region_name: region_name.into(),
            started_at: started_at.into(),
            finished_at: finished_at.into(),
        }
    }
}

/// Calendar month bucket, rendered as `YYYY-MM`.
///
/// Ordering is chronological and matches the lexicographic ordering of the
/// rendered strings, since years are restricted to four digits.
///
/// # Examples
///
/// ```
/// use air_alerts::core::MonthKey;
///
/// let key: MonthKey = "2024-03".parse().unwrap();
/// assert_eq!(key.year(), 2024);
/// assert_eq!(key.month(), 3);
/// assert_eq!(key.to_string(), "2024-03");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

/// Error returned when a string is not a valid `YYYY-MM` month key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month key '{0}', expected YYYY-MM")]
pub struct InvalidMonthKey(pub String);

impl MonthKey {
    /// Creates a month key, rejecting months outside 1..=12 and years that do
    /// not fit in four digits.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (0..=9999).contains(&year) && (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Month key of any chrono date or date-time.
    pub fn from_date<D: Datelike>(date: &D) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Ukrainian display label, e.g. `березень 2024`.
    pub fn label_uk(&self) -> String {
        format!("{} {}", MONTH_NAMES_UK[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = InvalidMonthKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidMonthKey(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Full Ukrainian weekday name for a Monday-first index.
pub fn weekday_name_uk(weekday: u8) -> Option<&'static str> {
    WEEKDAY_NAMES_UK.get(weekday as usize).copied()
}

/// Two-letter Ukrainian weekday label for a Monday-first index.
pub fn weekday_short_uk(weekday: u8) -> Option<&'static str> {
    WEEKDAY_SHORT_UK.get(weekday as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_month_key_display_is_zero_padded() {
        let key = MonthKey::new(2024, 3).unwrap();
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(MonthKey::new(987, 11).unwrap().to_string(), "0987-11");
    }

    #[test]
    fn test_month_key_rejects_out_of_range() {
        assert!(MonthKey::new(2024, 0).is_none());
        assert!(MonthKey::new(2024, 13).is_none());
        assert!(MonthKey::new(10000, 1).is_none());
        assert!(MonthKey::new(-1, 1).is_none());
    }

    #[test]
    fn test_month_key_ordering_matches_strings() {
        let mut keys = vec![
            MonthKey::new(2023, 12).unwrap(),
            MonthKey::new(2024, 2).unwrap(),
            MonthKey::new(2024, 10).unwrap(),
            MonthKey::new(2022, 5).unwrap(),
        ];
        let mut strings: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        keys.sort();
        strings.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, strings);
    }

    #[test]
    fn test_month_key_parse() {
        assert_eq!(
            "2024-03".parse::<MonthKey>().unwrap(),
            MonthKey::new(2024, 3).unwrap()
        );
        assert!("2024-3".parse::<MonthKey>().is_err());
        assert!("2024/03".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("+024-03".parse::<MonthKey>().is_err());
        assert!("".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            MonthKey::from_date(&date).unwrap(),
            MonthKey::new(2024, 3).unwrap()
        );
    }

    #[test]
    fn test_month_key_serde_as_string() {
        let key = MonthKey::new(2024, 3).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<MonthKey>("\"March\"").is_err());
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(MonthKey::new(2024, 3).unwrap().label_uk(), "березень 2024");
        assert_eq!(MonthKey::new(2022, 12).unwrap().label_uk(), "грудень 2022");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name_uk(0), Some("Понеділок"));
        assert_eq!(weekday_name_uk(6), Some("Неділя"));
        assert_eq!(weekday_short_uk(4), Some("Пт"));
        assert_eq!(weekday_name_uk(7), None);
    }
}
