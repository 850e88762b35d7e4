use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::domain::MonthKey;

/// Formats carrying an explicit UTC offset, tried after RFC 3339.
const OFFSET_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
];

/// Wall-clock formats without an offset, taken as already local.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Calendar in which offset-qualified timestamps are bucketed.
///
/// Timestamps written without an offset are wall-clock values and are
/// bucketed as written under either basis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarBasis {
    /// The host's local time zone
    #[default]
    Local,
    Utc,
}

impl CalendarBasis {
    fn to_wall_clock(self, instant: DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            CalendarBasis::Local => instant.with_timezone(&Local).naive_local(),
            CalendarBasis::Utc => instant.naive_utc(),
        }
    }

    /// Place a wall-clock value on the timeline of this calendar.
    ///
    /// An ambiguous local time takes the earlier instant. A local time that
    /// falls in a daylight-saving gap is read with the offset in force just
    /// before the gap.
    fn to_instant(self, wall_clock: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            CalendarBasis::Local => Local
                .from_local_datetime(&wall_clock)
                .earliest()
                .or_else(|| {
                    Local
                        .from_local_datetime(&(wall_clock - Duration::hours(1)))
                        .earliest()
                        .map(|before| before + Duration::hours(1))
                })
                .map(|local| local.fixed_offset())
                .unwrap_or_else(|| wall_clock.and_utc().fixed_offset()),
            CalendarBasis::Utc => wall_clock.and_utc().fixed_offset(),
        }
    }
}

/// A timestamp as written in the log: either a fixed instant or a wall-clock
/// value without an offset.
#[derive(Debug, Clone, Copy)]
enum RawTimestamp {
    Instant(DateTime<FixedOffset>),
    WallClock(NaiveDateTime),
}

impl RawTimestamp {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self::Instant(instant));
        }
        for format in OFFSET_FORMATS {
            if let Ok(instant) = DateTime::parse_from_str(raw, format) {
                return Some(Self::Instant(instant));
            }
        }
        // `2024-03-01 10:15:00Z`: RFC 3339 with a space separator
        if let Some(utc) = raw.strip_suffix(['Z', 'z']) {
            if let Some(naive) = parse_naive(utc) {
                return Some(Self::Instant(naive.and_utc().fixed_offset()));
            }
        }

        parse_naive(raw).map(Self::WallClock)
    }

    fn wall_clock(self, basis: CalendarBasis) -> NaiveDateTime {
        match self {
            Self::Instant(instant) => basis.to_wall_clock(instant),
            Self::WallClock(naive) => naive,
        }
    }

    fn instant(self, basis: CalendarBasis) -> DateTime<FixedOffset> {
        match self {
            Self::Instant(instant) => instant,
            Self::WallClock(naive) => basis.to_instant(naive),
        }
    }
}

/// Calendar keys derived from a record's start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBucket {
    pub month: MonthKey,
    /// Monday = 0 ... Sunday = 6
    pub weekday: u8,
    /// Hour of day, 0..=23
    pub hour: u8,
}

/// Parse a timestamp string into a wall-clock date-time in the given calendar.
///
/// Returns `None` for empty or unparseable input; a malformed timestamp is a
/// per-record defect, never an error.
pub fn parse_timestamp(raw: &str, basis: CalendarBasis) -> Option<NaiveDateTime> {
    RawTimestamp::parse(raw).map(|timestamp| timestamp.wall_clock(basis))
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Normalize a Sunday-first weekday number (Sunday = 0 ... Saturday = 6)
/// into the Monday-first index used by the heatmap.
pub fn monday_first_weekday(sunday_first: u32) -> u8 {
    ((sunday_first + 6) % 7) as u8
}

/// Month, weekday and hour of an already-parsed wall-clock date-time.
///
/// Returns `None` when the year cannot be rendered as a four-digit month key.
pub fn bucket_datetime(datetime: &NaiveDateTime) -> Option<TimeBucket> {
    let month = MonthKey::from_date(datetime)?;
    let weekday = monday_first_weekday(datetime.weekday().num_days_from_sunday());
    Some(TimeBucket {
        month,
        weekday,
        hour: datetime.hour() as u8,
    })
}

/// Bucket a raw start timestamp. `None` means the record contributes to
/// neither aggregate.
pub fn bucket_timestamp(started_at: &str, basis: CalendarBasis) -> Option<TimeBucket> {
    parse_timestamp(started_at, basis).and_then(|dt| bucket_datetime(&dt))
}

/// Alert duration in whole minutes.
///
/// Returns 0 when either timestamp is missing or unparseable, and when the
/// end precedes the start. Otherwise the elapsed time is rounded to the
/// nearest minute, halves rounding up. Elapsed time is measured between
/// instants, so an alert spanning a daylight-saving change keeps its real
/// length.
pub fn calculate_duration(started_at: &str, finished_at: &str, basis: CalendarBasis) -> u64 {
    let (Some(start), Some(end)) = (
        RawTimestamp::parse(started_at),
        RawTimestamp::parse(finished_at),
    ) else {
        return 0;
    };

    let millis = end
        .instant(basis)
        .signed_duration_since(start.instant(basis))
        .num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis as f64 / 60_000.0).round() as u64
}
