//! Timestamp parsing and calendar bucketing.
//!
//! Converts raw start/end timestamp strings into the month key, Monday-first
//! weekday, and hour used by both aggregates, and computes alert durations.
//!
//! # Example
//!
//! ```
//! use air_alerts::time::{bucket_timestamp, calculate_duration, CalendarBasis};
//!
//! let bucket = bucket_timestamp("2024-03-01T10:15:00", CalendarBasis::Local).unwrap();
//! assert_eq!(bucket.month.to_string(), "2024-03");
//! assert_eq!(bucket.weekday, 4); // Friday
//! assert_eq!(bucket.hour, 10);
//!
//! let minutes = calculate_duration(
//!     "2024-03-01T10:15:00",
//!     "2024-03-01T10:40:00",
//!     CalendarBasis::Local,
//! );
//! assert_eq!(minutes, 25);
//! ```

pub mod bucketing;


pub use bucketing::{
    bucket_datetime, bucket_timestamp, calculate_duration, monday_first_weekday, parse_timestamp,
    CalendarBasis, TimeBucket,
};
