//! Core domain models for the air-alert event log.
//!
//! This module defines the fundamental data structures shared by the parser,
//! the aggregation services, and the region reconciler.

pub mod domain;

pub use domain::{
    weekday_name_uk, weekday_short_uk, AlertRecord, InvalidMonthKey, MonthKey, HOURS_PER_DAY,
    WEEKDAYS,
};
