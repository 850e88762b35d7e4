//! Record selection between parsing and aggregation.
//!
//! The event log mixes granularities (region, district, city); only complete
//! region-level rows feed the aggregates.

pub mod filter;

pub use filter::{FilterResult, FilterStats, RecordFilter};
