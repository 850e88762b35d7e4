//! Record selection ahead of aggregation.
//!
//! Only region-level rows that name a region and carry both timestamps are
//! aggregated. Timestamp validity is not checked here; a present but
//! malformed timestamp passes and is dealt with during bucketing.

use serde::{Deserialize, Serialize};

use crate::core::domain::AlertRecord;

/// Why records were dropped, for diagnostics.
///
/// Each rejected record is counted once, under the first check it fails
/// (granularity, then region name, then timestamps).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    pub total_records: usize,
    pub retained_records: usize,
    pub other_level: usize,
    pub missing_region: usize,
    pub missing_timestamps: usize,
}

/// Outcome of filtering a record slice.
#[derive(Debug, Clone, Default)]
pub struct FilterResult<'a> {
    pub retained: Vec<&'a AlertRecord>,
    pub stats: FilterStats,
}

enum Verdict {
    Retained,
    OtherLevel,
    MissingRegion,
    MissingTimestamps,
}

/// Selects complete region-level records.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    region_level: String,
}

impl RecordFilter {
    /// Create a filter retaining rows whose level equals `region_level`.
    pub fn new(region_level: impl Into<String>) -> Self {
        Self {
            region_level: region_level.into(),
        }
    }

    pub fn region_level(&self) -> &str {
        &self.region_level
    }

    /// Whether the record is a region-level row naming a region.
    ///
    /// This is the looser check the reconciler uses to collect log names;
    /// timestamps are not required.
    pub fn is_region_record(&self, record: &AlertRecord) -> bool {
        record.level == self.region_level && !record.region_name.trim().is_empty()
    }

    fn verdict(&self, record: &AlertRecord) -> Verdict {
        if record.level != self.region_level {
            Verdict::OtherLevel
        } else if record.region_name.trim().is_empty() {
            Verdict::MissingRegion
        } else if record.started_at.is_empty() || record.finished_at.is_empty() {
            Verdict::MissingTimestamps
        } else {
            Verdict::Retained
        }
    }

    /// Whether the record takes part in aggregation.
    pub fn accepts(&self, record: &AlertRecord) -> bool {
        matches!(self.verdict(record), Verdict::Retained)
    }

    /// Filter a slice of records, keeping input order.
    pub fn apply<'a>(&self, records: &'a [AlertRecord]) -> FilterResult<'a> {
        let mut result = FilterResult {
            retained: Vec::with_capacity(records.len()),
            stats: FilterStats {
                total_records: records.len(),
                ..FilterStats::default()
            },
        };

        for record in records {
            match self.verdict(record) {
                Verdict::Retained => result.retained.push(record),
                Verdict::OtherLevel => result.stats.other_level += 1,
                Verdict::MissingRegion => result.stats.missing_region += 1,
                Verdict::MissingTimestamps => result.stats.missing_timestamps += 1,
            }
        }
        result.stats.retained_records = result.retained.len();

        result
    }
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self::new("oblast")
    }
}
