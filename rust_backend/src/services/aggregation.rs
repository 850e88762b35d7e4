use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::domain::{AlertRecord, MonthKey};
use crate::time::{bucket_timestamp, calculate_duration, CalendarBasis};

/// Per-month, per-region accumulation of alert counts and durations.
///
/// The average is derived on read and never stored, so it cannot drift from
/// `total_duration / count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RegionStatsRepr", into = "RegionStatsRepr")]
pub struct RegionStats {
    count: u64,
    total_duration: u64,
}

impl RegionStats {
    pub fn new(count: u64, total_duration: u64) -> Self {
        Self {
            count,
            total_duration,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Summed alert duration in minutes
    pub fn total_duration(&self) -> u64 {
        self.total_duration
    }

    /// `total_duration / count` rounded to the nearest minute, halves up.
    /// Zero when nothing has been recorded.
    pub fn average_duration(&self) -> u64 {
        if self.count == 0 {
            return 0;
        }
        (self.total_duration + self.count / 2) / self.count
    }

    fn record(&mut self, duration: u64) {
        self.count += 1;
        self.total_duration += duration;
    }
}

/// Wire form of [`RegionStats`], carrying the derived average.
#[derive(Serialize, Deserialize)]
struct RegionStatsRepr {
    count: u64,
    total_duration: u64,
    #[serde(default, skip_deserializing)]
    average_duration: u64,
}

impl From<RegionStats> for RegionStatsRepr {
    fn from(stats: RegionStats) -> Self {
        Self {
            count: stats.count,
            total_duration: stats.total_duration,
            average_duration: stats.average_duration(),
        }
    }
}

impl From<RegionStatsRepr> for RegionStats {
    fn from(repr: RegionStatsRepr) -> Self {
        Self::new(repr.count, repr.total_duration)
    }
}

/// One non-zero cell of a month's weekday-by-hour heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HeatmapEntry {
    /// Monday = 0 ... Sunday = 6
    pub weekday: u8,
    pub hour: u8,
    pub count: u64,
}

/// Region name to statistics for one month
pub type MonthMap = BTreeMap<String, RegionStats>;

/// Result of one aggregation pass.
///
/// Every month in `months` has at least one record behind it, and every
/// month present in either aggregate appears in `months`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedData {
    months: Vec<MonthKey>,
    map_data: BTreeMap<MonthKey, MonthMap>,
    heatmap_data: BTreeMap<MonthKey, Vec<HeatmapEntry>>,
}

impl ProcessedData {
    /// Observed months, ascending and de-duplicated
    pub fn months(&self) -> &[MonthKey] {
        &self.months
    }

    pub fn latest_month(&self) -> Option<&MonthKey> {
        self.months.last()
    }

    pub fn map_data(&self) -> &BTreeMap<MonthKey, MonthMap> {
        &self.map_data
    }

    pub fn heatmap_data(&self) -> &BTreeMap<MonthKey, Vec<HeatmapEntry>> {
        &self.heatmap_data
    }

    pub fn month_map(&self, month: &MonthKey) -> Option<&MonthMap> {
        self.map_data.get(month)
    }

    pub fn region_stats(&self, month: &MonthKey, region_name: &str) -> Option<&RegionStats> {
        self.map_data.get(month)?.get(region_name)
    }

    /// Non-zero heatmap cells of a month, sorted by weekday then hour.
    /// Empty for a month with no data.
    pub fn heatmap(&self, month: &MonthKey) -> &[HeatmapEntry] {
        self.heatmap_data
            .get(month)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when no record produced a month key.
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Export `{months, map_data, heatmap_data}` as pretty JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Single-pass accumulator building both aggregates and the timeline.
///
/// Records are expected to have passed the record filter already. A record
/// whose start timestamp cannot be bucketed is counted in [`skipped`] and
/// contributes to nothing.
///
/// [`skipped`]: AggregationEngine::skipped
#[derive(Debug, Clone, Default)]
pub struct AggregationEngine {
    basis: CalendarBasis,
    months: BTreeSet<MonthKey>,
    map_data: BTreeMap<MonthKey, MonthMap>,
    heatmap: BTreeMap<MonthKey, BTreeMap<(u8, u8), u64>>,
    skipped: usize,
}

impl AggregationEngine {
    pub fn new(basis: CalendarBasis) -> Self {
        Self {
            basis,
            ..Self::default()
        }
    }

    /// Fold one record into both aggregates.
    pub fn push(&mut self, record: &AlertRecord) {
        let Some(bucket) = bucket_timestamp(&record.started_at, self.basis) else {
            self.skipped += 1;
            return;
        };
        let duration = calculate_duration(&record.started_at, &record.finished_at, self.basis);

        self.months.insert(bucket.month);
        self.map_data
            .entry(bucket.month)
            .or_default()
            .entry(record.region_name.trim().to_string())
            .or_default()
            .record(duration);
        *self
            .heatmap
            .entry(bucket.month)
            .or_default()
            .entry((bucket.weekday, bucket.hour))
            .or_insert(0) += 1;
    }

    /// Records dropped because their start timestamp did not parse
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> ProcessedData {
        if self.skipped > 0 {
            log::debug!(
                "Skipped {} records with unparseable start timestamps",
                self.skipped
            );
        }

        let heatmap_data = self
            .heatmap
            .into_iter()
            .map(|(month, cells)| {
                let entries = cells
                    .into_iter()
                    .map(|((weekday, hour), count)| HeatmapEntry {
                        weekday,
                        hour,
                        count,
                    })
                    .collect();
                (month, entries)
            })
            .collect();

        ProcessedData {
            months: self.months.into_iter().collect(),
            map_data: self.map_data,
            heatmap_data,
        }
    }
}

/// Aggregate already-filtered records in one pass.
pub fn aggregate<'a, I>(records: I, basis: CalendarBasis) -> ProcessedData
where
    I: IntoIterator<Item = &'a AlertRecord>,
{
    let mut engine = AggregationEngine::new(basis);
    for record in records {
        engine.push(record);
    }
    engine.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn record(region: &str, start: &str, end: &str) -> AlertRecord {
        AlertRecord::new("oblast", region, start, end)
    }

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(RegionStats::new(2, 25).average_duration(), 13);
        assert_eq!(RegionStats::new(3, 10).average_duration(), 3);
        assert_eq!(RegionStats::new(4, 10).average_duration(), 3);
        assert_eq!(RegionStats::new(0, 0).average_duration(), 0);
    }

    #[test]
    fn test_region_stats_serializes_average() {
        let json = serde_json::to_value(RegionStats::new(2, 50)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"count": 2, "total_duration": 50, "average_duration": 25})
        );

        let back: RegionStats =
            serde_json::from_value(serde_json::json!({"count": 2, "total_duration": 50, "average_duration": 999}))
                .unwrap();
        assert_eq!(back.average_duration(), 25);
    }

    #[test]
    fn test_single_record() {
        let records = [record(
            "Одеська область",
            "2024-03-01T10:15:00",
            "2024-03-01T10:40:00",
        )];
        let data = aggregate(&records, CalendarBasis::Local);

        assert_eq!(data.months(), &[month("2024-03")]);
        let stats = data.region_stats(&month("2024-03"), "Одеська область").unwrap();
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.total_duration(), 25);
        assert_eq!(stats.average_duration(), 25);
        assert_eq!(
            data.heatmap(&month("2024-03")),
            &[HeatmapEntry {
                weekday: 4,
                hour: 10,
                count: 1
            }]
        );
    }

    #[test]
    fn test_accumulates_per_region_and_cell() {
        let records = [
            record("A", "2024-03-01T10:00:00", "2024-03-01T10:10:00"),
            record("A", "2024-03-01T10:30:00", "2024-03-01T10:45:00"),
            record("B", "2024-03-02T23:59:00", "2024-03-03T00:09:00"),
            record("A", "2024-04-01T00:00:00", "2024-04-01T00:01:00"),
        ];
        let data = aggregate(&records, CalendarBasis::Local);

        assert_eq!(data.months(), &[month("2024-03"), month("2024-04")]);
        assert_eq!(data.latest_month(), Some(&month("2024-04")));

        let a = data.region_stats(&month("2024-03"), "A").unwrap();
        assert_eq!((a.count(), a.total_duration(), a.average_duration()), (2, 25, 13));
        assert_eq!(data.region_stats(&month("2024-03"), "B").unwrap().total_duration(), 10);
        assert!(data.region_stats(&month("2024-04"), "B").is_none());

        assert_eq!(
            data.heatmap(&month("2024-03")),
            &[
                HeatmapEntry { weekday: 4, hour: 10, count: 2 },
                HeatmapEntry { weekday: 5, hour: 23, count: 1 },
            ]
        );
    }

    #[test]
    fn test_bad_end_counts_with_zero_duration() {
        let records = [
            record("A", "2024-03-01T10:00:00", "not a time"),
            record("A", "2024-03-01T10:00:00", "2024-03-01T09:00:00"),
        ];
        let data = aggregate(&records, CalendarBasis::Local);
        let stats = data.region_stats(&month("2024-03"), "A").unwrap();
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.total_duration(), 0);
        assert_eq!(data.heatmap(&month("2024-03"))[0].count, 2);
    }

    #[test]
    fn test_bad_start_contributes_nothing() {
        let records = [
            record("A", "garbage", "2024-03-01T10:00:00"),
            record("B", "2024-03-01T10:00:00", "2024-03-01T10:05:00"),
        ];
        let mut engine = AggregationEngine::new(CalendarBasis::Local);
        records.iter().for_each(|r| engine.push(r));
        assert_eq!(engine.skipped(), 1);

        let data = engine.finish();
        assert_eq!(data.months().len(), 1);
        assert!(data.region_stats(&month("2024-03"), "A").is_none());
    }

    #[test]
    fn test_empty_input() {
        let data = aggregate(std::iter::empty(), CalendarBasis::Local);
        assert!(data.is_empty());
        assert!(data.map_data().is_empty());
        assert!(data.heatmap_data().is_empty());
        assert!(data.heatmap(&month("2024-03")).is_empty());
        assert!(data.latest_month().is_none());
    }

    #[test]
    fn test_export_shape() {
        let records = [record(
            "Одеська область",
            "2024-03-01T10:15:00",
            "2024-03-01T10:40:00",
        )];
        let json: serde_json::Value =
            serde_json::from_str(&aggregate(&records, CalendarBasis::Local).to_json_pretty().unwrap())
                .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "months": ["2024-03"],
                "map_data": {
                    "2024-03": {
                        "Одеська область": {"count": 1, "total_duration": 25, "average_duration": 25}
                    }
                },
                "heatmap_data": {
                    "2024-03": [{"weekday": 4, "hour": 10, "count": 1}]
                }
            })
        );
    }
}
