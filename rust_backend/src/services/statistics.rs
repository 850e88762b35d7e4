use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::IngestConfig;
use crate::core::domain::{AlertRecord, MonthKey};
use crate::preprocessing::RecordFilter;
use crate::services::aggregation::ProcessedData;
use crate::services::heatmap::HeatmapGrid;

/// Suffix the event log appends to region names
const REGION_SUFFIX: &str = "область";

/// Alert count of one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCount {
    pub region_name: String,
    pub count: u64,
}

impl RegionCount {
    /// Region name without the trailing administrative suffix, for labels.
    pub fn short_name(&self) -> &str {
        let name = self.region_name.trim();
        name.strip_suffix(REGION_SUFFIX).map(str::trim_end).unwrap_or(name)
    }
}

/// A weekday or hour slot with its alert count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCount {
    pub index: u8,
    pub count: u64,
}

/// Headline figures for one month of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub label: String,
    pub active_regions: usize,
    pub total_alerts: u64,
    pub most_active_region: Option<RegionCount>,
    /// Monday = 0 ... Sunday = 6
    pub most_active_weekday: Option<SlotCount>,
    pub most_active_hour: Option<SlotCount>,
}

/// First strictly-greatest non-zero count, so ties keep the lowest index.
fn busiest<I>(counts: I) -> Option<(usize, u64)>
where
    I: IntoIterator<Item = u64>,
{
    counts
        .into_iter()
        .enumerate()
        .fold(None, |best, (idx, count)| match best {
            Some((_, top)) if count <= top => best,
            _ if count == 0 => best,
            _ => Some((idx, count)),
        })
}

impl MonthSummary {
    /// Summarize a month. A month with no data yields zero counts and no
    /// "most active" entries.
    pub fn compute(data: &ProcessedData, month: &MonthKey) -> Self {
        let regions = data.month_map(month);
        let grid = HeatmapGrid::from_entries(data.heatmap(month));

        let most_active_region = regions.and_then(|map| {
            let names: Vec<_> = map.keys().collect();
            busiest(map.values().map(|stats| stats.count())).map(|(idx, count)| RegionCount {
                region_name: names[idx].clone(),
                count,
            })
        });

        let slot = |(idx, count): (usize, u64)| SlotCount {
            index: idx as u8,
            count,
        };

        Self {
            month: *month,
            label: month.label_uk(),
            active_regions: regions.map_or(0, |map| map.len()),
            total_alerts: regions.map_or(0, |map| map.values().map(|s| s.count()).sum()),
            most_active_region,
            most_active_weekday: busiest(grid.row_totals()).map(slot),
            most_active_hour: busiest(grid.column_totals()).map(slot),
        }
    }
}

/// Per-region count of aggregated records across all months, busiest first.
///
/// Counts the records the record filter retains, keyed by trimmed region
/// name. Ties are ordered by name.
pub fn region_ranking(records: &[AlertRecord], config: &IngestConfig) -> Vec<RegionCount> {
    let filter = RecordFilter::new(config.region_level.as_str());
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records.iter().filter(|r| filter.accepts(r)) {
        *counts.entry(record.region_name.trim()).or_insert(0) += 1;
    }

    let mut ranking: Vec<_> = counts
        .into_iter()
        .map(|(region_name, count)| RegionCount {
            region_name: region_name.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the name order from the map for equal counts
    ranking.sort_by(|a, b| b.count.cmp(&a.count));
    ranking
}
