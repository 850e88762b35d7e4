//! Dense weekday-by-hour grid built from the sparse heatmap entries.
//!
//! The aggregation engine only emits non-zero cells; renderers need all
//! 7×24 cells with absent ones filled as zero.

use serde::{Deserialize, Serialize};

use crate::core::{HOURS_PER_DAY, WEEKDAYS};
use crate::services::aggregation::HeatmapEntry;

/// 7×24 count grid, rows Monday-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    counts: [[u64; HOURS_PER_DAY]; WEEKDAYS],
}

impl Default for HeatmapGrid {
    fn default() -> Self {
        Self {
            counts: [[0; HOURS_PER_DAY]; WEEKDAYS],
        }
    }
}

impl HeatmapGrid {
    /// Build the grid from sparse entries. Entries outside the grid are
    /// ignored; repeated cells are summed.
    pub fn from_entries(entries: &[HeatmapEntry]) -> Self {
        let mut grid = Self::default();
        for entry in entries {
            let (weekday, hour) = (entry.weekday as usize, entry.hour as usize);
            if weekday < WEEKDAYS && hour < HOURS_PER_DAY {
                grid.counts[weekday][hour] += entry.count;
            }
        }
        grid
    }

    /// Count at a cell; zero for an absent or out-of-range cell.
    pub fn cell(&self, weekday: u8, hour: u8) -> u64 {
        self.counts
            .get(weekday as usize)
            .and_then(|row| row.get(hour as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Largest cell count, the upper bound of the color scale
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Per-weekday totals
    pub fn row_totals(&self) -> [u64; WEEKDAYS] {
        self.counts.map(|row| row.iter().sum())
    }

    /// Per-hour totals
    pub fn column_totals(&self) -> [u64; HOURS_PER_DAY] {
        let mut totals = [0; HOURS_PER_DAY];
        for row in &self.counts {
            for (total, count) in totals.iter_mut().zip(row) {
                *total += count;
            }
        }
        totals
    }

    /// All 168 cells as entries, weekday-major, zeros included.
    pub fn cells(&self) -> impl Iterator<Item = HeatmapEntry> + '_ {
        self.counts.iter().enumerate().flat_map(|(weekday, row)| {
            row.iter().enumerate().map(move |(hour, &count)| HeatmapEntry {
                weekday: weekday as u8,
                hour: hour as u8,
                count,
            })
        })
    }
}
