//! Aggregation and the derived views the dashboard renders.
//!
//! [`aggregation`] folds filtered records into the map and heatmap
//! aggregates in one pass; [`heatmap`] and [`statistics`] derive dense grids
//! and headline figures from its output.

pub mod aggregation;
pub mod heatmap;
pub mod statistics;

pub use aggregation::{
    aggregate, AggregationEngine, HeatmapEntry, MonthMap, ProcessedData, RegionStats,
};
pub use heatmap::HeatmapGrid;
pub use statistics::{region_ranking, MonthSummary, RegionCount, SlotCount};
