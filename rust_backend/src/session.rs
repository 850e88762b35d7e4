//! One load of the dashboard data.
//!
//! An [`AlertSession`] owns everything derived from a single pair of inputs:
//! the aggregates, the reconciled region names and the diagnostics. Building
//! it either succeeds completely or fails with a structural error, so a
//! caller never observes partially processed state. Reloading means building
//! a new session.

use serde::Serialize;

use crate::config::AlertsConfig;
use crate::core::domain::{AlertRecord, MonthKey};
use crate::error::AlertsResult;
use crate::parsing::{parse_alert_records, parse_geometry_catalog, GeometryCatalog};
use crate::preprocessing::{FilterStats, RecordFilter};
use crate::reconciliation::{ReconciliationReport, RegionReconciler};
use crate::services::aggregation::{aggregate, ProcessedData};
use crate::services::statistics::{region_ranking, MonthSummary, RegionCount};

/// Whether a session has anything to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataStatus {
    Available,
    /// No record produced a month key; views should show an empty state
    NoData,
}

/// Fully processed result of one event log and one geometry catalog.
#[derive(Debug, Clone)]
pub struct AlertSession {
    records: Vec<AlertRecord>,
    filter_stats: FilterStats,
    unbucketed: usize,
    processed: ProcessedData,
    reconciler: RegionReconciler,
    report: ReconciliationReport,
    ranking: Vec<RegionCount>,
}

impl AlertSession {
    /// Parse both sources and build the session.
    ///
    /// Fails on a structurally invalid event log or catalog. Defective
    /// records are excluded without failing the build.
    pub fn build(event_log: &str, catalog_json: &str, config: &AlertsConfig) -> AlertsResult<Self> {
        let records = parse_alert_records(event_log, &config.ingest)?;
        let catalog = parse_geometry_catalog(catalog_json, &config.catalog)?;

        Ok(Self::from_records(records, &catalog, config))
    }

    /// Build a session from already-parsed inputs.
    pub fn from_records(
        records: Vec<AlertRecord>,
        catalog: &GeometryCatalog,
        config: &AlertsConfig,
    ) -> Self {
        let filter = RecordFilter::new(config.ingest.region_level.as_str());
        let filtered = filter.apply(&records);

        let processed = aggregate(filtered.retained.iter().copied(), config.time.calendar);
        let bucketed: u64 = processed
            .map_data()
            .values()
            .flat_map(|regions| regions.values())
            .map(|stats| stats.count())
            .sum();
        let unbucketed = filtered.stats.retained_records - bucketed as usize;

        let mut reconciler = RegionReconciler::new();
        reconciler.ingest_log_names(&records, filter.region_level());
        reconciler.ingest_catalog_names(catalog);
        reconciler.build_mapping();
        let report = reconciler.validate();
        if !report.unmapped_log.is_empty() {
            log::warn!(
                "{} event-log regions have no catalog name: {:?}",
                report.unmapped_log.len(),
                report.unmapped_log
            );
        }
        if !report.unmapped_catalog.is_empty() {
            log::warn!(
                "{} catalog regions have no event-log name: {:?}",
                report.unmapped_catalog.len(),
                report.unmapped_catalog
            );
        }
        if catalog.unnamed_features() > 0 {
            log::debug!(
                "{} catalog features carry no '{}' property",
                catalog.unnamed_features(),
                config.catalog.name_property
            );
        }

        log::info!(
            "Session built: {} records parsed, {} retained, {} months",
            records.len(),
            filtered.stats.retained_records,
            processed.months().len()
        );

        let filter_stats = filtered.stats;
        let ranking = region_ranking(&records, &config.ingest);

        Self {
            records,
            filter_stats,
            unbucketed,
            ranking,
            processed,
            reconciler,
            report,
        }
    }

    /// Every parsed record, in log order
    pub fn records(&self) -> &[AlertRecord] {
        &self.records
    }

    pub fn records_parsed(&self) -> usize {
        self.records.len()
    }

    /// Records that passed the record filter
    pub fn records_retained(&self) -> usize {
        self.filter_stats.retained_records
    }

    pub fn filter_stats(&self) -> &FilterStats {
        &self.filter_stats
    }

    /// Retained records whose start timestamp could not be bucketed
    pub fn records_unbucketed(&self) -> usize {
        self.unbucketed
    }

    pub fn processed(&self) -> &ProcessedData {
        &self.processed
    }

    pub fn months(&self) -> &[MonthKey] {
        self.processed.months()
    }

    pub fn reconciler(&self) -> &RegionReconciler {
        &self.reconciler
    }

    pub fn reconciliation(&self) -> &ReconciliationReport {
        &self.report
    }

    /// Regions by total alert count, busiest first
    pub fn region_ranking(&self) -> &[RegionCount] {
        &self.ranking
    }

    pub fn data_status(&self) -> DataStatus {
        if self.processed.is_empty() {
            DataStatus::NoData
        } else {
            DataStatus::Available
        }
    }

    pub fn month_summary(&self, month: &MonthKey) -> MonthSummary {
        MonthSummary::compute(&self.processed, month)
    }

    /// Summary of the most recent month, if there is any data
    pub fn latest_summary(&self) -> Option<MonthSummary> {
        self.processed
            .latest_month()
            .map(|month| self.month_summary(month))
    }
}
