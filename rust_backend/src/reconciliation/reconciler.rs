use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::domain::AlertRecord;
use crate::parsing::catalog_parser::GeometryCatalog;
use crate::preprocessing::RecordFilter;
use crate::reconciliation::mapping::RegionMapping;

/// Name-set sizes reported alongside a reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationStats {
    pub log_count: usize,
    pub catalog_count: usize,
    /// Distinct log names the mapping knows about
    pub mapped_count: usize,
}

/// Diagnostic result of checking the mapping against both vocabularies.
///
/// All name lists are sorted ascending. The report is valid only when every
/// log name is mapped and every catalog name is the target of some
/// mapping entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub is_valid: bool,
    pub log_names: Vec<String>,
    pub catalog_names: Vec<String>,
    /// Log names without a mapping entry
    pub unmapped_log: Vec<String>,
    /// Catalog names no mapping entry targets
    pub unmapped_catalog: Vec<String>,
    pub stats: ReconciliationStats,
}

/// Links event-log region names to geometry-catalog names.
///
/// The reconciler starts with an empty mapping; [`build_mapping`] installs
/// the curated table. Lookups never fail: an unknown name resolves to
/// itself so callers can still label it.
///
/// [`build_mapping`]: RegionReconciler::build_mapping
#[derive(Debug, Clone, Default)]
pub struct RegionReconciler {
    log_names: BTreeSet<String>,
    catalog_names: BTreeSet<String>,
    mapping: RegionMapping,
}

impl RegionReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciler using a caller-supplied mapping instead of the curated one.
    pub fn with_mapping(mapping: RegionMapping) -> Self {
        Self {
            mapping,
            ..Self::default()
        }
    }

    /// Collect the distinct trimmed region names of region-level records,
    /// replacing any previously ingested log names. Returns them sorted.
    pub fn ingest_log_names(&mut self, records: &[AlertRecord], region_level: &str) -> Vec<String> {
        let filter = RecordFilter::new(region_level);
        self.log_names = records
            .iter()
            .filter(|record| filter.is_region_record(record))
            .map(|record| record.region_name.trim().to_string())
            .collect();
        self.log_names.iter().cloned().collect()
    }

    /// Collect the distinct region names of the catalog, replacing any
    /// previously ingested catalog names. Returns them sorted.
    pub fn ingest_catalog_names(&mut self, catalog: &GeometryCatalog) -> Vec<String> {
        self.catalog_names = catalog.region_names();
        self.catalog_names.iter().cloned().collect()
    }

    /// Install the curated table and return it.
    pub fn build_mapping(&mut self) -> &RegionMapping {
        self.mapping = RegionMapping::curated().clone();
        &self.mapping
    }

    pub fn mapping(&self) -> &RegionMapping {
        &self.mapping
    }

    pub fn log_names(&self) -> &BTreeSet<String> {
        &self.log_names
    }

    pub fn catalog_names(&self) -> &BTreeSet<String> {
        &self.catalog_names
    }

    pub fn validate(&self) -> ReconciliationReport {
        let unmapped_log: Vec<String> = self
            .log_names
            .iter()
            .filter(|name| !self.mapping.contains_log_name(name))
            .cloned()
            .collect();
        let unmapped_catalog: Vec<String> = self
            .catalog_names
            .iter()
            .filter(|name| !self.mapping.is_target(name))
            .cloned()
            .collect();

        ReconciliationReport {
            is_valid: unmapped_log.is_empty() && unmapped_catalog.is_empty(),
            log_names: self.log_names.iter().cloned().collect(),
            catalog_names: self.catalog_names.iter().cloned().collect(),
            unmapped_log,
            unmapped_catalog,
            stats: ReconciliationStats {
                log_count: self.log_names.len(),
                catalog_count: self.catalog_names.len(),
                mapped_count: self.mapping.distinct_log_names(),
            },
        }
    }

    /// Catalog name for a log name, or the log name itself when unmapped.
    pub fn resolve_catalog_name<'a>(&'a self, log_name: &'a str) -> &'a str {
        self.mapping.catalog_name(log_name).unwrap_or(log_name)
    }

    /// First log name mapped to a catalog name, or the catalog name itself
    /// when nothing targets it.
    pub fn resolve_log_name<'a>(&'a self, catalog_name: &'a str) -> &'a str {
        self.mapping.log_name(catalog_name).unwrap_or(catalog_name)
    }
}
