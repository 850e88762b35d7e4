//! Parsers for the two external inputs.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Quote-aware delimited-text parser for the event log
//! - [`catalog_parser`]: Region-name extraction from TopoJSON/GeoJSON geometry catalogs
//!
//! # Example
//!
//! ```
//! use air_alerts::config::IngestConfig;
//! use air_alerts::parsing::parse_alert_records;
//!
//! let records = parse_alert_records("level,region_name,started_at,finished_at\n", &IngestConfig::default())
//!     .expect("header-only log parses");
//! assert!(records.is_empty());
//! ```

pub mod catalog_parser;
pub mod csv_parser;

#[cfg(test)]
mod catalog_parser_tests;

pub use catalog_parser::{parse_geometry_catalog, CatalogFeature, GeometryCatalog};
pub use csv_parser::{parse_alert_records, parse_csv, split_line, CsvRecord, CsvTable};
