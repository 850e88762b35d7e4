//! Region-name reconciliation between the event log and the geometry catalog.
//!
//! The two sources name the same regions in different vocabularies
//! (`"Одеська область"` in the log, `"Odessa"` in the catalog). The
//! reconciler collects both name sets, installs a literal mapping table and
//! reports the names either side leaves unmatched.
//!
//! ```
//! use air_alerts::reconciliation::RegionReconciler;
//!
//! let mut reconciler = RegionReconciler::new();
//! reconciler.build_mapping();
//! assert_eq!(reconciler.resolve_catalog_name("Одеська область"), "Odessa");
//! assert_eq!(reconciler.resolve_log_name("Odessa"), "Одеська область");
//! assert_eq!(reconciler.resolve_catalog_name("Atlantis"), "Atlantis");
//! ```

pub mod mapping;
pub mod reconciler;

#[cfg(test)]
mod reconciler_tests;

pub use mapping::RegionMapping;
pub use reconciler::{ReconciliationReport, ReconciliationStats, RegionReconciler};
