//! Air-alert dashboard backend.
//!
//! Turns an event log of air-raid alerts into the two aggregates the
//! dashboard renders, and links the log's region names to the shapes of a
//! geometry catalog:
//!
//! - [`parsing`] reads the delimited event log and the TopoJSON/GeoJSON catalog
//! - [`preprocessing`] keeps complete region-level records
//! - [`time`] derives month, weekday and hour buckets and alert durations
//! - [`services`] builds the per-region map aggregate, the weekday-by-hour
//!   heatmap and the statistics derived from them
//! - [`reconciliation`] maps log region names to catalog names
//! - [`session`] runs all of the above for one pair of inputs
//!
//! ```
//! use air_alerts::config::AlertsConfig;
//! use air_alerts::session::{AlertSession, DataStatus};
//!
//! let log = "level,region_name,started_at,finished_at\n\
//!            oblast,Одеська область,2024-03-01T10:15:00,2024-03-01T10:40:00";
//! let catalog = r#"{"type":"Topology","objects":{"UKR_adm1":{"geometries":[
//!     {"type":"Polygon","properties":{"NAME_1":"Odessa"}}]}}}"#;
//!
//! let session = AlertSession::build(log, catalog, &AlertsConfig::default()).unwrap();
//! assert_eq!(session.data_status(), DataStatus::Available);
//! assert_eq!(session.months()[0].to_string(), "2024-03");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod reconciliation;
pub mod services;
pub mod session;
pub mod time;

pub use config::AlertsConfig;
pub use error::{AlertsError, AlertsResult};
pub use session::{AlertSession, DataStatus};
