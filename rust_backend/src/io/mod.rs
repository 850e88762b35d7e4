//! Loading the two dashboard inputs.
//!
//! A [`SourceProvider`] fetches the event log and the geometry catalog;
//! [`load_session`] runs both fetches concurrently and builds an
//! [`AlertSession`](crate::session::AlertSession) only once both succeed.
//!
//! # Example
//!
//! ```no_run
//! use air_alerts::config::AlertsConfig;
//! use air_alerts::io::{load_session, FileSources};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let sources = FileSources::new("alerts.csv", "ukraine.json");
//! let session = load_session(&sources, &AlertsConfig::default()).await?;
//! println!("Loaded {} months", session.months().len());
//! # Ok(())
//! # }
//! ```

pub mod sources;


pub use sources::{load_session, FileSources, InMemorySources, SourceProvider};
