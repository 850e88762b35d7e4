use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::AlertsConfig;
use crate::session::AlertSession;

/// Where the two dashboard inputs come from.
///
/// Implementations only fetch text; parsing happens once both fetches have
/// completed.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Raw event-log text
    async fn fetch_event_log(&self) -> Result<String>;

    /// Raw geometry catalog JSON
    async fn fetch_geometry_catalog(&self) -> Result<String>;
}

/// Sources read from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSources {
    event_log: PathBuf,
    geometry_catalog: PathBuf,
}

impl FileSources {
    pub fn new(event_log: impl Into<PathBuf>, geometry_catalog: impl Into<PathBuf>) -> Self {
        Self {
            event_log: event_log.into(),
            geometry_catalog: geometry_catalog.into(),
        }
    }

    /// Paths taken from the `[sources]` table of the configuration.
    pub fn from_config(config: &AlertsConfig) -> Result<Self> {
        let event_log = config
            .sources
            .event_log
            .clone()
            .context("No event log path configured ('sources.event_log')")?;
        let geometry_catalog = config
            .sources
            .geometry_catalog
            .clone()
            .context("No geometry catalog path configured ('sources.geometry_catalog')")?;
        Ok(Self::new(event_log, geometry_catalog))
    }

    pub fn event_log_path(&self) -> &Path {
        &self.event_log
    }

    pub fn geometry_catalog_path(&self) -> &Path {
        &self.geometry_catalog
    }
}

#[async_trait]
impl SourceProvider for FileSources {
    async fn fetch_event_log(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.event_log)
            .await
            .with_context(|| format!("Failed to read event log {}", self.event_log.display()))
    }

    async fn fetch_geometry_catalog(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.geometry_catalog)
            .await
            .with_context(|| {
                format!(
                    "Failed to read geometry catalog {}",
                    self.geometry_catalog.display()
                )
            })
    }
}

/// Fixed in-memory sources, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySources {
    pub event_log: String,
    pub geometry_catalog: String,
}

impl InMemorySources {
    pub fn new(event_log: impl Into<String>, geometry_catalog: impl Into<String>) -> Self {
        Self {
            event_log: event_log.into(),
            geometry_catalog: geometry_catalog.into(),
        }
    }
}

#[async_trait]
impl SourceProvider for InMemorySources {
    async fn fetch_event_log(&self) -> Result<String> {
        Ok(self.event_log.clone())
    }

    async fn fetch_geometry_catalog(&self) -> Result<String> {
        Ok(self.geometry_catalog.clone())
    }
}

/// Fetch both sources concurrently, then build a session.
///
/// Fails if either fetch fails or either source is structurally invalid;
/// nothing is built from a partial load.
pub async fn load_session<P>(provider: &P, config: &AlertsConfig) -> Result<AlertSession>
where
    P: SourceProvider + ?Sized,
{
    let (event_log, catalog_json) = tokio::try_join!(
        provider.fetch_event_log(),
        provider.fetch_geometry_catalog()
    )?;

    AlertSession::build(&event_log, &catalog_json, config).context("Failed to build alert session")
}
