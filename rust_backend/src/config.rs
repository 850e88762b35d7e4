//! Session configuration file support.
//!
//! This module reads the ingest, catalog, calendar and source settings from a
//! TOML file. Every field has a default, so an empty file (or no file at all)
//! reproduces the dashboard's stock behavior.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AlertsError, AlertsResult};
use crate::time::CalendarBasis;

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertsConfig {
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub time: TimeConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

/// Event-log column names and the granularity tag that is retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_region_level")]
    pub region_level: String,
    #[serde(default = "default_level_column")]
    pub level_column: String,
    /// Candidate names of the region column; the first present in the header wins.
    #[serde(default = "default_region_columns")]
    pub region_columns: Vec<String>,
    #[serde(default = "default_started_column")]
    pub started_column: String,
    #[serde(default = "default_finished_column")]
    pub finished_column: String,
}

/// Where region names live inside the geometry catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_name_property")]
    pub name_property: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeConfig {
    #[serde(default)]
    pub calendar: CalendarBasis,
}

/// Optional file locations of the two inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub event_log: Option<PathBuf>,
    #[serde(default)]
    pub geometry_catalog: Option<PathBuf>,
}

fn default_region_level() -> String {
    "oblast".to_string()
}

fn default_level_column() -> String {
    "level".to_string()
}

fn default_region_columns() -> Vec<String> {
    vec!["region_name".to_string(), "oblast".to_string()]
}

fn default_started_column() -> String {
    "started_at".to_string()
}

fn default_finished_column() -> String {
    "finished_at".to_string()
}

fn default_collection() -> String {
    "UKR_adm1".to_string()
}

fn default_name_property() -> String {
    "NAME_1".to_string()
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            region_level: default_region_level(),
            level_column: default_level_column(),
            region_columns: default_region_columns(),
            started_column: default_started_column(),
            finished_column: default_finished_column(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            name_property: default_name_property(),
        }
    }
}

impl AlertsConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AlertsResult<Self> {
        let config: AlertsConfig = toml::from_str(content).map_err(|e| {
            AlertsError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AlertsConfig)` if successful
    /// * `Err(AlertsError)` if the file cannot be read, parsed, or is inconsistent
    pub fn from_file<P: AsRef<Path>>(path: P) -> AlertsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| AlertsError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `alerts.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> AlertsResult<Self> {
        let search_paths = [
            PathBuf::from("alerts.toml"),
            PathBuf::from("rust_backend/alerts.toml"),
            PathBuf::from("../alerts.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(AlertsError::Configuration(
            "No alerts.toml found in standard locations".to_string(),
        ))
    }

    /// Reject settings that would make every record or every catalog entry
    /// silently unreachable.
    pub fn validate(&self) -> AlertsResult<()> {
        let ingest = &self.ingest;
        if ingest.region_level.trim().is_empty() {
            return Err(AlertsError::Configuration(
                "'ingest.region_level' must not be empty".to_string(),
            ));
        }
        if ingest.region_columns.iter().all(|c| c.trim().is_empty()) {
            return Err(AlertsError::Configuration(
                "'ingest.region_columns' must name at least one column".to_string(),
            ));
        }
        for (key, value) in [
            ("ingest.level_column", &ingest.level_column),
            ("ingest.started_column", &ingest.started_column),
            ("ingest.finished_column", &ingest.finished_column),
            ("catalog.collection", &self.catalog.collection),
            ("catalog.name_property", &self.catalog.name_property),
        ] {
            if value.trim().is_empty() {
                return Err(AlertsError::Configuration(format!(
                    "'{}' must not be empty",
                    key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AlertsConfig::from_toml_str("").unwrap();
        assert_eq!(config, AlertsConfig::default());
        assert_eq!(config.ingest.region_level, "oblast");
        assert_eq!(config.ingest.region_columns, vec!["region_name", "oblast"]);
        assert_eq!(config.catalog.collection, "UKR_adm1");
        assert_eq!(config.catalog.name_property, "NAME_1");
        assert_eq!(config.time.calendar, CalendarBasis::Local);
        assert!(config.sources.event_log.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[ingest]
region_level = "region"
region_columns = ["oblast"]

[catalog]
collection = "regions"
name_property = "name"

[time]
calendar = "utc"

[sources]
event_log = "data/air_alerts.csv"
geometry_catalog = "data/ukraine-regions.json"
"#;

        let config = AlertsConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.ingest.region_level, "region");
        assert_eq!(config.ingest.region_columns, vec!["oblast"]);
        assert_eq!(config.ingest.started_column, "started_at");
        assert_eq!(config.catalog.collection, "regions");
        assert_eq!(config.time.calendar, CalendarBasis::Utc);
        assert_eq!(
            config.sources.event_log,
            Some(PathBuf::from("data/air_alerts.csv"))
        );
    }

    #[test]
    fn test_rejects_unknown_calendar() {
        let err = AlertsConfig::from_toml_str("[time]\ncalendar = \"lunar\"\n").unwrap_err();
        assert!(matches!(err, AlertsError::Configuration(_)));
    }

    #[test]
    fn test_rejects_empty_region_level() {
        let err = AlertsConfig::from_toml_str("[ingest]\nregion_level = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("region_level"));
    }

    #[test]
    fn test_rejects_empty_region_columns() {
        let err = AlertsConfig::from_toml_str("[ingest]\nregion_columns = []\n").unwrap_err();
        assert!(err.to_string().contains("region_columns"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[catalog]\ncollection = \"adm1\"\n").unwrap();

        let config = AlertsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.catalog.collection, "adm1");
        assert_eq!(config.catalog.name_property, "NAME_1");
    }

    #[test]
    fn test_from_missing_file() {
        let err = AlertsConfig::from_file("/nonexistent/alerts.toml").unwrap_err();
        assert!(matches!(err, AlertsError::Io { .. }));
    }
}
