//! Air-alert report binary
//!
//! Loads an event log and a geometry catalog, reconciles their region names
//! and writes the processed aggregates as JSON.
//!
//! # Usage
//!
//! ```bash
//! EVENT_LOG=data/alerts.csv GEOMETRY_CATALOG=data/ukraine.json \
//!   cargo run --bin alerts-report
//! ```
//!
//! # Environment Variables
//!
//! - `ALERTS_CONFIG`: Path to a TOML configuration file (default: search for `alerts.toml`)
//! - `EVENT_LOG`: Event log path, overrides `sources.event_log`
//! - `GEOMETRY_CATALOG`: Catalog path, overrides `sources.geometry_catalog`
//! - `OUTPUT`: Where to write the JSON export (default: stdout)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use air_alerts::config::AlertsConfig;
use air_alerts::core::weekday_name_uk;
use air_alerts::io::{load_session, FileSources};
use air_alerts::session::{AlertSession, DataStatus};

/// Exit code for a run that loaded fine but found nothing to report
const EXIT_NO_DATA: u8 = 2;

fn load_config() -> anyhow::Result<AlertsConfig> {
    let mut config = match env::var_os("ALERTS_CONFIG") {
        Some(path) => AlertsConfig::from_file(PathBuf::from(path))?,
        None => AlertsConfig::from_default_location().unwrap_or_else(|e| {
            info!("{}; using built-in defaults", e);
            AlertsConfig::default()
        }),
    };

    if let Some(path) = env::var_os("EVENT_LOG") {
        config.sources.event_log = Some(PathBuf::from(path));
    }
    if let Some(path) = env::var_os("GEOMETRY_CATALOG") {
        config.sources.geometry_catalog = Some(PathBuf::from(path));
    }
    Ok(config)
}

fn log_session(session: &AlertSession) {
    info!(
        records = session.records_parsed(),
        retained = session.records_retained(),
        unbucketed = session.records_unbucketed(),
        months = session.months().len(),
        "Processed event log"
    );

    let report = session.reconciliation();
    if report.is_valid {
        info!(
            regions = report.stats.log_count,
            "All region names reconciled"
        );
    } else {
        warn!(
            unmapped_log = ?report.unmapped_log,
            unmapped_catalog = ?report.unmapped_catalog,
            "Region names left unreconciled"
        );
    }

    if let Some(summary) = session.latest_summary() {
        info!(
            month = %summary.label,
            active_regions = summary.active_regions,
            total_alerts = summary.total_alerts,
            "Latest month"
        );
        if let Some(region) = &summary.most_active_region {
            info!(
                "Most active region: {} ({})",
                region.short_name(),
                region.count
            );
        }
        if let Some(day) = summary.most_active_weekday {
            info!(
                "Most active day: {} ({})",
                weekday_name_uk(day.index).unwrap_or("?"),
                day.count
            );
        }
        if let Some(hour) = summary.most_active_hour {
            info!("Most active hour: {}:00 ({})", hour.index, hour.count);
        }
    }
}

async fn run() -> anyhow::Result<DataStatus> {
    let config = load_config()?;
    let sources = FileSources::from_config(&config)?;
    info!(
        "Loading {} and {}",
        sources.event_log_path().display(),
        sources.geometry_catalog_path().display()
    );

    let session = load_session(&sources, &config).await?;
    log_session(&session);

    let status = session.data_status();
    if status == DataStatus::NoData {
        warn!("No alert data available; nothing to export");
        return Ok(status);
    }

    let json = session.processed().to_json_pretty()?;
    match env::var_os("OUTPUT") {
        Some(path) => {
            let path = PathBuf::from(path);
            tokio::fs::write(&path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(status)
}

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(DataStatus::Available) => ExitCode::SUCCESS,
        Ok(DataStatus::NoData) => ExitCode::from(EXIT_NO_DATA),
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
