//! Error types for session construction.
//!
//! Only structural problems with the two input sources are errors. Per-record
//! defects (bad timestamps, short rows, unknown regions) never surface here;
//! they are excluded from the affected aggregates or reported as diagnostics.

use std::path::PathBuf;

/// Result type for fallible session operations
pub type AlertsResult<T> = Result<T, AlertsError>;

/// Error type for structural input and configuration failures
#[derive(Debug, thiserror::Error)]
pub enum AlertsError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed geometry catalog: {0}")]
    CatalogFormat(String),

    #[error("Geometry catalog has no region collection '{0}'")]
    MissingCollection(String),

    #[error("Event log header is missing required column: {0}")]
    MissingColumn(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AlertsError {
    /// Whether the error comes from the shape of an input source rather than
    /// from configuration or I/O.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            AlertsError::CatalogFormat(_)
                | AlertsError::MissingCollection(_)
                | AlertsError::MissingColumn(_)
        )
    }
}
