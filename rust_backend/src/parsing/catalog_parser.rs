use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};

use crate::config::CatalogConfig;
use crate::error::{AlertsError, AlertsResult};

/// Raw JSON structure of a catalog document.
///
/// TopoJSON keeps named collections under `objects`; GeoJSON keeps a single
/// unnamed collection under `features`.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(rename = "type")]
    kind: Option<String>,
    objects: Option<HashMap<String, RawCollection>>,
    features: Option<Vec<RawGeometry>>,
}

/// Raw JSON structure for a named TopoJSON object
#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    geometries: Vec<RawGeometry>,
}

/// Raw JSON structure for one geometry or feature; coordinates and arcs are skipped
#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// One region shape in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFeature {
    /// Display name in the catalog vocabulary, if the feature carries one
    pub name: Option<String>,
    pub geometry_type: Option<String>,
}

/// Named collection of region geometries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeometryCatalog {
    pub collection: String,
    pub features: Vec<CatalogFeature>,
}

impl GeometryCatalog {
    /// Distinct, trimmed, non-empty region names in ascending order.
    pub fn region_names(&self) -> BTreeSet<String> {
        self.features
            .iter()
            .filter_map(|f| f.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Number of features that carry no usable name.
    pub fn unnamed_features(&self) -> usize {
        self.features
            .iter()
            .filter(|f| f.name.as_deref().map_or(true, |n| n.trim().is_empty()))
            .count()
    }
}

fn to_feature(raw: RawGeometry, name_property: &str) -> CatalogFeature {
    let name = raw
        .properties
        .as_ref()
        .and_then(|props| props.get(name_property))
        .and_then(Value::as_str)
        .map(str::to_string);
    CatalogFeature {
        name,
        geometry_type: raw.kind,
    }
}

/// Parse a TopoJSON or GeoJSON catalog and extract its region features.
///
/// A document that is not valid JSON, or that has neither the configured
/// TopoJSON collection nor a GeoJSON `features` array, is a structural error.
pub fn parse_geometry_catalog(text: &str, config: &CatalogConfig) -> AlertsResult<GeometryCatalog> {
    let deserializer = &mut serde_json::Deserializer::from_str(text);
    let raw: RawCatalog = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        AlertsError::CatalogFormat(format!("{} at '{}'", e.inner(), e.path()))
    })?;

    if let Some(mut objects) = raw.objects {
        let collection = objects
            .remove(&config.collection)
            .ok_or_else(|| AlertsError::MissingCollection(config.collection.clone()))?;
        return Ok(GeometryCatalog {
            collection: config.collection.clone(),
            features: collection
                .geometries
                .into_iter()
                .map(|g| to_feature(g, &config.name_property))
                .collect(),
        });
    }

    match raw.features {
        Some(features) => Ok(GeometryCatalog {
            collection: raw.kind.unwrap_or_else(|| "FeatureCollection".to_string()),
            features: features
                .into_iter()
                .map(|g| to_feature(g, &config.name_property))
                .collect(),
        }),
        None => Err(AlertsError::MissingCollection(config.collection.clone())),
    }
}
