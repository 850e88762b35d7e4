#[cfg(test)]
mod tests {
    use crate::config::CatalogConfig;
    use crate::error::AlertsError;
    use crate::parsing::catalog_parser::parse_geometry_catalog;

    const TOPOJSON: &str = r#"{
        "type": "Topology",
        "arcs": [[[0, 0], [1, 1]]],
        "objects": {
            "UKR_adm1": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "arcs": [[0]], "properties": {"NAME_1": "Odessa", "ID_1": 15}},
                    {"type": "Polygon", "arcs": [[1]], "properties": {"NAME_1": " Sumy "}},
                    {"type": "MultiPolygon", "arcs": [[[2]]], "properties": {"NAME_1": "Odessa"}},
                    {"type": "Polygon", "arcs": [[3]], "properties": {}},
                    {"type": "Polygon", "arcs": [[4]]}
                ]
            },
            "UKR_adm0": {"type": "GeometryCollection", "geometries": []}
        }
    }"#;

    #[test]
    fn test_parse_topojson_collection() {
        let catalog = parse_geometry_catalog(TOPOJSON, &CatalogConfig::default()).unwrap();

        assert_eq!(catalog.collection, "UKR_adm1");
        assert_eq!(catalog.features.len(), 5);
        assert_eq!(catalog.features[0].name.as_deref(), Some("Odessa"));
        assert_eq!(
            catalog.features[2].geometry_type.as_deref(),
            Some("MultiPolygon")
        );
        assert_eq!(catalog.unnamed_features(), 2);

        let names: Vec<String> = catalog.region_names().into_iter().collect();
        assert_eq!(names, vec!["Odessa", "Sumy"]);
    }

    #[test]
    fn test_missing_collection_is_structural() {
        let config = CatalogConfig {
            collection: "UKR_adm2".to_string(),
            ..CatalogConfig::default()
        };
        let err = parse_geometry_catalog(TOPOJSON, &config).unwrap_err();
        assert!(matches!(err, AlertsError::MissingCollection(ref c) if c == "UKR_adm2"));
    }

    #[test]
    fn test_document_without_collections() {
        let err = parse_geometry_catalog(r#"{"type": "Topology"}"#, &CatalogConfig::default())
            .unwrap_err();
        assert!(matches!(err, AlertsError::MissingCollection(_)));
    }

    #[test]
    fn test_geojson_feature_collection() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": null, "properties": {"NAME_1": "Kiev City"}},
                {"type": "Feature", "geometry": null, "properties": {"NAME_1": "Crimea"}}
            ]
        }"#;
        let catalog = parse_geometry_catalog(geojson, &CatalogConfig::default()).unwrap();
        assert_eq!(catalog.collection, "FeatureCollection");
        assert_eq!(catalog.region_names().len(), 2);
    }

    #[test]
    fn test_custom_name_property() {
        let geojson = r#"{"features": [{"properties": {"name": "Poltava", "NAME_1": "x"}}]}"#;
        let config = CatalogConfig {
            name_property: "name".to_string(),
            ..CatalogConfig::default()
        };
        let catalog = parse_geometry_catalog(geojson, &config).unwrap();
        assert!(catalog.region_names().contains("Poltava"));
    }

    #[test]
    fn test_non_string_name_is_unnamed() {
        let geojson = r#"{"features": [{"properties": {"NAME_1": 42}}]}"#;
        let catalog = parse_geometry_catalog(geojson, &CatalogConfig::default()).unwrap();
        assert!(catalog.region_names().is_empty());
        assert_eq!(catalog.unnamed_features(), 1);
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let bad = r#"{"objects": {"UKR_adm1": {"geometries": [{"properties": 5}]}}}"#;
        let err = parse_geometry_catalog(bad, &CatalogConfig::default()).unwrap_err();
        match err {
            AlertsError::CatalogFormat(msg) => {
                assert!(msg.contains("objects.UKR_adm1.geometries[0].properties"), "{msg}")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = parse_geometry_catalog("not json", &CatalogConfig::default()).unwrap_err();
        assert!(matches!(err, AlertsError::CatalogFormat(_)));
    }
}
