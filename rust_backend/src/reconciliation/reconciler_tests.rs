#[cfg(test)]
mod tests {
    use crate::config::CatalogConfig;
    use crate::core::domain::AlertRecord;
    use crate::parsing::catalog_parser::{parse_geometry_catalog, CatalogFeature, GeometryCatalog};
    use crate::reconciliation::{RegionMapping, RegionReconciler};

    fn oblast(name: &str) -> AlertRecord {
        AlertRecord::new("oblast", name, "2024-03-01T10:00:00", "2024-03-01T10:30:00")
    }

    fn catalog(names: &[&str]) -> GeometryCatalog {
        GeometryCatalog {
            collection: "UKR_adm1".to_string(),
            features: names
                .iter()
                .map(|name| CatalogFeature {
                    name: Some(name.to_string()),
                    geometry_type: Some("Polygon".to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_mapping_starts_empty() {
        let reconciler = RegionReconciler::new();
        assert!(reconciler.mapping().is_empty());
        assert_eq!(reconciler.resolve_catalog_name("Одеська область"), "Одеська область");
    }

    #[test]
    fn test_build_mapping_installs_curated_table() {
        let mut reconciler = RegionReconciler::new();
        assert_eq!(reconciler.build_mapping().len(), 26);
        assert_eq!(reconciler.mapping(), RegionMapping::curated());
    }

    #[test]
    fn test_ingest_log_names() {
        let mut reconciler = RegionReconciler::new();
        let records = vec![
            oblast(" Сумська область "),
            oblast("Одеська область"),
            oblast("Сумська область"),
            oblast("   "),
            AlertRecord::new("city", "м. Одеса", "", ""),
            AlertRecord::new("oblast", "Львівська область", "", ""),
        ];
        let names = reconciler.ingest_log_names(&records, "oblast");
        assert_eq!(
            names,
            vec!["Львівська область", "Одеська область", "Сумська область"]
        );
    }

    #[test]
    fn test_ingest_replaces_previous_names() {
        let mut reconciler = RegionReconciler::new();
        reconciler.ingest_log_names(&[oblast("A")], "oblast");
        reconciler.ingest_log_names(&[oblast("B")], "oblast");
        assert_eq!(reconciler.log_names().len(), 1);
        assert!(reconciler.log_names().contains("B"));
    }

    #[test]
    fn test_ingest_catalog_names() {
        let mut reconciler = RegionReconciler::new();
        let mut source = catalog(&["Sumy", " Odessa", "Sumy"]);
        source.features.push(CatalogFeature {
            name: None,
            geometry_type: None,
        });
        assert_eq!(reconciler.ingest_catalog_names(&source), vec!["Odessa", "Sumy"]);
    }

    #[test]
    fn test_validate_reports_both_sides() {
        let mut reconciler = RegionReconciler::new();
        reconciler.ingest_log_names(
            &[oblast("Одеська область"), oblast("Невідома область")],
            "oblast",
        );
        reconciler.ingest_catalog_names(&catalog(&["Odessa", "Sevastopol'"]));
        reconciler.build_mapping();

        let report = reconciler.validate();
        assert!(!report.is_valid);
        assert_eq!(report.unmapped_log, vec!["Невідома область"]);
        assert_eq!(report.unmapped_catalog, vec!["Sevastopol'"]);
        assert_eq!(report.log_names, vec!["Невідома область", "Одеська область"]);
        assert_eq!(report.catalog_names, vec!["Odessa", "Sevastopol'"]);
        assert_eq!(report.stats.log_count, 2);
        assert_eq!(report.stats.catalog_count, 2);
        assert_eq!(report.stats.mapped_count, 26);
    }

    #[test]
    fn test_full_coverage_is_valid() {
        let curated = RegionMapping::curated();
        let records: Vec<_> = curated.pairs().map(|(log_name, _)| oblast(log_name)).collect();
        let catalog_names: Vec<_> = curated.pairs().map(|(_, name)| name).collect();

        let mut reconciler = RegionReconciler::new();
        reconciler.ingest_log_names(&records, "oblast");
        reconciler.ingest_catalog_names(&catalog(&catalog_names));
        reconciler.build_mapping();

        let report = reconciler.validate();
        assert!(report.is_valid, "{:?}", report);
        assert!(report.unmapped_log.is_empty());
        assert!(report.unmapped_catalog.is_empty());
    }

    #[test]
    fn test_empty_sets_are_valid() {
        let reconciler = RegionReconciler::new();
        assert!(reconciler.validate().is_valid);
    }

    #[test]
    fn test_resolution_round_trips_curated_names() {
        let mut reconciler = RegionReconciler::new();
        reconciler.build_mapping();
        for (log_name, catalog_name) in RegionMapping::curated().pairs() {
            assert_eq!(reconciler.resolve_catalog_name(log_name), catalog_name);
            assert_eq!(reconciler.resolve_log_name(catalog_name), log_name);
        }
        assert_eq!(reconciler.resolve_log_name("Atlantis"), "Atlantis");
    }

    #[test]
    fn test_custom_mapping() {
        let reconciler =
            RegionReconciler::with_mapping(RegionMapping::from_pairs([("a", "X"), ("b", "X")]));
        assert_eq!(reconciler.resolve_log_name("X"), "a");
        assert_eq!(reconciler.resolve_catalog_name("b"), "X");
    }

    #[test]
    fn test_against_parsed_catalog() {
        let json = r#"{"type":"Topology","objects":{"UKR_adm1":{"type":"GeometryCollection",
            "geometries":[{"type":"Polygon","properties":{"NAME_1":"Odessa"}},
                          {"type":"Polygon","properties":{"NAME_1":"Kiev City"}}]}}}"#;
        let parsed = parse_geometry_catalog(json, &CatalogConfig::default()).unwrap();

        let mut reconciler = RegionReconciler::new();
        reconciler.ingest_catalog_names(&parsed);
        reconciler.ingest_log_names(&[oblast("Одеська область"), oblast("м. Київ")], "oblast");
        reconciler.build_mapping();
        assert!(reconciler.validate().is_valid);
    }
}
