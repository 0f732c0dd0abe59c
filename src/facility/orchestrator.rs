//! Concurrent load of every catalog category.

use super::{load_category, CategoryLayers, LoadState, SourceFetcher};
use crate::catalog::Catalog;
use crate::state::ControlPanel;
use futures_util::future::join_all;

/// Loads every category of the catalog at once.
///
/// Individual loads never fail, so this waits for all of them to settle
/// and always returns one layer per category in catalog order.
pub async fn load_all<F: SourceFetcher>(catalog: &Catalog, fetcher: &F) -> CategoryLayers {
    let layers = join_all(catalog.iter().map(|def| load_category(def, fetcher))).await;
    let layers = CategoryLayers::new(layers);

    log::info!(
        "Load complete: {} of {} categories available",
        layers.loaded_ids().count(),
        catalog.len()
    );

    layers
}

/// Enables the controls of loaded categories and disables the rest.
pub fn apply_readiness(catalog: &Catalog, layers: &CategoryLayers, controls: &mut ControlPanel) {
    for def in catalog.iter() {
        let state = layers.get(def.id).map(|l| &l.state);
        match (def.source, state) {
            (None, _) | (_, Some(LoadState::NoDataAvailable)) => {
                controls.set_enabled(def.id, false, Some("No data available for this category"));
            }
            (Some(_), Some(LoadState::Loaded)) => {
                controls.set_enabled(def.id, true, None);
            }
            (Some(_), Some(LoadState::LoadFailed(e))) => {
                controls.set_enabled(def.id, false, Some(&format!("Failed to load: {}", e)));
            }
            (Some(_), Some(LoadState::NotLoaded) | None) => {
                controls.set_enabled(def.id, false, Some("Data has not been loaded"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryDefinition, RecordFilter};
    use crate::facility::testing::FakeFetcher;
    use crate::facility::{FacilityRecord, LoadError, SharedSourceCache};
    use eframe::egui::Color32;
    use serde_json::json;
    use std::collections::HashSet;

    const SHARED: &str = "shared.geojson";

    fn category(
        id: &'static str,
        source: Option<&'static str>,
        filter: RecordFilter,
    ) -> CategoryDefinition {
        CategoryDefinition {
            id,
            source,
            color: Color32::GRAY,
            display_name: id,
            description: "",
            filter,
        }
    }

    fn by_type(id: &'static str, value: &'static str) -> CategoryDefinition {
        category(
            id,
            Some(SHARED),
            RecordFilter::PropertyEquals {
                property: "Infra_Type",
                value,
            },
        )
    }

    fn shared_document() -> String {
        let types = ["MRF", "Glass", "Paper", "MRF", "Wood", "Glass", "Unknown"];
        let features: Vec<_> = types
            .iter()
            .enumerate()
            .map(|(i, t)| {
                json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [i as f64, i as f64] },
                    "properties": { "Name": format!("Facility {}", i), "Infra_Type": t }
                })
            })
            .collect();
        json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    fn names(records: &[FacilityRecord]) -> Vec<String> {
        records.iter().filter_map(|r| r.property("Name")).collect()
    }

    #[test]
    fn test_partition_of_shared_source() {
        let catalog = Catalog::new(vec![
            by_type("mrf", "MRF"),
            by_type("glass", "Glass"),
            by_type("paper", "Paper"),
        ]);
        let fetcher = FakeFetcher::new().with_body(SHARED, shared_document());

        let layers = pollster::block_on(load_all(&catalog, &fetcher));

        let mut seen = HashSet::new();
        let mut total = 0;
        for layer in layers.iter() {
            for name in names(&layer.records) {
                total += 1;
                assert!(seen.insert(name), "record appears in two categories");
            }
        }
        // MRF x2, Glass x2, Paper x1; Wood and Unknown match nothing.
        assert_eq!(total, 5);
        assert_eq!(
            names(&layers.get("mrf").unwrap().records),
            vec!["Facility 0", "Facility 3"]
        );
        // Without deduplication every category fetches independently.
        assert_eq!(fetcher.request_count(SHARED), 3);
    }

    #[test]
    fn test_one_failure_does_not_affect_others() {
        let catalog = Catalog::new(vec![
            category("a", Some("a.geojson"), RecordFilter::All),
            category("b", Some("b.geojson"), RecordFilter::All),
            category("c", Some("c.geojson"), RecordFilter::All),
            category("d", Some("d.geojson"), RecordFilter::All),
        ]);
        let empty = r#"{"type":"FeatureCollection","features":[]}"#;
        let fetcher = FakeFetcher::new()
            .with_body("a.geojson", empty)
            .with_error("b.geojson", LoadError::Fetch("HTTP 500".to_string()))
            .with_body("c.geojson", empty)
            .with_body("d.geojson", empty);

        let layers = pollster::block_on(load_all(&catalog, &fetcher));

        assert_eq!(layers.len(), 4);
        assert!(matches!(
            layers.get("b").unwrap().state,
            LoadState::LoadFailed(_)
        ));
        let loaded: Vec<_> = layers.loaded_ids().collect();
        assert_eq!(loaded, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_every_category_failing_still_completes() {
        let catalog = Catalog::new(vec![
            category("a", Some("a.geojson"), RecordFilter::All),
            category("none", None, RecordFilter::All),
        ]);
        let fetcher = FakeFetcher::new();

        let layers = pollster::block_on(load_all(&catalog, &fetcher));

        assert_eq!(layers.loaded_ids().count(), 0);
        assert_eq!(
            layers.get("none").unwrap().state,
            LoadState::NoDataAvailable
        );
        assert_eq!(fetcher.requests.borrow().len(), 1);
    }

    #[test]
    fn test_shared_cache_fetches_each_source_once() {
        let catalog = Catalog::new(vec![
            by_type("mrf", "MRF"),
            by_type("glass", "Glass"),
            by_type("paper", "Paper"),
        ]);
        let cache = SharedSourceCache::new(FakeFetcher::new().with_body(SHARED, shared_document()));

        let layers = pollster::block_on(load_all(&catalog, &cache));

        assert_eq!(cache.inner().request_count(SHARED), 1);
        assert_eq!(layers.loaded_ids().count(), 3);
        assert_eq!(layers.get("glass").unwrap().records.len(), 2);
    }

    #[test]
    fn test_readiness_follows_load_state() {
        let catalog = Catalog::new(vec![
            category("ok", Some("ok.geojson"), RecordFilter::All),
            category("bad", Some("bad.geojson"), RecordFilter::All),
            category("none", None, RecordFilter::All),
        ]);
        let layers = CategoryLayers::new(vec![
            crate::facility::CategoryLayer::loaded("ok", Vec::new()),
            crate::facility::CategoryLayer::failed("bad", LoadError::Parse("eof".to_string())),
            crate::facility::CategoryLayer::no_data("none"),
        ]);
        let mut controls = ControlPanel::for_catalog(&catalog);

        apply_readiness(&catalog, &layers, &mut controls);

        assert!(controls.is_enabled("ok"));
        assert!(!controls.is_enabled("bad"));
        assert!(!controls.is_enabled("none"));
        assert!(controls
            .get("bad")
            .and_then(|c| c.tooltip.as_deref())
            .is_some_and(|t| t.starts_with("Failed to load")));
        assert_eq!(
            controls.get("none").and_then(|c| c.tooltip.as_deref()),
            Some("No data available for this category")
        );
    }
}
