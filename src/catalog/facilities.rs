//! Built-in facility categories.

use super::{CategoryDefinition, RecordFilter};
use eframe::egui::Color32;

/// Shared export of the recycling infrastructure survey, partitioned by type.
const INFRASTRUCTURE_SOURCE: &str = "recycling_infrastructure.geojson";

pub static FACILITY_CATEGORIES: [CategoryDefinition; 8] = [
    CategoryDefinition {
        id: "mrf",
        source: Some(INFRASTRUCTURE_SOURCE),
        color: Color32::from_rgb(31, 120, 180),
        display_name: "Material Recovery",
        description: "Material recovery facilities sorting mixed recyclables",
        filter: RecordFilter::PropertyEquals {
            property: "Infra_Type",
            value: "MRF",
        },
    },
    CategoryDefinition {
        id: "glass",
        source: Some(INFRASTRUCTURE_SOURCE),
        color: Color32::from_rgb(51, 160, 44),
        display_name: "Glass",
        description: "Glass processors and secondary glass markets",
        filter: RecordFilter::PropertyEquals {
            property: "Infra_Type",
            value: "Glass Processor",
        },
    },
    CategoryDefinition {
        id: "paper",
        source: Some(INFRASTRUCTURE_SOURCE),
        color: Color32::from_rgb(166, 118, 29),
        display_name: "Paper",
        description: "Paper mills accepting recovered fiber",
        filter: RecordFilter::PropertyIn {
            property: "Infra_Type",
            values: &["Paper Mill", "Paper Recycler"],
        },
    },
    CategoryDefinition {
        id: "plastics",
        source: Some(INFRASTRUCTURE_SOURCE),
        color: Color32::from_rgb(227, 26, 28),
        display_name: "Plastics",
        description: "Plastics reclaimers processing post-consumer resin",
        filter: RecordFilter::PropertyEquals {
            property: "Infra_Type",
            value: "Plastics Reclaimer",
        },
    },
    CategoryDefinition {
        id: "wood",
        source: Some("wood_recycling.geojson"),
        color: Color32::from_rgb(140, 81, 10),
        display_name: "Wood",
        description: "Wood waste recyclers and mulch producers",
        filter: RecordFilter::All,
    },
    CategoryDefinition {
        id: "electronics",
        source: Some("electronics_recyclers.geojson"),
        color: Color32::from_rgb(106, 61, 154),
        display_name: "Electronics",
        description: "Certified electronics recyclers",
        filter: RecordFilter::All,
    },
    CategoryDefinition {
        id: "tires",
        source: Some("tire_processors.geojson"),
        color: Color32::from_rgb(64, 64, 64),
        display_name: "Tires",
        description: "Scrap tire processors",
        filter: RecordFilter::All,
    },
    CategoryDefinition {
        id: "composting",
        source: None,
        color: Color32::from_rgb(0, 128, 128),
        display_name: "Composting",
        description: "Composting facilities (no data published yet)",
        filter: RecordFilter::All,
    },
];
