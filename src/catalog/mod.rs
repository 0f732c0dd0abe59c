//! Facility category catalog.
//!
//! The catalog is fixed at build time: every category the UI can offer is
//! declared here together with where its data lives and which records of
//! that source belong to it.

mod facilities;

use crate::facility::FacilityRecord;
use eframe::egui::Color32;

pub use facilities::FACILITY_CATEGORIES;

/// Declarative selection of records within a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFilter {
    /// Every record in the source belongs to the category.
    All,
    /// `property` must equal `value` exactly.
    PropertyEquals {
        property: &'static str,
        value: &'static str,
    },
    /// `property` must equal one of `values` exactly.
    PropertyIn {
        property: &'static str,
        values: &'static [&'static str],
    },
    /// `property` must contain `needle`, ignoring ASCII case.
    PropertyContains {
        property: &'static str,
        needle: &'static str,
    },
}

impl RecordFilter {
    /// Returns true if the record belongs to the category.
    pub fn matches(&self, record: &FacilityRecord) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::PropertyEquals { property, value } => {
                record.property(property).as_deref() == Some(*value)
            }
            RecordFilter::PropertyIn { property, values } => record
                .property(property)
                .is_some_and(|v| values.contains(&v.as_str())),
            RecordFilter::PropertyContains { property, needle } => {
                record.property(property).is_some_and(|v| {
                    v.to_ascii_lowercase()
                        .contains(&needle.to_ascii_lowercase())
                })
            }
        }
    }
}

/// A facility category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDefinition {
    /// Unique key, also used to address the category's toggle control
    pub id: &'static str,
    /// Source file relative to the data root; `None` means no data exists
    pub source: Option<&'static str>,
    /// Marker fill color
    pub color: Color32,
    pub display_name: &'static str,
    pub description: &'static str,
    /// Records of `source` that belong to this category
    pub filter: RecordFilter,
}

/// Ordered collection of category definitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    categories: Vec<CategoryDefinition>,
}

impl Catalog {
    /// Creates a catalog from an ordered list of definitions.
    pub fn new(categories: Vec<CategoryDefinition>) -> Self {
        debug_assert!(
            categories
                .iter()
                .enumerate()
                .all(|(i, c)| categories[..i].iter().all(|p| p.id != c.id)),
            "catalog ids must be unique"
        );
        Self { categories }
    }

    /// The built-in facility catalog.
    pub fn facilities() -> Self {
        Self::new(FACILITY_CATEGORIES.to_vec())
    }

    pub fn get(&self, id: &str) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.categories.iter().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::facilities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::FacilityRecord;
    use serde_json::json;
    use std::collections::HashSet;

    fn record(infra_type: &str) -> FacilityRecord {
        let props = json!({ "Infra_Type": infra_type });
        FacilityRecord::point(0.0, 0.0, props.as_object().cloned().unwrap())
    }

    #[test]
    fn test_builtin_catalog_ids_are_unique() {
        let catalog = Catalog::facilities();
        let ids: HashSet<_> = catalog.ids().collect();
        assert_eq!(ids.len(), catalog.len());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_builtin_catalog_has_a_category_without_data() {
        assert!(Catalog::facilities().iter().any(|c| c.source.is_none()));
    }

    #[test]
    fn test_filter_semantics() {
        let equals = RecordFilter::PropertyEquals {
            property: "Infra_Type",
            value: "MRF",
        };
        assert!(equals.matches(&record("MRF")));
        assert!(!equals.matches(&record("mrf")));

        let one_of = RecordFilter::PropertyIn {
            property: "Infra_Type",
            values: &["Paper Mill", "Paper Recycler"],
        };
        assert!(one_of.matches(&record("Paper Recycler")));
        assert!(!one_of.matches(&record("Glass Processor")));

        let contains = RecordFilter::PropertyContains {
            property: "Infra_Type",
            needle: "glass",
        };
        assert!(contains.matches(&record("Glass Processor")));
        assert!(!contains.matches(&FacilityRecord::point(0.0, 0.0, Default::default())));

        assert!(RecordFilter::All.matches(&record("anything")));
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::facilities();
        let first = catalog.iter().next().unwrap();
        assert_eq!(catalog.get(first.id), Some(first));
        assert!(catalog.get("no-such-category").is_none());
    }
}
