//! Raw facility records and the source documents that carry them.
//!
//! Source files are GeoJSON feature collections. Older exports still carry
//! the legacy `crs` member, which is how a document declares that its
//! coordinates are projected rather than geographic.

use super::LoadError;
use crate::geo::Crs;
use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};

/// Well-known property names found on facility records.
pub mod props {
    pub const NAME: &str = "Name";
    pub const INFRA_TYPE: &str = "Infra_Type";
    pub const STREET: &str = "Street";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const ZIP_CODE: &str = "Zip_Code";
    pub const TELEPHONE: &str = "Telephone";
    pub const EMAIL: &str = "Email";
    pub const WEBSITE: &str = "Website";
    pub const FEEDSTOCK: &str = "Feedstock";
}

/// A single untyped facility record: a geometry and a bag of properties.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityRecord {
    pub geometry: Option<Geometry>,
    pub properties: JsonObject,
}

impl FacilityRecord {
    pub fn new(geometry: Option<Geometry>, properties: JsonObject) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Convenience constructor for a point record.
    pub fn point(x: f64, y: f64, properties: JsonObject) -> Self {
        Self::new(Some(Geometry::new(Value::Point(vec![x, y]))), properties)
    }

    /// Returns a property as display text.
    ///
    /// Strings are trimmed and numbers are formatted; empty strings, nulls
    /// and nested values count as absent.
    pub fn property(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            JsonValue::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns the coordinate of a Point geometry.
    pub fn point_coord(&self) -> Option<Coord<f64>> {
        match &self.geometry.as_ref()?.value {
            Value::Point(position) if position.len() >= 2 => Some(Coord {
                x: position[0],
                y: position[1],
            }),
            _ => None,
        }
    }
}

impl From<Feature> for FacilityRecord {
    fn from(feature: Feature) -> Self {
        Self::new(feature.geometry, feature.properties.unwrap_or_default())
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub records: Vec<FacilityRecord>,
    /// CRS name from the legacy `crs` member, if the document declares one.
    pub crs_name: Option<String>,
}

impl SourceDocument {
    /// Parses a GeoJSON document body.
    pub fn parse(body: &str) -> Result<Self, LoadError> {
        let geojson: GeoJson = body
            .parse()
            .map_err(|e: geojson::Error| LoadError::Parse(e.to_string()))?;

        match geojson {
            GeoJson::FeatureCollection(fc) => {
                let crs_name = crs_name_from(fc.foreign_members.as_ref())?;
                Ok(Self {
                    records: fc.features.into_iter().map(FacilityRecord::from).collect(),
                    crs_name,
                })
            }
            GeoJson::Feature(feature) => {
                let crs_name = crs_name_from(feature.foreign_members.as_ref())?;
                Ok(Self {
                    records: vec![FacilityRecord::from(feature)],
                    crs_name,
                })
            }
            GeoJson::Geometry(_) => Err(LoadError::Parse(
                "expected a Feature or FeatureCollection, found a bare geometry".to_string(),
            )),
        }
    }

    /// The coordinate reference system the records are expressed in.
    ///
    /// GeoJSON without a `crs` member is geographic WGS84.
    pub fn crs(&self) -> Crs {
        self.crs_name
            .as_deref()
            .map(Crs::from_identifier)
            .unwrap_or(Crs::Geographic)
    }
}

/// Extracts `crs.properties.name` from a document's foreign members.
fn crs_name_from(members: Option<&JsonObject>) -> Result<Option<String>, LoadError> {
    let Some(crs) = members.and_then(|m| m.get("crs")) else {
        return Ok(None);
    };
    if crs.is_null() {
        return Ok(None);
    }

    crs.get("properties")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(|name| Some(name.to_string()))
        .ok_or_else(|| LoadError::Parse("crs member has no properties.name".to_string()))
}
