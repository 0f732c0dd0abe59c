//! Reprojection from spherical web mercator to geographic coordinates.

use geo_types::Coord;
use geojson::{Geometry, Value};
use std::f64::consts::PI;

/// Half the width of the web mercator world square, in meters.
pub const MERCATOR_HALF_EXTENT: f64 = 20037508.34;

/// Coordinate reference systems a source document may declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    /// WGS 84 longitude/latitude (EPSG:4326, OGC CRS84)
    Geographic,
    /// Spherical web mercator (EPSG:3857 and its legacy aliases)
    WebMercator,
    /// Anything else, kept verbatim for error reporting
    Other(String),
}

impl Crs {
    /// Interprets a CRS identifier such as `EPSG:3857` or
    /// `urn:ogc:def:crs:EPSG::3857`.
    pub fn from_identifier(identifier: &str) -> Self {
        let upper = identifier.trim().to_ascii_uppercase();

        if upper.ends_with("CRS84") {
            return Crs::Geographic;
        }

        if upper.contains("EPSG") {
            let code = upper.rsplit(':').next().and_then(|c| c.parse::<u32>().ok());
            match code {
                Some(4326) => return Crs::Geographic,
                Some(3857 | 3785 | 900913 | 102100 | 102113) => return Crs::WebMercator,
                _ => {}
            }
        }

        Crs::Other(identifier.to_string())
    }
}

/// Errors from coordinate transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// The document declared a CRS this viewer cannot convert from.
    UnsupportedCrs(String),
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransformError::UnsupportedCrs(name) => {
                write!(f, "Unsupported coordinate reference system: {}", name)
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Converts a point in `crs` to geographic (lon, lat) degrees.
pub fn reproject(coord: Coord<f64>, crs: &Crs) -> Result<Coord<f64>, TransformError> {
    match crs {
        Crs::Geographic => Ok(coord),
        Crs::WebMercator => {
            let lon = coord.x / MERCATOR_HALF_EXTENT * 180.0;
            let lat0 = coord.y / MERCATOR_HALF_EXTENT * 180.0;
            let lat = 180.0 / PI * (2.0 * (lat0 * PI / 180.0).exp().atan() - PI / 2.0);
            Ok(Coord { x: lon, y: lat })
        }
        Crs::Other(name) => Err(TransformError::UnsupportedCrs(name.clone())),
    }
}

/// Reprojects a Point geometry in place.
///
/// Other geometry types are left untouched.
pub fn reproject_geometry(geometry: &mut Geometry, crs: &Crs) -> Result<(), TransformError> {
    if let Value::Point(position) = &mut geometry.value {
        if position.len() >= 2 {
            let out = reproject(
                Coord {
                    x: position[0],
                    y: position[1],
                },
                crs,
            )?;
            position[0] = out.x;
            position[1] = out.y;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-4;

    #[test]
    fn test_mercator_origin_maps_to_origin() {
        let out = reproject(Coord { x: 0.0, y: 0.0 }, &Crs::WebMercator).unwrap();
        assert!(out.x.abs() < EPS);
        assert!(out.y.abs() < EPS);
    }

    #[test]
    fn test_mercator_edges() {
        let east = reproject(
            Coord {
                x: MERCATOR_HALF_EXTENT,
                y: 0.0,
            },
            &Crs::WebMercator,
        )
        .unwrap();
        assert!((east.x - 180.0).abs() < EPS);

        let north = reproject(
            Coord {
                x: 0.0,
                y: MERCATOR_HALF_EXTENT,
            },
            &Crs::WebMercator,
        )
        .unwrap();
        assert!((north.y - 85.0511).abs() < EPS);
    }

    #[test]
    fn test_geographic_is_identity() {
        let input = Coord {
            x: -122.6765,
            y: 45.5231,
        };
        assert_eq!(reproject(input, &Crs::Geographic).unwrap(), input);
    }

    #[test]
    fn test_unknown_crs_is_an_error() {
        let crs = Crs::from_identifier("EPSG:32610");
        assert_eq!(crs, Crs::Other("EPSG:32610".to_string()));
        assert_eq!(
            reproject(Coord { x: 1.0, y: 1.0 }, &crs),
            Err(TransformError::UnsupportedCrs("EPSG:32610".to_string()))
        );
    }

    #[test]
    fn test_crs_identifiers() {
        assert_eq!(Crs::from_identifier("EPSG:3857"), Crs::WebMercator);
        assert_eq!(
            Crs::from_identifier("urn:ogc:def:crs:EPSG::3857"),
            Crs::WebMercator
        );
        assert_eq!(Crs::from_identifier("EPSG:900913"), Crs::WebMercator);
        assert_eq!(Crs::from_identifier("EPSG:4326"), Crs::Geographic);
        assert_eq!(
            Crs::from_identifier("urn:ogc:def:crs:OGC:1.3:CRS84"),
            Crs::Geographic
        );
        assert_eq!(
            Crs::from_identifier("mercator-ish"),
            Crs::Other("mercator-ish".to_string())
        );
    }

    #[test]
    fn test_non_point_geometries_pass_through() {
        let line = Value::LineString(vec![vec![1000.0, 1000.0], vec![2000.0, 2000.0]]);
        let mut geometry = Geometry::new(line.clone());
        reproject_geometry(&mut geometry, &Crs::WebMercator).unwrap();
        assert_eq!(geometry.value, line);

        let mut point = Geometry::new(Value::Point(vec![MERCATOR_HALF_EXTENT, 0.0]));
        reproject_geometry(&mut point, &Crs::WebMercator).unwrap();
        match point.value {
            Value::Point(p) => assert!((p[0] - 180.0).abs() < EPS),
            other => panic!("unexpected geometry {:?}", other),
        }
    }
}
