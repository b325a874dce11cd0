//! Road geometry ingestion
//!
//! Roads arrive either as a GeoJSON `FeatureCollection` exported from the
//! records database or as WKT `LINESTRING` text from its geometry columns.
//! Both formats carry coordinates as x = longitude, y = latitude.

use std::path::Path;

use geo::LineString;
use geojson::{FeatureCollection, GeoJson, Value};
use log::warn;
use wkt::TryFromWkt;

use crate::Error;
use crate::geometry::is_valid_lat_lon;
use crate::model::Road;

/// Parses a GeoJSON `FeatureCollection` into road records.
///
/// Every `LineString` feature becomes one road, carrying over an optional
/// `name` property. Features with any other geometry type are skipped with
/// a warning.
///
/// # Errors
///
/// Returns an error when the document is not a valid feature collection or
/// a road vertex lies outside the WGS84 coordinate range.
pub fn roads_from_geojson(input: &str) -> Result<Vec<Road>, Error> {
    let geojson: GeoJson = input.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut roads = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let name = feature
            .properties
            .as_ref()
            .and_then(|properties| properties.get("name"))
            .and_then(|value| value.as_str())
            .map(ToOwned::to_owned);

        let Some(geometry) = feature.geometry else {
            warn!("Skipping road feature without geometry");
            continue;
        };

        match geometry.value {
            Value::LineString(positions) => {
                let mut vertices = Vec::with_capacity(positions.len());
                for position in &positions {
                    if position.len() < 2 {
                        return Err(Error::InvalidData(format!(
                            "Road '{}' has a coordinate with fewer than 2 values",
                            name.as_deref().unwrap_or("unnamed")
                        )));
                    }
                    validate_vertex(name.as_deref(), position[1], position[0])?;
                    vertices.push((position[0], position[1]));
                }
                roads.push(Road::new(name, vertices.into()));
            }
            _ => {
                warn!(
                    "Skipping road feature '{}' with non-LineString geometry",
                    name.as_deref().unwrap_or("unnamed")
                );
            }
        }
    }

    Ok(roads)
}

/// Parses a single WKT `LINESTRING` into a road record.
///
/// # Errors
///
/// Returns an error when the text is not a linestring or a vertex lies
/// outside the WGS84 coordinate range.
pub fn road_from_wkt(name: Option<String>, wkt_input: &str) -> Result<Road, Error> {
    let path: LineString<f64> = LineString::try_from_wkt_str(wkt_input)
        .map_err(|e| Error::InvalidData(format!("Failed to parse road WKT: {e}")))?;

    for coord in path.coords() {
        validate_vertex(name.as_deref(), coord.y, coord.x)?;
    }

    Ok(Road::new(name, path))
}

/// Reads a GeoJSON road file from disk.
///
/// # Errors
///
/// Returns an error when the file cannot be read or its content fails
/// [`roads_from_geojson`].
pub fn load_roads_file(path: &Path) -> Result<Vec<Road>, Error> {
    let contents = std::fs::read_to_string(path)?;
    roads_from_geojson(&contents)
}

fn validate_vertex(name: Option<&str>, lat: f64, lon: f64) -> Result<(), Error> {
    if is_valid_lat_lon(lat, lon) {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "Road '{}' has an out-of-range vertex ({lat}, {lon})",
            name.unwrap_or("unnamed")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_linestring_features() {
        let input = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[123.33, 10.95], [123.331, 10.951]]
                    },
                    "properties": {"name": "Main Path"}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[123.332, 10.952], [123.333, 10.953]]
                    },
                    "properties": {}
                }
            ]
        }"#;

        let roads = roads_from_geojson(input).unwrap();
        assert_eq!(roads.len(), 2);
        assert_eq!(roads[0].name.as_deref(), Some("Main Path"));
        assert!(roads[1].name.is_none());

        let first = roads[0].path.points().next().unwrap();
        assert!((first.x() - 123.33).abs() < 1e-12);
        assert!((first.y() - 10.95).abs() < 1e-12);
    }

    #[test]
    fn skips_non_linestring_features() {
        let input = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [123.33, 10.95]},
                    "properties": {"name": "Office"}
                },
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[123.33, 10.95], [123.331, 10.951]]
                    },
                    "properties": {"name": "East Lane"}
                }
            ]
        }"#;

        let roads = roads_from_geojson(input).unwrap();
        assert_eq!(roads.len(), 1);
        assert_eq!(roads[0].name.as_deref(), Some("East Lane"));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(roads_from_geojson("not geojson at all").is_err());
        assert!(roads_from_geojson(r#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
    }

    #[test]
    fn rejects_out_of_range_vertices() {
        let input = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[123.33, 10.95], [190.0, 10.951]]
                    },
                    "properties": {"name": "Broken"}
                }
            ]
        }"#;

        let error = roads_from_geojson(input).unwrap_err();
        assert!(matches!(error, Error::InvalidData(message) if message.contains("Broken")));
    }

    #[test]
    fn parses_wkt_linestrings() {
        let road =
            road_from_wkt(Some("Chapel Walk".into()), "LINESTRING(123.33 10.95, 123.331 10.951)")
                .unwrap();

        assert_eq!(road.name.as_deref(), Some("Chapel Walk"));
        assert_eq!(road.path.coords().count(), 2);
        let last = road.path.points().last().unwrap();
        assert!((last.x() - 123.331).abs() < 1e-12);
        assert!((last.y() - 10.951).abs() < 1e-12);
    }

    #[test]
    fn rejects_wkt_that_is_not_a_linestring() {
        assert!(road_from_wkt(None, "POINT(123.33 10.95)").is_err());
        assert!(road_from_wkt(None, "LINESTRING(123.33)").is_err());
    }
}
