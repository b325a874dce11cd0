use geo::{LineString, Point};
use geojson::{Feature, Geometry};
use serde_json::json;

/// Result of one shortest-path computation.
///
/// Ephemeral: computed per request and never stored. An empty path with
/// infinite distance is the no-route value, a valid outcome rather than
/// an error.
#[derive(Debug, Clone)]
pub struct RouteResult {
    path: Vec<Point<f64>>,
    distance: f64,
}

impl RouteResult {
    pub(crate) fn new(path: Vec<Point<f64>>, distance: f64) -> Self {
        Self { path, distance }
    }

    /// The value signaling that no route connects source and target
    pub fn no_route() -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
        }
    }

    pub fn is_no_route(&self) -> bool {
        self.path.is_empty()
    }

    /// Route coordinates in travel order, empty when no route exists
    pub fn path(&self) -> &[Point<f64>] {
        &self.path
    }

    /// Total length of the route in meters, infinite when no route exists
    pub fn distance_meters(&self) -> f64 {
        self.distance
    }

    /// The route as a GeoJSON feature carrying a `distance_m` property.
    ///
    /// `None` when there is nothing to draw: no route at all, or a trivial
    /// route whose start equals its destination.
    pub fn to_geojson(&self) -> Option<Feature> {
        if self.path.len() < 2 {
            return None;
        }

        let line: LineString<f64> = self
            .path
            .iter()
            .map(|point| (point.x(), point.y()))
            .collect::<Vec<_>>()
            .into();
        let value = json!({
            "type": "Feature",
            "geometry": Geometry::new((&line).into()),
            "properties": {
                "distance_m": self.distance,
            }
        });
        Some(Feature::from_json_value(value).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_route_value_is_empty_and_infinite() {
        let result = RouteResult::no_route();
        assert!(result.is_no_route());
        assert!(result.path().is_empty());
        assert!(result.distance_meters().is_infinite());
        assert!(result.to_geojson().is_none());
    }

    #[test]
    fn single_point_route_has_no_geometry_to_draw() {
        let result = RouteResult::new(vec![Point::new(123.33, 10.95)], 0.0);
        assert!(!result.is_no_route());
        assert!(result.to_geojson().is_none());
    }

    #[test]
    fn feature_carries_line_and_distance() {
        let result = RouteResult::new(
            vec![Point::new(123.33, 10.95), Point::new(123.331, 10.951)],
            150.5,
        );

        let feature = result.to_geojson().unwrap();
        let properties = feature.properties.unwrap();
        assert!((properties["distance_m"].as_f64().unwrap() - 150.5).abs() < 1e-12);

        let geometry = feature.geometry.unwrap();
        match geometry.value {
            geojson::Value::LineString(positions) => {
                assert_eq!(positions.len(), 2);
                assert!((positions[0][0] - 123.33).abs() < 1e-12);
                assert!((positions[0][1] - 10.95).abs() < 1e-12);
            }
            other => panic!("expected a LineString, got {other:?}"),
        }
    }
}
