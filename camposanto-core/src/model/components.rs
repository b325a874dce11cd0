//! Road network components - nodes, edges, and road records

use geo::{LineString, Point};

/// One road record as drawn by the cemetery administration
#[derive(Debug, Clone)]
pub struct Road {
    /// Display name, if the road has one
    pub name: Option<String>,
    /// Ordered vertex sequence (lon/lat degrees)
    pub path: LineString<f64>,
}

impl Road {
    pub fn new(name: Option<String>, path: LineString<f64>) -> Self {
        Self { name, path }
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (walkable segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Walking distance in meters
    pub length: f64,
}

/// Coordinate key that merges coincident vertices.
///
/// Latitude and longitude are independently rounded to 5 decimal places
/// (about 1.1 m at the equator) and kept as scaled integers, so the key
/// hashes without floating-point equality games. Two vertices with the
/// same key are the same node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    lat_e5: i64,
    lon_e5: i64,
}

impl NodeKey {
    const SCALE: f64 = 1e5;

    pub fn new(geometry: Point<f64>) -> Self {
        Self {
            lat_e5: (geometry.y() * Self::SCALE).round() as i64,
            lon_e5: (geometry.x() * Self::SCALE).round() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_merges_sub_meter_jitter() {
        // 1e-6 degrees is ~0.1 m, well under the rounding grid
        let a = NodeKey::new(Point::new(123.330001, 10.950002));
        let b = NodeKey::new(Point::new(123.330002, 10.950001));
        assert_eq!(a, b);
    }

    #[test]
    fn key_separates_distinct_vertices() {
        let a = NodeKey::new(Point::new(123.33, 10.95));
        let b = NodeKey::new(Point::new(123.3301, 10.95));
        assert_ne!(a, b);
    }

    #[test]
    fn key_handles_negative_coordinates() {
        let a = NodeKey::new(Point::new(-46.633, -23.55));
        let b = NodeKey::new(Point::new(-46.633004, -23.550004));
        assert_eq!(a, b);
    }
}
