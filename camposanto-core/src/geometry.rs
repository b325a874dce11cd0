//! Spherical and planar geometry helpers for the road network.
//!
//! All distances are meters. Coordinates follow the `geo` convention:
//! `x()` is longitude, `y()` is latitude, in degrees.

use geo::Point;

/// Mean Earth radius used for all great-circle math, meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points, meters
pub fn haversine_meters(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let dlat = (b.y() - a.y()).to_radians();
    let dlon = (b.x() - a.x()).to_radians();

    let sa = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * sa.sqrt().asin()
}

/// Local equirectangular projection anchored at a reference latitude.
///
/// Projects (lon, lat) degrees to (x, y) meters with
/// `x = R * cos(lat0) * lon` and `y = R * lat` (radians). Distances are
/// metrically consistent only within a few hundred meters of the anchor
/// latitude, which covers the segment lengths in this domain.
#[derive(Debug, Clone, Copy)]
pub struct LocalPlane {
    cos_lat0: f64,
}

impl LocalPlane {
    pub fn new(anchor_lat: f64) -> Self {
        Self {
            cos_lat0: anchor_lat.to_radians().cos(),
        }
    }

    /// Project a point to (x, y) meters
    pub fn project(&self, point: Point<f64>) -> (f64, f64) {
        let x = EARTH_RADIUS_M * self.cos_lat0 * point.x().to_radians();
        let y = EARTH_RADIUS_M * point.y().to_radians();
        (x, y)
    }

    /// Unproject (x, y) meters back to a (lon, lat) point
    pub fn unproject(&self, x: f64, y: f64) -> Point<f64> {
        let lon = (x / (EARTH_RADIUS_M * self.cos_lat0)).to_degrees();
        let lat = (y / EARTH_RADIUS_M).to_degrees();
        Point::new(lon, lat)
    }
}

/// Result of projecting a point onto a segment
#[derive(Debug, Clone, Copy)]
pub struct SegmentProjection {
    /// Projection parameter along the segment, clamped to [0, 1]
    pub t: f64,
    /// Distance from the point to the clamped projection, meters
    pub distance: f64,
    /// Projected coordinate on the segment
    pub point: Point<f64>,
}

/// Projects `p` onto the segment `a -> b`.
///
/// The planar frame is anchored at the latitude of `a`, the segment's
/// first endpoint. `t` is clamped, so `distance` measures to the segment
/// itself rather than to the infinite line through it. A degenerate
/// segment (`a` == `b` in the plane) projects everything onto `a`.
pub fn project_onto_segment(p: Point<f64>, a: Point<f64>, b: Point<f64>) -> SegmentProjection {
    let plane = LocalPlane::new(a.y());
    let (px, py) = plane.project(p);
    let (ax, ay) = plane.project(a);
    let (bx, by) = plane.project(b);

    let ab_x = bx - ax;
    let ab_y = by - ay;
    let ap_x = px - ax;
    let ap_y = py - ay;

    let ab_len2 = ab_x * ab_x + ab_y * ab_y;
    if ab_len2 == 0.0 {
        return SegmentProjection {
            t: 0.0,
            distance: ap_x.hypot(ap_y),
            point: a,
        };
    }

    let t = ((ap_x * ab_x + ap_y * ab_y) / ab_len2).clamp(0.0, 1.0);
    let distance = (ap_x - t * ab_x).hypot(ap_y - t * ab_y);

    // The transform is affine for a fixed anchor latitude, so interpolating
    // in degree space lands on the same point as unprojecting (ax + t*ab_x,
    // ay + t*ab_y).
    let point = Point::new(a.x() + t * (b.x() - a.x()), a.y() + t * (b.y() - a.y()));

    SegmentProjection { t, distance, point }
}

/// Whether a latitude/longitude pair is finite and within valid ranges
pub fn is_valid_lat_lon(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon)
}

/// Conservative (lat, lon) padding in degrees that covers `meters` in any
/// direction around latitude `lat`. Used to grow R-tree query envelopes;
/// over-approximation is fine, exact filtering happens afterwards.
pub(crate) fn degree_padding(lat: f64, meters: f64) -> (f64, f64) {
    let meters_per_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
    let lat_pad = meters / meters_per_degree;
    let cos_lat = lat.to_radians().cos().abs().max(0.01);
    (lat_pad * 1.5, lat_pad / cos_lat * 1.5)
}
