//! Convenient re-exports of the items most callers need

pub use crate::loading::{
    GraphConfig, build_road_graph, load_roads_file, road_from_wkt, roads_from_geojson,
};
pub use crate::model::{Road, RoadGraph};
pub use crate::routing::{RouteResult, shortest_path};
pub use crate::{DEFAULT_SNAP_TOLERANCE, Error, RoadNodeId};
