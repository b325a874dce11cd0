//! This module is responsible for ingesting road geometries and building
//! the routable graph, including the snapping passes that stitch
//! hand-drawn roads into one connected network.

mod builder;
mod config;
mod roads;
mod snapping;

pub use builder::build_road_graph;
pub use config::GraphConfig;
pub use roads::{load_roads_file, road_from_wkt, roads_from_geojson};
