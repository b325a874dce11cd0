use std::time::Instant;

use itertools::Itertools;
use log::info;

use super::GraphConfig;
use super::snapping::snap_graph;
use crate::geometry::haversine_meters;
use crate::model::{Road, RoadGraph};
use crate::{Error, RoadNodeId};

/// Builds the routable graph for one load cycle.
///
/// Every road vertex becomes a candidate node, deduplicated by rounded
/// coordinate, and every consecutive vertex pair a candidate edge weighted
/// by its great-circle length. Degenerate roads contribute no edges and
/// raise no error. Snapping then stitches near-miss geometry together.
///
/// The returned graph is a self-contained value. Rebuilding from the same
/// roads and configuration produces an equivalent network.
///
/// # Errors
///
/// Returns an error only for an invalid configuration. Road coordinates
/// are validated during ingestion, not here.
pub fn build_road_graph(roads: &[Road], config: &GraphConfig) -> Result<RoadGraph, Error> {
    validate_config(config)?;

    info!("Building road graph from {} roads", roads.len());
    let started = Instant::now();

    let mut graph = RoadGraph::new(config.clone());
    let mut segments: Vec<(RoadNodeId, RoadNodeId)> = Vec::new();

    for road in roads {
        for (from, to) in road.path.points().tuple_windows() {
            let a = graph.add_node(from);
            let b = graph.add_node(to);
            if graph.add_edge(a, b, haversine_meters(from, to)) {
                segments.push((a, b));
            }
        }
    }

    let (connectors, junctions) = snap_graph(&mut graph, &segments);

    info!(
        "Road graph built in {:?}: {} nodes, {} edges ({} connector edges, {} junction nodes)",
        started.elapsed(),
        graph.node_count(),
        graph.edge_count(),
        connectors,
        junctions
    );

    Ok(graph)
}

fn validate_config(config: &GraphConfig) -> Result<(), Error> {
    if !config.snap_tolerance.is_finite() || config.snap_tolerance <= 0.0 {
        return Err(Error::InvalidData(format!(
            "Snap tolerance must be a positive number of meters, got {}",
            config.snap_tolerance
        )));
    }
    if let Some(max) = config.max_snap_distance {
        if !max.is_finite() || max <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Max snap distance must be a positive number of meters, got {max}"
            )));
        }
    }
    Ok(())
}
