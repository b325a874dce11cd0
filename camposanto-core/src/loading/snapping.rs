//! Near-miss geometry snapping
//!
//! Hand-drawn roads rarely touch exactly. After the base graph is
//! assembled, two passes stitch the network together: endpoints within
//! the snap tolerance get a direct connector edge, and a node hovering
//! over the interior of a drawn segment splits that segment at its
//! projection. Both passes search candidates through an R-tree built
//! over the node set as it stood when snapping started, then decide
//! with exact spherical math.

use geo::Point;
use log::debug;
use rayon::prelude::*;
use rstar::{AABB, RTree};

use crate::RoadNodeId;
use crate::geometry::{degree_padding, haversine_meters, project_onto_segment};
use crate::model::{IndexedPoint, RoadGraph};

/// Runs both snapping passes over a freshly built graph. Returns the
/// number of connector edges and junction nodes added.
pub(crate) fn snap_graph(
    graph: &mut RoadGraph,
    segments: &[(RoadNodeId, RoadNodeId)],
) -> (usize, usize) {
    let tree = graph.node_tree();
    let connectors = connect_nearby_nodes(graph, &tree);
    let junctions = insert_segment_junctions(graph, &tree, segments);
    graph.junction_count = junctions;
    (connectors, junctions)
}

/// Connects every pair of distinct nodes separated by more than zero and
/// at most the snap tolerance.
fn connect_nearby_nodes(graph: &mut RoadGraph, tree: &RTree<IndexedPoint>) -> usize {
    let tolerance = graph.config().snap_tolerance;
    let nodes: Vec<(RoadNodeId, Point<f64>)> = graph
        .nodes()
        .map(|(id, node)| (id, node.geometry))
        .collect();

    let pairs: Vec<(RoadNodeId, RoadNodeId, f64)> = nodes
        .into_par_iter()
        .flat_map_iter(|(id, origin)| {
            let (lat_pad, lon_pad) = degree_padding(origin.y(), tolerance);
            let envelope = AABB::from_corners(
                [origin.x() - lon_pad, origin.y() - lat_pad],
                [origin.x() + lon_pad, origin.y() + lat_pad],
            );
            // Each unordered pair is examined once, from its lower id
            tree.locate_in_envelope_intersecting(&envelope)
                .filter(|other| other.data.index() > id.index())
                .filter_map(|other| {
                    let candidate = Point::new(other.geom()[0], other.geom()[1]);
                    let distance = haversine_meters(origin, candidate);
                    (distance > 0.0 && distance <= tolerance)
                        .then_some((id, other.data, distance))
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let mut added = 0;
    for (a, b, distance) in pairs {
        if graph.add_edge(a, b, distance) {
            added += 1;
        }
    }

    debug!("Endpoint snapping added {added} connector edges");
    added
}

/// Splits drawn segments under nodes that project strictly between the
/// segment endpoints within the snap tolerance, then attaches each such
/// node through the new junction.
fn insert_segment_junctions(
    graph: &mut RoadGraph,
    tree: &RTree<IndexedPoint>,
    segments: &[(RoadNodeId, RoadNodeId)],
) -> usize {
    let tolerance = graph.config().snap_tolerance;
    let before = graph.node_count();

    for &(a, b) in segments {
        let start = graph.graph[a].geometry;
        let end = graph.graph[b].geometry;

        let (lat_pad, lon_pad) = degree_padding(start.y(), tolerance);
        let envelope = AABB::from_corners(
            [
                start.x().min(end.x()) - lon_pad,
                start.y().min(end.y()) - lat_pad,
            ],
            [
                start.x().max(end.x()) + lon_pad,
                start.y().max(end.y()) + lat_pad,
            ],
        );
        let candidates: Vec<RoadNodeId> = tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|indexed| indexed.data)
            .filter(|&node| node != a && node != b)
            .collect();

        for node in candidates {
            let point = graph.graph[node].geometry;
            let projection = project_onto_segment(point, start, end);
            if projection.t > 0.0 && projection.t < 1.0 && projection.distance <= tolerance {
                let junction = graph.add_node(projection.point);
                // The drawn segment is replaced by its two halves around
                // the junction. A later hit on the same segment finds the
                // original edge already gone and only adds its spur.
                graph.remove_edge_between(a, b);
                graph.add_edge(a, junction, haversine_meters(start, projection.point));
                graph.add_edge(junction, b, haversine_meters(projection.point, end));
                graph.add_edge(node, junction, haversine_meters(point, projection.point));
            }
        }
    }

    let junctions = graph.node_count() - before;
    debug!("Mid-segment snapping inserted {junctions} junction nodes");
    junctions
}
