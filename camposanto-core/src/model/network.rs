//! Routable road network assembled from drawn road geometries

use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry};
use hashbrown::HashMap;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use rstar::RTree;
use rstar::primitives::GeomWithData;
use serde_json::json;

use crate::geometry::haversine_meters;
use crate::loading::GraphConfig;
use crate::model::components::{NodeKey, RoadEdge, RoadNode};
use crate::{Error, RoadNodeId};

/// R-tree entry pairing a node position with its graph index
pub type IndexedPoint = GeomWithData<[f64; 2], RoadNodeId>;

/// Complete routable network derived from road geometries.
///
/// Built once per "load roads" cycle by
/// [`build_road_graph`](crate::loading::build_road_graph) and never
/// mutated afterwards. Reloading road data produces a fresh value that
/// replaces the previous graph wholesale, so readers always observe a
/// complete network.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: UnGraph<RoadNode, RoadEdge>,
    key_index: HashMap<NodeKey, RoadNodeId>,
    config: GraphConfig,
    pub(crate) junction_count: usize,
}

impl RoadGraph {
    pub(crate) fn new(config: GraphConfig) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            key_index: HashMap::new(),
            config,
            junction_count: 0,
        }
    }

    /// Returns the node for the rounded coordinate key, inserting a new
    /// node when the key is unseen. Node ids are assigned sequentially in
    /// insertion order.
    pub(crate) fn add_node(&mut self, geometry: Point<f64>) -> RoadNodeId {
        let key = NodeKey::new(geometry);
        if let Some(&id) = self.key_index.get(&key) {
            return id;
        }
        let id = self.graph.add_node(RoadNode { geometry });
        self.key_index.insert(key, id);
        id
    }

    /// Adds an undirected edge unless it would be a self-loop or a
    /// duplicate of an existing edge. Returns whether it was inserted.
    pub(crate) fn add_edge(&mut self, a: RoadNodeId, b: RoadNodeId, length: f64) -> bool {
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, RoadEdge { length });
        true
    }

    /// Removes the edge between two nodes if one exists
    pub(crate) fn remove_edge_between(&mut self, a: RoadNodeId, b: RoadNodeId) -> bool {
        match self.graph.find_edge(a, b) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                true
            }
            None => false,
        }
    }

    pub fn node(&self, id: RoadNodeId) -> Result<&RoadNode, Error> {
        self.graph.node_weight(id).ok_or(Error::InvalidNodeIndex)
    }

    /// Nodes with their ids, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (RoadNodeId, &RoadNode)> {
        self.graph.node_indices().map(|id| (id, &self.graph[id]))
    }

    pub(crate) fn edges(
        &self,
        node: RoadNodeId,
    ) -> impl Iterator<Item = petgraph::graph::EdgeReference<'_, RoadEdge>> {
        self.graph.edges(node)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Junction nodes inserted by mid-segment snapping
    pub fn junction_count(&self) -> usize {
        self.junction_count
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Nearest graph node to an arbitrary coordinate by great-circle
    /// distance, together with that distance in meters.
    ///
    /// Scans every node; networks in this domain stay in the tens to low
    /// hundreds of nodes, so a spatial index would not pay for itself
    /// here. Returns `None` for an empty graph, or when the nearest node
    /// is farther than the configured `max_snap_distance`.
    pub fn nearest_node(&self, point: Point<f64>) -> Option<(RoadNodeId, f64)> {
        let mut best: Option<(RoadNodeId, f64)> = None;
        for (id, node) in self.nodes() {
            let distance = haversine_meters(point, node.geometry);
            if best.is_none_or(|(_, best_distance)| distance < best_distance) {
                best = Some((id, distance));
            }
        }

        let (id, distance) = best?;
        if let Some(max) = self.config.max_snap_distance {
            if distance > max {
                log::trace!(
                    "Nearest node to {point:?} is {distance:.1} m away (max: {max} m) - rejecting snap"
                );
                return None;
            }
        }
        Some((id, distance))
    }

    /// Bulk-loads an R-tree over the current node positions, used for
    /// candidate queries during snapping.
    pub(crate) fn node_tree(&self) -> RTree<IndexedPoint> {
        let points = self
            .nodes()
            .map(|(id, node)| IndexedPoint::new([node.geometry.x(), node.geometry.y()], id))
            .collect();
        RTree::bulk_load(points)
    }

    /// Renders every edge as a two-point `LineString` feature carrying its
    /// length, for map display and debugging.
    pub fn to_geojson(&self) -> FeatureCollection {
        let features = self
            .graph
            .edge_references()
            .map(|edge| {
                let from = self.graph[edge.source()].geometry;
                let to = self.graph[edge.target()].geometry;
                let line: LineString = vec![(from.x(), from.y()), (to.x(), to.y())].into();

                let value = json!({
                    "type": "Feature",
                    "geometry": Geometry::new((&line).into()),
                    "properties": {
                        "length_m": edge.weight().length,
                    }
                });
                Feature::from_json_value(value).unwrap()
            })
            .collect();

        FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        }
    }
}
