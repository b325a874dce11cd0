use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use ordered_float::OrderedFloat;
use petgraph::visit::EdgeRef;

use crate::model::RoadGraph;
use crate::routing::route::RouteResult;
use crate::{Error, RoadNodeId};

#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: OrderedFloat<f64>,
    node: RoadNodeId,
}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other.cost.cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path between two graph nodes by total edge length.
///
/// Dijkstra with early exit: the search stops as soon as the target
/// settles. An unreachable target is not an error but yields the
/// no-route value. A source equal to its target yields a single-point
/// path of distance zero.
///
/// # Errors
///
/// Returns an error when either node id does not exist in this graph.
pub fn shortest_path(
    graph: &RoadGraph,
    source: RoadNodeId,
    target: RoadNodeId,
) -> Result<RouteResult, Error> {
    graph.node(source)?;
    graph.node(target)?;

    let mut distances: HashMap<RoadNodeId, f64> = HashMap::new();
    let mut predecessors: HashMap<RoadNodeId, RoadNodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(source, 0.0);
    heap.push(State {
        cost: OrderedFloat(0.0),
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        let cost = cost.0;
        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().length;

            match distances.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: OrderedFloat(next_cost),
                        node: next,
                    });
                }
                Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: OrderedFloat(next_cost),
                            node: next,
                        });
                    }
                }
            }
        }
    }

    if !(predecessors.contains_key(&target) || target == source) {
        return Ok(RouteResult::no_route());
    }

    // Follow predecessors backward from target to source
    let mut ids = Vec::new();
    let mut current = target;
    while current != source {
        ids.push(current);
        if let Some(&previous) = predecessors.get(&current) {
            current = previous;
        } else {
            break;
        }
    }
    ids.push(source);
    ids.reverse();

    let path = ids
        .into_iter()
        .map(|id| graph.node(id).map(|node| node.geometry))
        .collect::<Result<Vec<_>, _>>()?;
    let distance = distances
        .get(&target)
        .copied()
        .unwrap_or(f64::INFINITY);

    Ok(RouteResult::new(path, distance))
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::loading::GraphConfig;

    /// Triangle with a long direct side and a short two-hop detour
    fn triangle() -> (RoadGraph, RoadNodeId, RoadNodeId, RoadNodeId) {
        let mut graph = RoadGraph::new(GraphConfig::default());
        let a = graph.add_node(Point::new(123.330, 10.950));
        let b = graph.add_node(Point::new(123.331, 10.950));
        let c = graph.add_node(Point::new(123.332, 10.950));
        graph.add_edge(a, b, 10.0);
        graph.add_edge(b, c, 10.0);
        graph.add_edge(a, c, 50.0);
        (graph, a, b, c)
    }

    #[test]
    fn prefers_the_cheaper_detour_over_the_direct_edge() {
        let (graph, a, b, c) = triangle();
        let route = shortest_path(&graph, a, c).unwrap();

        assert!((route.distance_meters() - 20.0).abs() < 1e-12);
        let expected: Vec<Point<f64>> = [a, b, c]
            .iter()
            .map(|&id| graph.node(id).unwrap().geometry)
            .collect();
        assert_eq!(route.path(), expected.as_slice());
    }

    #[test]
    fn same_source_and_target_is_a_zero_length_route() {
        let (graph, a, ..) = triangle();
        let route = shortest_path(&graph, a, a).unwrap();

        assert_eq!(route.path().len(), 1);
        assert!((route.distance_meters()).abs() < f64::EPSILON);
        assert!(!route.is_no_route());
    }

    #[test]
    fn disconnected_target_yields_the_no_route_value() {
        let (mut graph, a, ..) = triangle();
        let island = graph.add_node(Point::new(124.0, 11.0));

        let route = shortest_path(&graph, a, island).unwrap();
        assert!(route.is_no_route());
        assert!(route.distance_meters().is_infinite());
    }

    #[test]
    fn unknown_node_ids_are_rejected() {
        let (graph, a, ..) = triangle();
        let bogus = RoadNodeId::new(99);

        assert!(matches!(
            shortest_path(&graph, a, bogus),
            Err(Error::InvalidNodeIndex)
        ));
        assert!(matches!(
            shortest_path(&graph, bogus, a),
            Err(Error::InvalidNodeIndex)
        ));
    }

    #[test]
    fn distance_equals_the_sum_of_traversed_edges() {
        let mut graph = RoadGraph::new(GraphConfig::default());
        let a = graph.add_node(Point::new(123.330, 10.950));
        let b = graph.add_node(Point::new(123.331, 10.951));
        let c = graph.add_node(Point::new(123.332, 10.952));
        let d = graph.add_node(Point::new(123.333, 10.953));
        graph.add_edge(a, b, 12.5);
        graph.add_edge(b, c, 7.25);
        graph.add_edge(c, d, 30.0);

        let route = shortest_path(&graph, a, d).unwrap();
        assert!((route.distance_meters() - 49.75).abs() < 1e-12);
        assert_eq!(route.path().len(), 4);
    }
}
