//! Shortest-path computation over the road graph

mod dijkstra;
mod route;

pub use dijkstra::shortest_path;
pub use route::RouteResult;
