//! Walking-route engine for cemetery grounds.
//!
//! Visitors look up a grave on a map and ask how to walk there from the
//! gate or from wherever they stand. The groundskeeper draws the road
//! network as simple polylines; this crate turns those polylines into a
//! routable graph (deduplicating shared vertices and snapping near-miss
//! geometry together) and answers shortest-path queries over it.
//!
//! The graph is an immutable value once built. Callers that need to
//! refresh it build a new one and swap it in wholesale.

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Identifier of a node in the road graph
pub type RoadNodeId = petgraph::graph::NodeIndex;

/// Snap tolerance used when none is configured, meters
pub const DEFAULT_SNAP_TOLERANCE: f64 = 5.0;
