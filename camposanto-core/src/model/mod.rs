//! Data model for cemetery road routing
//!
//! Contains the road records handed over by the storage layer and the
//! routable graph assembled from them.

pub mod components;
pub mod network;

pub use components::{NodeKey, Road, RoadEdge, RoadNode};
pub use network::{IndexedPoint, RoadGraph};
