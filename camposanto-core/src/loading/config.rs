use serde::Deserialize;

use crate::DEFAULT_SNAP_TOLERANCE;

/// Parameters for graph construction and coordinate lookup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Distance within which nearby nodes and segments get connected during
    /// snapping, meters
    pub snap_tolerance: f64,
    /// Upper bound for snapping an arbitrary coordinate onto the network,
    /// meters. `None` snaps from any distance.
    pub max_snap_distance: Option<f64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            max_snap_distance: None,
        }
    }
}
