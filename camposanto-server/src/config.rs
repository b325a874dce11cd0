use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use camposanto_core::prelude::GraphConfig;
use serde::Deserialize;

/// Server settings, read from a TOML file with every field optional
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind: SocketAddr,
    /// GeoJSON file with the initial road network
    pub roads_file: Option<PathBuf>,
    /// Graph construction parameters
    pub graph: GraphConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            roads_file: None,
            graph: GraphConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration file, or falls back to defaults when no
    /// path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                Ok(toml::from_str(&contents)?)
            }
            None => Ok(Self::default()),
        }
    }
}
