//! HTTP routing service for cemetery grounds.
//!
//! Serves walking routes over the road network drawn in the records
//! application. The network can be seeded from a GeoJSON file at startup
//! and replaced at runtime through `POST /roads`.

mod api;
mod config;

use std::net::SocketAddr;
use std::path::PathBuf;

use camposanto_core::prelude::*;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::AppState;
use crate::config::ServerConfig;

#[derive(Debug, Parser)]
#[command(
    name = "camposanto-server",
    about = "Walking-route service for cemetery grounds"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Socket address to bind, overriding the configuration file
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// GeoJSON road file to load at startup, overriding the configuration
    /// file
    #[arg(long)]
    roads: Option<PathBuf>,

    /// Snap tolerance in meters, overriding the configuration file
    #[arg(long)]
    snap_tolerance: Option<f64>,

    /// Reject start and destination points farther than this many meters
    /// from the network
    #[arg(long)]
    max_snap_distance: Option<f64>,

    /// Log filter, e.g. "info" or "camposanto_core=debug"
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(roads) = cli.roads {
        config.roads_file = Some(roads);
    }
    if let Some(tolerance) = cli.snap_tolerance {
        config.graph.snap_tolerance = tolerance;
    }
    if let Some(max) = cli.max_snap_distance {
        config.graph.max_snap_distance = Some(max);
    }

    let roads = match &config.roads_file {
        Some(path) => {
            info!("Loading roads from {}", path.display());
            load_roads_file(path)?
        }
        None => Vec::new(),
    };
    let graph = build_road_graph(&roads, &config.graph)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Initial road graph ready"
    );

    let app = api::router(AppState::new(graph));
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received, draining connections");
}
