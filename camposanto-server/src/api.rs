use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use camposanto_core::geometry::is_valid_lat_lon;
use camposanto_core::prelude::*;
use geo::Point;
use geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared handle to the current road graph.
///
/// A reload builds a whole new graph and swaps it in behind the lock.
/// Requests clone the inner `Arc` once at the start and work on that
/// consistent snapshot, so a swap mid-request never mixes two networks.
#[derive(Clone)]
pub struct AppState {
    graph: Arc<RwLock<Arc<RoadGraph>>>,
}

impl AppState {
    pub fn new(graph: RoadGraph) -> Self {
        Self {
            graph: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    async fn snapshot(&self) -> Arc<RoadGraph> {
        self.graph.read().await.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/network", get(network))
        .route("/roads", post(load_roads))
        .route("/route", get(route))
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(64))
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct LoadSummary {
    roads: usize,
    nodes: usize,
    edges: usize,
    junctions: usize,
}

#[derive(Serialize)]
struct NetworkView {
    nodes: usize,
    edges: usize,
    junctions: usize,
    network: FeatureCollection,
}

#[derive(Debug, Deserialize)]
struct RouteQuery {
    from_lat: f64,
    from_lon: f64,
    to_lat: f64,
    to_lon: f64,
}

/// Graph node a queried coordinate was snapped onto
#[derive(Serialize)]
struct SnappedPoint {
    lat: f64,
    lon: f64,
    snap_distance_m: f64,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum RouteResponse {
    Ok {
        distance_m: f64,
        from: SnappedPoint,
        to: SnappedPoint,
        #[serde(skip_serializing_if = "Option::is_none")]
        route: Option<Feature>,
    },
    NoRoute,
    Unavailable,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Current network as GeoJSON, one feature per edge, with counts
async fn network(State(state): State<AppState>) -> Json<NetworkView> {
    let graph = state.snapshot().await;
    Json(NetworkView {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        junctions: graph.junction_count(),
        network: graph.to_geojson(),
    })
}

/// Replaces the road network with the posted GeoJSON collection. The
/// graph is rebuilt from scratch and swapped in atomically; in-flight
/// route requests keep the network they started with.
async fn load_roads(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<LoadSummary>, (StatusCode, Json<ErrorBody>)> {
    let roads = roads_from_geojson(&body).map_err(bad_input)?;
    let config = state.snapshot().await.config().clone();

    let road_count = roads.len();
    let graph = tokio::task::spawn_blocking(move || build_road_graph(&roads, &config))
        .await
        .map_err(internal)?
        .map_err(bad_input)?;

    let summary = LoadSummary {
        roads: road_count,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        junctions: graph.junction_count(),
    };
    info!(
        roads = summary.roads,
        nodes = summary.nodes,
        edges = summary.edges,
        "Road network replaced"
    );

    *state.graph.write().await = Arc::new(graph);
    Ok(Json(summary))
}

/// Walking route between two coordinates, snapped onto the network.
///
/// `unavailable` means there was no node to snap to, either because no
/// roads are loaded or because both nodes sit beyond the configured snap
/// cutoff. `no_route` means the snapped endpoints are not connected.
async fn route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteResponse>, (StatusCode, Json<ErrorBody>)> {
    for (lat, lon) in [
        (query.from_lat, query.from_lon),
        (query.to_lat, query.to_lon),
    ] {
        if !is_valid_lat_lon(lat, lon) {
            return Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorBody {
                    error: format!("Coordinate ({lat}, {lon}) is out of range"),
                }),
            ));
        }
    }

    let graph = state.snapshot().await;
    let from = Point::new(query.from_lon, query.from_lat);
    let to = Point::new(query.to_lon, query.to_lat);

    let Some((source, from_snap)) = graph.nearest_node(from) else {
        return Ok(Json(RouteResponse::Unavailable));
    };
    let Some((target, to_snap)) = graph.nearest_node(to) else {
        return Ok(Json(RouteResponse::Unavailable));
    };

    let result = shortest_path(&graph, source, target).map_err(internal)?;
    if result.is_no_route() {
        debug!("No route between {from:?} and {to:?}");
        return Ok(Json(RouteResponse::NoRoute));
    }

    let from_node = graph.node(source).map_err(internal)?.geometry;
    let to_node = graph.node(target).map_err(internal)?.geometry;
    Ok(Json(RouteResponse::Ok {
        distance_m: result.distance_meters(),
        from: SnappedPoint {
            lat: from_node.y(),
            lon: from_node.x(),
            snap_distance_m: from_snap,
        },
        to: SnappedPoint {
            lat: to_node.y(),
            lon: to_node.x(),
            snap_distance_m: to_snap,
        },
        route: result.to_geojson(),
    }))
}

fn bad_input(error: Error) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}

fn internal<E: std::fmt::Display>(error: E) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: error.to_string(),
        }),
    )
}
