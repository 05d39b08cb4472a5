use std::sync::Arc;
use std::time::Instant;

use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::DiscoveryConfig;
use crate::repository::PlaceRepository;

pub mod routes;

use routes::{discover, health};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<PlaceRepository>,
    pub config: DiscoveryConfig,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(repo: Arc<PlaceRepository>, config: DiscoveryConfig) -> Self {
        AppState {
            repo,
            config,
            started_at: Instant::now(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/discover", get(discover::discover_handler))
        .route("/discover/categories", get(discover::categories_handler))
        .route("/discover/stats", get(discover::stats_handler))
        .route("/discover/nearest", get(discover::nearest_handler))
        .route("/health", get(health::health_handler))
        .route("/health/detailed", get(health::health_detailed_handler))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
