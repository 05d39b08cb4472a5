use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::DiscoveryError;
use crate::models::Place;
use crate::services::discovery_service::{
    self, DiscoveryQuery, DiscoveryResponse, StatsResponse,
};
use crate::web::AppState;

pub async fn discover_handler(
    State(state): State<AppState>,
    Query(query): Query<DiscoveryQuery>,
) -> Result<Json<DiscoveryResponse>, DiscoveryError> {
    let response = discovery_service::discover(&state.repo, &state.config, &query)?;
    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub total: usize,
}

pub async fn categories_handler(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let categories = discovery_service::available_categories(&state.repo);
    let total = categories.len();
    Json(CategoriesResponse { categories, total })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(discovery_service::statistics(&state.repo, &state.config))
}

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub place: Option<Place>,
}

pub async fn nearest_handler(
    State(state): State<AppState>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<NearestResponse>, DiscoveryError> {
    let place = discovery_service::find_nearest(
        &state.repo,
        &state.config,
        query.latitude,
        query.longitude,
        query.category,
    )?;
    Ok(Json(NearestResponse { place }))
}
