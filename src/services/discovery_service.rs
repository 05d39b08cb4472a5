use std::cmp::Ordering;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::geo::{self, Coordinates};
use crate::models::{Category, Place};
use crate::repository::PlaceRepository;

#[derive(Debug, Deserialize, Default)]
pub struct DiscoveryQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: Option<f64>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

/// The query as actually executed, after defaulting and clamping. Echoed
/// back in the response.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub processing_time_ms: u64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    pub results: Vec<Place>,
    pub total: usize,
    pub query: EffectiveQuery,
    pub metadata: ResponseMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStats {
    pub total_places: usize,
    pub categories_count: usize,
    pub open_places: usize,
    pub closed_places: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEcho {
    pub default_radius_km: f64,
    pub max_radius_km: f64,
    pub max_results: usize,
    pub default_limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub data_stats: DataStats,
    pub config: ConfigEcho,
}

/// Bounds-checks the query before any repository access. Returns the parsed
/// category so the repository can pre-filter on it. The range comparisons
/// are written so NaN fails them.
pub fn validate(
    query: &DiscoveryQuery,
    config: &DiscoveryConfig,
) -> Result<Option<Category>, DiscoveryError> {
    if !(query.latitude >= -90.0 && query.latitude <= 90.0) {
        return Err(DiscoveryError::InvalidArgument(format!(
            "latitude must be between -90 and 90, got {}",
            query.latitude
        )));
    }

    if !(query.longitude >= -180.0 && query.longitude <= 180.0) {
        return Err(DiscoveryError::InvalidArgument(format!(
            "longitude must be between -180 and 180, got {}",
            query.longitude
        )));
    }

    if let Some(radius) = query.radius {
        if !(radius >= 0.1 && radius <= config.max_radius_km) {
            return Err(DiscoveryError::InvalidArgument(format!(
                "radius must be between 0.1 and {}, got {}",
                config.max_radius_km, radius
            )));
        }
    }

    if let Some(limit) = query.limit {
        if limit < 1 || limit > config.max_results {
            return Err(DiscoveryError::InvalidArgument(format!(
                "limit must be between 1 and {}, got {}",
                config.max_results, limit
            )));
        }
    }

    let category = match &query.category {
        Some(raw) => Some(raw.parse::<Category>().map_err(|_| {
            DiscoveryError::InvalidArgument(format!(
                "category must be one of {}, got '{}'",
                Category::ALL.map(|c| c.as_str()).join(", "),
                raw
            ))
        })?),
        None => None,
    };

    Ok(category)
}

/// The discovery pipeline: validate, annotate distances, filter to the
/// radius, sort ascending, truncate to the limit.
pub fn discover(
    repo: &PlaceRepository,
    config: &DiscoveryConfig,
    query: &DiscoveryQuery,
) -> Result<DiscoveryResponse, DiscoveryError> {
    let started = Instant::now();
    let category = validate(query, config)?;

    let radius = query.radius.unwrap_or(config.default_radius_km);
    let limit = query
        .limit
        .unwrap_or(config.default_limit)
        .min(config.max_results);
    let center = Coordinates::new(query.latitude, query.longitude);

    let mut results: Vec<Place> = repo
        .list_places(category)
        .into_iter()
        .map(|mut place| {
            place.distance_km = geo::distance_km(center, place.location);
            place
        })
        .filter(|place| place.distance_km <= radius)
        .collect();

    // Stable sort: equal distances keep repository order.
    results.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    results.truncate(limit);

    debug!(
        "📍 discover: {} places within {:.1} km of {:.4},{:.4}",
        results.len(),
        radius,
        query.latitude,
        query.longitude
    );

    Ok(DiscoveryResponse {
        // Count after truncation, matching the behavior of the original
        // endpoint this replaces.
        total: results.len(),
        query: EffectiveQuery {
            latitude: query.latitude,
            longitude: query.longitude,
            radius,
            category,
            limit,
        },
        metadata: ResponseMetadata {
            processing_time_ms: started.elapsed().as_millis() as u64,
            timestamp: Utc::now().to_rfc3339(),
        },
        results,
    })
}

/// Closest place to the given point within the maximum radius, if any.
/// Nothing in range is `Ok(None)`, not an error.
pub fn find_nearest(
    repo: &PlaceRepository,
    config: &DiscoveryConfig,
    latitude: f64,
    longitude: f64,
    category: Option<String>,
) -> Result<Option<Place>, DiscoveryError> {
    let query = DiscoveryQuery {
        latitude,
        longitude,
        radius: Some(config.max_radius_km),
        category,
        limit: Some(1),
    };
    let response = discover(repo, config, &query)?;
    Ok(response.results.into_iter().next())
}

/// Distinct categories present in the repository, in fixture order.
pub fn available_categories(repo: &PlaceRepository) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for place in repo.list_places(None) {
        let name = place.category.to_string();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

pub fn statistics(repo: &PlaceRepository, config: &DiscoveryConfig) -> StatsResponse {
    let places = repo.list_places(None);
    let open_places = places.iter().filter(|p| p.open_now).count();

    StatsResponse {
        data_stats: DataStats {
            total_places: places.len(),
            categories_count: available_categories(repo).len(),
            open_places,
            closed_places: places.len() - open_places,
        },
        config: ConfigEcho {
            default_radius_km: config.default_radius_km,
            max_radius_km: config.max_radius_km,
            max_results: config.max_results,
            default_limit: config.default_limit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lower Manhattan, near most of the fixture set.
    const CITY_HALL: (f64, f64) = (40.7128, -74.0060);

    fn query(latitude: f64, longitude: f64) -> DiscoveryQuery {
        DiscoveryQuery {
            latitude,
            longitude,
            ..Default::default()
        }
    }

    fn setup() -> (PlaceRepository, DiscoveryConfig) {
        (PlaceRepository::new(), DiscoveryConfig::default())
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        let (_, config) = setup();
        let err = validate(&query(91.0, 0.0), &config).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidArgument(ref m) if m.contains("latitude")));
    }

    #[test]
    fn rejects_longitude_out_of_range() {
        let (_, config) = setup();
        let err = validate(&query(0.0, -181.0), &config).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidArgument(ref m) if m.contains("longitude")));
    }

    #[test]
    fn rejects_radius_below_minimum() {
        let (_, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.radius = Some(0.05);
        let err = validate(&q, &config).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidArgument(ref m) if m.contains("radius")));
    }

    #[test]
    fn rejects_radius_above_maximum() {
        let (_, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.radius = Some(config.max_radius_km + 1.0);
        assert!(validate(&q, &config).is_err());
    }

    #[test]
    fn rejects_zero_limit() {
        let (_, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.limit = Some(0);
        let err = validate(&q, &config).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidArgument(ref m) if m.contains("limit")));
    }

    #[test]
    fn rejects_nan_latitude() {
        let (_, config) = setup();
        assert!(validate(&query(f64::NAN, 0.0), &config).is_err());
    }

    #[test]
    fn rejects_unknown_category() {
        let (_, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.category = Some("spaceport".to_string());
        let err = validate(&q, &config).unwrap_err();
        assert!(matches!(err, DiscoveryError::InvalidArgument(ref m) if m.contains("category")));
    }

    #[test]
    fn results_stay_within_radius_and_sorted() {
        let (repo, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.radius = Some(5.0);
        let response = discover(&repo, &config, &q).unwrap();

        assert!(!response.results.is_empty());
        for place in &response.results {
            assert!(place.distance_km <= 5.0, "{} too far", place.name);
        }
        for pair in response.results.windows(2) {
            assert!(pair[0].distance_km <= pair[1].distance_km);
        }
        assert_eq!(response.total, response.results.len());
    }

    #[test]
    fn category_filter_only_returns_that_category() {
        let (repo, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.category = Some("Restaurant".to_string());
        q.radius = Some(10.0);
        let response = discover(&repo, &config, &q).unwrap();

        assert!(!response.results.is_empty());
        assert!(response
            .results
            .iter()
            .all(|p| p.category == Category::Restaurant));
    }

    #[test]
    fn limit_truncates_and_total_counts_after_truncation() {
        let (repo, config) = setup();
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.radius = Some(50.0);
        q.limit = Some(3);
        let response = discover(&repo, &config, &q).unwrap();

        assert_eq!(response.results.len(), 3);
        assert_eq!(response.total, 3);
        assert_eq!(response.query.limit, 3);
    }

    #[test]
    fn requested_limit_is_clamped_to_max_results() {
        let (repo, _) = setup();
        let config = DiscoveryConfig {
            max_results: 2,
            ..Default::default()
        };
        let mut q = query(CITY_HALL.0, CITY_HALL.1);
        q.radius = Some(50.0);
        let response = discover(&repo, &config, &q).unwrap();

        assert!(response.results.len() <= 2);
        assert_eq!(response.query.limit, 2);
    }

    #[test]
    fn defaults_applied_when_radius_and_limit_missing() {
        let (repo, config) = setup();
        let response = discover(&repo, &config, &query(CITY_HALL.0, CITY_HALL.1)).unwrap();
        assert_eq!(response.query.radius, config.default_radius_km);
        assert_eq!(response.query.limit, config.default_limit);
    }

    #[test]
    fn repository_distances_stay_untouched() {
        let (repo, config) = setup();
        discover(&repo, &config, &query(CITY_HALL.0, CITY_HALL.1)).unwrap();
        // Base records carry the placeholder, not a query-relative value.
        assert_eq!(repo.get_by_id("p-001").unwrap().distance_km, 0.0);
    }

    #[test]
    fn repeated_queries_are_idempotent() {
        let (repo, config) = setup();
        let q = query(CITY_HALL.0, CITY_HALL.1);
        let first = discover(&repo, &config, &q).unwrap();
        let second = discover(&repo, &config, &q).unwrap();

        assert_eq!(first.total, second.total);
        let ids = |r: &DiscoveryResponse| {
            r.results
                .iter()
                .map(|p| p.id.clone())
                .collect::<Vec<String>>()
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn nearest_returns_closest_place() {
        let (repo, config) = setup();
        let place = find_nearest(&repo, &config, CITY_HALL.0, CITY_HALL.1, None)
            .unwrap()
            .unwrap();
        // Westfield WTC is a few hundred meters from City Hall.
        assert_eq!(place.id, "p-011");
    }

    #[test]
    fn nearest_with_nothing_in_range_is_none() {
        let (repo, config) = setup();
        // Middle of the Atlantic.
        let place = find_nearest(&repo, &config, 30.0, -40.0, None).unwrap();
        assert!(place.is_none());
    }

    #[test]
    fn nearest_respects_category() {
        let (repo, config) = setup();
        let place = find_nearest(
            &repo,
            &config,
            CITY_HALL.0,
            CITY_HALL.1,
            Some("cafe".to_string()),
        )
        .unwrap()
        .unwrap();
        assert_eq!(place.category, Category::Cafe);
    }

    #[test]
    fn categories_are_deduplicated_and_order_stable() {
        let (repo, _) = setup();
        let categories = available_categories(&repo);
        assert_eq!(
            categories,
            vec!["restaurant", "cafe", "park", "museum", "bar", "shopping"]
        );
    }

    #[test]
    fn statistics_counts_add_up() {
        let (repo, config) = setup();
        let stats = statistics(&repo, &config);
        assert_eq!(stats.data_stats.total_places, repo.len());
        assert_eq!(
            stats.data_stats.open_places + stats.data_stats.closed_places,
            stats.data_stats.total_places
        );
        assert_eq!(stats.data_stats.categories_count, 6);
        assert_eq!(stats.config.max_radius_km, config.max_radius_km);
    }
}
