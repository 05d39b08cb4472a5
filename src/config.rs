use std::env;
use std::str::FromStr;

/// Tuning knobs for the discovery pipeline. Everything is optional in the
/// environment and falls back to the stated defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoveryConfig {
    pub default_radius_km: f64,
    pub max_radius_km: f64,
    pub max_results: usize,
    pub default_limit: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        DiscoveryConfig {
            default_radius_km: 5.0,
            max_radius_km: 50.0,
            max_results: 50,
            default_limit: 10,
        }
    }
}

impl DiscoveryConfig {
    pub fn from_env() -> Self {
        let defaults = DiscoveryConfig::default();
        DiscoveryConfig {
            default_radius_km: env_or("DEFAULT_RADIUS_KM", defaults.default_radius_km),
            max_radius_km: env_or("MAX_RADIUS_KM", defaults.max_radius_km),
            max_results: env_or("MAX_RESULTS", defaults.max_results),
            default_limit: env_or("DEFAULT_LIMIT", defaults.default_limit),
        }
    }
}

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}
