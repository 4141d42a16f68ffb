//! Runtime configuration from environment variables.
//!
//! Unparsable values fall back to their defaults with a warning.

use std::str::FromStr;
use std::time::Duration;

/// Which farm / account the dashboard tracks
#[derive(Debug, Clone, PartialEq)]
pub struct FarmLocation {
    pub farm_id: String,
    pub lat: f64,
    pub lon: f64,
    pub customer_id: String,
}

impl Default for FarmLocation {
    fn default() -> Self {
        Self {
            farm_id: "demo1".to_string(),
            lat: 30.2,
            lon: -97.7,
            customer_id: "demo".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: String,
    pub openweather_api_key: Option<String>,
    pub nessie_api_key: Option<String>,
    pub farm: FarmLocation,
    pub cache_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: "development".to_string(),
            openweather_api_key: None,
            nessie_api_key: None,
            farm: FarmLocation::default(),
            cache_ttl: Duration::from_secs(300),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            environment: non_empty("APP_ENV").unwrap_or(defaults.environment),
            openweather_api_key: non_empty("OPENWEATHER_API_KEY"),
            nessie_api_key: non_empty("NESSIE_API_KEY"),
            farm: FarmLocation {
                farm_id: non_empty("FARM_ID").unwrap_or(defaults.farm.farm_id),
                lat: parse_or(&lookup, "FARM_LAT", defaults.farm.lat),
                lon: parse_or(&lookup, "FARM_LON", defaults.farm.lon),
                customer_id: non_empty("CUSTOMER_ID").unwrap_or(defaults.farm.customer_id),
            },
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "CACHE_TTL_SECS",
                defaults.cache_ttl.as_secs(),
            )),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {:?}", key, raw, default);
                default
            }
        },
    }
}
