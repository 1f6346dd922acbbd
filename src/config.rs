use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: Option<String>, // Without it only /trips/compose is usable
    pub mapbox_base_url: Option<String>,
    pub infrastructure_path: Option<String>,
    pub directions_cache_ttl: u64,
    pub directions_timeout_ms: u64,
    pub narrator_urls: Vec<String>,
    pub narrator_api_key: Option<String>,
    pub narrator_timeout_ms: u64,
    pub fare: FareConfig,
}

/// Proximity thresholds used by the fare engine.
///
/// Degree-space values are compared against `degree_proximity`, kilometer values
/// against haversine distances.
#[derive(Debug, Clone, PartialEq)]
pub struct FareConfig {
    /// Trips longer than this (km) are out of the service area
    pub service_area_km: f64,

    /// A point within this many degrees of a corridor vertex is on the corridor
    pub corridor_threshold_deg: f64,

    /// An origin within this many degrees of a terminal departs from that terminal
    pub at_terminal_threshold_deg: f64,

    /// A destination within this many degrees of a fixed fare row matches it
    pub same_zone_threshold_deg: f64,

    /// Drop-offs closer than this (km) to the alighting point become walk legs
    pub walk_threshold_km: f64,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            service_area_km: DEFAULT_SERVICE_AREA_KM,
            corridor_threshold_deg: DEFAULT_CORRIDOR_THRESHOLD_DEG,
            at_terminal_threshold_deg: DEFAULT_AT_TERMINAL_THRESHOLD_DEG,
            same_zone_threshold_deg: DEFAULT_SAME_ZONE_THRESHOLD_DEG,
            walk_threshold_km: DEFAULT_WALK_THRESHOLD_KM,
        }
    }
}

impl FareConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            service_area_km: env::var("FARE_SERVICE_AREA_KM")
                .unwrap_or_else(|_| defaults.service_area_km.to_string())
                .parse()
                .map_err(|_| "Invalid FARE_SERVICE_AREA_KM")?,

            corridor_threshold_deg: env::var("FARE_CORRIDOR_THRESHOLD_DEG")
                .unwrap_or_else(|_| defaults.corridor_threshold_deg.to_string())
                .parse()
                .map_err(|_| "Invalid FARE_CORRIDOR_THRESHOLD_DEG")?,

            at_terminal_threshold_deg: env::var("FARE_AT_TERMINAL_THRESHOLD_DEG")
                .unwrap_or_else(|_| defaults.at_terminal_threshold_deg.to_string())
                .parse()
                .map_err(|_| "Invalid FARE_AT_TERMINAL_THRESHOLD_DEG")?,

            same_zone_threshold_deg: env::var("FARE_SAME_ZONE_THRESHOLD_DEG")
                .unwrap_or_else(|_| defaults.same_zone_threshold_deg.to_string())
                .parse()
                .map_err(|_| "Invalid FARE_SAME_ZONE_THRESHOLD_DEG")?,

            walk_threshold_km: env::var("FARE_WALK_THRESHOLD_KM")
                .unwrap_or_else(|_| defaults.walk_threshold_km.to_string())
                .parse()
                .map_err(|_| "Invalid FARE_WALK_THRESHOLD_KM")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        let checks = [
            ("FARE_SERVICE_AREA_KM", self.service_area_km),
            ("FARE_CORRIDOR_THRESHOLD_DEG", self.corridor_threshold_deg),
            ("FARE_AT_TERMINAL_THRESHOLD_DEG", self.at_terminal_threshold_deg),
            ("FARE_SAME_ZONE_THRESHOLD_DEG", self.same_zone_threshold_deg),
            ("FARE_WALK_THRESHOLD_KM", self.walk_threshold_km),
        ];

        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be a positive number", name));
            }
        }

        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let narrator_urls = env::var("NARRATOR_URLS")
            .map(|urls| {
                urls.split(',')
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").ok(),
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            infrastructure_path: env::var("INFRASTRUCTURE_PATH").ok(),
            directions_cache_ttl: env::var("DIRECTIONS_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_DIRECTIONS_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid DIRECTIONS_CACHE_TTL")?,
            directions_timeout_ms: env::var("DIRECTIONS_TIMEOUT_MS")
                .unwrap_or_else(|_| DEFAULT_DIRECTIONS_TIMEOUT_MS.to_string())
                .parse()
                .map_err(|_| "Invalid DIRECTIONS_TIMEOUT_MS")?,
            narrator_urls,
            narrator_api_key: env::var("NARRATOR_API_KEY").ok(),
            narrator_timeout_ms: env::var("NARRATOR_TIMEOUT_MS")
                .unwrap_or_else(|_| DEFAULT_NARRATOR_TIMEOUT_MS.to_string())
                .parse()
                .map_err(|_| "Invalid NARRATOR_TIMEOUT_MS")?,
            fare: FareConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
