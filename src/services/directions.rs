use crate::constants::MAX_CANDIDATE_PATHS;
use crate::error::{AppError, Result};
use crate::models::{CandidatePath, GeoPoint, PathLeg};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const MAPBOX_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";
const DRIVING_PROFILE: &str = "driving";

/// Source of candidate driving paths between two points.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn candidate_paths(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<CandidatePath>>;
}

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxDirectionsClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl MapboxDirectionsClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_config(
            api_key,
            MAPBOX_DIRECTIONS_BASE_URL.to_string(),
            AuthMode::DirectToken,
            timeout,
        )
    }

    pub fn with_config(
        api_key: String,
        base_url: String,
        auth_mode: AuthMode,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client with timeout: {}", e);
                Client::new()
            });

        MapboxDirectionsClient {
            client,
            api_key,
            base_url,
            auth_mode,
        }
    }
}

#[async_trait]
impl DirectionsProvider for MapboxDirectionsClient {
    async fn candidate_paths(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Result<Vec<CandidatePath>> {
        // Format coordinates as "lng,lat;lng,lat"
        let url = format!(
            "{}/{}/{},{};{},{}",
            self.base_url,
            DRIVING_PROFILE,
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        );

        tracing::debug!(
            "Directions request: ({:.5}, {:.5}) -> ({:.5}, {:.5})",
            origin.lat,
            origin.lng,
            destination.lat,
            destination.lng
        );

        let mut request = self.client.get(&url).query(&[
            ("alternatives", "true"),
            ("geometries", "geojson"),
            ("overview", "full"),
            ("steps", "false"),
        ]);

        match self.auth_mode {
            AuthMode::DirectToken => {
                request = request.query(&[("access_token", &self.api_key)]);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Directions API HTTP error {}: {}",
                status,
                error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;

        let paths = directions.into_candidate_paths(origin, destination);
        if paths.is_empty() {
            tracing::warn!("Directions provider returned 0 routes");
            return Err(AppError::DirectionsApi("No routes found".to_string()));
        }

        tracing::debug!(
            alternatives = paths.len(),
            "Directions response: {} alternatives",
            paths.len()
        );
        Ok(paths)
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64, // meters
    geometry: MapboxGeometry,
    #[serde(default)]
    legs: Vec<MapboxLeg>,
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
}

impl MapboxDirectionsApiResponse {
    /// One single-leg candidate per route alternative. The requested endpoints are
    /// kept as leg endpoints; the geometry only feeds corridor proximity.
    fn into_candidate_paths(
        self,
        origin: &GeoPoint,
        destination: &GeoPoint,
    ) -> Vec<CandidatePath> {
        self.routes
            .into_iter()
            .take(MAX_CANDIDATE_PATHS)
            .map(|route| {
                let sample_points = route
                    .geometry
                    .coordinates
                    .iter()
                    .filter_map(|coord| GeoPoint::new(coord[1], coord[0]).ok())
                    .collect();
                let summary_label = route
                    .legs
                    .iter()
                    .map(|leg| leg.summary.trim())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");

                CandidatePath::single_leg(PathLeg {
                    start_location: *origin,
                    end_location: *destination,
                    distance_km: route.distance / 1000.0,
                    sample_points,
                    summary_label,
                })
            })
            .collect()
    }
}
