use async_trait::async_trait;
use sakay::cache::MemoryDirectionsCache;
use sakay::config::FareConfig;
use sakay::models::{
    CandidatePath, GeoPoint, InfrastructureRecords, InfrastructureSnapshot, PathLeg, TripPlan,
};
use sakay::services::directions::DirectionsProvider;
use sakay::services::fare_engine::FareEngine;
use sakay::services::infrastructure::SnapshotStore;
use sakay::services::narrator::{Narrator, NarratorChain};
use sakay::{AppError, AppState, Result};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Longitude of the national highway the jeepneys ply, running north-south.
#[allow(dead_code)]
pub const HIGHWAY_LNG: f64 = 121.6000;

#[allow(dead_code)]
pub fn p(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap()
}

/// Records for a small municipality: one jeepney corridor along the highway, one
/// tricycle corridor further east, a TODA terminal with two fixed destinations and
/// two transfer points on the highway.
#[allow(dead_code)]
pub fn municipality_records() -> InfrastructureRecords {
    let highway: Vec<_> = (0..=30)
        .map(|i| json!({"lat": 13.9000 + i as f64 * 0.002, "lng": HIGHWAY_LNG}))
        .collect();
    let tricycle_road: Vec<_> = (0..=20)
        .map(|i| json!({"lat": 13.9000 + i as f64 * 0.002, "lng": 121.6500}))
        .collect();

    serde_json::from_value(json!({
        "terminals": [{
            "id": "term-1",
            "name": "Poblacion Terminal",
            "association_name": "PB-GVMPTODA",
            "barangay": "Poblacion",
            "municipality": "Gumaca",
            "latitude": 13.9300,
            "longitude": 121.6300,
            "transport_type_id": 2
        }],
        "transfer_points": [
            {
                "id": "tp-1",
                "name": "Bayan Junction",
                "barangay": "Poblacion",
                "municipality": "Gumaca",
                "latitude": 13.9100,
                "longitude": 121.6005,
                "type": "junction"
            },
            {
                "id": "tp-2",
                "name": "Diversion Crossing",
                "barangay": "Rosario",
                "municipality": "Gumaca",
                "latitude": 13.9400,
                "longitude": 121.6010,
                "type": "crossing"
            }
        ],
        "jeepney_fares": [
            {"distance_km": 4, "regular_fare": 13.0, "discounted_fare": 10.4},
            {"distance_km": 5, "regular_fare": 15.0, "discounted_fare": 12.0},
            {"distance_km": 6, "regular_fare": 16.75, "discounted_fare": 13.4},
            {"distance_km": 8, "regular_fare": 18.5, "discounted_fare": 14.8}
        ],
        "fixed_fares": [
            {
                "place": "PB-GVMPTODA",
                "location": "Public Market",
                "fare": 25.0,
                "latitude": 13.9500,
                "longitude": 121.6300
            },
            {
                "place": "PB-GVMPTODA",
                "location": "District Hospital",
                "fare": 35.0,
                "latitude": 13.9150,
                "longitude": 121.6450
            }
        ],
        "corridors": [
            {"transport_type_id": 1, "points": highway},
            {"transport_type_id": 2, "points": tricycle_road}
        ]
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn municipality_snapshot() -> InfrastructureSnapshot {
    municipality_records().into_snapshot()
}

/// A single-leg candidate with no road geometry beyond its endpoints.
#[allow(dead_code)]
pub fn straight_path(origin: GeoPoint, destination: GeoPoint, distance_km: f64) -> CandidatePath {
    path_with_samples(origin, destination, distance_km, vec![])
}

#[allow(dead_code)]
pub fn path_with_samples(
    origin: GeoPoint,
    destination: GeoPoint,
    distance_km: f64,
    sample_points: Vec<GeoPoint>,
) -> CandidatePath {
    CandidatePath::single_leg(PathLeg {
        start_location: origin,
        end_location: destination,
        distance_km,
        sample_points,
        summary_label: String::new(),
    })
}

/// Directions provider returning canned paths and counting calls.
#[allow(dead_code)]
pub struct StubDirections {
    pub paths: Vec<CandidatePath>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl StubDirections {
    pub fn new(paths: Vec<CandidatePath>) -> Self {
        StubDirections {
            paths,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectionsProvider for StubDirections {
    async fn candidate_paths(
        &self,
        _origin: &GeoPoint,
        _destination: &GeoPoint,
    ) -> Result<Vec<CandidatePath>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.paths.clone())
    }
}

/// Narrator that always answers with the number of legs.
#[allow(dead_code)]
pub struct LegCountNarrator;

#[async_trait]
impl Narrator for LegCountNarrator {
    async fn narrate(&self, plan: &TripPlan) -> Result<String> {
        Ok(format!("A {}-leg trip.", plan.legs.len()))
    }

    fn name(&self) -> &str {
        "leg-count"
    }
}

#[allow(dead_code)]
pub struct DownNarrator;

#[async_trait]
impl Narrator for DownNarrator {
    async fn narrate(&self, _plan: &TripPlan) -> Result<String> {
        Err(AppError::Narration("service unavailable".to_string()))
    }

    fn name(&self) -> &str {
        "down"
    }
}

#[allow(dead_code)]
pub fn test_state(
    snapshot: InfrastructureSnapshot,
    directions: Option<Arc<dyn DirectionsProvider>>,
    narrators: Vec<Arc<dyn Narrator>>,
) -> Arc<AppState> {
    Arc::new(AppState {
        snapshots: SnapshotStore::new(snapshot),
        engine: FareEngine::new(FareConfig::default()),
        directions,
        directions_cache: Arc::new(MemoryDirectionsCache::new(Duration::from_secs(3600), 100)),
        narrator: NarratorChain::new(narrators, Duration::from_millis(500)),
    })
}
