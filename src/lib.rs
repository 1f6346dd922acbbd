// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::DirectionsCache;
use services::directions::DirectionsProvider;
use services::fare_engine::FareEngine;
use services::infrastructure::SnapshotStore;
use services::narrator::NarratorChain;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub snapshots: SnapshotStore,
    pub engine: FareEngine,
    /// Absent when no directions API key is configured; `/trips/compose` still works
    pub directions: Option<Arc<dyn DirectionsProvider>>,
    pub directions_cache: Arc<dyn DirectionsCache>,
    pub narrator: NarratorChain,
}
