use axum::Router;
use sakay::cache::{DirectionsCache, MemoryDirectionsCache};
use sakay::config::Config;
use sakay::constants::DEFAULT_DIRECTIONS_CACHE_MAX_ENTRIES;
use sakay::models::InfrastructureSnapshot;
use sakay::services::directions::{AuthMode, DirectionsProvider, MapboxDirectionsClient};
use sakay::services::fare_engine::FareEngine;
use sakay::services::infrastructure::{self, SnapshotStore};
use sakay::services::narrator::{HttpNarrator, Narrator, NarratorChain};
use sakay::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sakay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting Sakay fare API server");
    tracing::info!(
        service_area_km = config.fare.service_area_km,
        walk_threshold_km = config.fare.walk_threshold_km,
        "Configuration loaded successfully"
    );

    // Load the infrastructure snapshot; an empty one still prices trips via the fallback formulas
    let snapshot = match config.infrastructure_path {
        Some(ref path) => {
            tracing::info!("Loading infrastructure snapshot from {}", path);
            infrastructure::load_from_file(path).await?
        }
        None => {
            tracing::warn!(
                "INFRASTRUCTURE_PATH not set. Starting empty until PUT /api/v1/infrastructure."
            );
            InfrastructureSnapshot::default()
        }
    };
    let summary = snapshot.summary();
    tracing::info!(
        terminals = summary.terminals,
        transfer_points = summary.transfer_points,
        corridors = summary.corridors,
        fare_tiers = summary.fare_tiers,
        fixed_fares = summary.fixed_fares,
        "Infrastructure snapshot ready"
    );

    // Initialize directions client and cache
    let directions_timeout = Duration::from_millis(config.directions_timeout_ms);
    let directions: Option<Arc<dyn DirectionsProvider>> = match config.mapbox_api_key {
        Some(ref api_key) => {
            let client = if let Some(ref base_url) = config.mapbox_base_url {
                MapboxDirectionsClient::with_config(
                    api_key.clone(),
                    base_url.clone(),
                    AuthMode::BearerHeader,
                    directions_timeout,
                )
            } else {
                MapboxDirectionsClient::new(api_key.clone(), directions_timeout)
            };
            Some(Arc::new(client) as Arc<dyn DirectionsProvider>)
        }
        None => {
            tracing::warn!("MAPBOX_API_KEY not set. Only /trips/compose is available.");
            None
        }
    };
    let directions_cache: Arc<dyn DirectionsCache> = Arc::new(MemoryDirectionsCache::new(
        Duration::from_secs(config.directions_cache_ttl),
        DEFAULT_DIRECTIONS_CACHE_MAX_ENTRIES,
    ));

    // Narration providers, tried in configured order
    let narrators: Vec<Arc<dyn Narrator>> = config
        .narrator_urls
        .iter()
        .map(|url| {
            Arc::new(HttpNarrator::new(url.clone(), config.narrator_api_key.clone()))
                as Arc<dyn Narrator>
        })
        .collect();
    tracing::info!("{} narration providers configured", narrators.len());
    let narrator = NarratorChain::new(
        narrators,
        Duration::from_millis(config.narrator_timeout_ms),
    );

    // Create application state
    let state = Arc::new(AppState {
        snapshots: SnapshotStore::new(snapshot),
        engine: FareEngine::new(config.fare.clone()),
        directions,
        directions_cache,
        narrator,
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", sakay::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
