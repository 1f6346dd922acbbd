pub mod debug;
pub mod infrastructure;
pub mod trips;

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/trips/plan", post(trips::plan_trip))
        .route("/trips/compose", post(trips::compose_trip))
        .route("/infrastructure", put(infrastructure::replace_infrastructure))
        .route(
            "/infrastructure/summary",
            get(infrastructure::infrastructure_summary),
        )
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
