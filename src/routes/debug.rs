use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    let summary = state.snapshots.current().await.summary();
    if summary.fare_tiers == 0 && summary.terminals == 0 && summary.transfer_points == 0 {
        // Fares still resolve through the fallback formulas
        status["status"] = json!("degraded");
    }
    status["checks"]["infrastructure"] = json!(summary);

    status["checks"]["directions"] = if state.directions.is_some() {
        json!("configured")
    } else {
        json!("not configured")
    };

    let stats = state.directions_cache.get_stats().await;
    status["checks"]["directions_cache"] = json!({
        "backend": state.directions_cache.backend_name(),
        "stats": stats,
    });

    status["checks"]["narrators"] = json!(state.narrator.len());

    Json(status)
}
