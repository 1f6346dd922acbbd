use crate::cache;
use crate::error::{AppError, Result};
use crate::models::trip::{ComposeTripRequest, PlanTripRequest, PlannedRoute, TripPlanResponse};
use crate::models::{DiscountCategory, ParsedCandidate};
use crate::services::fare_engine::TripPlanBatch;
use crate::services::narrator::describe_plan;
use crate::AppState;
use axum::{extract::State, Json};
use futures::future::join_all;
use std::sync::Arc;

/// POST /trips/plan
/// Fetch candidate paths from the directions provider, then classify and price each one
pub async fn plan_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanTripRequest>,
) -> Result<Json<TripPlanResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        discount = %request.discount,
        "Trip plan request: ({:.4}, {:.4}) -> ({:.4}, {:.4}), discount={}",
        request.origin.lat,
        request.origin.lng,
        request.destination.lat,
        request.destination.lng,
        request.discount
    );

    let directions = state.directions.as_ref().ok_or_else(|| {
        AppError::DirectionsApi("Directions provider is not configured".to_string())
    })?;

    let cache_key = cache::directions_cache_key(&request.origin, &request.destination);
    let candidates = match state.directions_cache.get_cached_paths(&cache_key).await {
        Some(paths) => paths,
        None => {
            let paths = directions
                .candidate_paths(&request.origin, &request.destination)
                .await?;
            state.directions_cache.cache_paths(&cache_key, &paths).await;
            paths
        }
    };

    let candidates = candidates.into_iter().map(Ok).collect();
    let batch = compute_plans(&state, candidates, request.discount).await?;
    Ok(Json(build_response(&state, batch).await))
}

/// POST /trips/compose
/// Classify and price caller-supplied candidate paths without calling the directions provider
pub async fn compose_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ComposeTripRequest>,
) -> Result<Json<TripPlanResponse>> {
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        candidates = request.candidates.len(),
        discount = %request.discount,
        "Trip compose request: {} candidates, discount={}",
        request.candidates.len(),
        request.discount
    );

    let discount = request.discount;
    let batch = compute_plans(&state, request.into_candidates(), discount).await?;
    Ok(Json(build_response(&state, batch).await))
}

/// Run the fare engine off the async runtime against the current snapshot.
async fn compute_plans(
    state: &Arc<AppState>,
    candidates: Vec<ParsedCandidate>,
    discount: DiscountCategory,
) -> Result<TripPlanBatch> {
    let snapshot = state.snapshots.current().await;
    let state = Arc::clone(state);

    tokio::task::spawn_blocking(move || state.engine.plan_parsed(&candidates, &snapshot, discount))
    .await
    .map_err(|e| AppError::Internal(format!("Fare computation task failed: {}", e)))?
}

async fn build_response(state: &AppState, batch: TripPlanBatch) -> TripPlanResponse {
    let narrations = join_all(batch.plans.iter().map(|(_, plan)| async move {
        if plan.is_out_of_service_area() {
            return None;
        }
        state.narrator.narrate(plan).await.ok()
    }))
    .await;

    let routes = batch
        .plans
        .into_iter()
        .zip(narrations)
        .map(|((index, plan), narration)| PlannedRoute {
            index,
            description: describe_plan(&plan),
            plan,
            narration,
        })
        .collect();

    TripPlanResponse {
        routes,
        selection: batch.selection,
        dropped_candidates: batch.dropped,
    }
}
