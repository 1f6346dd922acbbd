use crate::models::{InfrastructureRecords, SnapshotSummary};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// PUT /infrastructure
/// Replace the snapshot used by subsequent trip computations
pub async fn replace_infrastructure(
    State(state): State<Arc<AppState>>,
    Json(records): Json<InfrastructureRecords>,
) -> Json<SnapshotSummary> {
    let snapshot = records.into_snapshot();
    Json(state.snapshots.replace(snapshot).await)
}

/// GET /infrastructure/summary
pub async fn infrastructure_summary(State(state): State<Arc<AppState>>) -> Json<SnapshotSummary> {
    Json(state.snapshots.current().await.summary())
}
