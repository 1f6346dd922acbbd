use crate::error::{AppError, Result};
use crate::models::{InfrastructureRecords, InfrastructureSnapshot, SnapshotSummary};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read an exported infrastructure JSON file into a snapshot.
pub async fn load_from_file(path: impl AsRef<Path>) -> Result<InfrastructureSnapshot> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Snapshot(format!("Failed to read {}: {}", path.display(), e)))?;

    let records: InfrastructureRecords = serde_json::from_str(&raw)
        .map_err(|e| AppError::Snapshot(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(records.into_snapshot())
}

/// Holds the current snapshot. Readers get a cheap `Arc` clone; a replacement swaps
/// the `Arc` so computations already running keep their own view.
pub struct SnapshotStore {
    current: RwLock<Arc<InfrastructureSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: InfrastructureSnapshot) -> Self {
        SnapshotStore {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub async fn current(&self) -> Arc<InfrastructureSnapshot> {
        self.current.read().await.clone()
    }

    pub async fn replace(&self, snapshot: InfrastructureSnapshot) -> SnapshotSummary {
        let summary = snapshot.summary();
        *self.current.write().await = Arc::new(snapshot);
        tracing::info!(
            terminals = summary.terminals,
            transfer_points = summary.transfer_points,
            corridors = summary.corridors,
            "Infrastructure snapshot replaced"
        );
        summary
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(InfrastructureSnapshot::default())
    }
}
