//! Snapshot store
//!
//! Keeps versioned metadata snapshots per environment so runs can be
//! compared against earlier captures. In-memory only: persistence of
//! environment data is the calling application's concern.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::error::{CompareError, CompareResult};
use crate::metadata::MetadataSnapshot;

/// Lightweight snapshot descriptor, used for listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub id: Uuid,
    pub environment_id: Uuid,
    pub version: u64,
    pub collected_at: DateTime<Utc>,
    pub checksum: String,
    pub item_count: usize,
}

impl From<&MetadataSnapshot> for SnapshotInfo {
    fn from(snapshot: &MetadataSnapshot) -> Self {
        Self {
            id: snapshot.id,
            environment_id: snapshot.environment.id,
            version: snapshot.version,
            collected_at: snapshot.collected_at,
            checksum: snapshot.checksum.clone(),
            item_count: snapshot.item_count(),
        }
    }
}

/// Store for versioned metadata snapshots
#[derive(Debug, Default)]
pub struct SnapshotStore {
    /// Environment id -> (version -> snapshot)
    snapshots: RwLock<HashMap<Uuid, HashMap<u64, MetadataSnapshot>>>,
    /// Environment id -> latest version number
    versions: RwLock<HashMap<Uuid, u64>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot, auto-incrementing the environment's version
    pub async fn save(&self, mut snapshot: MetadataSnapshot) -> MetadataSnapshot {
        let environment_id = snapshot.environment.id;

        let mut versions = self.versions.write().await;
        let new_version = versions.get(&environment_id).copied().unwrap_or(0) + 1;
        snapshot.version = new_version;
        versions.insert(environment_id, new_version);

        let mut snapshots = self.snapshots.write().await;
        snapshots
            .entry(environment_id)
            .or_default()
            .insert(new_version, snapshot.clone());

        info!(
            environment = %snapshot.environment.display_name,
            version = new_version,
            items = snapshot.item_count(),
            "saved metadata snapshot"
        );

        snapshot
    }

    /// Latest snapshot for an environment
    pub async fn get_latest(&self, environment_id: Uuid) -> Option<MetadataSnapshot> {
        let versions = self.versions.read().await;
        let version = versions.get(&environment_id)?;

        let snapshots = self.snapshots.read().await;
        snapshots.get(&environment_id)?.get(version).cloned()
    }

    /// Specific snapshot version for an environment
    pub async fn get_version(
        &self,
        environment_id: Uuid,
        version: u64,
    ) -> Option<MetadataSnapshot> {
        let snapshots = self.snapshots.read().await;
        snapshots.get(&environment_id)?.get(&version).cloned()
    }

    /// List an environment's snapshots, newest first (metadata only)
    pub async fn list(&self, environment_id: Uuid) -> Vec<SnapshotInfo> {
        let snapshots = self.snapshots.read().await;

        snapshots
            .get(&environment_id)
            .map(|by_version| {
                let mut list: Vec<_> = by_version.values().map(SnapshotInfo::from).collect();
                list.sort_by(|a, b| b.version.cmp(&a.version));
                list
            })
            .unwrap_or_default()
    }

    /// Delete old snapshots, keeping the last `keep_versions`
    pub async fn prune(&self, environment_id: Uuid, keep_versions: usize) -> usize {
        let mut snapshots = self.snapshots.write().await;
        let Some(by_version) = snapshots.get_mut(&environment_id) else {
            return 0;
        };
        if by_version.len() <= keep_versions {
            return 0;
        }

        let mut versions: Vec<_> = by_version.keys().copied().collect();
        versions.sort_by(|a, b| b.cmp(a));

        let to_remove: Vec<_> = versions.into_iter().skip(keep_versions).collect();
        let removed = to_remove.len();
        for version in to_remove {
            by_version.remove(&version);
        }

        info!(
            environment = %environment_id,
            removed,
            "pruned old snapshots"
        );
        removed
    }

    /// Fetch two versions of one environment for comparison
    pub async fn compare_versions(
        &self,
        environment_id: Uuid,
        from_version: u64,
        to_version: u64,
    ) -> CompareResult<(MetadataSnapshot, MetadataSnapshot)> {
        let from = self
            .get_version(environment_id, from_version)
            .await
            .ok_or_else(|| {
                CompareError::NotFound(format!("Snapshot v{from_version} not found"))
            })?;
        let to = self
            .get_version(environment_id, to_version)
            .await
            .ok_or_else(|| CompareError::NotFound(format!("Snapshot v{to_version} not found")))?;

        Ok((from, to))
    }
}
