//! Batch reconciler — insert-or-update for one chunk of fetched profiles.

use std::collections::HashMap;

use roster_core::{
  follower::{FollowerProfile, FollowerRecord, NewFollower},
  store::FollowerStore,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, SyncError};

/// Write counts for one reconciled chunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChunkOutcome {
  pub inserted: usize,
  pub updated:  usize,
}

/// Reconcile one chunk of freshly fetched profiles against the store.
///
/// One batched lookup decides insert-vs-update for the entire chunk — the
/// read must complete before any write so an identifier already present
/// locally is never inserted a second time. Matched records carry their
/// existing surrogate id forward and are updated individually; everything
/// else lands in a single batch insert.
///
/// Matched records are rewritten even when no attribute changed. The remote
/// is authoritative and the walk keeps no per-record change detection; a
/// compare-before-write pass would cut write volume on full resyncs.
pub async fn reconcile<S: FollowerStore>(
  store: &S,
  tenant_id: Uuid,
  profiles: Vec<FollowerProfile>,
) -> Result<ChunkOutcome> {
  if profiles.is_empty() {
    return Ok(ChunkOutcome::default());
  }

  let keys: Vec<String> =
    profiles.iter().map(|p| p.external_id.clone()).collect();
  let existing = store
    .get_by_keys(tenant_id, &keys)
    .await
    .map_err(SyncError::store)?;
  let by_external_id: HashMap<&str, &FollowerRecord> = existing
    .iter()
    .map(|r| (r.external_id.as_str(), r))
    .collect();

  let mut outcome = ChunkOutcome::default();
  let mut to_insert = Vec::new();

  for profile in profiles {
    let fresh = NewFollower::from_profile(tenant_id, profile);
    match by_external_id.get(fresh.external_id.as_str()) {
      Some(current) => {
        let record = fresh.into_record(current.id);
        store.update(&record).await.map_err(SyncError::store)?;
        outcome.updated += 1;
      }
      None => to_insert.push(fresh),
    }
  }

  if !to_insert.is_empty() {
    outcome.inserted = to_insert.len();
    store
      .insert_batch(to_insert)
      .await
      .map_err(SyncError::store)?;
  }

  debug!(
    %tenant_id,
    inserted = outcome.inserted,
    updated = outcome.updated,
    "chunk reconciled"
  );
  Ok(outcome)
}
