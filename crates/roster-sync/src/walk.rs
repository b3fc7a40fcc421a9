//! Pagination driver — the cursor walk over the remote listing.

use roster_core::{directory::DirectoryClient, store::FollowerStore};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
  error::Result,
  reconcile::{ChunkOutcome, reconcile},
  settings::SyncSettings,
};

/// How a synchronization walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
  /// The remote reported an empty page or no further cursor.
  /// `pages` counts the listing calls performed.
  Completed {
    pages:    u32,
    inserted: usize,
    updated:  usize,
  },
  /// A remote or store failure stopped the walk partway. Writes from
  /// earlier chunks stay committed; nothing is rolled back or retried.
  Aborted { pages: u32 },
  /// The listing-call cap was hit before the cursor ran out. Anomalous —
  /// it points at a cyclic or unbounded cursor sequence on the remote.
  CeilingReached,
}

/// Walk the full remote listing for one tenant, reconciling as it goes.
///
/// The loop is bounded by `settings.page_ceiling` so a remote that never
/// returns an empty cursor cannot keep the walk alive forever. Within the
/// walk everything is strictly sequential: one listing call, then each
/// chunk's detail fetch and reconciliation in order, then the next page.
/// Concurrent chunk processing is deliberately avoided to bound load on
/// the remote API.
pub async fn walk<C, S>(
  client: &C,
  store: &S,
  tenant_id: Uuid,
  settings: &SyncSettings,
) -> WalkOutcome
where
  C: DirectoryClient,
  S: FollowerStore,
{
  let mut cursor: Option<String> = None;
  let mut totals = ChunkOutcome::default();

  for pass in 0..settings.page_ceiling {
    info!(
      %tenant_id,
      pass,
      cursor = cursor.as_deref().unwrap_or(""),
      "listing follower identifiers"
    );

    let page = match client.list_identifiers(cursor.as_deref()).await {
      Ok(page) => page,
      Err(e) => {
        error!(%tenant_id, pass, error = %e, "listing failed; aborting walk");
        return WalkOutcome::Aborted { pages: pass };
      }
    };

    if page.identifiers.is_empty() {
      return WalkOutcome::Completed {
        pages:    pass + 1,
        inserted: totals.inserted,
        updated:  totals.updated,
      };
    }

    // chunks() panics on zero; a misconfigured bound degrades to 1.
    for chunk in page.identifiers.chunks(settings.chunk_size.max(1)) {
      match sync_chunk(client, store, tenant_id, chunk).await {
        Ok(o) => {
          totals.inserted += o.inserted;
          totals.updated += o.updated;
        }
        Err(e) => {
          error!(%tenant_id, pass, error = %e, "chunk failed; aborting walk");
          return WalkOutcome::Aborted { pages: pass + 1 };
        }
      }
    }

    match page.next_cursor {
      Some(next) if !next.is_empty() => cursor = Some(next),
      _ => {
        return WalkOutcome::Completed {
          pages:    pass + 1,
          inserted: totals.inserted,
          updated:  totals.updated,
        };
      }
    }
  }

  error!(
    %tenant_id,
    ceiling = settings.page_ceiling,
    "listing-call ceiling reached before the cursor ran out"
  );
  WalkOutcome::CeilingReached
}

/// Fetch details for one bounded chunk of identifiers and reconcile them.
async fn sync_chunk<C, S>(
  client: &C,
  store: &S,
  tenant_id: Uuid,
  chunk: &[String],
) -> Result<ChunkOutcome>
where
  C: DirectoryClient,
  S: FollowerStore,
{
  let profiles = client.fetch_details(chunk).await?;
  reconcile(store, tenant_id, profiles).await
}
