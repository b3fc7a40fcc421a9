//! [`FollowerService`] — the operations exposed to the surrounding system.
//!
//! Collaborators are injected at construction time; nothing is resolved
//! lazily, so there is no initialisation-order dependency between the
//! resolver and the service.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use roster_core::{
  ResolveError,
  follower::{FollowerPageQuery, FollowerRecord, Page},
  resolver::ClientResolver,
  store::FollowerStore,
};

use crate::{
  settings::SyncSettings,
  walk::{WalkOutcome, walk},
};

/// Follower operations over an injected resolver and store.
pub struct FollowerService<R, S> {
  resolver: R,
  store:    Arc<S>,
  settings: SyncSettings,
}

impl<R, S> FollowerService<R, S>
where
  R: ClientResolver,
  S: FollowerStore + 'static,
{
  pub fn new(resolver: R, store: Arc<S>, settings: SyncSettings) -> Self {
    Self { resolver, store, settings }
  }

  // ── Synchronization ───────────────────────────────────────────────────────

  /// Kick off a full re-synchronization of `tenant_id`'s followers.
  ///
  /// The tenant's client is resolved here, in the caller's context, so an
  /// unknown account or bad credential fails fast. The walk itself runs as
  /// a detached task: the caller gets control back immediately, and the
  /// returned handle is the only completion channel — dropping it is the
  /// normal fire-and-forget mode.
  pub async fn synchronize(
    &self,
    tenant_id: Uuid,
  ) -> Result<JoinHandle<WalkOutcome>, ResolveError> {
    let client = self.resolver.resolve(tenant_id).await?;
    let store = Arc::clone(&self.store);
    let settings = self.settings.clone();

    Ok(tokio::spawn(async move {
      let outcome = walk(&client, store.as_ref(), tenant_id, &settings).await;
      match &outcome {
        WalkOutcome::Completed { pages, inserted, updated } => {
          info!(%tenant_id, pages, inserted, updated, "follower walk completed");
        }
        WalkOutcome::Aborted { pages } => {
          warn!(%tenant_id, pages, "follower walk aborted");
        }
        WalkOutcome::CeilingReached => {
          warn!(%tenant_id, "follower walk hit the listing-call ceiling");
        }
      }
      outcome
    }))
  }

  // ── Unsubscribe ───────────────────────────────────────────────────────────

  /// Flip one follower to unsubscribed, setting the unsubscribe timestamp
  /// and leaving every other attribute untouched.
  ///
  /// Driven by external unsubscribe notifications, which may arrive more
  /// than once or for identifiers never synced — absence is logged and
  /// swallowed, not an error.
  pub async fn mark_unsubscribed(
    &self,
    tenant_id: Uuid,
    external_id: &str,
  ) -> Result<(), S::Error> {
    let changed = self
      .store
      .set_unsubscribed(tenant_id, external_id, Utc::now())
      .await?;
    if !changed {
      warn!(%tenant_id, external_id, "unsubscribe for unknown follower ignored");
    }
    Ok(())
  }

  // ── Read pass-throughs ────────────────────────────────────────────────────

  pub async fn get(&self, id: i64) -> Result<Option<FollowerRecord>, S::Error> {
    self.store.get(id).await
  }

  pub async fn get_by_key(
    &self,
    tenant_id: Uuid,
    external_id: &str,
  ) -> Result<Option<FollowerRecord>, S::Error> {
    self.store.get_by_key(tenant_id, external_id).await
  }

  pub async fn list(&self, ids: &[i64]) -> Result<Vec<FollowerRecord>, S::Error> {
    self.store.list(ids).await
  }

  pub async fn page(
    &self,
    tenant_id: Uuid,
    query: &FollowerPageQuery,
  ) -> Result<Page<FollowerRecord>, S::Error> {
    self.store.page(tenant_id, query).await
  }
}
