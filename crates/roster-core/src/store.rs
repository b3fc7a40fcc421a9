//! The `FollowerStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The sync pipeline (`roster-sync`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::follower::{
  FollowerPageQuery, FollowerRecord, NewFollower, Page,
};

/// Abstraction over a follower store backend.
///
/// The backend owns the `(tenant_id, external_id)` uniqueness guarantee:
/// concurrent writes for the same identity key must not produce duplicate
/// rows. This crate performs no locking of its own.
///
/// All methods return `Send` futures so the trait can be used from spawned
/// tokio tasks.
pub trait FollowerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Keyed reads ───────────────────────────────────────────────────────

  /// Retrieve a record by surrogate id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<FollowerRecord>, Self::Error>> + Send + '_;

  /// Retrieve a record by its natural key. Returns `None` if not found.
  fn get_by_key<'a>(
    &'a self,
    tenant_id: Uuid,
    external_id: &'a str,
  ) -> impl Future<Output = Result<Option<FollowerRecord>, Self::Error>> + Send + 'a;

  /// Retrieve records for a set of surrogate ids. Unknown ids are skipped.
  fn list<'a>(
    &'a self,
    ids: &'a [i64],
  ) -> impl Future<Output = Result<Vec<FollowerRecord>, Self::Error>> + Send + 'a;

  /// Retrieve all records for a tenant whose external identifier appears in
  /// `external_ids`, in a single query.
  ///
  /// The reconciler calls this once per chunk; it is the read side of the
  /// read-before-write ordering that keeps the pipeline duplicate-free.
  fn get_by_keys<'a>(
    &'a self,
    tenant_id: Uuid,
    external_ids: &'a [String],
  ) -> impl Future<Output = Result<Vec<FollowerRecord>, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert a single record and return its store-assigned surrogate id.
  fn insert(
    &self,
    follower: NewFollower,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  /// Insert a batch of records in one write.
  fn insert_batch(
    &self,
    followers: Vec<NewFollower>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Overwrite every attribute of an existing record, keyed by its
  /// surrogate id.
  fn update<'a>(
    &'a self,
    record: &'a FollowerRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Flip a record to unsubscribed, touching only the status and the
  /// unsubscribe timestamp. Returns `false` when no record exists for the
  /// key — absence is the caller's concern, not an error.
  fn set_unsubscribed<'a>(
    &'a self,
    tenant_id: Uuid,
    external_id: &'a str,
    at: DateTime<Utc>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Paged reads ───────────────────────────────────────────────────────

  /// Page through a tenant's followers with optional filters.
  fn page<'a>(
    &'a self,
    tenant_id: Uuid,
    query: &'a FollowerPageQuery,
  ) -> impl Future<Output = Result<Page<FollowerRecord>, Self::Error>> + Send + 'a;
}
