//! The `DirectoryClient` trait — the remote platform's follower directory.
//!
//! Implementations live outside this workspace (each remote platform ships
//! its own); the sync pipeline consumes the trait only.

use std::future::Future;

use crate::{error::DirectoryError, follower::FollowerProfile};

/// One page of the remote identifier listing.
#[derive(Debug, Clone, Default)]
pub struct IdentifierPage {
  /// External identifiers in the order the remote returned them.
  pub identifiers: Vec<String>,
  /// Continuation token for the next page. `None` means the listing is
  /// exhausted.
  pub next_cursor: Option<String>,
}

/// A handle onto one tenant's remote follower directory.
pub trait DirectoryClient: Send + Sync {
  /// Fetch one page of external identifiers starting at `cursor`
  /// (`None` starts from the beginning).
  fn list_identifiers<'a>(
    &'a self,
    cursor: Option<&'a str>,
  ) -> impl Future<Output = Result<IdentifierPage, DirectoryError>> + Send + 'a;

  /// Fetch full profiles for a set of identifiers.
  ///
  /// Callers must keep `ids` within the remote API's batch limit; the
  /// pagination driver chunks accordingly before calling.
  fn fetch_details<'a>(
    &'a self,
    ids: &'a [String],
  ) -> impl Future<Output = Result<Vec<FollowerProfile>, DirectoryError>> + Send + 'a;
}
