//! The `ClientResolver` trait — tenant to directory-client resolution.
//!
//! Resolution happens once, up front, in the caller's context; the resolved
//! client is then handed into the background walk. Keeping resolution out of
//! the walk means resolver failures stay synchronous and caller-visible.

use std::future::Future;

use uuid::Uuid;

use crate::{directory::DirectoryClient, error::ResolveError};

/// Resolves a tenant to a ready-to-use [`DirectoryClient`].
pub trait ClientResolver: Send + Sync {
  type Client: DirectoryClient + Send + Sync + 'static;

  /// Look up the tenant's remote account and build a client for it.
  fn resolve(
    &self,
    tenant_id: Uuid,
  ) -> impl Future<Output = Result<Self::Client, ResolveError>> + Send + '_;
}
