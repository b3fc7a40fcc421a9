//! Error types for the external seams consumed by the sync pipeline.

use thiserror::Error;
use uuid::Uuid;

/// Failure reported by the remote directory (listing or detail endpoint).
///
/// Any variant aborts the current tenant's walk; nothing here is retried.
#[derive(Debug, Error)]
pub enum DirectoryError {
  /// The remote API answered with an error payload.
  #[error("remote protocol error {code}: {message}")]
  Protocol { code: i32, message: String },

  /// The remote could not be reached at all.
  #[error("transport error: {0}")]
  Transport(String),
}

/// Failure resolving a tenant to a usable directory client.
///
/// Unlike [`DirectoryError`], these surface synchronously to the caller of
/// `synchronize` — they happen before any background work is spawned.
#[derive(Debug, Error)]
pub enum ResolveError {
  #[error("no remote account configured for tenant {0}")]
  AccountNotFound(Uuid),

  #[error("credential for tenant {0} is invalid or expired")]
  InvalidCredential(Uuid),
}
