//! Error type for the synchronization walk.

use roster_core::DirectoryError;
use thiserror::Error;

/// A failure that aborts the current tenant's walk.
///
/// Resolver errors never appear here: resolution happens before the walk is
/// spawned and surfaces synchronously to the caller of `synchronize`.
#[derive(Debug, Error)]
pub enum SyncError {
  #[error("directory error: {0}")]
  Directory(#[from] DirectoryError),

  #[error("store error: {0}")]
  Store(Box<dyn std::error::Error + Send + Sync>),
}

impl SyncError {
  /// Wrap a backend-specific store error.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = SyncError> = std::result::Result<T, E>;
