//! Follower synchronization pipeline.
//!
//! Pulls a remote platform's full follower list through the paginated
//! [`DirectoryClient`](roster_core::directory::DirectoryClient) seam,
//! enriches identifiers with profile details in bounded batches, and
//! reconciles the result against a [`FollowerStore`](roster_core::store::FollowerStore)
//! with insert-or-update semantics.
//!
//! The walk is fire-and-forget: [`FollowerService::synchronize`] resolves
//! the tenant's client up front, spawns the walk onto the runtime, and
//! returns immediately. Completion and failure are observable through logs
//! (and the returned join handle, for callers that care).

pub mod error;
pub mod reconcile;
pub mod service;
pub mod settings;
pub mod walk;

pub use error::SyncError;
pub use service::FollowerService;
pub use settings::SyncSettings;
pub use walk::WalkOutcome;
