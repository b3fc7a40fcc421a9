//! Follower types — the unit of data flowing through the sync pipeline.
//!
//! A follower is keyed by `(tenant_id, external_id)`. The store assigns a
//! surrogate `id` on insert; nothing in this workspace ever fabricates one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Whether the follower is currently subscribed on the remote platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscribeStatus {
  Subscribed,
  Unsubscribed,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// Display attributes returned by the remote detail endpoint for a single
/// external identifier. Held in memory only for the duration of one
/// reconciliation chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerProfile {
  pub external_id:   String,
  pub nickname:      Option<String>,
  pub avatar_url:    Option<String>,
  pub locale:        Option<String>,
  /// Operator-set note carried by the remote platform, if any.
  pub remark:        Option<String>,
  pub status:        SubscribeStatus,
  pub subscribed_at: Option<DateTime<Utc>>,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A follower row as owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowerRecord {
  /// Store-assigned surrogate id. Never reused, never reassigned.
  pub id:              i64,
  pub tenant_id:       Uuid,
  pub external_id:     String,
  pub nickname:        Option<String>,
  pub avatar_url:      Option<String>,
  pub locale:          Option<String>,
  pub remark:          Option<String>,
  pub status:          SubscribeStatus,
  pub subscribed_at:   Option<DateTime<Utc>>,
  pub unsubscribed_at: Option<DateTime<Utc>>,
}

/// Insert shape — a [`FollowerRecord`] minus the surrogate id.
#[derive(Debug, Clone)]
pub struct NewFollower {
  pub tenant_id:     Uuid,
  pub external_id:   String,
  pub nickname:      Option<String>,
  pub avatar_url:    Option<String>,
  pub locale:        Option<String>,
  pub remark:        Option<String>,
  pub status:        SubscribeStatus,
  pub subscribed_at: Option<DateTime<Utc>>,
}

impl NewFollower {
  /// Bind a freshly fetched remote profile to a tenant.
  pub fn from_profile(tenant_id: Uuid, profile: FollowerProfile) -> Self {
    Self {
      tenant_id,
      external_id:   profile.external_id,
      nickname:      profile.nickname,
      avatar_url:    profile.avatar_url,
      locale:        profile.locale,
      remark:        profile.remark,
      status:        profile.status,
      subscribed_at: profile.subscribed_at,
    }
  }

  /// Promote to a full record by attaching an existing surrogate id.
  ///
  /// Used by the reconciler when a record for this identifier already
  /// exists: the fresh attributes replace the stored ones wholesale.
  pub fn into_record(self, id: i64) -> FollowerRecord {
    FollowerRecord {
      id,
      tenant_id:       self.tenant_id,
      external_id:     self.external_id,
      nickname:        self.nickname,
      avatar_url:      self.avatar_url,
      locale:          self.locale,
      remark:          self.remark,
      status:          self.status,
      subscribed_at:   self.subscribed_at,
      unsubscribed_at: None,
    }
  }
}

// ─── Paging ──────────────────────────────────────────────────────────────────

/// Filter parameters for [`FollowerStore::page`](crate::store::FollowerStore::page).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowerPageQuery {
  /// Exact match on the external identifier.
  pub external_id: Option<String>,
  /// Substring match on the nickname.
  pub nickname:    Option<String>,
  pub status:      Option<SubscribeStatus>,
  pub limit:       Option<usize>,
  pub offset:      Option<usize>,
}

/// One page of query results plus the unpaged total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
  pub total: u64,
  pub items: Vec<T>,
}
