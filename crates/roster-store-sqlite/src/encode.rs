//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, tenant UUIDs as hyphenated
//! lowercase strings, subscribe status as a lowercase keyword.

use chrono::{DateTime, Utc};
use roster_core::follower::{FollowerRecord, SubscribeStatus};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── SubscribeStatus ─────────────────────────────────────────────────────────

pub fn encode_status(s: SubscribeStatus) -> &'static str {
  match s {
    SubscribeStatus::Subscribed => "subscribed",
    SubscribeStatus::Unsubscribed => "unsubscribed",
  }
}

pub fn decode_status(s: &str) -> Result<SubscribeStatus> {
  match s {
    "subscribed" => Ok(SubscribeStatus::Subscribed),
    "unsubscribed" => Ok(SubscribeStatus::Unsubscribed),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw column values read directly from a `followers` row.
pub struct RawFollower {
  pub id:              i64,
  pub tenant_id:       String,
  pub external_id:     String,
  pub nickname:        Option<String>,
  pub avatar_url:      Option<String>,
  pub locale:          Option<String>,
  pub remark:          Option<String>,
  pub status:          String,
  pub subscribed_at:   Option<String>,
  pub unsubscribed_at: Option<String>,
}

impl RawFollower {
  /// Read all ten columns, in schema order, from a query row.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      tenant_id:       row.get(1)?,
      external_id:     row.get(2)?,
      nickname:        row.get(3)?,
      avatar_url:      row.get(4)?,
      locale:          row.get(5)?,
      remark:          row.get(6)?,
      status:          row.get(7)?,
      subscribed_at:   row.get(8)?,
      unsubscribed_at: row.get(9)?,
    })
  }

  pub fn into_record(self) -> Result<FollowerRecord> {
    Ok(FollowerRecord {
      id:              self.id,
      tenant_id:       decode_uuid(&self.tenant_id)?,
      external_id:     self.external_id,
      nickname:        self.nickname,
      avatar_url:      self.avatar_url,
      locale:          self.locale,
      remark:          self.remark,
      status:          decode_status(&self.status)?,
      subscribed_at:   self.subscribed_at.as_deref().map(decode_dt).transpose()?,
      unsubscribed_at: self
        .unsubscribed_at
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}
