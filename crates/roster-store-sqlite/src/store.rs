//! [`SqliteStore`] — the SQLite implementation of [`FollowerStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  follower::{FollowerPageQuery, FollowerRecord, NewFollower, Page},
  store::FollowerStore,
};

use crate::{
  encode::{encode_dt, encode_status, encode_uuid, RawFollower},
  schema::SCHEMA,
  Error, Result,
};

/// All columns of the `followers` table, in schema order.
/// Keep in sync with [`RawFollower::from_row`].
const COLUMNS: &str = "id, tenant_id, external_id, nickname, avatar_url, \
                       locale, remark, status, subscribed_at, unsubscribed_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A follower store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── FollowerStore impl ──────────────────────────────────────────────────────

impl FollowerStore for SqliteStore {
  type Error = Error;

  // ── Keyed reads ───────────────────────────────────────────────────────────

  async fn get(&self, id: i64) -> Result<Option<FollowerRecord>> {
    let raw: Option<RawFollower> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COLUMNS} FROM followers WHERE id = ?1"),
              rusqlite::params![id],
              RawFollower::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFollower::into_record).transpose()
  }

  async fn get_by_key(
    &self,
    tenant_id: Uuid,
    external_id: &str,
  ) -> Result<Option<FollowerRecord>> {
    let tenant_str = encode_uuid(tenant_id);
    let ext = external_id.to_owned();

    let raw: Option<RawFollower> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {COLUMNS} FROM followers
                 WHERE tenant_id = ?1 AND external_id = ?2"
              ),
              rusqlite::params![tenant_str, ext],
              RawFollower::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFollower::into_record).transpose()
  }

  async fn list(&self, ids: &[i64]) -> Result<Vec<FollowerRecord>> {
    if ids.is_empty() {
      return Ok(vec![]);
    }
    let ids = ids.to_vec();

    let raws: Vec<RawFollower> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {COLUMNS} FROM followers WHERE id IN ({placeholders})");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(ids), RawFollower::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFollower::into_record).collect()
  }

  async fn get_by_keys(
    &self,
    tenant_id: Uuid,
    external_ids: &[String],
  ) -> Result<Vec<FollowerRecord>> {
    if external_ids.is_empty() {
      return Ok(vec![]);
    }
    let tenant_str = encode_uuid(tenant_id);
    let ids = external_ids.to_vec();

    let raws: Vec<RawFollower> = self
      .conn
      .call(move |conn| {
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
          "SELECT {COLUMNS} FROM followers
           WHERE tenant_id = ? AND external_id IN ({placeholders})"
        );
        let mut stmt = conn.prepare(&sql)?;
        let params = std::iter::once(tenant_str).chain(ids);
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawFollower::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFollower::into_record).collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, follower: NewFollower) -> Result<i64> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO followers (
             tenant_id, external_id, nickname, avatar_url,
             locale, remark, status, subscribed_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            encode_uuid(follower.tenant_id),
            follower.external_id,
            follower.nickname,
            follower.avatar_url,
            follower.locale,
            follower.remark,
            encode_status(follower.status),
            follower.subscribed_at.map(encode_dt),
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  async fn insert_batch(&self, followers: Vec<NewFollower>) -> Result<()> {
    if followers.is_empty() {
      return Ok(());
    }

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO followers (
               tenant_id, external_id, nickname, avatar_url,
               locale, remark, status, subscribed_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          )?;
          for f in followers {
            stmt.execute(rusqlite::params![
              encode_uuid(f.tenant_id),
              f.external_id,
              f.nickname,
              f.avatar_url,
              f.locale,
              f.remark,
              encode_status(f.status),
              f.subscribed_at.map(encode_dt),
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn update(&self, record: &FollowerRecord) -> Result<()> {
    let record = record.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE followers SET
             nickname = ?2, avatar_url = ?3, locale = ?4, remark = ?5,
             status = ?6, subscribed_at = ?7, unsubscribed_at = ?8
           WHERE id = ?1",
          rusqlite::params![
            record.id,
            record.nickname,
            record.avatar_url,
            record.locale,
            record.remark,
            encode_status(record.status),
            record.subscribed_at.map(encode_dt),
            record.unsubscribed_at.map(encode_dt),
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn set_unsubscribed(
    &self,
    tenant_id: Uuid,
    external_id: &str,
    at: DateTime<Utc>,
  ) -> Result<bool> {
    let tenant_str = encode_uuid(tenant_id);
    let ext = external_id.to_owned();
    let at_str = encode_dt(at);

    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE followers SET status = 'unsubscribed', unsubscribed_at = ?3
           WHERE tenant_id = ?1 AND external_id = ?2",
          rusqlite::params![tenant_str, ext, at_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(changed)
  }

  // ── Paged reads ───────────────────────────────────────────────────────────

  async fn page(
    &self,
    tenant_id: Uuid,
    query: &FollowerPageQuery,
  ) -> Result<Page<FollowerRecord>> {
    let tenant_str = encode_uuid(tenant_id);
    let ext        = query.external_id.clone();
    let nick_pat   = query.nickname.as_deref().map(|n| format!("%{n}%"));
    let status_str = query.status.map(encode_status).map(str::to_owned);
    let limit_val  = query.limit.unwrap_or(100) as i64;
    let offset_val = query.offset.unwrap_or(0) as i64;

    let (total, raws): (u64, Vec<RawFollower>) = self
      .conn
      .call(move |conn| {
        // NULL-guarded filters keep the parameter indices fixed regardless
        // of which filters the caller supplied.
        let where_clause = "tenant_id = ?1
           AND (?2 IS NULL OR external_id = ?2)
           AND (?3 IS NULL OR nickname LIKE ?3)
           AND (?4 IS NULL OR status = ?4)";

        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM followers WHERE {where_clause}"),
          rusqlite::params![
            tenant_str,
            ext.as_deref(),
            nick_pat.as_deref(),
            status_str.as_deref(),
          ],
          |row| row.get(0),
        )?;

        let sql = format!(
          "SELECT {COLUMNS} FROM followers
           WHERE {where_clause}
           ORDER BY id
           LIMIT ?5 OFFSET ?6"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![
              tenant_str,
              ext.as_deref(),
              nick_pat.as_deref(),
              status_str.as_deref(),
              limit_val,
              offset_val,
            ],
            RawFollower::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total as u64, rows))
      })
      .await?;

    let items = raws
      .into_iter()
      .map(RawFollower::into_record)
      .collect::<Result<_>>()?;

    Ok(Page { total, items })
  }
}
