//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The `UNIQUE (tenant_id, external_id)` constraint is the store-level
/// backstop for the one-record-per-identifier invariant: even two walks of
/// the same tenant racing each other cannot produce duplicate rows.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS followers (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    tenant_id       TEXT NOT NULL,
    external_id     TEXT NOT NULL,
    nickname        TEXT,
    avatar_url      TEXT,
    locale          TEXT,
    remark          TEXT,
    status          TEXT NOT NULL,   -- 'subscribed' | 'unsubscribed'
    subscribed_at   TEXT,            -- ISO 8601 UTC
    unsubscribed_at TEXT,            -- ISO 8601 UTC
    UNIQUE (tenant_id, external_id)
);

CREATE INDEX IF NOT EXISTS followers_tenant_status_idx
    ON followers(tenant_id, status);

PRAGMA user_version = 1;
";
