//! SQL schema for the hidden-gems SQLite store.
//!
//! Executed at connection startup. `PRAGMA user_version` records the schema
//! revision.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Insert-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS hidden_gems (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    description   TEXT NOT NULL,
    latitude      REAL NOT NULL,
    longitude     REAL NOT NULL,
    submitted_by  TEXT NOT NULL,
    created_at    TEXT NOT NULL,   -- RFC 3339 UTC; server-assigned
    status        TEXT NOT NULL DEFAULT 'pending'   -- 'pending' | 'approved' | 'rejected'; others kept as-is
);

PRAGMA user_version = 1;
";
