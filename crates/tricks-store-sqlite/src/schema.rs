//! SQL schema for the TricksVault SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference tables. Rows are created on first use and never deleted.
CREATE TABLE IF NOT EXISTS subjects (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS categories (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS entries (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id   INTEGER NOT NULL REFERENCES subjects(id),
    category_id  INTEGER NOT NULL REFERENCES categories(id),
    item         TEXT NOT NULL CHECK (length(trim(item)) > 0),
    remark       TEXT NOT NULL DEFAULT '',
    created_at   TEXT NOT NULL    -- RFC 3339 UTC, microsecond precision
);

CREATE INDEX IF NOT EXISTS entries_subject_idx  ON entries(subject_id);
CREATE INDEX IF NOT EXISTS entries_category_idx ON entries(category_id);
CREATE INDEX IF NOT EXISTS entries_created_idx  ON entries(created_at);

PRAGMA user_version = 1;
";
