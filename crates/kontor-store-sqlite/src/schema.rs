//! SQL schema for the Kontor SQLite store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. Future migrations are gated on
//! `PRAGMA user_version` and must be additive — existing tables are
//! never redefined.

/// Full schema DDL.
///
/// Documents are stored as JSON bodies keyed by (collection, id); the
/// store is generic over collection kinds, so there is one table for all
/// of them rather than a table per kind. Secondary index entries live in
/// their own table and are maintained in the same transaction as their
/// document — an entry never outlives or precedes the row it points at.
/// Uniqueness is a per-declaration property enforced by the engine, not
/// by a SQL constraint, because unique and non-unique entries share the
/// table.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    doc_id      TEXT NOT NULL,
    body        TEXT NOT NULL,   -- JSON payload, schema-validated on write
    PRIMARY KEY (collection, doc_id)
);

CREATE TABLE IF NOT EXISTS index_entries (
    collection  TEXT NOT NULL,
    idx_name    TEXT NOT NULL,
    value       TEXT NOT NULL,   -- canonical key text (IndexValue::storage_key)
    doc_id      TEXT NOT NULL,
    PRIMARY KEY (collection, idx_name, doc_id)
);

CREATE INDEX IF NOT EXISTS index_entries_lookup
    ON index_entries (collection, idx_name, value);

-- Business sequence counters. Rows are only ever incremented; deleting
-- documents never winds a counter back, so numbers are never reissued.
CREATE TABLE IF NOT EXISTS sequences (
    collection  TEXT PRIMARY KEY,
    value       INTEGER NOT NULL
);

PRAGMA user_version = 1;
";
