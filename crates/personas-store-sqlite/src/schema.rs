//! SQL schema for the personas SQLite store.
//!
//! Executed at connection startup. `PRAGMA user_version` records the layout
//! version.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
///
/// `personnel_id` is deliberately not unique: concurrent first inserts may
/// leave duplicates, and readers take the lowest non-deleted `id`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS personas_portrait (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    personnel_id  TEXT    NOT NULL,
    personas_ext  TEXT    NOT NULL DEFAULT '',  -- comma-joined labels
    create_time   TEXT    NOT NULL,
    update_time   TEXT,
    is_deleted    INTEGER NOT NULL DEFAULT 0    -- 0 = live, 1 = soft-deleted
);

CREATE TABLE IF NOT EXISTS personas_label (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    label_id    INTEGER NOT NULL,
    label_name  TEXT    NOT NULL,
    is_deleted  INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS portrait_person_idx ON personas_portrait(personnel_id, is_deleted);
CREATE INDEX IF NOT EXISTS label_key_idx       ON personas_label(label_id, is_deleted);

PRAGMA user_version = 1;
";
