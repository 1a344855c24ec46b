//! SQL schema for the Kudos SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so a future change can detect older files.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` gives insertion order; AUTOINCREMENT keeps it from being reused.
-- `length()` stops at the first NUL, so text bounds are enforced in Rust by
-- `FeedbackInput::check` and only the rating is checked here.
CREATE TABLE IF NOT EXISTS feedback (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    feedback_id   TEXT    NOT NULL UNIQUE,
    feedback      TEXT    NOT NULL,
    rating        INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    creation_date TEXT    NOT NULL   -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS feedback_match_idx ON feedback(feedback, rating);

PRAGMA user_version = 1;
";
