//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and ids as hyphenated lowercase
//! UUID strings.

use chrono::{DateTime, Utc};
use kudos_core::feedback::{Feedback, FeedbackId};
use uuid::Uuid;

use crate::{Error, Result};

/// Column list shared by every `SELECT` that yields a [`RawFeedback`].
pub const FEEDBACK_COLUMNS: &str = "feedback_id, feedback, rating, creation_date";

// ─── FeedbackId ──────────────────────────────────────────────────────────────

pub fn encode_id(id: FeedbackId) -> String { id.as_uuid().hyphenated().to_string() }

pub fn decode_id(s: &str) -> Result<FeedbackId> {
  Ok(FeedbackId::from_uuid(Uuid::parse_str(s)?))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `feedback` row.
pub struct RawFeedback {
  pub feedback_id:   String,
  pub feedback:      String,
  pub rating:        i64,
  pub creation_date: String,
}

impl RawFeedback {
  /// Read a row selected with [`FEEDBACK_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      feedback_id:   row.get(0)?,
      feedback:      row.get(1)?,
      rating:        row.get(2)?,
      creation_date: row.get(3)?,
    })
  }

  pub fn into_feedback(self) -> Result<Feedback> {
    let rating = u8::try_from(self.rating)
      .map_err(|_| Error::InvalidRow(format!("rating out of range: {}", self.rating)))?;

    Ok(Feedback {
      id:            decode_id(&self.feedback_id)?,
      feedback:      self.feedback,
      rating,
      creation_date: decode_dt(&self.creation_date)?,
    })
  }
}
