//! [`SqliteStore`]: the SQLite implementation of [`FeedbackStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use kudos_core::{
  feedback::{Feedback, FeedbackId, FeedbackInput, NewFeedback},
  store::{FeedbackFilter, FeedbackStore, Insertion},
};

use crate::{
  Error, Result,
  encode::{FEEDBACK_COLUMNS, RawFeedback, encode_dt, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A feedback store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened feedback store");
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Every clone of this store fails with
  /// [`Error::Database`] afterwards.
  pub async fn close(&self) -> Result<()> {
    self.conn.clone().close().await?;
    tracing::debug!("closed feedback store");
    Ok(())
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

  /// Build the full record for `input`, rejecting out-of-bounds values.
  fn prepare(input: NewFeedback) -> Result<Feedback> {
    input.input.check().map_err(Error::SchemaViolation)?;
    Ok(Feedback {
      id:            FeedbackId::new(),
      feedback:      input.input.feedback,
      rating:        input.input.rating,
      creation_date: input.creation_date.unwrap_or_else(Utc::now),
    })
  }
}

/// Insert a fully-built record on an already-borrowed connection.
fn insert_row(
  conn: &rusqlite::Connection,
  id: &str,
  feedback: &str,
  rating: u8,
  creation_date: &str,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO feedback (feedback_id, feedback, rating, creation_date)
     VALUES (?1, ?2, ?3, ?4)",
    rusqlite::params![id, feedback, rating, creation_date],
  )?;
  Ok(())
}

// ─── FeedbackStore impl ──────────────────────────────────────────────────────

impl FeedbackStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert(&self, record: NewFeedback) -> Result<Feedback> {
    let record = Self::prepare(record)?;

    let id_str   = encode_id(record.id);
    let text     = record.feedback.clone();
    let rating   = record.rating;
    let date_str = encode_dt(record.creation_date);

    self
      .conn
      .call(move |conn| {
        insert_row(conn, &id_str, &text, rating, &date_str)?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn insert_unique(&self, record: NewFeedback) -> Result<Insertion> {
    let record = Self::prepare(record)?;

    let id_str   = encode_id(record.id);
    let text     = record.feedback.clone();
    let rating   = record.rating;
    let date_str = encode_dt(record.creation_date);

    // The lookup and the insert share one IMMEDIATE transaction, so no other
    // writer can slip an identical row in between.
    let existing: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = tx
          .query_row(
            &format!(
              "SELECT {FEEDBACK_COLUMNS} FROM feedback
               WHERE feedback = ?1 AND rating = ?2
               ORDER BY seq LIMIT 1"
            ),
            rusqlite::params![text, rating],
            RawFeedback::from_row,
          )
          .optional()?;

        if existing.is_none() {
          insert_row(&tx, &id_str, &text, rating, &date_str)?;
          tx.commit()?;
        }
        Ok(existing)
      })
      .await?;

    match existing {
      Some(raw) => Ok(Insertion::Duplicate(raw.into_feedback()?)),
      None => Ok(Insertion::Inserted(record)),
    }
  }

  async fn update_by_id(
    &self,
    id:    FeedbackId,
    input: FeedbackInput,
  ) -> Result<Option<Feedback>> {
    input.check().map_err(Error::SchemaViolation)?;

    let id_str = encode_id(id);

    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE feedback SET feedback = ?2, rating = ?3
                 WHERE feedback_id = ?1
                 RETURNING {FEEDBACK_COLUMNS}"
              ),
              rusqlite::params![id_str, input.feedback, input.rating],
              RawFeedback::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }

  async fn delete_by_id(&self, id: FeedbackId) -> Result<Option<Feedback>> {
    let id_str = encode_id(id);

    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "DELETE FROM feedback WHERE feedback_id = ?1
                 RETURNING {FEEDBACK_COLUMNS}"
              ),
              rusqlite::params![id_str],
              RawFeedback::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_all(&self) -> Result<Vec<Feedback>> {
    let raws: Vec<RawFeedback> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {FEEDBACK_COLUMNS} FROM feedback ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawFeedback::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawFeedback::into_feedback).collect()
  }

  async fn find_one(&self, filter: FeedbackFilter) -> Result<Option<Feedback>> {
    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {FEEDBACK_COLUMNS} FROM feedback
                 WHERE (?1 IS NULL OR feedback = ?1)
                   AND (?2 IS NULL OR rating = ?2)
                 ORDER BY seq LIMIT 1"
              ),
              rusqlite::params![filter.feedback, filter.rating],
              RawFeedback::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }

  async fn find_by_id(&self, id: FeedbackId) -> Result<Option<Feedback>> {
    let id_str = encode_id(id);

    let raw: Option<RawFeedback> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {FEEDBACK_COLUMNS} FROM feedback WHERE feedback_id = ?1"),
              rusqlite::params![id_str],
              RawFeedback::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawFeedback::into_feedback).transpose()
  }
}
