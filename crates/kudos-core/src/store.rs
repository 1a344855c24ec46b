//! The `FeedbackStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `kudos-store-sqlite`).
//! [`crate::FeedbackService`] depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::feedback::{Feedback, FeedbackId, FeedbackInput, NewFeedback};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`FeedbackStore::find_one`]. Every `Some` field must match
/// exactly; `None` fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
  pub feedback: Option<String>,
  pub rating:   Option<u8>,
}

impl FeedbackFilter {
  /// A filter matching every caller-supplied field of `input`.
  pub fn matching(input: &FeedbackInput) -> Self {
    Self {
      feedback: Some(input.feedback.clone()),
      rating:   Some(input.rating),
    }
  }

  pub fn matches(&self, record: &Feedback) -> bool {
    self.feedback.as_ref().is_none_or(|f| *f == record.feedback)
      && self.rating.is_none_or(|r| r == record.rating)
  }
}

/// Outcome of [`FeedbackStore::insert_unique`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
  Inserted(Feedback),
  /// Nothing was written; this is the record that already matched.
  Duplicate(Feedback),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a feedback store backend.
///
/// Each operation is durable once its future resolves. Implementations must
/// reject inputs outside the bounds in [`crate::validate`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait FeedbackStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new record. The store assigns the id and, if absent, the
  /// creation date.
  fn insert(
    &self,
    record: NewFeedback,
  ) -> impl Future<Output = Result<Feedback, Self::Error>> + Send + '_;

  /// Insert unless a record with the same `feedback` and `rating` exists.
  /// The check and the write happen atomically.
  fn insert_unique(
    &self,
    record: NewFeedback,
  ) -> impl Future<Output = Result<Insertion, Self::Error>> + Send + '_;

  /// Replace `feedback` and `rating` of an existing record, keeping its id
  /// and creation date. Returns `None` if no record has that id.
  fn update_by_id(
    &self,
    id: FeedbackId,
    input: FeedbackInput,
  ) -> impl Future<Output = Result<Option<Feedback>, Self::Error>> + Send + '_;

  /// Remove a record and return it. Returns `None` if no record has that id.
  fn delete_by_id(
    &self,
    id: FeedbackId,
  ) -> impl Future<Output = Result<Option<Feedback>, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All records in insertion order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Feedback>, Self::Error>> + Send + '_;

  /// The earliest-inserted record matching `filter`, if any.
  fn find_one(
    &self,
    filter: FeedbackFilter,
  ) -> impl Future<Output = Result<Option<Feedback>, Self::Error>> + Send + '_;

  fn find_by_id(
    &self,
    id: FeedbackId,
  ) -> impl Future<Output = Result<Option<Feedback>, Self::Error>> + Send + '_;
}
