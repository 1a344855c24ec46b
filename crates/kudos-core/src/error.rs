//! Error types for `kudos-core`.
//!
//! The `Display` output of every variant is safe to show to callers; store
//! failures carry their cause only as a `source`.

use thiserror::Error;

use crate::{feedback::FeedbackId, validate::FieldErrors};

#[derive(Debug, Error)]
pub enum Error {
  /// The body failed a shape rule; displays the first failure.
  #[error("{0}")]
  Validation(FieldErrors),

  /// A record with the same caller-supplied fields already exists.
  #[error("feedback already exists")]
  Duplicate(FeedbackId),

  #[error("invalid id")]
  InvalidIdentifier(String),

  #[error("feedback not found")]
  NotFound(FeedbackId),

  #[error("failed to {op} feedback")]
  StoreUnavailable {
    op:     &'static str,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
