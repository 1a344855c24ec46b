//! Error type for `kudos-store-sqlite`.

use kudos_core::validate::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("invalid row: {0}")]
  InvalidRow(String),

  /// A record outside the declared bounds reached the store.
  #[error("schema violation: {0}")]
  SchemaViolation(FieldErrors),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
