//! Feedback records, the single entity of the Kudos store.
//!
//! A record pairs a free-text comment with a 1–5 star rating. The identifier
//! and the creation timestamp are always assigned server-side.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Opaque identifier of a stored feedback record.
///
/// Backed by a random v4 UUID, so an id is never handed out twice, even after
/// the record it named has been deleted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeedbackId(Uuid);

impl FeedbackId {
  /// Generate a fresh identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn from_uuid(id: Uuid) -> Self { Self(id) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for FeedbackId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for FeedbackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.hyphenated())
  }
}

impl FromStr for FeedbackId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(Self)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted feedback entry, as returned by every store read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
  pub id:            FeedbackId,
  pub feedback:      String,
  pub rating:        u8,
  /// Server-assigned; preserved across updates.
  pub creation_date: DateTime<Utc>,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// The caller-supplied fields of a record. Produced by
/// [`crate::validate::validate`]; also the payload of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackInput {
  pub feedback: String,
  pub rating:   u8,
}

impl FeedbackInput {
  pub fn new(feedback: impl Into<String>, rating: u8) -> Self {
    Self { feedback: feedback.into(), rating }
  }
}

/// Input to [`crate::store::FeedbackStore::insert`].
///
/// `creation_date` defaults to the insertion time when `None`.
#[derive(Debug, Clone)]
pub struct NewFeedback {
  pub input:         FeedbackInput,
  pub creation_date: Option<DateTime<Utc>>,
}

impl From<FeedbackInput> for NewFeedback {
  fn from(input: FeedbackInput) -> Self {
    Self { input, creation_date: None }
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn id_parses_hyphenated_and_simple_forms() {
    let id = FeedbackId::new();
    let hyphenated: FeedbackId = id.to_string().parse().unwrap();
    let simple: FeedbackId =
      id.as_uuid().simple().to_string().parse().unwrap();
    assert_eq!(hyphenated, id);
    assert_eq!(simple, id);
  }

  #[test]
  fn id_rejects_garbage() {
    assert!("not-an-id".parse::<FeedbackId>().is_err());
    assert!("".parse::<FeedbackId>().is_err());
    // 24 hex digits: too short for a UUID.
    assert!("507f1f77bcf86cd799439011".parse::<FeedbackId>().is_err());
  }

  #[test]
  fn record_serialises_with_camel_case_keys() {
    let record = Feedback {
      id:            FeedbackId::from_uuid(Uuid::nil()),
      feedback:      "Great service!".into(),
      rating:        5,
      creation_date: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    };
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(json["feedback"], "Great service!");
    assert_eq!(json["rating"], 5);
    assert_eq!(json["creationDate"], "2024-03-01T12:00:00Z");
  }
}
