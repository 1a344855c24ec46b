//! Request validation for feedback bodies.
//!
//! This is the only place the shape rules live. The service runs [`validate`]
//! before touching the store, the SQLite backend re-checks typed inputs with
//! [`FeedbackInput::check`], and the CLI validates before sending.
//!
//! Checks run in field order (`feedback`, `rating`, then undeclared keys) and
//! every failure is collected; callers that report a single message use
//! [`FieldErrors::first`].

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::feedback::FeedbackInput;

pub const FEEDBACK_MIN_LEN: usize = 5;
pub const FEEDBACK_MAX_LEN: usize = 1000;
pub const RATING_MIN: u8 = 1;
pub const RATING_MAX: u8 = 5;

const FEEDBACK_FIELD: &str = "feedback";
const RATING_FIELD: &str = "rating";

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  /// The offending key, or `"value"` when the body itself is malformed.
  pub field:   String,
  pub message: String,
}

/// Every rule that failed for one input, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
  fn push(&mut self, field: &str, message: String) {
    self.0.push(FieldError { field: field.to_owned(), message });
  }

  pub fn first(&self) -> Option<&FieldError> { self.0.first() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn iter(&self) -> impl Iterator<Item = &FieldError> { self.0.iter() }

  /// Whether any failure concerns `field`.
  pub fn has_field(&self, field: &str) -> bool {
    self.0.iter().any(|e| e.field == field)
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.first() {
      Some(e) => f.write_str(&e.message),
      None => f.write_str("invalid input"),
    }
  }
}

impl std::error::Error for FieldErrors {}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Validate an untyped request body and extract the caller-supplied fields.
///
/// Undeclared keys are rejected, so a successful result carries every field
/// the caller sent.
pub fn validate(body: &Value) -> Result<FeedbackInput, FieldErrors> {
  let mut errors = FieldErrors::default();

  let Some(object) = body.as_object() else {
    errors.push("value", "\"value\" must be of type object".to_owned());
    return Err(errors);
  };

  let feedback = check_feedback(object, &mut errors);
  let rating = check_rating(object, &mut errors);

  for key in object.keys() {
    if key != FEEDBACK_FIELD && key != RATING_FIELD {
      errors.push(key, format!("\"{key}\" is not allowed"));
    }
  }

  match (feedback, rating) {
    (Some(feedback), Some(rating)) if errors.is_empty() => {
      Ok(FeedbackInput { feedback, rating })
    }
    _ => Err(errors),
  }
}

impl FeedbackInput {
  /// Re-check a typed input against the same bounds as [`validate`].
  pub fn check(&self) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();
    if let Err(message) = check_feedback_text(&self.feedback) {
      errors.push(FEEDBACK_FIELD, message);
    }
    if let Err(message) = check_rating_range(f64::from(self.rating)) {
      errors.push(RATING_FIELD, message);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
  }
}

// ─── Field rules ─────────────────────────────────────────────────────────────

fn check_feedback(
  object: &Map<String, Value>,
  errors: &mut FieldErrors,
) -> Option<String> {
  let result = match object.get(FEEDBACK_FIELD) {
    None => Err("\"Feedback\" is required".to_owned()),
    Some(Value::String(text)) => {
      check_feedback_text(text).map(|()| text.clone())
    }
    Some(_) => Err("\"Feedback\" must be a string".to_owned()),
  };
  result.map_err(|message| errors.push(FEEDBACK_FIELD, message)).ok()
}

fn check_feedback_text(text: &str) -> Result<(), String> {
  let len = text.chars().count();
  if len == 0 {
    Err("\"Feedback\" is not allowed to be empty".to_owned())
  } else if len < FEEDBACK_MIN_LEN {
    Err(format!(
      "\"Feedback\" length must be at least {FEEDBACK_MIN_LEN} characters long"
    ))
  } else if len > FEEDBACK_MAX_LEN {
    Err(format!(
      "\"Feedback\" length must be less than or equal to {FEEDBACK_MAX_LEN} \
       characters long"
    ))
  } else {
    Ok(())
  }
}

fn check_rating(
  object: &Map<String, Value>,
  errors: &mut FieldErrors,
) -> Option<u8> {
  let result = match object.get(RATING_FIELD) {
    None => Err("\"Rating\" is required".to_owned()),
    Some(value) => rating_as_number(value).and_then(check_rating_range),
  };
  result.map_err(|message| errors.push(RATING_FIELD, message)).ok()
}

/// Numbers pass through; numeric strings are converted, since HTML forms
/// submit radio values as text.
fn rating_as_number(value: &Value) -> Result<f64, String> {
  let not_a_number = || "\"Rating\" must be a number".to_owned();
  let n = match value {
    Value::Number(n) => n.as_f64().ok_or_else(not_a_number)?,
    Value::String(s) => s.trim().parse::<f64>().map_err(|_| not_a_number())?,
    _ => return Err(not_a_number()),
  };
  if n.is_finite() { Ok(n) } else { Err(not_a_number()) }
}

fn check_rating_range(n: f64) -> Result<u8, String> {
  if n.fract() != 0.0 {
    Err("\"Rating\" must be an integer".to_owned())
  } else if n < f64::from(RATING_MIN) {
    Err(format!("\"Rating\" must be greater than or equal to {RATING_MIN}"))
  } else if n > f64::from(RATING_MAX) {
    Err(format!("\"Rating\" must be less than or equal to {RATING_MAX}"))
  } else {
    Ok(n as u8)
  }
}
