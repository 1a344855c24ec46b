//! Handlers for `/feedback` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/feedback` | All records, insertion order |
//! | `POST`   | `/feedback` | Body: `{"feedback": "...", "rating": 1-5}`; 400 on duplicates |
//! | `PUT`    | `/feedback/:id` | Same body; replaces text and rating |
//! | `DELETE` | `/feedback/:id` | Returns the deleted record |
//!
//! Every success is a 200 carrying the affected record(s).

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use kudos_core::{FeedbackService, feedback::Feedback, store::FeedbackStore};
use serde_json::Value;

use crate::error::ApiError;

/// `GET /feedback`
pub async fn list<S>(
  State(service): State<FeedbackService<S>>,
) -> Result<Json<Vec<Feedback>>, ApiError>
where
  S: FeedbackStore,
{
  Ok(Json(service.list().await?))
}

/// `POST /feedback`
///
/// The body is taken as raw JSON so shape errors come from the validator
/// rather than the extractor.
pub async fn create<S>(
  State(service): State<FeedbackService<S>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Feedback>, ApiError>
where
  S: FeedbackStore,
{
  let Json(body) = body?;
  Ok(Json(service.create(&body).await?))
}

/// `PUT /feedback/:id`
pub async fn update<S>(
  State(service): State<FeedbackService<S>>,
  Path(id): Path<String>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Feedback>, ApiError>
where
  S: FeedbackStore,
{
  let Json(body) = body?;
  Ok(Json(service.update(&id, &body).await?))
}

/// `DELETE /feedback/:id`
pub async fn delete<S>(
  State(service): State<FeedbackService<S>>,
  Path(id): Path<String>,
) -> Result<Json<Feedback>, ApiError>
where
  S: FeedbackStore,
{
  Ok(Json(service.delete(&id).await?))
}
