//! Request-level orchestration over a [`FeedbackStore`].
//!
//! The service validates bodies, parses identifiers, applies the duplicate
//! policy and turns store outcomes into [`Error`] variants. It holds no state
//! besides the injected store.

use std::sync::Arc;

use serde_json::Value;

use crate::{
  Error, Result,
  feedback::{Feedback, FeedbackId, NewFeedback},
  store::{FeedbackStore, Insertion},
  validate::validate,
};

pub struct FeedbackService<S> {
  store: Arc<S>,
}

impl<S> Clone for FeedbackService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: FeedbackStore> FeedbackService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Every record, in insertion order.
  pub async fn list(&self) -> Result<Vec<Feedback>> {
    self.store.find_all().await.map_err(unavailable("list"))
  }

  /// Validate `body` and persist it unless an identical record exists.
  pub async fn create(&self, body: &Value) -> Result<Feedback> {
    let input = validate(body).map_err(Error::Validation)?;

    match self
      .store
      .insert_unique(NewFeedback::from(input))
      .await
      .map_err(unavailable("create"))?
    {
      Insertion::Inserted(record) => {
        tracing::info!(id = %record.id, rating = record.rating, "created feedback");
        Ok(record)
      }
      Insertion::Duplicate(existing) => {
        tracing::debug!(id = %existing.id, "rejected duplicate feedback");
        Err(Error::Duplicate(existing.id))
      }
    }
  }

  /// Replace the text and rating of the record addressed by `id`.
  pub async fn update(&self, id: &str, body: &Value) -> Result<Feedback> {
    let input = validate(body).map_err(Error::Validation)?;
    let id = parse_id(id)?;

    let record = self
      .store
      .update_by_id(id, input)
      .await
      .map_err(unavailable("update"))?
      .ok_or(Error::NotFound(id))?;

    tracing::info!(%id, rating = record.rating, "updated feedback");
    Ok(record)
  }

  /// Remove the record addressed by `id`, returning what was deleted.
  pub async fn delete(&self, id: &str) -> Result<Feedback> {
    let id = parse_id(id)?;

    let record = self
      .store
      .delete_by_id(id)
      .await
      .map_err(unavailable("delete"))?
      .ok_or(Error::NotFound(id))?;

    tracing::info!(%id, "deleted feedback");
    Ok(record)
  }
}

fn parse_id(raw: &str) -> Result<FeedbackId> {
  raw
    .parse()
    .map_err(|_| Error::InvalidIdentifier(raw.to_owned()))
}

/// Log a store failure and hide it behind a generic message.
fn unavailable<E>(op: &'static str) -> impl FnOnce(E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  move |e| {
    tracing::error!(error = %e, "failed to {op} feedback");
    Error::StoreUnavailable { op, source: Box::new(e) }
  }
}
