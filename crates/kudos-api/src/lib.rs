//! JSON REST API for Kudos.
//!
//! Exposes an axum [`Router`] backed by any [`kudos_core::store::FeedbackStore`].
//! CORS, tracing and transport concerns are the caller's responsibility.
//!
//! The collection answers on both `/feedback` and `/Feedback`; browser
//! clients of the earlier service use the capitalised form.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(kudos_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod feedback;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use kudos_core::{FeedbackService, store::FeedbackStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged or nested into any parent router
/// regardless of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FeedbackStore + 'static,
{
  let collection = get(feedback::list::<S>)
    .post(feedback::create::<S>)
    .fallback(method_not_allowed);
  let item = put(feedback::update::<S>)
    .delete(feedback::delete::<S>)
    .fallback(method_not_allowed);

  Router::new()
    .route("/feedback", collection.clone())
    .route("/Feedback", collection)
    .route("/feedback/{id}", item.clone())
    .route("/Feedback/{id}", item)
    .fallback(not_found)
    .with_state(FeedbackService::new(store))
}

async fn not_found() -> ApiError { ApiError::NotFound("not found".into()) }

async fn method_not_allowed() -> ApiError {
  ApiError::MethodNotAllowed("method not allowed".into())
}

#[cfg(test)]
mod tests;
