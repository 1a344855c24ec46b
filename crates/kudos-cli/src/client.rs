//! Async HTTP client wrapping the Kudos JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use kudos_core::feedback::{Feedback, FeedbackInput};
use reqwest::{Client, Response};
use serde::Deserialize;

/// Shape of every error body the API returns.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the Kudos JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url.trim_end_matches('/'), path)
  }

  /// `GET /feedback`
  pub async fn list(&self) -> Result<Vec<Feedback>> {
    let resp = self
      .client
      .get(self.url("/feedback"))
      .send()
      .await
      .context("GET /feedback failed")?;
    read_json(resp, "GET /feedback").await
  }

  /// `POST /feedback`
  pub async fn create(&self, input: &FeedbackInput) -> Result<Feedback> {
    let resp = self
      .client
      .post(self.url("/feedback"))
      .json(input)
      .send()
      .await
      .context("POST /feedback failed")?;
    read_json(resp, "POST /feedback").await
  }

  /// `PUT /feedback/:id`
  pub async fn update(&self, id: &str, input: &FeedbackInput) -> Result<Feedback> {
    let resp = self
      .client
      .put(self.url(&format!("/feedback/{id}")))
      .json(input)
      .send()
      .await
      .context("PUT /feedback failed")?;
    read_json(resp, "PUT /feedback").await
  }

  /// `DELETE /feedback/:id`
  pub async fn delete(&self, id: &str) -> Result<Feedback> {
    let resp = self
      .client
      .delete(self.url(&format!("/feedback/{id}")))
      .send()
      .await
      .context("DELETE /feedback failed")?;
    read_json(resp, "DELETE /feedback").await
  }
}

/// Decode a success body, or turn the server's `{"error": ...}` into an error.
async fn read_json<T: serde::de::DeserializeOwned>(
  resp: Response,
  what: &str,
) -> Result<T> {
  let status = resp.status();
  if status.is_success() {
    return resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"));
  }

  let text = resp.text().await.unwrap_or_default();
  Err(anyhow!("{what} → {status}: {}", error_message(&text)))
}

fn error_message(body: &str) -> String {
  serde_json::from_str::<ErrorBody>(body)
    .map(|b| b.error)
    .unwrap_or_else(|_| body.trim().to_string())
}
