//! HTTP server wiring for Kudos: configuration and the outer router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use kudos_core::store::FeedbackStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STORE_PATH: &str = "kudos.db";

/// Runtime server configuration, deserialised from `config.toml` and
/// `KUDOS_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` and the environment over the
  /// built-in defaults. Environment wins.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("KUDOS").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with permissive CORS (the browser form is served from its
/// own origin) and per-request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: FeedbackStore + 'static,
{
  kudos_api::api_router(store)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use kudos_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  use super::*;

  fn temp_config(contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
      "kudos-config-{}-{}.toml",
      std::process::id(),
      contents.len()
    ));
    std::fs::write(&path, contents).unwrap();
    path
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/kudos.toml")).unwrap();
    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    assert_eq!(cfg.address(), "0.0.0.0:8080");
  }

  #[test]
  fn file_values_override_defaults() {
    let path = temp_config("port = 9090\nstore_path = \"/tmp/fb.db\"\n");
    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(cfg.host, DEFAULT_HOST);
    assert_eq!(cfg.port, 9090);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/fb.db"));
  }

  #[test]
  fn tilde_expansion_leaves_other_paths_alone() {
    assert_eq!(expand_tilde(Path::new("/var/kudos.db")), PathBuf::from("/var/kudos.db"));
    assert_eq!(expand_tilde(Path::new("kudos.db")), PathBuf::from("kudos.db"));
  }

  #[tokio::test]
  async fn router_answers_cross_origin_requests() {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let req = Request::builder()
      .method("GET")
      .uri("/feedback")
      .header(header::ORIGIN, "http://localhost:3000")
      .body(Body::empty())
      .unwrap();

    let resp = router(store).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!([]));
  }
}
