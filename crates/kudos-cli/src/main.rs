//! `kudos`: command-line client for the Kudos feedback service.
//!
//! # Usage
//!
//! ```text
//! kudos list
//! kudos add --rating 5 "Great service!"
//! kudos edit <id> --rating 4 "Even better"
//! kudos delete <id>
//! kudos --url http://feedback.example.com list
//! ```

mod client;
mod render;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use client::ApiClient;
use kudos_core::{feedback::FeedbackInput, validate::validate};
use serde::Deserialize;
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8080";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "kudos", about = "Command-line client for the Kudos feedback service")]
struct Args {
  /// Path to a TOML config file (`url = "..."`).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the kudos server (default: http://localhost:8080).
  #[arg(long, env = "KUDOS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show every feedback entry.
  List,
  /// Submit new feedback.
  Add {
    /// Star rating, 1 to 5.
    #[arg(short, long)]
    rating:   u8,
    feedback: String,
  },
  /// Replace the text and rating of an entry.
  Edit {
    id:       String,
    #[arg(short, long)]
    rating:   u8,
    feedback: String,
  },
  /// Delete an entry.
  Delete { id: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flag / env override the config file, which overrides the default.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| DEFAULT_URL.to_string());
  tracing::debug!(%base_url, "using server");

  let client = ApiClient::new(base_url)?;

  match args.command {
    Command::List => {
      let records = client.list().await?;
      if records.is_empty() {
        println!("No feedback yet.");
      }
      for record in &records {
        println!("{}", render::render_record(record));
      }
    }
    Command::Add { rating, feedback } => {
      let input = checked_input(feedback, rating)?;
      let record = client.create(&input).await?;
      println!("Created {}", render::render_record(&record));
    }
    Command::Edit { id, rating, feedback } => {
      let input = checked_input(feedback, rating)?;
      let record = client.update(&id, &input).await?;
      println!("Updated {}", render::render_record(&record));
    }
    Command::Delete { id } => {
      let record = client.delete(&id).await?;
      println!("Deleted {}", render::render_record(&record));
    }
  }

  Ok(())
}

/// Run the server's validation locally so obvious mistakes never hit the
/// network.
fn checked_input(feedback: String, rating: u8) -> Result<FeedbackInput> {
  validate(&json!({ "feedback": feedback, "rating": rating }))
    .map_err(|errors| anyhow!("{errors}"))
}
