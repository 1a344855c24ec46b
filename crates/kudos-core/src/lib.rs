//! Core types and trait definitions for the Kudos feedback service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend, the HTTP API and the CLI all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod feedback;
pub mod service;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
pub use service::FeedbackService;
