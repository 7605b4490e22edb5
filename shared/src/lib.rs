//! Shared types for OfferSender
//!
//! Common types used across crates: domain models, the plan catalog,
//! error types and response structures.

pub mod error;
pub mod models;
pub mod plans;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
