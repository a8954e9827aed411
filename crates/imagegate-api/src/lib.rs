//! Imagegate API Library
//!
//! This crate provides the HTTP handlers, upload orchestration, audit sink,
//! and application setup for the upload gateway.

pub mod audit;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
