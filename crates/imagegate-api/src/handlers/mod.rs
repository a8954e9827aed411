//! HTTP handlers.

pub mod upload;

pub use upload::{liveness, upload};
