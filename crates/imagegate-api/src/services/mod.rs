//! Request-scoped services.

pub mod upload;

pub use upload::UploadService;
