//! Image API Core Library
//!
//! This crate provides the domain models, configuration, and constants
//! shared by the image API client and the smoke-test runner.

pub mod config;
pub mod constants;
pub mod models;
pub mod variant;

// Re-export commonly used types
pub use config::{AuthConfig, SmokeConfig};
pub use models::{ImageInfo, MetricsSnapshot, UploadResult};
pub use variant::Variant;
