//! Smoke-test runner for the image API.
//!
//! [`runner::SmokeRunner`] drives upload, variant downloads, metrics, delete
//! and the post-delete check; [`args::CliArgs`] holds the command-line
//! overrides applied on top of the environment configuration.

pub mod args;
pub mod runner;

pub use args::{CliArgs, OutputFormat};
pub use runner::{DeletionCheck, SmokeReport, SmokeRunner, VariantCheck};

/// Initialize tracing for the CLI binary.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
