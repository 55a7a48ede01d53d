use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use imageapi_core::config::normalize_base_url;
use imageapi_core::SmokeConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Step-by-step transcript
    Text,
    /// Final report as pretty JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "imageapi-smoke")]
#[command(about = "Upload, download, inspect metrics for, and delete an image against the image API")]
pub struct CliArgs {
    /// API base URL (overrides IMAGEAPI_URL)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Local image to upload (overrides IMAGEAPI_TEST_IMAGE)
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Bearer token (overrides IMAGEAPI_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    /// API key sent as X-API-Key (overrides IMAGEAPI_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Request timeout in seconds (overrides IMAGEAPI_TIMEOUT_SECS)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Check that GET / answers before uploading
    #[arg(long)]
    pub preflight: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CliArgs {
    /// Layer the flags over `config` and re-validate.
    pub fn apply(&self, mut config: SmokeConfig) -> anyhow::Result<SmokeConfig> {
        if let Some(url) = &self.base_url {
            config.base_url = normalize_base_url(url);
        }
        if let Some(image) = &self.image {
            config.test_image = image.clone();
        }
        if let Some(token) = &self.token {
            config.auth.bearer_token = Some(token.clone());
        }
        if let Some(key) = &self.api_key {
            config.auth.api_key = Some(key.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        config.preflight |= self.preflight;

        config.validate()?;
        Ok(config)
    }
}
