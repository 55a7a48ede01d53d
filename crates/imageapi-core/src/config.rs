//! Configuration module
//!
//! Settings for a smoke-test run. Values come from the environment (a `.env`
//! file is honoured) and fall back to the constants in [`crate::constants`].
//! The CLI layers its flags on top of the result.

use std::env;
use std::path::PathBuf;

use crate::constants::{DEFAULT_API_BASE, DEFAULT_TEST_IMAGE, DEFAULT_TIMEOUT_SECS};

/// Credentials sent with every request. Both fields empty means no auth header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthConfig {
    pub bearer_token: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmokeConfig {
    pub base_url: String,
    pub test_image: PathBuf,
    pub auth: AuthConfig,
    pub timeout_secs: u64,
    /// Probe `GET /` before uploading.
    pub preflight: bool,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            test_image: PathBuf::from(DEFAULT_TEST_IMAGE),
            auth: AuthConfig::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            preflight: false,
        }
    }
}

impl SmokeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = var("IMAGEAPI_URL")
            .or_else(|| var("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let test_image = var("IMAGEAPI_TEST_IMAGE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEST_IMAGE));

        let auth = AuthConfig {
            bearer_token: var("IMAGEAPI_TOKEN").or_else(|| var("JWT_TOKEN")),
            api_key: var("IMAGEAPI_API_KEY"),
        };

        let timeout_secs = match var("IMAGEAPI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("IMAGEAPI_TIMEOUT_SECS must be an integer ({}): {}", raw, e)
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let preflight = match var("IMAGEAPI_PREFLIGHT") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| anyhow::anyhow!("IMAGEAPI_PREFLIGHT must be a boolean: {}", raw))?,
            None => false,
        };

        let config = Self {
            base_url: normalize_base_url(&base_url),
            test_image,
            auth,
            timeout_secs,
            preflight,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base_url.is_empty() {
            anyhow::bail!("Base URL must not be empty");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!(
                "Base URL must start with http:// or https://: {}",
                self.base_url
            );
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("Timeout must be greater than zero");
        }
        Ok(())
    }
}

pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
