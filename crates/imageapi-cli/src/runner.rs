//! Smoke-test runner
//!
//! Runs the fixed sequence against one image API deployment:
//!
//! 1. upload the test image
//! 2. download every [`Variant`] in fetch order and decode it
//! 3. fetch upload metrics
//! 4. delete the image
//! 5. download the original again and require an HTTP error
//!
//! Steps run one after another with no retries. Any failure before step 5
//! aborts the run; step 5 fails only when the download succeeds or fails
//! for a reason other than a non-2xx answer.

use std::time::Instant;

use anyhow::Context;
use chrono::{DateTime, Utc};
use imageapi_api_client::{ApiClient, ApiError};
use imageapi_core::{ImageInfo, MetricsSnapshot, SmokeConfig, UploadResult, Variant};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VariantCheck {
    pub variant: Variant,
    pub info: ImageInfo,
}

/// Outcome of the post-delete download.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionCheck {
    pub status: u16,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub upload: UploadResult,
    pub variants: Vec<VariantCheck>,
    pub metrics: MetricsSnapshot,
    pub delete: serde_json::Value,
    pub post_delete: DeletionCheck,
}

pub struct SmokeRunner {
    client: ApiClient,
    config: SmokeConfig,
    echo: bool,
}

impl SmokeRunner {
    pub fn new(client: ApiClient, config: SmokeConfig) -> Self {
        Self {
            client,
            config,
            echo: true,
        }
    }

    /// Print the step transcript to stdout (on by default).
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn say(&self, line: impl AsRef<str>) {
        if self.echo {
            println!("{}", line.as_ref());
        }
    }

    pub async fn run(&self) -> anyhow::Result<SmokeReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let banner = if self.config.preflight {
            Some(self.preflight().await?)
        } else {
            None
        };

        let upload = self.upload().await?;
        let variants = self.download_variants(&upload.id).await?;
        let metrics = self.metrics().await?;
        let delete = self.delete(&upload.id).await?;
        let post_delete = self.verify_deleted(&upload.id).await?;

        let elapsed_ms = start.elapsed().as_millis();
        tracing::info!(image_id = %upload.id, elapsed_ms, "Smoke test passed");

        Ok(SmokeReport {
            base_url: self.client.base_url().to_string(),
            started_at,
            elapsed_ms,
            banner,
            upload,
            variants,
            metrics,
            delete,
            post_delete,
        })
    }

    pub async fn preflight(&self) -> anyhow::Result<String> {
        tracing::info!(base_url = %self.client.base_url(), "Checking API is reachable");
        let banner = self
            .client
            .ping()
            .await
            .context("Preflight check failed")?;
        self.say(format!("API says: {}", banner.trim()));
        Ok(banner)
    }

    pub async fn upload(&self) -> anyhow::Result<UploadResult> {
        let path = &self.config.test_image;
        tracing::info!(path = %path.display(), "Uploading image");
        self.say("Uploading image...");

        let result = self
            .client
            .upload(path)
            .await
            .with_context(|| format!("Upload of {} failed", path.display()))?;

        if result.id.trim().is_empty() {
            anyhow::bail!("Upload response carried an empty image id");
        }

        let missing = result.missing_variants();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(Variant::as_str).collect();
            tracing::warn!(image_id = %result.id, missing = ?names, "Upload response is missing variant URLs");
        }

        self.say(format!(
            "Upload response: {}",
            serde_json::to_string(&result).context("Serialize upload response")?
        ));
        Ok(result)
    }

    pub async fn download_variants(&self, id: &str) -> anyhow::Result<Vec<VariantCheck>> {
        let mut checks = Vec::with_capacity(Variant::ALL.len());
        for variant in Variant::ALL {
            checks.push(self.download_variant(id, variant).await?);
        }
        Ok(checks)
    }

    pub async fn download_variant(&self, id: &str, variant: Variant) -> anyhow::Result<VariantCheck> {
        tracing::info!(image_id = %id, %variant, "Downloading variant");
        self.say(format!("Downloading {} image...", variant));

        let image = self
            .client
            .download(id, Some(variant))
            .await
            .with_context(|| format!("Download of {} variant failed", variant))?;

        if !image.info.has_pixels() {
            anyhow::bail!(
                "{} variant decoded with empty dimensions {}x{}",
                variant,
                image.info.width,
                image.info.height
            );
        }

        self.say(format!(
            "Downloaded {} image size: ({}, {}), format: {}",
            variant, image.info.width, image.info.height, image.info.format
        ));
        Ok(VariantCheck {
            variant,
            info: image.info,
        })
    }

    pub async fn metrics(&self) -> anyhow::Result<MetricsSnapshot> {
        tracing::info!("Fetching upload metrics");
        self.say("Fetching upload metrics...");

        let metrics = self
            .client
            .fetch_metrics()
            .await
            .context("Metrics fetch failed")?;

        tracing::debug!(entries = metrics.entry_count(), "Metrics received");
        self.say(format!("Metrics: {}", metrics));
        Ok(metrics)
    }

    pub async fn delete(&self, id: &str) -> anyhow::Result<serde_json::Value> {
        tracing::info!(image_id = %id, "Deleting image");
        self.say(format!("Deleting image {}...", id));

        let confirmation = self
            .client
            .delete_image(id)
            .await
            .with_context(|| format!("Delete of image {} failed", id))?;

        self.say(format!("Delete response: {}", confirmation));
        Ok(confirmation)
    }

    /// Download the original again; only an HTTP error counts as success.
    pub async fn verify_deleted(&self, id: &str) -> anyhow::Result<DeletionCheck> {
        tracing::info!(image_id = %id, "Confirming deletion");
        self.say(format!("Downloading {} image...", Variant::Original));

        match self.client.download(id, Some(Variant::Original)).await {
            Err(err @ ApiError::Http { .. }) => {
                let status = err.status().map(|s| s.as_u16()).unwrap_or_default();
                if err.is_not_found() {
                    tracing::info!(image_id = %id, "Image is gone after deletion");
                } else {
                    tracing::warn!(image_id = %id, status, "Deleted image answered with an unexpected error status");
                }
                self.say(format!("Expected error after deletion: {}", err));
                Ok(DeletionCheck {
                    status,
                    error: err.to_string(),
                })
            }
            Err(err) => Err(anyhow::Error::new(err)
                .context("Post-delete download failed for a reason other than an HTTP error")),
            Ok(image) => anyhow::bail!(
                "Image {} is still downloadable after deletion ({}x{} {})",
                id,
                image.info.width,
                image.info.height,
                image.info.format
            ),
        }
    }
}
