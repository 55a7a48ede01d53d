//! Domain methods for the image API client.

use std::path::Path;

use imageapi_core::constants::UPLOAD_FIELD_NAME;
use imageapi_core::{ImageInfo, MetricsSnapshot, UploadResult, Variant};

use crate::error::{ApiError, ApiResult};
use crate::image_info::{inspect, mime_for_path};
use crate::ApiClient;

/// A downloaded rendition together with what was decoded from it.
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub variant: Option<Variant>,
    pub content_type: Option<String>,
    pub info: ImageInfo,
}

/// Path of an image or one of its renditions: `/image/{id}` or `/image/{id}/{variant}`.
pub fn image_path(id: &str, variant: Option<Variant>) -> String {
    let id = urlencoding::encode(id);
    match variant {
        Some(v) => format!("/image/{}/{}", id, v.as_str()),
        None => format!("/image/{}", id),
    }
}

fn require_id(id: &str) -> ApiResult<()> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidInput("image id must not be empty".to_string()));
    }
    Ok(())
}

impl ApiClient {
    /// Upload an image from a local file path as multipart field `file`.
    pub async fn upload(&self, file_path: impl AsRef<Path>) -> ApiResult<UploadResult> {
        let path = file_path.as_ref();
        let buffer = std::fs::read(path).map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image.jpg");

        let part = reqwest::multipart::Part::bytes(buffer)
            .file_name(filename.to_string())
            .mime_str(mime_for_path(path))?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD_NAME, part);

        self.post_multipart("/upload", form).await
    }

    /// Download an image (or one of its variants) and decode it.
    pub async fn download(&self, id: &str, variant: Option<Variant>) -> ApiResult<DownloadedImage> {
        require_id(id)?;

        let (body, content_type) = self.get_bytes(&image_path(id, variant)).await?;
        let info = inspect(&body)?;

        Ok(DownloadedImage {
            variant,
            content_type,
            info,
        })
    }

    /// Fetch upload metrics.
    pub async fn fetch_metrics(&self) -> ApiResult<MetricsSnapshot> {
        self.get_json("/metrics/uploads").await
    }

    /// Delete an image. Returns the server's JSON confirmation.
    pub async fn delete_image(&self, id: &str) -> ApiResult<serde_json::Value> {
        require_id(id)?;
        self.delete_json(&image_path(id, None)).await
    }

    /// Fetch the root banner. Used to check the API is reachable.
    pub async fn ping(&self) -> ApiResult<String> {
        self.get_text("/").await
    }
}
