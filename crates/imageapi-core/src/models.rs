//! Response models for the image API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// Body of a successful `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub id: String,
    /// Variant name to public URL.
    pub urls: BTreeMap<String, String>,
    /// Public URL of the original, returned by some deployments alongside `urls`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UploadResult {
    pub fn url_for(&self, variant: Variant) -> Option<&str> {
        self.urls.get(variant.as_str()).map(String::as_str)
    }

    /// Variants with no entry in `urls`, in fetch order.
    pub fn missing_variants(&self) -> Vec<Variant> {
        Variant::ALL
            .into_iter()
            .filter(|v| self.url_for(*v).is_none())
            .collect()
    }
}

/// Upload metrics as returned by the server. The shape is server-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsSnapshot(pub serde_json::Value);

impl MetricsSnapshot {
    /// Number of top-level entries: array length, object key count, 1 for a scalar, 0 for null.
    pub fn entry_count(&self) -> usize {
        match &self.0 {
            serde_json::Value::Array(items) => items.len(),
            serde_json::Value::Object(map) => map.len(),
            serde_json::Value::Null => 0,
            _ => 1,
        }
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dimensions and detected format of a downloaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size_bytes: u64,
}

impl ImageInfo {
    pub fn has_pixels(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
