//! Shared setup for runner tests: a mock image API and a local test image.

pub mod fixtures;

use std::io::Write;
use std::time::Duration;

use imageapi_api_client::ApiClient;
use imageapi_cli::SmokeRunner;
use imageapi_core::{SmokeConfig, Variant};
use mockito::{Mock, Server, ServerGuard};
use serde_json::json;
use tempfile::NamedTempFile;

pub const IMAGE_ID: &str = "abc123";

pub struct TestApi {
    pub server: ServerGuard,
    pub image: NamedTempFile,
    pub mocks: Vec<Mock>,
}

impl TestApi {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let mut image = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        image.write_all(&fixtures::png(8, 6)).unwrap();

        Self {
            server,
            image,
            mocks: Vec::new(),
        }
    }

    pub fn config(&self) -> SmokeConfig {
        SmokeConfig {
            base_url: self.server.url(),
            test_image: self.image.path().to_path_buf(),
            ..SmokeConfig::default()
        }
    }

    pub fn runner(&self) -> SmokeRunner {
        self.runner_with(self.config())
    }

    pub fn runner_with(&self, config: SmokeConfig) -> SmokeRunner {
        let client =
            ApiClient::new(&config.base_url, None, Duration::from_secs(5)).unwrap();
        SmokeRunner::new(client, config).with_echo(false)
    }

    pub async fn mount_upload(&mut self, id: &str) {
        let urls: serde_json::Map<String, serde_json::Value> = Variant::ALL
            .iter()
            .map(|v| {
                (
                    v.to_string(),
                    json!(format!("https://cdn.example.com/{}/{}", id, v)),
                )
            })
            .collect();

        let mock = self
            .server
            .mock("POST", "/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "id": id, "urls": urls }).to_string())
            .expect(1)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Every variant answers with a PNG whose width encodes its position.
    pub async fn mount_variants(&mut self, id: &str) {
        for (i, variant) in Variant::ALL.iter().enumerate() {
            let width = 10 * (i as u32 + 1);
            let mock = self
                .server
                .mock("GET", format!("/image/{}/{}", id, variant).as_str())
                .with_status(200)
                .with_header("content-type", "image/png")
                .with_body(fixtures::png(width, 5))
                .expect(1)
                .create_async()
                .await;
            self.mocks.push(mock);
        }
    }

    pub async fn mount_metrics(&mut self) {
        let mock = self
            .server
            .mock("GET", "/metrics/uploads")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([{ "id": IMAGE_ID, "size": 1024, "type": "image/png" }]).to_string())
            .expect(1)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    pub async fn mount_delete(&mut self, id: &str) {
        let mock = self
            .server
            .mock("DELETE", format!("/image/{}", id).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": "Image deleted", "id": id }).to_string())
            .expect(1)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    /// Second request for the original. Mounted after `mount_variants`, so it only
    /// answers once the first original mock has had its single hit.
    pub async fn mount_gone(&mut self, id: &str, status: usize, body: &str) {
        let mock = self
            .server
            .mock("GET", format!("/image/{}/original", id).as_str())
            .with_status(status)
            .with_body(body)
            .expect(1)
            .create_async()
            .await;
        self.mocks.push(mock);
    }

    pub async fn mount_happy_path(&mut self) {
        self.mount_upload(IMAGE_ID).await;
        self.mount_variants(IMAGE_ID).await;
        self.mount_metrics().await;
        self.mount_delete(IMAGE_ID).await;
        self.mount_gone(IMAGE_ID, 404, "Image not found").await;
    }

    pub async fn assert_all(&self) {
        for mock in &self.mocks {
            mock.assert_async().await;
        }
    }
}
