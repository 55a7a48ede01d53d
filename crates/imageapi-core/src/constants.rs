//! Defaults shared by the client and the runner.

/// Base URL of the hosted image API.
pub const DEFAULT_API_BASE: &str = "https://imageapi-olrog.ondigitalocean.app";

/// Local image uploaded by the smoke test.
pub const DEFAULT_TEST_IMAGE: &str = "test.jpg";

/// Per-request timeout for the HTTP client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Multipart field name the upload endpoint reads.
pub const UPLOAD_FIELD_NAME: &str = "file";
