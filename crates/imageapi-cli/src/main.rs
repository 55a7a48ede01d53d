//! imageapi-smoke: end-to-end smoke test for the image API.
//!
//! Configure with IMAGEAPI_URL, IMAGEAPI_TEST_IMAGE and IMAGEAPI_TOKEN (or the
//! matching flags). Exits non-zero when any step fails.

use anyhow::Context;
use clap::Parser;
use imageapi_api_client::ApiClient;
use imageapi_cli::{init_tracing, CliArgs, OutputFormat, SmokeRunner};
use imageapi_core::SmokeConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CliArgs::parse();
    let config = args.apply(SmokeConfig::from_env()?)?;

    let client = ApiClient::from_config(&config).context("Failed to create API client")?;

    let runner = SmokeRunner::new(client, config).with_echo(args.format == OutputFormat::Text);
    let report = runner.run().await?;

    if args.format == OutputFormat::Json {
        let out = serde_json::to_string_pretty(&report).context("Serialize report")?;
        println!("{}", out);
    }

    Ok(())
}
