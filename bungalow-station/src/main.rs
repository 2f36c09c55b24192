//! Bungalow station entry point.
//!
//! Reads one round of readings, analyses every submission and publishes the
//! water-quality report.
//!
//! # Environment variables
//! | Var                       | Default |
//! |---------------------------|---------|
//! | `STATION_INPUT`           | `-` (stdin)  |
//! | `STATION_OUTPUT`          | `-` (stdout) |
//! | `STATION_FORMAT`          | `text`  |
//! | `STATION_BUNGALOW_COUNT`  | `20`    |

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tracing::info;

use bungalow_station::config::{Endpoint, StationConfig};
use bungalow_station::run;
use bungalow_station::sink::{FileSink, ReportSink, StdoutSink};

async fn read_input(endpoint: &Endpoint) -> Result<Vec<u8>> {
    match endpoint {
        Endpoint::Stdio => {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("Failed to read batch from stdin")?;
            Ok(buf)
        }
        Endpoint::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read batch from {}", path.display())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bungalow_station=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = StationConfig::from_env()?;
    info!(?config, "station configured");

    let bytes = read_input(&config.input).await?;

    let sink: Arc<dyn ReportSink> = match &config.output {
        Endpoint::Stdio => Arc::new(StdoutSink),
        Endpoint::File(path) => {
            info!(path = %path.display(), "writing report to file");
            Arc::new(FileSink::new(path))
        }
    };

    let today = chrono::Local::now().date_naive();
    run(&config, &bytes, sink.as_ref(), today).await
}
