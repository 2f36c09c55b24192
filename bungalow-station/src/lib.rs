//! Operator station for the bungalow spas.
//!
//! Keeps the latest submitted readings per bungalow, runs them through
//! [`water_core::analyze_checked`] and renders the daily averages and the
//! printable water-quality report.

pub mod averages;
pub mod codec;
pub mod config;
pub mod ingest;
pub mod report;
pub mod sink;
pub mod store;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::config::{OutputFormat, StationConfig};
use crate::ingest::apply_batch;
use crate::report::{json_report, render_text};
use crate::sink::ReportSink;
use crate::store::BungalowStore;

/// Decode one round of readings, analyse it and publish the report dated
/// `today` in the configured format.
pub async fn run(
    config: &StationConfig,
    input: &[u8],
    sink: &dyn ReportSink,
    today: NaiveDate,
) -> Result<()> {
    let batch = codec::decode(input).context("Failed to decode batch")?;

    let mut store = BungalowStore::new(config.bungalow_count);
    let items = apply_batch(&mut store, batch);

    let report = match config.format {
        OutputFormat::Text => render_text(&store, today),
        OutputFormat::Json => serde_json::to_string_pretty(&json_report(&store, today, items))?,
    };
    sink.publish(&report).await?;

    info!(
        submitted = store.submitted().count(),
        bungalows = store.len(),
        "report published"
    );
    Ok(())
}
