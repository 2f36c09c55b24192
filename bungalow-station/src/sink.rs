//! ReportSink trait and implementations.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

// ------------------------------------------------------------------ //
//  Trait                                                              //
// ------------------------------------------------------------------ //

/// Async destination for a rendered report.
#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn publish(&self, report: &str) -> Result<()>;
}

// ------------------------------------------------------------------ //
//  FakeReportSink (for tests)                                         //
// ------------------------------------------------------------------ //

/// In-memory sink that collects published reports for test assertions.
#[derive(Debug, Default, Clone)]
pub struct FakeReportSink {
    pub reports: Arc<Mutex<Vec<String>>>,
}

impl FakeReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-destructive snapshot of currently collected reports.
    pub fn snapshot(&self) -> Vec<String> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportSink for FakeReportSink {
    async fn publish(&self, report: &str) -> Result<()> {
        self.reports.lock().unwrap().push(report.to_string());
        Ok(())
    }
}

// ------------------------------------------------------------------ //
//  Stdout / file sinks                                                //
// ------------------------------------------------------------------ //

#[derive(Debug, Default)]
pub struct StdoutSink;

#[async_trait]
impl ReportSink for StdoutSink {
    async fn publish(&self, report: &str) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(report.as_bytes())
            .await
            .context("Failed to write report to stdout")?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Writes the report to a file, replacing any previous content.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReportSink for FileSink {
    async fn publish(&self, report: &str) -> Result<()> {
        tokio::fs::write(&self.path, report)
            .await
            .with_context(|| format!("Failed to write report to {}", self.path.display()))?;
        Ok(())
    }
}
