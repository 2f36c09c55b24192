//! Environment-driven station configuration.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::store::DEFAULT_BUNGALOW_COUNT;

/// Where the batch comes from or the report goes to. `-` means stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Stdio,
    File(PathBuf),
}

impl Endpoint {
    fn parse(s: &str) -> Self {
        match s.trim() {
            "" | "-" => Endpoint::Stdio,
            path => Endpoint::File(PathBuf::from(path)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationConfig {
    pub input: Endpoint,
    pub output: Endpoint,
    pub format: OutputFormat,
    pub bungalow_count: u32,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            input: Endpoint::Stdio,
            output: Endpoint::Stdio,
            format: OutputFormat::Text,
            bungalow_count: DEFAULT_BUNGALOW_COUNT,
        }
    }
}

impl StationConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup("STATION_INPUT") {
            config.input = Endpoint::parse(&v);
        }
        if let Some(v) = lookup("STATION_OUTPUT") {
            config.output = Endpoint::parse(&v);
        }
        if let Some(v) = lookup("STATION_FORMAT") {
            config.format = v.parse()?;
        }
        if let Some(v) = lookup("STATION_BUNGALOW_COUNT") {
            config.bungalow_count = v
                .trim()
                .parse()
                .with_context(|| format!("STATION_BUNGALOW_COUNT must be a number, got '{v}'"))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StationConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StationConfig::default());
        assert_eq!(config.bungalow_count, 20);
    }

    #[test]
    fn reads_all_keys() {
        let config = StationConfig::from_lookup(lookup(&[
            ("STATION_INPUT", "/tmp/round.json"),
            ("STATION_OUTPUT", "-"),
            ("STATION_FORMAT", "JSON"),
            ("STATION_BUNGALOW_COUNT", "12"),
        ]))
        .unwrap();
        assert_eq!(config.input, Endpoint::File(PathBuf::from("/tmp/round.json")));
        assert_eq!(config.output, Endpoint::Stdio);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.bungalow_count, 12);
    }

    #[test]
    fn bad_format_is_an_error() {
        let err = StationConfig::from_lookup(lookup(&[("STATION_FORMAT", "pdf")])).unwrap_err();
        assert!(err.to_string().contains("unknown output format 'pdf'"));
    }

    #[test]
    fn bad_count_is_an_error() {
        assert!(StationConfig::from_lookup(lookup(&[("STATION_BUNGALOW_COUNT", "many")])).is_err());
    }
}
