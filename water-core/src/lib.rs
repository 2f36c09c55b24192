//! Water-quality analysis engine for pool and spa readings.
//!
//! Classifies each measured parameter against a fixed range table, derives
//! the Langelier Saturation Index and turns both into per-parameter verdicts.
//! Everything here is synchronous and free of shared mutable state.

pub mod analyzer;
pub mod error;
pub mod format;
pub mod lsi;
pub mod range;
pub mod readings;
pub mod status;

pub use analyzer::{analyze, analyze_checked, AnalysisResult, Parameter};
pub use error::CoreError;
pub use lsi::{LsiBreakdown, LsiTendency};
pub use range::{range_for, range_for_name, Interval, RangeDefinition, RangeKey};
pub use readings::Readings;
pub use status::{aggregate_status, classify, Deviation, IconClass, Status};
