//! Per-bungalow state.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use water_core::{aggregate_status, analyze_checked, AnalysisResult, CoreError, Readings, Status};

pub const DEFAULT_BUNGALOW_COUNT: u32 = 20;

// ------------------------------------------------------------------ //
//  Types                                                              //
// ------------------------------------------------------------------ //

#[derive(Debug, Error)]
pub enum StationError {
    #[error("bungalow {0} does not exist")]
    UnknownBungalow(u32),
    #[error("invalid readings: {0}")]
    InvalidReadings(#[from] CoreError),
}

/// What the station knows about one bungalow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BungalowState {
    pub readings: Readings,
    /// `None` until the first successful submit.
    pub results: Option<Vec<AnalysisResult>>,
    pub attendant_name: String,
}

impl Default for BungalowState {
    fn default() -> Self {
        Self {
            readings: Readings::default(),
            results: None,
            attendant_name: String::new(),
        }
    }
}

impl BungalowState {
    /// Worst result status, `None` when nothing has been submitted.
    pub fn overall_status(&self) -> Option<Status> {
        self.results
            .as_ref()
            .map(|results| aggregate_status(results.iter().map(|r| r.status)))
    }
}

/// Bungalows `1..=count`, each replaced wholesale on submit.
#[derive(Debug, Clone)]
pub struct BungalowStore {
    bungalows: BTreeMap<u32, BungalowState>,
}

impl Default for BungalowStore {
    fn default() -> Self {
        Self::new(DEFAULT_BUNGALOW_COUNT)
    }
}

// ------------------------------------------------------------------ //
//  Operations                                                         //
// ------------------------------------------------------------------ //

impl BungalowStore {
    pub fn new(count: u32) -> Self {
        let bungalows = (1..=count).map(|id| (id, BungalowState::default())).collect();
        Self { bungalows }
    }

    pub fn len(&self) -> usize {
        self.bungalows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bungalows.is_empty()
    }

    pub fn get(&self, id: u32) -> Result<&BungalowState, StationError> {
        self.bungalows.get(&id).ok_or(StationError::UnknownBungalow(id))
    }

    /// Analyse `readings` and replace the bungalow's entry with the outcome.
    ///
    /// On error the previous entry is left as it was.
    pub fn submit(
        &mut self,
        id: u32,
        readings: Readings,
        attendant_name: impl Into<String>,
    ) -> Result<&BungalowState, StationError> {
        let slot = self
            .bungalows
            .get_mut(&id)
            .ok_or(StationError::UnknownBungalow(id))?;

        let results = analyze_checked(&readings)?;
        *slot = BungalowState {
            readings,
            results: Some(results),
            attendant_name: attendant_name.into(),
        };
        Ok(&*slot)
    }

    pub fn overall_status(&self, id: u32) -> Result<Option<Status>, StationError> {
        Ok(self.get(id)?.overall_status())
    }

    /// All bungalows in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &BungalowState)> {
        self.bungalows.iter().map(|(id, state)| (*id, state))
    }

    /// Bungalows that have results, in id order.
    pub fn submitted(&self) -> impl Iterator<Item = (u32, &BungalowState)> {
        self.iter().filter(|(_, state)| state.results.is_some())
    }
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //
