//! Applies a decoded batch to the store.

use serde::Serialize;
use tracing::{info, warn};
use water_core::Status;

use crate::codec::SubmissionBatch;
use crate::store::BungalowStore;

/// Outcome of one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    pub bungalow: u32,
    /// Worst status of the new analysis; `None` when rejected.
    pub overall_status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemResult {
    pub fn accepted(&self) -> bool {
        self.error.is_none()
    }
}

/// Submit every entry in order. A rejected entry is logged and skipped;
/// later entries for the same bungalow still replace earlier ones.
pub fn apply_batch(store: &mut BungalowStore, batch: SubmissionBatch) -> Vec<ItemResult> {
    let mut results = Vec::with_capacity(batch.submissions.len());

    for s in batch.submissions {
        let bungalow = s.bungalow;
        match store.submit(bungalow, s.readings, s.attendant) {
            Ok(state) => {
                let overall = state.overall_status();
                info!(
                    bungalow,
                    attendant = %state.attendant_name,
                    status = ?overall,
                    "readings analysed"
                );
                results.push(ItemResult {
                    bungalow,
                    overall_status: overall,
                    error: None,
                });
            }
            Err(e) => {
                warn!(bungalow, error = %e, "submission rejected");
                results.push(ItemResult {
                    bungalow,
                    overall_status: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let rejected = results.iter().filter(|r| !r.accepted()).count();
    info!(processed = results.len(), rejected, "batch applied");
    results
}
