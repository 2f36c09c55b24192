//! Batch input codec.
//!
//! Decodes the JSON document an attendant's tablet exports at the end of a
//! round: one submission per bungalow visited.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use water_core::Readings;

/// One bungalow visit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Submission {
    /// Bungalow number, starting at 1.
    pub bungalow: u32,
    #[serde(default)]
    pub attendant: String,
    pub readings: Readings,
}

/// A full round as exported.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionBatch {
    /// Format version. Currently only `1` is accepted.
    pub version: u8,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported batch version {0}")]
    UnsupportedVersion(u8),
    #[error("submission {index} names bungalow 0; numbering starts at 1")]
    ZeroBungalow { index: usize },
}

/// Decode a batch document into a [`SubmissionBatch`].
///
/// Attendant names are trimmed. Reading values are not range-checked here;
/// the store validates them on submit.
pub fn decode(bytes: &[u8]) -> Result<SubmissionBatch, DecodeError> {
    let mut batch: SubmissionBatch = serde_json::from_slice(bytes)?;

    if batch.version != 1 {
        return Err(DecodeError::UnsupportedVersion(batch.version));
    }
    for (index, s) in batch.submissions.iter_mut().enumerate() {
        if s.bungalow == 0 {
            return Err(DecodeError::ZeroBungalow { index });
        }
        s.attendant = s.attendant.trim().to_string();
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings_json() -> serde_json::Value {
        serde_json::json!({
            "chlorine": 2.5,
            "ph": 7.4,
            "totalAlkalinity": 90,
            "calciumHardness": 250,
            "temperature": 88,
            "tds": 900,
            "flow": 55
        })
    }

    #[test]
    fn decode_valid_batch() {
        let bytes = serde_json::to_vec(&serde_json::json!({
            "version": 1,
            "submissions": [
                { "bungalow": 3, "attendant": "  Kai ", "readings": readings_json() },
                { "bungalow": 7, "readings": readings_json() }
            ]
        }))
        .unwrap();

        let batch = decode(&bytes).unwrap();
        assert_eq!(batch.submissions.len(), 2);
        assert_eq!(batch.submissions[0].bungalow, 3);
        assert_eq!(batch.submissions[0].attendant, "Kai");
        assert_eq!(batch.submissions[0].readings.ph, 7.4);
        assert_eq!(batch.submissions[1].attendant, "");
    }

    #[test]
    fn decode_empty_round() {
        let batch = decode(br#"{"version": 1}"#).unwrap();
        assert!(batch.submissions.is_empty());
    }

    #[test]
    fn decode_invalid_json() {
        assert!(matches!(decode(b"not json"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn decode_missing_reading_field() {
        let bytes = serde_json::to_vec(&serde_json::json!({
            "version": 1,
            "submissions": [{ "bungalow": 1, "readings": { "chlorine": 2.0 } }]
        }))
        .unwrap();
        assert!(matches!(decode(&bytes), Err(DecodeError::Json(_))));
    }

    #[test]
    fn decode_wrong_version() {
        assert!(matches!(
            decode(br#"{"version": 2, "submissions": []}"#),
            Err(DecodeError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn decode_zero_bungalow() {
        let bytes = serde_json::to_vec(&serde_json::json!({
            "version": 1,
            "submissions": [
                { "bungalow": 1, "readings": readings_json() },
                { "bungalow": 0, "readings": readings_json() }
            ]
        }))
        .unwrap();
        assert!(matches!(decode(&bytes), Err(DecodeError::ZeroBungalow { index: 1 })));
    }
}
