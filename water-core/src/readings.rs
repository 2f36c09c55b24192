//! Reading snapshot for one pool or spa.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One set of test results. Values are classified, not range-checked, so
/// any finite number is a valid reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Readings {
    /// Free chlorine, ppm.
    pub chlorine: f64,
    pub ph: f64,
    /// ppm
    pub total_alkalinity: f64,
    /// ppm
    pub calcium_hardness: f64,
    /// Water temperature, °F.
    pub temperature: f64,
    /// Total dissolved solids, ppm.
    pub tds: f64,
    /// Circulation flow rate, GPM.
    pub flow: f64,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            chlorine: 3.0,
            ph: 7.5,
            total_alkalinity: 100.0,
            calcium_hardness: 300.0,
            temperature: 85.0,
            tds: 1000.0,
            flow: 60.0,
        }
    }
}

impl Readings {
    /// Field name / value pairs in payload order.
    pub fn fields(&self) -> [(&'static str, f64); 7] {
        [
            ("chlorine", self.chlorine),
            ("ph", self.ph),
            ("totalAlkalinity", self.total_alkalinity),
            ("calciumHardness", self.calcium_hardness),
            ("temperature", self.temperature),
            ("tds", self.tds),
            ("flow", self.flow),
        ]
    }

    /// Reject NaN and infinities. Comparisons against NaN silently land in
    /// the action-required branch, so callers validate before analysing.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(CoreError::NonFiniteReading { field, value });
            }
        }
        Ok(())
    }
}
