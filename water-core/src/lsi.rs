//! Langelier Saturation Index.
//!
//! `LSI = pH + TF + CF + AF - TDSF`, where the temperature, calcium and
//! alkalinity factors come from step tables: each factor holds until the
//! next threshold is reached. There is no interpolation between rows.

use serde::{Deserialize, Serialize};

use crate::format::round_to;
use crate::range::{range_for, RangeKey};
use crate::readings::Readings;

/// One row of a factor table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub threshold: f64,
    pub factor: f64,
}

const fn bp(threshold: f64, factor: f64) -> Breakpoint {
    Breakpoint { threshold, factor }
}

/// Temperature factor, keyed by °F.
pub const TEMPERATURE_FACTORS: &[Breakpoint] = &[
    bp(32.0, 0.0),
    bp(38.0, 0.1),
    bp(46.0, 0.2),
    bp(53.0, 0.3),
    bp(60.0, 0.4),
    bp(66.0, 0.5),
    bp(76.0, 0.6),
    bp(84.0, 0.7),
    bp(94.0, 0.8),
    bp(105.0, 0.9),
];

/// Calcium hardness factor, keyed by ppm.
pub const CALCIUM_FACTORS: &[Breakpoint] = &[
    bp(25.0, 1.0),
    bp(50.0, 1.3),
    bp(75.0, 1.5),
    bp(100.0, 1.6),
    bp(150.0, 1.8),
    bp(200.0, 1.9),
    bp(300.0, 2.1),
    bp(400.0, 2.2),
    bp(800.0, 2.5),
];

/// Total alkalinity factor, keyed by ppm.
pub const ALKALINITY_FACTORS: &[Breakpoint] = &[
    bp(25.0, 1.4),
    bp(50.0, 1.7),
    bp(75.0, 1.9),
    bp(100.0, 2.0),
    bp(150.0, 2.2),
    bp(200.0, 2.3),
    bp(300.0, 2.5),
    bp(400.0, 2.6),
];

const TDS_STEP_PPM: f64 = 1000.0;

/// Factor of the last breakpoint whose threshold is `<= value`.
///
/// Below the first threshold no row applies and the factor is 0.
pub fn factor_for(value: f64, breakpoints: &[Breakpoint]) -> f64 {
    let mut factor = 0.0;
    for point in breakpoints {
        if value >= point.threshold {
            factor = point.factor;
        } else {
            break;
        }
    }
    factor
}

pub fn tds_factor(tds: f64) -> f64 {
    if tds < TDS_STEP_PPM {
        12.1
    } else {
        12.2
    }
}

/// Water's tendency as read from the LSI against its ideal band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LsiTendency {
    Corrosive,
    Balanced,
    ScaleForming,
}

impl LsiTendency {
    pub fn of(lsi: f64) -> Self {
        let ideal = range_for(RangeKey::Lsi).ideal;
        if lsi < ideal.lo {
            LsiTendency::Corrosive
        } else if lsi > ideal.hi {
            LsiTendency::ScaleForming
        } else {
            LsiTendency::Balanced
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LsiTendency::Corrosive => "Water is corrosive, which can damage surfaces and equipment.",
            LsiTendency::Balanced => "Water is balanced and stable.",
            LsiTendency::ScaleForming => {
                "Water is prone to scaling, which can cause cloudy water and clog equipment."
            }
        }
    }
}

/// Every term of one LSI computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LsiBreakdown {
    pub ph: f64,
    pub temperature_factor: f64,
    pub calcium_factor: f64,
    pub alkalinity_factor: f64,
    pub tds_factor: f64,
    /// Unrounded sum.
    pub raw: f64,
    /// Two-decimal value used for both classification and display.
    pub value: f64,
}

impl LsiBreakdown {
    pub fn tendency(&self) -> LsiTendency {
        LsiTendency::of(self.value)
    }
}

pub fn calculate(readings: &Readings) -> LsiBreakdown {
    let temperature_factor = factor_for(readings.temperature, TEMPERATURE_FACTORS);
    let calcium_factor = factor_for(readings.calcium_hardness, CALCIUM_FACTORS);
    let alkalinity_factor = factor_for(readings.total_alkalinity, ALKALINITY_FACTORS);
    let tds_factor = tds_factor(readings.tds);

    let raw = readings.ph + temperature_factor + calcium_factor + alkalinity_factor - tds_factor;

    LsiBreakdown {
        ph: readings.ph,
        temperature_factor,
        calcium_factor,
        alkalinity_factor,
        tds_factor,
        raw,
        value: round_to(raw, 2),
    }
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //
