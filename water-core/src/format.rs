//! Number and unit formatting shared by the analyzer and report renderers.

use crate::range::Interval;

// Every f64 at or above 2^52 is already integral.
const INTEGRAL: f64 = 4_503_599_627_370_496.0;

// Magnitudes rendered in exponent form.
const EXP_HIGH: f64 = 1e21;
const EXP_LOW: f64 = 1e-6;

/// Round to `digits` decimals, halves away from zero. Negative zero comes
/// back as zero.
///
/// The value is scaled before rounding, so a literal such as `0.615` whose
/// binary form sits just under the half still rounds up.
pub fn round_to(value: f64, digits: i32) -> f64 {
    if !value.is_finite() || value.abs() >= INTEGRAL {
        return value;
    }
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Fixed-point rendering with `digits` decimals, rounded like [`round_to`].
/// Magnitudes of 1e21 and above fall back to [`plain`].
pub fn fixed(value: f64, digits: usize) -> String {
    if value.abs() >= EXP_HIGH {
        return plain(value);
    }
    format!("{:.*}", digits, round_to(value, digits as i32))
}

/// Shortest decimal that round-trips (`85`, `85.5`, `-0.3`). Very large and
/// very small magnitudes use exponent form (`1e+21`, `1.5e-7`).
pub fn plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if value.is_finite() && (magnitude >= EXP_HIGH || magnitude < EXP_LOW) {
        let exp = format!("{value:e}");
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        };
    }
    format!("{value}")
}

/// Measurement unit attached to a displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    None,
    Ppm,
    Fahrenheit,
    Gpm,
}

impl Unit {
    pub fn attach(self, number: &str) -> String {
        match self {
            Unit::None       => number.to_string(),
            Unit::Ppm        => format!("{number} ppm"),
            Unit::Fahrenheit => format!("{number}°F"),
            Unit::Gpm        => format!("{number} GPM"),
        }
    }

    /// `"lo - hi unit"`; temperatures carry the unit on both ends.
    pub fn span(self, interval: &Interval) -> String {
        let lo = plain(interval.lo);
        let hi = plain(interval.hi);
        match self {
            Unit::Fahrenheit => format!("{} - {}", self.attach(&lo), self.attach(&hi)),
            _ => self.attach(&format!("{lo} - {hi}")),
        }
    }
}
