//! Range classification.

use serde::{Deserialize, Serialize};

use crate::range::RangeDefinition;

// ------------------------------------------------------------------ //
//  Types                                                              //
// ------------------------------------------------------------------ //

/// Verdict for one parameter, or for a whole bungalow when aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    Ideal,
    Acceptable,
    #[serde(rename = "Action Required")]
    ActionRequired,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ideal          => "Ideal",
            Status::Acceptable     => "Acceptable",
            Status::ActionRequired => "Action Required",
        }
    }

    pub fn icon(self) -> IconClass {
        match self {
            Status::Ideal          => IconClass::CheckCircle,
            Status::Acceptable     => IconClass::ExclamationCircle,
            Status::ActionRequired => IconClass::XCircle,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which icon a renderer should draw next to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconClass {
    CheckCircle,
    ExclamationCircle,
    XCircle,
}

/// Position of a value relative to a range's outer band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deviation {
    Below,
    Within,
    Above,
    /// The value compared with neither bound (NaN).
    Unknown,
}

impl Deviation {
    pub fn of(value: f64, range: &RangeDefinition) -> Self {
        let outer = range.outer();
        if value < outer.lo {
            Deviation::Below
        } else if value > outer.hi {
            Deviation::Above
        } else if outer.contains(value) {
            Deviation::Within
        } else {
            Deviation::Unknown
        }
    }
}

// ------------------------------------------------------------------ //
//  Evaluation                                                         //
// ------------------------------------------------------------------ //

/// Classify a value against its range. Bounds are inclusive and the value
/// is compared as given.
pub fn classify(value: f64, range: &RangeDefinition) -> Status {
    if range.ideal.contains(value) {
        return Status::Ideal;
    }
    if let Some(acceptable) = range.acceptable {
        if acceptable.contains(value) {
            return Status::Acceptable;
        }
    }
    Status::ActionRequired
}

/// Worst status of the set. An empty set is `Ideal`.
pub fn aggregate_status(statuses: impl IntoIterator<Item = Status>) -> Status {
    let mut overall = Status::Ideal;
    for s in statuses {
        if s > overall {
            overall = s;
        }
    }
    overall
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::{range_for, Interval, RangeKey};

    fn range(ideal: (f64, f64), acceptable: Option<(f64, f64)>) -> RangeDefinition {
        RangeDefinition {
            ideal: Interval::new(ideal.0, ideal.1),
            acceptable: acceptable.map(|(lo, hi)| Interval::new(lo, hi)),
        }
    }

    #[test]
    fn chlorine_boundaries() {
        let cl = range_for(RangeKey::Chlorine);
        assert_eq!(classify(2.0, cl), Status::Ideal);
        assert_eq!(classify(5.0, cl), Status::Ideal);
        assert_eq!(classify(1.0, cl), Status::Acceptable);
        assert_eq!(classify(0.99, cl), Status::ActionRequired);
        assert_eq!(classify(10.0, cl), Status::Acceptable);
        assert_eq!(classify(10.01, cl), Status::ActionRequired);
    }

    #[test]
    fn no_acceptable_band_skips_middle_tier() {
        let ph = range_for(RangeKey::Ph);
        assert_eq!(classify(7.2, ph), Status::Ideal);
        assert_eq!(classify(7.19, ph), Status::ActionRequired);
        assert_eq!(classify(7.81, ph), Status::ActionRequired);
    }

    #[test]
    fn shared_lower_bound_goes_straight_to_action() {
        // TDS ideal and acceptable both start at 400.
        let tds = range_for(RangeKey::Tds);
        assert_eq!(classify(400.0, tds), Status::Ideal);
        assert_eq!(classify(399.9, tds), Status::ActionRequired);
        assert_eq!(classify(1800.0, tds), Status::Acceptable);
    }

    #[test]
    fn classify_matches_definition_over_a_sweep() {
        let r = range((10.0, 20.0), Some((5.0, 30.0)));
        let mut v = -5.0;
        while v <= 40.0 {
            let expected = if (10.0..=20.0).contains(&v) {
                Status::Ideal
            } else if (5.0..=30.0).contains(&v) {
                Status::Acceptable
            } else {
                Status::ActionRequired
            };
            assert_eq!(classify(v, &r), expected, "value {v}");
            assert_eq!(classify(v, &r), classify(v, &r));
            v += 0.25;
        }
    }

    #[test]
    fn nan_falls_through_to_action() {
        let r = range((1.0, 2.0), Some((0.0, 3.0)));
        assert_eq!(classify(f64::NAN, &r), Status::ActionRequired);
        assert_eq!(Deviation::of(f64::NAN, &r), Deviation::Unknown);
    }

    #[test]
    fn deviation_uses_outer_band() {
        let ta = range_for(RangeKey::TotalAlkalinity);
        assert_eq!(Deviation::of(59.0, ta), Deviation::Below);
        assert_eq!(Deviation::of(70.0, ta), Deviation::Within);
        assert_eq!(Deviation::of(181.0, ta), Deviation::Above);

        let ch = range_for(RangeKey::CalciumHardness);
        assert_eq!(Deviation::of(199.0, ch), Deviation::Below);
        assert_eq!(Deviation::of(401.0, ch), Deviation::Above);
    }

    #[test]
    fn aggregate_any_action_wins() {
        let result = aggregate_status([Status::Ideal, Status::ActionRequired, Status::Acceptable]);
        assert_eq!(result, Status::ActionRequired);
    }

    #[test]
    fn aggregate_acceptable_without_action() {
        let result = aggregate_status([Status::Ideal, Status::Acceptable, Status::Ideal]);
        assert_eq!(result, Status::Acceptable);
    }

    #[test]
    fn aggregate_all_ideal() {
        assert_eq!(aggregate_status([Status::Ideal, Status::Ideal]), Status::Ideal);
    }

    #[test]
    fn aggregate_empty_is_ideal() {
        assert_eq!(aggregate_status(std::iter::empty()), Status::Ideal);
    }

    #[test]
    fn icon_follows_status() {
        assert_eq!(Status::Ideal.icon(), IconClass::CheckCircle);
        assert_eq!(Status::Acceptable.icon(), IconClass::ExclamationCircle);
        assert_eq!(Status::ActionRequired.icon(), IconClass::XCircle);
    }

    #[test]
    fn status_serializes_with_display_label() {
        assert_eq!(
            serde_json::to_string(&Status::ActionRequired).unwrap(),
            "\"Action Required\""
        );
        assert_eq!(serde_json::to_string(&IconClass::XCircle).unwrap(), "\"x-circle\"");
    }
}
