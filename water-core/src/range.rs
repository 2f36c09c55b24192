//! Fixed ideal / acceptable ranges for every analysed parameter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ------------------------------------------------------------------ //
//  Types                                                              //
// ------------------------------------------------------------------ //

/// Closed interval `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value <= self.hi
    }
}

/// Ideal band plus an optional wider acceptable band.
///
/// Without an acceptable band a value is either ideal or needs action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDefinition {
    pub ideal: Interval,
    pub acceptable: Option<Interval>,
}

impl RangeDefinition {
    /// The widest band that still avoids action: acceptable if present,
    /// otherwise ideal.
    pub fn outer(&self) -> Interval {
        self.acceptable.unwrap_or(self.ideal)
    }
}

/// Keys of the range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeKey {
    Chlorine,
    Ph,
    TotalAlkalinity,
    CalciumHardness,
    Temperature,
    Tds,
    Lsi,
    Flow,
}

impl RangeKey {
    pub const ALL: [RangeKey; 8] = [
        RangeKey::Chlorine,
        RangeKey::Ph,
        RangeKey::TotalAlkalinity,
        RangeKey::CalciumHardness,
        RangeKey::Temperature,
        RangeKey::Tds,
        RangeKey::Lsi,
        RangeKey::Flow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RangeKey::Chlorine        => "chlorine",
            RangeKey::Ph              => "ph",
            RangeKey::TotalAlkalinity => "totalAlkalinity",
            RangeKey::CalciumHardness => "calciumHardness",
            RangeKey::Temperature     => "temperature",
            RangeKey::Tds             => "tds",
            RangeKey::Lsi             => "lsi",
            RangeKey::Flow            => "flow",
        }
    }
}

impl std::fmt::Display for RangeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeKey {
    type Err = CoreError;

    /// Accepts the camelCase names used in reading payloads as well as
    /// their snake_case spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chlorine"                              => Ok(RangeKey::Chlorine),
            "ph"                                    => Ok(RangeKey::Ph),
            "totalAlkalinity" | "total_alkalinity" => Ok(RangeKey::TotalAlkalinity),
            "calciumHardness" | "calcium_hardness" => Ok(RangeKey::CalciumHardness),
            "temperature"                           => Ok(RangeKey::Temperature),
            "tds"                                   => Ok(RangeKey::Tds),
            "lsi"                                   => Ok(RangeKey::Lsi),
            "flow"                                  => Ok(RangeKey::Flow),
            other => Err(CoreError::UnknownRangeKey(other.to_string())),
        }
    }
}

// ------------------------------------------------------------------ //
//  Table                                                              //
// ------------------------------------------------------------------ //

const fn band(ideal: (f64, f64), acceptable: Option<(f64, f64)>) -> RangeDefinition {
    RangeDefinition {
        ideal: Interval::new(ideal.0, ideal.1),
        acceptable: match acceptable {
            Some((lo, hi)) => Some(Interval::new(lo, hi)),
            None => None,
        },
    }
}

static CHLORINE: RangeDefinition         = band((2.0, 5.0), Some((1.0, 10.0)));
static PH: RangeDefinition               = band((7.2, 7.8), None);
static TOTAL_ALKALINITY: RangeDefinition = band((80.0, 120.0), Some((60.0, 180.0)));
static CALCIUM_HARDNESS: RangeDefinition = band((200.0, 400.0), None);
static TEMPERATURE: RangeDefinition      = band((78.0, 95.0), Some((70.0, 104.0)));
static TDS: RangeDefinition              = band((400.0, 1500.0), Some((400.0, 2000.0)));
static LSI: RangeDefinition              = band((-0.3, 0.3), Some((-0.5, 0.5)));
static FLOW: RangeDefinition             = band((40.0, 80.0), Some((30.0, 90.0)));

/// Range for a typed key. Total: every key has an entry.
pub fn range_for(key: RangeKey) -> &'static RangeDefinition {
    match key {
        RangeKey::Chlorine        => &CHLORINE,
        RangeKey::Ph              => &PH,
        RangeKey::TotalAlkalinity => &TOTAL_ALKALINITY,
        RangeKey::CalciumHardness => &CALCIUM_HARDNESS,
        RangeKey::Temperature     => &TEMPERATURE,
        RangeKey::Tds             => &TDS,
        RangeKey::Lsi             => &LSI,
        RangeKey::Flow            => &FLOW,
    }
}

/// Range for a key given by name.
///
/// An unknown name is a wiring mistake in the caller, reported as
/// [`CoreError::UnknownRangeKey`].
pub fn range_for_name(name: &str) -> Result<&'static RangeDefinition, CoreError> {
    let key: RangeKey = name.parse()?;
    Ok(range_for(key))
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_published_values() {
        let cl = range_for(RangeKey::Chlorine);
        assert_eq!(cl.ideal, Interval::new(2.0, 5.0));
        assert_eq!(cl.acceptable, Some(Interval::new(1.0, 10.0)));

        assert_eq!(range_for(RangeKey::Ph).ideal, Interval::new(7.2, 7.8));
        assert_eq!(range_for(RangeKey::Ph).acceptable, None);

        assert_eq!(range_for(RangeKey::CalciumHardness).acceptable, None);
        assert_eq!(range_for(RangeKey::Tds).acceptable, Some(Interval::new(400.0, 2000.0)));
        assert_eq!(range_for(RangeKey::Lsi).ideal, Interval::new(-0.3, 0.3));
        assert_eq!(range_for(RangeKey::Flow).acceptable, Some(Interval::new(30.0, 90.0)));
    }

    #[test]
    fn acceptable_band_contains_ideal_band() {
        for key in RangeKey::ALL {
            let r = range_for(key);
            if let Some(acc) = r.acceptable {
                assert!(acc.lo <= r.ideal.lo && acc.hi >= r.ideal.hi, "{key} bands overlap wrongly");
            }
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(range_for_name("totalAlkalinity").unwrap(), range_for(RangeKey::TotalAlkalinity));
        assert_eq!(range_for_name("calcium_hardness").unwrap(), range_for(RangeKey::CalciumHardness));
        for key in RangeKey::ALL {
            assert_eq!(range_for_name(key.as_str()).unwrap(), range_for(key));
        }
    }

    #[test]
    fn unknown_name_is_config_error() {
        assert_eq!(
            range_for_name("cyanuricAcid"),
            Err(CoreError::UnknownRangeKey("cyanuricAcid".into()))
        );
    }

    #[test]
    fn outer_falls_back_to_ideal() {
        assert_eq!(range_for(RangeKey::Ph).outer(), Interval::new(7.2, 7.8));
        assert_eq!(range_for(RangeKey::Temperature).outer(), Interval::new(70.0, 104.0));
    }

    #[test]
    fn interval_is_closed() {
        let i = Interval::new(1.0, 2.0);
        assert!(i.contains(1.0));
        assert!(i.contains(2.0));
        assert!(!i.contains(0.999));
        assert!(!i.contains(f64::NAN));
    }
}
