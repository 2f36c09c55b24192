//! Reading snapshot → ordered per-parameter verdicts.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::format::{fixed, plain, Unit};
use crate::lsi::{self, LsiBreakdown};
use crate::range::{range_for, RangeKey};
use crate::readings::Readings;
use crate::status::{classify, Deviation, IconClass, Status};

// ------------------------------------------------------------------ //
//  Types                                                              //
// ------------------------------------------------------------------ //

/// Analysed parameters, in the order results are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Chlorine,
    #[serde(rename = "pH")]
    Ph,
    Temperature,
    #[serde(rename = "Flow Rate")]
    FlowRate,
    #[serde(rename = "Total Alkalinity")]
    TotalAlkalinity,
    #[serde(rename = "Calcium Hardness")]
    CalciumHardness,
    #[serde(rename = "Total Dissolved Solids (TDS)")]
    Tds,
    #[serde(rename = "Langelier Saturation Index (LSI)")]
    Lsi,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::Chlorine,
        Parameter::Ph,
        Parameter::Temperature,
        Parameter::FlowRate,
        Parameter::TotalAlkalinity,
        Parameter::CalciumHardness,
        Parameter::Tds,
        Parameter::Lsi,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Parameter::Chlorine        => "Chlorine",
            Parameter::Ph              => "pH",
            Parameter::Temperature     => "Temperature",
            Parameter::FlowRate        => "Flow Rate",
            Parameter::TotalAlkalinity => "Total Alkalinity",
            Parameter::CalciumHardness => "Calcium Hardness",
            Parameter::Tds             => "Total Dissolved Solids (TDS)",
            Parameter::Lsi             => "Langelier Saturation Index (LSI)",
        }
    }

    /// Name without the abbreviation suffix, for narrow tables.
    pub fn short_name(self) -> &'static str {
        match self {
            Parameter::Tds => "Total Dissolved Solids",
            Parameter::Lsi => "Langelier Saturation Index",
            other => other.display_name(),
        }
    }

    pub fn range_key(self) -> RangeKey {
        match self {
            Parameter::Chlorine        => RangeKey::Chlorine,
            Parameter::Ph              => RangeKey::Ph,
            Parameter::Temperature     => RangeKey::Temperature,
            Parameter::FlowRate        => RangeKey::Flow,
            Parameter::TotalAlkalinity => RangeKey::TotalAlkalinity,
            Parameter::CalciumHardness => RangeKey::CalciumHardness,
            Parameter::Tds             => RangeKey::Tds,
            Parameter::Lsi             => RangeKey::Lsi,
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Verdict for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub parameter: Parameter,
    /// Value as shown to the operator, unit included.
    pub value: String,
    pub status: Status,
    pub ideal_range: String,
    pub message: String,
    pub icon: IconClass,
}

// ------------------------------------------------------------------ //
//  Decision tables                                                    //
// ------------------------------------------------------------------ //

/// Guest-facing wording for each outcome of one parameter.
#[derive(Debug)]
struct MessageTable {
    ideal: &'static str,
    acceptable: &'static str,
    below: &'static str,
    above: &'static str,
    /// Action required but the value sits on neither side (non-finite).
    fallback: &'static str,
}

impl MessageTable {
    fn select(&self, status: Status, deviation: Deviation) -> &'static str {
        match (status, deviation) {
            (Status::Ideal, _) => self.ideal,
            (Status::Acceptable, _) => self.acceptable,
            (Status::ActionRequired, Deviation::Below) => self.below,
            (Status::ActionRequired, Deviation::Above) => self.above,
            (Status::ActionRequired, _) => self.fallback,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ValueStyle {
    /// Two decimals.
    Fixed2,
    /// As entered.
    Plain,
}

impl ValueStyle {
    fn render(self, value: f64) -> String {
        match self {
            ValueStyle::Fixed2 => fixed(value, 2),
            ValueStyle::Plain  => plain(value),
        }
    }
}

/// How one measured parameter is read, shown and explained.
struct Rule {
    parameter: Parameter,
    read: fn(&Readings) -> f64,
    unit: Unit,
    style: ValueStyle,
    messages: MessageTable,
}

const PH_ADJUST: &str = "Adjust pH to prevent irritation and equipment damage.";
const TEMPERATURE_OK: &str = "Water temperature is in a safe and comfortable range.";
const TEMPERATURE_HIGH: &str = "Temperature exceeds recommended limit of 104°F for spas.";
const TDS_OK: &str = "TDS level is good.";
const TDS_HIGH: &str = "High TDS can reduce chlorine effectiveness. Consider partial drain and refill.";
const HARDNESS_ADJUST: &str = "Adjust to prevent scaling or etching of pool surfaces.";

static MEASURED: [Rule; 7] = [
    Rule {
        parameter: Parameter::Chlorine,
        read: |r| r.chlorine,
        unit: Unit::Ppm,
        style: ValueStyle::Fixed2,
        messages: MessageTable {
            ideal: "Sanitizer level is optimal. Continue daily monitoring.",
            acceptable: "Chlorine is acceptable. Continue monitoring and adjust as needed.",
            below: "Chlorine is critically low. Shock the water immediately and increase daily dosage.",
            above: "Chlorine is too high. Stop adding chlorine and allow level to decrease naturally.",
            fallback: "Adjust chlorine to ensure proper sanitation.",
        },
    },
    Rule {
        parameter: Parameter::Ph,
        read: |r| r.ph,
        unit: Unit::None,
        style: ValueStyle::Fixed2,
        messages: MessageTable {
            ideal: "pH is perfectly balanced.",
            acceptable: PH_ADJUST,
            below: PH_ADJUST,
            above: PH_ADJUST,
            fallback: PH_ADJUST,
        },
    },
    // The same warning covers both directions; cold water is not called out.
    Rule {
        parameter: Parameter::Temperature,
        read: |r| r.temperature,
        unit: Unit::Fahrenheit,
        style: ValueStyle::Plain,
        messages: MessageTable {
            ideal: TEMPERATURE_OK,
            acceptable: TEMPERATURE_OK,
            below: TEMPERATURE_HIGH,
            above: TEMPERATURE_HIGH,
            fallback: TEMPERATURE_HIGH,
        },
    },
    Rule {
        parameter: Parameter::FlowRate,
        read: |r| r.flow,
        unit: Unit::Gpm,
        style: ValueStyle::Plain,
        messages: MessageTable {
            ideal: "Flow rate is optimal for filtration and feature performance.",
            acceptable: "Flow is acceptable, but monitor for any circulation issues.",
            below: "Flow is low. Check for obstructions, clean filters, and inspect pump.",
            above: "Flow is high. This may indicate an issue or cause unnecessary wear on equipment. Check pump settings.",
            fallback: "Adjust flow rate to ensure proper circulation and filtration.",
        },
    },
    Rule {
        parameter: Parameter::TotalAlkalinity,
        read: |r| r.total_alkalinity,
        unit: Unit::Ppm,
        style: ValueStyle::Plain,
        messages: MessageTable {
            ideal: "Alkalinity is buffering pH effectively.",
            acceptable: "Alkalinity is acceptable but should be monitored closely.",
            below: "Alkalinity is low. Add sodium bicarbonate (biocarb) to raise and protect pH.",
            above: "Alkalinity is high, which can cause pH to drift up. Add muriatic acid carefully to lower.",
            fallback: "Adjust to stabilize pH and prevent fluctuations.",
        },
    },
    Rule {
        parameter: Parameter::CalciumHardness,
        read: |r| r.calcium_hardness,
        unit: Unit::Ppm,
        style: ValueStyle::Plain,
        messages: MessageTable {
            ideal: "Calcium level protects surfaces.",
            acceptable: HARDNESS_ADJUST,
            below: "Hardness is low, which can cause etching. Add calcium chloride to increase.",
            above: "Hardness is high, which can cause scaling. Consider a partial drain and refill with softer water.",
            fallback: HARDNESS_ADJUST,
        },
    },
    Rule {
        parameter: Parameter::Tds,
        read: |r| r.tds,
        unit: Unit::Ppm,
        style: ValueStyle::Plain,
        messages: MessageTable {
            ideal: TDS_OK,
            acceptable: TDS_OK,
            below: TDS_HIGH,
            above: TDS_HIGH,
            fallback: TDS_HIGH,
        },
    },
];

// ------------------------------------------------------------------ //
//  Evaluation                                                         //
// ------------------------------------------------------------------ //

fn measured_result(rule: &Rule, readings: &Readings) -> AnalysisResult {
    let value = (rule.read)(readings);
    let range = range_for(rule.parameter.range_key());
    let status = classify(value, range);
    let message = rule.messages.select(status, Deviation::of(value, range));

    AnalysisResult {
        parameter: rule.parameter,
        value: rule.unit.attach(&rule.style.render(value)),
        status,
        ideal_range: rule.unit.span(&range.ideal),
        message: message.to_string(),
        icon: status.icon(),
    }
}

fn lsi_result(lsi: &LsiBreakdown) -> AnalysisResult {
    let range = range_for(RangeKey::Lsi);
    let status = classify(lsi.value, range);

    AnalysisResult {
        parameter: Parameter::Lsi,
        value: fixed(lsi.value, 2),
        status,
        ideal_range: format!("{} to {}", plain(range.ideal.lo), plain(range.ideal.hi)),
        message: lsi.tendency().message().to_string(),
        icon: status.icon(),
    }
}

/// Analyse a snapshot: seven measured parameters followed by the LSI, always
/// in [`Parameter::ALL`] order.
///
/// Total for finite input. Non-finite values are not rejected here; they
/// classify as action-required with the generic message. Use
/// [`analyze_checked`] at input boundaries.
pub fn analyze(readings: &Readings) -> Vec<AnalysisResult> {
    let mut results = Vec::with_capacity(Parameter::ALL.len());
    for rule in &MEASURED {
        results.push(measured_result(rule, readings));
    }
    results.push(lsi_result(&lsi::calculate(readings)));
    results
}

/// [`analyze`] after rejecting non-finite fields.
pub fn analyze_checked(readings: &Readings) -> Result<Vec<AnalysisResult>, CoreError> {
    readings.validate()?;
    Ok(analyze(readings))
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //
