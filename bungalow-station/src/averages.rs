//! Daily averages across the bungalows that have submitted readings.
//!
//! Averages are taken over raw readings, never over analysis results.

use serde::Serialize;
use water_core::format::fixed;
use water_core::{range_for, Interval, RangeKey, Readings};

use crate::store::BungalowStore;

// ------------------------------------------------------------------ //
//  Types                                                              //
// ------------------------------------------------------------------ //

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub bungalow: u32,
    pub value: f64,
}

/// One parameter's readings across bungalows, with the extent a chart
/// should draw them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub label: &'static str,
    pub unit: &'static str,
    pub points: Vec<SeriesPoint>,
    pub average: f64,
    pub ideal: Interval,
    pub y_min: f64,
    pub y_max: f64,
}

/// Label / formatted value pair shown as a summary card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAverages {
    /// Bungalows with submitted readings.
    pub count: usize,
    pub chlorine: f64,
    pub ph: f64,
    pub total_alkalinity: f64,
    pub temperature: f64,
    pub chlorine_trend: TrendSeries,
    pub ph_trend: TrendSeries,
}

// ------------------------------------------------------------------ //
//  Computation                                                        //
// ------------------------------------------------------------------ //

impl TrendSeries {
    fn build(
        label: &'static str,
        unit: &'static str,
        key: RangeKey,
        points: Vec<SeriesPoint>,
        average: f64,
    ) -> Self {
        let range = range_for(key);
        let outer = range.outer();

        let y_min = points.iter().map(|p| p.value).fold(outer.lo, f64::min);
        let y_max = points.iter().map(|p| p.value).fold(outer.hi, f64::max);
        let padding = (y_max - y_min) * 0.1;

        Self {
            label,
            unit,
            points,
            average,
            ideal: range.ideal,
            y_min: (y_min - padding).max(0.0),
            y_max: y_max + padding,
        }
    }

    /// Column of `value` on an axis `width` cells wide spanning
    /// `y_min..=y_max`. Values outside the extent are clamped.
    pub fn position(&self, value: f64, width: usize) -> usize {
        if width == 0 {
            return 0;
        }
        let span = self.y_max - self.y_min;
        if span <= 0.0 {
            return width / 2;
        }
        let last = (width - 1) as f64;
        let ratio = ((value - self.y_min) / span).clamp(0.0, 1.0);
        (ratio * last).round() as usize
    }
}

impl DailyAverages {
    /// `None` when no bungalow has submitted readings.
    pub fn compute(store: &BungalowStore) -> Option<Self> {
        let submitted: Vec<_> = store
            .submitted()
            .map(|(id, state)| (id, state.readings))
            .collect();
        if submitted.is_empty() {
            return None;
        }

        let count = submitted.len();
        let n = count as f64;
        let mean = |f: fn(&Readings) -> f64| {
            submitted.iter().map(|(_, r)| f(r)).sum::<f64>() / n
        };

        let chlorine = mean(|r| r.chlorine);
        let ph = mean(|r| r.ph);
        let total_alkalinity = mean(|r| r.total_alkalinity);
        let temperature = mean(|r| r.temperature);

        let series = |f: fn(&Readings) -> f64| -> Vec<SeriesPoint> {
            submitted
                .iter()
                .map(|(id, r)| SeriesPoint { bungalow: *id, value: f(r) })
                .collect()
        };

        Some(Self {
            count,
            chlorine,
            ph,
            total_alkalinity,
            temperature,
            chlorine_trend: TrendSeries::build(
                "Chlorine",
                "ppm",
                RangeKey::Chlorine,
                series(|r| r.chlorine),
                chlorine,
            ),
            ph_trend: TrendSeries::build("pH", "", RangeKey::Ph, series(|r| r.ph), ph),
        })
    }

    pub fn cards(&self) -> [SummaryCard; 4] {
        [
            SummaryCard { label: "Avg. Chlorine", value: format!("{} ppm", fixed(self.chlorine, 2)) },
            SummaryCard { label: "Avg. pH", value: fixed(self.ph, 2) },
            SummaryCard { label: "Avg. Alkalinity", value: format!("{} ppm", fixed(self.total_alkalinity, 0)) },
            SummaryCard { label: "Avg. Temp", value: format!("{}°F", fixed(self.temperature, 1)) },
        ]
    }

    pub fn basis(&self) -> String {
        let plural = if self.count > 1 { "s" } else { "" };
        format!("Based on {} bungalow{plural} with submitted readings.", self.count)
    }
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_submitted_gives_none() {
        assert!(DailyAverages::compute(&BungalowStore::new(20)).is_none());
    }

    #[test]
    fn averages_only_submitted_bungalows() {
        let mut store = BungalowStore::new(20);
        store
            .submit(1, Readings { chlorine: 2.0, ph: 7.2, total_alkalinity: 80.0, temperature: 80.0, ..Readings::default() }, "Kai")
            .unwrap();
        store
            .submit(4, Readings { chlorine: 4.0, ph: 7.6, total_alkalinity: 121.0, temperature: 85.0, ..Readings::default() }, "Kai")
            .unwrap();

        let avg = DailyAverages::compute(&store).unwrap();
        assert_eq!(avg.count, 2);
        assert_eq!(avg.chlorine, 3.0);
        assert!((avg.ph - 7.4).abs() < 1e-9);
        assert_eq!(avg.total_alkalinity, 100.5);
        assert_eq!(avg.temperature, 82.5);

        let bungalows: Vec<u32> = avg.chlorine_trend.points.iter().map(|p| p.bungalow).collect();
        assert_eq!(bungalows, vec![1, 4]);
        assert_eq!(avg.basis(), "Based on 2 bungalows with submitted readings.");
    }

    #[test]
    fn summary_cards_are_formatted() {
        let mut store = BungalowStore::new(2);
        store
            .submit(1, Readings { chlorine: 3.125, ph: 7.456, total_alkalinity: 100.5, temperature: 84.25, ..Readings::default() }, "")
            .unwrap();
        let avg = DailyAverages::compute(&store).unwrap();
        let values: Vec<String> = avg.cards().iter().map(|c| c.value.clone()).collect();
        assert_eq!(values, vec!["3.13 ppm", "7.46", "101 ppm", "84.3°F"]);
        assert_eq!(avg.basis(), "Based on 1 bungalow with submitted readings.");
    }

    #[test]
    fn trend_extent_covers_band_and_pads() {
        let mut store = BungalowStore::new(2);
        store.submit(1, Readings { chlorine: 12.0, ..Readings::default() }, "").unwrap();
        let avg = DailyAverages::compute(&store).unwrap();
        let trend = &avg.chlorine_trend;

        // Values 1.0 (acceptable low) .. 12.0, padded by 1.1 and floored at 0.
        assert_eq!(trend.y_min, 0.0);
        assert!((trend.y_max - 13.1).abs() < 1e-9);
        assert_eq!(trend.ideal, Interval::new(2.0, 5.0));
    }

    #[test]
    fn ph_trend_uses_ideal_band_without_acceptable() {
        let mut store = BungalowStore::new(2);
        store.submit(1, Readings { ph: 7.5, ..Readings::default() }, "").unwrap();
        let trend = DailyAverages::compute(&store).unwrap().ph_trend;
        assert!((trend.y_min - 7.14).abs() < 1e-9);
        assert!((trend.y_max - 7.86).abs() < 1e-9);
    }

    #[test]
    fn position_maps_extent_to_columns() {
        let trend = TrendSeries {
            label: "x",
            unit: "",
            points: vec![],
            average: 0.0,
            ideal: Interval::new(0.0, 1.0),
            y_min: 0.0,
            y_max: 10.0,
        };
        assert_eq!(trend.position(0.0, 11), 0);
        assert_eq!(trend.position(5.0, 11), 5);
        assert_eq!(trend.position(10.0, 11), 10);
        assert_eq!(trend.position(50.0, 11), 10);

        let flat = TrendSeries { y_min: 3.0, y_max: 3.0, ..trend };
        assert_eq!(flat.position(3.0, 11), 5);
    }
}
