//! Printable water-quality report.
//!
//! Plain-text rendering of the store: ten bungalows per page, followed by
//! the daily averages and the chlorine / pH trends. A JSON form of the same
//! data is available for machine consumers.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::Serialize;
use water_core::format::fixed;
use water_core::{AnalysisResult, Status};

use crate::averages::{DailyAverages, TrendSeries};
use crate::ingest::ItemResult;
use crate::store::{BungalowState, BungalowStore};

pub const BUNGALOWS_PER_PAGE: usize = 10;

const RULE_WIDTH: usize = 64;
const TREND_WIDTH: usize = 40;

// ------------------------------------------------------------------ //
//  Text                                                               //
// ------------------------------------------------------------------ //

fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn page_header(out: &mut String, date: NaiveDate, page: usize, total: usize) {
    let _ = writeln!(out, "{:<40}{:>24}", "Polynesian Bungalows", long_date(date));
    let _ = writeln!(out, "{:<40}{:>24}", "Water Quality Report", format!("Page {page} of {total}"));
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
}

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Ideal          => "  ",
        Status::Acceptable     => "! ",
        Status::ActionRequired => "!!",
    }
}

fn bungalow_card(out: &mut String, id: u32, state: &BungalowState) {
    let _ = writeln!(out, "Bungalow {id}");
    if state.attendant_name.is_empty() {
        let _ = writeln!(out, "No attendant specified");
    } else {
        let _ = writeln!(out, "Attendant: {}", state.attendant_name);
    }

    match &state.results {
        Some(results) => {
            let _ = writeln!(out, "   {:<28}{:>12}  {}", "Parameter", "Value", "Status");
            for r in results {
                result_row(out, r);
            }
        }
        None => {
            let _ = writeln!(out, "No readings submitted.");
        }
    }
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

fn result_row(out: &mut String, r: &AnalysisResult) {
    let _ = writeln!(
        out,
        "{} {:<28}{:>12}  {}",
        status_marker(r.status),
        r.parameter.short_name(),
        r.value,
        r.status
    );
}

/// Paginated report of every bungalow in the store.
pub fn render_pages(store: &BungalowStore, date: NaiveDate) -> String {
    let entries: Vec<(u32, &BungalowState)> = store.iter().collect();
    let total = entries.len().div_ceil(BUNGALOWS_PER_PAGE).max(1);

    let mut out = String::new();
    for page in 0..total {
        if page > 0 {
            out.push('\u{c}');
            out.push('\n');
        }
        page_header(&mut out, date, page + 1, total);
        let start = page * BUNGALOWS_PER_PAGE;
        let end = (start + BUNGALOWS_PER_PAGE).min(entries.len());
        for (id, state) in &entries[start..end] {
            bungalow_card(&mut out, *id, state);
        }
    }
    out
}

/// One-line-per-bungalow trend with the ideal band shaded and the average
/// marked.
pub fn render_trend(trend: &TrendSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Trend", trend.label);

    let half = TREND_WIDTH / 2;
    let _ = writeln!(
        out,
        "  {:>6}  {:<half$}{:>half$}",
        "",
        fixed(trend.y_min, 1),
        fixed(trend.y_max, 1)
    );

    let band_lo = trend.position(trend.ideal.lo, TREND_WIDTH);
    let band_hi = trend.position(trend.ideal.hi, TREND_WIDTH);
    let avg = trend.position(trend.average, TREND_WIDTH);

    let mut axis: Vec<char> = (0..TREND_WIDTH)
        .map(|i| if (band_lo..=band_hi).contains(&i) { '=' } else { '.' })
        .collect();
    axis[avg.min(TREND_WIDTH - 1)] = '|';
    let _ = writeln!(
        out,
        "  {:>6}  {}  Avg: {}",
        "ideal",
        axis.iter().collect::<String>(),
        fixed(trend.average, 2)
    );

    for p in &trend.points {
        let col = trend.position(p.value, TREND_WIDTH);
        let line: String = (0..TREND_WIDTH).map(|i| if i == col { '*' } else { ' ' }).collect();
        let value = fixed(p.value, 2);
        let shown = if trend.unit.is_empty() { value } else { format!("{value} {}", trend.unit) };
        let _ = writeln!(out, "  {:>6}  {}  {}", format!("#{}", p.bungalow), line, shown);
    }
    out
}

/// Daily averages section. Without submissions only the prompt is shown.
pub fn render_averages(averages: Option<&DailyAverages>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Daily Averages Report");
    let Some(avg) = averages else {
        let _ = writeln!(
            out,
            "Submit readings for at least one bungalow to generate the average report."
        );
        return out;
    };

    let _ = writeln!(out, "{}", avg.basis());
    for card in avg.cards() {
        let _ = writeln!(out, "  {:<16}{:>12}", card.label, card.value);
    }
    let _ = writeln!(out);
    out.push_str(&render_trend(&avg.chlorine_trend));
    let _ = writeln!(out);
    out.push_str(&render_trend(&avg.ph_trend));
    out
}

/// Pages followed by the averages section.
pub fn render_text(store: &BungalowStore, date: NaiveDate) -> String {
    let mut out = render_pages(store, date);
    out.push('\n');
    out.push_str(&render_averages(DailyAverages::compute(store).as_ref()));
    out
}

// ------------------------------------------------------------------ //
//  JSON                                                               //
// ------------------------------------------------------------------ //

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BungalowEntry<'a> {
    pub id: u32,
    pub overall_status: Option<Status>,
    #[serde(flatten)]
    pub state: &'a BungalowState,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub date: NaiveDate,
    pub bungalows: Vec<BungalowEntry<'a>>,
    pub averages: Option<DailyAverages>,
    /// Per-submission outcome of the batch that produced this report.
    pub items: Vec<ItemResult>,
}

pub fn json_report(store: &BungalowStore, date: NaiveDate, items: Vec<ItemResult>) -> JsonReport<'_> {
    JsonReport {
        date,
        bungalows: store
            .iter()
            .map(|(id, state)| BungalowEntry {
                id,
                overall_status: state.overall_status(),
                state,
            })
            .collect(),
        averages: DailyAverages::compute(store),
        items,
    }
}

// ------------------------------------------------------------------ //
//  Tests                                                              //
// ------------------------------------------------------------------ //
