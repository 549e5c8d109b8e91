//! Terminal rendering of a cost report.
//!
//! Formats the prediction as currency, phrases the deviation from the
//! average charge, and draws two plain-text charts: a waterfall of the
//! attribution and a ranked bar chart of the three models. ANSI colors
//! follow the deployed convention: red raises the cost, blue lowers it;
//! ranking bands go green/yellow/red from cheapest to priciest.

use crate::app::{CostBand, CostReport, Deviation, ModelComparison};
use crate::explain::Explanation;

/// Display cap for attribution rows, largest magnitude first.
pub const MAX_DISPLAY_FEATURES: usize = 8;

const BAR_WIDTH: usize = 24;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const RESET: &str = "\x1b[0m";

/// Format a charge as currency: `$` plus thousands separators, 2 dp.
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Signed currency with an explicit `+` for non-negative amounts.
fn format_signed_currency(amount: f64) -> String {
    if amount < 0.0 {
        format_currency(amount)
    } else {
        format!("+{}", format_currency(amount))
    }
}

/// Phrase the prediction's relation to the average charge.
pub fn deviation_sentence(deviation: Deviation, average_charge: f64) -> String {
    let average = format_currency(average_charge);
    match deviation {
        Deviation::Higher(percent) => format!(
            "Your predicted charge is {percent:.1}% higher than the average ({average})."
        ),
        Deviation::Lower(percent) => format!(
            "Your predicted charge is {percent:.1}% lower than the average ({average})."
        ),
        Deviation::Same => {
            "Your predicted charge is exactly the same as the average.".to_string()
        }
    }
}

fn bar(len: usize) -> String {
    "\u{2588}".repeat(len.max(1))
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// Render the attribution waterfall.
///
/// Shows up to `max_display` contributions sorted by magnitude; when more
/// features exist than fit, the smallest are folded into one remainder row.
pub fn render_waterfall(explanation: &Explanation, max_display: usize) -> String {
    let sorted = explanation.sorted_contributions();
    let (shown, folded) = if sorted.len() > max_display {
        sorted.split_at(max_display.saturating_sub(1))
    } else {
        (sorted.as_slice(), &[] as &[_])
    };

    let label_width = shown
        .iter()
        .map(|c| c.name.len() + format!("{}", c.value).len() + 3)
        .max()
        .unwrap_or(0)
        .max("(0 other features)".len());
    let max_abs = shown
        .iter()
        .map(|c| c.contribution.abs())
        .fold(0.0f64, f64::max);

    let mut out = String::new();
    out.push_str(&format!(
        "Cost factors (base value {}):\n",
        format_currency(explanation.base_value)
    ));
    for c in shown {
        let label = format!("{} = {}", c.name, c.value);
        let color = if c.contribution >= 0.0 { RED } else { BLUE };
        let bar = bar(scaled(c.contribution.abs(), max_abs, BAR_WIDTH));
        out.push_str(&format!(
            "  {label:<label_width$} {color}{bar:<BAR_WIDTH$}{RESET} {}\n",
            format_signed_currency(c.contribution)
        ));
    }
    if !folded.is_empty() {
        let rest: f64 = folded.iter().map(|c| c.contribution).sum();
        let label = format!("({} other features)", folded.len());
        out.push_str(&format!(
            "  {label:<label_width$} {:<BAR_WIDTH$} {}\n",
            "",
            format_signed_currency(rest)
        ));
    }
    out.push_str(&format!(
        "  {:<label_width$} {:<BAR_WIDTH$} {}\n",
        "prediction",
        "",
        format_currency(explanation.prediction)
    ));
    out
}

/// Render the ranked three-model comparison chart.
pub fn render_comparison(comparison: &ModelComparison) -> String {
    let ranked = comparison.ranked();
    let max_prediction = ranked
        .iter()
        .map(|r| r.prediction.abs())
        .fold(0.0f64, f64::max);
    let name_width = ranked
        .iter()
        .map(|r| r.kind.display_name().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str("Model comparison (annual charge, cheapest first):\n");
    for entry in ranked {
        let color = match entry.band {
            CostBand::Lowest => GREEN,
            CostBand::Middle => YELLOW,
            CostBand::Highest => RED,
        };
        let bar = bar(scaled(entry.prediction.abs(), max_prediction, BAR_WIDTH));
        out.push_str(&format!(
            "  {:<9} {:<name_width$} {:>14} {color}{bar}{RESET}\n",
            entry.band.label(),
            entry.kind.display_name(),
            format_currency(entry.prediction),
        ));
    }
    out
}

/// Render the full report.
pub fn render_report(report: &CostReport, include_comparison: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Estimated Medical Charges: {}\n",
        format_currency(report.prediction)
    ));
    out.push_str(&deviation_sentence(report.deviation, report.average_charge));
    out.push_str("\n\n");
    out.push_str(&render_waterfall(&report.explanation, MAX_DISPLAY_FEATURES));
    if include_comparison {
        out.push('\n');
        out.push_str(&render_comparison(&report.comparison));
    }
    out
}
