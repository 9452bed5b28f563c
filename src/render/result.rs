//! Success view.

use serde::Serialize;
use tracing::{debug, warn, Level};

use super::{ChartRenderer, ResultsPane};
use crate::error::RenderError;
use crate::model::{AnalysisResult, PerformancePoint};

/// Text content of the results pane after a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    /// Complexity badge, e.g. `O(n log n)`.
    pub badge: String,
    /// Confidence with one decimal and a trailing `%`.
    pub confidence: String,
    /// Static-analysis findings, input order.
    pub findings: Vec<String>,
    /// One `n = {size}: {time}ms` row per sample, input order.
    pub timings: Vec<String>,
}

impl ResultsView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            badge: result.complexity.clone(),
            confidence: format_confidence(result.confidence),
            findings: result.static_analysis.clone(),
            timings: result.performance_data.iter().map(format_timing).collect(),
        }
    }
}

/// Enough fractional digits to print any finite `f64` exactly.
const EXACT_DIGITS: usize = 1100;

pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", to_fixed(confidence, 1))
}

pub fn format_timing(point: &PerformancePoint) -> String {
    format!("n = {}: {}ms", point.size, to_fixed(point.time, 3))
}

/// Fixed-point text with `digits` decimals, ties rounded away from zero.
///
/// Rounds the exact binary value, so `1.005` (really 1.00499..) gives
/// `1.00` while `92.25` gives `92.3`. `format!("{:.1}")` would give `92.2`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();

    if frac_part.as_bytes().get(digits).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in kept.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
        }
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&b| b as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&b| b as char));
    }
    out
}

/// Paint the results view, then draw the performance chart.
///
/// Chart failures are logged and do not affect the text view.
pub fn render_result<P>(result: &AnalysisResult, pane: &mut P, charts: &mut ChartRenderer)
where
    P: ResultsPane + ?Sized,
{
    let view = ResultsView::from_result(result);
    pane.show_results(&view);

    match charts.render(
        &pane.chart_canvas(),
        &result.performance_data,
        &result.complexity,
    ) {
        Ok(()) => debug!(points = result.performance_data.len(), "chart rendered"),
        Err(e) if skip_level(&e, charts) == Level::DEBUG => {
            debug!(error = %e, "charts disabled; chart skipped")
        }
        Err(e) => warn!(error = %e, "chart rendering skipped"),
    }
}

/// Level for a chart that was not drawn. Only charts turned off on purpose stay quiet.
fn skip_level(error: &RenderError, charts: &ChartRenderer) -> Level {
    match error {
        RenderError::Unavailable if charts.is_disabled() => Level::DEBUG,
        _ => Level::WARN,
    }
}
