//! JSON pane for programmatic consumption.

use serde::Serialize;
use tracing::error;

use super::{CanvasId, ErrorView, ResultsPane, ResultsView};

/// Document printed once per settled analysis.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<&'a ResultsView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> JsonReport<'a> {
    pub fn success(view: &'a ResultsView) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            status: "success",
            result: Some(view),
            error: None,
        }
    }

    pub fn failure(view: &'a ErrorView) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            status: "error",
            result: None,
            error: Some(&view.message),
        }
    }
}

/// Prints each outcome as pretty JSON on stdout.
#[derive(Debug, Default)]
pub struct JsonPane;

impl JsonPane {
    fn write(report: &JsonReport<'_>) {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!(error = %e, "failed to serialize report"),
        }
    }
}

impl ResultsPane for JsonPane {
    fn show_loading(&mut self) {}

    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn show_validation(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }

    fn show_results(&mut self, view: &ResultsView) {
        Self::write(&JsonReport::success(view));
    }

    fn show_error(&mut self, view: &ErrorView) {
        Self::write(&JsonReport::failure(view));
    }

    fn clear(&mut self) {}

    fn chart_canvas(&self) -> CanvasId {
        CanvasId::performance()
    }
}
