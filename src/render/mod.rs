//! Presentation of analysis outcomes.
//!
//! Each renderer is split in two: a pure view model (`ResultsView`,
//! `ErrorView`, `ChartConfig`) and a thin step that applies it to a
//! [`ResultsPane`] or a chart backend.
//!
//! - `result`: success view and the render step that also drives the chart
//! - `error`: failure view
//! - `chart`: chart lifecycle (destroy before create)
//! - `ascii`: terminal line-plot backend
//! - `terminal`: colored text pane with a progress spinner
//! - `json`: machine-readable pane

pub mod ascii;
pub mod chart;
pub mod error;
pub mod json;
pub mod result;
pub mod terminal;

pub use ascii::AsciiChartBackend;
pub use chart::{ChartBackend, ChartConfig, ChartInstance, ChartRenderer, ChartSeries};
pub use error::{render_error, ErrorView};
pub use json::JsonPane;
pub use result::{render_result, ResultsView};
pub use terminal::TerminalPane;

/// Identifies the surface a chart is drawn on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanvasId(pub String);

impl CanvasId {
    /// Canvas of the performance graph section.
    pub fn performance() -> Self {
        CanvasId("performanceChart".to_string())
    }
}

impl Default for CanvasId {
    fn default() -> Self {
        Self::performance()
    }
}

/// The results area of the display plus the submit control.
pub trait ResultsPane {
    /// Hide previous content and show the loading indicator.
    fn show_loading(&mut self);
    fn set_submit_enabled(&mut self, enabled: bool);
    /// Local notice for a rejected submission; the pane content is unchanged.
    fn show_validation(&mut self, message: &str);
    fn show_results(&mut self, view: &ResultsView);
    fn show_error(&mut self, view: &ErrorView);
    /// Remove any rendered results or error.
    fn clear(&mut self);
    fn chart_canvas(&self) -> CanvasId;
}
