//! Performance chart lifecycle.
//!
//! [`ChartRenderer`] owns at most one live [`ChartInstance`]. Every render
//! destroys the previous instance before constructing a new one; charts are
//! never updated in place.

use serde::Serialize;

use super::CanvasId;
use crate::error::RenderError;
use crate::model::PerformancePoint;

pub const X_AXIS_TITLE: &str = "Input Size (n)";
pub const Y_AXIS_TITLE: &str = "Time (ms)";

/// Line-plot configuration handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    /// X-axis categories: the sample sizes, input order.
    pub categories: Vec<u64>,
    pub series: Vec<ChartSeries>,
    pub x_title: String,
    pub y_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
}

impl ChartConfig {
    /// Single-series timing plot labelled with the complexity class.
    ///
    /// An empty series is valid and yields an empty plot.
    pub fn timing(series: &[PerformancePoint], complexity: &str) -> Result<Self, RenderError> {
        if let Some(p) = series.iter().find(|p| !p.time.is_finite()) {
            return Err(RenderError::MalformedSeries(format!(
                "non-finite time at n = {}",
                p.size
            )));
        }

        Ok(Self {
            categories: series.iter().map(|p| p.size).collect(),
            series: vec![ChartSeries {
                label: format!("Execution Time ({})", complexity),
                values: series.iter().map(|p| p.time).collect(),
            }],
            x_title: X_AXIS_TITLE.to_string(),
            y_title: Y_AXIS_TITLE.to_string(),
        })
    }

    /// Number of plotted points.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Charting primitive: draws a line plot on a canvas.
pub trait ChartBackend {
    fn create(
        &self,
        canvas: &CanvasId,
        config: &ChartConfig,
    ) -> Result<Box<dyn ChartInstance>, RenderError>;
}

/// A chart drawn by a [`ChartBackend`].
pub trait ChartInstance {
    fn destroy(&mut self);
}

/// Owns the single chart bound to the results canvas.
pub struct ChartRenderer {
    backend: Option<Box<dyn ChartBackend>>,
    current: Option<Box<dyn ChartInstance>>,
    disabled: bool,
}

impl ChartRenderer {
    pub fn new(backend: Box<dyn ChartBackend>) -> Self {
        Self {
            backend: Some(backend),
            current: None,
            disabled: false,
        }
    }

    /// Renderer whose charting primitive is missing; every render is skipped.
    pub fn unavailable() -> Self {
        Self {
            backend: None,
            current: None,
            disabled: false,
        }
    }

    /// Renderer for output where charts were turned off on purpose.
    pub fn disabled() -> Self {
        Self {
            backend: None,
            current: None,
            disabled: true,
        }
    }

    /// Replace the current chart with one for `series`.
    ///
    /// The previous chart is destroyed even when the new one cannot be drawn.
    pub fn render(
        &mut self,
        canvas: &CanvasId,
        series: &[PerformancePoint],
        complexity: &str,
    ) -> Result<(), RenderError> {
        self.clear();

        let backend = self.backend.as_ref().ok_or(RenderError::Unavailable)?;
        let config = ChartConfig::timing(series, complexity)?;
        self.current = Some(backend.create(canvas, &config)?);
        Ok(())
    }

    /// Destroy the live chart, if any.
    pub fn clear(&mut self) {
        if let Some(mut chart) = self.current.take() {
            chart.destroy();
        }
    }

    pub fn has_chart(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl Drop for ChartRenderer {
    fn drop(&mut self) {
        self.clear();
    }
}
