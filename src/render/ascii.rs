//! Terminal line-plot backend.
//!
//! Categories are spread evenly across the plot width (a category axis,
//! not a numeric one). The y-axis runs linearly from 0 to the largest value.
//! Consecutive points are joined by linear interpolation.

use colored::*;

use super::chart::{ChartBackend, ChartConfig, ChartInstance};
use super::CanvasId;
use crate::error::RenderError;

pub const MIN_WIDTH: usize = 16;
pub const MIN_HEIGHT: usize = 4;

const POINT: char = '●';
const LINE: char = '·';

/// Draws charts to stdout.
#[derive(Debug, Clone, Copy)]
pub struct AsciiChartBackend {
    width: usize,
    height: usize,
}

impl AsciiChartBackend {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
        }
    }
}

impl ChartBackend for AsciiChartBackend {
    fn create(
        &self,
        canvas: &CanvasId,
        config: &ChartConfig,
    ) -> Result<Box<dyn ChartInstance>, RenderError> {
        let lines = plot(config, self.width, self.height)?;
        let label = config
            .series
            .first()
            .map(|s| s.label.as_str())
            .unwrap_or_default();

        println!("  {}", label.cyan());
        for line in &lines {
            println!("  {}", line);
        }
        println!();

        Ok(Box::new(AsciiChart {
            canvas: canvas.clone(),
            lines,
        }))
    }
}

/// A chart already written to the terminal.
///
/// Terminal output cannot be erased, so destroying only drops the buffer.
#[derive(Debug)]
pub struct AsciiChart {
    canvas: CanvasId,
    lines: Vec<String>,
}

impl ChartInstance for AsciiChart {
    fn destroy(&mut self) {
        tracing::trace!(canvas = %self.canvas.0, "ascii chart destroyed");
        self.lines.clear();
    }
}

/// Render the first series of `config` into text lines.
///
/// The output has a y-axis title, `height` plot rows, an x-axis rule, the
/// first and last category labels, and the x-axis title.
pub fn plot(config: &ChartConfig, width: usize, height: usize) -> Result<Vec<String>, RenderError> {
    let series = config
        .series
        .first()
        .ok_or_else(|| RenderError::MalformedSeries("no series".to_string()))?;
    let values = &series.values;
    if values.len() != config.categories.len() {
        return Err(RenderError::MalformedSeries(format!(
            "{} values for {} categories",
            values.len(),
            config.categories.len()
        )));
    }

    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    let max = if max > 0.0 { max } else { 1.0 };

    let column = |i: usize| -> usize {
        if values.len() == 1 {
            0
        } else {
            (i * (width - 1) + (values.len() - 1) / 2) / (values.len() - 1)
        }
    };
    let row = |v: f64| -> usize {
        let scaled = (v.max(0.0) / max * (height - 1) as f64).round() as usize;
        scaled.min(height - 1)
    };

    // grid[0] is the bottom row.
    let mut grid = vec![vec![' '; width]; height];
    let points: Vec<(usize, usize)> = values
        .iter()
        .enumerate()
        .map(|(i, v)| (column(i), row(*v)))
        .collect();

    for pair in points.windows(2) {
        let (c0, r0) = pair[0];
        let (c1, r1) = pair[1];
        if c1 <= c0 {
            continue;
        }
        for c in c0..=c1 {
            let t = (c - c0) as f64 / (c1 - c0) as f64;
            let r = (r0 as f64 + t * (r1 as f64 - r0 as f64)).round() as usize;
            grid[r.min(height - 1)][c] = LINE;
        }
    }
    for &(c, r) in &points {
        grid[r][c] = POINT;
    }

    let top_label = format!("{:.3}", max);
    let label_width = top_label.len().max(1);
    let mut lines = Vec::with_capacity(height + 4);

    lines.push(format!("{}{}", " ".repeat(label_width + 1), config.y_title));
    for (i, cells) in grid.iter().enumerate().rev() {
        let (label, tick) = if i == height - 1 {
            (top_label.as_str(), '┤')
        } else if i == 0 {
            ("0", '┤')
        } else {
            ("", '│')
        };
        let body: String = cells.iter().collect();
        lines.push(format!("{:>w$} {}{}", label, tick, body.trim_end(), w = label_width));
    }
    lines.push(format!("{:>w$} └{}", "", "─".repeat(width), w = label_width));

    let first = config.categories.first().map(u64::to_string).unwrap_or_default();
    let last = config.categories.last().map(u64::to_string).unwrap_or_default();
    let gap = (width + 1).saturating_sub(first.len() + last.len()).max(1);
    let axis = if config.categories.len() > 1 {
        format!("{}{}{}", first, " ".repeat(gap), last)
    } else {
        first
    };
    lines.push(format!("{:>w$}  {}", "", axis, w = label_width));
    lines.push(format!(
        "{:>w$}  {:^width$}",
        "",
        config.x_title,
        w = label_width,
        width = width
    ));

    Ok(lines)
}
