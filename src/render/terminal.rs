//! Colored terminal pane.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

use super::{CanvasId, ErrorView, ResultsPane, ResultsView};
use crate::language::Language;
use crate::progress::ProgressSink;

type SpinnerSlot = Arc<Mutex<Option<ProgressBar>>>;

/// Human-readable pane. Progress goes to a stderr spinner, results to stdout.
pub struct TerminalPane {
    spinner: SpinnerSlot,
    show_spinner: bool,
}

impl TerminalPane {
    pub fn new(show_spinner: bool) -> Self {
        Self {
            spinner: Arc::new(Mutex::new(None)),
            show_spinner,
        }
    }

    /// Sink that feeds sequencer messages into this pane's spinner.
    pub fn progress_sink(&self) -> Arc<dyn ProgressSink> {
        Arc::new(SpinnerSink {
            slot: Arc::clone(&self.spinner),
        })
    }

    fn finish_spinner(&self) {
        let bar = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for TerminalPane {
    fn drop(&mut self) {
        self.finish_spinner();
    }
}

impl ResultsPane for TerminalPane {
    fn show_loading(&mut self) {
        self.finish_spinner();
        if !self.show_spinner {
            return;
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        *self.spinner.lock().unwrap_or_else(PoisonError::into_inner) = Some(bar);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        debug!(enabled, "submit control");
        if enabled {
            self.finish_spinner();
        }
    }

    fn show_validation(&mut self, message: &str) {
        eprintln!("  {} {}", "!".yellow().bold(), message.yellow());
    }

    fn show_results(&mut self, view: &ResultsView) {
        self.finish_spinner();

        println!("  {}", "Detected Complexity".bold());
        println!("    {}", view.badge.green().bold());
        println!("    {}", format!("Confidence: {}", view.confidence).dimmed());
        println!();

        println!("  {} ({}):", "Static Analysis".bold(), view.findings.len());
        for finding in &view.findings {
            println!("    • {}", finding);
        }
        println!();

        println!("  {}:", "Execution Timings".bold());
        for timing in &view.timings {
            println!("    {}", timing);
        }
        println!();
    }

    fn show_error(&mut self, view: &ErrorView) {
        self.finish_spinner();

        println!("  {}", view.title.red().bold());
        println!("    {}", view.message.red());
        println!();
    }

    fn clear(&mut self) {
        // Printed output stays on screen; only transient state is reset.
        self.finish_spinner();
    }

    fn chart_canvas(&self) -> CanvasId {
        CanvasId::performance()
    }
}

struct SpinnerSink {
    slot: SpinnerSlot,
}

impl ProgressSink for SpinnerSink {
    fn show(&self, message: &str) {
        match self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(bar) => bar.set_message(message.to_string()),
            None => debug!(progress = message, "analysis progress"),
        }
    }
}

/// Banner printed before the analysis starts.
pub fn write_header(endpoint: &str, language: Language) {
    println!();
    print!("  ");
    print!("{}", "complexity-analyzer".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Language: ".dimmed());
    println!("{}", language);
    print!("  {}", "Endpoint: ".dimmed());
    println!("{}", endpoint);
    println!();
}
