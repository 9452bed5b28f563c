//! Complexity Analyzer - Big-O estimation client.
//!
//! Sends source code to an analysis service that benchmarks it and reports
//! the estimated time complexity, a confidence score, static-analysis
//! findings, and measured execution timings.
//!
//! # Architecture
//!
//! - `language`: supported languages and their starter templates
//! - `model`: request/response wire types
//! - `client`: HTTP client for the analysis endpoint
//! - `progress`: timed progress messages shown while a request is in flight
//! - `session`: the idle/loading/success/error lifecycle of a submission
//! - `render`: result, error, and chart presentation
//! - `editor`: the code buffer being analyzed
//! - `config`: YAML configuration
//! - `cli`: command-line entry points

pub mod cli;
pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod language;
pub mod model;
pub mod progress;
pub mod render;
pub mod session;

pub use client::{AnalysisClient, Analyzer};
pub use config::Config;
pub use editor::{BufferEditor, Editor};
pub use error::{ClientError, RenderError, ValidationError};
pub use language::Language;
pub use model::{AnalysisRequest, AnalysisResult, PerformancePoint};
pub use progress::{ProgressRun, ProgressScript, ProgressSequencer, ProgressSink};
pub use render::{ChartRenderer, ResultsPane};
pub use session::{Session, SessionController, SubmitOutcome, UiState};
