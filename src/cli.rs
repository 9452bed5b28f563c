//! Command-line interface for complexity-analyzer.

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::client::AnalysisClient;
use crate::config::{self, Config};
use crate::editor::BufferEditor;
use crate::language::Language;
use crate::progress::{ProgressSequencer, ProgressSink, TraceSink};
use crate::render::terminal::write_header;
use crate::render::{AsciiChartBackend, ChartRenderer, JsonPane, ResultsPane, TerminalPane};
use crate::session::{Session, SessionController, SubmitOutcome, UiState};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Submit code to an analysis server and show its Big-O verdict.
///
/// While the server benchmarks the code, a progress sequence is shown.
/// The verdict is printed as text plus a timing chart, or as JSON.
#[derive(Parser)]
#[command(name = "complexity-analyzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a source file (or stdin)
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// Print or write a language's starter template
    Template(TemplateArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Source file to analyze; omit or use "-" for stdin
    pub path: Option<PathBuf>,

    /// Source language (default: from file extension, then config)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Analysis server base URL (overrides config)
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not show progress messages
    #[arg(long)]
    pub no_progress: bool,

    /// Do not draw the timing chart
    #[arg(long)]
    pub no_chart: bool,

    /// Submit the language's starter template instead of a file
    #[arg(long, conflicts_with = "path")]
    pub starter: bool,
}

/// Arguments for the template command.
#[derive(Parser)]
pub struct TemplateArgs {
    /// Language of the template
    pub language: Option<Language>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// List available languages
    #[arg(short, long)]
    pub list: bool,
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    // Validate format
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }
    let pretty = args.format == "pretty";

    // Load config, then apply flag overrides
    let (mut config, config_path) = match Config::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "config loaded");
    }
    if let Some(endpoint) = &args.endpoint {
        config.server.base_url = endpoint.clone();
        if let Err(e) = config::validate(&config) {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    }

    // Load the code into an editor buffer
    let fallback = args.language.unwrap_or(config.defaults.language);
    let editor = match load_editor(args.path.as_deref(), args.starter, fallback) {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let language = args.language.unwrap_or_else(|| editor.mode());

    let client = AnalysisClient::new(&config.server)?;
    let charts = if pretty && config.chart.enabled && !args.no_chart {
        ChartRenderer::new(Box::new(AsciiChartBackend::new(
            config.chart.width,
            config.chart.height,
        )))
    } else {
        ChartRenderer::disabled()
    };
    let show_progress = config.progress.enabled && !args.no_progress;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let state = if pretty {
        write_header(client.endpoint(), language);
        let pane = TerminalPane::new(show_progress);
        let sink = pane.progress_sink();
        let session = Session::new(editor, language, charts);
        runtime.block_on(drive(client, session, pane, sink, args.starter))
    } else {
        let session = Session::new(editor, language, charts);
        runtime.block_on(drive(client, session, JsonPane, Arc::new(TraceSink), args.starter))
    };

    Ok(match state {
        Some(UiState::Success(_)) => EXIT_SUCCESS,
        Some(_) => EXIT_FAILED,
        None => EXIT_ERROR,
    })
}

/// Run one submission; `None` when it never left the editor.
async fn drive<P: ResultsPane>(
    client: AnalysisClient,
    session: Session<BufferEditor>,
    pane: P,
    sink: Arc<dyn ProgressSink>,
    starter: bool,
) -> Option<UiState> {
    let sequencer = ProgressSequencer::with_default_script(sink);
    let language = session.language();
    let mut controller = SessionController::new(client, session, pane, sequencer);
    if starter {
        controller.select_language(language);
    }

    match controller.submit().await {
        SubmitOutcome::Settled => Some(controller.state().clone()),
        SubmitOutcome::Rejected(_) | SubmitOutcome::Ignored => None,
    }
}

/// Read code from a file, stdin, or start empty for `--starter`.
fn load_editor(
    path: Option<&Path>,
    starter: bool,
    fallback: Language,
) -> anyhow::Result<BufferEditor> {
    if starter {
        return Ok(BufferEditor::new("", fallback));
    }
    match path {
        Some(p) if p != Path::new("-") => BufferEditor::open(p, fallback)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", p.display(), e)),
        _ => {
            let code = std::io::read_to_string(std::io::stdin())?;
            Ok(BufferEditor::new(code, fallback))
        }
    }
}

/// Run the template command.
pub fn run_template(args: &TemplateArgs) -> anyhow::Result<i32> {
    // List mode
    if args.list {
        return list_languages();
    }

    let language = args.language.unwrap_or_default();
    let template = language.template();

    let Some(output) = &args.output else {
        println!("{}", template);
        return Ok(EXIT_SUCCESS);
    };

    // Check if output already exists
    if output.exists() {
        eprintln!("Error: file already exists: {}", output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(output, format!("{}\n", template)) {
        eprintln!("Error: failed to write template: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {} from the {} template", output.display(), language);
    println!();
    println!("Next steps:");
    println!("  1. Replace the body of algorithm() with your code");
    println!("  2. Run: complexity-analyzer analyze {}", output.display());

    Ok(EXIT_SUCCESS)
}

/// List available languages.
fn list_languages() -> anyhow::Result<i32> {
    println!("Available languages:");
    println!();

    for language in Language::ALL {
        let name = if language == Language::default() {
            format!("{} (default)", language)
        } else {
            language.to_string()
        };
        println!("  {:<20} .{}", name, language.extensions().join(", ."));
    }

    println!();
    println!("Usage:");
    println!("  complexity-analyzer template <language> [--output <path>]");

    Ok(EXIT_SUCCESS)
}
