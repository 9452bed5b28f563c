//! End-to-end submission tests: controller, client, sequencer, renderers.

mod common;

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use common::{serve, server_config, unreachable_url};
use complexity_analyzer::render::{
    CanvasId, ChartBackend, ChartConfig, ChartInstance, ErrorView, ResultsView,
};
use complexity_analyzer::{
    AnalysisClient, AnalysisRequest, AnalysisResult, Analyzer, BufferEditor, ChartRenderer,
    ClientError, Language, ProgressScript, ProgressSequencer, ProgressSink, ResultsPane, Session,
    SessionController, SubmitOutcome, UiState,
};

type Log = Arc<Mutex<Vec<String>>>;

fn push(log: &Log, event: impl Into<String>) {
    log.lock().unwrap().push(event.into());
}

/// Pane that records every call into a shared log.
#[derive(Default)]
struct RecordingPane {
    log: Log,
    results: Vec<ResultsView>,
    errors: Vec<ErrorView>,
    validations: Vec<String>,
}

impl RecordingPane {
    fn new(log: Log) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }
}

impl ResultsPane for RecordingPane {
    fn show_loading(&mut self) {
        push(&self.log, "loading");
    }
    fn set_submit_enabled(&mut self, enabled: bool) {
        push(&self.log, format!("submit_enabled={}", enabled));
    }
    fn show_validation(&mut self, message: &str) {
        self.validations.push(message.to_string());
    }
    fn show_results(&mut self, view: &ResultsView) {
        push(&self.log, "results");
        self.results.push(view.clone());
    }
    fn show_error(&mut self, view: &ErrorView) {
        push(&self.log, "error");
        self.errors.push(view.clone());
    }
    fn clear(&mut self) {
        push(&self.log, "clear");
    }
    fn chart_canvas(&self) -> CanvasId {
        CanvasId::performance()
    }
}

/// Tracks live chart instances and the size of each drawn series.
#[derive(Clone, Default)]
struct Charts {
    live: Arc<Mutex<usize>>,
    drawn: Arc<Mutex<Vec<usize>>>,
}

struct Chart(Arc<Mutex<usize>>);

impl ChartBackend for Charts {
    fn create(
        &self,
        _canvas: &CanvasId,
        config: &ChartConfig,
    ) -> Result<Box<dyn ChartInstance>, complexity_analyzer::RenderError> {
        *self.live.lock().unwrap() += 1;
        self.drawn.lock().unwrap().push(config.len());
        Ok(Box::new(Chart(Arc::clone(&self.live))))
    }
}

impl ChartInstance for Chart {
    fn destroy(&mut self) {
        *self.0.lock().unwrap() -= 1;
    }
}

#[derive(Default)]
struct Messages(Mutex<Vec<String>>);

impl ProgressSink for Messages {
    fn show(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

fn session(code: &str, charts: &Charts) -> Session<BufferEditor> {
    Session::new(
        BufferEditor::new(code, Language::JavaScript),
        Language::JavaScript,
        ChartRenderer::new(Box::new(charts.clone())),
    )
}

const SORT_RESULT: &str = r#"{
    "complexity": "O(n log n)",
    "confidence": 92.5,
    "staticAnalysis": ["Uses comparison sort"],
    "performanceData": [{"size": 10, "time": 0.120}, {"size": 100, "time": 1.450}]
}"#;

#[tokio::test]
async fn test_successful_analysis_renders_view_and_chart() {
    let (url, _server) = serve(vec![(200, SORT_RESULT)]).await;
    let client = AnalysisClient::new(&server_config(&url)).unwrap();
    let charts = Charts::default();
    let messages = Arc::new(Messages::default());
    let sequencer = ProgressSequencer::with_default_script(messages.clone());
    let mut controller = SessionController::new(
        client,
        session("sort(arr)", &charts),
        RecordingPane::default(),
        sequencer.clone(),
    );

    assert_eq!(controller.submit().await, SubmitOutcome::Settled);

    assert!(matches!(controller.state(), UiState::Success(r) if r.complexity == "O(n log n)"));
    let view = &controller.pane().results[0];
    assert_eq!(view.badge, "O(n log n)");
    assert_eq!(view.confidence, "92.5%");
    assert_eq!(view.findings, vec!["Uses comparison sort"]);
    assert_eq!(view.timings, vec!["n = 10: 0.120ms", "n = 100: 1.450ms"]);
    assert_eq!(*charts.drawn.lock().unwrap(), vec![2]);
    assert_eq!(*charts.live.lock().unwrap(), 1);

    assert!(!sequencer.is_running());
    assert_eq!(
        messages.0.lock().unwrap().first().map(String::as_str),
        Some("Parsing code structure...")
    );
}

#[tokio::test]
async fn test_empty_code_never_reaches_the_backend() {
    let charts = Charts::default();
    let messages = Arc::new(Messages::default());
    let sequencer = ProgressSequencer::with_default_script(messages.clone());
    let client = AnalysisClient::new(&server_config(&unreachable_url())).unwrap();
    let mut controller =
        SessionController::new(client, session("", &charts), RecordingPane::default(), sequencer);

    assert_eq!(
        controller.submit().await,
        SubmitOutcome::Rejected(complexity_analyzer::ValidationError::EmptyCode)
    );
    assert_eq!(controller.state(), &UiState::Idle);
    assert_eq!(controller.pane().validations, vec!["Please enter code to analyze"]);
    assert!(controller.pane().log.lock().unwrap().is_empty());
    assert!(messages.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_error_is_shown_and_loading_ends() {
    let (url, _server) = serve(vec![(500, r#"{"error":"Execution timeout"}"#)]).await;
    let client = AnalysisClient::new(&server_config(&url)).unwrap();
    let charts = Charts::default();
    let sequencer = ProgressSequencer::with_default_script(Arc::new(Messages::default()));
    let mut controller = SessionController::new(
        client,
        session("while(true){}", &charts),
        RecordingPane::default(),
        sequencer.clone(),
    );

    assert_eq!(controller.submit().await, SubmitOutcome::Settled);

    assert_eq!(
        controller.state(),
        &UiState::Error("Execution timeout".to_string())
    );
    assert_eq!(controller.pane().errors[0].message, "Execution timeout");
    assert!(!sequencer.is_running());
    assert!(controller.submit_enabled());
    assert_eq!(*charts.live.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_transport_failure_settles_with_generic_message() {
    let client = AnalysisClient::new(&server_config(&unreachable_url())).unwrap();
    let charts = Charts::default();
    let sequencer = ProgressSequencer::with_default_script(Arc::new(Messages::default()));
    let mut controller = SessionController::new(
        client,
        session("sort(arr)", &charts),
        RecordingPane::default(),
        sequencer.clone(),
    );

    assert_eq!(controller.submit().await, SubmitOutcome::Settled);
    assert_eq!(
        controller.state(),
        &UiState::Error("Network error: unable to reach the analysis service".to_string())
    );
    assert!(!sequencer.is_running());
    assert!(controller.submit_enabled());
}

#[tokio::test]
async fn test_consecutive_analyses_keep_one_chart() {
    let (url, server) = serve(vec![(200, SORT_RESULT), (200, SORT_RESULT)]).await;
    let client = AnalysisClient::new(&server_config(&url)).unwrap();
    let charts = Charts::default();
    let sequencer = ProgressSequencer::with_default_script(Arc::new(Messages::default()));
    let mut controller = SessionController::new(
        client,
        session("sort(arr)", &charts),
        RecordingPane::default(),
        sequencer,
    );

    assert_eq!(controller.submit().await, SubmitOutcome::Settled);
    assert_eq!(*charts.live.lock().unwrap(), 1);
    assert_eq!(controller.submit().await, SubmitOutcome::Settled);
    assert_eq!(*charts.live.lock().unwrap(), 1);
    assert_eq!(charts.drawn.lock().unwrap().len(), 2);

    assert_eq!(server.await.unwrap().len(), 2);

    drop(controller);
    assert_eq!(*charts.live.lock().unwrap(), 0);
}

/// Records the call into the shared log, then waits so the sequencer can tick.
struct SlowAnalyzer {
    log: Log,
    delay: Duration,
}

#[async_trait]
impl Analyzer for SlowAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ClientError> {
        push(&self.log, format!("analyze:{}", request.code()));
        tokio::time::sleep(self.delay).await;
        Ok(AnalysisResult {
            complexity: "O(n)".into(),
            confidence: 75.0,
            static_analysis: vec![],
            performance_data: vec![],
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_submit_disabled_for_the_whole_call() {
    let log: Log = Arc::default();
    let script = Arc::new(
        ProgressScript::new(
            vec!["one".into(), "two".into(), "three".into()],
            vec![Duration::from_millis(100), Duration::from_millis(100)],
        )
        .unwrap(),
    );
    let messages = Arc::new(Messages::default());
    let sequencer = ProgressSequencer::new(script, messages.clone());
    let analyzer = SlowAnalyzer {
        log: Arc::clone(&log),
        delay: Duration::from_millis(150),
    };
    let charts = Charts::default();
    let mut controller = SessionController::new(
        analyzer,
        session("scan(xs)", &charts),
        RecordingPane::new(Arc::clone(&log)),
        sequencer.clone(),
    );

    assert_eq!(controller.submit().await, SubmitOutcome::Settled);

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "clear",
            "submit_enabled=false",
            "loading",
            "analyze:scan(xs)",
            "submit_enabled=true",
            "results",
        ]
    );
    // The call took 150ms: the first two messages were shown, the third never.
    assert_eq!(*messages.0.lock().unwrap(), vec!["one", "two"]);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(messages.0.lock().unwrap().len(), 2);
    assert!(!sequencer.is_running());
}
