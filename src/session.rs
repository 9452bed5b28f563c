//! Session controller: the analysis request lifecycle.
//!
//! ```text
//!   Idle ──submit──▶ Loading ──ok────▶ Success ─┐
//!                      │  ▲                      │
//!                      │  └──────submit──────────┤
//!                      └────failed──▶ Error ─────┘
//! ```
//!
//! A submission starts the progress sequencer and the analysis request
//! side by side. The request's settlement is the only thing that moves the
//! state machine; the sequencer is stopped on every settlement path.

use tracing::{debug, info, warn};

use crate::client::Analyzer;
use crate::editor::Editor;
use crate::error::ValidationError;
use crate::language::Language;
use crate::model::{AnalysisRequest, AnalysisResult};
use crate::progress::ProgressSequencer;
use crate::render::{render_error, render_result, ChartRenderer, ResultsPane};

/// What the user currently sees.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Error(String),
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::Success(_) => "success",
            UiState::Error(_) => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }
}

/// Result of a call to [`SessionController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An analysis was already in flight or the submit control was disabled.
    Ignored,
    /// Rejected locally; no request was sent and the state is unchanged.
    Rejected(ValidationError),
    /// The request settled; see [`SessionController::state`].
    Settled,
}

/// Mutable session data owned by the controller.
pub struct Session<E> {
    editor: E,
    language: Language,
    state: UiState,
    submit_enabled: bool,
    charts: ChartRenderer,
}

impl<E: Editor> Session<E> {
    /// Start a session. The editor is switched to `language` without
    /// touching its content.
    pub fn new(mut editor: E, language: Language, charts: ChartRenderer) -> Self {
        editor.set_syntax_mode(language);
        Self {
            editor,
            language,
            state: UiState::Idle,
            submit_enabled: true,
            charts,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Wires user actions to the client, the sequencer and the renderers.
pub struct SessionController<A, E, P> {
    analyzer: A,
    session: Session<E>,
    pane: P,
    sequencer: ProgressSequencer,
}

impl<A, E, P> SessionController<A, E, P>
where
    A: Analyzer,
    E: Editor,
    P: ResultsPane,
{
    pub fn new(analyzer: A, session: Session<E>, pane: P, sequencer: ProgressSequencer) -> Self {
        Self {
            analyzer,
            session,
            pane,
            sequencer,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.session.state
    }

    pub fn language(&self) -> Language {
        self.session.language
    }

    pub fn submit_enabled(&self) -> bool {
        self.session.submit_enabled
    }

    pub fn editor(&self) -> &E {
        &self.session.editor
    }

    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.session.editor
    }

    pub fn pane(&self) -> &P {
        &self.pane
    }

    pub fn has_chart(&self) -> bool {
        self.session.charts.has_chart()
    }

    /// Switch language: syntax mode changes and the editor content is
    /// replaced by the language's starter template.
    pub fn select_language(&mut self, language: Language) {
        let editor = &mut self.session.editor;
        editor.set_syntax_mode(language);
        editor.set_text(language.template());
        self.session.language = language;
        debug!(%language, "language selected");
    }

    /// Submit the editor content for analysis and wait for settlement.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.session.state.is_loading() || !self.session.submit_enabled {
            debug!(state = self.session.state.name(), "submit ignored");
            return SubmitOutcome::Ignored;
        }

        let request = match AnalysisRequest::new(self.session.editor.text(), self.session.language)
        {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "submission rejected");
                self.pane.show_validation(&e.to_string());
                return SubmitOutcome::Rejected(e);
            }
        };

        self.session.charts.clear();
        self.pane.clear();
        self.enter_loading();

        let run = self.sequencer.start();
        let settled = self.analyzer.analyze(&request).await;
        drop(run);
        self.set_submit_enabled(true);

        match settled {
            Ok(result) => {
                info!(
                    complexity = %result.complexity,
                    confidence = result.confidence,
                    "analysis succeeded"
                );
                self.session.state = UiState::Success(result.clone());
                render_result(&result, &mut self.pane, &mut self.session.charts);
            }
            Err(e) => {
                warn!(error = %e, "analysis failed");
                let message = e.user_message();
                render_error(&message, &mut self.pane);
                self.session.state = UiState::Error(message);
            }
        }

        SubmitOutcome::Settled
    }

    fn enter_loading(&mut self) {
        info!(
            from = self.session.state.name(),
            language = %self.session.language,
            "analysis started"
        );
        self.session.state = UiState::Loading;
        self.set_submit_enabled(false);
        self.pane.show_loading();
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.session.submit_enabled = enabled;
        self.pane.set_submit_enabled(enabled);
    }
}
