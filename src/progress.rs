//! Perceived-progress messages shown while an analysis is outstanding.
//!
//! The [`ProgressSequencer`] walks a [`ProgressScript`] on its own timer
//! chain: each emission schedules the next one as a single-shot
//! [`DelayedTask`] with that step's delay. It knows nothing about the real
//! request; the session controller stops it when the request settles.

use once_cell::sync::Lazy;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Default script, matching the backend's pipeline stages.
pub static DEFAULT_SCRIPT: Lazy<Arc<ProgressScript>> = Lazy::new(|| {
    const MESSAGES: [&str; 18] = [
        "Parsing code structure...",
        "Analyzing algorithm patterns...",
        "Detecting time complexity...",
        "Identifying nested loops...",
        "Checking for recursion...",
        "Examining data structures...",
        "Loading execution environment...",
        "Compiling test cases...",
        "Generating test data...",
        "Running performance benchmarks...",
        "Measuring execution time...",
        "Testing with small inputs...",
        "Testing with large inputs...",
        "Analyzing growth patterns...",
        "Calculating complexity metrics...",
        "Fitting complexity curves...",
        "Validating results...",
        "Finalizing analysis...",
    ];
    const DELAYS_MS: [u64; 17] = [
        2400, 3800, 4500, 1000, 2900, 4300, 1100, 3400, 950, 2250, 850, 3200, 2050, 1200, 1400,
        1800, 900,
    ];

    Arc::new(ProgressScript {
        messages: MESSAGES.iter().map(|m| m.to_string()).collect(),
        delays: DELAYS_MS.iter().copied().map(Duration::from_millis).collect(),
    })
});

/// Errors building a [`ProgressScript`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("progress script has no messages")]
    Empty,
    #[error("progress script needs {expected} delays for {messages} messages, got {actual}")]
    DelayCount {
        messages: usize,
        expected: usize,
        actual: usize,
    },
}

/// N messages paired with the N-1 delays between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressScript {
    messages: Vec<String>,
    delays: Vec<Duration>,
}

impl ProgressScript {
    pub fn new(messages: Vec<String>, delays: Vec<Duration>) -> Result<Self, ScriptError> {
        if messages.is_empty() {
            return Err(ScriptError::Empty);
        }
        if delays.len() != messages.len() - 1 {
            return Err(ScriptError::DelayCount {
                messages: messages.len(),
                expected: messages.len() - 1,
                actual: delays.len(),
            });
        }
        Ok(Self { messages, delays })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn message(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    /// Delay between message `index` and its successor. `None` for the last message.
    pub fn delay_after(&self, index: usize) -> Option<Duration> {
        self.delays.get(index).copied()
    }
}

/// Where progress messages are displayed.
pub trait ProgressSink: Send + Sync {
    fn show(&self, message: &str);
}

/// Sink for non-interactive output: messages only reach the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceSink;

impl ProgressSink for TraceSink {
    fn show(&self, message: &str) {
        debug!(progress = message, "analysis progress");
    }
}

/// Single-shot cancellable timer on the tokio runtime.
///
/// Dropping the handle detaches the task; only [`DelayedTask::cancel`] stops it.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Run `task` once after `delay`.
    pub fn schedule<F, Fut>(delay: Duration, task: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task().await;
        });
        Self { handle }
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

#[derive(Debug, Default)]
struct SequencerState {
    /// Incremented on every start; stale timers compare against it.
    run: u64,
    active: bool,
    emitted: usize,
    pending: Option<DelayedTask>,
}

struct Shared {
    script: Arc<ProgressScript>,
    sink: Arc<dyn ProgressSink>,
    state: Mutex<SequencerState>,
}

impl Shared {
    fn lock(&self) -> std::sync::MutexGuard<'_, SequencerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit message `index` of run `run` and schedule its successor.
    ///
    /// Runs under the state lock so a concurrent `stop` either happens
    /// entirely before (nothing emitted) or entirely after.
    fn emit(self: &Arc<Self>, run: u64, index: usize) {
        let mut state = self.lock();
        if !state.active || state.run != run {
            return;
        }
        let Some(message) = self.script.message(index) else {
            state.pending = None;
            return;
        };

        self.sink.show(message);
        state.emitted += 1;
        trace!(run, index, text = message, "progress message");

        state.pending = self.script.delay_after(index).map(|delay| {
            let shared = Arc::clone(self);
            DelayedTask::schedule(delay, move || async move {
                shared.emit(run, index + 1);
            })
        });
    }

    /// Stop the sequencer, or only run `run` when given.
    fn stop(&self, run: Option<u64>) {
        let mut state = self.lock();
        if run.is_some_and(|r| r != state.run) {
            return;
        }
        state.active = false;
        if let Some(task) = state.pending.take() {
            task.cancel();
        }
    }
}

/// Drives a [`ProgressScript`] into a [`ProgressSink`].
#[derive(Clone)]
pub struct ProgressSequencer {
    shared: Arc<Shared>,
}

impl ProgressSequencer {
    pub fn new(script: Arc<ProgressScript>, sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            shared: Arc::new(Shared {
                script,
                sink,
                state: Mutex::new(SequencerState::default()),
            }),
        }
    }

    /// Sequencer over [`DEFAULT_SCRIPT`].
    pub fn with_default_script(sink: Arc<dyn ProgressSink>) -> Self {
        Self::new(Arc::clone(&DEFAULT_SCRIPT), sink)
    }

    /// Begin from message 0. Any previous run is stopped first.
    ///
    /// Must be called from within a tokio runtime. The returned handle stops
    /// the run when dropped.
    #[must_use = "dropping the run handle stops the sequencer immediately"]
    pub fn start(&self) -> ProgressRun {
        let run = {
            let mut state = self.shared.lock();
            if let Some(task) = state.pending.take() {
                task.cancel();
            }
            state.run += 1;
            state.active = true;
            state.emitted = 0;
            state.run
        };
        self.shared.emit(run, 0);
        ProgressRun {
            shared: Arc::clone(&self.shared),
            run,
        }
    }

    /// Cancel any pending emission. Safe to call repeatedly.
    pub fn stop(&self) {
        self.shared.stop(None);
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock().active
    }

    /// Messages emitted by the current (or last) run.
    pub fn emitted(&self) -> usize {
        self.shared.lock().emitted
    }
}

/// Handle for one sequencer run; stops that run on drop.
pub struct ProgressRun {
    shared: Arc<Shared>,
    run: u64,
}

impl ProgressRun {
    pub fn stop(self) {
        // Drop does the work.
    }
}

impl Drop for ProgressRun {
    fn drop(&mut self) {
        self.shared.stop(Some(self.run));
    }
}
