// Report view controller — owns the state of one report view.
//
// The view state (URL input, phase, sort) lives behind a single RwLock and
// only the methods here change it. The lock is never held across the
// network call, so renderers can snapshot the state while a request is
// outstanding.
//
// Phases per analysis cycle:
//   Idle -> Submitting -> Success(report) | Failed(error)
// Success and Failed are interactive again. Entering Submitting drops the
// previous report or error before the request goes out.
//
// Only one request runs at a time. A trigger while Submitting is ignored,
// not queued. After `teardown` any result that arrives is discarded.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::analyzer::error::AnalysisError;
use crate::analyzer::traits::AnalysisBackend;
use crate::report::models::{AnalysisReport, Violation};
use crate::report::sort::{SortKey, SortState};

/// Where the view is in its analysis cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting {
        url: String,
    },
    Success(AnalysisReport),
    Failed(AnalysisError),
}

/// Everything a renderer needs to draw the view.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Raw text in the URL field
    pub input: String,
    pub phase: Phase,
    /// Survives new analyses; only changed by `toggle_sort`
    pub sort: SortState,
    closed: bool,
}

impl ViewState {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.phase {
            Phase::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match &self.phase {
            Phase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Current report's violations in current sort order.
    pub fn sorted_violations(&self) -> Vec<Violation> {
        self.report()
            .map(|r| self.sort.apply(&r.violations))
            .unwrap_or_default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// What happened to one trigger of the analyze action.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A request was already in flight; nothing was sent.
    Ignored,
    /// The input normalized to nothing; the view shows a validation error.
    Rejected,
    /// The request finished and the view now shows its result.
    Completed(Result<AnalysisReport, AnalysisError>),
    /// The request finished after teardown; the result was dropped.
    Discarded,
}

/// Result of [`ReportController::launch`].
#[derive(Debug)]
pub enum Launch {
    /// The view is `Submitting`; the handle yields the final outcome.
    Started(JoinHandle<Submission>),
    /// Nothing was sent.
    Settled(Submission),
}

impl Launch {
    pub fn into_handle(self) -> Option<JoinHandle<Submission>> {
        match self {
            Launch::Started(handle) => Some(handle),
            Launch::Settled(_) => None,
        }
    }
}

/// Trim the input and make sure it carries an http(s) scheme.
///
/// Returns an empty string for blank input. Anything else is left for the
/// service to reject.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Controller for one report view. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ReportController {
    backend: Arc<dyn AnalysisBackend>,
    state: Arc<RwLock<ViewState>>,
}

impl ReportController {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    /// Replace the URL field's text.
    ///
    /// The field is locked while a request is in flight; returns whether the
    /// new text was taken.
    pub async fn set_input(&self, raw: &str) -> bool {
        let mut state = self.state.write().await;
        if state.is_busy() || state.closed {
            return false;
        }
        state.input = raw.to_string();
        true
    }

    /// Run one analysis cycle for the current input.
    pub async fn analyze(&self) -> Submission {
        match self.begin(None).await {
            Ok(url) => self.finish(url).await,
            Err(settled) => settled,
        }
    }

    /// Start an analysis and return once the view is `Submitting`.
    ///
    /// `input`, when given, replaces the URL field in the same step that
    /// enters `Submitting`, so no other trigger can slip in between. The
    /// request itself runs on a background task.
    pub async fn launch(&self, input: Option<&str>) -> Launch {
        match self.begin(input).await {
            Ok(url) => {
                let controller = self.clone();
                Launch::Started(tokio::spawn(async move { controller.finish(url).await }))
            }
            Err(settled) => Launch::Settled(settled),
        }
    }

    /// Check the guards and enter `Submitting`. `Err` carries the outcome
    /// of a trigger that sends nothing.
    async fn begin(&self, input: Option<&str>) -> Result<String, Submission> {
        let mut state = self.state.write().await;

        if state.closed {
            return Err(Submission::Discarded);
        }
        if state.is_busy() {
            debug!("Analysis already in flight, ignoring trigger");
            return Err(Submission::Ignored);
        }
        if let Some(input) = input {
            state.input = input.to_string();
        }

        let url = normalize_url(&state.input);
        if url.is_empty() {
            state.phase = Phase::Failed(AnalysisError::Validation);
            return Err(Submission::Rejected);
        }

        state.phase = Phase::Submitting { url: url.clone() };
        Ok(url)
    }

    async fn finish(&self, url: String) -> Submission {
        info!(url = %url, "Analyzing");
        let result = self.backend.submit_analysis(&url).await;

        let mut state = self.state.write().await;
        if state.closed {
            debug!(url = %url, "View torn down, discarding analysis result");
            return Submission::Discarded;
        }

        state.phase = match &result {
            Ok(report) => Phase::Success(report.clone()),
            Err(err) => Phase::Failed(err.clone()),
        };

        Submission::Completed(result)
    }

    /// Column-header click.
    pub async fn toggle_sort(&self, key: SortKey) -> SortState {
        let mut state = self.state.write().await;
        state.sort.toggle(key);
        state.sort
    }

    /// Copy of the current view state for rendering.
    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.state.read().await.is_busy()
    }

    /// Release the view. Results that arrive afterwards are dropped.
    pub async fn teardown(&self) {
        self.state.write().await.closed = true;
    }
}
