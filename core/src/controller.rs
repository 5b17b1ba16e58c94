//! Upload → analyze → render orchestration and the view model it drives.
//!
//! ```text
//!            submit                upload ok              analyze ok
//!  ┌──────┐ ───────▶ ┌──────────────────────┐ ───────▶ ┌───────────────────────┐ ───────▶ ┌──────┐
//!  │ Idle │          │ Working(Uploading)   │          │ Working(Analyzing)    │          │ Done │
//!  └──────┘ ◀─────── └──────────────────────┘          └───────────────────────┘          └──────┘
//!      ▲      error                                            │ error                       │
//!      └───────────────────────────────────────────────────────┘                             │
//!      └────────────────────────────────── reset ────────────────────────────────────────────┘
//! ```
//!
//! With [`ClientConfig::streaming`] set, the analyze step runs over the
//! WebSocket and every progress event updates [`ViewState::activity`].
//!
//! The controller owns no UI handles. Every change is pushed as a full
//! [`ViewState`] snapshot to the injected [`StateSink`].

use std::cell::RefCell;

use crate::api::{AnalysisApi, VideoSource};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ValidationError};
use crate::render::{render, ResultsView};
use crate::stream::StreamEvent;
use crate::types::AnalysisResult;

/// Prefix of the message shown when the pipeline fails.
pub const ERROR_PREFIX: &str = "エラーが発生しました";

// =============================================================================
// View Model
// =============================================================================

/// Step of an in-flight submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Uploading,
    Analyzing,
}

impl Progress {
    /// Text of the progress label.
    pub fn label(&self) -> &'static str {
        match self {
            Progress::Uploading => "アップロード中...",
            Progress::Analyzing => "分析中...",
        }
    }
}

/// UI phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Working(Progress),
    Done,
}

/// Everything a host needs to draw the page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    pub phase: Phase,
    /// Content of the results panel, set in [`Phase::Done`].
    pub results: Option<ResultsView>,
    /// Message replacing the blocking alert of a plain page.
    pub error: Option<String>,
    /// Latest streamed progress event, while analyzing.
    pub activity: Option<String>,
}

impl ViewState {
    pub fn is_working(&self) -> bool {
        matches!(self.phase, Phase::Working(_))
    }

    pub fn upload_panel_visible(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn analysis_panel_visible(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn loading_visible(&self) -> bool {
        self.is_working()
    }

    pub fn results_visible(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn progress_label(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Working(progress) => Some(progress.label()),
            _ => None,
        }
    }
}

/// Receives a snapshot after every state change.
pub trait StateSink {
    fn publish(&self, state: &ViewState);
}

impl<F> StateSink for F
where
    F: Fn(&ViewState),
{
    fn publish(&self, state: &ViewState) {
        self(state)
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Reject a missing or oversized selection.
pub fn check_selection<F: VideoSource>(
    file: Option<&F>,
    max_file_size: u64,
) -> Result<&F, ValidationError> {
    let file = file.ok_or(ValidationError::NoFileSelected)?;
    let size = file.size();
    if size > max_file_size {
        return Err(ValidationError::FileTooLarge { size, limit: max_file_size });
    }
    Ok(file)
}

// =============================================================================
// Controller
// =============================================================================

/// Drives one upload/analysis cycle at a time.
pub struct UploadAnalyzeController<A, S> {
    api: A,
    sink: S,
    max_file_size: u64,
    streaming: bool,
    state: RefCell<ViewState>,
}

impl<A, S> UploadAnalyzeController<A, S>
where
    A: AnalysisApi,
    S: StateSink,
{
    /// Create the controller and publish the initial `Idle` state.
    pub fn new(api: A, sink: S, config: &ClientConfig) -> Self {
        let controller = Self {
            api,
            sink,
            max_file_size: config.max_file_size,
            streaming: config.streaming,
            state: RefCell::new(ViewState::default()),
        };
        controller.sink.publish(&controller.state());
        controller
    }

    /// Snapshot of the current view model.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Upload `file`, analyze it and render the result.
    ///
    /// Failures reset the page to `Idle` with the error message set and are
    /// returned as well. A call made while another one is in flight fails
    /// with [`ClientError::Busy`] and leaves the state untouched.
    pub async fn submit(&self, file: Option<A::File>) -> ClientResult<AnalysisResult> {
        if self.state.borrow().is_working() {
            log::warn!("Submission ignored: analysis already in progress");
            return Err(ClientError::Busy);
        }

        let file = match check_selection(file.as_ref(), self.max_file_size) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Submission rejected: {}", e);
                self.update(|s| s.error = Some(e.to_string()));
                return Err(e.into());
            }
        };

        log::info!("Uploading {} ({} bytes)", file.file_name(), file.size());
        self.update(|s| {
            s.phase = Phase::Working(Progress::Uploading);
            s.results = None;
            s.error = None;
            s.activity = None;
        });

        match self.run(file).await {
            Ok(result) => {
                let view = render(&result);
                log::info!("Analysis finished: {} scene(s)", result.scenes.len());
                self.update(|s| {
                    s.phase = Phase::Done;
                    s.results = Some(view);
                    s.activity = None;
                });
                Ok(result)
            }
            Err(e) => {
                match e.detail() {
                    Some(detail) => log::warn!("Pipeline failed: {} ({})", e, detail),
                    None => log::warn!("Pipeline failed: {}", e),
                }
                self.update(|s| {
                    s.phase = Phase::Idle;
                    s.results = None;
                    s.activity = None;
                    s.error = Some(format!("{}: {}", ERROR_PREFIX, e));
                });
                Err(e)
            }
        }
    }

    async fn run(&self, file: &A::File) -> ClientResult<AnalysisResult> {
        let upload = self.api.upload(file).await?;
        log::info!("Uploaded to {}", upload.filepath);

        self.update(|s| s.phase = Phase::Working(Progress::Analyzing));
        if !self.streaming {
            return self.api.analyze(&upload.filepath).await;
        }

        let on_event = |event: &StreamEvent| {
            let summary = event.summary();
            self.update(|s| s.activity = Some(summary));
        };
        self.api.analyze_stream(&upload.filepath, &on_event).await
    }

    /// Go back to the upload form, dropping results and error.
    ///
    /// Has no effect while a submission is in flight.
    pub fn reset(&self) {
        if self.state.borrow().is_working() {
            log::warn!("Reset ignored: analysis in progress");
            return;
        }
        self.update(|s| *s = ViewState::default());
    }

    /// Clear the error message.
    pub fn dismiss_error(&self) {
        if self.state.borrow().error.is_some() {
            self.update(|s| s.error = None);
        }
    }

    // The borrow is released before publishing so sinks may read `state()`.
    fn update(&self, f: impl FnOnce(&mut ViewState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        self.sink.publish(&snapshot);
    }
}
