//! Controller wiring: every view-model snapshot lands in a Leptos signal.

use leptos::*;
use video_analyzer::{StateSink, UploadAnalyzeController, ViewState};

use super::analysis::GlooAnalysisApi;

/// Publishes controller state into a signal.
pub struct SignalSink(pub WriteSignal<ViewState>);

impl StateSink for SignalSink {
    fn publish(&self, state: &ViewState) {
        self.0.set(state.clone());
    }
}

/// The controller as used by the page.
pub type Controller = UploadAnalyzeController<GlooAnalysisApi, SignalSink>;
