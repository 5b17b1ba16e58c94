//! # video_analyzer - client pipeline for the mountain video analyzer
//!
//! Submits a video to the analysis server, waits for the scene analysis and
//! renders the scenes with their descriptions and editing suggestions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Video file  │────▶│ POST upload │────▶│ POST analyze│────▶│   render    │
//! │ (selected)  │     │ (multipart) │     │ (form enc.) │     │ ResultsView │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! With streaming enabled the analyze step runs over the `/analyze-stream`
//! WebSocket instead, reporting agent progress until the result frame.
//!
//! The HTTP stack and the UI are supplied by the host through
//! [`AnalysisApi`] and [`StateSink`]; this crate holds no browser or
//! runtime dependency.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy
//! - [`types`] - Wire types and boundary validation
//! - [`config`] - Base URL, limits and endpoint paths
//! - [`api`] - Transport trait and response decoding
//! - [`format`] - `MM:SS` time formatting
//! - [`stream`] - `/analyze-stream` frames
//! - [`render`] - Results panel content
//! - [`controller`] - The upload/analyze state machine

pub mod error;
pub mod types;
pub mod config;
pub mod api;
pub mod format;
pub mod stream;
pub mod render;
pub mod controller;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ClientError, ClientResult, ValidationError};

pub use types::{
    AnalysisResult,
    Description,
    EditingSuggestion,
    Scene,
    SceneId,
    SceneNote,
    UploadResult,
};

pub use config::{analyze_form_body, ClientConfig, Endpoints};

pub use api::{decode_analysis, decode_upload, AnalysisApi, VideoSource};

pub use format::format_time;

pub use stream::{accept_frame, StreamEvent, StreamFrame};

pub use render::{render, ResultsView, SceneEntry};

pub use controller::{
    check_selection,
    Phase,
    Progress,
    StateSink,
    UploadAnalyzeController,
    ViewState,
};
