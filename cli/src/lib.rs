//! # video_analyzer_cli - terminal host for the analysis pipeline
//!
//! Runs [`video_analyzer::UploadAnalyzeController`] against a server with a
//! `reqwest` transport and prints the rendered scenes.
//!
//! ## Modules
//!
//! - [`api`] - HTTP transport
//! - [`source`] - Local video files
//! - [`output`] - Progress and result printing

pub mod api;
pub mod source;
pub mod output;

pub use api::ReqwestAnalysisApi;
pub use source::LocalVideo;
pub use output::{write_output, TerminalSink};

/// Server used when neither `--server` nor `VIDEO_ANALYZER_URL` is set.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Environment variable holding the server URL.
pub const SERVER_URL_ENV: &str = "VIDEO_ANALYZER_URL";
