//! UI Components for the video analyzer page.
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Video file selection and submit
//! - [`AnalysisSection`] - Loading indicator and results panel
//! - [`ResultsList`] - Scene header and scene cards
//! - [`LoadingIndicator`] - Progress label while uploading/analyzing
//! - [`ErrorBanner`] - Dismissable error message

mod hero;
mod upload;
mod analysis;
mod results;
mod progress;
mod alert;
mod footer;

pub use hero::*;
pub use upload::*;
pub use analysis::*;
pub use results::*;
pub use progress::*;
pub use alert::*;
pub use footer::*;
