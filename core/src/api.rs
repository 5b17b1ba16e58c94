//! Transport seam between the controller and the analysis server.
//!
//! Each host implements [`AnalysisApi`] with its own HTTP stack
//! (`gloo-net` in the browser, `reqwest` in the CLI). Both map responses
//! through [`decode_upload`] and [`decode_analysis`] so status handling and
//! payload checks stay identical.

use async_trait::async_trait;

use crate::error::{ClientError, ClientResult};
use crate::stream::StreamEvent;
use crate::types::{AnalysisResult, UploadResult};

/// A selected video, as far as validation needs to know it.
pub trait VideoSource {
    /// File name sent with the multipart part.
    fn file_name(&self) -> String;

    /// Size in bytes.
    fn size(&self) -> u64;
}

/// The endpoints of the analysis server.
///
/// Futures are not `Send`: the browser host runs on a single thread.
#[async_trait(?Send)]
pub trait AnalysisApi {
    type File: VideoSource;

    /// `POST /upload` with the file as multipart field `file`.
    async fn upload(&self, file: &Self::File) -> ClientResult<UploadResult>;

    /// `POST /analyze` with `filepath` as a url-encoded form field.
    async fn analyze(&self, filepath: &str) -> ClientResult<AnalysisResult>;

    /// Analyze over `/analyze-stream`, passing each progress event to
    /// `on_event`.
    ///
    /// Transports without a WebSocket fall back to [`analyze`](Self::analyze).
    async fn analyze_stream(
        &self,
        filepath: &str,
        on_event: &dyn for<'e> Fn(&'e StreamEvent),
    ) -> ClientResult<AnalysisResult> {
        let _ = on_event;
        self.analyze(filepath).await
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Map an `/upload` response to its result.
pub fn decode_upload(status: u16, body: &str) -> ClientResult<UploadResult> {
    if !is_success(status) {
        return Err(ClientError::upload(status, body));
    }
    UploadResult::from_json(body)
}

/// Map an `/analyze` response to its result.
pub fn decode_analysis(status: u16, body: &str) -> ClientResult<AnalysisResult> {
    if !is_success(status) {
        return Err(ClientError::analysis(status, body));
    }
    AnalysisResult::from_json(body)
}
