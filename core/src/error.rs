//! Error types for the upload → analyze → render pipeline.
//!
//! - [`ValidationError`] - local checks done before any network call
//! - [`ClientError`] - everything `submit` can fail with
//!
//! `Display` output is the text shown to the user, so it stays in the
//! same language as the rest of the UI.

use thiserror::Error;

// =============================================================================
// Validation Errors
// =============================================================================

/// Problems with the file selection, detected before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Nothing was selected in the file input.
    #[error("動画ファイルを選択してください")]
    NoFileSelected,

    /// The file exceeds the configured upload limit.
    #[error("ファイルサイズが上限を超えています ({size} バイト / 上限 {limit} バイト)")]
    FileTooLarge { size: u64, limit: u64 },
}

// =============================================================================
// Client Errors (top-level)
// =============================================================================

/// Top-level error returned by
/// [`UploadAnalyzeController::submit`](crate::UploadAnalyzeController::submit).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The selection was rejected locally.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// `/upload` answered with a non-success status.
    #[error("アップロードに失敗しました (HTTP {status})")]
    Upload { status: u16, detail: Option<String> },

    /// `/analyze` answered with a non-success status.
    #[error("分析に失敗しました (HTTP {status})")]
    Analysis { status: u16, detail: Option<String> },

    /// The selected file could not be read.
    #[error("ファイルを読み込めませんでした: {0}")]
    Read(String),

    /// The request never produced a response.
    #[error("通信エラー: {0}")]
    Network(String),

    /// `/analyze-stream` reported an error or closed before the result.
    #[error("ストリーミング分析に失敗しました")]
    Stream { detail: Option<String> },

    /// The response body did not match the expected shape.
    #[error("レスポンスの形式が不正です: {0}")]
    Decode(String),

    /// A submission is already in flight.
    #[error("分析が進行中です")]
    Busy,
}

impl ClientError {
    /// Build an upload failure, keeping the server's error text if the body
    /// carries one.
    pub fn upload(status: u16, body: &str) -> Self {
        ClientError::Upload { status, detail: server_detail(body) }
    }

    /// Build an analysis failure, keeping the server's error text if the body
    /// carries one.
    pub fn analysis(status: u16, body: &str) -> Self {
        ClientError::Analysis { status, detail: server_detail(body) }
    }

    /// The stream ended without a result frame.
    pub fn stream_closed() -> Self {
        ClientError::Stream { detail: Some("connection closed before the result".to_string()) }
    }

    /// Diagnostic text sent by the server, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Upload { detail, .. }
            | ClientError::Analysis { detail, .. }
            | ClientError::Stream { detail } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

/// Pull `{"error": "..."}` out of a failure body, falling back to the raw text.
fn server_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
    Some(from_json.unwrap_or_else(|| body.to_string()))
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
