//! Frames of the `/analyze-stream` WebSocket.
//!
//! The client sends the filepath token as one text message. The server then
//! sends JSON frames:
//!
//! ```text
//! {"type": "...", "author": "...", "content": ..., "timestamp": 1.7e9}   progress, any number
//! {"type": "result", "content": {scenes, descriptions, ...}}            final result
//! {"error": "..."}                                                       failure
//! ```
//!
//! and closes the socket. Hosts own the socket and hand every text frame to
//! [`accept_frame`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::types::AnalysisResult;

/// `type` of the frame carrying the final [`AnalysisResult`].
pub const RESULT_FRAME: &str = "result";

/// A progress event emitted by one of the analysis agents.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamEvent {
    pub kind: String,
    pub author: Option<String>,
    /// Event content as text. Non-string content is kept as compact JSON.
    pub content: String,
    pub timestamp: Option<f64>,
}

impl StreamEvent {
    /// One-line form shown under the progress label.
    pub fn summary(&self) -> String {
        match self.author {
            Some(ref author) => format!("{}: {}", author, self.content),
            None => self.content.clone(),
        }
    }
}

/// One decoded frame.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamFrame {
    Event(StreamEvent),
    Result(AnalysisResult),
    Failed(String),
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    timestamp: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

impl StreamFrame {
    /// Decode a text frame. A result frame is validated like an `/analyze`
    /// body.
    pub fn from_json(text: &str) -> ClientResult<Self> {
        let raw: RawFrame = serde_json::from_str(text)?;

        if let Some(error) = raw.error {
            return Ok(StreamFrame::Failed(error));
        }

        match raw.kind.as_deref() {
            Some(RESULT_FRAME) => Ok(StreamFrame::Result(AnalysisResult::from_value(raw.content)?)),
            Some(kind) => Ok(StreamFrame::Event(StreamEvent {
                kind: kind.to_string(),
                author: raw.author,
                content: content_text(raw.content),
                timestamp: raw.timestamp,
            })),
            None => Err(ClientError::Decode("stream frame without type".to_string())),
        }
    }
}

fn content_text(content: Value) -> String {
    match content {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Handle one text frame.
///
/// Progress events go to `on_event`. Returns the result once the result
/// frame arrives, and fails on an error frame.
pub fn accept_frame(
    text: &str,
    on_event: &dyn Fn(&StreamEvent),
) -> ClientResult<Option<AnalysisResult>> {
    match StreamFrame::from_json(text)? {
        StreamFrame::Event(event) => {
            log::debug!("Stream event {} ({} chars)", event.kind, event.content.len());
            on_event(&event);
            Ok(None)
        }
        StreamFrame::Result(result) => Ok(Some(result)),
        StreamFrame::Failed(detail) => Err(ClientError::Stream { detail: Some(detail) }),
    }
}
