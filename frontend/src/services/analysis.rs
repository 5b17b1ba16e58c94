//! HTTP service for uploading videos and requesting their analysis, with
//! the `/analyze-stream` WebSocket for live progress.

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use gloo_net::http::Request;
use gloo_net::websocket::{futures::WebSocket, Message, WebSocketError};
use web_sys::{File, FormData};

use video_analyzer::config::{FORM_CONTENT_TYPE, UPLOAD_FIELD};
use video_analyzer::{
    accept_frame, analyze_form_body, decode_analysis, decode_upload, AnalysisApi,
    AnalysisResult, ClientConfig, ClientError, ClientResult, Endpoints, StreamEvent,
    UploadResult, VideoSource,
};

/// A file picked in the `<input type="file">`.
pub struct SelectedVideo(File);

impl SelectedVideo {
    pub fn new(file: File) -> Self {
        Self(file)
    }
}

impl VideoSource for SelectedVideo {
    fn file_name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }
}

/// Talks to `/upload` and `/analyze` with `fetch`, and to `/analyze-stream`
/// with a browser WebSocket.
pub struct GlooAnalysisApi {
    endpoints: Endpoints,
}

impl GlooAnalysisApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self { endpoints: config.endpoints() }
    }

    /// Absolute WebSocket URL; same-origin setups use the page origin.
    fn stream_url(&self) -> ClientResult<String> {
        if !self.endpoints.is_same_origin() {
            return Ok(self.endpoints.stream_url());
        }
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .ok_or_else(|| ClientError::Network("page origin unavailable".to_string()))?;
        Ok(Endpoints::new(&origin).stream_url())
    }
}

fn network_error(e: gloo_net::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn socket_error(e: WebSocketError) -> ClientError {
    ClientError::Network(e.to_string())
}

/// Send a request and return status and body text.
async fn send(request: Request) -> ClientResult<(u16, String)> {
    let response = request.send().await.map_err(network_error)?;
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    Ok((status, body))
}

#[async_trait(?Send)]
impl AnalysisApi for GlooAnalysisApi {
    type File = SelectedVideo;

    async fn upload(&self, file: &SelectedVideo) -> ClientResult<UploadResult> {
        let form_data = FormData::new()
            .map_err(|e| ClientError::Read(format!("Failed to create FormData: {:?}", e)))?;
        form_data
            .append_with_blob_and_filename(UPLOAD_FIELD, &file.0, &file.file_name())
            .map_err(|e| ClientError::Read(format!("Failed to append file: {:?}", e)))?;

        let request = Request::post(&self.endpoints.upload_url())
            .body(form_data)
            .map_err(network_error)?;

        let (status, body) = send(request).await?;
        decode_upload(status, &body)
    }

    async fn analyze(&self, filepath: &str) -> ClientResult<AnalysisResult> {
        let request = Request::post(&self.endpoints.analyze_url())
            .header("Content-Type", FORM_CONTENT_TYPE)
            .body(analyze_form_body(filepath))
            .map_err(network_error)?;

        let (status, body) = send(request).await?;
        decode_analysis(status, &body)
    }

    async fn analyze_stream(
        &self,
        filepath: &str,
        on_event: &dyn for<'e> Fn(&'e StreamEvent),
    ) -> ClientResult<AnalysisResult> {
        let url = self.stream_url()?;
        log::info!("🔌 WebSocket {}", url);
        let mut socket =
            WebSocket::open(&url).map_err(|e| ClientError::Network(e.to_string()))?;
        socket.send(Message::Text(filepath.to_string())).await.map_err(socket_error)?;

        while let Some(message) = socket.next().await {
            let text = match message {
                Ok(Message::Text(text)) => text,
                Ok(Message::Bytes(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(WebSocketError::ConnectionClose(_)) => break,
                Err(e) => return Err(socket_error(e)),
            };
            if let Some(result) = accept_frame(&text, on_event)? {
                return Ok(result);
            }
        }

        Err(ClientError::stream_closed())
    }
}
