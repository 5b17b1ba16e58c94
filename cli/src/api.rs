//! `reqwest` transport for the analysis server, plus `tokio-tungstenite`
//! for the streaming endpoint.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use video_analyzer::config::{FORM_CONTENT_TYPE, UPLOAD_FIELD};
use video_analyzer::{
    accept_frame, analyze_form_body, decode_analysis, decode_upload, AnalysisApi,
    AnalysisResult, ClientConfig, ClientError, ClientResult, Endpoints, StreamEvent,
    UploadResult, VideoSource,
};

use crate::source::LocalVideo;

/// Talks to `/upload` and `/analyze` over HTTP and to `/analyze-stream`
/// over a WebSocket.
pub struct ReqwestAnalysisApi {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ReqwestAnalysisApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self { client: reqwest::Client::new(), endpoints: config.endpoints() }
    }

    /// Send a request and return status and body text.
    async fn send(&self, request: reqwest::RequestBuilder) -> ClientResult<(u16, String)> {
        let response = request.send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;
        log::debug!("HTTP {} ({} bytes)", status, body.len());
        Ok((status, body))
    }
}

fn network_error(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn socket_error(e: tokio_tungstenite::tungstenite::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

#[async_trait(?Send)]
impl AnalysisApi for ReqwestAnalysisApi {
    type File = LocalVideo;

    async fn upload(&self, file: &LocalVideo) -> ClientResult<UploadResult> {
        let bytes = file.read().await?;
        let form = Form::new().part(UPLOAD_FIELD, Part::bytes(bytes).file_name(file.file_name()));

        let url = self.endpoints.upload_url();
        log::info!("POST {}", url);
        let (status, body) = self.send(self.client.post(url).multipart(form)).await?;
        decode_upload(status, &body)
    }

    async fn analyze(&self, filepath: &str) -> ClientResult<AnalysisResult> {
        let url = self.endpoints.analyze_url();
        log::info!("POST {}", url);
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(analyze_form_body(filepath));
        let (status, body) = self.send(request).await?;
        decode_analysis(status, &body)
    }

    async fn analyze_stream(
        &self,
        filepath: &str,
        on_event: &dyn for<'e> Fn(&'e StreamEvent),
    ) -> ClientResult<AnalysisResult> {
        let url = self.endpoints.stream_url();
        log::info!("WS {}", url);
        let (mut socket, _) = connect_async(url.as_str()).await.map_err(socket_error)?;
        socket.send(Message::text(filepath.to_string())).await.map_err(socket_error)?;

        while let Some(message) = socket.next().await {
            let text = match message.map_err(socket_error)? {
                Message::Text(text) => text.as_str().to_owned(),
                Message::Binary(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Message::Close(_) => break,
                _ => continue,
            };
            if let Some(result) = accept_frame(&text, on_event)? {
                socket.close(None).await.ok();
                return Ok(result);
            }
        }

        Err(ClientError::stream_closed())
    }
}
