//! End-to-end checks of the upload → analyze exchange against an in-process
//! server speaking the same protocol as the analysis service, over both
//! `POST /analyze` and the `/analyze-stream` WebSocket.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Multipart, State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use video_analyzer::{
    AnalysisApi, ClientConfig, ClientError, Phase, ResultsView, StreamEvent,
    UploadAnalyzeController, ViewState,
};
use video_analyzer_cli::{LocalVideo, ReqwestAnalysisApi};

const STORED_PATH: &str = "/tmp/uploads/登山 動画.mp4";

#[derive(Debug, Clone)]
struct ReceivedUpload {
    field: String,
    file_name: Option<String>,
    len: usize,
}

#[derive(Default)]
struct Seen {
    uploads: Vec<ReceivedUpload>,
    analyze_bodies: Vec<String>,
    analyze_content_types: Vec<String>,
    stream_requests: Vec<String>,
}

#[derive(Clone)]
struct MockServer {
    upload_status: StatusCode,
    analyze_status: StatusCode,
    analysis: Value,
    stream_frames: Vec<Value>,
    seen: Arc<Mutex<Seen>>,
}

impl MockServer {
    fn new(upload_status: StatusCode, analyze_status: StatusCode, analysis: Value) -> Self {
        Self {
            upload_status,
            analyze_status,
            analysis,
            stream_frames: Vec::new(),
            seen: Arc::new(Mutex::new(Seen::default())),
        }
    }

    /// Frames sent on `/analyze-stream` after the filepath arrives.
    fn with_stream_frames(mut self, frames: Vec<Value>) -> Self {
        self.stream_frames = frames;
        self
    }

    async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/upload", post(upload))
            .route("/analyze", post(analyze))
            .route("/analyze-stream", get(analyze_stream))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn uploads(&self) -> Vec<ReceivedUpload> {
        self.seen.lock().unwrap().uploads.clone()
    }

    fn analyze_bodies(&self) -> Vec<String> {
        self.seen.lock().unwrap().analyze_bodies.clone()
    }

    fn stream_requests(&self) -> Vec<String> {
        self.seen.lock().unwrap().stream_requests.clone()
    }
}

async fn upload(State(server): State<MockServer>, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let len = field.bytes().await.unwrap().len();
        server.seen.lock().unwrap().uploads.push(ReceivedUpload { field: name, file_name, len });
    }

    if server.upload_status.is_success() {
        (server.upload_status, Json(json!({ "filename": "climb.mp4", "filepath": STORED_PATH })))
    } else {
        (server.upload_status, Json(json!({ "error": "disk full" })))
    }
}

async fn analyze(
    State(server): State<MockServer>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    {
        let mut seen = server.seen.lock().unwrap();
        seen.analyze_bodies.push(body);
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        seen.analyze_content_types.push(content_type);
    }

    if server.analyze_status.is_success() {
        (server.analyze_status, Json(server.analysis.clone()))
    } else {
        (server.analyze_status, Json(json!({ "error": "model unavailable" })))
    }
}

async fn analyze_stream(State(server): State<MockServer>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_session(socket, server))
}

async fn stream_session(mut socket: WebSocket, server: MockServer) {
    let Some(Ok(Message::Text(filepath))) = socket.recv().await else {
        return;
    };
    server.seen.lock().unwrap().stream_requests.push(filepath.as_str().to_owned());

    for frame in &server.stream_frames {
        if socket.send(Message::Text(frame.to_string().into())).await.is_err() {
            return;
        }
    }
    socket.send(Message::Close(None)).await.ok();
}

fn progress_frame(author: &str, content: &str) -> Value {
    json!({ "type": "message", "author": author, "content": content, "timestamp": 1718000000.0 })
}

fn analysis_payload() -> Value {
    json!({
        "scenes": [
            { "scene_id": 1, "start_time": 0.0, "end_time": 30.0 },
            { "scene_id": 2, "start_time": 30.0, "end_time": 65.5 }
        ],
        "descriptions": [
            { "scene_id": 2, "text": "登山口から山道を登り始めています。" },
            { "scene_id": 1, "text": "登山の準備をしている様子です。" }
        ],
        "editing_suggestions": [
            { "scene_id": 1, "text": "短くカットするとよいでしょう。" }
        ]
    })
}

async fn video_fixture(dir: &tempfile::TempDir) -> LocalVideo {
    let path = dir.path().join("climb.mp4");
    std::fs::write(&path, vec![7u8; 4096]).unwrap();
    LocalVideo::open(&path).await.unwrap()
}

type Published = Rc<RefCell<Vec<ViewState>>>;

fn recording_sink() -> (impl Fn(&ViewState), Published) {
    let published: Published = Rc::new(RefCell::new(Vec::new()));
    let sink = {
        let published = published.clone();
        move |state: &ViewState| published.borrow_mut().push(state.clone())
    };
    (sink, published)
}

#[tokio::test]
async fn test_full_pipeline_against_server() {
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, analysis_payload());
    let config = ClientConfig::new(server.spawn().await);
    let dir = tempfile::tempdir().unwrap();

    let (sink, published) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let result = controller.submit(Some(video_fixture(&dir).await)).await.unwrap();
    assert_eq!(result.scenes.len(), 2);

    // Multipart field `file` with the original file name and all bytes
    let uploads = server.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field, "file");
    assert_eq!(uploads[0].file_name.as_deref(), Some("climb.mp4"));
    assert_eq!(uploads[0].len, 4096);

    // Filepath token forwarded url-encoded
    assert_eq!(
        server.analyze_bodies(),
        vec!["filepath=%2Ftmp%2Fuploads%2F%E7%99%BB%E5%B1%B1%20%E5%8B%95%E7%94%BB.mp4"]
    );
    assert_eq!(
        server.seen.lock().unwrap().analyze_content_types,
        vec!["application/x-www-form-urlencoded"]
    );

    let state = controller.state();
    assert_eq!(state.phase, Phase::Done);
    let entries = state.results.as_ref().unwrap().entries().to_vec();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].description.as_deref(), Some("登山の準備をしている様子です。"));
    assert_eq!(entries[0].suggestion.as_deref(), Some("短くカットするとよいでしょう。"));
    assert_eq!(entries[1].end, "01:05");
    assert_eq!(entries[1].suggestion, None);

    assert_eq!(published.borrow().last().unwrap().phase, Phase::Done);
}

#[tokio::test]
async fn test_upload_failure_never_calls_analyze() {
    let server = MockServer::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::OK,
        analysis_payload(),
    );
    let config = ClientConfig::new(server.spawn().await);
    let dir = tempfile::tempdir().unwrap();

    let (sink, _) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let err = controller.submit(Some(video_fixture(&dir).await)).await.unwrap_err();
    assert_eq!(err, ClientError::Upload { status: 500, detail: Some("disk full".into()) });
    assert!(server.analyze_bodies().is_empty());

    let state = controller.state();
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.upload_panel_visible());
    assert!(state.error.unwrap().contains("アップロードに失敗しました"));
}

#[tokio::test]
async fn test_analysis_failure_returns_to_idle() {
    let server = MockServer::new(StatusCode::OK, StatusCode::BAD_GATEWAY, analysis_payload());
    let config = ClientConfig::new(server.spawn().await);
    let dir = tempfile::tempdir().unwrap();

    let (sink, published) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let err = controller.submit(Some(video_fixture(&dir).await)).await.unwrap_err();
    assert!(matches!(err, ClientError::Analysis { status: 502, .. }));
    assert_eq!(server.analyze_bodies().len(), 1);

    let state = controller.state();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.results, None);
    assert!(published.borrow().iter().all(|s| s.results.is_none()));
}

#[tokio::test]
async fn test_invalid_interval_is_rejected_at_the_boundary() {
    let payload = json!({ "scenes": [{ "scene_id": "a", "start_time": 9, "end_time": 3 }] });
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, payload);
    let config = ClientConfig::new(server.spawn().await);
    let dir = tempfile::tempdir().unwrap();

    let api = ReqwestAnalysisApi::new(&config);
    let err = api.analyze(STORED_PATH).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));

    let uploaded = api.upload(&video_fixture(&dir).await).await.unwrap();
    assert_eq!(uploaded.filepath, STORED_PATH);
    assert_eq!(uploaded.filename.as_deref(), Some("climb.mp4"));
}

#[tokio::test]
async fn test_null_scene_list_ends_with_no_scenes() {
    let payload = json!({ "scenes": null, "descriptions": null, "editing_suggestions": null });
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, payload);
    let config = ClientConfig::new(server.spawn().await);
    let dir = tempfile::tempdir().unwrap();

    let (sink, _) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let result = controller.submit(Some(video_fixture(&dir).await)).await.unwrap();
    assert!(result.scenes.is_empty());

    let state = controller.state();
    assert_eq!(state.phase, Phase::Done);
    assert_eq!(state.error, None);
    assert_eq!(state.results, Some(ResultsView::NoScenes));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Grab a free port, then close it again
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{}", addr));
    let dir = tempfile::tempdir().unwrap();
    let (sink, _) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let err = controller.submit(Some(video_fixture(&dir).await)).await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert_eq!(controller.state().phase, Phase::Idle);
}

#[tokio::test]
async fn test_streaming_pipeline_reports_agent_progress() {
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, json!({})).with_stream_frames(vec![
        progress_frame("scene_detection_agent", "シーンを検出しています"),
        progress_frame("description_agent", "説明を生成しています"),
        json!({ "type": "result", "content": analysis_payload(), "timestamp": 1718000001.0 }),
    ]);
    let config = ClientConfig::new(server.spawn().await).with_streaming(true);
    let dir = tempfile::tempdir().unwrap();

    let (sink, published) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let result = controller.submit(Some(video_fixture(&dir).await)).await.unwrap();
    assert_eq!(result.scenes.len(), 2);

    // The filepath goes out as a raw text message, and POST /analyze is never used
    assert_eq!(server.stream_requests(), vec![STORED_PATH]);
    assert!(server.analyze_bodies().is_empty());

    let activities: Vec<String> =
        published.borrow().iter().filter_map(|s| s.activity.clone()).collect();
    assert_eq!(
        activities,
        vec![
            "scene_detection_agent: シーンを検出しています",
            "description_agent: 説明を生成しています",
        ]
    );

    let state = controller.state();
    assert_eq!(state.phase, Phase::Done);
    assert_eq!(state.activity, None);
    assert_eq!(state.results.unwrap().entries()[1].end, "01:05");
}

#[tokio::test]
async fn test_stream_error_frame_returns_to_idle() {
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, json!({})).with_stream_frames(vec![
        progress_frame("scene_detection_agent", "開始"),
        json!({ "error": "ffmpeg not found" }),
    ]);
    let config = ClientConfig::new(server.spawn().await).with_streaming(true);
    let dir = tempfile::tempdir().unwrap();

    let (sink, _) = recording_sink();
    let controller = UploadAnalyzeController::new(ReqwestAnalysisApi::new(&config), sink, &config);

    let err = controller.submit(Some(video_fixture(&dir).await)).await.unwrap_err();
    assert_eq!(err, ClientError::Stream { detail: Some("ffmpeg not found".into()) });

    let state = controller.state();
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.results, None);
    assert!(state.error.unwrap().contains("ストリーミング分析に失敗しました"));
}

#[tokio::test]
async fn test_stream_result_is_validated_like_analyze() {
    let reversed = json!({ "scenes": [{ "scene_id": 1, "start_time": 9, "end_time": 3 }] });
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, json!({}))
        .with_stream_frames(vec![json!({ "type": "result", "content": reversed })]);
    let config = ClientConfig::new(server.spawn().await).with_streaming(true);

    let api = ReqwestAnalysisApi::new(&config);
    let err = api.analyze_stream(STORED_PATH, &|_: &StreamEvent| {}).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_stream_closed_without_result() {
    let server = MockServer::new(StatusCode::OK, StatusCode::OK, json!({}))
        .with_stream_frames(vec![progress_frame("main_agent", "分析中")]);
    let config = ClientConfig::new(server.spawn().await).with_streaming(true);

    let api = ReqwestAnalysisApi::new(&config);
    let err = api.analyze_stream(STORED_PATH, &|_: &StreamEvent| {}).await.unwrap_err();
    assert_eq!(err, ClientError::stream_closed());
}
