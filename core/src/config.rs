//! Client configuration.
//!
//! Hosts build a [`ClientConfig`] (the browser from compile-time constants,
//! the CLI from flags and environment) and derive [`Endpoints`] from it.

/// Path of the upload endpoint.
pub const UPLOAD_PATH: &str = "/upload";

/// Path of the analyze endpoint.
pub const ANALYZE_PATH: &str = "/analyze";

/// Path of the streaming analysis WebSocket.
pub const STREAM_PATH: &str = "/analyze-stream";

/// Multipart field carrying the video.
pub const UPLOAD_FIELD: &str = "file";

/// Form field carrying the filepath token.
pub const FILEPATH_FIELD: &str = "filepath";

/// Content type of the analyze request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Default upload limit (2 GiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Settings shared by every host.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Server origin. Empty means same origin as the page.
    pub base_url: String,
    /// Largest file accepted for upload, in bytes.
    pub max_file_size: u64,
    /// Analyze over `/analyze-stream` instead of `POST /analyze`.
    pub streaming: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            streaming: false,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.base_url)
    }
}

/// URLs of the analysis server endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, UPLOAD_PATH)
    }

    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    /// `ws://` or `wss://` URL of the streaming endpoint.
    ///
    /// With a same-origin base this is only a path; the browser resolves it
    /// against the page origin first.
    pub fn stream_url(&self) -> String {
        let base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.base_url.clone()
        };
        format!("{}{}", base, STREAM_PATH)
    }

    pub fn is_same_origin(&self) -> bool {
        self.base_url.is_empty()
    }
}

/// Body of the analyze request: `filepath=<url-encoded path>`.
pub fn analyze_form_body(filepath: &str) -> String {
    format!("{}={}", FILEPATH_FIELD, urlencoding::encode(filepath))
}
