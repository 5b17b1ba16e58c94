//! Application configuration.
//!
//! Hardcoded at build time. The page is served by the analysis server
//! itself, so requests go to the same origin.

use video_analyzer::ClientConfig;

/// Analysis server base URL. Empty means same origin.
pub const API_BASE_URL: &str = "";

/// Application name shown in the hero section.
pub const APP_NAME: &str = "登山動画シーン説明ジェネレーター";

/// Maximum file size for upload (in bytes).
///
/// 2 GB limit.
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Analyze over the `/analyze-stream` WebSocket and show agent progress
/// under the loading label. Off: plain `POST /analyze`.
pub const STREAM_ANALYSIS: bool = false;

/// Client settings built from the constants above.
pub fn client_config() -> ClientConfig {
    ClientConfig::new(API_BASE_URL)
        .with_max_file_size(MAX_FILE_SIZE)
        .with_streaming(STREAM_ANALYSIS)
}
