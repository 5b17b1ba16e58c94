//! Video files on the local disk.

use std::path::{Path, PathBuf};

use video_analyzer::{ClientError, ClientResult, VideoSource};

/// A video selected from the command line.
///
/// Only the metadata is read up front; the bytes are loaded when the upload
/// starts.
#[derive(Debug, Clone)]
pub struct LocalVideo {
    path: PathBuf,
    name: String,
    size: u64,
}

impl LocalVideo {
    pub async fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());

        Ok(Self { path, name, size: metadata.len() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> ClientResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| ClientError::Read(format!("{}: {}", self.path.display(), e)))
    }
}

impl VideoSource for LocalVideo {
    fn file_name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> u64 {
        self.size
    }
}
