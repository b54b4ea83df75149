use std::fmt;
use tokio::sync::mpsc::UnboundedSender;

/// Metadata triple reported by the extraction tool for one URL.
///
/// Produced per fetch request, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub uploader: String,
    /// Raw duration text as printed by the tool, not parsed into seconds.
    pub duration: String,
}

/// Which stream of the source to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

/// One user-triggered download action.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub kind: MediaKind,
}

/// Lifecycle of a download. Starts `InProgress` and transitions exactly once
/// to `Complete` or `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadStatus {
    InProgress,
    Complete,
    Failed(String),
}

impl DownloadStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DownloadStatus::InProgress)
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStatus::InProgress => write!(f, "Downloading..."),
            DownloadStatus::Complete => write!(f, "Download complete!"),
            DownloadStatus::Failed(reason) => write!(f, "Download failed: {}", reason),
        }
    }
}

/// Channel end the downloader reports status transitions on.
pub type StatusSink = UnboundedSender<DownloadStatus>;
