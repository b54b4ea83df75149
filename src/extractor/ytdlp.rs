use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::commands::ExtractorCommandBuilder;
use super::ExtractorTrait;
use crate::config::DownloadConfig;
use crate::error::{Result, TubegrabError};
use crate::model::{DownloadRequest, DownloadStatus, StatusSink, VideoMetadata};

/// Extractor implementation speaking the yt-dlp command line.
///
/// Holds the staged tool paths for the lifetime of the process; they are
/// never mutated after construction, so one instance is shared across all
/// concurrent fetch and download tasks.
pub struct YtDlpExtractor {
    command_builder: ExtractorCommandBuilder,
    muxer_path: PathBuf,
    output_template: String,
}

impl YtDlpExtractor {
    pub fn new(config: DownloadConfig, extractor_path: &Path, muxer_path: &Path) -> Self {
        let command_builder =
            ExtractorCommandBuilder::new(extractor_path.to_string_lossy().to_string());

        Self {
            command_builder,
            muxer_path: muxer_path.to_path_buf(),
            output_template: config.output_template,
        }
    }
}

/// Split the tool's combined output into the metadata triple.
///
/// The first three newline-delimited fields are title, uploader and duration
/// in that order; trailing fields are ignored.
fn parse_metadata(raw: &str) -> Result<VideoMetadata> {
    let fields: Vec<&str> = raw.split('\n').collect();

    if fields.len() < 3 {
        return Err(TubegrabError::MalformedOutput(format!(
            "expected 3 newline-delimited fields, got {}",
            fields.len()
        )));
    }

    Ok(VideoMetadata {
        title: fields[0].to_string(),
        uploader: fields[1].to_string(),
        duration: fields[2].to_string(),
    })
}

#[async_trait]
impl ExtractorTrait for YtDlpExtractor {
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata> {
        info!("Fetching metadata for {}", url);

        let output = self.command_builder.metadata_query(url).capture().await?;
        parse_metadata(&output)
    }

    async fn download(&self, request: DownloadRequest, status: StatusSink) -> DownloadStatus {
        info!("Starting {:?} download for {}", request.kind, request.url);
        let _ = status.send(DownloadStatus::InProgress);

        let command = self.command_builder.download(
            request.kind,
            &self.muxer_path,
            &self.output_template,
            &request.url,
        );

        let terminal = match command.execute().await {
            Ok(()) => DownloadStatus::Complete,
            Err(e) => {
                warn!("Download failed for {}: {}", request.url, e);
                DownloadStatus::Failed(e.to_string())
            }
        };

        let _ = status.send(terminal.clone());
        terminal
    }

    async fn check_availability(&self) -> Result<()> {
        self.command_builder.version_check().execute().await?;
        debug!("Extraction tool is available");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use crate::model::MediaKind;
    #[cfg(unix)]
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn test_parse_metadata_triple() {
        let meta = parse_metadata("My Title\nSome Uploader\n00:03:12\n").unwrap();
        assert_eq!(meta.title, "My Title");
        assert_eq!(meta.uploader, "Some Uploader");
        assert_eq!(meta.duration, "00:03:12");
    }

    #[test]
    fn test_parse_metadata_ignores_trailing_fields() {
        let meta = parse_metadata("Title\nUploader\n212\nWARNING: extra diagnostic\n").unwrap();
        assert_eq!(meta.title, "Title");
        assert_eq!(meta.uploader, "Uploader");
        assert_eq!(meta.duration, "212");
    }

    #[test]
    fn test_parse_metadata_too_few_fields() {
        let result = parse_metadata("Title\nUploader");
        assert!(matches!(result, Err(TubegrabError::MalformedOutput(_))));
    }

    #[cfg(unix)]
    fn stage_script(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("fake-yt-dlp");
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    fn extractor_over(script: &Path) -> YtDlpExtractor {
        YtDlpExtractor::new(DownloadConfig::default(), script, Path::new("/tmp/unused-muxer"))
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_metadata_from_tool() {
        let dir = tempfile::tempdir().unwrap();
        let script = stage_script(
            &dir,
            "#!/bin/sh\nprintf 'My Title\\nSome Uploader\\n00:03:12\\n'\n",
        );

        let meta = extractor_over(&script)
            .fetch_metadata("https://valid.example/watch?x")
            .await
            .unwrap();

        assert_eq!(meta.title, "My Title");
        assert_eq!(meta.uploader, "Some Uploader");
        assert_eq!(meta.duration, "00:03:12");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_tool_reports_process_error() {
        let dir = tempfile::tempdir().unwrap();
        let script = stage_script(
            &dir,
            "#!/bin/sh\necho 'ERROR: Video unavailable' >&2\nexit 1\n",
        );

        let err = extractor_over(&script)
            .fetch_metadata("https://valid.example/watch?x")
            .await
            .unwrap_err();

        match err {
            TubegrabError::Process(msg) => assert!(msg.contains("ERROR: Video unavailable")),
            other => panic!("expected process error, got {}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_reports_in_progress_then_complete() {
        let dir = tempfile::tempdir().unwrap();
        let script = stage_script(&dir, "#!/bin/sh\nexit 0\n");

        let (tx, mut rx) = unbounded_channel();
        let request = DownloadRequest {
            url: "https://valid.example/watch?x".to_string(),
            kind: MediaKind::Video,
        };

        let terminal = extractor_over(&script).download(request, tx).await;

        assert_eq!(rx.recv().await, Some(DownloadStatus::InProgress));
        assert_eq!(rx.recv().await, Some(DownloadStatus::Complete));
        assert_eq!(rx.recv().await, None);
        assert_eq!(terminal, DownloadStatus::Complete);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_reports_in_progress_then_failed() {
        let dir = tempfile::tempdir().unwrap();
        let script = stage_script(
            &dir,
            "#!/bin/sh\necho 'ERROR: Video unavailable' >&2\nexit 1\n",
        );

        let (tx, mut rx) = unbounded_channel();
        let request = DownloadRequest {
            url: "https://valid.example/watch?x".to_string(),
            kind: MediaKind::Audio,
        };

        let terminal = extractor_over(&script).download(request, tx).await;

        assert_eq!(rx.recv().await, Some(DownloadStatus::InProgress));
        match rx.recv().await {
            Some(DownloadStatus::Failed(reason)) => {
                assert!(reason.contains("ERROR: Video unavailable"))
            }
            other => panic!("expected failed status, got {:?}", other),
        }
        assert!(matches!(terminal, DownloadStatus::Failed(_)));
    }
}
