// Extraction-tool orchestration.
//
// This module provides the abstraction over the external extraction tool:
// - Commands: invocation builders for the tool's command line
// - YtDlp: concrete implementation speaking the yt-dlp CLI

pub mod commands;
pub mod ytdlp;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

pub use commands::*;

use crate::config::DownloadConfig;
use crate::error::Result;
use crate::model::{DownloadRequest, DownloadStatus, StatusSink, VideoMetadata};
use crate::provision::ProvisionedTools;

/// Operations the coordinator needs from the extraction tool.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ExtractorTrait: Send + Sync {
    /// Query title, uploader and duration for a URL.
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata>;

    /// Run one download to its terminal status, reporting transitions on
    /// `status`. Never raises to the caller; failure is a terminal status.
    async fn download(&self, request: DownloadRequest, status: StatusSink) -> DownloadStatus;

    /// Check that the extraction tool can be started.
    async fn check_availability(&self) -> Result<()>;
}

/// Factory for extractor instances.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create the default implementation over the provisioned tool pair.
    pub fn create(config: DownloadConfig, tools: &ProvisionedTools) -> Arc<dyn ExtractorTrait> {
        Arc::new(ytdlp::YtDlpExtractor::new(
            config,
            tools.extractor_path(),
            tools.muxer_path(),
        ))
    }
}
