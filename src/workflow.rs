use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;
use crate::error::{Result, TubegrabError};
use crate::extractor::{ExtractorFactory, ExtractorTrait};
use crate::model::{DownloadRequest, DownloadStatus, StatusSink, VideoMetadata};
use crate::provision::ProvisionedTools;

/// Owns the provisioned tool pair and dispatches fetch and download work to
/// worker tasks so the interactive context never blocks on the tools.
pub struct Workflow {
    extractor: Arc<dyn ExtractorTrait>,
    _tools: Option<ProvisionedTools>,
}

impl Workflow {
    /// Stage the bundled tools and build the default extractor over them.
    ///
    /// Provisioning failures are fatal for the run and must surface before
    /// any interactive output. The staging directory lives as long as this
    /// value and is removed when it is dropped.
    pub async fn new(config: Config) -> Result<Self> {
        let tools = ProvisionedTools::provision()?;
        let extractor = ExtractorFactory::create(config.download, &tools);

        // Check dependencies
        extractor.check_availability().await?;

        Ok(Self {
            extractor,
            _tools: Some(tools),
        })
    }

    /// Build a workflow over an existing extractor, skipping provisioning.
    pub fn with_extractor(extractor: Arc<dyn ExtractorTrait>) -> Self {
        Self {
            extractor,
            _tools: None,
        }
    }

    /// Fetch the metadata triple for `url`.
    pub async fn fetch_info(&self, url: &str) -> Result<VideoMetadata> {
        Self::require_url(url)?;
        self.extractor.fetch_metadata(url).await
    }

    /// Launch one download on a worker task. Status transitions arrive on
    /// `status`; the returned handle resolves to the terminal status.
    pub fn start_download(
        &self,
        request: DownloadRequest,
        status: StatusSink,
    ) -> Result<JoinHandle<DownloadStatus>> {
        Self::require_url(&request.url)?;
        info!("Dispatching download worker for {}", request.url);

        let extractor = Arc::clone(&self.extractor);
        Ok(tokio::spawn(async move {
            extractor.download(request, status).await
        }))
    }

    /// Reject blank URLs before any process is spawned.
    fn require_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(TubegrabError::InvalidUrl("no URL provided".to_string()));
        }
        Ok(())
    }
}
