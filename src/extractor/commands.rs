use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, TubegrabError};
use crate::model::MediaKind;

/// Print template that makes the extraction tool emit title, uploader and
/// duration on separate lines, nothing else.
pub const METADATA_TEMPLATE: &str = "%(title)s\n%(uploader)s\n%(duration)s";

/// Format selector handed to the extraction tool, chosen by content kind
/// only, never by URL.
///
/// Two tiers each: the preferred codec pairing first, then a best-effort
/// fallback for sources that do not expose it.
pub fn format_selector(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Video => "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]",
        MediaKind::Audio => "bestaudio[ext=m4a]/bestaudio",
    }
}

/// Abstract extraction-tool invocation.
#[derive(Debug, Clone)]
pub struct ExtractorCommand {
    pub binary_path: String,
    pub args: Vec<String>,
    pub description: String,
}

impl ExtractorCommand {
    pub fn new<S1: Into<String>, S2: Into<String>>(binary_path: S1, description: S2) -> Self {
        Self {
            binary_path: binary_path.into(),
            args: Vec::new(),
            description: description.into(),
        }
    }

    /// Add an argument
    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Run to completion, discarding output. A tool that cannot be started
    /// or exits non-zero is an error carrying its own error text.
    pub async fn execute(&self) -> Result<()> {
        let output = self.run().await?;

        if !output.status.success() {
            return Err(TubegrabError::Process(format!(
                "{} failed: {}",
                self.description,
                Self::error_text(&output)
            )));
        }

        Ok(())
    }

    /// Run to completion and return the combined stdout/stderr text.
    pub async fn capture(&self) -> Result<String> {
        let output = self.run().await?;

        if !output.status.success() {
            return Err(TubegrabError::Process(format!(
                "{} failed: {}",
                self.description,
                Self::error_text(&output)
            )));
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }

    async fn run(&self) -> Result<std::process::Output> {
        debug!(
            "Executing extractor command: {} {:?}",
            self.binary_path, self.args
        );

        Command::new(&self.binary_path)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| {
                TubegrabError::Process(format!("failed to start {}: {}", self.binary_path, e))
            })
    }

    fn error_text(output: &std::process::Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let trimmed = stderr.trim();
        if trimmed.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Builder for the invocation shapes of the extraction tool.
pub struct ExtractorCommandBuilder {
    binary_path: String,
}

impl ExtractorCommandBuilder {
    pub fn new<S: Into<String>>(binary_path: S) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    /// Metadata query: print exactly the three fields for `url`.
    pub fn metadata_query(&self, url: &str) -> ExtractorCommand {
        ExtractorCommand::new(&self.binary_path, "Metadata query")
            .arg("--print")
            .arg(METADATA_TEMPLATE)
            .arg(url)
    }

    /// Download: format selector, muxer location for remuxing, output
    /// template, URL. The muxer is only ever reached through the extraction
    /// tool shelling out to it.
    pub fn download(
        &self,
        kind: MediaKind,
        muxer_path: &Path,
        output_template: &str,
        url: &str,
    ) -> ExtractorCommand {
        ExtractorCommand::new(&self.binary_path, "Content download")
            .arg("-f")
            .arg(format_selector(kind))
            .arg("--ffmpeg-location")
            .arg(muxer_path.to_string_lossy().to_string())
            .arg("-o")
            .arg(output_template)
            .arg(url)
    }

    /// Version probe used for the startup availability check.
    pub fn version_check(&self) -> ExtractorCommand {
        ExtractorCommand::new(&self.binary_path, "Version check").arg("--version")
    }
}
