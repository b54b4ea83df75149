use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::RustEmbed;
use tempfile::TempDir;
use tracing::{debug, info};

use crate::assets::ToolAssets;
use crate::error::{Result, TubegrabError};

/// Logical names of the two bundled tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Resolves a source URL to media streams and metadata (yt-dlp).
    Extractor,
    /// Combines/transcodes separate streams into one container (ffmpeg).
    Muxer,
}

impl Tool {
    pub fn base_name(&self) -> &'static str {
        match self {
            Tool::Extractor => "yt-dlp",
            Tool::Muxer => "ffmpeg",
        }
    }

    /// Platform-qualified executable filename for this tool.
    pub fn binary_name(&self) -> String {
        if cfg!(target_os = "windows") {
            format!("{}.exe", self.base_name())
        } else {
            self.base_name().to_string()
        }
    }
}

/// Write one embedded payload into `dir` under its own filename and mark it
/// executable for the current user.
///
/// An absent payload is a packaging defect and fails before anything is
/// written to disk.
pub fn stage_binary<A: RustEmbed>(binary_name: &str, dir: &Path) -> Result<PathBuf> {
    let payload = A::get(binary_name).ok_or_else(|| {
        TubegrabError::MissingAsset(format!(
            "embedded payload '{}' is not present in this build",
            binary_name
        ))
    })?;

    let target = dir.join(binary_name);
    fs::write(&target, payload.data.as_ref()).map_err(|e| {
        TubegrabError::Provision(format!("failed to write {}: {}", target.display(), e))
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).map_err(|e| {
            TubegrabError::Provision(format!(
                "failed to mark {} executable: {}",
                target.display(),
                e
            ))
        })?;
    }

    debug!("Staged {} at {}", binary_name, target.display());
    Ok(target)
}

/// The bundled tool pair staged into a process-scoped temporary directory.
///
/// Created once per process run before any tool invocation. The staged paths
/// are read-only shared values from then on; the directory and its contents
/// are removed when this value is dropped, best effort.
pub struct ProvisionedTools {
    _dir: TempDir,
    extractor: PathBuf,
    muxer: PathBuf,
}

impl ProvisionedTools {
    pub fn provision() -> Result<Self> {
        let dir = TempDir::new().map_err(|e| {
            TubegrabError::Provision(format!("failed to create staging directory: {}", e))
        })?;

        let extractor = stage_binary::<ToolAssets>(&Tool::Extractor.binary_name(), dir.path())?;
        let muxer = stage_binary::<ToolAssets>(&Tool::Muxer.binary_name(), dir.path())?;

        info!("Provisioned bundled tools in {}", dir.path().display());

        Ok(Self {
            _dir: dir,
            extractor,
            muxer,
        })
    }

    pub fn extractor_path(&self) -> &Path {
        &self.extractor
    }

    pub fn muxer_path(&self) -> &Path {
        &self.muxer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(RustEmbed)]
    #[folder = "tests/fixtures/payloads/"]
    struct TestAssets;

    #[test]
    fn test_stage_present_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = stage_binary::<TestAssets>("faketool", dir.path()).unwrap();

        assert!(path.exists());
        let staged = fs::read(&path).unwrap();
        let embedded = TestAssets::get("faketool").unwrap();
        assert_eq!(staged, embedded.data.as_ref());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_ne!(mode & 0o111, 0);
        }
    }

    #[test]
    fn test_stage_missing_payload() {
        let dir = tempfile::tempdir().unwrap();
        let result = stage_binary::<TestAssets>("nosuchtool", dir.path());

        assert!(matches!(result, Err(TubegrabError::MissingAsset(_))));
        // No partial write for an absent payload.
        assert!(!dir.path().join("nosuchtool").exists());
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_binary_names() {
        assert_eq!(Tool::Extractor.binary_name(), "yt-dlp");
        assert_eq!(Tool::Muxer.binary_name(), "ffmpeg");
    }

    #[test]
    #[cfg(target_os = "windows")]
    fn test_binary_names() {
        assert_eq!(Tool::Extractor.binary_name(), "yt-dlp.exe");
        assert_eq!(Tool::Muxer.binary_name(), "ffmpeg.exe");
    }
}
