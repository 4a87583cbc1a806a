use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::artifact::domain::artifact_sink::{ArtifactError, ArtifactSink};
use crate::shared::frame::Frame;

/// Writes accepted captures as JPEG files under a base directory and returns
/// the absolute path as the artifact reference.
pub struct JpegArtifactSink {
    base_dir: PathBuf,
}

impl JpegArtifactSink {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Sink rooted at the platform-local app data directory.
    pub fn in_default_dir() -> Result<Self, ArtifactError> {
        Ok(Self::new(default_artifact_dir()?))
    }
}

impl ArtifactSink for JpegArtifactSink {
    fn save(&self, frame: &Frame, name: &str) -> Result<String, ArtifactError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|source| ArtifactError::Write {
            name: self.base_dir.display().to_string(),
            source,
        })?;

        let path = self.base_dir.join(name);
        let img = RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or_else(|| {
                ArtifactError::Encode("frame buffer does not match its dimensions".into())
            })?;
        img.save(&path).map_err(|e| match e {
            image::ImageError::IoError(source) => ArtifactError::Write {
                name: path.display().to_string(),
                source,
            },
            other => ArtifactError::Encode(other.to_string()),
        })?;

        log::debug!("capture saved to {}", path.display());
        Ok(path.display().to_string())
    }
}

/// `<local app data>/facegate/captures`, the default home for captures.
pub fn default_artifact_dir() -> Result<PathBuf, ArtifactError> {
    let base = dirs::data_local_dir().ok_or_else(|| {
        ArtifactError::Encode("no local data directory on this platform".into())
    })?;
    Ok(base.join("facegate").join("captures"))
}

/// True when the sink would overwrite `name` in `base_dir`.
pub fn artifact_exists(base_dir: &Path, name: &str) -> bool {
    base_dir.join(name).exists()
}
