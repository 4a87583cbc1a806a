use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("could not encode capture: {0}")]
    Encode(String),
    #[error("could not write capture to {name}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Persists an accepted capture and returns an opaque reference to it.
///
/// The core never retries a failed save; retry policy belongs to the caller.
pub trait ArtifactSink: Send {
    fn save(&self, frame: &Frame, name: &str) -> Result<String, ArtifactError>;
}

/// Conventional artifact name for a capture observed at `timestamp_ms`.
pub fn artifact_name(timestamp_ms: u64) -> String {
    format!("face-{timestamp_ms}.jpg")
}
