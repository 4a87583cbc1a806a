//! Caller-visible result contract for both gate entry points.

use crate::detection::domain::screen_outcome::ScreenStatus;
use crate::shared::messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LivenessStatus {
    Rejected,
    InProgress,
    Accepted,
}

/// One streaming-evaluation result delivered to the session callback.
#[derive(Clone, Debug)]
pub struct LivenessResult {
    pub status: LivenessStatus,
    pub message: &'static str,
    /// Scaled progress toward acceptance (`streak × unit / target`).
    pub progress: u32,
    /// Reference to the persisted capture; present only on acceptance.
    pub artifact: Option<String>,
}

impl LivenessResult {
    pub fn rejected(message: &'static str) -> Self {
        Self {
            status: LivenessStatus::Rejected,
            message,
            progress: 0,
            artifact: None,
        }
    }

    pub fn in_progress(progress: u32) -> Self {
        Self {
            status: LivenessStatus::InProgress,
            message: messages::MSG_FACE_DETECTED,
            progress,
            artifact: None,
        }
    }

    pub fn accepted(progress: u32, artifact: String) -> Self {
        Self {
            status: LivenessStatus::Accepted,
            message: messages::MSG_CAPTURE_OK,
            progress,
            artifact: Some(artifact),
        }
    }
}

/// Result of the one-shot still-photo gate.
#[derive(Clone, Debug)]
pub struct StillResult {
    pub accepted: bool,
    pub message: &'static str,
    pub artifact: Option<String>,
}

impl StillResult {
    pub fn rejected(message: &'static str) -> Self {
        Self {
            accepted: false,
            message,
            artifact: None,
        }
    }

    pub fn accepted(artifact: String) -> Self {
        Self {
            accepted: true,
            message: messages::MSG_CAPTURE_OK,
            artifact: Some(artifact),
        }
    }
}

/// Message for a screening rejection. The no-mouth and multi-face outcomes
/// share the obstructed-face message; callers cannot distinguish them.
pub fn rejection_message(status: ScreenStatus) -> &'static str {
    match status {
        ScreenStatus::NoFace => messages::MSG_NO_FACE,
        ScreenStatus::NoMouth | ScreenStatus::MultiFace => messages::MSG_FACE_OBSTRUCTED,
        ScreenStatus::NotSharp => messages::MSG_NOT_SHARP,
        ScreenStatus::Ok => messages::MSG_FACE_DETECTED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(rejection_message(ScreenStatus::NoFace), messages::MSG_NO_FACE);
        assert_eq!(
            rejection_message(ScreenStatus::NoMouth),
            rejection_message(ScreenStatus::MultiFace)
        );
        assert_eq!(
            rejection_message(ScreenStatus::NotSharp),
            messages::MSG_NOT_SHARP
        );
    }

    #[test]
    fn test_accepted_result_carries_artifact() {
        let result = LivenessResult::accepted(360, "face-1.jpg".into());
        assert_eq!(result.status, LivenessStatus::Accepted);
        assert_eq!(result.artifact.as_deref(), Some("face-1.jpg"));
        assert_eq!(result.progress, 360);
    }

    #[test]
    fn test_rejected_result_has_no_artifact_and_zero_progress() {
        let result = LivenessResult::rejected(messages::MSG_NO_FACE);
        assert_eq!(result.status, LivenessStatus::Rejected);
        assert!(result.artifact.is_none());
        assert_eq!(result.progress, 0);
    }
}
