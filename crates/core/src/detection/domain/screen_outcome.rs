use crate::detection::domain::detected_face::DetectedFace;

/// Outcome of screening one image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenStatus {
    /// A single, unobstructed, in-focus face was found.
    Ok,
    NoFace,
    /// No mouth in the lower half of the face: occluded or non-frontal.
    NoMouth,
    MultiFace,
    NotSharp,
}

/// Result of the shared detect → mouth → sharpness sequence.
///
/// Carries at most one face, present exactly when `status` is `Ok`; the
/// constructors keep that invariant.
#[derive(Clone, Debug)]
pub struct ScreenOutcome {
    pub status: ScreenStatus,
    pub sharpness: f64,
    pub face: Option<DetectedFace>,
}

impl ScreenOutcome {
    pub fn ok(face: DetectedFace, sharpness: f64) -> Self {
        Self {
            status: ScreenStatus::Ok,
            sharpness,
            face: Some(face),
        }
    }

    pub fn rejected(status: ScreenStatus) -> Self {
        debug_assert_ne!(status, ScreenStatus::Ok, "Ok outcomes must carry a face");
        Self {
            status,
            sharpness: 0.0,
            face: None,
        }
    }

    /// Sharpness rejection, keeping the measured score for diagnostics.
    pub fn not_sharp(sharpness: f64) -> Self {
        Self {
            status: ScreenStatus::NotSharp,
            sharpness,
            face: None,
        }
    }
}
