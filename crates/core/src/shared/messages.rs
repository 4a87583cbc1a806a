//! Caller-visible message strings for gate results.

pub const MSG_NO_FACE: &str = "No face detected";
/// Shared by the no-mouth and multi-face outcomes: both read as an
/// obstructed or non-frontal subject to the caller.
pub const MSG_FACE_OBSTRUCTED: &str = "Face the camera and keep your face unobstructed";
pub const MSG_NOT_SHARP: &str = "Face is not sharp enough";
pub const MSG_FACE_SIZE: &str = "Face is too small or too large";
pub const MSG_TURN_HEAD: &str = "Turn your head slightly from side to side";
pub const MSG_FACE_DETECTED: &str = "Face detected, hold on";
pub const MSG_CAPTURE_OK: &str = "Face captured";
pub const MSG_UNREADABLE_PHOTO: &str = "Photo could not be read";
pub const MSG_SAVE_FAILED: &str = "Could not save the captured image";
