//! Face capture gating: decides whether a captured face image is acceptable
//! for enrollment or verification.
//!
//! Two entry points share one screening sequence (face detection, mouth
//! visibility, sharpness):
//!
//! - [`pipeline::infrastructure::camera_session::CameraSession`] evaluates a
//!   continuous camera-frame stream and requires the face to move naturally
//!   across consecutive accepted frames before a capture is persisted.
//! - [`pipeline::still_photo_use_case::StillPhotoUseCase`] evaluates a single
//!   still image with the same quality criteria, without temporal tracking.
//!
//! Detection itself is an external capability behind
//! [`detection::domain::object_detector::ObjectDetector`]; an OpenCV cascade
//! adapter is available behind the `opencv-backend` feature.

pub mod artifact;
pub mod detection;
pub mod pipeline;
pub mod preprocess;
pub mod quality;
pub mod shared;
