#[cfg(feature = "opencv-backend")]
pub mod opencv_cascade_detector;
