pub mod detected_face;
pub mod object_detector;
pub mod screen_outcome;
