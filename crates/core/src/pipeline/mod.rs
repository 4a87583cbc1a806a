pub mod face_screener;
pub mod infrastructure;
pub mod liveness_tracker;
pub mod results;
pub mod still_photo_use_case;
