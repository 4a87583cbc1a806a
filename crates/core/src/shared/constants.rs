//! Default tuning values for the capture gate. Runtime configuration lives
//! in [`crate::shared::config::GateConfig`]; these are its defaults.

/// Smallest acceptable face, per axis.
pub const MIN_FACE_WIDTH: u32 = 100;
pub const MIN_FACE_HEIGHT: u32 = 100;

/// Largest acceptable face, per axis.
pub const MAX_FACE_WIDTH: u32 = 800;
pub const MAX_FACE_HEIGHT: u32 = 800;

/// Normalized camera frames are downscaled to fit within these bounds.
pub const MAX_PHOTO_WIDTH: u32 = 960;
pub const MAX_PHOTO_HEIGHT: u32 = 800;

/// Mean gradient magnitude at or below this value counts as blurred.
pub const SHARPNESS_THRESHOLD: f64 = 22.0;

/// Accepted still photos are shrunk toward this encoded-size cap (1 MiB).
pub const PHOTO_BYTE_LIMIT: usize = 1024 * 1024;

/// Face centers closer than this between consecutive accepted frames are
/// treated as a static subject.
pub const MIN_CENTER_DISTANCE: f64 = 10.0;

/// Consecutive valid frames required before a streamed capture is accepted.
pub const REQUIRED_STREAK: u32 = 3;

/// Progress scale reported to callers (degrees of a full circle).
pub const PROGRESS_UNIT: u32 = 360;

/// Capacity of the streaming frame queue; one slot makes `try_send` the
/// busy gate.
pub const FRAME_QUEUE_CAPACITY: usize = 1;

/// Capacity of the still-photo request queue.
pub const STILL_QUEUE_CAPACITY: usize = 16;
