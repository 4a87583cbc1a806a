//! Multi-frame acceptance heuristic for the streaming path.
//!
//! A static photograph held in front of the camera produces a face whose
//! centroid barely moves between evaluations. The tracker therefore requires
//! a run of consecutive valid frames whose centroids each move more than a
//! minimum distance before it accepts.

use crate::detection::domain::detected_face::DetectedFace;
use crate::detection::domain::screen_outcome::{ScreenOutcome, ScreenStatus};
use crate::pipeline::results::rejection_message;
use crate::shared::config::GateConfig;
use crate::shared::messages;

/// Per-session tracking state, owned by the session and threaded explicitly
/// through every observation; nothing here is shared.
#[derive(Clone, Debug, Default)]
pub struct TrackingState {
    /// Reference face for the next motion comparison. Deliberately kept
    /// across momentary bad frames: only a failed motion check replaces it.
    pub previous: Option<DetectedFace>,
    /// Consecutive valid frames so far; reset to 0 on any rejection.
    pub streak: u32,
}

impl TrackingState {
    /// Explicit session reset: forget the reference face and the streak.
    pub fn reset(&mut self) {
        self.previous = None;
        self.streak = 0;
    }
}

/// What one observation did to the session.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackStep {
    Rejected { message: &'static str },
    InProgress { progress: u32 },
    /// Target streak reached on this very frame; the session is over and the
    /// caller persists the current frame.
    Accepted { face: DetectedFace },
}

/// The temporal state machine. Holds only configuration; all mutable state
/// lives in the [`TrackingState`] passed in.
pub struct LivenessTracker {
    config: GateConfig,
}

impl LivenessTracker {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Folds one screening outcome into the session state.
    pub fn observe(&self, state: &mut TrackingState, outcome: &ScreenOutcome) -> TrackStep {
        if outcome.status != ScreenStatus::Ok {
            state.streak = 0;
            return TrackStep::Rejected {
                message: rejection_message(outcome.status),
            };
        }
        let Some(face) = outcome.face.as_ref() else {
            // Ok outcomes carry a face by construction.
            debug_assert!(false, "Ok outcome without a face");
            state.streak = 0;
            return TrackStep::Rejected {
                message: messages::MSG_NO_FACE,
            };
        };

        if !self.config.face_in_bounds(&face.bounds) {
            state.streak = 0;
            return TrackStep::Rejected {
                message: messages::MSG_FACE_SIZE,
            };
        }

        if let Some(previous) = state.previous.as_ref() {
            let distance = face.distance_to(previous);
            log::debug!("streak {}, center distance {distance:.1}", state.streak);
            if distance <= self.config.min_center_distance {
                // Static subject: start over, but compare the next frame
                // against this face, not the stale reference.
                state.streak = 0;
                state.previous = Some(face.clone());
                return TrackStep::Rejected {
                    message: messages::MSG_TURN_HEAD,
                };
            }
        }

        state.streak += 1;
        state.previous = Some(face.clone());
        debug_assert!(state.streak <= self.config.required_streak);

        if state.streak == self.config.required_streak {
            TrackStep::Accepted { face: face.clone() }
        } else {
            TrackStep::InProgress {
                progress: state.streak * self.config.progress_unit / self.config.required_streak,
            }
        }
    }
}
