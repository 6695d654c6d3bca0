//! # pose_input
//!
//! Turns noisy per-frame pose estimation into a single debounced "flap"
//! trigger for the Flappy Arms game.
//!
//! ## Pipeline
//!
//! ```text
//! PoseSource::sample()          one frame + optional landmarks
//!        │
//!        ▼
//! raised = wrist.y < shoulder.y - RAISE_THRESHOLD     (per side)
//!        │
//!        ▼
//! GestureState::step()          rising edge → at most one trigger
//! ```
//!
//! A trigger fires exactly on the lowered→raised transition; holding the
//! arms up does not repeat-fire. Detection stays disabled until an explicit
//! calibration has captured the shoulder baseline.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: a keyboard-driven source synthesizes
//!   landmarks, so the calibration/geometry/debounce path runs unchanged
//!   with no camera attached.
//! * `camera` — **Webcam mode**: OpenCV capture plus a single-pose
//!   keypoint model provide real landmarks.
//!
//! ## Failure model
//!
//! A failed frame read is not an error — [`PoseSource::sample`] returns
//! `None` and the caller simply gets no trigger that tick. Absent landmarks
//! are signalled structurally (`PoseSample::landmarks == None`), never by
//! panic or error.

pub mod debounce;
pub mod detector;
pub mod landmarks;
pub mod source;

#[cfg(feature = "camera")]
pub mod camera;

pub use debounce::GestureState;
pub use detector::{GestureDetector, Poll, RAISE_THRESHOLD};
pub use landmarks::{Frame, Landmark, Landmarks};
pub use source::{PoseSample, PoseSource, SimArms, SimPoseSource};

#[cfg(feature = "camera")]
pub use camera::CameraSource;
