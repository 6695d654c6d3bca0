//! The frame-source seam, and the keyboard-driven simulation backend.
//!
//! Everything above this boundary sees only [`PoseSample`]s: an optional
//! frame for display plus optional landmarks. Swapping the webcam for the
//! simulator (or a future threaded producer) never touches game logic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::landmarks::{Frame, Landmark, Landmarks};

// ════════════════════════════════════════════════════════════════════════════
// PoseSample / PoseSource
// ════════════════════════════════════════════════════════════════════════════

/// One capture: `landmarks` is `None` whenever the estimator found no body
/// in the frame; `frame` is `None` for sources with nothing to display.
#[derive(Clone, Debug)]
pub struct PoseSample {
    pub landmarks: Option<Landmarks>,
    pub frame: Option<Frame>,
}

/// Anything that can produce one [`PoseSample`] per poll.
///
/// Returning `None` means the frame read itself failed; the caller treats
/// that as "no trigger this tick" and carries on.
pub trait PoseSource {
    fn sample(&mut self) -> Option<PoseSample>;
}

impl<S: PoseSource + ?Sized> PoseSource for Box<S> {
    fn sample(&mut self) -> Option<PoseSample> {
        (**self).sample()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimArms — shared key state written by the window layer
// ════════════════════════════════════════════════════════════════════════════

/// Handle the window loop writes each frame: is the left/right "arm" key
/// held right now. Cloning shares the underlying flags.
#[derive(Clone, Debug, Default)]
pub struct SimArms {
    left: Arc<AtomicBool>,
    right: Arc<AtomicBool>,
}

impl SimArms {
    pub fn set(&self, left: bool, right: bool) {
        self.left.store(left, Ordering::Relaxed);
        self.right.store(right, Ordering::Relaxed);
    }

    pub fn left(&self) -> bool {
        self.left.load(Ordering::Relaxed)
    }

    pub fn right(&self) -> bool {
        self.right.load(Ordering::Relaxed)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource — synthesized landmarks (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Simulated shoulder line and the two wrist heights. A "raised" wrist
/// sits well above `shoulder − RAISE_THRESHOLD`, a lowered one well below,
/// so the detector's geometry runs exactly as it does on real landmarks.
const SIM_SHOULDER_Y: f32 = 0.55;
const SIM_WRIST_RAISED_Y: f32 = 0.20;
const SIM_WRIST_LOWERED_Y: f32 = 0.85;

/// Pose source driven by [`SimArms`] instead of a camera. Produces no
/// frames — the window layer draws a placeholder panel in sim mode.
pub struct SimPoseSource {
    arms: SimArms,
}

impl SimPoseSource {
    pub fn new(arms: SimArms) -> Self {
        SimPoseSource { arms }
    }

    fn wrist_y(raised: bool) -> f32 {
        if raised {
            SIM_WRIST_RAISED_Y
        } else {
            SIM_WRIST_LOWERED_Y
        }
    }
}

impl PoseSource for SimPoseSource {
    fn sample(&mut self) -> Option<PoseSample> {
        let landmarks = Landmarks {
            left_shoulder: Landmark { x: 0.38, y: SIM_SHOULDER_Y },
            right_shoulder: Landmark { x: 0.62, y: SIM_SHOULDER_Y },
            left_wrist: Landmark {
                x: 0.30,
                y: Self::wrist_y(self.arms.left()),
            },
            right_wrist: Landmark {
                x: 0.70,
                y: Self::wrist_y(self.arms.right()),
            },
        };
        Some(PoseSample {
            landmarks: Some(landmarks),
            frame: None,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::RAISE_THRESHOLD;

    #[test]
    fn sim_arms_flags_are_shared_across_clones() {
        let arms = SimArms::default();
        let clone = arms.clone();
        arms.set(true, false);
        assert!(clone.left());
        assert!(!clone.right());
    }

    #[test]
    fn lowered_wrists_sit_below_the_raise_line() {
        let arms = SimArms::default();
        let mut src = SimPoseSource::new(arms);
        let lm = src.sample().unwrap().landmarks.unwrap();
        assert!(lm.left_wrist.y > lm.left_shoulder.y - RAISE_THRESHOLD);
        assert!(lm.right_wrist.y > lm.right_shoulder.y - RAISE_THRESHOLD);
    }

    #[test]
    fn raised_wrists_clear_the_raise_line() {
        let arms = SimArms::default();
        arms.set(true, true);
        let mut src = SimPoseSource::new(arms);
        let lm = src.sample().unwrap().landmarks.unwrap();
        assert!(lm.left_wrist.y < lm.left_shoulder.y - RAISE_THRESHOLD);
        assert!(lm.right_wrist.y < lm.right_shoulder.y - RAISE_THRESHOLD);
    }

    #[test]
    fn sim_source_never_produces_frames() {
        let mut src = SimPoseSource::new(SimArms::default());
        assert!(src.sample().unwrap().frame.is_none());
    }
}
