//! Calibration and the per-poll gesture decision.

use log::{debug, info};

use crate::debounce::GestureState;
use crate::landmarks::Frame;
use crate::source::PoseSource;

/// How far (in normalized image height) a wrist must sit above its
/// shoulder to count as raised. Chosen so neutral arm sway near the
/// shoulder line does not register.
pub const RAISE_THRESHOLD: f32 = 0.1;

// ════════════════════════════════════════════════════════════════════════════
// GestureDetector
// ════════════════════════════════════════════════════════════════════════════

/// Wraps a [`PoseSource`] and owns the calibration baseline plus the
/// debounce state. One instance lives for the whole process; the camera
/// handle inside the source is released when the detector drops.
pub struct GestureDetector<S: PoseSource> {
    source: S,
    /// Shoulder-midpoint y captured at calibration time. Its presence
    /// gates detection; the live raise test compares each wrist to the
    /// same frame's shoulder, not to this frozen value, so the threshold
    /// self-adjusts as the player shifts in the frame.
    baseline: Option<f32>,
    state: GestureState,
}

/// Result of one [`GestureDetector::poll`].
#[derive(Debug, Default)]
pub struct Poll {
    /// A flap fired this frame (rising edge of the raised signal).
    pub triggered: bool,
    /// The mirrored camera frame, when the source produced one.
    pub frame: Option<Frame>,
}

impl<S: PoseSource> GestureDetector<S> {
    pub fn new(source: S) -> Self {
        GestureDetector {
            source,
            baseline: None,
            state: GestureState::default(),
        }
    }

    /// Whether a calibration has succeeded. Until then [`poll`](Self::poll)
    /// never reports a trigger.
    pub fn calibrated(&self) -> bool {
        self.baseline.is_some()
    }

    /// Latest arm flags, for the on-screen indicator.
    pub fn gesture(&self) -> &GestureState {
        &self.state
    }

    /// Capture one frame and freeze the shoulder baseline from it.
    /// Returns whether it worked; calling again overwrites the baseline.
    pub fn calibrate(&mut self) -> bool {
        let sample = match self.source.sample() {
            Some(s) => s,
            None => return false,
        };
        match sample.landmarks {
            Some(lm) => {
                let y = lm.shoulder_midpoint_y();
                self.baseline = Some(y);
                info!("calibrated: shoulder baseline y = {y:.3}");
                true
            }
            None => {
                debug!("calibration attempt found no landmarks");
                false
            }
        }
    }

    /// Read one frame and decide whether a flap fired.
    ///
    /// With no landmarks, or before calibration, this returns no trigger
    /// and leaves the debounce memory untouched — a detection dropout in
    /// the middle of a held raise must not manufacture a fresh edge when
    /// the body comes back.
    pub fn poll(&mut self) -> Poll {
        let sample = match self.source.sample() {
            Some(s) => s,
            None => return Poll::default(), // read failure: no trigger, no frame
        };

        let frame = sample.frame.map(Frame::into_mirrored);

        let lm = match (sample.landmarks, self.baseline) {
            (Some(lm), Some(_)) => lm,
            _ => {
                return Poll {
                    triggered: false,
                    frame,
                }
            }
        };

        let left = lm.left_wrist.y < lm.left_shoulder.y - RAISE_THRESHOLD;
        let right = lm.right_wrist.y < lm.right_shoulder.y - RAISE_THRESHOLD;
        let triggered = self.state.step(left, right);

        Poll { triggered, frame }
    }

    /// Grab one mirrored frame for a preview panel, with no gesture
    /// processing at all (used by the menu screen).
    pub fn preview(&mut self) -> Option<Frame> {
        self.source
            .sample()
            .and_then(|s| s.frame)
            .map(Frame::into_mirrored)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, Landmarks};
    use crate::source::PoseSample;

    /// Scripted source: pops one step per sample.
    ///   `None`        → read failure
    ///   `Some(None)`  → frame but no landmarks
    ///   `Some(Some)`  → landmarks with the given (left, right) raised flags
    struct Script {
        steps: Vec<Option<Option<(bool, bool)>>>,
    }

    impl Script {
        fn new(steps: Vec<Option<Option<(bool, bool)>>>) -> Self {
            Script { steps }
        }
    }

    fn landmarks(left_raised: bool, right_raised: bool) -> Landmarks {
        let wrist = |raised: bool| Landmark {
            x: 0.5,
            y: if raised { 0.2 } else { 0.8 },
        };
        Landmarks {
            left_shoulder: Landmark { x: 0.4, y: 0.5 },
            right_shoulder: Landmark { x: 0.6, y: 0.5 },
            left_wrist: wrist(left_raised),
            right_wrist: wrist(right_raised),
        }
    }

    impl PoseSource for Script {
        fn sample(&mut self) -> Option<PoseSample> {
            match self.steps.remove(0) {
                None => None,
                Some(lm) => Some(PoseSample {
                    landmarks: lm.map(|(l, r)| landmarks(l, r)),
                    frame: None,
                }),
            }
        }
    }

    fn up() -> Option<Option<(bool, bool)>> {
        Some(Some((true, true)))
    }
    fn down() -> Option<Option<(bool, bool)>> {
        Some(Some((false, false)))
    }
    fn no_body() -> Option<Option<(bool, bool)>> {
        Some(None)
    }

    #[test]
    fn uncalibrated_poll_never_triggers() {
        let mut d = GestureDetector::new(Script::new(vec![up(), up(), up()]));
        for _ in 0..3 {
            assert!(!d.poll().triggered);
        }
    }

    #[test]
    fn calibration_requires_landmarks() {
        let mut d = GestureDetector::new(Script::new(vec![no_body(), None, down()]));
        assert!(!d.calibrate()); // no landmarks
        assert!(!d.calibrate()); // read failure
        assert!(d.calibrate());
        assert!(d.calibrated());
    }

    #[test]
    fn raise_after_calibration_triggers_once() {
        let mut d = GestureDetector::new(Script::new(vec![down(), down(), up(), up(), up()]));
        assert!(d.calibrate());
        assert!(!d.poll().triggered); // still down
        assert!(d.poll().triggered); // rising edge
        assert!(!d.poll().triggered); // held
        assert!(!d.poll().triggered);
    }

    #[test]
    fn recalibration_overwrites_baseline() {
        let mut d = GestureDetector::new(Script::new(vec![down(), up()]));
        assert!(d.calibrate());
        assert!(d.calibrate());
        assert!(d.calibrated());
    }

    #[test]
    fn dropout_does_not_disturb_the_edge_state() {
        // up, (body lost), up again: the raised signal never observably
        // fell, so the second up must not re-trigger.
        let mut d = GestureDetector::new(Script::new(vec![
            down(),
            up(),
            no_body(),
            None,
            up(),
        ]));
        assert!(d.calibrate());
        assert!(d.poll().triggered);
        assert!(!d.poll().triggered); // no landmarks
        assert!(!d.poll().triggered); // read failure
        assert!(!d.poll().triggered); // still held — no fresh edge
    }

    #[test]
    fn lower_then_raise_retriggers() {
        let mut d = GestureDetector::new(Script::new(vec![down(), up(), down(), up()]));
        assert!(d.calibrate());
        assert!(d.poll().triggered);
        assert!(!d.poll().triggered);
        assert!(d.poll().triggered);
    }

    #[test]
    fn read_failure_yields_empty_poll() {
        let mut d = GestureDetector::new(Script::new(vec![down(), None]));
        assert!(d.calibrate());
        let p = d.poll();
        assert!(!p.triggered);
        assert!(p.frame.is_none());
    }

    #[test]
    fn frames_come_back_mirrored() {
        struct OneFrame;
        impl PoseSource for OneFrame {
            fn sample(&mut self) -> Option<PoseSample> {
                Some(PoseSample {
                    landmarks: None,
                    frame: Some(Frame {
                        width: 3,
                        height: 1,
                        pixels: vec![1, 2, 3],
                    }),
                })
            }
        }
        let mut d = GestureDetector::new(OneFrame);
        let p = d.poll();
        assert_eq!(p.frame.unwrap().pixels, vec![3, 2, 1]);
    }
}
