//! # flappy_arms
//!
//! Motion-controlled arcade game. A raised-arm gesture, detected from the
//! webcam, substitutes for a button press: each raise flaps the actor
//! upward while gravity pulls it through gaps in scrolling obstacles.
//!
//! ## Screens and keys
//!
//! | Screen    | Key     | Action                                   |
//! |-----------|---------|------------------------------------------|
//! | Menu      | `C`     | Calibrate shoulders, then start playing  |
//! | Menu      | `Space` | Play (once calibrated)                   |
//! | Menu      | `Esc`   | Quit                                     |
//! | Playing   | `Esc`   | Abandon the run, back to menu            |
//! | Game over | `Space` | Play again (calibration persists)        |
//! | Game over | `Esc`   | Back to menu                             |
//! | anywhere  | `Q`     | Quit                                     |
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: hold `A` (left arm) or `D` (right
//!   arm) to raise; no camera needed.
//! * `camera` — **Webcam mode**: OpenCV capture + single-pose model.

pub mod app;
pub mod visualizer;
