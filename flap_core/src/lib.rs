//! # flap_core
//!
//! Deterministic simulation core for the Flappy Arms motion game.
//!
//! The player keeps a falling actor airborne through gaps in scrolling
//! obstacles. This crate owns everything that must behave identically
//! tick-for-tick regardless of camera, window, or wall clock:
//!
//! * [`actor`] — gravity integration, flap impulse, screen-bound clamping.
//! * [`obstacle`] — a single gap obstacle and the [`ObstacleField`] that
//!   spawns, scrolls, collides, scores, and evicts them.
//! * [`score`] — per-session score plus the process-wide high score.
//! * [`state`] — the screen flow machine (Menu / Calibrating / Playing /
//!   GameOver / Quit) with an explicit transition table.
//! * [`config`] — every tunable constant in one place.
//! * [`rng`] — a small seedable xorshift generator for gap placement, so
//!   obstacle layouts are reproducible in tests.
//!
//! One simulation tick while playing:
//!
//! ```text
//! trigger? ──▶ actor.flap()
//!              actor.tick()          (gravity + clamp, reports bound touch)
//!              field.tick(&actor)    (advance, collide, score, evict, spawn)
//!              fatal? ──▶ flow.session_fatal()   (commits high score)
//! ```
//!
//! The crate is I/O-free by design; the gesture pipeline lives in
//! `pose_input` and the window loop in the `flappy_arms` binary.

pub mod actor;
pub mod config;
pub mod obstacle;
pub mod rng;
pub mod score;
pub mod state;

pub use actor::Actor;
pub use config::GameConfig;
pub use obstacle::{FieldTick, Obstacle, ObstacleField, Rect};
pub use rng::XorShift;
pub use score::ScoreState;
pub use state::{AppState, Effect, GameFlow};
