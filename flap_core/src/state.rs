//! Screen-flow state machine.
//!
//! The application is always in exactly one [`AppState`]; every transition
//! goes through a method on [`GameFlow`] so the table below is the whole
//! story. Events that do not apply to the current state are ignored.
//!
//! | State      | Event                    | Next       | Side effect                  |
//! |------------|--------------------------|------------|------------------------------|
//! | Menu       | calibrate requested      | Calibrating| —                            |
//! | Calibrating| calibration ok           | Playing    | reset score, start session   |
//! | Calibrating| calibration failed       | Menu       | —                            |
//! | Menu       | play (calibrated only)   | Playing    | reset score, start session   |
//! | Menu       | quit                     | Quit       | terminal                     |
//! | Playing    | collision / out of bounds| GameOver   | commit high score            |
//! | Playing    | menu                     | Menu       | discard session              |
//! | Playing    | quit                     | Quit       | terminal                     |
//! | GameOver   | play again               | Playing    | reset score, start session   |
//! | GameOver   | menu                     | Menu       | —                            |
//! | GameOver   | quit                     | Quit       | terminal                     |
//!
//! Successful calibration is a property of the running process: returning
//! to the menu does not clear it, so `play` stays available.

use crate::score::ScoreState;

// ════════════════════════════════════════════════════════════════════════════
// AppState / Effect
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Calibrating,
    Playing,
    GameOver,
    /// Terminal — no outgoing transitions; the process tears down.
    Quit,
}

/// What the caller must do after feeding an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Spawn a fresh actor and obstacle field; the score was just reset.
    StartSession,
    /// Drop the in-progress actor/field without committing anything.
    DiscardSession,
}

// ════════════════════════════════════════════════════════════════════════════
// GameFlow
// ════════════════════════════════════════════════════════════════════════════

/// The authoritative screen state plus the score it guards.
#[derive(Clone, Debug)]
pub struct GameFlow {
    state: AppState,
    calibrated: bool,
    pub score: ScoreState,
}

impl Default for GameFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFlow {
    pub fn new() -> Self {
        GameFlow {
            state: AppState::Menu,
            calibrated: false,
            score: ScoreState::default(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Whether a calibration has succeeded at least once this process.
    pub fn calibrated(&self) -> bool {
        self.calibrated
    }

    // ── events ───────────────────────────────────────────────────────────

    /// Menu → Calibrating. The actual capture happens outside; its result
    /// comes back through [`GameFlow::calibration_result`].
    pub fn request_calibrate(&mut self) -> Effect {
        if self.state == AppState::Menu {
            self.state = AppState::Calibrating;
        }
        Effect::None
    }

    /// Calibrating → Playing on success (and the calibrated gate latches),
    /// Calibrating → Menu on failure.
    pub fn calibration_result(&mut self, ok: bool) -> Effect {
        if self.state != AppState::Calibrating {
            return Effect::None;
        }
        if ok {
            self.calibrated = true;
            self.enter_playing()
        } else {
            self.state = AppState::Menu;
            Effect::None
        }
    }

    /// Menu (only once calibrated) or GameOver → Playing.
    pub fn request_play(&mut self) -> Effect {
        match self.state {
            AppState::Menu if self.calibrated => self.enter_playing(),
            AppState::GameOver => self.enter_playing(),
            _ => Effect::None,
        }
    }

    /// Playing → Menu discards the session; GameOver → Menu keeps the
    /// committed scores.
    pub fn request_menu(&mut self) -> Effect {
        match self.state {
            AppState::Playing => {
                self.state = AppState::Menu;
                Effect::DiscardSession
            }
            AppState::GameOver => {
                self.state = AppState::Menu;
                Effect::None
            }
            _ => Effect::None,
        }
    }

    /// Any non-terminal state → Quit.
    pub fn request_quit(&mut self) -> Effect {
        if self.state != AppState::Quit {
            self.state = AppState::Quit;
        }
        Effect::None
    }

    /// The fatal in-session signal: collision or bound touch.
    /// Playing → GameOver, committing the high score.
    pub fn session_fatal(&mut self) -> Effect {
        if self.state == AppState::Playing {
            self.score.commit_high();
            self.state = AppState::GameOver;
        }
        Effect::None
    }

    fn enter_playing(&mut self) -> Effect {
        self.score.reset_session();
        self.state = AppState::Playing;
        Effect::StartSession
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
