//! Ties the gesture detector, the simulation core, and the window together.
//!
//! One cooperative loop, one screen at a time. Input events are gathered
//! once at the top of each iteration; while playing, the tick always
//! completes its physics/collision/render pass before any state-change
//! request is honoured — there is no mid-tick preemption.

use anyhow::{anyhow, Result};
use log::{debug, info};

use flap_core::{Actor, AppState, Effect, GameConfig, GameFlow, ObstacleField, XorShift};
use pose_input::{GestureDetector, PoseSource, SimArms};

use crate::visualizer::Visualizer;

/// Paced frame rates: play needs responsiveness, menus do not.
const PLAY_FPS: u64 = 60;
const MENU_FPS: u64 = 30;

// ════════════════════════════════════════════════════════════════════════════
// Session — the per-run actor and obstacle field
// ════════════════════════════════════════════════════════════════════════════

struct Session {
    actor: Actor,
    field: ObstacleField,
}

impl Session {
    fn spawn(cfg: &GameConfig, seed: u64) -> Self {
        Session {
            actor: Actor::spawn(cfg),
            field: ObstacleField::new(cfg, seed),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

/// Owns everything with a lifetime: the flow machine (and through it the
/// scores), the detector (and through it the camera), and the in-progress
/// session if one exists. Dropped on every exit path, which releases the
/// camera.
struct App<S: PoseSource> {
    cfg: GameConfig,
    flow: GameFlow,
    detector: GestureDetector<S>,
    session: Option<Session>,
    seeds: XorShift,
}

impl<S: PoseSource> App<S> {
    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::StartSession => {
                let seed = self.seeds.next_u64();
                self.session = Some(Session::spawn(&self.cfg, seed));
                info!("session started");
            }
            Effect::DiscardSession => {
                self.session = None;
                info!("session abandoned");
            }
            Effect::None => {}
        }
    }

    // ── Menu ─────────────────────────────────────────────────────────────

    fn menu_frame(&mut self, vis: &mut Visualizer) {
        vis.limit_rate(MENU_FPS);
        let input = vis.poll();

        if input.quit || input.cancel {
            self.flow.request_quit();
            return;
        }
        if input.calibrate {
            self.flow.request_calibrate();
            return;
        }
        if input.primary {
            let e = self.flow.request_play();
            self.apply(e);
            if self.flow.state() == AppState::Playing {
                return;
            }
        }

        let preview = self.detector.preview();
        vis.render_menu(self.flow.calibrated(), preview.as_ref(), &self.flow.score);
    }

    // ── Calibrating ──────────────────────────────────────────────────────

    /// Draw the banner first so the screen is visible during the capture.
    fn calibrating_frame(&mut self, vis: &mut Visualizer) {
        vis.render_calibrating();
        let ok = self.detector.calibrate();
        if !ok {
            info!("calibration failed - no body detected");
        }
        let e = self.flow.calibration_result(ok);
        self.apply(e);
    }

    // ── Playing ──────────────────────────────────────────────────────────

    fn playing_frame(&mut self, vis: &mut Visualizer) {
        vis.limit_rate(PLAY_FPS);
        // Input is gathered at tick start but honoured only after the
        // physics/collision/render pass — there is no mid-tick preemption.
        let input = vis.poll();

        let Some(session) = self.session.as_mut() else {
            // No live session in the playing state is unreachable through
            // the flow machine; bounce to the menu rather than crash.
            self.flow.request_menu();
            return;
        };

        // Fixed-tick order: gesture, impulse, actor, field, fatal check.
        let poll = self.detector.poll();
        if poll.triggered {
            debug!("flap");
            session.actor.flap(&self.cfg);
        }

        let out_of_bounds = session.actor.tick(&self.cfg);
        let field_tick = session.field.tick(&session.actor, &self.cfg);
        if field_tick.scored > 0 {
            self.flow.score.add(field_tick.scored);
            debug!("score {}", self.flow.score.current);
        }

        vis.render_playing(
            &self.cfg,
            &session.actor,
            session.field.obstacles(),
            &self.flow.score,
            self.detector.gesture().arms_raised(),
            poll.frame.as_ref(),
        );

        // Quit beats everything; the fatal signal beats a menu request, so
        // a run that ends on the same tick the player cancels still shows
        // its game-over screen.
        if input.quit {
            self.flow.request_quit();
        } else if field_tick.collided || out_of_bounds {
            self.flow.session_fatal();
            self.session = None;
            info!(
                "session over: score {} high {}",
                self.flow.score.current, self.flow.score.high
            );
        } else if input.cancel {
            let e = self.flow.request_menu();
            self.apply(e);
        }
    }

    // ── Game over ────────────────────────────────────────────────────────

    fn game_over_frame(&mut self, vis: &mut Visualizer) {
        vis.limit_rate(MENU_FPS);
        let input = vis.poll();

        if input.quit {
            self.flow.request_quit();
            return;
        }
        if input.primary {
            let e = self.flow.request_play();
            self.apply(e);
            return;
        }
        if input.cancel {
            let e = self.flow.request_menu();
            self.apply(e);
            return;
        }

        vis.render_game_over(&self.flow.score);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the game against an already-acquired pose source.
///
/// `sim_arms` is `Some` in simulation mode so the window can feed the held
/// arm keys back to the source. `seed` varies obstacle layouts between
/// processes. Returns once the flow reaches `Quit` or the window closes;
/// all resources release on the way out.
pub fn run<S: PoseSource>(
    cfg: GameConfig,
    source: S,
    sim_arms: Option<SimArms>,
    seed: u64,
) -> Result<()> {
    let mut vis = Visualizer::new(&cfg, sim_arms)
        .map_err(|e| anyhow!("window creation failed: {e}"))?;

    let mut app = App {
        cfg,
        flow: GameFlow::new(),
        detector: GestureDetector::new(source),
        session: None,
        seeds: XorShift::new(seed),
    };

    while vis.is_open() && app.flow.state() != AppState::Quit {
        match app.flow.state() {
            AppState::Menu => app.menu_frame(&mut vis),
            AppState::Calibrating => app.calibrating_frame(&mut vis),
            AppState::Playing => app.playing_frame(&mut vis),
            AppState::GameOver => app.game_over_frame(&mut vis),
            AppState::Quit => {}
        }
    }

    info!("quit - final high score {}", app.flow.score.high);
    Ok(())
}
