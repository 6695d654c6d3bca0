//! The player-controlled actor: gravity integration and the flap impulse.

use crate::config::GameConfig;

// ════════════════════════════════════════════════════════════════════════════
// Actor
// ════════════════════════════════════════════════════════════════════════════

/// The falling actor. `x` is fixed after spawn — only obstacles scroll —
/// and the bounding box for collision is an axis-aligned square of side
/// `2 * half_size` centered at `(x, y)`.
#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub half_size: f32,
}

impl Actor {
    /// Fresh actor at mid-screen height, zero velocity. One is spawned at
    /// the start of every playing session.
    pub fn spawn(cfg: &GameConfig) -> Self {
        Actor {
            x: cfg.actor_x,
            y: cfg.screen_h / 2.0,
            vy: 0.0,
            half_size: cfg.actor_half_size,
        }
    }

    /// The flap response: velocity is *set* to the flap strength,
    /// overwriting whatever it was. Repeated triggers therefore do not
    /// stack into a launch.
    pub fn flap(&mut self, cfg: &GameConfig) {
        self.vy = cfg.flap_strength;
    }

    /// Advance one tick: integrate gravity, then clamp to the screen.
    ///
    /// Returns `true` when the *pre-clamp* position touched or crossed the
    /// top or bottom bound — that is the session-ending signal. The clamp
    /// only keeps the draw position sane for the frame in which the caller
    /// processes the death transition.
    pub fn tick(&mut self, cfg: &GameConfig) -> bool {
        self.vy += cfg.gravity;
        self.y += self.vy;

        let floor = cfg.actor_floor();
        let out_of_bounds = self.y <= 0.0 || self.y >= floor;

        if self.y < 0.0 {
            self.y = 0.0;
            self.vy = 0.0;
        } else if self.y > floor {
            self.y = floor;
            self.vy = 0.0;
        }

        out_of_bounds
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn spawn_is_centered_and_still() {
        let a = Actor::spawn(&cfg());
        assert_eq!(a.x, 100.0);
        assert_eq!(a.y, 400.0);
        assert_eq!(a.vy, 0.0);
    }

    #[test]
    fn gravity_integrates_linearly() {
        // vy after n ticks with no flap is 0.5 * n.
        let c = cfg();
        let mut a = Actor::spawn(&c);
        for n in 1..=10 {
            a.tick(&c);
            assert_eq!(a.vy, 0.5 * n as f32);
        }
    }

    #[test]
    fn twenty_tick_free_fall_lands_at_505() {
        // y = 400 + 0.5 * (1 + 2 + ... + 20) = 505
        let c = cfg();
        let mut a = Actor::spawn(&c);
        for _ in 0..20 {
            assert!(!a.tick(&c));
        }
        assert_eq!(a.y, 505.0);
    }

    #[test]
    fn flap_overwrites_velocity() {
        let c = cfg();
        let mut a = Actor::spawn(&c);
        a.vy = 7.5;
        a.flap(&c);
        assert_eq!(a.vy, -10.0);
        // A second flap does not stack.
        a.flap(&c);
        assert_eq!(a.vy, -10.0);
    }

    #[test]
    fn ceiling_clamp_zeroes_velocity() {
        let c = cfg();
        let mut a = Actor::spawn(&c);
        a.y = 3.0;
        a.vy = -10.0;
        assert!(a.tick(&c)); // pre-clamp y went negative
        assert_eq!(a.y, 0.0);
        assert_eq!(a.vy, 0.0);
    }

    #[test]
    fn floor_clamp_zeroes_velocity() {
        let c = cfg();
        let mut a = Actor::spawn(&c);
        a.y = c.actor_floor() - 1.0;
        a.vy = 20.0;
        assert!(a.tick(&c));
        assert_eq!(a.y, c.actor_floor());
        assert_eq!(a.vy, 0.0);
    }

    #[test]
    fn bound_touch_reported_even_though_clamped() {
        // Exactly reaching the floor counts as out of bounds.
        let c = cfg();
        let mut a = Actor::spawn(&c);
        a.y = c.actor_floor() - 0.5;
        a.vy = 0.0;
        // gravity 0.5 puts the pre-clamp y exactly on the floor
        assert!(a.tick(&c));
    }

    #[test]
    fn mid_air_tick_is_not_fatal() {
        let c = cfg();
        let mut a = Actor::spawn(&c);
        assert!(!a.tick(&c));
    }
}
