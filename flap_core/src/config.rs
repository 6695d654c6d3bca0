//! Game tuning constants.

// ════════════════════════════════════════════════════════════════════════════
// GameConfig
// ════════════════════════════════════════════════════════════════════════════

/// Every tunable quantity in one struct, threaded through the simulation
/// instead of living as globals.
///
/// Units: pixels for distances, pixels/tick for speeds, pixels/tick² for
/// gravity. One tick = one rendered frame at the playing frame rate.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub screen_w: f32,
    pub screen_h: f32,

    // ── actor ────────────────────────────────────────────────────────────
    /// Downward acceleration applied every tick.
    pub gravity: f32,
    /// Velocity set (not added) by a flap. Negative = upward.
    pub flap_strength: f32,
    /// Fixed horizontal position of the actor; only obstacles scroll.
    pub actor_x: f32,
    /// Half the side of the actor's square bounding box.
    pub actor_half_size: f32,

    // ── obstacles ────────────────────────────────────────────────────────
    /// Leftward scroll applied to every obstacle each tick.
    pub scroll_speed: f32,
    pub obstacle_width: f32,
    /// Vertical opening the actor must pass through.
    pub gap_height: f32,
    /// The gap's top edge never lands closer than this to either screen edge.
    pub gap_margin: f32,
    /// Minimum horizontal spacing before the next obstacle may spawn.
    pub spawn_gap: f32,
    /// X position of the first obstacle of a fresh session, past the right
    /// edge so it eases in.
    pub first_spawn_x: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_w: 1200.0,
            screen_h: 800.0,

            gravity: 0.5,
            flap_strength: -10.0,
            actor_x: 100.0,
            actor_half_size: 45.0,

            scroll_speed: 3.0,
            obstacle_width: 70.0,
            gap_height: 200.0,
            gap_margin: 150.0,
            spawn_gap: 300.0,
            first_spawn_x: 1400.0,
        }
    }
}

impl GameConfig {
    /// Upper end of the actor's clamp range: `y` stays in
    /// `[0, screen_h - 2 * actor_half_size]`.
    pub fn actor_floor(&self) -> f32 {
        self.screen_h - self.actor_half_size * 2.0
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
