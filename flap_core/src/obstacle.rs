//! Scrolling gap obstacles and the field that owns them.
//!
//! The field is ticked once per simulation step and performs, in order:
//! advance, collide, score, evict, spawn. Collision and scoring run before
//! eviction so an obstacle leaving the screen still gets its final tick.

use crate::actor::Actor;
use crate::config::GameConfig;
use crate::rng::XorShift;

// ════════════════════════════════════════════════════════════════════════════
// Rect — axis-aligned collision rectangle
// ════════════════════════════════════════════════════════════════════════════

/// Axis-aligned rectangle, `(x, y)` top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn centered(cx: f32, cy: f32, side: f32) -> Self {
        Rect {
            x: cx - side / 2.0,
            y: cy - side / 2.0,
            w: side,
            h: side,
        }
    }

    /// Half-open overlap test: rectangles sharing only an edge do not
    /// intersect, any positive overlap on both axes does.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Obstacle — one gap obstacle
// ════════════════════════════════════════════════════════════════════════════

/// A single scrolling obstacle: two vertical segments with a gap between
/// `gap_top` and `gap_top + gap_height`.
#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub gap_top: f32,
    /// Flips to `true` exactly once, when the trailing edge passes the
    /// actor's x. That transition is the sole scoring event.
    pub scored: bool,
}

impl Obstacle {
    /// Spawn at `x` with the gap's top edge drawn uniformly from
    /// `[gap_margin, screen_h - gap_height - gap_margin]`, so both segments
    /// keep positive height and the gap clears both screen edges.
    pub fn spawn(x: f32, cfg: &GameConfig, rng: &mut XorShift) -> Self {
        let gap_top = rng.range_f32(cfg.gap_margin, cfg.screen_h - cfg.gap_height - cfg.gap_margin);
        Obstacle {
            x,
            gap_top,
            scored: false,
        }
    }

    pub fn advance(&mut self, cfg: &GameConfig) {
        self.x -= cfg.scroll_speed;
    }

    pub fn trailing_edge(&self, cfg: &GameConfig) -> f32 {
        self.x + cfg.obstacle_width
    }

    /// Gone once the trailing edge is left of the screen's left edge.
    pub fn off_screen(&self, cfg: &GameConfig) -> bool {
        self.trailing_edge(cfg) < 0.0
    }

    pub fn upper_rect(&self, cfg: &GameConfig) -> Rect {
        Rect {
            x: self.x,
            y: 0.0,
            w: cfg.obstacle_width,
            h: self.gap_top,
        }
    }

    /// The lower segment's height overshoots the screen bottom; the overlap
    /// test does not care and the renderer clips.
    pub fn lower_rect(&self, cfg: &GameConfig) -> Rect {
        Rect {
            x: self.x,
            y: self.gap_top + cfg.gap_height,
            w: cfg.obstacle_width,
            h: cfg.screen_h,
        }
    }

    pub fn collides_with(&self, actor: &Actor, cfg: &GameConfig) -> bool {
        let body = Rect::centered(actor.x, actor.y, actor.half_size * 2.0);
        body.intersects(&self.upper_rect(cfg)) || body.intersects(&self.lower_rect(cfg))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ObstacleField — the live sequence of obstacles
// ════════════════════════════════════════════════════════════════════════════

/// Result of one field tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldTick {
    /// Any obstacle intersected the actor this tick — fatal for the session.
    pub collided: bool,
    /// Obstacles whose `scored` flag flipped this tick.
    pub scored: u32,
}

/// Owns the obstacles in spawn order (equivalently ascending x at spawn)
/// and applies the per-tick pipeline.
#[derive(Clone, Debug)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    rng: XorShift,
}

impl ObstacleField {
    /// Fresh field for a new session: a single obstacle past the right
    /// screen edge so the first one eases in.
    pub fn new(cfg: &GameConfig, seed: u64) -> Self {
        let mut rng = XorShift::new(seed);
        let first = Obstacle::spawn(cfg.first_spawn_x, cfg, &mut rng);
        ObstacleField {
            obstacles: vec![first],
            rng,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// One tick: advance, collide, score, evict, spawn — in that order, so
    /// an obstacle in its last visible tick still collides and scores.
    pub fn tick(&mut self, actor: &Actor, cfg: &GameConfig) -> FieldTick {
        let mut out = FieldTick::default();

        for ob in &mut self.obstacles {
            ob.advance(cfg);
        }

        for ob in &self.obstacles {
            if ob.collides_with(actor, cfg) {
                out.collided = true;
            }
        }

        for ob in &mut self.obstacles {
            if !ob.scored && ob.trailing_edge(cfg) < actor.x {
                ob.scored = true;
                out.scored += 1;
            }
        }

        self.obstacles.retain(|ob| !ob.off_screen(cfg));

        // Spawn throttle: at most one obstacle within `spawn_gap` of the
        // right edge after every tick.
        let want_spawn = match self.obstacles.last() {
            None => true,
            Some(last) => last.x < cfg.screen_w - cfg.spawn_gap,
        };
        if want_spawn {
            let ob = Obstacle::spawn(cfg.screen_w, cfg, &mut self.rng);
            self.obstacles.push(ob);
        }

        out
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

    fn obstacle_at(x: f32, gap_top: f32) -> Obstacle {
        Obstacle {
            x,
            gap_top,
            scored: false,
        }
    }

    fn actor_at(x: f32, y: f32, c: &GameConfig) -> Actor {
        Actor {
            x,
            y,
            vy: 0.0,
            half_size: c.actor_half_size,
        }
    }

    // ── Rect ─────────────────────────────────────────────────────────────

    #[test]
    fn rects_sharing_an_edge_do_not_intersect() {
        let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let b = Rect { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
        assert!(!a.intersects(&b));
    }

    #[test]
    fn one_unit_overlap_intersects() {
        let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let b = Rect { x: 9.0, y: 9.0, w: 10.0, h: 10.0 };
        assert!(a.intersects(&b));
    }

    // ── Collision ────────────────────────────────────────────────────────

    #[test]
    fn actor_fully_inside_gap_is_safe() {
        let c = cfg();
        let ob = obstacle_at(100.0, 300.0); // gap spans y 300..500
        // Actor square spans y 355..445 — clear of both segments.
        let a = actor_at(100.0, 400.0, &c);
        assert!(!ob.collides_with(&a, &c));
    }

    #[test]
    fn one_unit_into_upper_segment_collides() {
        let c = cfg();
        let ob = obstacle_at(100.0, 300.0);
        // Top of the actor square at 299 — one unit into the upper segment.
        let a = actor_at(100.0, 299.0 + c.actor_half_size, &c);
        assert!(ob.collides_with(&a, &c));
    }

    #[test]
    fn one_unit_into_lower_segment_collides() {
        let c = cfg();
        let ob = obstacle_at(100.0, 300.0); // lower segment starts at 500
        let a = actor_at(100.0, 501.0 - c.actor_half_size, &c);
        assert!(ob.collides_with(&a, &c));
    }

    #[test]
    fn horizontally_clear_actor_is_safe() {
        let c = cfg();
        let ob = obstacle_at(500.0, 300.0);
        let a = actor_at(100.0, 100.0, &c); // inside upper band vertically, far left
        assert!(!ob.collides_with(&a, &c));
    }

    // ── Spawn bounds ─────────────────────────────────────────────────────

    #[test]
    fn gap_top_stays_inside_margins() {
        let c = cfg();
        let mut rng = XorShift::new(1234);
        for _ in 0..500 {
            let ob = Obstacle::spawn(c.screen_w, &c, &mut rng);
            assert!(ob.gap_top >= c.gap_margin);
            assert!(ob.gap_top <= c.screen_h - c.gap_height - c.gap_margin);
        }
    }

    // ── Scoring ──────────────────────────────────────────────────────────

    #[test]
    fn scores_exactly_when_trailing_edge_passes_actor() {
        // Spawned at x = 1200, width 70, speed 3, actor at x = 100:
        // trailing edge = 1270 - 3n, first < 100 at n = 391.
        let c = cfg();
        let a = actor_at(100.0, 400.0, &c);
        let mut field = ObstacleField {
            obstacles: vec![obstacle_at(1200.0, 300.0)],
            rng: XorShift::new(1),
        };

        let mut scored_at = None;
        for n in 1..=400u32 {
            let t = field.tick(&a, &c);
            if t.scored > 0 && scored_at.is_none() {
                scored_at = Some(n);
            }
        }
        assert_eq!(scored_at, Some(391));
    }

    #[test]
    fn scoring_fires_at_most_once_per_obstacle() {
        let c = cfg();
        let a = actor_at(100.0, 400.0, &c);
        let mut field = ObstacleField {
            obstacles: vec![obstacle_at(200.0, 300.0)],
            rng: XorShift::new(1),
        };

        let mut total = 0;
        // Run until the original obstacle has long since been evicted; the
        // replacement spawns at 1200 and never reaches the actor in time.
        for _ in 0..120 {
            total += field.tick(&a, &c).scored;
        }
        assert_eq!(total, 1);
    }

    // ── Eviction ordering ────────────────────────────────────────────────

    #[test]
    fn exiting_obstacle_scores_on_its_final_tick() {
        let c = cfg();
        let a = actor_at(100.0, 400.0, &c);
        // Trailing edge at 2.0; the next tick moves it to -1.0, which is
        // both its scoring tick and its eviction tick.
        let mut field = ObstacleField {
            obstacles: vec![obstacle_at(-68.0, 300.0)],
            rng: XorShift::new(1),
        };
        let t = field.tick(&a, &c);
        assert_eq!(t.scored, 1);
        assert!(field.obstacles().iter().all(|o| o.x > 0.0)); // evicted
    }

    #[test]
    fn off_screen_obstacles_are_dropped() {
        let c = cfg();
        let a = actor_at(100.0, 400.0, &c);
        let mut field = ObstacleField::new(&c, 9);
        for _ in 0..1000 {
            field.tick(&a, &c);
            assert!(field.obstacles().iter().all(|o| !o.off_screen(&c)));
        }
    }

    // ── Spawn throttling ─────────────────────────────────────────────────

    #[test]
    fn spawn_gap_is_respected_after_every_tick() {
        let c = cfg();
        let a = actor_at(100.0, 400.0, &c);
        let mut field = ObstacleField::new(&c, 42);
        for _ in 0..2000 {
            field.tick(&a, &c);
            let xs: Vec<f32> = field.obstacles().iter().map(|o| o.x).collect();
            for pair in xs.windows(2) {
                assert!(
                    pair[1] - pair[0] >= c.spawn_gap,
                    "obstacles too close: {:?}",
                    xs
                );
            }
        }
    }

    #[test]
    fn empty_field_spawns_at_right_edge() {
        let c = cfg();
        let a = actor_at(100.0, 400.0, &c);
        let mut field = ObstacleField {
            obstacles: Vec::new(),
            rng: XorShift::new(3),
        };
        field.tick(&a, &c);
        assert_eq!(field.obstacles().len(), 1);
        assert_eq!(field.obstacles()[0].x, c.screen_w);
    }

    #[test]
    fn fresh_field_starts_with_one_eased_in_obstacle() {
        let c = cfg();
        let field = ObstacleField::new(&c, 3);
        assert_eq!(field.obstacles().len(), 1);
        assert_eq!(field.obstacles()[0].x, c.first_spawn_x);
    }
}
