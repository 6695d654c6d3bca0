//! Software-rendered game window using `minifb`.
//!
//! Layout while playing:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ [SCORE panel] [camera feed]                                  │
//! │        ████            ████                ████              │
//! │        ████            ████                                  │
//! │   ◆                                        ████              │
//! │        ████                                ████              │
//! │        ████            ████                ████              │
//! │                      [ARMS UP indicator]                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything is drawn into one ARGB framebuffer with the rect / circle /
//! 3×5-bitmap-font primitives at the bottom of this file.

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use flap_core::{Actor, GameConfig, Obstacle, ScoreState};
use pose_input::{Frame, SimArms};

// ════════════════════════════════════════════════════════════════════════════
// Palette
// ════════════════════════════════════════════════════════════════════════════

const SKY_TOP: (u32, u32) = (135, 165); // red, green at the top row; blue fixed
const SKY_SPAN: u32 = 38; // red/green rise toward the bottom row
const SKY_BLUE: u32 = 235;

const CLOUD_WHITE: u32 = 0xFFFF_FFFF;
const PIPE_GREEN: u32 = 0xFF22_8B22;
const PIPE_EDGE: u32 = 0xFF00_6400;
const ACTOR_YELLOW: u32 = 0xFFFF_D700;
const ACTOR_EDGE: u32 = 0xFFB8_860B;
const INK: u32 = 0xFF00_0000;
const WHITE: u32 = 0xFFFF_FFFF;
const GOLD: u32 = 0xFFFF_C800;
const ORANGE: u32 = 0xFFFF_A500;
const RED: u32 = 0xFFDC_143C;
const GREEN: u32 = 0xFF22_8B22;
const PANEL_BLUE: u32 = 0xFFAD_D8E6;
const PANEL_DARK: u32 = 0xFF32_6496;
const DIM: u32 = 0xFF64_6464;

// ════════════════════════════════════════════════════════════════════════════
// InputEvents — discrete intents gathered once per tick
// ════════════════════════════════════════════════════════════════════════════

/// Key events translated to named intents; the app maps `cancel` to quit
/// or back-to-menu depending on the current screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputEvents {
    pub calibrate: bool,
    pub primary: bool,
    pub cancel: bool,
    pub quit: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Cloud — drifting background decoration
// ════════════════════════════════════════════════════════════════════════════

struct Cloud {
    x: f32,
    y: f32,
    speed: f32,
    size: f32,
}

impl Cloud {
    fn tick(&mut self, screen_w: f32) {
        self.x += self.speed;
        if self.x > screen_w + 100.0 {
            self.x = -100.0;
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf: Vec<u32>,
    width: usize,
    height: usize,
    clouds: Vec<Cloud>,
    /// Present in simulation mode: the held A/D keys feed these flags.
    sim_arms: Option<SimArms>,
}

impl Visualizer {
    pub fn new(cfg: &GameConfig, sim_arms: Option<SimArms>) -> Result<Self, String> {
        let width = cfg.screen_w as usize;
        let height = cfg.screen_h as usize;

        let mut window = Window::new(
            "Flappy Arms — Gym Edition",
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        let clouds = vec![
            Cloud { x: 100.0, y: 100.0, speed: 0.3, size: 1.2 },
            Cloud { x: 400.0, y: 150.0, speed: 0.2, size: 0.8 },
            Cloud { x: 700.0, y: 80.0, speed: 0.25, size: 1.0 },
            Cloud { x: 200.0, y: 300.0, speed: 0.15, size: 1.1 },
            Cloud { x: 800.0, y: 250.0, speed: 0.35, size: 0.9 },
        ];

        Ok(Visualizer {
            window,
            buf: vec![0; width * height],
            width,
            height,
            clouds,
            sim_arms,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Cap the paced frame rate; menus run slower than play.
    pub fn limit_rate(&mut self, fps: u64) {
        self.window
            .limit_update_rate(Some(std::time::Duration::from_micros(1_000_000 / fps.max(1))));
    }

    /// Gather this tick's key events and refresh the sim arm flags from
    /// the held keys.
    pub fn poll(&mut self) -> InputEvents {
        if !self.window.is_open() {
            return InputEvents {
                quit: true,
                ..InputEvents::default()
            };
        }

        if let Some(arms) = &self.sim_arms {
            arms.set(
                self.window.is_key_down(Key::A),
                self.window.is_key_down(Key::D),
            );
        }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        InputEvents {
            calibrate: one_shot(Key::C),
            primary: one_shot(Key::Space),
            cancel: one_shot(Key::Escape),
            quit: one_shot(Key::Q),
        }
    }

    fn sim_mode(&self) -> bool {
        self.sim_arms.is_some()
    }

    // ════════════════════════════════════════════════════════════════════
    // Screens
    // ════════════════════════════════════════════════════════════════════

    pub fn render_menu(&mut self, calibrated: bool, preview: Option<&Frame>, score: &ScoreState) {
        self.draw_sky();

        let cx = self.width as i32 / 2;
        self.draw_text_centered("FLAPPY ARMS", cx, 60, ORANGE, 9);
        self.draw_text_centered("WAVE TO PLAY", cx, 130, GOLD, 4);

        // ── main panel ────────────────────────────────────────────────────
        let pw = 520;
        let ph = 420;
        let px = cx - pw / 2;
        let py = 200;
        self.fill_rect(px, py, pw, ph, PANEL_BLUE);
        self.draw_border(px, py, pw, ph, 4, WHITE);

        if calibrated {
            self.draw_text_centered("CALIBRATED", cx, py + 20, GREEN, 3);
            self.draw_text_centered("PRESS SPACE TO PLAY", cx, py + 50, PANEL_DARK, 2);
        } else {
            self.draw_text_centered("PRESS C TO CALIBRATE", cx, py + 30, PANEL_DARK, 3);
        }

        // ── camera preview ────────────────────────────────────────────────
        let cam_w = 450;
        let cam_h = 250;
        let cam_x = cx - cam_w / 2;
        let cam_y = py + 90;
        self.draw_camera_panel(preview, cam_x, cam_y, cam_w, cam_h);

        if score.high > 0 {
            self.draw_text_centered(&format!("HIGH SCORE {}", score.high), cx, py + ph - 60, GOLD, 3);
        }

        self.draw_legend("C CALIBRATE   SPACE PLAY   ESC QUIT");
        self.present();
    }

    pub fn render_calibrating(&mut self) {
        self.draw_sky();
        let cx = self.width as i32 / 2;
        self.draw_text_centered("CALIBRATING", cx, self.height as i32 / 2 - 20, GOLD, 5);
        self.draw_text_centered("STAND STILL FACING THE CAMERA", cx, self.height as i32 / 2 + 40, WHITE, 2);
        self.present();
    }

    pub fn render_playing(
        &mut self,
        cfg: &GameConfig,
        actor: &Actor,
        obstacles: &[Obstacle],
        score: &ScoreState,
        arms_raised: bool,
        camera: Option<&Frame>,
    ) {
        self.draw_sky();

        for ob in obstacles {
            self.draw_obstacle(ob, cfg);
        }
        self.draw_actor(actor);

        // ── score panel ───────────────────────────────────────────────────
        self.fill_rect(10, 10, 220, 54, WHITE);
        self.draw_border(10, 10, 220, 54, 2, PANEL_DARK);
        self.draw_text(&format!("SCORE {}", score.current), 24, 26, INK, 4);

        // ── camera feed, small, next to the score ─────────────────────────
        self.draw_camera_panel(camera, 250, 10, 140, 105);

        // ── arms-up indicator ─────────────────────────────────────────────
        if arms_raised {
            let iw = 260;
            let ih = 50;
            let ix = self.width as i32 / 2 - iw / 2;
            let iy = self.height as i32 - 70;
            self.fill_rect(ix, iy, iw, ih, GREEN);
            self.draw_border(ix, iy, iw, ih, 2, WHITE);
            self.draw_text_centered("ARMS UP", self.width as i32 / 2, iy + 15, WHITE, 4);
        }

        self.present();
    }

    pub fn render_game_over(&mut self, score: &ScoreState) {
        self.draw_sky();

        let cx = self.width as i32 / 2;
        let pw = 620;
        let ph = 400;
        let px = cx - pw / 2;
        let py = 200;
        self.fill_rect(px, py, pw, ph, 0xFFFF_C8C8);
        self.draw_border(px, py, pw, ph, 6, RED);

        self.draw_text_centered("GAME OVER", cx, py + 50, RED, 8);
        self.draw_text_centered(&format!("SCORE {}", score.current), cx, py + 170, INK, 5);
        self.draw_text_centered(&format!("HIGH SCORE {}", score.high), cx, py + 230, GOLD, 5);

        self.draw_text_centered("SPACE - PLAY AGAIN", cx, py + 310, PANEL_DARK, 2);
        self.draw_text_centered("ESC - MENU", cx, py + 340, PANEL_DARK, 2);

        self.draw_legend("SPACE PLAY AGAIN   ESC MENU   Q QUIT");
        self.present();
    }

    // ════════════════════════════════════════════════════════════════════
    // Scene pieces
    // ════════════════════════════════════════════════════════════════════

    /// Vertical sky gradient plus the drifting clouds.
    fn draw_sky(&mut self) {
        let (r0, g0) = SKY_TOP;
        for row in 0..self.height {
            let t = row as u32;
            let r = r0 + SKY_SPAN * t / self.height as u32;
            let g = g0 + SKY_SPAN * t / self.height as u32;
            let color = 0xFF00_0000 | (r << 16) | (g << 8) | SKY_BLUE;
            let base = row * self.width;
            self.buf[base..base + self.width].fill(color);
        }

        let w = self.width as f32;
        for i in 0..self.clouds.len() {
            self.clouds[i].tick(w);
            let (x, y, size) = {
                let c = &self.clouds[i];
                (c.x as i32, c.y as i32, c.size)
            };
            self.draw_cloud(x, y, size);
        }
    }

    /// A cloud is a cluster of overlapping filled circles.
    fn draw_cloud(&mut self, x: i32, y: i32, size: f32) {
        let base = (40.0 * size) as i32;
        self.fill_circle(x, y, base, CLOUD_WHITE);
        self.fill_circle(x + base, y, base * 4 / 5, CLOUD_WHITE);
        self.fill_circle(x + base * 9 / 5, y, base, CLOUD_WHITE);
        self.fill_circle(x + base / 2, y - base / 2, base * 7 / 10, CLOUD_WHITE);
        self.fill_circle(x + base * 13 / 10, y - base / 2, base * 7 / 10, CLOUD_WHITE);
    }

    fn draw_obstacle(&mut self, ob: &Obstacle, cfg: &GameConfig) {
        let x = ob.x as i32;
        let w = cfg.obstacle_width as i32;
        let gap_top = ob.gap_top as i32;
        let lower_y = (ob.gap_top + cfg.gap_height) as i32;
        let h = self.height as i32;

        self.fill_rect(x, 0, w, gap_top, PIPE_GREEN);
        self.draw_border(x, 0, w, gap_top, 3, PIPE_EDGE);

        self.fill_rect(x, lower_y, w, h - lower_y, PIPE_GREEN);
        self.draw_border(x, lower_y, w, h - lower_y, 3, PIPE_EDGE);
    }

    fn draw_actor(&mut self, actor: &Actor) {
        let side = (actor.half_size * 2.0) as i32;
        let x = (actor.x - actor.half_size) as i32;
        let y = (actor.y - actor.half_size) as i32;
        self.fill_rect(x, y, side, side, ACTOR_YELLOW);
        self.draw_border(x, y, side, side, 3, ACTOR_EDGE);
        // Eye, offset toward the direction of travel.
        self.fill_circle(actor.x as i32 + 14, actor.y as i32 - 8, 6, INK);
    }

    /// Camera feed scaled into a bordered panel; a placeholder when the
    /// source has no frames (simulation mode or a dropped read).
    fn draw_camera_panel(&mut self, frame: Option<&Frame>, x: i32, y: i32, w: i32, h: i32) {
        match frame {
            Some(f) if f.width > 0 && f.height > 0 => {
                self.blit_frame(f, x, y, w, h);
            }
            _ => {
                self.fill_rect(x, y, w, h, 0xFF1E_1E28);
                let label = if self.sim_mode() { "SIM MODE" } else { "NO SIGNAL" };
                self.draw_text_centered(label, x + w / 2, y + h / 2 - 10, DIM, 2);
                if self.sim_mode() {
                    self.draw_text_centered("HOLD A OR D", x + w / 2, y + h / 2 + 14, DIM, 1);
                }
            }
        }
        self.draw_border(x - 3, y - 3, w + 6, h + 6, 3, WHITE);
    }

    fn draw_legend(&mut self, text: &str) {
        let y = self.height as i32 - 22;
        self.draw_text(text, 10, y, 0xFF33_3344, 2);
    }

    fn present(&mut self) {
        self.window
            .update_with_buffer(&self.buf, self.width, self.height)
            .ok();
    }

    // ════════════════════════════════════════════════════════════════════
    // Primitive drawing helpers
    // ════════════════════════════════════════════════════════════════════

    /// Filled rectangle, clipped to the buffer on all sides.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.clamp(0, self.width as i32) as usize;
        let y0 = y.clamp(0, self.height as i32) as usize;
        let x1 = (x + w).clamp(0, self.width as i32) as usize;
        let y1 = (y + h).clamp(0, self.height as i32) as usize;
        for row in y0..y1 {
            let base = row * self.width;
            self.buf[base + x0..base + x1].fill(color);
        }
    }

    /// Rectangle outline of thickness `t`, drawn as four filled strips.
    fn draw_border(&mut self, x: i32, y: i32, w: i32, h: i32, t: i32, color: u32) {
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + w - t, y, t, h, color);
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            let half = ((r * r - dy * dy) as f32).sqrt() as i32;
            self.fill_rect(cx - half, cy + dy, half * 2, 1, color);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// Nearest-neighbour blit of a camera frame into the given rect.
    fn blit_frame(&mut self, frame: &Frame, x: i32, y: i32, w: i32, h: i32) {
        for dy in 0..h {
            let sy = (dy as usize * frame.height) / h as usize;
            for dx in 0..w {
                let sx = (dx as usize * frame.width) / w as usize;
                let px = frame.pixels[sy * frame.width + sx];
                self.set_pixel(x + dx, y + dy, px);
            }
        }
    }

    /// 3×5 bitmap font scaled up by `scale`; 1 glyph column of spacing.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, scale: i32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row as i32 * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale;
        }
    }

    fn draw_text_centered(&mut self, text: &str, cx: i32, y: i32, color: u32, scale: i32) {
        let w = text_width(text, scale);
        self.draw_text(text, cx - w / 2, y, color, scale);
    }
}

/// Pixel width of `text` at `scale` (3 columns + 1 gap per glyph, no
/// trailing gap).
fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        n * 4 * scale - scale
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_width_counts_glyph_cells() {
        // 3 columns + 1 gap per glyph, minus the trailing gap.
        assert_eq!(text_width("AB", 1), 7);
        assert_eq!(text_width("AB", 4), 28);
        assert_eq!(text_width("", 3), 0);
    }

    #[test]
    fn every_score_digit_has_a_glyph() {
        for c in "0123456789".chars() {
            assert_ne!(char_glyph(c), char_glyph('~'), "missing glyph for {c}");
        }
    }
}
