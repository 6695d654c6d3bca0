//! Session score and the process-wide high score.

// ════════════════════════════════════════════════════════════════════════════
// ScoreState
// ════════════════════════════════════════════════════════════════════════════

/// `current` lives for one playing session; `high` is monotone for the
/// whole process and is committed on every transition into game-over.
/// Neither value persists across process restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub current: u32,
    pub high: u32,
}

impl ScoreState {
    /// Called on entry into a playing session.
    pub fn reset_session(&mut self) {
        self.current = 0;
    }

    pub fn add(&mut self, points: u32) {
        self.current += points;
    }

    /// `high = max(high, current)` — never decreases.
    pub fn commit_high(&mut self) {
        self.high = self.high.max(self.current);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_rises_then_sticks() {
        let mut s = ScoreState::default();
        s.add(5);
        s.commit_high();
        assert_eq!(s.high, 5);

        s.reset_session();
        s.add(3);
        s.commit_high();
        assert_eq!(s.high, 5); // a worse session leaves it alone

        s.reset_session();
        s.add(9);
        s.commit_high();
        assert_eq!(s.high, 9);
    }

    #[test]
    fn reset_only_touches_current() {
        let mut s = ScoreState { current: 4, high: 7 };
        s.reset_session();
        assert_eq!(s.current, 0);
        assert_eq!(s.high, 7);
    }
}
