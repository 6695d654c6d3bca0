//! Seedable xorshift64 generator.
//!
//! Gap placement is the only random thing in the game; a tiny local
//! generator keeps obstacle layouts reproducible from a seed.

// ════════════════════════════════════════════════════════════════════════════
// XorShift
// ════════════════════════════════════════════════════════════════════════════

/// xorshift64 — passes through every nonzero 64-bit state.
#[derive(Clone, Debug)]
pub struct XorShift {
    state: u64,
}

impl XorShift {
    /// A zero seed would lock the generator at zero forever, so it is
    /// remapped to an arbitrary nonzero constant.
    pub fn new(seed: u64) -> Self {
        XorShift {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in `[0, 1)` using the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[lo, hi)`. `hi <= lo` collapses to `lo`.
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_f32() * (hi - lo)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = XorShift::new(42);
        let mut b = XorShift::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn zero_seed_is_remapped() {
        let mut r = XorShift::new(0);
        assert_ne!(r.next_u64(), 0);
    }

    #[test]
    fn f32_stays_in_unit_interval() {
        let mut r = XorShift::new(7);
        for _ in 0..1000 {
            let v = r.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn range_respects_bounds() {
        let mut r = XorShift::new(99);
        for _ in 0..1000 {
            let v = r.range_f32(150.0, 450.0);
            assert!((150.0..450.0).contains(&v));
        }
    }

    #[test]
    fn degenerate_range_collapses_to_lo() {
        let mut r = XorShift::new(5);
        assert_eq!(r.range_f32(10.0, 10.0), 10.0);
        assert_eq!(r.range_f32(10.0, 3.0), 10.0);
    }
}
