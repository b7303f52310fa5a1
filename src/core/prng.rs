// Minimal PRNG (no external crates).
//
// This is NOT cryptographically secure.
// It only drives visual jitter (confetti, the runaway button) and keeps tests reproducible.

#[derive(Debug, Clone)]
pub struct Prng {
    state: u64,
}

impl Prng {
    pub fn new(seed: u64) -> Self {
        // Avoid a zero state.
        let seed = if seed == 0 { 0x9E3779B97F4A7C15 } else { seed };
        Self { state: seed }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64_01(&mut self) -> f64 {
        let x = self.next_u64() >> 11;
        (x as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform in `[low, high)`; returns `low` when the range is empty or inverted.
    #[inline]
    pub fn gen_range_f64(&mut self, low: f64, high: f64) -> f64 {
        if !(high > low) {
            return low;
        }
        low + (high - low) * self.next_f64_01()
    }

    #[inline]
    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        let span = (high - low) as u64;
        let v = self.next_u64() % span;
        low + v as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Prng::new(7);
        let mut b = Prng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = Prng::new(0);
        for _ in 0..10_000 {
            let f = rng.gen_range_f64(-3.0, 5.0);
            assert!((-3.0..5.0).contains(&f));
            let u = rng.gen_range_usize(2, 6);
            assert!((2..6).contains(&u));
        }
        assert_eq!(rng.gen_range_f64(4.0, 4.0), 4.0);
        assert_eq!(rng.gen_range_usize(9, 3), 9);
    }
}
