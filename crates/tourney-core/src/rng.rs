//! Random sources for selection sampling.
//!
//! Seeded tournaments use a small linear-congruential generator whose raw
//! state can be captured and restored, so the uniform stream continues
//! bit-identically across process invocations. Unseeded tournaments fall
//! back to the thread-local system generator and offer no reproducibility.

use rand::Rng as _;
use rand::rngs::ThreadRng;

/// Modulus for seed normalization: seeds land in `[1, 2^31 - 2]`.
const SEED_RANGE: i64 = 2_147_483_646;

const LCG_MULTIPLIER: u32 = 1_664_525;
const LCG_INCREMENT: u32 = 1_013_904_223;

/// Divisor mapping the full `u32` state space onto `[0, 1)`.
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Tiny deterministic LCG with an externally restorable state.
///
/// Reproducible across platforms: all arithmetic is wrapping `u32`, and the
/// uniform output is an exact dyadic rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcgRng {
    state: u32,
}

impl LcgRng {
    /// Create a generator from a seed, normalized into `[1, 2^31 - 2]`.
    #[must_use]
    pub fn new(seed: i64) -> Self {
        // rem_euclid keeps negative seeds in range without branching.
        let normalized = seed.rem_euclid(SEED_RANGE) + 1;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let state = normalized as u32;
        Self { state }
    }

    /// Next uniform value in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / TWO_POW_32
    }

    /// The raw internal state, as advanced by the most recent draw.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Restore a previously captured state.
    ///
    /// Two generators built from the same seed and restored to the same
    /// captured state produce bit-identical subsequent output.
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }
}

/// The uniform source injected into every randomness-consuming operation.
#[derive(Debug, Clone)]
pub enum RandomSource {
    /// Deterministic, resumable stream for seeded tournaments.
    Seeded(LcgRng),
    /// Thread-local system generator; no state capture, no reproducibility.
    System(ThreadRng),
}

impl RandomSource {
    /// Deterministic source from an explicit seed.
    #[must_use]
    pub fn seeded(seed: i64) -> Self {
        Self::Seeded(LcgRng::new(seed))
    }

    /// Non-deterministic system source.
    #[must_use]
    pub fn system() -> Self {
        Self::System(rand::thread_rng())
    }

    /// Next uniform value in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        match self {
            Self::Seeded(lcg) => lcg.next_uniform(),
            Self::System(rng) => rng.gen_range(0.0..1.0),
        }
    }

    /// Capture the internal state, if this source is resumable.
    #[must_use]
    pub fn snapshot(&self) -> Option<u32> {
        match self {
            Self::Seeded(lcg) => Some(lcg.state()),
            Self::System(_) => None,
        }
    }

    /// Restore a captured state; a no-op for the system source.
    pub fn restore(&mut self, state: u32) {
        if let Self::Seeded(lcg) = self {
            lcg.set_state(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_normalizes_into_positive_range() {
        assert_eq!(LcgRng::new(0).state(), 1);
        assert_eq!(LcgRng::new(42).state(), 43);
        assert_eq!(LcgRng::new(SEED_RANGE).state(), 1);
        // Negative seeds wrap rather than producing a degenerate state.
        let negative = LcgRng::new(-5);
        assert!(negative.state() >= 1);
        assert!(i64::from(negative.state()) <= SEED_RANGE);
    }

    #[test]
    fn first_draw_matches_lcg_recurrence() {
        let mut rng = LcgRng::new(42);
        // state = 43 * 1664525 + 1013904223 (no 2^32 wrap for this seed).
        let value = rng.next_uniform();
        assert_eq!(rng.state(), 1_085_478_798);
        assert!((value - f64::from(1_085_478_798_u32) / 4_294_967_296.0).abs() < 1e-15);
    }

    #[test]
    fn uniform_stays_in_unit_interval() {
        let mut rng = LcgRng::new(7);
        for _ in 0..10_000 {
            let value = rng.next_uniform();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn same_seed_produces_identical_streams() {
        let mut a = LcgRng::new(1234);
        let mut b = LcgRng::new(1234);
        for _ in 0..100 {
            assert_eq!(a.next_uniform().to_bits(), b.next_uniform().to_bits());
        }
    }

    #[test]
    fn set_state_resumes_mid_stream() {
        let mut original = LcgRng::new(99);
        for _ in 0..5 {
            original.next_uniform();
        }
        let captured = original.state();
        let tail: Vec<f64> = (0..5).map(|_| original.next_uniform()).collect();

        let mut resumed = LcgRng::new(99);
        resumed.set_state(captured);
        let resumed_tail: Vec<f64> = (0..5).map(|_| resumed.next_uniform()).collect();

        assert_eq!(tail, resumed_tail);
    }

    #[test]
    fn seeded_source_snapshots_and_restores() {
        let mut source = RandomSource::seeded(7);
        source.next_uniform();
        let state = source.snapshot().expect("seeded source must snapshot");

        let mut other = RandomSource::seeded(7);
        other.restore(state);
        assert_eq!(other.snapshot(), Some(state));
        assert_eq!(
            source.next_uniform().to_bits(),
            other.next_uniform().to_bits()
        );
    }

    #[test]
    fn system_source_has_no_snapshot() {
        let mut source = RandomSource::system();
        let value = source.next_uniform();
        assert!((0.0..1.0).contains(&value));
        assert_eq!(source.snapshot(), None);
    }
}
