//! Biased scalar randomizer.
//!
//! Owns the only mutable state of a test run: a seeded `ChaCha8Rng`. Each
//! thread that draws fixtures owns its own `Randomizer`; nothing here is
//! shared. Parallel workers take independent ChaCha streams of the same seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::vector::LaneWidth;

/// Boundary constants for `lane`, each exactly once.
///
/// The sign-bit-only pattern is `min_value()` in two's complement, so it
/// appears once as the minimum.
///
/// The corpus is built per lane width rather than drawn from one 64-bit
/// table and truncated to the lane: truncating `i64::MIN`/`i64::MAX` to an
/// 8-bit lane gives 0 and -1, so narrow lanes would never see their own
/// minimum and maximum. `1`, `MIN + 1` and `MAX - 1` are added as the
/// off-by-one neighbours of the boundaries.
pub fn interesting_values(lane: LaneWidth) -> [i64; 7] {
    let min = lane.min_value();
    let max = lane.max_value();
    [0, 1, -1, min, max, min + 1, max - 1]
}

pub struct Randomizer {
    seed: u64,
    stream: u64,
    rng: ChaCha8Rng,
}

impl Randomizer {
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, 0)
    }

    /// Generator on ChaCha stream `stream` of `seed`, e.g. one per worker
    /// batch. Streams of one seed never overlap.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        log::debug!("Randomizer seeded with {:#018x} (stream {})", seed, stream);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(stream);
        Self { seed, stream, rng }
    }

    /// Seed from OS entropy. The chosen seed is still recorded so a failing
    /// run can be replayed with `new`.
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stream(&self) -> u64 {
        self.stream
    }

    /// Random integer that fits in `bits`.
    ///
    /// With `upper_bound == 0` the value is uniform over the full signed range
    /// of `bits`; otherwise it is uniform in `[0, upper_bound)`.
    pub fn rand_int(&mut self, bits: LaneWidth, upper_bound: u64) -> i64 {
        if upper_bound == 0 {
            return self.rng.gen_range(bits.min_value()..=bits.max_value());
        }
        assert!(
            upper_bound - 1 <= bits.max_value() as u64,
            "upper bound {} not representable in {}",
            upper_bound,
            bits
        );
        self.rng.gen_range(0..upper_bound) as i64
    }

    /// Uniform pick from `interesting_values(bits)`.
    pub fn rand_int_interesting(&mut self, bits: LaneWidth) -> i64 {
        let corpus = interesting_values(bits);
        corpus[self.rng.gen_range(0..corpus.len())]
    }

    /// True with probability `numerator / denominator`.
    pub fn rand_ratio(&mut self, numerator: u32, denominator: u32) -> bool {
        self.rng.gen_ratio(numerator, denominator)
    }

    /// Uniform index in `[0, count)`.
    pub fn rand_index(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }
}
