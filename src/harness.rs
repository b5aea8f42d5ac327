//! Differential trial runner.
//!
//! A check draws fixtures, runs a reference and a candidate computation on
//! them, compares the results lane by lane and reports every mismatch. The
//! runner never stops early: deciding what a failed trial means belongs to
//! the caller, who gets a [`TrialSummary`] back.
//!
//! ## Reproducing a failure
//!
//! Sequential checks draw from one [`Randomizer`] owned by the harness, so a
//! run is fully determined by `HarnessConfig::seed` and the order in which
//! checks are issued. Parallel checks give every batch of
//! `PARALLEL_BATCH` trials its own ChaCha stream of the seed, numbered by
//! batch; they are deterministic too. Batch 0 shares stream 0 with a
//! sequential run of the same seed, later batches draw fixtures a sequential
//! run never sees.

use std::fmt;

use rayon::prelude::*;

use crate::compare::are_equal;
use crate::defaults::{ENV_SEED, ENV_TRIALS, PARALLEL_BATCH, SEED, TRIALS};
use crate::fault::ConfigFault;
use crate::fixture::Fixture;
use crate::randomizer::Randomizer;
use crate::report::{MismatchReport, TrialWidths, print_report};
use crate::unroll::static_for;
use crate::vector::{LaneWidth, Register};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub seed: u64,
    pub trials: usize,
    /// Print a report block to stdout for every mismatch.
    pub report_mismatches: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: SEED,
            trials: TRIALS,
            report_mismatches: true,
        }
    }
}

/// Decimal or `0x` hex, `_` separators allowed.
pub fn parse_seed(value: &str) -> Option<u64> {
    let v = value.trim();
    match v.strip_prefix("0x").or_else(|| v.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => v.replace('_', "").parse().ok(),
    }
}

impl HarnessConfig {
    /// Defaults overridden by `LANECHECK_SEED` (decimal or `0x` hex) and
    /// `LANECHECK_TRIALS`.
    pub fn from_env() -> Result<Self, ConfigFault> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var(ENV_SEED) {
            config.seed = parse_seed(&value).ok_or(ConfigFault::InvalidSetting {
                name: ENV_SEED,
                value,
            })?;
        }
        if let Ok(value) = std::env::var(ENV_TRIALS) {
            config.trials = value.trim().parse().map_err(|_| ConfigFault::InvalidSetting {
                name: ENV_TRIALS,
                value,
            })?;
        }
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.report_mismatches = false;
        self
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSummary {
    pub name: String,
    pub seed: u64,
    pub trials: usize,
    pub mismatches: usize,
    pub first_failure: Option<usize>,
}

impl TrialSummary {
    fn new(name: &str, seed: u64) -> Self {
        Self {
            name: name.to_string(),
            seed,
            trials: 0,
            mismatches: 0,
            first_failure: None,
        }
    }

    fn record(&mut self, index: usize, passed: bool) {
        self.trials += 1;
        if !passed {
            self.mismatches += 1;
            self.first_failure.get_or_insert(index);
        }
    }

    fn merge(&mut self, other: TrialSummary) {
        self.trials += other.trials;
        self.mismatches += other.mismatches;
        self.first_failure = match (self.first_failure, other.first_failure) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
    }

    pub fn passed(&self) -> bool {
        self.mismatches == 0
    }

    pub fn into_result(self) -> anyhow::Result<()> {
        if self.passed() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("{}", self))
        }
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} trials passed (seed {:#x})",
            self.name,
            self.trials - self.mismatches,
            self.trials,
            self.seed
        )?;
        if let Some(i) = self.first_failure {
            write!(f, ", first failure at trial {}", i)?;
        }
        Ok(())
    }
}

fn log_mismatch(name: &str, index: usize, lane: LaneWidth) {
    log::warn!("{}: trial {} mismatch at {} lanes", name, index, lane);
}

/// Fault before the first trial if any lane width does not fit its operand.
fn validate_widths<A: Register, B: Register, R: Register>(widths: TrialWidths) {
    A::lane_count(widths.operand1);
    B::lane_count(widths.operand2);
    R::lane_count(widths.result);
}

fn unary_trial<A, R, F, G>(
    rng: &mut Randomizer,
    report: bool,
    name: &str,
    index: usize,
    lanes: (LaneWidth, LaneWidth),
    reference: &F,
    candidate: &G,
) -> bool
where
    A: Fixture,
    R: Register,
    F: Fn(A) -> R,
    G: Fn(A) -> R,
{
    let (operand_lane, result_lane) = lanes;
    let a = A::random(rng, operand_lane);
    let expected = reference(a);
    let actual = candidate(a);
    if are_equal(result_lane, &expected, &actual) {
        return true;
    }
    log_mismatch(name, index, result_lane);
    if report {
        print_report(&MismatchReport::unary(operand_lane, result_lane, &a, &expected, &actual));
    }
    false
}

fn binary_trial<A, B, R, F, G>(
    rng: &mut Randomizer,
    report: bool,
    name: &str,
    index: usize,
    widths: TrialWidths,
    reference: &F,
    candidate: &G,
) -> bool
where
    A: Fixture,
    B: Fixture,
    R: Register,
    F: Fn(A, B) -> R,
    G: Fn(A, B) -> R,
{
    let a = A::random(rng, widths.operand1);
    let b = B::random(rng, widths.operand2);
    let expected = reference(a, b);
    let actual = candidate(a, b);
    if are_equal(widths.result, &expected, &actual) {
        return true;
    }
    log_mismatch(name, index, widths.result);
    if report {
        print_report(&MismatchReport::binary(widths, &a, &b, &expected, &actual));
    }
    false
}

/// Runs checks against one seeded generator.
pub struct Harness {
    config: HarnessConfig,
    rng: Randomizer,
}

impl Harness {
    pub fn new(config: HarnessConfig) -> Self {
        log::debug!(
            "Harness: seed={:#x} trials={} report={}",
            config.seed,
            config.trials,
            config.report_mismatches
        );
        let rng = Randomizer::new(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn rng(&mut self) -> &mut Randomizer {
        &mut self.rng
    }

    fn finish(&self, summary: TrialSummary) -> TrialSummary {
        if summary.passed() {
            log::info!("{}", summary);
        } else {
            log::error!("{}", summary);
        }
        summary
    }

    /// `config.trials` trials of a one-operand computation. The operand is
    /// synthesized at `operand_lane`, results are compared at `result_lane`.
    pub fn check_unary<A, R, F, G>(
        &mut self,
        name: &str,
        operand_lane: LaneWidth,
        result_lane: LaneWidth,
        reference: F,
        candidate: G,
    ) -> TrialSummary
    where
        A: Fixture,
        R: Register,
        F: Fn(A) -> R,
        G: Fn(A) -> R,
    {
        A::lane_count(operand_lane);
        R::lane_count(result_lane);
        let mut summary = TrialSummary::new(name, self.config.seed);
        let report = self.config.report_mismatches;
        for index in 0..self.config.trials {
            let passed = unary_trial(
                &mut self.rng,
                report,
                name,
                index,
                (operand_lane, result_lane),
                &reference,
                &candidate,
            );
            summary.record(index, passed);
        }
        self.finish(summary)
    }

    /// `config.trials` trials of a two-operand computation. Either operand
    /// may be the `i32` scalar.
    pub fn check_binary<A, B, R, F, G>(
        &mut self,
        name: &str,
        widths: TrialWidths,
        reference: F,
        candidate: G,
    ) -> TrialSummary
    where
        A: Fixture,
        B: Fixture,
        R: Register,
        F: Fn(A, B) -> R,
        G: Fn(A, B) -> R,
    {
        validate_widths::<A, B, R>(widths);
        let mut summary = TrialSummary::new(name, self.config.seed);
        let report = self.config.report_mismatches;
        for index in 0..self.config.trials {
            let passed = binary_trial(
                &mut self.rng,
                report,
                name,
                index,
                widths,
                &reference,
                &candidate,
            );
            summary.record(index, passed);
        }
        self.finish(summary)
    }

    /// Exactly `N` trials, unrolled at compile time; `config.trials` is
    /// ignored.
    pub fn check_binary_unrolled<const N: usize, A, B, R, F, G>(
        &mut self,
        name: &str,
        widths: TrialWidths,
        reference: F,
        candidate: G,
    ) -> TrialSummary
    where
        A: Fixture,
        B: Fixture,
        R: Register,
        F: Fn(A, B) -> R,
        G: Fn(A, B) -> R,
    {
        validate_widths::<A, B, R>(widths);
        let mut summary = TrialSummary::new(name, self.config.seed);
        let report = self.config.report_mismatches;
        let rng = &mut self.rng;
        static_for::<N, _>(|i| {
            let passed = binary_trial(rng, report, name, i.get(), widths, &reference, &candidate);
            summary.record(i.get(), passed);
        });
        self.finish(summary)
    }

    /// `config.trials` trials spread over the rayon pool.
    ///
    /// Batch `k` draws from ChaCha stream `k` of the seed; the summary is
    /// the same whatever the thread count.
    pub fn par_check_binary<A, B, R, F, G>(
        &self,
        name: &str,
        widths: TrialWidths,
        reference: F,
        candidate: G,
    ) -> TrialSummary
    where
        A: Fixture,
        B: Fixture,
        R: Register,
        F: Fn(A, B) -> R + Sync,
        G: Fn(A, B) -> R + Sync,
    {
        validate_widths::<A, B, R>(widths);
        let trials = self.config.trials;
        let seed = self.config.seed;
        let report = self.config.report_mismatches;
        let batches = trials.div_ceil(PARALLEL_BATCH);

        let partials: Vec<TrialSummary> = (0..batches)
            .into_par_iter()
            .map(|k| {
                let mut rng = Randomizer::with_stream(seed, k as u64);
                let mut partial = TrialSummary::new(name, seed);
                let start = k * PARALLEL_BATCH;
                let end = (start + PARALLEL_BATCH).min(trials);
                for index in start..end {
                    let passed =
                        binary_trial(&mut rng, report, name, index, widths, &reference, &candidate);
                    partial.record(index, passed);
                }
                partial
            })
            .collect();

        let mut summary = TrialSummary::new(name, seed);
        for partial in partials {
            summary.merge(partial);
        }
        self.finish(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Vec128, Vec256};

    fn xor_lanes<V: Register>(a: V, b: V) -> V {
        let mut out = a;
        for (o, x) in out.as_bytes_mut().iter_mut().zip(b.as_bytes()) {
            *o ^= x;
        }
        out
    }

    #[test]
    fn test_identical_computations_pass() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(200).quiet());
        let s = h.check_binary::<Vec128, Vec128, Vec128, _, _>(
            "xor",
            TrialWidths::uniform(LaneWidth::L8),
            xor_lanes,
            xor_lanes,
        );
        assert!(s.passed(), "{s}");
        assert_eq!(s.trials, 200);
        assert_eq!(s.first_failure, None);
        assert!(s.into_result().is_ok());
    }

    #[test]
    fn test_mismatches_are_counted_not_fatal() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(100).quiet());
        // Candidate breaks lane 0 whenever operand 2 lane 0 is odd.
        let s = h.check_binary::<Vec128, Vec128, Vec128, _, _>(
            "broken-xor",
            TrialWidths::uniform(LaneWidth::L32),
            xor_lanes,
            |a, b| {
                let mut out = xor_lanes(a, b);
                if b.lanes(LaneWidth::L32).get(0) & 1 == 1 {
                    out.flip_bit(0);
                }
                out
            },
        );
        assert_eq!(s.trials, 100);
        assert!(s.mismatches > 0 && s.mismatches < 100, "{s}");
        assert!(s.first_failure.is_some());
        let err = s.into_result().unwrap_err().to_string();
        assert!(err.contains("broken-xor"), "{err}");
    }

    #[test]
    fn test_scalar_operand() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(50).quiet());
        let s = h.check_binary::<Vec256, i32, Vec256, _, _>(
            "broadcast-xor",
            TrialWidths {
                operand1: LaneWidth::L32,
                operand2: LaneWidth::L32,
                result: LaneWidth::L32,
            },
            |a, k| {
                let mut out = a;
                let mut lanes = out.lanes_mut(LaneWidth::L32);
                for i in 0..8 {
                    lanes.set(i, a.lanes(LaneWidth::L32).get(i) ^ k as i64);
                }
                out
            },
            |a, k| {
                let mut out = a;
                for chunk in out.0.chunks_exact_mut(4) {
                    let x = i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ k;
                    chunk.copy_from_slice(&x.to_ne_bytes());
                }
                out
            },
        );
        assert!(s.passed(), "{s}");
    }

    #[test]
    fn test_unary_check() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(64).quiet());
        let s = h.check_unary::<Vec128, Vec128, _, _>(
            "identity",
            LaneWidth::L16,
            LaneWidth::L64,
            |a| a,
            |a| a,
        );
        assert!(s.passed());
        assert_eq!(s.trials, 64);
    }

    #[test]
    fn test_unrolled_runs_exactly_n() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(1).quiet());
        let s = h.check_binary_unrolled::<12, Vec128, Vec128, Vec128, _, _>(
            "xor",
            TrialWidths::uniform(LaneWidth::L64),
            xor_lanes,
            xor_lanes,
        );
        assert_eq!(s.trials, 12);
        assert!(s.passed());
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let run = |seed| {
            let mut h = Harness::new(HarnessConfig::default().with_seed(seed).with_trials(80).quiet());
            h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                "flaky",
                TrialWidths::uniform(LaneWidth::L8),
                xor_lanes,
                |a, b| if a.0[0] == 0 { Vec128::zero() } else { xor_lanes(a, b) },
            )
        };
        assert_eq!(run(99), run(99));
    }

    #[test]
    fn test_parallel_summary_is_deterministic() {
        let h = Harness::new(HarnessConfig::default().with_trials(300).quiet());
        let check = || {
            h.par_check_binary::<Vec128, Vec128, Vec128, _, _>(
                "flaky",
                TrialWidths::uniform(LaneWidth::L8),
                xor_lanes,
                |a, b| if a.0[3] == 0 { Vec128::zero() } else { xor_lanes(a, b) },
            )
        };
        let first = check();
        assert_eq!(first.trials, 300);
        assert_eq!(first, check());
    }

    #[test]
    #[should_panic(expected = "does not fit in a 32-bit register")]
    fn test_scalar_operand_too_narrow_faults_before_trials() {
        // quiet, and reference == candidate: nothing but the width check
        // can fault
        let mut h = Harness::new(HarnessConfig::default().with_trials(20).quiet());
        h.check_binary::<Vec128, i32, Vec128, _, _>(
            "wide-scalar",
            TrialWidths::uniform(LaneWidth::L64),
            |a, _| a,
            |a, _| a,
        );
    }

    #[test]
    #[should_panic(expected = "does not fit in a 32-bit register")]
    fn test_unary_scalar_result_too_narrow_faults() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(0).quiet());
        h.check_unary::<Vec128, i32, _, _>("wide-result", LaneWidth::L8, LaneWidth::L64, |_| 1, |_| 1);
    }

    #[test]
    #[should_panic(expected = "does not fit in a 32-bit register")]
    fn test_unrolled_validates_widths() {
        let mut h = Harness::new(HarnessConfig::default().quiet());
        h.check_binary_unrolled::<4, i32, Vec128, Vec128, _, _>(
            "wide-scalar",
            TrialWidths::uniform(LaneWidth::L64),
            |_, b| b,
            |_, b| b,
        );
    }

    #[test]
    #[should_panic(expected = "does not fit in a 32-bit register")]
    fn test_parallel_validates_widths() {
        let h = Harness::new(HarnessConfig::default().with_trials(10).quiet());
        h.par_check_binary::<Vec128, i32, Vec128, _, _>(
            "wide-scalar",
            TrialWidths {
                operand1: LaneWidth::L8,
                operand2: LaneWidth::L64,
                result: LaneWidth::L8,
            },
            |a, _| a,
            |a, _| a,
        );
    }

    #[test]
    fn test_parse_seed() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed("0xFF"), Some(255));
        assert_eq!(parse_seed(" 0x5EED_1A4E "), Some(0x5EED_1A4E));
        assert_eq!(parse_seed("seed"), None);
    }
}
