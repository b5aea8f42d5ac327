// src/defaults.rs

// Trial Constants
pub const TRIALS: usize = 1000;
pub const SEED: u64 = 0x5EED_1A4E_C0DE_2022;
pub const PARALLEL_BATCH: usize = 64;

// Randomization Constants
pub const ZERO_BIAS_NUMERATOR: u32 = 3;
pub const ZERO_BIAS_DENOMINATOR: u32 = 4;

// Reporting Constants
pub const REPORT_SEPARATOR: &str = "========================";
pub const VERBOSITY: u8 = 3;

// Environment Overrides
pub const ENV_SEED: &str = "LANECHECK_SEED";
pub const ENV_TRIALS: &str = "LANECHECK_TRIALS";
pub const ENV_FORCE_SSE: &str = "LANECHECK_FORCE_SSE";
pub const ENV_FORCE_AVX2: &str = "LANECHECK_FORCE_AVX2";
