//! Randomization paths.
//!
//! A path names the distribution every lane of one fixture is drawn from.
//! Vector fixtures pick one of seven paths, scalar operands one of six. The
//! two tables differ on purpose and are kept apart:
//!
//! | id | vector path                    | scalar path       |
//! |----|--------------------------------|-------------------|
//! | 0  | full signed range              | full signed range |
//! | 1  | 3/4 zero, else `[0, 65)`       | `[0, 33)`        |
//! | 2  | 3/4 zero, else `[0, 33)`       | `[0, 17)`        |
//! | 3  | 3/4 zero, else `[0, 17)`       | `[0, 9)`         |
//! | 4  | 3/4 zero, else `[0, 9)`        | `[0, 5)`         |
//! | 5  | 3/4 zero, else `[0, 5)`        | interesting      |
//! | 6  | interesting                    | -                |
//!
//! Bounds 65/33/17 cover shift counts one past the lane width for 64/32/16
//! bit lanes; 9 and 5 cover shuffle and permute indices.

use std::fmt;

use crate::defaults::{ZERO_BIAS_DENOMINATOR, ZERO_BIAS_NUMERATOR};
use crate::fault::ConfigFault;
use crate::randomizer::Randomizer;
use crate::vector::LaneWidth;

/// Probability that a lane is forced to zero before the bounded draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroBias {
    pub numerator: u32,
    pub denominator: u32,
}

impl ZeroBias {
    pub const SHIFT_LIKE: ZeroBias = ZeroBias {
        numerator: ZERO_BIAS_NUMERATOR,
        denominator: ZERO_BIAS_DENOMINATOR,
    };

    pub fn probability(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// What one lane is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Uniform over the full signed range of the lane.
    Full,
    /// Uniform in `[0, upper_bound)`, optionally forced to zero first.
    Bounded {
        upper_bound: u64,
        zero_bias: Option<ZeroBias>,
    },
    /// Uniform over the interesting-value corpus of the lane width.
    Interesting,
}

impl Distribution {
    pub fn draw(&self, rng: &mut Randomizer, lane: LaneWidth) -> i64 {
        match *self {
            Distribution::Full => rng.rand_int(lane, 0),
            Distribution::Bounded {
                upper_bound,
                zero_bias,
            } => {
                if let Some(bias) = zero_bias {
                    if rng.rand_ratio(bias.numerator, bias.denominator) {
                        return 0;
                    }
                }
                rng.rand_int(lane, upper_bound)
            }
            Distribution::Interesting => rng.rand_int_interesting(lane),
        }
    }
}

const fn shift_like(upper_bound: u64) -> Distribution {
    Distribution::Bounded {
        upper_bound,
        zero_bias: Some(ZeroBias::SHIFT_LIKE),
    }
}

const fn bounded(upper_bound: u64) -> Distribution {
    Distribution::Bounded {
        upper_bound,
        zero_bias: None,
    }
}

/// Path used to fill a vector fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VectorPath {
    Full,
    Shift64,
    Shift32,
    Shift16,
    Shuffle8,
    Shuffle4,
    Interesting,
}

pub const VECTOR_PATHS: [(VectorPath, Distribution); 7] = [
    (VectorPath::Full, Distribution::Full),
    (VectorPath::Shift64, shift_like(65)),
    (VectorPath::Shift32, shift_like(33)),
    (VectorPath::Shift16, shift_like(17)),
    (VectorPath::Shuffle8, shift_like(9)),
    (VectorPath::Shuffle4, shift_like(5)),
    (VectorPath::Interesting, Distribution::Interesting),
];

impl VectorPath {
    pub const COUNT: usize = VECTOR_PATHS.len();

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, ConfigFault> {
        VECTOR_PATHS
            .get(id as usize)
            .map(|(path, _)| *path)
            .ok_or(ConfigFault::InvalidPath {
                id,
                count: Self::COUNT as u32,
            })
    }

    pub fn distribution(self) -> Distribution {
        VECTOR_PATHS[self as usize].1
    }

    /// Uniform pick over all vector paths.
    pub fn choose(rng: &mut Randomizer) -> Self {
        VECTOR_PATHS[rng.rand_index(Self::COUNT)].0
    }
}

impl fmt::Display for VectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.id())
    }
}

/// Path used for a scalar (`i32`) operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarPath {
    Full,
    Below33,
    Below17,
    Below9,
    Below5,
    Interesting,
}

pub const SCALAR_PATHS: [(ScalarPath, Distribution); 6] = [
    (ScalarPath::Full, Distribution::Full),
    (ScalarPath::Below33, bounded(33)),
    (ScalarPath::Below17, bounded(17)),
    (ScalarPath::Below9, bounded(9)),
    (ScalarPath::Below5, bounded(5)),
    (ScalarPath::Interesting, Distribution::Interesting),
];

impl ScalarPath {
    pub const COUNT: usize = SCALAR_PATHS.len();

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Result<Self, ConfigFault> {
        SCALAR_PATHS
            .get(id as usize)
            .map(|(path, _)| *path)
            .ok_or(ConfigFault::InvalidPath {
                id,
                count: Self::COUNT as u32,
            })
    }

    pub fn distribution(self) -> Distribution {
        SCALAR_PATHS[self as usize].1
    }

    pub fn choose(rng: &mut Randomizer) -> Self {
        SCALAR_PATHS[rng.rand_index(Self::COUNT)].0
    }
}
