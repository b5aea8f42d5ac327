// Enable unstable features for AVX-512 support (requires nightly Rust)
#![cfg_attr(feature = "avx512", feature(stdarch_x86_avx512))]
#![cfg_attr(feature = "avx512", feature(avx512_target_feature))]

pub mod compare; // Lane-wise equality under a chosen lane width
pub mod compute; // Runtime detection of usable register widths
pub mod defaults;
pub mod fault; // Configuration faults (unsupported widths, bad settings)
pub mod fixture; // Random vector/scalar operand synthesis
pub mod harness; // Reference-vs-candidate trial runner
pub mod ops; // Portable reference operations and x86 candidates
pub mod paths; // Randomization path strategy tables
pub mod randomizer; // Seeded biased scalar randomizer
pub mod report; // Mismatch dumps
pub mod suite; // Built-in sample checks
pub mod unroll; // Compile-time trial unrolling
pub mod vector; // Register/lane types and packing table

pub use compare::{are_equal, are_equal_dyn, first_mismatch};
pub use fault::ConfigFault;
pub use fixture::{Fixture, integer_randomizer, synthesize, synthesize_dyn, synthesize_with_path};
pub use harness::{Harness, HarnessConfig, TrialSummary};
pub use paths::{ScalarPath, VectorPath};
pub use randomizer::Randomizer;
pub use report::{MismatchReport, TrialWidths, print_error};
pub use unroll::{TrialIndex, static_for};
pub use vector::{AnyVector, LaneWidth, Register, RegisterWidth, Vec128, Vec256, Vec512, VectorRegister};
