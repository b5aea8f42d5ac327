//! Runtime detection of the register widths this CPU can execute.
//!
//! Fixtures of every width can be synthesized anywhere; only candidate
//! computations built on `std::arch` intrinsics need the hardware. Drivers
//! use this module to skip widths the CPU cannot run.

#[cfg(target_arch = "x86_64")]
use crate::defaults::{ENV_FORCE_AVX2, ENV_FORCE_SSE};
use crate::vector::RegisterWidth;

#[cfg(target_arch = "x86_64")]
fn env_flag(name: &str) -> bool {
    std::env::var(name).map(|v| v == "1").unwrap_or(false)
}

/// Widest vector register the intrinsics can use on this CPU.
///
/// Environment variable overrides for testing/debugging (x86_64 only):
/// - `LANECHECK_FORCE_SSE=1`: cap at 128-bit (skip AVX2/AVX-512)
/// - `LANECHECK_FORCE_AVX2=1`: cap at 256-bit (skip AVX-512)
pub fn detect_widest_register() -> RegisterWidth {
    #[cfg(target_arch = "x86_64")]
    {
        if env_flag(ENV_FORCE_SSE) {
            log::info!("{}=1: Using SSE (128-bit) intrinsics only", ENV_FORCE_SSE);
            return RegisterWidth::W128;
        }

        #[cfg(feature = "avx512")]
        {
            let force_avx2 = env_flag(ENV_FORCE_AVX2);
            // AVX-512BW is required for the 8-bit/16-bit lane intrinsics
            if !force_avx2 && is_x86_feature_detected!("avx512bw") {
                return RegisterWidth::W512;
            }
            if force_avx2 {
                log::info!("{}=1: Using AVX2 (256-bit) intrinsics", ENV_FORCE_AVX2);
            }
        }
        #[cfg(not(feature = "avx512"))]
        if env_flag(ENV_FORCE_AVX2) {
            log::debug!("{}=1 has no effect without the avx512 feature", ENV_FORCE_AVX2);
        }

        if is_x86_feature_detected!("avx2") {
            return RegisterWidth::W256;
        }

        RegisterWidth::W128
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        // aarch64 NEON and everything else: 128-bit only
        RegisterWidth::W128
    }
}

/// Every vector width up to and including the widest detected one.
pub fn detect_supported_widths() -> Vec<RegisterWidth> {
    let widest = detect_widest_register();
    RegisterWidth::VECTORS
        .into_iter()
        .filter(|w| w.bits() <= widest.bits())
        .collect()
}

pub fn is_width_supported(width: RegisterWidth) -> bool {
    match width {
        RegisterWidth::Scalar => true,
        w => w.bits() <= detect_widest_register().bits(),
    }
}

/// Human-readable description of the instruction set behind a width.
pub fn width_description(width: RegisterWidth) -> &'static str {
    match width {
        RegisterWidth::W128 => {
            #[cfg(target_arch = "x86_64")]
            {
                "SSE (128-bit, 16 x i8 / 8 x i16 / 4 x i32 / 2 x i64)"
            }
            #[cfg(not(target_arch = "x86_64"))]
            {
                "NEON (128-bit, 16 x i8 / 8 x i16 / 4 x i32 / 2 x i64)"
            }
        }
        RegisterWidth::W256 => "AVX2 (256-bit, 32 x i8 / 16 x i16 / 8 x i32 / 4 x i64)",
        RegisterWidth::W512 => "AVX-512 (512-bit, 64 x i8 / 32 x i16 / 16 x i32 / 8 x i64)",
        RegisterWidth::Scalar => "scalar (32-bit general-purpose register)",
    }
}
