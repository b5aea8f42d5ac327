//! Architecture bindings
//!
//! Lossless conversions between the portable register types and the native
//! x86_64 vector types, so candidate computations can hand fixtures straight
//! to `std::arch` intrinsics.
//!
//! - `Vec128` <-> `__m128i` and `Vec256` <-> `__m256i` on any x86_64 build.
//! - `Vec512` <-> `__m512i` with the `avx512` feature.
//!
//! All conversions are bitcasts; no lane is reordered.

#[cfg(target_arch = "x86_64")]
pub use std::arch::x86_64 as simd_arch;

#[cfg(target_arch = "aarch64")]
pub use std::arch::aarch64 as simd_arch;

#[cfg(target_arch = "x86_64")]
mod x86 {
    use super::simd_arch::{__m128i, __m256i};
    use crate::vector::{Vec128, Vec256};

    impl From<__m128i> for Vec128 {
        #[inline]
        fn from(v: __m128i) -> Self {
            // SAFETY: both are 16 plain bytes.
            Vec128(unsafe { std::mem::transmute::<__m128i, [u8; 16]>(v) })
        }
    }

    impl From<Vec128> for __m128i {
        #[inline]
        fn from(v: Vec128) -> Self {
            // SAFETY: both are 16 plain bytes.
            unsafe { std::mem::transmute::<[u8; 16], __m128i>(v.0) }
        }
    }

    impl From<__m256i> for Vec256 {
        #[inline]
        fn from(v: __m256i) -> Self {
            // SAFETY: both are 32 plain bytes.
            Vec256(unsafe { std::mem::transmute::<__m256i, [u8; 32]>(v) })
        }
    }

    impl From<Vec256> for __m256i {
        #[inline]
        fn from(v: Vec256) -> Self {
            // SAFETY: both are 32 plain bytes.
            unsafe { std::mem::transmute::<[u8; 32], __m256i>(v.0) }
        }
    }
}

#[cfg(all(target_arch = "x86_64", feature = "avx512"))]
mod x86_avx512 {
    use super::simd_arch::__m512i;
    use crate::vector::Vec512;

    impl From<__m512i> for Vec512 {
        #[inline]
        fn from(v: __m512i) -> Self {
            // SAFETY: both are 64 plain bytes.
            Vec512(unsafe { std::mem::transmute::<__m512i, [u8; 64]>(v) })
        }
    }

    impl From<Vec512> for __m512i {
        #[inline]
        fn from(v: Vec512) -> Self {
            // SAFETY: both are 64 plain bytes.
            unsafe { std::mem::transmute::<[u8; 64], __m512i>(v.0) }
        }
    }
}
