//! x86_64 intrinsic candidates.
//!
//! Thin wrappers that move fixtures into native vector types, call one
//! `std::arch` intrinsic and move the result back.
//!
//! # Safety
//!
//! Functions outside the SSE2 baseline are `unsafe`: the caller must have
//! checked the named CPU feature (see [`crate::compute`]) before calling.

use std::arch::x86_64::*;

use crate::vector::{Vec128, Vec256};

// ===== SSE2 (x86_64 baseline) =====

pub fn add_epi8(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { _mm_add_epi8(a.into(), b.into()) }.into()
}

pub fn add_epi16(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { _mm_add_epi16(a.into(), b.into()) }.into()
}

pub fn add_epi32(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { _mm_add_epi32(a.into(), b.into()) }.into()
}

pub fn add_epi64(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { _mm_add_epi64(a.into(), b.into()) }.into()
}

pub fn sub_epi16(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { _mm_sub_epi16(a.into(), b.into()) }.into()
}

pub fn min_epi16(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { _mm_min_epi16(a.into(), b.into()) }.into()
}

/// `pslld` with the count taken from a scalar operand.
pub fn sll_epi32(a: Vec128, count: i32) -> Vec128 {
    unsafe { _mm_sll_epi32(a.into(), _mm_cvtsi32_si128(count)) }.into()
}

// ===== SSSE3 / SSE4.1 =====

#[target_feature(enable = "ssse3")]
unsafe fn abs_epi8_impl(a: __m128i) -> __m128i {
    _mm_abs_epi8(a)
}

/// # Safety
/// Requires SSSE3.
pub unsafe fn abs_epi8(a: Vec128) -> Vec128 {
    unsafe { abs_epi8_impl(a.into()) }.into()
}

#[target_feature(enable = "ssse3")]
unsafe fn shuffle_epi8_impl(a: __m128i, b: __m128i) -> __m128i {
    _mm_shuffle_epi8(a, b)
}

/// # Safety
/// Requires SSSE3.
pub unsafe fn shuffle_epi8(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { shuffle_epi8_impl(a.into(), b.into()) }.into()
}

#[target_feature(enable = "sse4.1")]
unsafe fn max_epi32_impl(a: __m128i, b: __m128i) -> __m128i {
    _mm_max_epi32(a, b)
}

/// # Safety
/// Requires SSE4.1.
pub unsafe fn max_epi32(a: Vec128, b: Vec128) -> Vec128 {
    unsafe { max_epi32_impl(a.into(), b.into()) }.into()
}

// ===== AVX2 =====

#[target_feature(enable = "avx2")]
unsafe fn mm256_add_epi32_impl(a: __m256i, b: __m256i) -> __m256i {
    _mm256_add_epi32(a, b)
}

/// # Safety
/// Requires AVX2.
pub unsafe fn mm256_add_epi32(a: Vec256, b: Vec256) -> Vec256 {
    unsafe { mm256_add_epi32_impl(a.into(), b.into()) }.into()
}

#[target_feature(enable = "avx2")]
unsafe fn mm256_sllv_epi32_impl(a: __m256i, b: __m256i) -> __m256i {
    _mm256_sllv_epi32(a, b)
}

/// # Safety
/// Requires AVX2.
pub unsafe fn mm256_sllv_epi32(a: Vec256, b: Vec256) -> Vec256 {
    unsafe { mm256_sllv_epi32_impl(a.into(), b.into()) }.into()
}

#[target_feature(enable = "avx2")]
unsafe fn mm256_sllv_epi64_impl(a: __m256i, b: __m256i) -> __m256i {
    _mm256_sllv_epi64(a, b)
}

/// # Safety
/// Requires AVX2.
pub unsafe fn mm256_sllv_epi64(a: Vec256, b: Vec256) -> Vec256 {
    unsafe { mm256_sllv_epi64_impl(a.into(), b.into()) }.into()
}

#[target_feature(enable = "avx2")]
unsafe fn mm256_shuffle_epi8_impl(a: __m256i, b: __m256i) -> __m256i {
    _mm256_shuffle_epi8(a, b)
}

/// # Safety
/// Requires AVX2.
pub unsafe fn mm256_shuffle_epi8(a: Vec256, b: Vec256) -> Vec256 {
    unsafe { mm256_shuffle_epi8_impl(a.into(), b.into()) }.into()
}

// ===== AVX-512 =====

#[cfg(feature = "avx512")]
mod avx512 {
    use std::arch::x86_64::*;

    use crate::vector::Vec512;

    #[target_feature(enable = "avx512f")]
    unsafe fn mm512_add_epi64_impl(a: __m512i, b: __m512i) -> __m512i {
        _mm512_add_epi64(a, b)
    }

    /// # Safety
    /// Requires AVX-512F.
    pub unsafe fn mm512_add_epi64(a: Vec512, b: Vec512) -> Vec512 {
        unsafe { mm512_add_epi64_impl(a.into(), b.into()) }.into()
    }

    #[target_feature(enable = "avx512bw")]
    unsafe fn mm512_sllv_epi16_impl(a: __m512i, b: __m512i) -> __m512i {
        _mm512_sllv_epi16(a, b)
    }

    /// # Safety
    /// Requires AVX-512BW.
    pub unsafe fn mm512_sllv_epi16(a: Vec512, b: Vec512) -> Vec512 {
        unsafe { mm512_sllv_epi16_impl(a.into(), b.into()) }.into()
    }
}

#[cfg(feature = "avx512")]
pub use avx512::{mm512_add_epi64, mm512_sllv_epi16};
