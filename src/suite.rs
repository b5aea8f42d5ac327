//! Built-in sample checks.
//!
//! Each entry pairs a portable reference from [`crate::ops`] with the x86
//! intrinsic it models, plus the fixture lane widths that stress it: shifts
//! draw their counts at the lane width (so the shift-like paths land near the
//! interesting counts), shuffles draw byte indices.

use crate::compute::is_width_supported;
use crate::harness::{Harness, TrialSummary};
use crate::vector::RegisterWidth;

/// One runnable sample check.
pub struct Check {
    pub name: &'static str,
    pub width: RegisterWidth,
    /// CPU feature the candidate needs, as accepted by
    /// `is_x86_feature_detected!`.
    pub feature: &'static str,
    pub run: fn(&mut Harness) -> TrialSummary,
}

impl Check {
    /// The CPU has the feature and the width is not capped by a
    /// `LANECHECK_FORCE_*` override.
    pub fn is_available(&self) -> bool {
        is_width_supported(self.width) && feature_detected(self.feature)
    }
}

#[cfg(target_arch = "x86_64")]
fn feature_detected(feature: &str) -> bool {
    match feature {
        "sse2" => true,
        "ssse3" => is_x86_feature_detected!("ssse3"),
        "sse4.1" => is_x86_feature_detected!("sse4.1"),
        "avx2" => is_x86_feature_detected!("avx2"),
        "avx512f" => is_x86_feature_detected!("avx512f"),
        "avx512bw" => is_x86_feature_detected!("avx512bw"),
        other => {
            log::warn!("Unknown CPU feature {:?}; skipping", other);
            false
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn feature_detected(_feature: &str) -> bool {
    false
}

/// Every sample check compiled into this build.
#[cfg(target_arch = "x86_64")]
pub fn catalog() -> Vec<Check> {
    use crate::ops::{self, x86};
    use crate::report::TrialWidths;
    use crate::vector::LaneWidth::{L16, L32, L64, L8};
    use crate::vector::{Vec128, Vec256};

    #[allow(unused_mut)]
    let mut checks = vec![
        Check {
            name: "_mm_add_epi8",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_add_epi8",
                    TrialWidths::uniform(L8),
                    |a, b| ops::add(L8, &a, &b),
                    x86::add_epi8,
                )
            },
        },
        Check {
            name: "_mm_add_epi16",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_add_epi16",
                    TrialWidths::uniform(L16),
                    |a, b| ops::add(L16, &a, &b),
                    x86::add_epi16,
                )
            },
        },
        Check {
            name: "_mm_add_epi32",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                // byte-granular fixtures checked as 32-bit lanes
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_add_epi32",
                    TrialWidths {
                        operand1: L8,
                        operand2: L8,
                        result: L32,
                    },
                    |a, b| ops::add(L32, &a, &b),
                    x86::add_epi32,
                )
            },
        },
        Check {
            name: "_mm_add_epi64",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_add_epi64",
                    TrialWidths::uniform(L64),
                    |a, b| ops::add(L64, &a, &b),
                    x86::add_epi64,
                )
            },
        },
        Check {
            name: "_mm_sub_epi16",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_sub_epi16",
                    TrialWidths::uniform(L16),
                    |a, b| ops::sub(L16, &a, &b),
                    x86::sub_epi16,
                )
            },
        },
        Check {
            name: "_mm_min_epi16",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_min_epi16",
                    TrialWidths::uniform(L16),
                    |a, b| ops::min(L16, &a, &b),
                    x86::min_epi16,
                )
            },
        },
        Check {
            name: "_mm_sll_epi32",
            width: RegisterWidth::W128,
            feature: "sse2",
            run: |h| {
                h.check_binary::<Vec128, i32, Vec128, _, _>(
                    "_mm_sll_epi32",
                    TrialWidths::uniform(L32),
                    |a, count| ops::shift_left_scalar(L32, &a, count),
                    x86::sll_epi32,
                )
            },
        },
        Check {
            name: "_mm_abs_epi8",
            width: RegisterWidth::W128,
            feature: "ssse3",
            run: |h| {
                h.check_unary::<Vec128, Vec128, _, _>(
                    "_mm_abs_epi8",
                    L8,
                    L8,
                    |a| ops::abs(L8, &a),
                    |a| unsafe { x86::abs_epi8(a) },
                )
            },
        },
        Check {
            name: "_mm_shuffle_epi8",
            width: RegisterWidth::W128,
            feature: "ssse3",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_shuffle_epi8",
                    TrialWidths::uniform(L8),
                    |a, b| ops::shuffle_bytes(&a, &b),
                    |a, b| unsafe { x86::shuffle_epi8(a, b) },
                )
            },
        },
        Check {
            name: "_mm_max_epi32",
            width: RegisterWidth::W128,
            feature: "sse4.1",
            run: |h| {
                h.check_binary::<Vec128, Vec128, Vec128, _, _>(
                    "_mm_max_epi32",
                    TrialWidths::uniform(L32),
                    |a, b| ops::max(L32, &a, &b),
                    |a, b| unsafe { x86::max_epi32(a, b) },
                )
            },
        },
        Check {
            name: "_mm256_add_epi32",
            width: RegisterWidth::W256,
            feature: "avx2",
            run: |h| {
                h.check_binary::<Vec256, Vec256, Vec256, _, _>(
                    "_mm256_add_epi32",
                    TrialWidths::uniform(L32),
                    |a, b| ops::add(L32, &a, &b),
                    |a, b| unsafe { x86::mm256_add_epi32(a, b) },
                )
            },
        },
        Check {
            name: "_mm256_sllv_epi32",
            width: RegisterWidth::W256,
            feature: "avx2",
            run: |h| {
                h.check_binary::<Vec256, Vec256, Vec256, _, _>(
                    "_mm256_sllv_epi32",
                    TrialWidths::uniform(L32),
                    |a, c| ops::shift_left_variable(L32, &a, &c),
                    |a, c| unsafe { x86::mm256_sllv_epi32(a, c) },
                )
            },
        },
        Check {
            name: "_mm256_sllv_epi64",
            width: RegisterWidth::W256,
            feature: "avx2",
            run: |h| {
                h.check_binary::<Vec256, Vec256, Vec256, _, _>(
                    "_mm256_sllv_epi64",
                    TrialWidths::uniform(L64),
                    |a, c| ops::shift_left_variable(L64, &a, &c),
                    |a, c| unsafe { x86::mm256_sllv_epi64(a, c) },
                )
            },
        },
        Check {
            name: "_mm256_shuffle_epi8",
            width: RegisterWidth::W256,
            feature: "avx2",
            run: |h| {
                h.check_binary::<Vec256, Vec256, Vec256, _, _>(
                    "_mm256_shuffle_epi8",
                    TrialWidths::uniform(L8),
                    |a, b| ops::shuffle_bytes(&a, &b),
                    |a, b| unsafe { x86::mm256_shuffle_epi8(a, b) },
                )
            },
        },
    ];

    #[cfg(feature = "avx512")]
    {
        use crate::vector::Vec512;

        checks.push(Check {
            name: "_mm512_add_epi64",
            width: RegisterWidth::W512,
            feature: "avx512f",
            run: |h| {
                h.check_binary::<Vec512, Vec512, Vec512, _, _>(
                    "_mm512_add_epi64",
                    TrialWidths::uniform(L64),
                    |a, b| ops::add(L64, &a, &b),
                    |a, b| unsafe { x86::mm512_add_epi64(a, b) },
                )
            },
        });
        checks.push(Check {
            name: "_mm512_sllv_epi16",
            width: RegisterWidth::W512,
            feature: "avx512bw",
            run: |h| {
                h.check_binary::<Vec512, Vec512, Vec512, _, _>(
                    "_mm512_sllv_epi16",
                    TrialWidths::uniform(L16),
                    |a, c| ops::shift_left_variable(L16, &a, &c),
                    |a, c| unsafe { x86::mm512_sllv_epi16(a, c) },
                )
            },
        });
    }

    checks
}

#[cfg(not(target_arch = "x86_64"))]
pub fn catalog() -> Vec<Check> {
    Vec::new()
}

/// Run every available check in `checks` whose name contains `filter`.
pub fn run_checks(harness: &mut Harness, checks: &[Check], filter: Option<&str>) -> Vec<TrialSummary> {
    let mut summaries = Vec::new();
    for check in checks {
        if let Some(f) = filter {
            if !check.name.contains(f) {
                continue;
            }
        }
        if !check.is_available() {
            log::info!("{}: skipped ({} not available)", check.name, check.feature);
            continue;
        }
        summaries.push((check.run)(harness));
    }
    summaries
}

#[cfg(all(test, target_arch = "x86_64"))]
mod tests {
    use super::*;
    use crate::harness::HarnessConfig;

    #[test]
    fn test_catalog_names_are_unique() {
        let checks = catalog();
        let mut names: Vec<_> = checks.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), checks.len());
    }

    #[test]
    fn test_baseline_checks_pass() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(300).quiet());
        let summaries = run_checks(&mut h, &catalog(), Some("_mm_"));
        assert!(summaries.len() >= 7);
        for s in summaries {
            assert!(s.passed(), "{s}");
        }
    }

    #[test]
    fn test_filter_selects_subset() {
        let mut h = Harness::new(HarnessConfig::default().with_trials(10).quiet());
        let summaries = run_checks(&mut h, &catalog(), Some("_mm_add_epi64"));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "_mm_add_epi64");
    }
}
