//! Lane-wise comparison under a chosen lane width.
//!
//! The lane width passed here is independent of the one used to synthesize
//! the operands: a byte-granular fixture can be checked as 32-bit lanes.

use crate::fault::{ConfigFault, fault};
use crate::vector::{AnyVector, LaneView, LaneWidth, Register};

fn first_difference(a: LaneView<'_>, b: LaneView<'_>) -> Option<usize> {
    debug_assert_eq!(a.len(), b.len());
    match (a, b) {
        (LaneView::I8(x), LaneView::I8(y)) => x.iter().zip(y).position(|(p, q)| p != q),
        (LaneView::I16(x), LaneView::I16(y)) => x.iter().zip(y).position(|(p, q)| p != q),
        (LaneView::I32(x), LaneView::I32(y)) => x.iter().zip(y).position(|(p, q)| p != q),
        (LaneView::I64(x), LaneView::I64(y)) => x.iter().zip(y).position(|(p, q)| p != q),
        _ => unreachable!("views built with the same lane width"),
    }
}

/// True iff every `lane`-wide lane of `a` equals the same lane of `b`.
pub fn are_equal<V: Register>(lane: LaneWidth, a: &V, b: &V) -> bool {
    first_mismatch(lane, a, b).is_none()
}

/// Index of the first `lane`-wide lane where `a` and `b` differ.
pub fn first_mismatch<V: Register>(lane: LaneWidth, a: &V, b: &V) -> Option<usize> {
    first_difference(a.lanes(lane), b.lanes(lane))
}

/// Indices of every differing lane, ascending.
pub fn mismatched_lanes<V: Register>(lane: LaneWidth, a: &V, b: &V) -> Vec<usize> {
    let (x, y) = (a.lanes(lane), b.lanes(lane));
    (0..x.len()).filter(|&i| x.get(i) != y.get(i)).collect()
}

/// Run-time counterpart of [`are_equal`]. Faults when the operands have
/// different register widths.
pub fn are_equal_dyn(lane: LaneWidth, a: &AnyVector, b: &AnyVector) -> bool {
    if a.width() != b.width() {
        fault(ConfigFault::RegisterWidthMismatch {
            left: a.width().bits(),
            right: b.width().bits(),
        });
    }
    first_difference(a.lanes(lane), b.lanes(lane)).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::synthesize;
    use crate::randomizer::Randomizer;
    use crate::vector::{Vec128, Vec256, Vec512, VectorRegister};

    fn check_reflexive<V: VectorRegister>(rng: &mut Randomizer) {
        for synth in LaneWidth::ALL {
            let v: V = synthesize(rng, synth);
            let copy = v;
            for cmp in LaneWidth::ALL {
                assert!(are_equal(cmp, &v, &copy), "synth {synth} cmp {cmp}");
            }
        }
    }

    #[test]
    fn test_reflexive_across_lane_widths() {
        let mut rng = Randomizer::new(31);
        for _ in 0..20 {
            check_reflexive::<Vec128>(&mut rng);
            check_reflexive::<Vec256>(&mut rng);
            check_reflexive::<Vec512>(&mut rng);
        }
    }

    #[test]
    fn test_single_bit_flip_is_detected_at_every_width() {
        let mut rng = Randomizer::new(32);
        let v: Vec256 = synthesize(&mut rng, LaneWidth::L8);
        for bit in (0..256).step_by(7) {
            let mut w = v;
            w.flip_bit(bit);
            for lane in LaneWidth::ALL {
                assert!(!are_equal(lane, &v, &w));
                assert_eq!(
                    first_mismatch(lane, &v, &w),
                    Some(bit / lane.bits() as usize),
                    "bit {bit} lane {lane}"
                );
                assert_eq!(mismatched_lanes(lane, &v, &w).len(), 1);
            }
        }
    }

    #[test]
    fn test_scalar_compare() {
        assert!(are_equal(LaneWidth::L32, &5i32, &5i32));
        assert!(!are_equal(LaneWidth::L8, &0x0100i32, &0i32));
        assert_eq!(first_mismatch(LaneWidth::L8, &0x0100i32, &0i32), Some(1));
    }

    #[test]
    fn test_dyn_compare_same_width() {
        let a = AnyVector::V512(Vec512::zero());
        let mut raw = Vec512::zero();
        raw.flip_bit(511);
        let b = AnyVector::V512(raw);
        assert!(are_equal_dyn(LaneWidth::L64, &a, &a));
        assert!(!are_equal_dyn(LaneWidth::L64, &a, &b));
    }

    #[test]
    #[should_panic(expected = "register widths differ (128 vs 256 bits)")]
    fn test_dyn_compare_rejects_mixed_widths() {
        let a = AnyVector::V128(Vec128::zero());
        let b = AnyVector::V256(Vec256::zero());
        are_equal_dyn(LaneWidth::L32, &a, &b);
    }
}
