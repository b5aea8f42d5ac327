// Seeded end-to-end walk through synthesis, comparison and the width
// metadata, plus the configuration faults.

use lanecheck::compare::{are_equal, are_equal_dyn, first_mismatch, mismatched_lanes};
use lanecheck::fixture::{synthesize_dyn, synthesize_with_path};
use lanecheck::paths::VectorPath;
use lanecheck::randomizer::Randomizer;
use lanecheck::vector::layout::packing_layout;
use lanecheck::vector::{AnyVector, LaneWidth, Register, RegisterWidth, Vec128};

#[test]
fn full_path_vector_detects_single_bit_flip() {
    let mut rng = Randomizer::new(0x5EED);
    let v: Vec128 = synthesize_with_path(&mut rng, LaneWidth::L32, VectorPath::Full);

    let lanes = v.lanes(LaneWidth::L32).to_vec();
    assert_eq!(lanes.len(), 4);
    assert!(lanes.iter().all(|&x| LaneWidth::L32.contains(x)));
    assert!(lanes.iter().any(|&x| x != 0));

    let copy = v;
    assert!(are_equal(LaneWidth::L32, &v, &copy));

    // low bit of lane 2 is bit 0 of byte 8
    let mut flipped = copy;
    flipped.flip_bit(2 * 32);
    assert_eq!(
        flipped.lanes(LaneWidth::L32).get(2),
        lanes[2] ^ 1,
        "flip landed outside lane 2"
    );

    assert!(!are_equal(LaneWidth::L32, &v, &flipped));
    assert!(!are_equal(LaneWidth::L8, &v, &flipped));
    assert_eq!(first_mismatch(LaneWidth::L32, &v, &flipped), Some(2));
    assert_eq!(mismatched_lanes(LaneWidth::L8, &v, &flipped), vec![8]);

    let (a, b) = (v.lanes(LaneWidth::L8), flipped.lanes(LaneWidth::L8));
    for i in 0..16 {
        assert_eq!(a.get(i) == b.get(i), i != 8, "byte {i}");
    }
}

#[test]
fn width_metadata() {
    let expected = [
        (RegisterWidth::W128, 0, 16),
        (RegisterWidth::W256, 1, 32),
        (RegisterWidth::W512, 2, 64),
        (RegisterWidth::Scalar, 3, 4),
    ];
    for (width, index, bytes) in expected {
        let zero = width.zero_value();
        assert_eq!(width.type_index(), index);
        assert_eq!(zero.type_index(), index);
        assert_eq!(zero.width(), width);
        assert_eq!(zero.as_bytes().len(), bytes);
        assert!(zero.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(RegisterWidth::from_bits(width.bits()), Ok(width));
    }
    assert!(RegisterWidth::from_bits(64).is_err());
    assert!(LaneWidth::from_bits(12).is_err());
}

#[test]
fn packing_table_puts_lane_zero_lowest() {
    for register in RegisterWidth::VECTORS {
        for lane in LaneWidth::ALL {
            let layout = packing_layout(register, lane);
            assert_eq!(layout.lanes * layout.stride, register.bytes());
            assert_eq!(layout.byte_range(0), 0..lane.bytes());
            let last = layout.lanes - 1;
            assert_eq!(layout.byte_range(last).end, register.bytes());
        }
    }
}

#[test]
fn dyn_comparison_matches_typed() {
    let mut rng = Randomizer::new(11);
    for register in RegisterWidth::VECTORS {
        let v = synthesize_dyn(&mut rng, register, LaneWidth::L16);
        assert!(are_equal_dyn(LaneWidth::L64, &v, &v));
        assert_eq!(are_equal_dyn(LaneWidth::L8, &v, &register.zero_value()), v == register.zero_value());
    }
    assert!(are_equal_dyn(LaneWidth::L32, &AnyVector::Scalar(-3), &AnyVector::Scalar(-3)));
}

#[test]
#[should_panic(expected = "register widths differ")]
fn comparing_different_widths_faults() {
    are_equal_dyn(
        LaneWidth::L32,
        &RegisterWidth::W128.zero_value(),
        &RegisterWidth::W256.zero_value(),
    );
}

#[test]
#[should_panic(expected = "not a vector register")]
fn synthesizing_a_scalar_faults() {
    let mut rng = Randomizer::new(1);
    synthesize_dyn(&mut rng, RegisterWidth::Scalar, LaneWidth::L32);
}

#[test]
#[should_panic(expected = "does not fit in a 32-bit register")]
fn scalar_has_no_64_bit_lanes() {
    are_equal(LaneWidth::L64, &5i32, &5i32);
}
