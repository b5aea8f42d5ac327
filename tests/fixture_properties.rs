// Statistical and structural properties of synthesized fixtures.

use lanecheck::fixture::{integer_with_path, synthesize, synthesize_dyn, synthesize_with_path};
use lanecheck::paths::{ScalarPath, VectorPath};
use lanecheck::randomizer::{Randomizer, interesting_values};
use lanecheck::vector::{LaneWidth, Register, RegisterWidth, Vec256, Vec512};

const SEED: u64 = 0xA5A5_5A5A_DEAD_BEEF;

#[test]
fn every_lane_fits_its_width() {
    let mut rng = Randomizer::new(SEED);
    for register in RegisterWidth::VECTORS {
        for lane in LaneWidth::ALL {
            for _ in 0..200 {
                let v = synthesize_dyn(&mut rng, register, lane);
                assert_eq!(v.width(), register);
                let view = v.lanes(lane);
                assert_eq!(view.len(), (register.bits() / lane.bits()) as usize);
                for x in view.iter() {
                    assert!(lane.contains(x), "{x} outside {lane} ({register})");
                }
            }
        }
    }
}

#[test]
fn shift_like_paths_are_three_quarters_zero() {
    let mut rng = Randomizer::new(SEED);
    for path in [VectorPath::Shift32, VectorPath::Shuffle4] {
        let mut zeros = 0usize;
        let mut total = 0usize;
        for _ in 0..500 {
            let v: Vec512 = synthesize_with_path(&mut rng, LaneWidth::L8, path);
            let view = v.lanes(LaneWidth::L8);
            zeros += view.iter().filter(|&x| x == 0).count();
            total += view.len();
        }
        // 3/4 forced zeros plus the bounded draw landing on zero
        let rate = zeros as f64 / total as f64;
        assert!((0.73..0.82).contains(&rate), "{path}: zero rate {rate:.3}");
    }
}

#[test]
fn one_path_per_vector() {
    let corpus = interesting_values(LaneWidth::L32);
    let mut rng = Randomizer::new(7);
    let (mut bounded, mut interesting, mut full) = (0, 0, 0);
    for _ in 0..700 {
        let v: Vec512 = synthesize(&mut rng, LaneWidth::L32);
        let lanes = v.lanes(LaneWidth::L32).to_vec();
        if lanes.iter().all(|x| (0..65).contains(x)) {
            bounded += 1;
        } else if lanes.iter().all(|x| corpus.contains(x)) {
            interesting += 1;
        } else {
            // a full-range vector never carries a shift count or a corpus value
            assert!(
                lanes.iter().all(|x| !(0..65).contains(x) && !corpus.contains(x)),
                "mixed paths in {v:?}"
            );
            full += 1;
        }
    }
    assert!(bounded > 0 && interesting > 0 && full > 0);
}

#[test]
fn scalar_paths_have_no_zero_bias() {
    let mut rng = Randomizer::new(SEED);
    let mut zeros = 0;
    let draws = 20_000;
    for _ in 0..draws {
        let x = integer_with_path(&mut rng, ScalarPath::Below33);
        assert!((0..33).contains(&x));
        if x == 0 {
            zeros += 1;
        }
    }
    let rate = zeros as f64 / draws as f64;
    assert!(rate < 0.06, "zero rate {rate:.3}");
}

#[test]
fn reinterpretation_keeps_reflexivity() {
    let mut rng = Randomizer::new(SEED);
    for _ in 0..100 {
        let v: Vec256 = synthesize(&mut rng, LaneWidth::L8);
        for lane in LaneWidth::ALL {
            assert!(lanecheck::are_equal(lane, &v, &v));
        }
    }
}
