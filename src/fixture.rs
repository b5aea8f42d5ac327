//! Fixture synthesis.
//!
//! A vector fixture is built by choosing one [`VectorPath`] for the whole
//! register and then drawing every lane, lane 0 first, from that path's
//! distribution. Lanes are packed through the [`packing_layout`] table so
//! lane `i` always lands at byte offset `i * lane_bytes`.

use crate::fault::{ConfigFault, fault};
use crate::paths::{ScalarPath, VectorPath};
use crate::randomizer::Randomizer;
use crate::vector::{
    AnyVector, LaneWidth, Register, RegisterWidth, Vec128, Vec256, Vec512, VectorRegister,
    packing_layout,
};

/// Random vector of type `V` with `lane`-wide lanes, on a randomly chosen
/// path.
pub fn synthesize<V: VectorRegister>(rng: &mut Randomizer, lane: LaneWidth) -> V {
    let path = VectorPath::choose(rng);
    synthesize_with_path(rng, lane, path)
}

/// Random vector of type `V` with every lane drawn from `path`.
pub fn synthesize_with_path<V: VectorRegister>(
    rng: &mut Randomizer,
    lane: LaneWidth,
    path: VectorPath,
) -> V {
    let layout = packing_layout(V::WIDTH, lane);
    let distribution = path.distribution();
    log::trace!("synthesize {} x {} lanes on path {}", layout.lanes, lane, path);

    let mut v = V::zero();
    let bytes = v.as_bytes_mut();
    for i in 0..layout.lanes {
        let value = distribution.draw(rng, lane);
        layout.pack(bytes, i, value);
    }
    v
}

/// Run-time counterpart of [`synthesize`].
///
/// Faults on `RegisterWidth::Scalar`; scalar operands come from
/// [`integer_randomizer`].
pub fn synthesize_dyn(rng: &mut Randomizer, register: RegisterWidth, lane: LaneWidth) -> AnyVector {
    match register {
        RegisterWidth::W128 => AnyVector::V128(synthesize::<Vec128>(rng, lane)),
        RegisterWidth::W256 => AnyVector::V256(synthesize::<Vec256>(rng, lane)),
        RegisterWidth::W512 => AnyVector::V512(synthesize::<Vec512>(rng, lane)),
        RegisterWidth::Scalar => fault(ConfigFault::NotAVector(register.bits())),
    }
}

/// Random scalar operand on a randomly chosen scalar path.
pub fn integer_randomizer(rng: &mut Randomizer) -> i32 {
    let path = ScalarPath::choose(rng);
    integer_with_path(rng, path)
}

pub fn integer_with_path(rng: &mut Randomizer, path: ScalarPath) -> i32 {
    // Every scalar distribution stays inside i32.
    path.distribution().draw(rng, LaneWidth::L32) as i32
}

/// Operand types that can be drawn at random.
///
/// `lane` is the synthesis lane width; the scalar ignores it.
pub trait Fixture: Register {
    fn random(rng: &mut Randomizer, lane: LaneWidth) -> Self;
}

macro_rules! vector_fixture {
    ($($name:ty),*) => {
        $(
            impl Fixture for $name {
                fn random(rng: &mut Randomizer, lane: LaneWidth) -> Self {
                    synthesize::<$name>(rng, lane)
                }
            }
        )*
    };
}

vector_fixture!(Vec128, Vec256, Vec512);

impl Fixture for i32 {
    fn random(rng: &mut Randomizer, _lane: LaneWidth) -> Self {
        integer_randomizer(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomizer::interesting_values;
    use std::collections::HashSet;

    fn check_width_fidelity<V: VectorRegister>(rng: &mut Randomizer) {
        for lane in LaneWidth::ALL {
            for _ in 0..50 {
                let v: V = synthesize(rng, lane);
                let view = v.lanes(lane);
                assert_eq!(view.len(), V::lane_count(lane));
                assert!(view.iter().all(|x| lane.contains(x)));
            }
        }
    }

    #[test]
    fn test_width_fidelity_all_registers() {
        let mut rng = Randomizer::new(21);
        check_width_fidelity::<Vec128>(&mut rng);
        check_width_fidelity::<Vec256>(&mut rng);
        check_width_fidelity::<Vec512>(&mut rng);
    }

    #[test]
    fn test_bounded_paths_respect_bounds() {
        let mut rng = Randomizer::new(22);
        for (path, bound) in [
            (VectorPath::Shift64, 65),
            (VectorPath::Shift32, 33),
            (VectorPath::Shift16, 17),
            (VectorPath::Shuffle8, 9),
            (VectorPath::Shuffle4, 5),
        ] {
            for _ in 0..20 {
                let v: Vec512 = synthesize_with_path(&mut rng, LaneWidth::L8, path);
                assert!(v.lanes(LaneWidth::L8).iter().all(|x| (0..bound).contains(&x)));
            }
        }
    }

    #[test]
    fn test_interesting_path_stays_in_corpus() {
        let mut rng = Randomizer::new(23);
        for lane in LaneWidth::ALL {
            let corpus: HashSet<i64> = interesting_values(lane).into_iter().collect();
            let mut seen = HashSet::new();
            for _ in 0..100 {
                let v: Vec256 = synthesize_with_path(&mut rng, lane, VectorPath::Interesting);
                seen.extend(v.lanes(lane).iter());
            }
            assert_eq!(seen, corpus, "{lane}");
        }
    }

    #[test]
    fn test_full_path_uses_whole_range() {
        let mut rng = Randomizer::new(24);
        let v: Vec128 = synthesize_with_path(&mut rng, LaneWidth::L64, VectorPath::Full);
        // Two independent 64-bit draws both landing in [-2^32, 2^32) is
        // vanishingly unlikely.
        assert!(v.lanes(LaneWidth::L64).iter().any(|x| x.unsigned_abs() > u32::MAX as u64));
    }

    #[test]
    fn test_dyn_synthesis_matches_width() {
        let mut rng = Randomizer::new(25);
        for register in RegisterWidth::VECTORS {
            let v = synthesize_dyn(&mut rng, register, LaneWidth::L16);
            assert_eq!(v.width(), register);
        }
    }

    #[test]
    #[should_panic(expected = "not a vector register")]
    fn test_dyn_synthesis_rejects_scalar() {
        let mut rng = Randomizer::new(26);
        let _ = synthesize_dyn(&mut rng, RegisterWidth::Scalar, LaneWidth::L32);
    }

    #[test]
    fn test_scalar_paths() {
        let mut rng = Randomizer::new(27);
        for _ in 0..200 {
            assert!((0..33).contains(&integer_with_path(&mut rng, ScalarPath::Below33)));
            assert!((0..5).contains(&integer_with_path(&mut rng, ScalarPath::Below5)));
            let v = integer_with_path(&mut rng, ScalarPath::Interesting) as i64;
            assert!(interesting_values(LaneWidth::L32).contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_fixtures() {
        let mut a = Randomizer::new(0xF1F1);
        let mut b = Randomizer::new(0xF1F1);
        for _ in 0..32 {
            let x: Vec512 = synthesize(&mut a, LaneWidth::L8);
            let y: Vec512 = synthesize(&mut b, LaneWidth::L8);
            assert_eq!(x, y);
            assert_eq!(integer_randomizer(&mut a), integer_randomizer(&mut b));
        }
    }
}
