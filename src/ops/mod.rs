//! Portable reference computations.
//!
//! Lane-wise integer operations written against [`LaneView`]s, one lane at a
//! time, with the wrapping/saturation behaviour of the matching x86
//! instructions. These are the "reference" side of the sample checks; the
//! intrinsic "candidate" side lives in [`x86`].
//!
//! [`LaneView`]: crate::vector::LaneView

#[cfg(target_arch = "x86_64")]
pub mod x86;

use crate::vector::{LaneWidth, Register};

/// Mask selecting the low `lane.bits()` bits of a widened lane.
fn lane_mask(lane: LaneWidth) -> u64 {
    match lane {
        LaneWidth::L64 => u64::MAX,
        l => (1u64 << l.bits()) - 1,
    }
}

/// Lane read as an unsigned integer.
fn unsigned(lane: LaneWidth, value: i64) -> u64 {
    value as u64 & lane_mask(lane)
}

pub fn lanewise_unary<V: Register>(lane: LaneWidth, a: &V, f: impl Fn(i64) -> i64) -> V {
    let mut out = V::zero();
    let src = a.lanes(lane);
    let mut dst = out.lanes_mut(lane);
    for i in 0..src.len() {
        dst.set(i, f(src.get(i)));
    }
    out
}

pub fn lanewise_binary<V: Register>(
    lane: LaneWidth,
    a: &V,
    b: &V,
    f: impl Fn(i64, i64) -> i64,
) -> V {
    let mut out = V::zero();
    let (x, y) = (a.lanes(lane), b.lanes(lane));
    let mut dst = out.lanes_mut(lane);
    for i in 0..x.len() {
        dst.set(i, f(x.get(i), y.get(i)));
    }
    out
}

/// Wrapping add (`paddb`/`paddw`/`paddd`/`paddq`).
pub fn add<V: Register>(lane: LaneWidth, a: &V, b: &V) -> V {
    lanewise_binary(lane, a, b, i64::wrapping_add)
}

/// Wrapping subtract.
pub fn sub<V: Register>(lane: LaneWidth, a: &V, b: &V) -> V {
    lanewise_binary(lane, a, b, i64::wrapping_sub)
}

/// Signed minimum.
pub fn min<V: Register>(lane: LaneWidth, a: &V, b: &V) -> V {
    lanewise_binary(lane, a, b, i64::min)
}

/// Signed maximum.
pub fn max<V: Register>(lane: LaneWidth, a: &V, b: &V) -> V {
    lanewise_binary(lane, a, b, i64::max)
}

/// Absolute value; the lane minimum maps to itself.
pub fn abs<V: Register>(lane: LaneWidth, a: &V) -> V {
    lanewise_unary(lane, a, i64::wrapping_abs)
}

/// Per-lane left shift by the matching lane of `counts`, read unsigned.
/// Counts of the lane width or more clear the lane (`vpsllv*`).
pub fn shift_left_variable<V: Register>(lane: LaneWidth, a: &V, counts: &V) -> V {
    lanewise_binary(lane, a, counts, |x, c| {
        let c = unsigned(lane, c);
        if c >= lane.bits() as u64 {
            0
        } else {
            x.wrapping_shl(c as u32)
        }
    })
}

/// Left shift of every lane by one scalar count (`psll*` with the count
/// zero-extended into a 64-bit register).
pub fn shift_left_scalar<V: Register>(lane: LaneWidth, a: &V, count: i32) -> V {
    let c = count as u32 as u64;
    lanewise_unary(lane, a, |x| {
        if c >= lane.bits() as u64 {
            0
        } else {
            x.wrapping_shl(c as u32)
        }
    })
}

/// Byte shuffle within each 128-bit block (`pshufb`): index byte with the
/// top bit set yields zero, otherwise its low four bits select a byte of the
/// same block of `a`.
pub fn shuffle_bytes<V: Register>(a: &V, indices: &V) -> V {
    let mut out = V::zero();
    let src = a.as_bytes();
    let idx = indices.as_bytes();
    for (block, dst) in out.as_bytes_mut().chunks_mut(16).enumerate() {
        let base = block * 16;
        for (i, d) in dst.iter_mut().enumerate() {
            let sel = idx[base + i];
            *d = if sel & 0x80 != 0 {
                0
            } else {
                src[base + (sel & 0x0f) as usize]
            };
        }
    }
    out
}
