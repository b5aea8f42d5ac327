//! Lane packing table.
//!
//! One entry per (register width, lane width) pair. Every entry places lane
//! `i` at byte offset `i * stride`, i.e. lane 0 is the least significant lane.
//!
//! `set_intrinsic` names the x86 constructor that builds the same register
//! from a lane list. Some widths only have the `set` form, which takes its
//! arguments from the most significant lane down (`ArgOrder::Descending`);
//! the others have a `setr` form taking lane 0 first. Both forms produce the
//! same register for the same lane list, so the argument order is recorded
//! for cross-checking against hardware only and never changes the packing.

use std::ops::Range;

use super::{LaneWidth, RegisterWidth};
use crate::fault::{ConfigFault, fault};

/// Order in which the matching x86 constructor takes its lane arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgOrder {
    /// Lane 0 first (`setr` forms).
    Ascending,
    /// Highest lane first (`set` forms).
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackingLayout {
    pub register: RegisterWidth,
    pub lane: LaneWidth,
    pub lanes: usize,
    pub stride: usize,
    pub set_intrinsic: &'static str,
    pub arg_order: ArgOrder,
}

const fn entry(
    register: RegisterWidth,
    lane: LaneWidth,
    set_intrinsic: &'static str,
    arg_order: ArgOrder,
) -> PackingLayout {
    PackingLayout {
        register,
        lane,
        lanes: (register.bits() / lane.bits()) as usize,
        stride: lane.bytes(),
        set_intrinsic,
        arg_order,
    }
}

use ArgOrder::{Ascending, Descending};
use LaneWidth::{L16, L32, L64, L8};
use RegisterWidth::{W128, W256, W512};

pub const PACKING_TABLE: [PackingLayout; 12] = [
    entry(W128, L64, "_mm_set_epi64x", Descending),
    entry(W128, L32, "_mm_setr_epi32", Ascending),
    entry(W128, L16, "_mm_setr_epi16", Ascending),
    entry(W128, L8, "_mm_setr_epi8", Ascending),
    entry(W256, L64, "_mm256_setr_epi64x", Ascending),
    entry(W256, L32, "_mm256_setr_epi32", Ascending),
    entry(W256, L16, "_mm256_setr_epi16", Ascending),
    entry(W256, L8, "_mm256_setr_epi8", Ascending),
    entry(W512, L64, "_mm512_setr_epi64", Ascending),
    entry(W512, L32, "_mm512_setr_epi32", Ascending),
    entry(W512, L16, "_mm512_set_epi16", Descending),
    entry(W512, L8, "_mm512_set_epi8", Descending),
];

/// Packing layout for a vector register and lane width.
///
/// Faults on the scalar marker; scalars are not packed from lanes.
pub fn packing_layout(register: RegisterWidth, lane: LaneWidth) -> &'static PackingLayout {
    match PACKING_TABLE
        .iter()
        .find(|e| e.register == register && e.lane == lane)
    {
        Some(layout) => layout,
        None => fault(ConfigFault::NotAVector(register.bits())),
    }
}

impl PackingLayout {
    /// Bytes occupied by lane `index`.
    pub fn byte_range(&self, index: usize) -> Range<usize> {
        assert!(
            index < self.lanes,
            "lane {} out of range for {} {} lanes",
            index,
            self.lanes,
            self.lane
        );
        index * self.stride..(index + 1) * self.stride
    }

    /// Write `value`, truncated to the lane width, into lane `index` of
    /// `bytes`.
    pub fn pack(&self, bytes: &mut [u8], index: usize, value: i64) {
        assert_eq!(bytes.len(), self.register.bytes());
        let range = self.byte_range(index);
        match self.lane {
            L8 => bytes[range].copy_from_slice(&(value as i8).to_ne_bytes()),
            L16 => bytes[range].copy_from_slice(&(value as i16).to_ne_bytes()),
            L32 => bytes[range].copy_from_slice(&(value as i32).to_ne_bytes()),
            L64 => bytes[range].copy_from_slice(&value.to_ne_bytes()),
        }
    }

    /// Order of the lane list as it would be passed to `set_intrinsic`.
    pub fn intrinsic_args(&self, lanes: &[i64]) -> Vec<i64> {
        assert_eq!(lanes.len(), self.lanes);
        match self.arg_order {
            Ascending => lanes.to_vec(),
            Descending => lanes.iter().rev().copied().collect(),
        }
    }
}
