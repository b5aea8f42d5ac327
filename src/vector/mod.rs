//! Register and lane types
//!
//! Vector values are plain aligned byte buffers tagged by their register
//! width. Nothing about a value records how it was filled: the lane width is
//! supplied whenever the value is read, so a register synthesized as 8-bit
//! lanes can be compared or printed as 32-bit lanes.
//!
//! ## Widths
//!
//! | Type     | `RegisterWidth` | Bits | Type index |
//! |----------|-----------------|------|------------|
//! | `Vec128` | `W128`          | 128  | 0          |
//! | `Vec256` | `W256`          | 256  | 1          |
//! | `Vec512` | `W512`          | 512  | 2          |
//! | `i32`    | `Scalar`        | 32   | 3          |
//!
//! `i32` stands in for the non-vector operand some intrinsics take (shift
//! counts, immediates, lane indices).
//!
//! ## Lane order
//!
//! Lane `i` of width `L` occupies bytes `[i * L/8, (i + 1) * L/8)` of the
//! buffer, so lane 0 is the least significant lane. This holds for every
//! register/lane combination; see [`layout`] for the table.

pub mod arch;
pub mod lanes;
pub mod layout;

use std::fmt;

use crate::fault::{ConfigFault, fault};

pub use lanes::{LaneView, LaneViewMut};
pub use layout::{PACKING_TABLE, PackingLayout, packing_layout};

/// Width of one integer lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LaneWidth {
    L8,
    L16,
    L32,
    L64,
}

impl LaneWidth {
    pub const ALL: [LaneWidth; 4] = [LaneWidth::L8, LaneWidth::L16, LaneWidth::L32, LaneWidth::L64];

    pub const fn bits(self) -> u32 {
        match self {
            LaneWidth::L8 => 8,
            LaneWidth::L16 => 16,
            LaneWidth::L32 => 32,
            LaneWidth::L64 => 64,
        }
    }

    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Smallest signed value representable in this lane width.
    pub const fn min_value(self) -> i64 {
        match self {
            LaneWidth::L8 => i8::MIN as i64,
            LaneWidth::L16 => i16::MIN as i64,
            LaneWidth::L32 => i32::MIN as i64,
            LaneWidth::L64 => i64::MIN,
        }
    }

    /// Largest signed value representable in this lane width.
    pub const fn max_value(self) -> i64 {
        match self {
            LaneWidth::L8 => i8::MAX as i64,
            LaneWidth::L16 => i16::MAX as i64,
            LaneWidth::L32 => i32::MAX as i64,
            LaneWidth::L64 => i64::MAX,
        }
    }

    /// Whether `value` fits in this width as a signed integer.
    pub const fn contains(self, value: i64) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }

    pub fn from_bits(bits: u32) -> Result<Self, ConfigFault> {
        match bits {
            8 => Ok(LaneWidth::L8),
            16 => Ok(LaneWidth::L16),
            32 => Ok(LaneWidth::L32),
            64 => Ok(LaneWidth::L64),
            other => Err(ConfigFault::UnsupportedLaneWidth(other)),
        }
    }
}

impl fmt::Display for LaneWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.bits())
    }
}

/// Total width of an operand: one of the three vector registers or the
/// 32-bit scalar marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterWidth {
    W128,
    W256,
    W512,
    Scalar,
}

impl RegisterWidth {
    pub const VECTORS: [RegisterWidth; 3] = [RegisterWidth::W128, RegisterWidth::W256, RegisterWidth::W512];

    pub const fn bits(self) -> u32 {
        match self {
            RegisterWidth::W128 => 128,
            RegisterWidth::W256 => 256,
            RegisterWidth::W512 => 512,
            RegisterWidth::Scalar => 32,
        }
    }

    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Dense index used to pick a variant branch: 0 for 128-bit, 1 for
    /// 256-bit, 2 for 512-bit, 3 for the scalar.
    pub const fn type_index(self) -> usize {
        match self {
            RegisterWidth::W128 => 0,
            RegisterWidth::W256 => 1,
            RegisterWidth::W512 => 2,
            RegisterWidth::Scalar => 3,
        }
    }

    pub const fn is_vector(self) -> bool {
        !matches!(self, RegisterWidth::Scalar)
    }

    /// Canonical zero value of this width.
    pub fn zero_value(self) -> AnyVector {
        match self {
            RegisterWidth::W128 => AnyVector::V128(Vec128::zero()),
            RegisterWidth::W256 => AnyVector::V256(Vec256::zero()),
            RegisterWidth::W512 => AnyVector::V512(Vec512::zero()),
            RegisterWidth::Scalar => AnyVector::Scalar(0),
        }
    }

    /// Number of `lane`-wide lanes in this register.
    ///
    /// Faults when the lane is wider than the register (64-bit lanes on the
    /// scalar).
    pub fn lane_count(self, lane: LaneWidth) -> usize {
        if lane.bits() > self.bits() {
            fault(ConfigFault::LaneWiderThanRegister {
                lane: lane.bits(),
                register: self.bits(),
            });
        }
        (self.bits() / lane.bits()) as usize
    }

    pub fn from_bits(bits: u32) -> Result<Self, ConfigFault> {
        match bits {
            128 => Ok(RegisterWidth::W128),
            256 => Ok(RegisterWidth::W256),
            512 => Ok(RegisterWidth::W512),
            32 => Ok(RegisterWidth::Scalar),
            other => Err(ConfigFault::UnsupportedRegisterWidth(other)),
        }
    }
}

impl fmt::Display for RegisterWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterWidth::Scalar => write!(f, "scalar i32"),
            w => write!(f, "{}-bit", w.bits()),
        }
    }
}

/// An operand type whose width is known at compile time.
///
/// Implementors are plain bit patterns: any byte content is a valid value,
/// and the storage is aligned for the widest lane it can be read as.
pub trait Register: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const WIDTH: RegisterWidth;

    fn zero() -> Self;

    fn as_bytes(&self) -> &[u8];

    fn as_bytes_mut(&mut self) -> &mut [u8];

    fn into_any(self) -> AnyVector;

    fn lane_count(lane: LaneWidth) -> usize {
        Self::WIDTH.lane_count(lane)
    }

    /// View the register as signed `lane`-wide integers, aliasing the same
    /// storage.
    fn lanes(&self, lane: LaneWidth) -> LaneView<'_> {
        Self::WIDTH.lane_count(lane);
        LaneView::new(self.as_bytes(), lane)
    }

    fn lanes_mut(&mut self, lane: LaneWidth) -> LaneViewMut<'_> {
        Self::WIDTH.lane_count(lane);
        LaneViewMut::new(self.as_bytes_mut(), lane)
    }

    /// Flip bit `bit` of the register, counting from bit 0 of byte 0.
    fn flip_bit(&mut self, bit: usize) {
        let bytes = self.as_bytes_mut();
        assert!(bit < bytes.len() * 8, "bit {} out of range for {} bytes", bit, bytes.len());
        bytes[bit / 8] ^= 1 << (bit % 8);
    }
}

/// Marker for the true vector registers (128/256/512 bits).
pub trait VectorRegister: Register {}

macro_rules! vector_register {
    ($(#[$meta:meta])* $name:ident, $bytes:literal, $align:literal, $width:expr, $variant:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(C, align($align))]
        pub struct $name(pub [u8; $bytes]);

        impl $name {
            pub const BYTES: usize = $bytes;

            pub const fn from_bytes(bytes: [u8; $bytes]) -> Self {
                Self(bytes)
            }

            pub const fn to_bytes(self) -> [u8; $bytes] {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0; $bytes])
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x", stringify!($name))?;
                // Most significant byte first, like a register dump.
                for b in self.0.iter().rev() {
                    write!(f, "{:02x}", b)?;
                }
                write!(f, ")")
            }
        }

        impl Register for $name {
            const WIDTH: RegisterWidth = $width;

            fn zero() -> Self {
                Self([0; $bytes])
            }

            fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            fn as_bytes_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }

            fn into_any(self) -> AnyVector {
                AnyVector::$variant(self)
            }
        }

        impl VectorRegister for $name {}
    };
}

vector_register!(
    /// 128-bit register (`__m128i` layout).
    Vec128, 16, 16, RegisterWidth::W128, V128
);
vector_register!(
    /// 256-bit register (`__m256i` layout).
    Vec256, 32, 32, RegisterWidth::W256, V256
);
vector_register!(
    /// 512-bit register (`__m512i` layout).
    Vec512, 64, 64, RegisterWidth::W512, V512
);

impl Register for i32 {
    const WIDTH: RegisterWidth = RegisterWidth::Scalar;

    fn zero() -> Self {
        0
    }

    fn as_bytes(&self) -> &[u8] {
        // SAFETY: an i32 is 4 initialized bytes with no padding.
        unsafe { std::slice::from_raw_parts(self as *const i32 as *const u8, 4) }
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        // SAFETY: every byte pattern is a valid i32.
        unsafe { std::slice::from_raw_parts_mut(self as *mut i32 as *mut u8, 4) }
    }

    fn into_any(self) -> AnyVector {
        AnyVector::Scalar(self)
    }
}

/// Operand of any supported width, chosen at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyVector {
    V128(Vec128),
    V256(Vec256),
    V512(Vec512),
    Scalar(i32),
}

impl AnyVector {
    pub fn width(&self) -> RegisterWidth {
        match self {
            AnyVector::V128(_) => RegisterWidth::W128,
            AnyVector::V256(_) => RegisterWidth::W256,
            AnyVector::V512(_) => RegisterWidth::W512,
            AnyVector::Scalar(_) => RegisterWidth::Scalar,
        }
    }

    pub fn type_index(&self) -> usize {
        self.width().type_index()
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AnyVector::V128(v) => v.as_bytes(),
            AnyVector::V256(v) => v.as_bytes(),
            AnyVector::V512(v) => v.as_bytes(),
            AnyVector::Scalar(v) => v.as_bytes(),
        }
    }

    pub fn lanes(&self, lane: LaneWidth) -> LaneView<'_> {
        match self {
            AnyVector::V128(v) => v.lanes(lane),
            AnyVector::V256(v) => v.lanes(lane),
            AnyVector::V512(v) => v.lanes(lane),
            AnyVector::Scalar(v) => v.lanes(lane),
        }
    }
}
