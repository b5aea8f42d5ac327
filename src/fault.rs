//! Configuration faults.
//!
//! Every width in this crate is fixed by the call site, so an unsupported
//! register width, lane width or path id reaching the lower layers means the
//! caller is wrong. Those cases are reported as a [`ConfigFault`] and, where
//! the API is infallible, raised through [`fault`] which never returns.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigFault {
    #[error("unsupported register width {0}: expected 128, 256, 512 or 32 (scalar)")]
    UnsupportedRegisterWidth(u32),

    #[error("unsupported lane width {0}: expected 8, 16, 32 or 64")]
    UnsupportedLaneWidth(u32),

    #[error("{0}-bit operand is not a vector register: expected 128, 256 or 512")]
    NotAVector(u32),

    #[error("lane width {lane} does not fit in a {register}-bit register")]
    LaneWiderThanRegister { lane: u32, register: u32 },

    #[error("vectors can't be compared: register widths differ ({left} vs {right} bits)")]
    RegisterWidthMismatch { left: u32, right: u32 },

    #[error("randomization path {id} out of range: expected 0..{count}")]
    InvalidPath { id: u32, count: u32 },

    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

/// Raise a configuration fault.
///
/// The fault is logged before the panic so it survives in log files even when
/// the panic message is swallowed by a test runner.
#[cold]
#[track_caller]
pub fn fault(f: ConfigFault) -> ! {
    log::error!("configuration fault: {}", f);
    panic!("{}", f)
}
