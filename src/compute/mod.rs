//! Hardware capability probing.

pub mod simd;

pub use simd::{detect_supported_widths, detect_widest_register, is_width_supported, width_description};
