//! Lane-width lenses over register storage.
//!
//! A `LaneView` reads the bytes of a register as `i8`, `i16`, `i32` or `i64`
//! lanes without copying. The comparator and the reporter both go through
//! these views, so they always agree on which bytes make up lane `i`.
//!
//! Views use native byte order. Every target this crate tests intrinsics on
//! (x86_64, aarch64) is little-endian, where native order puts lane 0 in the
//! least significant position as the hardware does.

use super::LaneWidth;

/// Read-only view of a register as signed lanes of one width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneView<'a> {
    I8(&'a [i8]),
    I16(&'a [i16]),
    I32(&'a [i32]),
    I64(&'a [i64]),
}

/// Mutable view of a register as signed lanes of one width.
#[derive(Debug, PartialEq, Eq)]
pub enum LaneViewMut<'a> {
    I8(&'a mut [i8]),
    I16(&'a mut [i16]),
    I32(&'a mut [i32]),
    I64(&'a mut [i64]),
}

fn check_storage(ptr: *const u8, len: usize, lane: LaneWidth) {
    assert_eq!(
        len % lane.bytes(),
        0,
        "{} bytes do not split into {} lanes",
        len,
        lane
    );
    assert_eq!(
        ptr as usize % lane.bytes(),
        0,
        "register storage is not aligned for {} lanes",
        lane
    );
}

impl<'a> LaneView<'a> {
    /// Reinterpret `bytes` as `lane`-wide signed integers.
    ///
    /// Panics if the length is not a whole number of lanes or the storage is
    /// not aligned for the lane type. Register types guarantee both.
    pub fn new(bytes: &'a [u8], lane: LaneWidth) -> Self {
        check_storage(bytes.as_ptr(), bytes.len(), lane);
        let n = bytes.len() / lane.bytes();
        let p = bytes.as_ptr();
        // SAFETY: length and alignment checked above; every bit pattern is a
        // valid signed integer and the borrow keeps the storage alive.
        unsafe {
            match lane {
                LaneWidth::L8 => LaneView::I8(std::slice::from_raw_parts(p as *const i8, n)),
                LaneWidth::L16 => LaneView::I16(std::slice::from_raw_parts(p as *const i16, n)),
                LaneWidth::L32 => LaneView::I32(std::slice::from_raw_parts(p as *const i32, n)),
                LaneWidth::L64 => LaneView::I64(std::slice::from_raw_parts(p as *const i64, n)),
            }
        }
    }

    pub fn width(&self) -> LaneWidth {
        match self {
            LaneView::I8(_) => LaneWidth::L8,
            LaneView::I16(_) => LaneWidth::L16,
            LaneView::I32(_) => LaneWidth::L32,
            LaneView::I64(_) => LaneWidth::L64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LaneView::I8(s) => s.len(),
            LaneView::I16(s) => s.len(),
            LaneView::I32(s) => s.len(),
            LaneView::I64(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lane `i` widened to i64 (sign-extended).
    pub fn get(&self, i: usize) -> i64 {
        match self {
            LaneView::I8(s) => s[i] as i64,
            LaneView::I16(s) => s[i] as i64,
            LaneView::I32(s) => s[i] as i64,
            LaneView::I64(s) => s[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl<'a> LaneViewMut<'a> {
    pub fn new(bytes: &'a mut [u8], lane: LaneWidth) -> Self {
        check_storage(bytes.as_ptr(), bytes.len(), lane);
        let n = bytes.len() / lane.bytes();
        let p = bytes.as_mut_ptr();
        // SAFETY: see `LaneView::new`; the unique borrow of `bytes` is moved
        // into the returned view.
        unsafe {
            match lane {
                LaneWidth::L8 => LaneViewMut::I8(std::slice::from_raw_parts_mut(p as *mut i8, n)),
                LaneWidth::L16 => LaneViewMut::I16(std::slice::from_raw_parts_mut(p as *mut i16, n)),
                LaneWidth::L32 => LaneViewMut::I32(std::slice::from_raw_parts_mut(p as *mut i32, n)),
                LaneWidth::L64 => LaneViewMut::I64(std::slice::from_raw_parts_mut(p as *mut i64, n)),
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LaneViewMut::I8(s) => s.len(),
            LaneViewMut::I16(s) => s.len(),
            LaneViewMut::I32(s) => s.len(),
            LaneViewMut::I64(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `value` into lane `i`, truncated to the lane width.
    pub fn set(&mut self, i: usize, value: i64) {
        match self {
            LaneViewMut::I8(s) => s[i] = value as i8,
            LaneViewMut::I16(s) => s[i] = value as i16,
            LaneViewMut::I32(s) => s[i] = value as i32,
            LaneViewMut::I64(s) => s[i] = value,
        }
    }
}
