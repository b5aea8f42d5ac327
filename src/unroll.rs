//! Compile-time trial unrolling.
//!
//! [`static_for`] calls a closure once per index `0..N` with `N` fixed at
//! compile time; the calls are expanded through `core::array::from_fn`, which
//! generates elements in ascending index order. Only the count is a
//! compile-time constant: the closure sees each index as a run-time
//! [`TrialIndex`] value.
//!
//! Per-trial `const` branching (choosing a register or lane width from the
//! trial index at compile time) needs [`unroll!`](crate::unroll) instead. It
//! takes a literal index list and binds each index as a `const` in its own
//! copy of the body.

/// Index of one unrolled trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrialIndex(pub usize);

impl TrialIndex {
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Call `f` exactly `N` times, with indices `0..N` in ascending order.
///
/// The index passed to `f` is a run-time value; see [`unroll!`](crate::unroll)
/// for a `const` index.
#[inline(always)]
pub fn static_for<const N: usize, F: FnMut(TrialIndex)>(mut f: F) {
    let _: [(); N] = core::array::from_fn(|i| f(TrialIndex(i)));
}

/// Expand `body` once per literal index, binding the index as a `const`.
///
/// ```
/// let mut seen = Vec::new();
/// lanecheck::unroll!(I in [0, 1, 2] => {
///     const HALF: usize = I / 2;
///     seen.push((I, HALF));
/// });
/// assert_eq!(seen, vec![(0, 0), (1, 0), (2, 1)]);
/// ```
#[macro_export]
macro_rules! unroll {
    ($idx:ident in [$($n:literal),* $(,)?] => $body:block) => {
        $(
            {
                #[allow(non_upper_case_globals, dead_code)]
                const $idx: usize = $n;
                $body
            }
        )*
    };
}
