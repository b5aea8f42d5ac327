//! Mismatch reporter.
//!
//! Dumps the operands and both results of a failing trial, lane by lane, in a
//! fixed human-readable block:
//!
//! ```text
//! ========================
//!
//! Operand 1:
//! [ 1 -2 3 4 ]
//!
//! Operand 2:
//! [ 0 0 0 1 ]
//!
//! Output 1 (reference):
//! [ 1 -2 3 5 ]
//!
//! Output 2 (candidate):
//! [ 1 -2 3 4 ]
//!
//! ========================
//! ```
//!
//! Lanes are printed as decimal i64 whatever their width, so an 8-bit lane is
//! never mistaken for a character.

use std::fmt;
use std::io::{self, Write};

use crate::defaults::REPORT_SEPARATOR;
use crate::vector::{LaneView, LaneWidth, Register};

/// Lane widths of the parts of one trial: each operand is synthesized and
/// printed at its own width, both results are compared and printed at
/// `result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialWidths {
    pub operand1: LaneWidth,
    pub operand2: LaneWidth,
    pub result: LaneWidth,
}

impl TrialWidths {
    pub const fn uniform(lane: LaneWidth) -> Self {
        Self {
            operand1: lane,
            operand2: lane,
            result: lane,
        }
    }
}

/// `[ a b c ]` rendering of a lane view.
pub fn format_lanes(view: LaneView<'_>) -> String {
    let mut s = String::with_capacity(view.len() * 4 + 4);
    s.push_str("[ ");
    for value in view.iter() {
        s.push_str(&value.to_string());
        s.push(' ');
    }
    s.push(']');
    s
}

/// `format_lanes` for a register read at `lane`.
pub fn format_register<V: Register>(lane: LaneWidth, v: &V) -> String {
    format_lanes(v.lanes(lane))
}

/// One failing trial, ready to print.
#[derive(Debug, Clone)]
pub struct MismatchReport<'a> {
    operands: Vec<LaneView<'a>>,
    reference: LaneView<'a>,
    candidate: LaneView<'a>,
}

impl<'a> MismatchReport<'a> {
    pub fn unary<A: Register, R: Register>(
        operand_lane: LaneWidth,
        result_lane: LaneWidth,
        a: &'a A,
        reference: &'a R,
        candidate: &'a R,
    ) -> Self {
        Self {
            operands: vec![a.lanes(operand_lane)],
            reference: reference.lanes(result_lane),
            candidate: candidate.lanes(result_lane),
        }
    }

    pub fn binary<A: Register, B: Register, R: Register>(
        widths: TrialWidths,
        a: &'a A,
        b: &'a B,
        reference: &'a R,
        candidate: &'a R,
    ) -> Self {
        Self {
            operands: vec![a.lanes(widths.operand1), b.lanes(widths.operand2)],
            reference: reference.lanes(widths.result),
            candidate: candidate.lanes(widths.result),
        }
    }

    pub fn operand_count(&self) -> usize {
        self.operands.len()
    }
}

impl fmt::Display for MismatchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", REPORT_SEPARATOR)?;
        for (i, operand) in self.operands.iter().enumerate() {
            writeln!(f, "\nOperand {}:", i + 1)?;
            writeln!(f, "{}", format_lanes(*operand))?;
        }
        writeln!(f, "\nOutput 1 (reference):")?;
        writeln!(f, "{}", format_lanes(self.reference))?;
        writeln!(f, "\nOutput 2 (candidate):")?;
        writeln!(f, "{}", format_lanes(self.candidate))?;
        writeln!(f, "\n{}\n", REPORT_SEPARATOR)
    }
}

/// Write the report block for a two-operand mismatch to `out`.
pub fn write_error<W, A, B, R>(
    out: &mut W,
    widths: TrialWidths,
    a: &A,
    b: &B,
    reference: &R,
    candidate: &R,
) -> io::Result<()>
where
    W: Write,
    A: Register,
    B: Register,
    R: Register,
{
    write!(out, "{}", MismatchReport::binary(widths, a, b, reference, candidate))
}

/// Print the report block for a two-operand mismatch to stdout.
///
/// A closed or broken stdout is logged, not propagated: reporting must not
/// abort the trial loop.
pub fn print_error<A: Register, B: Register, R: Register>(
    widths: TrialWidths,
    a: &A,
    b: &B,
    reference: &R,
    candidate: &R,
) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_error(&mut out, widths, a, b, reference, candidate) {
        log::warn!("Failed to write mismatch report: {}", e);
    }
}

/// Print any report to stdout (see [`print_error`]).
pub fn print_report(report: &MismatchReport<'_>) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write!(out, "{}", report) {
        log::warn!("Failed to write mismatch report: {}", e);
    }
}
