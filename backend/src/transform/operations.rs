//! Matrix operations.
//!
//! Every operation takes a validated [`Matrix`] and is pure. Rendering goes
//! through the `Display` impls on [`Matrix`] and [`FlatSequence`], so all
//! text output shares one format: cells comma-joined, rows newline-separated,
//! trailing newline.
//!
//! Arithmetic is 64-bit signed with wrapping on overflow.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::UnknownOperation;
use crate::models::{FlatSequence, Matrix};

/// Render the matrix unchanged.
pub fn echo(matrix: &Matrix) -> String {
    matrix.to_string()
}

/// Swap rows and columns: `t[j][i] == m[i][j]`.
pub fn transpose(matrix: &Matrix) -> Matrix {
    let n = matrix.size();
    let source = matrix.cells();
    let cells = (0..n)
        .flat_map(|j| (0..n).map(move |i| source[i * n + j].clone()))
        .collect();
    Matrix::from_cells(n, cells)
}

/// Row 0 left to right, then row 1, and so on.
pub fn flatten(matrix: &Matrix) -> FlatSequence {
    FlatSequence::new(matrix.cells().to_vec())
}

/// Sum of all values, accumulated left to right from 0.
pub fn sum(flat: &FlatSequence) -> i64 {
    flat.values().fold(0i64, i64::wrapping_add)
}

/// Product of all values, accumulated left to right from 1.
pub fn multiply(flat: &FlatSequence) -> i64 {
    flat.values().fold(1i64, i64::wrapping_mul)
}

/// Every representation in one text block.
///
/// The input block is followed by an `Output` heading. Matrix blocks end
/// with an extra blank line, and every section after the first is preceded
/// by one.
pub fn report(matrix: &Matrix) -> String {
    let flat = flatten(matrix);
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write!(out, "Input\n{}\n", matrix);
    let _ = write!(out, "Output\n\n");
    let _ = write!(out, "Invert Matrix\n{}\n\n", transpose(matrix));
    let _ = write!(out, "Flatten\n{}\n", flat);
    let _ = write!(out, "Sum\n{}\n\n", sum(&flat));
    let _ = writeln!(out, "Multiply\n{}", multiply(&flat));
    out
}

// =============================================================================
// Operation registry
// =============================================================================

/// An operation selectable by route or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Echo,
    Invert,
    Flatten,
    Sum,
    Multiply,
    Report,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Echo,
        Operation::Invert,
        Operation::Flatten,
        Operation::Sum,
        Operation::Multiply,
        Operation::Report,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Echo => "echo",
            Operation::Invert => "invert",
            Operation::Flatten => "flatten",
            Operation::Sum => "sum",
            Operation::Multiply => "multiply",
            Operation::Report => "report",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Operation::Echo => "Return the matrix as uploaded",
            Operation::Invert => "Return the transposed matrix",
            Operation::Flatten => "Return all values on one line, row by row",
            Operation::Sum => "Return the sum of all values",
            Operation::Multiply => "Return the product of all values",
            Operation::Report => "Return every representation at once",
        }
    }

    /// Run the operation and render its result as response text.
    pub fn apply(self, matrix: &Matrix) -> String {
        match self {
            Operation::Echo => echo(matrix),
            Operation::Invert => transpose(matrix).to_string(),
            Operation::Flatten => flatten(matrix).to_string(),
            Operation::Sum => format!("{}\n", sum(&flatten(matrix))),
            Operation::Multiply => format!("{}\n", multiply(&flatten(matrix))),
            Operation::Report => report(matrix),
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "echo" => Ok(Operation::Echo),
            "invert" | "transpose" => Ok(Operation::Invert),
            "flatten" => Ok(Operation::Flatten),
            "sum" => Ok(Operation::Sum),
            "multiply" | "product" => Ok(Operation::Multiply),
            "report" => Ok(Operation::Report),
            _ => Err(UnknownOperation(s.to_string())),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-readable list of operations.
pub fn operations_description() -> String {
    let mut out = String::from("Available operations:\n\n");
    for op in Operation::ALL {
        let _ = writeln!(out, "  {:<10} POST /{:<10} {}", op.name(), op.name(), op.description());
    }
    out.push_str("\n`POST /` is an alias of `POST /echo`.\n");
    out
}
