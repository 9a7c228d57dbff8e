//! Type-safe coordinate newtypes.
//!
//! `LineOffset` is signed: negative values address scrollback history
//! (`-1` is the newest history line), `0` is the top of the visible page.
//! `ColumnOffset` is 0-based and unsigned. `LineCount`/`ColumnCount` are
//! dimensional scalars. `Coordinate` combines a line and a column with
//! lexicographic ordering (line first, then column).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Generate arithmetic and conversion impls for a newtype index wrapper.
macro_rules! offset_ops {
    ($ty:ident, $inner:ty) => {
        impl From<$inner> for $ty {
            fn from(val: $inner) -> Self {
                Self(val)
            }
        }

        impl From<$ty> for $inner {
            fn from(val: $ty) -> Self {
                val.0
            }
        }

        impl Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

/// Signed line offset. Negative values address scrollback history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LineOffset(pub i32);

offset_ops!(LineOffset, i32);

/// Unsigned column offset (0-based).
///
/// Inside the selection machine a column may transiently hold the
/// one-past-end value `columns`; cell lookups there return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColumnOffset(pub usize);

offset_ops!(ColumnOffset, usize);

/// Number of lines (page height, history size, or a sum of both).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LineCount(pub usize);

offset_ops!(LineCount, usize);

/// Number of columns (page width).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColumnCount(pub usize);

offset_ops!(ColumnCount, usize);

impl LineCount {
    /// The count reinterpreted as a line offset (first line past the range).
    pub fn as_offset(self) -> LineOffset {
        LineOffset(self.0 as i32)
    }
}

impl ColumnCount {
    /// The count reinterpreted as a column offset (one past the last column).
    pub fn as_offset(self) -> ColumnOffset {
        ColumnOffset(self.0)
    }
}

/// A grid coordinate: line plus column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub line: LineOffset,
    pub column: ColumnOffset,
}

impl Coordinate {
    /// Create a new coordinate at the given line and column.
    pub fn new(line: LineOffset, column: ColumnOffset) -> Self {
        Self { line, column }
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.line.cmp(&other.line) {
            Ordering::Equal => self.column.cmp(&other.column),
            ord => ord,
        }
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
