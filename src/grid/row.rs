//! Terminal grid row.
//!
//! A `Row` is a fixed-width run of `Cell`s plus line-level state: the
//! `wrapped` flag (this line continues the previous one) and the opaque
//! double-width/double-height markers.

use std::ops::{Index, IndexMut};

use bitflags::bitflags;

use crate::cell::Cell;
use crate::index::ColumnOffset;

bitflags! {
    /// Line-level rendering attributes (DECDWL/DECDHL). Stored, not
    /// interpreted; the renderer decides what to do with them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LineAttributes: u8 {
        const DOUBLE_WIDTH         = 1 << 0;
        const DOUBLE_HEIGHT_TOP    = 1 << 1;
        const DOUBLE_HEIGHT_BOTTOM = 1 << 2;
    }
}

/// One line of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
    wrapped: bool,
    attrs: LineAttributes,
}

impl Row {
    /// Create a row of `columns` default (empty) cells.
    pub fn new(columns: usize) -> Self {
        Self {
            cells: vec![Cell::default(); columns],
            wrapped: false,
            attrs: LineAttributes::empty(),
        }
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.cells.len()
    }

    /// Whether this line is the continuation of the previous one.
    pub fn wrapped(&self) -> bool {
        self.wrapped
    }

    /// Set or clear the wrapped flag.
    pub fn set_wrapped(&mut self, wrapped: bool) {
        self.wrapped = wrapped;
    }

    /// Line-level attributes.
    pub fn attrs(&self) -> LineAttributes {
        self.attrs
    }

    /// Replace the line-level attributes.
    pub fn set_attrs(&mut self, attrs: LineAttributes) {
        self.attrs = attrs;
    }

    /// Reset every cell to the template and clear line-level state.
    pub fn reset(&mut self, template: &Cell) {
        for cell in &mut self.cells {
            cell.clone_from(template);
        }
        self.wrapped = false;
        self.attrs = LineAttributes::empty();
    }

    /// Iterate over the cells left to right.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The cells as a slice.
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// The cells as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// The line's text: every cell's grapheme cluster concatenated.
    /// Empty cells (including wide-cell tails) contribute nothing.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for cell in &self.cells {
            out.push_str(&cell.to_utf8());
        }
        out
    }
}

impl Index<ColumnOffset> for Row {
    type Output = Cell;

    fn index(&self, column: ColumnOffset) -> &Cell {
        &self.cells[column.0]
    }
}

impl IndexMut<ColumnOffset> for Row {
    fn index_mut(&mut self, column: ColumnOffset) -> &mut Cell {
        &mut self.cells[column.0]
    }
}
