//! Terminal grid: the visible page plus bounded scrollback, addressed by
//! signed line offsets.
//!
//! Line `0` is the top of the page, `page_lines - 1` the bottom, `-1` the
//! newest history line, `-history_line_count()` the oldest. Scrolling a
//! line out of the page moves it into history and shifts every retained
//! line's offset down by one; the line's identity is otherwise stable,
//! which is what keeps selections valid across scrollback motion.

pub mod ring;
pub mod row;

use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::cell::Cell;
use crate::index::{ColumnCount, ColumnOffset, LineCount, LineOffset};

pub use ring::ScrollbackBuffer;
pub use row::{LineAttributes, Row};

/// The cell grid: a fixed-size page plus scrollback history.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Visible page rows, index 0 = top.
    rows: Vec<Row>,
    /// Rows scrolled off the top.
    history: ScrollbackBuffer,
    /// Page height.
    lines: usize,
    /// Page width.
    columns: usize,
}

impl Grid {
    /// Create a grid with the given page size and scrollback limit.
    pub fn new(page_lines: LineCount, columns: ColumnCount, max_history: LineCount) -> Self {
        debug_assert!(page_lines.0 > 0 && columns.0 > 0, "grid must not be degenerate");
        debug!(
            lines = page_lines.0,
            columns = columns.0,
            max_history = max_history.0,
            "creating grid"
        );
        Self {
            rows: (0..page_lines.0).map(|_| Row::new(columns.0)).collect(),
            history: ScrollbackBuffer::new(max_history.0),
            lines: page_lines.0,
            columns: columns.0,
        }
    }

    /// Page size as `(lines, columns)`.
    pub fn page_size(&self) -> (LineCount, ColumnCount) {
        (LineCount(self.lines), ColumnCount(self.columns))
    }

    /// Page height.
    pub fn page_line_count(&self) -> LineCount {
        LineCount(self.lines)
    }

    /// Page width.
    pub fn column_count(&self) -> ColumnCount {
        ColumnCount(self.columns)
    }

    /// Number of lines currently retained in history.
    pub fn history_line_count(&self) -> LineCount {
        LineCount(self.history.len())
    }

    /// History plus page: the number of addressable lines. Valid line
    /// offsets span `[-history_line_count, page_line_count)`.
    pub fn total_line_count(&self) -> LineCount {
        LineCount(self.history.len() + self.lines)
    }

    /// The row at `line`, if the offset is within the addressable range.
    pub fn try_line(&self, line: LineOffset) -> Option<&Row> {
        if line.0 >= 0 {
            self.rows.get(line.0 as usize)
        } else {
            self.history.get((-line.0 - 1) as usize)
        }
    }

    /// Mutable access to the row at `line`.
    pub fn try_line_mut(&mut self, line: LineOffset) -> Option<&mut Row> {
        if line.0 >= 0 {
            self.rows.get_mut(line.0 as usize)
        } else {
            self.history.get_mut((-line.0 - 1) as usize)
        }
    }

    /// The row at `line`. Panics outside the addressable range.
    pub fn line(&self, line: LineOffset) -> &Row {
        match self.try_line(line) {
            Some(row) => row,
            None => panic!(
                "line offset {line} outside [{}, {})",
                -(self.history.len() as i32),
                self.lines
            ),
        }
    }

    /// Mutable access to the row at `line`. Panics outside the range.
    pub fn line_mut(&mut self, line: LineOffset) -> &mut Row {
        let (history, lines) = (self.history.len() as i32, self.lines);
        match self.try_line_mut(line) {
            Some(row) => row,
            None => panic!("line offset {line} outside [{}, {lines})", -history),
        }
    }

    /// The cell at `(line, column)`. Panics outside the addressable range.
    pub fn at(&self, line: LineOffset, column: ColumnOffset) -> &Cell {
        &self.line(line)[column]
    }

    /// The cell at `(line, column)`, or `None` out of bounds. This is the
    /// accessor shape the selection machine consumes.
    pub fn try_at(&self, line: LineOffset, column: ColumnOffset) -> Option<&Cell> {
        if column.0 >= self.columns {
            return None;
        }
        self.try_line(line).map(|row| &row[column])
    }

    /// Whether the line at `line` continues the previous line (total:
    /// `false` outside the addressable range).
    pub fn is_line_wrapped(&self, line: LineOffset) -> bool {
        self.try_line(line).is_some_and(Row::wrapped)
    }

    /// The line's text (concatenated cell clusters; empty cells and wide
    /// tails contribute nothing).
    pub fn line_text(&self, line: LineOffset) -> String {
        self.try_line(line).map_or_else(String::new, Row::text)
    }

    /// Scroll the page up by `count` lines. The topmost rows move into
    /// history (keeping their wrap flags), the vacated bottom rows are
    /// reset to the template.
    pub fn scroll_up(&mut self, count: usize, template: &Cell) {
        let count = count.min(self.lines);
        for _ in 0..count {
            self.rows.rotate_left(1);
            let bottom = self.lines - 1;
            let mut fresh = Row::new(self.columns);
            fresh.reset(template);
            let retired = std::mem::replace(&mut self.rows[bottom], fresh);
            self.history.push(retired);
        }
    }

    /// Drop all scrollback history. Page content and line offsets `>= 0`
    /// are unaffected.
    pub fn clear_history(&mut self) {
        debug!(dropped = self.history.len(), "clearing scrollback");
        self.history.clear();
    }

    /// Reset every page row to the template. History is untouched.
    pub fn reset_page(&mut self, template: &Cell) {
        for row in &mut self.rows {
            row.reset(template);
        }
    }
}

impl Index<LineOffset> for Grid {
    type Output = Row;

    fn index(&self, line: LineOffset) -> &Row {
        self.line(line)
    }
}

impl IndexMut<LineOffset> for Grid {
    fn index_mut(&mut self, line: LineOffset) -> &mut Row {
        self.line_mut(line)
    }
}
