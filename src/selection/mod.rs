//! Text selection over the grid.
//!
//! A `Selection` tracks four modes (linear, word-wise, full-line,
//! rectangular) over absolute grid coordinates, so it stays valid while
//! the screen scrolls. It reads the grid through two injected closures
//! (a cell getter and a wrap predicate) and never mutates it.
//!
//! The anchor (`start`) is fixed at construction; `from`/`to` track the
//! current endpoints and may be in either order. `ranges()` projects the
//! selection into one inclusive column range per covered line, and
//! `render` streams the covered cells to a callback in row-major order.
//!
//! State machine: `Waiting` until the first `extend` (full-line and
//! word-wise construction extend immediately), `InProgress` while
//! extending, `Complete` after `stop`. Extending a complete selection is
//! a programmer error and is ignored.

use tracing::trace;

use crate::cell::Cell;
use crate::index::{ColumnCount, ColumnOffset, Coordinate, LineCount, LineOffset};

/// Cell accessor injected into a selection. `None` marks coordinates
/// outside the grid (including lines already evicted from scrollback).
pub type CellGetter<'g> = Box<dyn Fn(LineOffset, ColumnOffset) -> Option<&'g Cell> + 'g>;

/// Wrap predicate injected into a selection: whether the given line
/// continues the previous one. Total; `false` out of range.
pub type WrapPredicate<'g> = Box<dyn Fn(LineOffset) -> bool + 'g>;

/// How the selection grows from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    /// Cell-exact span between the endpoints.
    Linear,
    /// Like linear, but endpoints snap to word boundaries.
    LinearWordWise,
    /// Whole logical lines (wrap-connected physical lines).
    FullLine,
    /// The rectangle spanned by the endpoints.
    Rectangular,
}

/// Selection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// Anchored, nothing extended yet.
    Waiting,
    /// Actively extending.
    InProgress,
    /// Finished; the selection is available for rendering.
    Complete,
}

/// One selected line: inclusive column range at an absolute line offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionRange {
    /// Absolute line (negative = scrollback).
    pub line: i32,
    /// First selected column.
    pub from_column: usize,
    /// Last selected column (inclusive).
    pub to_column: usize,
}

impl SelectionRange {
    /// Number of selected columns.
    pub fn length(&self) -> usize {
        self.to_column - self.from_column + 1
    }
}

/// `low <= value <= high`.
fn ascending<T: Ord>(low: T, value: T, high: T) -> bool {
    low <= value && value <= high
}

/// A text selection over a grid.
pub struct Selection<'g> {
    mode: SelectionMode,
    state: SelectionState,
    get_cell: CellGetter<'g>,
    is_wrapped: WrapPredicate<'g>,
    word_delimiters: Vec<char>,
    total_lines: LineCount,
    columns: ColumnCount,
    start: Coordinate,
    from: Coordinate,
    to: Coordinate,
}

impl<'g> Selection<'g> {
    /// Create a selection anchored at `anchor`.
    ///
    /// `FullLine` immediately expands to the whole logical line under the
    /// anchor; `LinearWordWise` immediately expands to the word under it.
    /// Both start in `InProgress`. `Linear` and `Rectangular` stay
    /// `Waiting` until the first [`extend`](Self::extend).
    pub fn new(
        mode: SelectionMode,
        get_cell: CellGetter<'g>,
        is_wrapped: WrapPredicate<'g>,
        word_delimiters: &str,
        total_lines: LineCount,
        columns: ColumnCount,
        anchor: Coordinate,
    ) -> Self {
        let mut selection = Self {
            mode,
            state: SelectionState::Waiting,
            get_cell,
            is_wrapped,
            word_delimiters: word_delimiters.chars().collect(),
            total_lines,
            columns,
            start: anchor,
            from: anchor,
            to: anchor,
        };

        match mode {
            SelectionMode::FullLine => {
                selection.state = SelectionState::InProgress;
                selection.from.column = ColumnOffset(0);
                selection.to.column = columns.as_offset();
                selection.walk_logical_line_start();
                selection.walk_logical_line_end();
            }
            SelectionMode::LinearWordWise => {
                selection.state = SelectionState::InProgress;
                selection.extend_word_backward();
                selection.swap_direction();
                selection.extend_word_forward();
            }
            SelectionMode::Linear | SelectionMode::Rectangular => {}
        }

        selection
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// The anchor coordinate; never moves after construction.
    pub fn anchor(&self) -> Coordinate {
        self.start
    }

    /// One selection endpoint. `from` and `to` carry no order guarantee;
    /// take their `min`/`max` for a normalised pair.
    pub fn from(&self) -> Coordinate {
        self.from
    }

    /// The other selection endpoint, usually the dragged one.
    pub fn to(&self) -> Coordinate {
        self.to
    }

    /// Extend the selection towards `(line, column)`. The column is
    /// clamped to `[0, columns]`.
    ///
    /// Extending a `Complete` selection is a programmer error: the call
    /// debug-asserts and leaves the selection untouched.
    ///
    /// Returns whether the viewport must scroll to keep the endpoint
    /// visible; always `false` for this pure-library implementation.
    pub fn extend(&mut self, line: LineOffset, column: ColumnOffset) -> bool {
        debug_assert!(
            self.state != SelectionState::Complete,
            "extend called on a completed selection"
        );
        if self.state == SelectionState::Complete {
            return false;
        }

        let column = ColumnOffset(column.0.min(self.columns.0));
        let coord = Coordinate::new(line, column);
        self.state = SelectionState::InProgress;

        match self.mode {
            SelectionMode::Linear => self.to = self.stretched_column(coord),
            SelectionMode::FullLine => {
                if coord > self.start {
                    self.to = coord;
                    self.walk_logical_line_end();
                } else if coord < self.start {
                    self.from = coord;
                    self.walk_logical_line_start();
                }
            }
            SelectionMode::LinearWordWise => {
                if coord > self.start {
                    self.to = coord;
                    self.extend_word_forward();
                } else {
                    self.to = coord;
                    self.extend_word_backward();
                    self.swap_direction();
                    self.to = self.start;
                    self.extend_word_forward();
                }
            }
            SelectionMode::Rectangular => self.to = coord,
        }

        false
    }

    /// Mark the selection as completed. No-op unless `InProgress`.
    pub fn stop(&mut self) {
        if self.state == SelectionState::InProgress {
            self.state = SelectionState::Complete;
            trace!(from = %self.from, to = %self.to, "selection completed");
        }
    }

    /// Whether the given absolute coordinate lies inside the selection.
    /// Direction-agnostic: `from` and `to` may be in either order.
    pub fn contains(&self, coord: Coordinate) -> bool {
        let (from, to) = (self.from, self.to);
        match self.mode {
            SelectionMode::FullLine => {
                ascending(from.line, coord.line, to.line) || ascending(to.line, coord.line, from.line)
            }
            SelectionMode::Linear | SelectionMode::LinearWordWise => {
                ascending(from, coord, to) || ascending(to, coord, from)
            }
            SelectionMode::Rectangular => {
                (ascending(from.line, coord.line, to.line)
                    || ascending(to.line, coord.line, from.line))
                    && (ascending(from.column, coord.column, to.column)
                        || ascending(to.column, coord.column, from.column))
            }
        }
    }

    /// Stretch a coordinate to the right over the tail of a wide cell, or
    /// across a run of empty cells up to (and including the tail of) the
    /// next non-empty cell.
    pub fn stretched_column(&self, coord: Coordinate) -> Coordinate {
        let mut stretched = coord;

        if let Some(cell) = self.at(stretched) {
            if cell.width() > 1 {
                stretched.column.0 += cell.width() - 1;
                return stretched;
            }
        }

        while stretched.column.0 < self.columns.0 {
            match self.at(stretched) {
                Some(cell) if cell.empty() => stretched.column.0 += 1,
                Some(cell) => {
                    if cell.width() > 1 {
                        stretched.column.0 += cell.width() - 1;
                    }
                    break;
                }
                None => break,
            }
        }

        stretched
    }

    /// One inclusive column range per covered line.
    pub fn ranges(&self) -> Vec<SelectionRange> {
        match self.mode {
            SelectionMode::Linear | SelectionMode::LinearWordWise => self.linear_ranges(),
            SelectionMode::FullLine => self.full_line_ranges(),
            SelectionMode::Rectangular => self.rectangular_ranges(),
        }
    }

    /// Stream every selected cell to `callback` in row-major,
    /// column-ascending order. Cells at evicted or out-of-range
    /// coordinates are skipped, not errors.
    pub fn render<F>(&self, mut callback: F)
    where
        F: FnMut(Coordinate, &Cell),
    {
        for range in self.ranges() {
            for column in range.from_column..=range.to_column {
                let coord = Coordinate::new(LineOffset(range.line), ColumnOffset(column));
                if let Some(cell) = self.at(coord) {
                    callback(coord, cell);
                }
            }
        }
    }

    // --- internals --------------------------------------------------------

    fn at(&self, coord: Coordinate) -> Option<&'g Cell> {
        (self.get_cell)(coord.line, coord.column)
    }

    /// Whether the cell at `coord` terminates a word: absent, empty, or a
    /// configured delimiter codepoint.
    fn is_word_delimiter(&self, coord: Coordinate) -> bool {
        match self.at(coord) {
            None => true,
            Some(cell) => {
                cell.empty()
                    || cell
                        .codepoint(0)
                        .is_some_and(|ch| self.word_delimiters.contains(&ch))
            }
        }
    }

    fn swap_direction(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    /// Walk `from` up through wrap-connected lines to the start of the
    /// logical line.
    fn walk_logical_line_start(&mut self) {
        while self.from.line.0 > 0 && (self.is_wrapped)(self.from.line) {
            self.from.line.0 -= 1;
        }
    }

    /// Walk `to` down through wrap-connected lines to the end of the
    /// logical line.
    fn walk_logical_line_end(&mut self) {
        while self.to.line.0 + 1 < self.total_lines.0 as i32
            && (self.is_wrapped)(LineOffset(self.to.line.0 + 1))
        {
            self.to.line.0 += 1;
        }
    }

    /// Grow `to` backward, cell by cell, until just before a word
    /// delimiter. Crossing a wrap boundary lands on the previous line's
    /// last column. Swaps direction if the walk inverted the endpoints.
    fn extend_word_backward(&mut self) {
        let mut last = self.to;
        let mut current = last;
        loop {
            if current.column.0 > 0 {
                current.column.0 -= 1;
            } else if (self.is_wrapped)(current.line) {
                current.line.0 -= 1;
                current.column = ColumnOffset(self.columns.0 - 1);
            } else {
                break;
            }

            if self.is_word_delimiter(current) {
                break;
            }
            last = current;
        }

        if self.to < self.from {
            self.swap_direction();
        }
        self.to = last;
    }

    /// Grow `to` forward, cell by cell, until just before a word
    /// delimiter. At the physical line end the walk continues onto the
    /// next line only if that line is a wrapped continuation.
    fn extend_word_forward(&mut self) {
        let mut last = self.to;
        let mut current = last;
        loop {
            if current.column.0 + 1 < self.columns.0 {
                current = self.stretched_column(Coordinate::new(
                    current.line,
                    ColumnOffset(current.column.0 + 1),
                ));
            } else if current.line.0 + 1 < self.total_lines.0 as i32
                && (self.is_wrapped)(LineOffset(current.line.0 + 1))
            {
                current.line.0 += 1;
                current = self.stretched_column(Coordinate::new(current.line, ColumnOffset(0)));
            } else {
                break;
            }

            if self.is_word_delimiter(current) {
                break;
            }
            last = current;
        }

        self.to = self.stretched_column(last);
    }

    /// Normalised endpoints: `(min, max)` in lexicographic order.
    fn ordered(&self) -> (Coordinate, Coordinate) {
        if self.to < self.from {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        }
    }

    fn linear_ranges(&self) -> Vec<SelectionRange> {
        let (from, to) = self.ordered();
        let lines = (to.line.0 - from.line.0 + 1) as usize;
        let last_column = self.columns.0 - 1;
        let mut result = Vec::with_capacity(lines);

        if lines == 1 {
            result.push(SelectionRange {
                line: from.line.0,
                from_column: from.column.0,
                to_column: to.column.0,
            });
            return result;
        }

        result.push(SelectionRange {
            line: from.line.0,
            from_column: from.column.0,
            to_column: last_column,
        });
        for n in 1..lines - 1 {
            result.push(SelectionRange {
                line: from.line.0 + n as i32,
                from_column: 0,
                to_column: last_column,
            });
        }
        result.push(SelectionRange {
            line: to.line.0,
            from_column: 0,
            to_column: to.column.0,
        });
        result
    }

    fn full_line_ranges(&self) -> Vec<SelectionRange> {
        let (from, to) = self.ordered();
        let last_column = self.columns.0 - 1;
        (from.line.0..=to.line.0)
            .map(|line| SelectionRange {
                line,
                from_column: 0,
                to_column: last_column,
            })
            .collect()
    }

    fn rectangular_ranges(&self) -> Vec<SelectionRange> {
        let (from, to) = self.ordered();
        let from_column = self.from.column.min(self.to.column).0;
        let to_column = self.from.column.max(self.to.column).0;
        (from.line.0..=to.line.0)
            .map(|line| SelectionRange {
                line,
                from_column,
                to_column,
            })
            .collect()
    }
}

impl std::fmt::Debug for Selection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("mode", &self.mode)
            .field("state", &self.state)
            .field("start", &self.start)
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}
