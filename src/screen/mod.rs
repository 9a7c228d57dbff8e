//! Screen facade: the read/write API over the grid.
//!
//! The screen owns the grid, the cursor, the current graphics attributes,
//! and the hyperlink interning table. All cell mutation funnels through it:
//! the external escape-sequence parser drives the `vte::ansi::Handler` impl
//! (see `handler`), which calls the operations below. Readers (renderer,
//! selection) go through the delegating read accessors or
//! [`Screen::start_selection`].
//!
//! The cursor follows the pending-wrap convention: after writing into the
//! last column, `column == columns` until the next printable character
//! triggers the wrap.

mod handler;

use std::sync::Arc;

use tracing::trace;
use unicode_width::UnicodeWidthChar;

use crate::attrs::{GraphicsAttributes, GraphicsRendition};
use crate::cell::Cell;
use crate::color::Color;
use crate::grid::Grid;
use crate::hyperlink::{Hyperlink, HyperlinkId, HyperlinkStore};
use crate::image::{ImageFragment, RasterizedImage};
use crate::index::{ColumnCount, ColumnOffset, Coordinate, LineCount, LineOffset};
use crate::selection::{Selection, SelectionMode};

/// Display erase scope (ED).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseMode {
    /// Cursor to end of page.
    Below,
    /// Start of page to cursor.
    Above,
    /// The whole page.
    All,
    /// Scrollback history only.
    Scrollback,
}

/// Line erase scope (EL).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEraseMode {
    /// Cursor to end of line.
    Right,
    /// Start of line to cursor.
    Left,
    /// The whole line.
    All,
}

/// Cursor position in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    line: usize,
    column: usize,
}

/// The terminal screen: grid plus write state.
#[derive(Debug)]
pub struct Screen {
    grid: Grid,
    cursor: Cursor,
    attrs: GraphicsAttributes,
    hyperlinks: HyperlinkStore,
    current_hyperlink: Option<HyperlinkId>,
    auto_wrap: bool,
}

impl Screen {
    /// Create a screen with the given page size and scrollback limit.
    pub fn new(page_lines: LineCount, columns: ColumnCount, max_history: LineCount) -> Self {
        Self {
            grid: Grid::new(page_lines, columns, max_history),
            cursor: Cursor { line: 0, column: 0 },
            attrs: GraphicsAttributes::default(),
            hyperlinks: HyperlinkStore::new(),
            current_hyperlink: None,
            auto_wrap: true,
        }
    }

    /// The underlying grid (read only; writes go through the screen).
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cursor position. While a wrap is pending the column equals the
    /// column count.
    pub fn cursor_position(&self) -> Coordinate {
        Coordinate::new(
            LineOffset(self.cursor.line as i32),
            ColumnOffset(self.cursor.column),
        )
    }

    /// The graphics attributes applied to newly written cells.
    pub fn attributes(&self) -> &GraphicsAttributes {
        &self.attrs
    }

    /// Apply an SGR mutation to the current attributes.
    pub fn set_graphics_rendition(&mut self, sgr: GraphicsRendition) {
        self.attrs.apply(sgr);
    }

    /// Set the current foreground color.
    pub fn set_foreground(&mut self, color: Color) {
        self.attrs.fg = color;
    }

    /// Set the current background color.
    pub fn set_background(&mut self, color: Color) {
        self.attrs.bg = color;
    }

    /// Set the current underline decoration color.
    pub fn set_underline_color(&mut self, color: Color) {
        self.attrs.underline_color = color;
    }

    /// Open (`Some`) or close (`None`) the current OSC 8 hyperlink. The
    /// link is interned; subsequent writes carry its id.
    pub fn set_hyperlink(&mut self, link: Option<Hyperlink>) {
        self.current_hyperlink = link.map(|link| self.hyperlinks.intern(link));
    }

    /// The hyperlink id applied to newly written cells, if a link is open.
    pub fn current_hyperlink(&self) -> Option<HyperlinkId> {
        self.current_hyperlink
    }

    /// The hyperlink interning table.
    pub fn hyperlinks(&self) -> &HyperlinkStore {
        &self.hyperlinks
    }

    /// Enable or disable auto-wrap (DECAWM). With auto-wrap off, writes at
    /// the right margin overwrite the last cell.
    pub fn set_auto_wrap(&mut self, auto_wrap: bool) {
        self.auto_wrap = auto_wrap;
    }

    // --- write path -------------------------------------------------------

    /// Write a string, interpreting CR, LF, HT, and BS. Convenience over
    /// [`Screen::write_char`] for tests and embedders without a parser.
    pub fn write_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' => self.carriage_return(),
                '\n' => self.linefeed(),
                '\t' => self.horizontal_tab(),
                '\x08' => self.backspace(),
                _ => self.write_char(ch),
            }
        }
    }

    /// Write one printable character at the cursor, applying the current
    /// attributes and hyperlink.
    ///
    /// Width-2 characters occupy a head cell plus a reserved empty tail;
    /// overwriting either half of an existing pair clears the other half
    /// first. Zero-width codepoints join the preceding cell's grapheme
    /// cluster.
    pub fn write_char(&mut self, ch: char) {
        let width = match UnicodeWidthChar::width(ch) {
            Some(0) => {
                self.append_zero_width(ch);
                return;
            }
            Some(width) => width.min(2),
            None => return,
        };
        let columns = self.grid.column_count().0;
        if width > columns {
            return;
        }

        loop {
            let line = self.cursor.line;
            let column = self.cursor.column;

            // Pending wrap, or a wide char that would straddle the margin.
            if column + width > columns {
                if self.auto_wrap {
                    self.wrap_to_next_line();
                    continue;
                }
                self.cursor.column = columns - width;
                continue;
            }

            self.clear_wide_pair(line, column);
            if width == 2 {
                self.clear_wide_pair(line, column + 1);
            }

            let attrs = self.attrs;
            let hyperlink = self.current_hyperlink;
            self.cell_mut(line, column).write(&attrs, ch, width, hyperlink);
            if width == 2 {
                // Reserve the tail half.
                self.cell_mut(line, column + 1).reset_with(&attrs, hyperlink);
            }

            self.cursor.column = column + width;
            break;
        }
    }

    /// LF: move down one line, scrolling the page into history at the
    /// bottom.
    pub fn linefeed(&mut self) {
        if self.cursor.line + 1 >= self.grid.page_line_count().0 {
            let template = self.erase_template();
            self.grid.scroll_up(1, &template);
        } else {
            self.cursor.line += 1;
        }
    }

    /// CR: move to column 0.
    pub fn carriage_return(&mut self) {
        self.cursor.column = 0;
    }

    /// NEL: carriage return plus linefeed.
    pub fn newline(&mut self) {
        self.carriage_return();
        self.linefeed();
    }

    /// BS: move one column left, resolving a pending wrap first.
    pub fn backspace(&mut self) {
        let columns = self.grid.column_count().0;
        if self.cursor.column >= columns {
            self.cursor.column = columns - 1;
        } else if self.cursor.column > 0 {
            self.cursor.column -= 1;
        }
    }

    /// HT: advance to the next 8-column tab stop (or the last column).
    pub fn horizontal_tab(&mut self) {
        let columns = self.grid.column_count().0;
        let column = self.cursor.column.min(columns - 1);
        self.cursor.column = ((column / 8 + 1) * 8).min(columns - 1);
    }

    /// CUP: move the cursor, clamped to the page.
    pub fn goto(&mut self, line: usize, column: usize) {
        self.cursor.line = line.min(self.grid.page_line_count().0 - 1);
        self.cursor.column = column.min(self.grid.column_count().0 - 1);
    }

    /// CUU: move up `count` lines, clamped to the top.
    pub fn move_up(&mut self, count: usize) {
        self.cursor.line = self.cursor.line.saturating_sub(count);
    }

    /// CUD: move down `count` lines, clamped to the bottom.
    pub fn move_down(&mut self, count: usize) {
        let last = self.grid.page_line_count().0 - 1;
        self.cursor.line = (self.cursor.line + count).min(last);
    }

    /// CUF: move right `count` columns, clamped to the last column.
    pub fn move_forward(&mut self, count: usize) {
        let last = self.grid.column_count().0 - 1;
        self.cursor.column = (self.cursor.column.min(last) + count).min(last);
    }

    /// CUB: move left `count` columns, clamped to column 0.
    pub fn move_backward(&mut self, count: usize) {
        let columns = self.grid.column_count().0;
        self.cursor.column = self.cursor.column.min(columns - 1).saturating_sub(count);
    }

    // --- erase and edit ---------------------------------------------------

    /// ED: erase part of the display, or drop the scrollback.
    pub fn erase_display(&mut self, mode: EraseMode) {
        let template = self.erase_template();
        match mode {
            EraseMode::Below => {
                self.erase_line(LineEraseMode::Right);
                for line in self.cursor.line + 1..self.grid.page_line_count().0 {
                    self.grid.line_mut(LineOffset(line as i32)).reset(&template);
                }
            }
            EraseMode::Above => {
                self.erase_line(LineEraseMode::Left);
                for line in 0..self.cursor.line {
                    self.grid.line_mut(LineOffset(line as i32)).reset(&template);
                }
            }
            EraseMode::All => self.grid.reset_page(&template),
            EraseMode::Scrollback => self.grid.clear_history(),
        }
    }

    /// EL: erase part of the cursor line. Line-level wrap state is kept.
    pub fn erase_line(&mut self, mode: LineEraseMode) {
        let template = self.erase_template();
        let columns = self.grid.column_count().0;
        let column = self.cursor.column;
        let row = self.grid.line_mut(LineOffset(self.cursor.line as i32));
        let cells = row.as_mut_slice();
        match mode {
            LineEraseMode::Right => {
                for cell in &mut cells[column.min(columns)..] {
                    cell.clone_from(&template);
                }
            }
            LineEraseMode::Left => {
                let end = column.min(columns - 1) + 1;
                for cell in &mut cells[..end] {
                    cell.clone_from(&template);
                }
            }
            LineEraseMode::All => {
                for cell in cells {
                    cell.clone_from(&template);
                }
            }
        }
    }

    /// ECH: erase `count` cells at the cursor without shifting.
    pub fn erase_chars(&mut self, count: usize) {
        let template = self.erase_template();
        let columns = self.grid.column_count().0;
        let start = self.cursor.column.min(columns);
        let end = (start + count).min(columns);
        let row = self.grid.line_mut(LineOffset(self.cursor.line as i32));
        for cell in &mut row.as_mut_slice()[start..end] {
            cell.clone_from(&template);
        }
    }

    /// ICH: insert `count` blank cells at the cursor, shifting the rest of
    /// the line right. Cells shifted past the margin are lost.
    pub fn insert_blank(&mut self, count: usize) {
        let columns = self.grid.column_count().0;
        let column = self.cursor.column;
        if column >= columns {
            return;
        }
        let count = count.min(columns - column);
        let template = self.erase_template();
        let row = self.grid.line_mut(LineOffset(self.cursor.line as i32));
        let cells = row.as_mut_slice();
        for i in (column + count..columns).rev() {
            cells.swap(i, i - count);
        }
        for cell in &mut cells[column..column + count] {
            cell.clone_from(&template);
        }
    }

    /// DCH: delete `count` cells at the cursor, shifting the rest of the
    /// line left. Blanks fill in at the margin.
    pub fn delete_chars(&mut self, count: usize) {
        let columns = self.grid.column_count().0;
        let column = self.cursor.column;
        if column >= columns {
            return;
        }
        let count = count.min(columns - column);
        let template = self.erase_template();
        let row = self.grid.line_mut(LineOffset(self.cursor.line as i32));
        let cells = row.as_mut_slice();
        for i in column..columns - count {
            cells.swap(i, i + count);
        }
        for cell in &mut cells[columns - count..] {
            cell.clone_from(&template);
        }
    }

    /// Stamp an image's tiles over the cell rectangle at the cursor. Tiles
    /// falling outside the page are dropped; the cursor does not move.
    pub fn place_image(&mut self, image: Arc<RasterizedImage>) {
        let page_lines = self.grid.page_line_count().0;
        let columns = self.grid.column_count().0;
        let origin_line = self.cursor.line;
        let origin_column = self.cursor.column.min(columns - 1);
        trace!(
            lines = image.lines().0,
            columns = image.columns().0,
            line = origin_line,
            column = origin_column,
            "placing image"
        );
        for tile_line in 0..image.lines().0 {
            let line = origin_line + tile_line;
            if line >= page_lines {
                break;
            }
            for tile_column in 0..image.columns().0 {
                let column = origin_column + tile_column;
                if column >= columns {
                    break;
                }
                self.clear_wide_pair(line, column);
                let fragment = ImageFragment::new(Arc::clone(&image), tile_line, tile_column);
                self.cell_mut(line, column).set_image_fragment(fragment);
            }
        }
    }

    // --- read side --------------------------------------------------------

    /// The cell at `(line, column)`, or `None` out of bounds.
    pub fn try_at(&self, line: LineOffset, column: ColumnOffset) -> Option<&Cell> {
        self.grid.try_at(line, column)
    }

    /// The cell at `(line, column)`. Panics outside the addressable range.
    pub fn at(&self, line: LineOffset, column: ColumnOffset) -> &Cell {
        self.grid.at(line, column)
    }

    /// Whether `line` continues the previous line.
    pub fn is_line_wrapped(&self, line: LineOffset) -> bool {
        self.grid.is_line_wrapped(line)
    }

    /// Page size as `(lines, columns)`.
    pub fn page_size(&self) -> (LineCount, ColumnCount) {
        self.grid.page_size()
    }

    /// Number of retained history lines.
    pub fn history_line_count(&self) -> LineCount {
        self.grid.history_line_count()
    }

    /// History plus page line count.
    pub fn total_line_count(&self) -> LineCount {
        self.grid.total_line_count()
    }

    /// The text of the line at `line`.
    pub fn line_text(&self, line: LineOffset) -> String {
        self.grid.line_text(line)
    }

    /// Begin a selection over this screen's grid, anchored at `anchor`.
    ///
    /// The selection borrows the screen; drop it before writing again.
    pub fn start_selection(
        &self,
        mode: SelectionMode,
        word_delimiters: &str,
        anchor: Coordinate,
    ) -> Selection<'_> {
        let grid = &self.grid;
        Selection::new(
            mode,
            Box::new(move |line, column| grid.try_at(line, column)),
            Box::new(move |line| grid.is_line_wrapped(line)),
            word_delimiters,
            grid.total_line_count(),
            grid.column_count(),
            anchor,
        )
    }

    // --- internals --------------------------------------------------------

    fn cell_mut(&mut self, line: usize, column: usize) -> &mut Cell {
        &mut self.grid[LineOffset(line as i32)][ColumnOffset(column)]
    }

    /// The template for erased cells: current colors and flags, no text,
    /// no hyperlink.
    fn erase_template(&self) -> Cell {
        let mut cell = Cell::default();
        cell.reset_with(&self.attrs, None);
        cell
    }

    /// Wrap to the start of the next line and mark it as a continuation.
    fn wrap_to_next_line(&mut self) {
        self.linefeed();
        self.cursor.column = 0;
        let line = LineOffset(self.cursor.line as i32);
        self.grid.line_mut(line).set_wrapped(true);
    }

    /// Join a zero-width codepoint to the preceding cell's cluster.
    fn append_zero_width(&mut self, ch: char) {
        let columns = self.grid.column_count().0;
        let line = self.cursor.line;
        let mut column = if self.cursor.column >= columns {
            columns - 1
        } else if self.cursor.column > 0 {
            self.cursor.column - 1
        } else {
            return;
        };
        // Land on the head when the preceding cell is a wide-cell tail.
        let offset = LineOffset(line as i32);
        if column > 0
            && self.grid[offset][ColumnOffset(column)].empty()
            && self.grid[offset][ColumnOffset(column - 1)].width() == 2
        {
            column -= 1;
        }

        let delta = self.cell_mut(line, column).append_codepoint(ch);
        if delta > 0 {
            // The cluster grew to width 2: reserve a tail cell.
            let tail = column + 1;
            if tail < columns {
                // If the displaced cell was itself a wide head, its own
                // tail is orphaned.
                if self.grid[offset][ColumnOffset(tail)].width() == 2 && tail + 1 < columns {
                    self.grid[offset][ColumnOffset(tail + 1)].reset();
                }
                let attrs = self.attrs;
                let hyperlink = self.current_hyperlink;
                self.cell_mut(line, tail).reset_with(&attrs, hyperlink);
                if self.cursor.line == line && self.cursor.column == tail {
                    self.cursor.column = tail + 1;
                }
            } else {
                // No room at the margin: keep the cluster narrow.
                self.cell_mut(line, column).set_width(1);
            }
        }
    }

    /// Restore the wide-cell invariant around a cell that is about to be
    /// overwritten: clearing a tail resets its head, clearing a head
    /// resets its tail.
    fn clear_wide_pair(&mut self, line: usize, column: usize) {
        let columns = self.grid.column_count().0;
        let offset = LineOffset(line as i32);
        if column > 0
            && self.grid[offset][ColumnOffset(column)].empty()
            && self.grid[offset][ColumnOffset(column - 1)].width() == 2
        {
            self.grid[offset][ColumnOffset(column - 1)].reset();
        }
        if self.grid[offset][ColumnOffset(column)].width() == 2 && column + 1 < columns {
            self.grid[offset][ColumnOffset(column + 1)].reset();
        }
    }
}

#[cfg(test)]
mod tests;
