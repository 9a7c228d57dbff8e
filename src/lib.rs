//! Terminal cell, grid, and selection core.
//!
//! This crate provides the data model at the heart of a terminal emulator:
//! a compact per-cell representation, a fixed-width page with bounded
//! scrollback addressed by signed line offsets, a `Screen` facade that an
//! external escape-sequence parser drives (via `vte::ansi::Handler`), and a
//! four-mode text selection state machine. It contains no GUI, PTY, or
//! rendering code.
//!
//! Coordinates are absolute across scrollback motion: line `0` is the top
//! of the visible page, negative lines address history (`-1` is the newest
//! history line), so a selection anchored before a scroll still refers to
//! the same text afterwards.

#![deny(unsafe_code)]

pub mod attrs;
pub mod cell;
pub mod color;
pub mod grid;
pub mod hyperlink;
pub mod image;
pub mod index;
pub mod screen;
pub mod selection;

pub use attrs::{GraphicsAttributes, GraphicsRendition};
pub use cell::{Cell, CellExtra, CellFlags, MAX_CODEPOINTS};
pub use color::{Color, Rgb};
pub use grid::{Grid, LineAttributes, Row, ScrollbackBuffer};
pub use hyperlink::{Hyperlink, HyperlinkId, HyperlinkStore};
pub use image::{ImageFragment, RasterizedImage};
pub use index::{ColumnCount, ColumnOffset, Coordinate, LineCount, LineOffset};
pub use screen::{EraseMode, LineEraseMode, Screen};
pub use selection::{Selection, SelectionMode, SelectionRange, SelectionState};
