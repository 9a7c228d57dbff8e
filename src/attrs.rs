//! Graphics rendition state.
//!
//! `GraphicsAttributes` is the "current SGR state" the screen write path
//! stamps onto every cell it touches. `GraphicsRendition` is the catalog of
//! SGR mutations that flip flags; color changes arrive through dedicated
//! setters instead of catalog entries.

use crate::cell::CellFlags;
use crate::color::Color;

/// The attribute set applied to newly written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphicsAttributes {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
    /// Underline decoration color (`Color::Default` = follow foreground).
    pub underline_color: Color,
    /// SGR flags.
    pub flags: CellFlags,
}

/// An SGR mutation.
///
/// Only one underline style is active at a time: setting any underline
/// variant clears the others first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsRendition {
    /// SGR 0: everything back to defaults.
    Reset,
    Bold,
    Faint,
    Italic,
    Underline,
    Blinking,
    Inverse,
    Hidden,
    CrossedOut,
    DoublyUnderlined,
    CurlyUnderlined,
    DottedUnderline,
    DashedUnderline,
    Framed,
    Encircled,
    Overline,
    /// SGR 22: neither bold nor faint.
    Normal,
    NoBold,
    NoItalic,
    NoUnderline,
    NoBlinking,
    NoInverse,
    NoHidden,
    NoCrossedOut,
    NoFramed,
    NoOverline,
}

impl GraphicsAttributes {
    /// Apply an SGR mutation to this attribute set.
    pub fn apply(&mut self, sgr: GraphicsRendition) {
        use GraphicsRendition::*;

        let flags = &mut self.flags;
        match sgr {
            Reset => *self = Self::default(),
            Bold => flags.insert(CellFlags::BOLD),
            Faint => flags.insert(CellFlags::FAINT),
            Italic => flags.insert(CellFlags::ITALIC),
            Underline => {
                flags.remove(CellFlags::ANY_UNDERLINE);
                flags.insert(CellFlags::UNDERLINE);
            }
            Blinking => flags.insert(CellFlags::BLINKING),
            Inverse => flags.insert(CellFlags::INVERSE),
            Hidden => flags.insert(CellFlags::HIDDEN),
            CrossedOut => flags.insert(CellFlags::CROSSED_OUT),
            DoublyUnderlined => {
                flags.remove(CellFlags::ANY_UNDERLINE);
                flags.insert(CellFlags::DOUBLY_UNDERLINED);
            }
            CurlyUnderlined => {
                flags.remove(CellFlags::ANY_UNDERLINE);
                flags.insert(CellFlags::CURLY_UNDERLINED);
            }
            DottedUnderline => {
                flags.remove(CellFlags::ANY_UNDERLINE);
                flags.insert(CellFlags::DOTTED_UNDERLINE);
            }
            DashedUnderline => {
                flags.remove(CellFlags::ANY_UNDERLINE);
                flags.insert(CellFlags::DASHED_UNDERLINE);
            }
            Framed => flags.insert(CellFlags::FRAMED),
            Encircled => flags.insert(CellFlags::ENCIRCLED),
            Overline => flags.insert(CellFlags::OVERLINE),
            Normal => flags.remove(CellFlags::BOLD | CellFlags::FAINT),
            NoBold => flags.remove(CellFlags::BOLD),
            NoItalic => flags.remove(CellFlags::ITALIC),
            NoUnderline => flags.remove(CellFlags::ANY_UNDERLINE),
            NoBlinking => flags.remove(CellFlags::BLINKING),
            NoInverse => flags.remove(CellFlags::INVERSE),
            NoHidden => flags.remove(CellFlags::HIDDEN),
            NoCrossedOut => flags.remove(CellFlags::CROSSED_OUT),
            NoFramed => flags.remove(CellFlags::FRAMED | CellFlags::ENCIRCLED),
            NoOverline => flags.remove(CellFlags::OVERLINE),
        }
    }
}
