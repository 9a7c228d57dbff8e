//! Terminal cell types.
//!
//! A `Cell` is one grid position. The frequent data (primary codepoint,
//! foreground, background) lives inline; everything optional (grapheme
//! continuation codepoints, flags, underline color, hyperlink, image
//! fragment, non-default width) lives in a lazily boxed `CellExtra`.
//! A cell without extras is 24 bytes.

use bitflags::bitflags;

use crate::attrs::{GraphicsAttributes, GraphicsRendition};
use crate::color::Color;
use crate::hyperlink::HyperlinkId;
use crate::image::ImageFragment;

/// Maximum codepoints per grapheme cluster (primary + continuations).
pub const MAX_CODEPOINTS: usize = 7;

bitflags! {
    /// Per-cell SGR attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CellFlags: u16 {
        const BOLD              = 1 << 0;
        const FAINT             = 1 << 1;
        const ITALIC            = 1 << 2;
        const UNDERLINE         = 1 << 3;
        const BLINKING          = 1 << 4;
        const INVERSE           = 1 << 5;
        const HIDDEN            = 1 << 6;
        const CROSSED_OUT       = 1 << 7;
        const DOUBLY_UNDERLINED = 1 << 8;
        const CURLY_UNDERLINED  = 1 << 9;
        const DOTTED_UNDERLINE  = 1 << 10;
        const DASHED_UNDERLINE  = 1 << 11;
        const FRAMED            = 1 << 12;
        const ENCIRCLED         = 1 << 13;
        const OVERLINE          = 1 << 14;

        /// All underline styles; at most one is set at a time.
        const ANY_UNDERLINE = Self::UNDERLINE.bits()
            | Self::DOUBLY_UNDERLINED.bits()
            | Self::CURLY_UNDERLINED.bits()
            | Self::DOTTED_UNDERLINE.bits()
            | Self::DASHED_UNDERLINE.bits();
    }
}

impl Default for CellFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Rarely used cell data, allocated only when some field is non-default.
#[derive(Debug, Clone, PartialEq)]
pub struct CellExtra {
    /// Continuation codepoints forming a grapheme cluster with the primary.
    pub codepoints: Vec<char>,
    /// Color for underline decoration (`Color::Default` = follow foreground).
    pub underline_color: Color,
    /// OSC 8 hyperlink, as an id into the screen's interning table.
    pub hyperlink: Option<HyperlinkId>,
    /// One tile of a rasterized image placed over this cell.
    pub image: Option<ImageFragment>,
    /// SGR attribute flags.
    pub flags: CellFlags,
    /// Display width in columns (1 or 2).
    pub width: u8,
}

impl CellExtra {
    /// Create an extra block with all fields at their defaults.
    pub fn new() -> Self {
        Self {
            codepoints: Vec::new(),
            underline_color: Color::Default,
            hyperlink: None,
            image: None,
            flags: CellFlags::empty(),
            width: 1,
        }
    }
}

impl Default for CellExtra {
    fn default() -> Self {
        Self::new()
    }
}

/// One character position in the terminal grid.
///
/// The primary codepoint `'\0'` marks an empty cell (including the
/// reserved tail half of a wide cell).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    codepoint: char,
    fg: Color,
    bg: Color,
    extra: Option<Box<CellExtra>>,
}

const _: () = assert!(std::mem::size_of::<Cell>() <= 24);

impl Default for Cell {
    fn default() -> Self {
        Self {
            codepoint: '\0',
            fg: Color::Default,
            bg: Color::Default,
            extra: None,
        }
    }
}

impl Cell {
    /// The codepoint at cluster position `i`: the primary for `i == 0`,
    /// else the continuation at `i - 1`. `None` when out of range or the
    /// cell is empty.
    pub fn codepoint(&self, i: usize) -> Option<char> {
        if self.codepoint == '\0' {
            return None;
        }
        if i == 0 {
            return Some(self.codepoint);
        }
        self.extra.as_ref()?.codepoints.get(i - 1).copied()
    }

    /// Number of codepoints in the grapheme cluster (0 for an empty cell).
    pub fn codepoint_count(&self) -> usize {
        if self.codepoint == '\0' {
            return 0;
        }
        1 + self.extra.as_ref().map_or(0, |extra| extra.codepoints.len())
    }

    /// Display width in columns. Cells without extras are always width 1.
    pub fn width(&self) -> usize {
        self.extra.as_ref().map_or(1, |extra| extra.width as usize)
    }

    /// Whether the cell shows nothing: no codepoints and no image tile.
    pub fn empty(&self) -> bool {
        self.codepoint_count() == 0 && self.image_fragment().is_none()
    }

    /// Foreground color.
    pub fn foreground(&self) -> Color {
        self.fg
    }

    /// Background color.
    pub fn background(&self) -> Color {
        self.bg
    }

    /// Underline decoration color (`Color::Default` when unset).
    pub fn underline_color(&self) -> Color {
        self.extra
            .as_ref()
            .map_or(Color::Default, |extra| extra.underline_color)
    }

    /// SGR attribute flags.
    pub fn flags(&self) -> CellFlags {
        self.extra.as_ref().map_or_else(CellFlags::empty, |extra| extra.flags)
    }

    /// Hyperlink id, if any.
    pub fn hyperlink(&self) -> Option<HyperlinkId> {
        self.extra.as_ref().and_then(|extra| extra.hyperlink)
    }

    /// Image tile placed over this cell, if any.
    pub fn image_fragment(&self) -> Option<&ImageFragment> {
        self.extra.as_ref().and_then(|extra| extra.image.as_ref())
    }

    /// Clear the cell to all-default, dropping the extra block.
    pub fn reset(&mut self) {
        self.codepoint = '\0';
        self.fg = Color::Default;
        self.bg = Color::Default;
        self.extra = None;
    }

    /// Clear text and image, taking colors, flags, underline color, and
    /// hyperlink from the given attributes.
    pub fn reset_with(&mut self, attrs: &GraphicsAttributes, hyperlink: Option<HyperlinkId>) {
        self.codepoint = '\0';
        self.fg = attrs.fg;
        self.bg = attrs.bg;
        self.extra = None;
        if !attrs.flags.is_empty() {
            self.extra_mut().flags = attrs.flags;
        }
        if !attrs.underline_color.is_default() {
            self.extra_mut().underline_color = attrs.underline_color;
        }
        if hyperlink.is_some() {
            self.extra_mut().hyperlink = hyperlink;
        }
    }

    /// Replace the cell content: new primary codepoint, cleared
    /// continuation, the given width, the given attributes and hyperlink.
    /// Any image fragment is dropped.
    pub fn write(
        &mut self,
        attrs: &GraphicsAttributes,
        codepoint: char,
        width: usize,
        hyperlink: Option<HyperlinkId>,
    ) {
        self.codepoint = codepoint;
        self.fg = attrs.fg;
        self.bg = attrs.bg;
        if let Some(extra) = &mut self.extra {
            extra.codepoints.clear();
            extra.image = None;
        }
        self.set_width(width);
        if !attrs.flags.is_empty()
            || !attrs.underline_color.is_default()
            || hyperlink.is_some()
            || self.extra.is_some()
        {
            let extra = self.extra_mut();
            extra.flags = attrs.flags;
            extra.underline_color = attrs.underline_color;
            extra.hyperlink = hyperlink;
        }
    }

    /// Append a continuation codepoint to the grapheme cluster.
    ///
    /// Returns the width delta: `1` when the cluster transitions from
    /// narrow to wide (variation selector 16 requesting emoji
    /// presentation), otherwise `0`. Refused (returns `0`) on an empty
    /// cell or when the cluster already holds `MAX_CODEPOINTS` codepoints.
    pub fn append_codepoint(&mut self, codepoint: char) -> usize {
        if self.codepoint == '\0' {
            return 0;
        }
        let extra = self.extra_mut();
        if extra.codepoints.len() >= MAX_CODEPOINTS - 1 {
            return 0;
        }
        extra.codepoints.push(codepoint);
        if codepoint == '\u{FE0F}' && self.width() == 1 {
            self.set_width(2);
            return 1;
        }
        0
    }

    /// Set the display width.
    pub fn set_width(&mut self, width: usize) {
        debug_assert!(width >= 1 && width <= 2, "cell width must be 1 or 2, got {width}");
        if width != 1 || self.extra.is_some() {
            self.extra_mut().width = width as u8;
        }
    }

    /// Replace the SGR flags.
    pub fn set_flags(&mut self, flags: CellFlags) {
        if !flags.is_empty() || self.extra.is_some() {
            self.extra_mut().flags = flags;
        }
    }

    /// Set the foreground color.
    pub fn set_foreground(&mut self, color: Color) {
        self.fg = color;
    }

    /// Set the background color.
    pub fn set_background(&mut self, color: Color) {
        self.bg = color;
    }

    /// Set the underline decoration color.
    pub fn set_underline_color(&mut self, color: Color) {
        if !color.is_default() || self.extra.is_some() {
            self.extra_mut().underline_color = color;
        }
    }

    /// Set or clear the hyperlink id.
    pub fn set_hyperlink(&mut self, hyperlink: Option<HyperlinkId>) {
        if hyperlink.is_some() {
            self.extra_mut().hyperlink = hyperlink;
        } else if let Some(extra) = &mut self.extra {
            extra.hyperlink = None;
        }
    }

    /// Place an image tile over this cell.
    pub fn set_image_fragment(&mut self, fragment: ImageFragment) {
        self.extra_mut().image = Some(fragment);
    }

    /// Apply an SGR mutation to this cell's flags and colors.
    pub fn set_graphics_rendition(&mut self, sgr: GraphicsRendition) {
        let mut attrs = GraphicsAttributes {
            fg: self.fg,
            bg: self.bg,
            underline_color: self.underline_color(),
            flags: self.flags(),
        };
        attrs.apply(sgr);
        self.fg = attrs.fg;
        self.bg = attrs.bg;
        self.set_flags(attrs.flags);
        self.set_underline_color(attrs.underline_color);
    }

    /// The grapheme cluster encoded as UTF-8 (empty string for an empty cell).
    pub fn to_utf8(&self) -> String {
        let mut out = String::new();
        for i in 0..self.codepoint_count() {
            if let Some(ch) = self.codepoint(i) {
                out.push(ch);
            }
        }
        out
    }

    fn extra_mut(&mut self) -> &mut CellExtra {
        self.extra.get_or_insert_with(|| Box::new(CellExtra::new()))
    }

    #[cfg(test)]
    pub(crate) fn has_extra(&self) -> bool {
        self.extra.is_some()
    }
}
