//! Parser sink: `vte::ansi::Handler` for `Screen`.
//!
//! The escape-sequence parser lives outside this crate; callers feed PTY
//! bytes through `vte::ansi::Processor::advance(&mut screen, bytes)` and
//! the methods below translate recognised sequences into screen
//! operations. Everything without a grid-side effect keeps vte's default
//! no-op implementation.

use vte::ansi::{
    Attr, ClearMode, Color as AnsiColor, Handler, Hyperlink as AnsiHyperlink, LineClearMode,
    NamedColor, NamedPrivateMode, PrivateMode,
};

use crate::attrs::GraphicsRendition;
use crate::color::{Color, Rgb};
use crate::hyperlink::Hyperlink;

use super::{EraseMode, LineEraseMode, Screen};

/// Narrow vte's color union to the cell color model. Named entries other
/// than the default foreground/background map onto their palette indices.
fn convert_color(color: AnsiColor) -> Color {
    match color {
        AnsiColor::Named(NamedColor::Foreground | NamedColor::Background) => Color::Default,
        AnsiColor::Named(named) => {
            let index = named as usize;
            if index < 256 {
                Color::Indexed(index as u8)
            } else {
                Color::Default
            }
        }
        AnsiColor::Indexed(index) => Color::Indexed(index),
        AnsiColor::Spec(rgb) => Color::Rgb(Rgb::new(rgb.r, rgb.g, rgb.b)),
    }
}

impl Handler for Screen {
    #[inline]
    fn input(&mut self, c: char) {
        self.write_char(c);
    }

    fn goto(&mut self, line: i32, col: usize) {
        Screen::goto(self, line.max(0) as usize, col);
    }

    fn goto_line(&mut self, line: i32) {
        let column = self.cursor.column;
        Screen::goto(self, line.max(0) as usize, column);
    }

    fn goto_col(&mut self, col: usize) {
        let line = self.cursor.line;
        Screen::goto(self, line, col);
    }

    fn move_up(&mut self, n: usize) {
        Screen::move_up(self, n);
    }

    fn move_down(&mut self, n: usize) {
        Screen::move_down(self, n);
    }

    fn move_forward(&mut self, n: usize) {
        Screen::move_forward(self, n);
    }

    fn move_backward(&mut self, n: usize) {
        Screen::move_backward(self, n);
    }

    fn move_down_and_cr(&mut self, n: usize) {
        Screen::move_down(self, n);
        self.carriage_return();
    }

    fn move_up_and_cr(&mut self, n: usize) {
        Screen::move_up(self, n);
        self.carriage_return();
    }

    fn put_tab(&mut self, count: u16) {
        for _ in 0..count {
            self.horizontal_tab();
        }
    }

    #[inline]
    fn backspace(&mut self) {
        Screen::backspace(self);
    }

    #[inline]
    fn carriage_return(&mut self) {
        Screen::carriage_return(self);
    }

    #[inline]
    fn linefeed(&mut self) {
        Screen::linefeed(self);
    }

    fn newline(&mut self) {
        Screen::newline(self);
    }

    /// SUB: rendered as a space per ECMA-48.
    fn substitute(&mut self) {
        self.write_char(' ');
    }

    fn terminal_attribute(&mut self, attr: Attr) {
        match attr {
            Attr::Reset => self.set_graphics_rendition(GraphicsRendition::Reset),
            Attr::Bold => self.set_graphics_rendition(GraphicsRendition::Bold),
            Attr::Dim => self.set_graphics_rendition(GraphicsRendition::Faint),
            Attr::Italic => self.set_graphics_rendition(GraphicsRendition::Italic),
            Attr::Underline => self.set_graphics_rendition(GraphicsRendition::Underline),
            Attr::DoubleUnderline => {
                self.set_graphics_rendition(GraphicsRendition::DoublyUnderlined);
            }
            Attr::Undercurl => self.set_graphics_rendition(GraphicsRendition::CurlyUnderlined),
            Attr::DottedUnderline => {
                self.set_graphics_rendition(GraphicsRendition::DottedUnderline);
            }
            Attr::DashedUnderline => {
                self.set_graphics_rendition(GraphicsRendition::DashedUnderline);
            }
            Attr::BlinkSlow | Attr::BlinkFast => {
                self.set_graphics_rendition(GraphicsRendition::Blinking);
            }
            Attr::Reverse => self.set_graphics_rendition(GraphicsRendition::Inverse),
            Attr::Hidden => self.set_graphics_rendition(GraphicsRendition::Hidden),
            Attr::Strike => self.set_graphics_rendition(GraphicsRendition::CrossedOut),
            Attr::CancelBold => self.set_graphics_rendition(GraphicsRendition::NoBold),
            Attr::CancelBoldDim => self.set_graphics_rendition(GraphicsRendition::Normal),
            Attr::CancelItalic => self.set_graphics_rendition(GraphicsRendition::NoItalic),
            Attr::CancelUnderline => self.set_graphics_rendition(GraphicsRendition::NoUnderline),
            Attr::CancelBlink => self.set_graphics_rendition(GraphicsRendition::NoBlinking),
            Attr::CancelReverse => self.set_graphics_rendition(GraphicsRendition::NoInverse),
            Attr::CancelHidden => self.set_graphics_rendition(GraphicsRendition::NoHidden),
            Attr::CancelStrike => self.set_graphics_rendition(GraphicsRendition::NoCrossedOut),
            Attr::Foreground(color) => self.set_foreground(convert_color(color)),
            Attr::Background(color) => self.set_background(convert_color(color)),
            Attr::UnderlineColor(color) => {
                self.set_underline_color(color.map_or(Color::Default, convert_color));
            }
        }
    }

    fn set_hyperlink(&mut self, hyperlink: Option<AnsiHyperlink>) {
        Screen::set_hyperlink(
            self,
            hyperlink.map(|link| Hyperlink {
                id: link.id,
                uri: link.uri,
            }),
        );
    }

    fn clear_screen(&mut self, mode: ClearMode) {
        let mode = match mode {
            ClearMode::Below => EraseMode::Below,
            ClearMode::Above => EraseMode::Above,
            ClearMode::All => EraseMode::All,
            ClearMode::Saved => EraseMode::Scrollback,
        };
        self.erase_display(mode);
    }

    fn clear_line(&mut self, mode: LineClearMode) {
        let mode = match mode {
            LineClearMode::Right => LineEraseMode::Right,
            LineClearMode::Left => LineEraseMode::Left,
            LineClearMode::All => LineEraseMode::All,
        };
        self.erase_line(mode);
    }

    fn erase_chars(&mut self, count: usize) {
        Screen::erase_chars(self, count);
    }

    fn delete_chars(&mut self, count: usize) {
        Screen::delete_chars(self, count);
    }

    fn insert_blank(&mut self, count: usize) {
        Screen::insert_blank(self, count);
    }

    fn set_private_mode(&mut self, mode: PrivateMode) {
        if let PrivateMode::Named(NamedPrivateMode::LineWrap) = mode {
            self.set_auto_wrap(true);
        }
    }

    fn unset_private_mode(&mut self, mode: PrivateMode) {
        if let PrivateMode::Named(NamedPrivateMode::LineWrap) = mode {
            self.set_auto_wrap(false);
        }
    }
}
