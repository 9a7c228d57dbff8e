use std::sync::Arc;

use super::{EraseMode, LineEraseMode, Screen};
use crate::attrs::GraphicsRendition;
use crate::cell::CellFlags;
use crate::color::Color;
use crate::hyperlink::Hyperlink;
use crate::image::RasterizedImage;
use crate::index::{ColumnCount, ColumnOffset, Coordinate, LineCount, LineOffset};

fn screen(lines: usize, columns: usize, history: usize) -> Screen {
    Screen::new(LineCount(lines), ColumnCount(columns), LineCount(history))
}

fn cell_char(screen: &Screen, line: i32, column: usize) -> Option<char> {
    screen.at(LineOffset(line), ColumnOffset(column)).codepoint(0)
}

#[test]
fn write_char_advances_cursor() {
    let mut screen = screen(3, 11, 0);
    screen.write_char('A');
    assert_eq!(cell_char(&screen, 0, 0), Some('A'));
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(1))
    );
}

#[test]
fn write_str_fills_lines_with_auto_wrap() {
    let mut screen = screen(3, 11, 5);
    screen.write_str("12345,67890ab,cdefg,hi12345,67890");

    assert_eq!(screen.line_text(LineOffset(0)), "12345,67890");
    assert_eq!(screen.line_text(LineOffset(1)), "ab,cdefg,hi");
    assert_eq!(screen.line_text(LineOffset(2)), "12345,67890");
    assert_eq!(screen.history_line_count(), LineCount(0));

    // Wrapped continuations carry the line-level flag; the first line
    // does not.
    assert!(!screen.is_line_wrapped(LineOffset(0)));
    assert!(screen.is_line_wrapped(LineOffset(1)));
    assert!(screen.is_line_wrapped(LineOffset(2)));
}

#[test]
fn crlf_separated_lines_are_not_wrapped() {
    let mut screen = screen(3, 11, 5);
    screen.write_str("foo\r\nbar");
    assert_eq!(screen.line_text(LineOffset(0)), "foo");
    assert_eq!(screen.line_text(LineOffset(1)), "bar");
    assert!(!screen.is_line_wrapped(LineOffset(1)));
}

#[test]
fn linefeed_at_bottom_scrolls_into_history() {
    let mut screen = screen(3, 11, 5);
    screen.write_str("12345,67890ab,cdefg,hi12345,67890");
    screen.write_str("foo\r\nbar\r\n");

    assert_eq!(screen.history_line_count(), LineCount(3));
    assert_eq!(screen.line_text(LineOffset(-3)), "12345,67890");
    assert_eq!(screen.line_text(LineOffset(-2)), "ab,cdefg,hi");
    assert_eq!(screen.line_text(LineOffset(-1)), "12345,67890");
    assert_eq!(screen.line_text(LineOffset(0)), "foo");
    assert_eq!(screen.line_text(LineOffset(1)), "bar");
    assert_eq!(screen.line_text(LineOffset(2)), "");
}

#[test]
fn scrolled_out_line_keeps_wrap_flag() {
    let mut screen = screen(2, 4, 5);
    screen.write_str("abcdef");
    // Line 1 ("ef") is a continuation of line 0.
    assert!(screen.is_line_wrapped(LineOffset(1)));

    screen.write_str("\r\n\r\n");
    assert!(screen.is_line_wrapped(LineOffset(-1)));
}

#[test]
fn wide_char_writes_head_and_reserved_tail() {
    let mut screen = screen(3, 11, 0);
    screen.write_char('好');

    let head = screen.at(LineOffset(0), ColumnOffset(0));
    assert_eq!(head.codepoint(0), Some('好'));
    assert_eq!(head.width(), 2);

    let tail = screen.at(LineOffset(0), ColumnOffset(1));
    assert!(tail.empty());
    assert_eq!(tail.codepoint_count(), 0);

    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(2))
    );
}

#[test]
fn wide_char_at_margin_wraps_whole_pair() {
    let mut screen = screen(3, 5, 0);
    screen.write_str("abcd");
    screen.write_char('好');

    // The wide pair does not straddle the margin; it wraps.
    assert_eq!(cell_char(&screen, 0, 4), None);
    assert_eq!(cell_char(&screen, 1, 0), Some('好'));
    assert!(screen.is_line_wrapped(LineOffset(1)));
}

#[test]
fn overwriting_tail_clears_head() {
    let mut screen = screen(3, 11, 0);
    screen.write_char('好');
    screen.goto(0, 1);
    screen.write_char('X');

    assert!(screen.at(LineOffset(0), ColumnOffset(0)).empty());
    assert_eq!(cell_char(&screen, 0, 1), Some('X'));
}

#[test]
fn overwriting_head_clears_tail_reservation() {
    let mut screen = screen(3, 11, 0);
    screen.write_char('好');
    screen.goto(0, 0);
    screen.write_char('Y');

    assert_eq!(cell_char(&screen, 0, 0), Some('Y'));
    assert_eq!(screen.at(LineOffset(0), ColumnOffset(0)).width(), 1);
    assert!(screen.at(LineOffset(0), ColumnOffset(1)).empty());
}

#[test]
fn zero_width_codepoint_joins_previous_cell() {
    let mut screen = screen(3, 11, 0);
    screen.write_char('e');
    screen.write_char('\u{0301}');

    let cell = screen.at(LineOffset(0), ColumnOffset(0));
    assert_eq!(cell.codepoint_count(), 2);
    assert_eq!(cell.to_utf8(), "e\u{0301}");
    // The combining mark does not advance the cursor.
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(1))
    );
}

#[test]
fn zero_width_joins_pending_wrap_cell() {
    let mut screen = screen(3, 4, 0);
    screen.write_str("abcd");
    // Wrap is pending; the combining mark lands on the last cell.
    screen.write_char('\u{0301}');
    assert_eq!(screen.at(LineOffset(0), ColumnOffset(3)).to_utf8(), "d\u{0301}");
}

#[test]
fn variation_selector_widens_cell_and_reserves_tail() {
    let mut screen = screen(3, 11, 0);
    screen.write_char('☀');
    assert_eq!(screen.at(LineOffset(0), ColumnOffset(0)).width(), 1);

    screen.write_char('\u{FE0F}');
    let cell = screen.at(LineOffset(0), ColumnOffset(0));
    assert_eq!(cell.width(), 2);
    assert!(screen.at(LineOffset(0), ColumnOffset(1)).empty());
    // Cursor skipped over the new tail.
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(2))
    );
}

#[test]
fn auto_wrap_off_pins_to_margin() {
    let mut screen = screen(3, 4, 0);
    screen.set_auto_wrap(false);
    screen.write_str("abcdef");

    // Everything past the margin overwrote the last cell.
    assert_eq!(screen.line_text(LineOffset(0)), "abcf");
    assert_eq!(screen.line_text(LineOffset(1)), "");
}

#[test]
fn attributes_are_stamped_onto_cells() {
    let mut screen = screen(3, 11, 0);
    screen.set_graphics_rendition(GraphicsRendition::Bold);
    screen.set_foreground(Color::Indexed(1));
    screen.write_char('x');

    let cell = screen.at(LineOffset(0), ColumnOffset(0));
    assert!(cell.flags().contains(CellFlags::BOLD));
    assert_eq!(cell.foreground(), Color::Indexed(1));

    screen.set_graphics_rendition(GraphicsRendition::Reset);
    screen.write_char('y');
    let cell = screen.at(LineOffset(0), ColumnOffset(1));
    assert!(cell.flags().is_empty());
    assert_eq!(cell.foreground(), Color::Default);
}

#[test]
fn hyperlink_applies_to_written_cells() {
    let mut screen = screen(3, 11, 0);
    screen.set_hyperlink(Some(Hyperlink {
        id: None,
        uri: "https://example.com".into(),
    }));
    screen.write_str("ab");
    screen.set_hyperlink(None);
    screen.write_char('c');

    let id = screen.at(LineOffset(0), ColumnOffset(0)).hyperlink().unwrap();
    assert_eq!(screen.at(LineOffset(0), ColumnOffset(1)).hyperlink(), Some(id));
    assert_eq!(screen.at(LineOffset(0), ColumnOffset(2)).hyperlink(), None);
    assert_eq!(screen.hyperlinks().get(id).unwrap().uri, "https://example.com");
}

#[test]
fn same_hyperlink_interns_once() {
    let mut screen = screen(3, 11, 0);
    let link = Hyperlink {
        id: Some("g1".into()),
        uri: "https://example.com".into(),
    };
    screen.set_hyperlink(Some(link.clone()));
    let first = screen.current_hyperlink().unwrap();
    screen.set_hyperlink(None);
    screen.set_hyperlink(Some(link));
    assert_eq!(screen.current_hyperlink(), Some(first));
    assert_eq!(screen.hyperlinks().len(), 1);
}

#[test]
fn erase_line_variants() {
    let mut screen = screen(3, 10, 0);
    screen.write_str("ABCDEFGHIJ");
    screen.goto(0, 5);

    screen.erase_line(LineEraseMode::Right);
    assert_eq!(screen.line_text(LineOffset(0)), "ABCDE");

    let mut screen = self::screen(3, 10, 0);
    screen.write_str("ABCDEFGHIJ");
    screen.goto(0, 5);
    screen.erase_line(LineEraseMode::Left);
    assert_eq!(screen.line_text(LineOffset(0)), "GHIJ");

    let mut screen = self::screen(3, 10, 0);
    screen.write_str("ABCDEFGHIJ");
    screen.goto(0, 5);
    screen.erase_line(LineEraseMode::All);
    assert_eq!(screen.line_text(LineOffset(0)), "");
}

#[test]
fn erase_uses_current_background() {
    let mut screen = screen(3, 10, 0);
    screen.write_str("ABCDEFGHIJ");
    screen.goto(0, 5);
    screen.set_background(Color::Indexed(3));
    screen.erase_line(LineEraseMode::Right);

    let erased = screen.at(LineOffset(0), ColumnOffset(7));
    assert!(erased.empty());
    assert_eq!(erased.background(), Color::Indexed(3));
    // Cells before the cursor keep their original background.
    assert_eq!(screen.at(LineOffset(0), ColumnOffset(0)).background(), Color::Default);
}

#[test]
fn erase_display_below_and_above() {
    let mut screen = screen(3, 5, 0);
    screen.write_str("aaaaabbbbbccccc");
    screen.goto(1, 2);
    screen.erase_display(EraseMode::Below);
    assert_eq!(screen.line_text(LineOffset(0)), "aaaaa");
    assert_eq!(screen.line_text(LineOffset(1)), "bb");
    assert_eq!(screen.line_text(LineOffset(2)), "");

    let mut screen = self::screen(3, 5, 0);
    screen.write_str("aaaaabbbbbccccc");
    screen.goto(1, 2);
    screen.erase_display(EraseMode::Above);
    assert_eq!(screen.line_text(LineOffset(0)), "");
    assert_eq!(screen.line_text(LineOffset(1)), "bb");
    // Note: erase-above clears through the cursor column inclusive.
    assert_eq!(cell_char(&screen, 1, 3), Some('b'));
    assert_eq!(screen.line_text(LineOffset(2)), "ccccc");
}

#[test]
fn erase_display_scrollback_only_drops_history() {
    let mut screen = screen(2, 6, 5);
    screen.write_str("one\r\ntwo\r\nthree");
    assert!(screen.history_line_count().0 > 0);

    screen.erase_display(EraseMode::Scrollback);
    assert_eq!(screen.history_line_count(), LineCount(0));
    assert_eq!(screen.line_text(LineOffset(1)), "three");
}

#[test]
fn erase_display_all_clears_page_not_history() {
    let mut screen = screen(2, 6, 5);
    screen.write_str("one\r\ntwo\r\nthree");
    let history = screen.history_line_count();

    screen.erase_display(EraseMode::All);
    assert_eq!(screen.history_line_count(), history);
    assert_eq!(screen.line_text(LineOffset(0)), "");
    assert_eq!(screen.line_text(LineOffset(1)), "");
}

#[test]
fn erase_chars_does_not_shift() {
    let mut screen = screen(3, 10, 0);
    screen.write_str("ABCDEFGHIJ");
    screen.goto(0, 2);
    screen.erase_chars(5);
    assert_eq!(screen.line_text(LineOffset(0)), "ABHIJ");
    assert_eq!(cell_char(&screen, 0, 7), Some('H'));
}

#[test]
fn insert_blank_shifts_right() {
    let mut screen = screen(3, 10, 0);
    screen.write_str("ABCDE");
    screen.goto(0, 1);
    screen.insert_blank(3);

    assert_eq!(cell_char(&screen, 0, 0), Some('A'));
    assert!(screen.at(LineOffset(0), ColumnOffset(1)).empty());
    assert!(screen.at(LineOffset(0), ColumnOffset(3)).empty());
    assert_eq!(cell_char(&screen, 0, 4), Some('B'));
    assert_eq!(cell_char(&screen, 0, 7), Some('E'));
}

#[test]
fn delete_chars_shifts_left() {
    let mut screen = screen(3, 10, 0);
    screen.write_str("ABCDE");
    screen.goto(0, 1);
    screen.delete_chars(2);

    assert_eq!(cell_char(&screen, 0, 0), Some('A'));
    assert_eq!(cell_char(&screen, 0, 1), Some('D'));
    assert_eq!(cell_char(&screen, 0, 2), Some('E'));
    assert!(screen.at(LineOffset(0), ColumnOffset(3)).empty());
}

#[test]
fn tab_advances_to_eight_column_stops() {
    let mut screen = screen(3, 20, 0);
    screen.write_str("ab\tx");
    assert_eq!(cell_char(&screen, 0, 8), Some('x'));

    screen.write_str("\t\ty");
    // Stops at 16, then the last column (19).
    assert_eq!(cell_char(&screen, 0, 19), Some('y'));
}

#[test]
fn backspace_resolves_pending_wrap() {
    let mut screen = screen(3, 4, 0);
    screen.write_str("abcd");
    screen.backspace();
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(3))
    );
    screen.backspace();
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(2))
    );
}

#[test]
fn cursor_motion_is_clamped() {
    let mut screen = screen(3, 10, 0);
    screen.goto(99, 99);
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(2), ColumnOffset(9))
    );

    screen.move_up(99);
    screen.move_backward(99);
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(0), ColumnOffset(0))
    );

    screen.move_down(1);
    screen.move_forward(3);
    assert_eq!(
        screen.cursor_position(),
        Coordinate::new(LineOffset(1), ColumnOffset(3))
    );
}

#[test]
fn place_image_stamps_fragments() {
    let mut screen = screen(3, 10, 0);
    let image = Arc::new(RasterizedImage::new(
        LineCount(2),
        ColumnCount(3),
        vec![0u8; 24],
    ));
    screen.goto(1, 4);
    screen.place_image(Arc::clone(&image));

    for line in 1..3 {
        for column in 4..7 {
            let cell = screen.at(LineOffset(line), ColumnOffset(column));
            let fragment = cell.image_fragment().expect("fragment missing");
            assert_eq!(
                fragment.offset(),
                ((line - 1) as usize, column - 4)
            );
            assert!(!cell.empty());
        }
    }
    // Outside the rectangle: untouched.
    assert!(screen.at(LineOffset(0), ColumnOffset(4)).image_fragment().is_none());
    assert!(screen.at(LineOffset(1), ColumnOffset(7)).image_fragment().is_none());
}

#[test]
fn writing_text_drops_image_fragment() {
    let mut screen = screen(3, 10, 0);
    let image = Arc::new(RasterizedImage::new(LineCount(1), ColumnCount(1), vec![0u8; 4]));
    screen.place_image(image);
    assert!(screen.at(LineOffset(0), ColumnOffset(0)).image_fragment().is_some());

    screen.goto(0, 0);
    screen.write_char('x');
    assert!(screen.at(LineOffset(0), ColumnOffset(0)).image_fragment().is_none());
}

#[test]
fn selection_over_screen_grid() {
    use crate::selection::SelectionMode;

    let mut screen = screen(3, 11, 5);
    screen.write_str("12345,67890ab,cdefg,hi12345,67890");

    let mut selection = screen.start_selection(
        SelectionMode::Linear,
        ",",
        Coordinate::new(LineOffset(1), ColumnOffset(1)),
    );
    selection.extend(LineOffset(1), ColumnOffset(3));
    selection.stop();

    let mut text = String::new();
    selection.render(|_, cell| text.push_str(&cell.to_utf8()));
    assert_eq!(text, "b,c");
}
