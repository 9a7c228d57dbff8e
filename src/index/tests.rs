use super::{ColumnCount, ColumnOffset, Coordinate, LineCount, LineOffset};

#[test]
fn line_offset_arithmetic() {
    let line = LineOffset(3);
    assert_eq!(line + LineOffset(2), LineOffset(5));
    assert_eq!(line - LineOffset(5), LineOffset(-2));

    let mut line = LineOffset(0);
    line -= LineOffset(1);
    assert_eq!(line, LineOffset(-1));
}

#[test]
fn line_offset_negative_addresses_history() {
    assert!(LineOffset(-1) < LineOffset(0));
    assert!(LineOffset(-5) < LineOffset(-1));
}

#[test]
fn column_offset_arithmetic() {
    let col = ColumnOffset(7);
    assert_eq!(col + ColumnOffset(3), ColumnOffset(10));
    assert_eq!(col - ColumnOffset(7), ColumnOffset(0));
}

#[test]
fn counts_convert_to_offsets() {
    assert_eq!(LineCount(8).as_offset(), LineOffset(8));
    assert_eq!(ColumnCount(80).as_offset(), ColumnOffset(80));
}

#[test]
fn coordinate_ordering_is_lexicographic() {
    let a = Coordinate::new(LineOffset(0), ColumnOffset(5));
    let b = Coordinate::new(LineOffset(0), ColumnOffset(9));
    let c = Coordinate::new(LineOffset(1), ColumnOffset(0));
    let d = Coordinate::new(LineOffset(-2), ColumnOffset(80));

    assert!(a < b);
    assert!(b < c);
    assert!(d < a);
    assert!(d < c);
}

#[test]
fn coordinate_equality() {
    let a = Coordinate::new(LineOffset(2), ColumnOffset(3));
    let b = Coordinate::new(LineOffset(2), ColumnOffset(3));
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
}

#[test]
fn display_formatting() {
    assert_eq!(LineOffset(-3).to_string(), "-3");
    assert_eq!(ColumnOffset(12).to_string(), "12");
    let coord = Coordinate::new(LineOffset(-1), ColumnOffset(4));
    assert_eq!(coord.to_string(), "(-1, 4)");
}

#[test]
fn conversions_round_trip() {
    let line: LineOffset = (-4i32).into();
    assert_eq!(i32::from(line), -4);
    let col: ColumnOffset = 11usize.into();
    assert_eq!(usize::from(col), 11);
}
