use pretty_assertions::assert_eq;
use quill_ir::Position;

use super::Cursor;

#[test]
fn tracks_lines_and_char_columns() {
    let mut cursor = Cursor::new("aé\nb");
    cursor.advance_n(2);
    assert_eq!(cursor.position(), Position::new(1, 3));
    cursor.advance();
    assert_eq!(cursor.position(), Position::new(2, 1));
    assert_eq!(cursor.current(), 'b');
}

#[test]
fn reads_past_end_as_nul() {
    let mut cursor = Cursor::new("x");
    assert_eq!(cursor.peek(), '\0');
    cursor.advance();
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), '\0');
    cursor.advance();
    assert_eq!(cursor.offset(), 1);
}

#[test]
fn interior_nul_is_not_eof() {
    let cursor = Cursor::new("\0a");
    assert_eq!(cursor.current(), '\0');
    assert!(!cursor.is_eof());
}

#[test]
fn eat_through_reports_missing_terminator() {
    let mut cursor = Cursor::new("abc --> rest");
    assert!(cursor.eat_through("-->"));
    assert_eq!(cursor.rest(), " rest");

    let mut cursor = Cursor::new("never closed");
    assert!(!cursor.eat_through("-->"));
    assert!(cursor.is_eof());
}

#[test]
fn snapshot_restores_position() {
    let mut cursor = Cursor::new("hello");
    let saved = cursor;
    cursor.eat_while(char::is_alphabetic);
    assert_eq!(cursor.slice_from(saved.offset()), "hello");
    cursor = saved;
    assert_eq!(cursor.current(), 'h');
}
