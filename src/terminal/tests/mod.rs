//! Terminal emulator tests.
//!
//! Drive [`TerminalBuffer`] with raw byte sequences and check the grid.

use super::types::{Color, NamedColor};
use super::TerminalBuffer;

fn feed(width: usize, height: usize, bytes: &[u8]) -> TerminalBuffer {
    let mut buffer = TerminalBuffer::new(width, height);
    buffer.process(bytes);
    buffer
}

fn line(buffer: &TerminalBuffer, row: usize) -> String {
    buffer.grid().line(row)
}

// === Cursor ===

#[test]
fn cursor_position_is_one_based() {
    let buffer = feed(20, 5, b"\x1b[3;5HX");
    assert_eq!(line(&buffer, 2), "    X");
    assert_eq!((buffer.cursor_row(), buffer.cursor_col()), (2, 5));
}

#[test]
fn cursor_position_defaults_to_home() {
    let buffer = feed(10, 3, b"abc\r\nxyz\x1b[HQ");
    assert_eq!(line(&buffer, 0), "Qbc");
}

#[test]
fn relative_moves_clamp_to_screen() {
    let buffer = feed(10, 3, b"\x1b[99B\x1b[99C\x1b[2A");
    assert_eq!((buffer.cursor_row(), buffer.cursor_col()), (0, 9));
}

#[test]
fn horizontal_and_vertical_absolute() {
    let buffer = feed(10, 5, b"\x1b[4G\x1b[3dZ");
    assert_eq!(line(&buffer, 2), "   Z");
}

#[test]
fn dec_save_restore_cursor() {
    let buffer = feed(10, 3, b"ab\x1b7\r\nxyz\x1b8c");
    assert_eq!(line(&buffer, 0), "abc");
}

// === Editing ===

#[test]
fn clear_screen_and_home() {
    let buffer = feed(10, 3, b"one\r\ntwo\x1b[2J\x1b[Hnew");
    assert_eq!(line(&buffer, 0), "new");
    assert_eq!(line(&buffer, 1), "");
}

#[test]
fn erase_line_to_end() {
    let buffer = feed(10, 1, b"abcdef\x1b[3G\x1b[K");
    assert_eq!(line(&buffer, 0), "ab");
}

#[test]
fn backspace_overwrites_previous_cell() {
    let buffer = feed(10, 1, b"abc\x08\x08X");
    assert_eq!(line(&buffer, 0), "aXc");
}

#[test]
fn delete_and_insert_characters() {
    let buffer = feed(10, 1, b"abcdef\x1b[2G\x1b[2P");
    assert_eq!(line(&buffer, 0), "adef");

    let buffer = feed(10, 1, b"abc\x1b[1G\x1b[2@");
    assert_eq!(line(&buffer, 0), "  abc");
}

// === Scrolling ===

#[test]
fn output_scrolls_when_screen_is_full() {
    let buffer = feed(10, 2, b"1\r\n2\r\n3");
    assert_eq!(line(&buffer, 0), "2");
    assert_eq!(line(&buffer, 1), "3");
}

#[test]
fn scroll_region_keeps_status_line() {
    // Region is rows 1-2; row 3 stays put
    let buffer = feed(10, 3, b"\x1b[3;1Hstatus\x1b[1;2r\x1b[1;1Ha\r\nb\r\nc");
    assert_eq!(line(&buffer, 0), "b");
    assert_eq!(line(&buffer, 1), "c");
    assert_eq!(line(&buffer, 2), "status");
}

#[test]
fn reverse_index_scrolls_down() {
    let buffer = feed(10, 2, b"top\x1b[H\x1bM");
    assert_eq!(line(&buffer, 0), "");
    assert_eq!(line(&buffer, 1), "top");
}

// === Style ===

#[test]
fn sgr_sets_named_colors_and_bold() {
    let buffer = feed(10, 1, b"\x1b[1;31mR\x1b[0mN");
    let row = buffer.row(0).unwrap();
    assert_eq!(row[0].style.fg, Color::Named(NamedColor::Red));
    assert!(row[0].style.bold);
    assert_eq!(row[1].style.fg, Color::Default);
    assert!(!row[1].style.bold);
}

#[test]
fn sgr_bright_and_background_colors() {
    let buffer = feed(10, 1, b"\x1b[92;104mX");
    let cell = buffer.row(0).unwrap()[0];
    assert_eq!(cell.style.fg, Color::Named(NamedColor::BrightGreen));
    assert_eq!(cell.style.bg, Color::Named(NamedColor::BrightBlue));
}

#[test]
fn sgr_extended_colors() {
    let buffer = feed(10, 1, b"\x1b[38;5;196mA\x1b[48;2;1;2;3mB\x1b[38:2::9:8:7mC");
    let row = buffer.row(0).unwrap();
    assert_eq!(row[0].style.fg, Color::Rgb(255, 0, 0));
    assert_eq!(row[1].style.bg, Color::Rgb(1, 2, 3));
    assert_eq!(row[2].style.fg, Color::Rgb(9, 8, 7));
}

#[test]
fn sgr_extended_color_does_not_swallow_following_attributes() {
    let buffer = feed(10, 1, b"\x1b[38;5;2;1mX");
    let cell = buffer.row(0).unwrap()[0];
    assert_eq!(cell.style.fg, Color::Named(NamedColor::Green));
    assert!(cell.style.bold);
}

#[test]
fn sgr_italic_and_resets() {
    let buffer = feed(10, 1, b"\x1b[3mI\x1b[23mN");
    let row = buffer.row(0).unwrap();
    assert!(row[0].style.italic);
    assert!(!row[1].style.italic);
}

#[test]
fn reverse_video_swaps_colors() {
    let buffer = feed(10, 1, b"\x1b[31;42;7mX");
    let cell = buffer.row(0).unwrap()[0];
    assert_eq!(cell.style.fg, Color::Named(NamedColor::Green));
    assert_eq!(cell.style.bg, Color::Named(NamedColor::Red));
}

// === Parser behaviour ===

#[test]
fn escape_sequence_split_across_chunks() {
    let mut buffer = TerminalBuffer::new(10, 1);
    buffer.process(b"\x1b[3");
    buffer.process(b"1mX");
    assert_eq!(
        buffer.row(0).unwrap()[0].style.fg,
        Color::Named(NamedColor::Red)
    );
}

#[test]
fn utf8_split_across_chunks() {
    let mut buffer = TerminalBuffer::new(10, 1);
    let bytes = "é".as_bytes();
    buffer.process(&bytes[..1]);
    buffer.process(&bytes[1..]);
    assert_eq!(line(&buffer, 0), "é");
}

#[test]
fn unknown_sequences_are_ignored() {
    let buffer = feed(10, 1, b"a\x1b[?2004h\x1b]0;title\x07\x1b(Bb");
    assert_eq!(line(&buffer, 0), "ab");
}

#[test]
fn autowrap_can_be_disabled() {
    let buffer = feed(3, 2, b"\x1b[?7labcdef");
    assert_eq!(line(&buffer, 0), "abf");
    assert_eq!(line(&buffer, 1), "");
}

#[test]
fn full_reset_clears_screen() {
    let buffer = feed(5, 2, b"\x1b[31mabc\x1bcX");
    assert_eq!(line(&buffer, 0), "X");
    assert_eq!(buffer.row(0).unwrap()[0].style.fg, Color::Default);
}

#[test]
fn display_joins_trimmed_rows() {
    let buffer = feed(6, 3, b"hi\r\n\r\nend");
    assert_eq!(buffer.to_string(), "hi\n\nend");
}

#[test]
fn resize_preserves_visible_content() {
    let mut buffer = feed(10, 3, b"keep");
    buffer.resize(20, 5);
    assert_eq!(line(&buffer, 0), "keep");
    assert_eq!((buffer.width(), buffer.height()), (20, 5));
}
