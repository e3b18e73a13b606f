use ansiview::{AnsiInterpreter, BackgroundMode, Color, Screen, interpret};
use proptest::collection::vec;
use proptest::prelude::*;

fn screen(input: &[u8]) -> Screen {
    interpret(input, 80, BackgroundMode::Blink)
}

#[test]
fn sgr_colors_apply_to_following_cells() {
    let screen = screen(b"\x1b[31mA\x1b[0mB");
    let a = screen.cell(0, 0).unwrap();
    assert_eq!(a.ch, 'A');
    assert_eq!(a.foreground, Color::RED);
    let b = screen.cell(0, 1).unwrap();
    assert_eq!(b.ch, 'B');
    assert_eq!(b.foreground, Color::Default);
}

#[test]
fn bright_and_background_codes() {
    let screen = screen(b"\x1b[93;44mY\x1b[1;30mK\x1b[22;39;49mn");
    let y = screen.cell(0, 0).unwrap();
    assert_eq!(y.foreground, Color::Indexed(11));
    assert_eq!(y.background, Color::BLUE);
    let k = screen.cell(0, 1).unwrap();
    assert_eq!(k.foreground, Color::Indexed(8));
    assert!(k.bold);
    let n = screen.cell(0, 2).unwrap();
    assert_eq!(n.foreground, Color::Default);
    assert_eq!(n.background, Color::Default);
    assert!(!n.bold);
}

#[test]
fn blink_depends_on_background_mode() {
    let input = b"\x1b[5;42mB";
    let classic = interpret(input, 80, BackgroundMode::Blink);
    let cell = classic.cell(0, 0).unwrap();
    assert!(cell.blink);
    assert_eq!(cell.background, Color::GREEN);

    let ice = interpret(input, 80, BackgroundMode::Ice);
    let cell = ice.cell(0, 0).unwrap();
    assert!(!cell.blink);
    assert_eq!(cell.background, Color::Indexed(10));
}

#[test]
fn unterminated_sequence_is_dropped() {
    let screen = screen(b"AB\x1b[3");
    assert_eq!(screen.text(), "AB");
}

#[test]
fn unknown_commands_are_consumed() {
    assert_eq!(screen(b"A\x1b[?7hB\x1b[2ZC\x1b(D").text(), "ABCD");
}

#[test]
fn cursor_positioning() {
    let screen = screen(b"\x1b[3;5HX\x1b[HY\x1b[2;10fZ");
    assert_eq!(screen.cell(2, 4).unwrap().ch, 'X');
    assert_eq!(screen.cell(0, 0).unwrap().ch, 'Y');
    assert_eq!(screen.cell(1, 9).unwrap().ch, 'Z');
}

#[test]
fn relative_moves() {
    let screen = screen(b"\x1b[2B\x1b[4CA\x1b[A\x1b[2DB\x1b[0CC");
    assert_eq!(screen.cell(2, 4).unwrap().ch, 'A');
    assert_eq!(screen.cell(1, 3).unwrap().ch, 'B');
    assert_eq!(screen.cell(1, 5).unwrap().ch, 'C');
}

#[test]
fn moves_stop_at_edges() {
    let screen = interpret(b"\x1b[10A\x1b[10DA\x1b[99CB", 4, BackgroundMode::Blink);
    assert_eq!(screen.text(), "A  B");
}

#[test]
fn horizontal_absolute() {
    assert_eq!(screen(b"abc\x1b[2Gx").text(), "axc");
}

#[test]
fn line_feed_returns_to_first_column() {
    assert_eq!(screen(b"abc\ndef").text(), "abc\ndef");
    assert_eq!(screen(b"abc\rX").text(), "Xbc");
}

#[test]
fn tab_and_backspace() {
    assert_eq!(screen(b"a\tb").text(), "a       b");
    assert_eq!(screen(b"ab\x08c").text(), "ac");
}

#[test]
fn erase_line_modes() {
    assert_eq!(screen(b"abcdef\x1b[4G\x1b[K").text(), "abc");
    assert_eq!(screen(b"abcdef\x1b[4G\x1b[0K").text(), "abc");
    assert_eq!(screen(b"abcdef\x1b[4G\x1b[1K").text(), "    ef");
    assert_eq!(screen(b"abcdef\x1b[2K").text(), "");
}

#[test]
fn erase_display_homes_cursor() {
    let screen = screen(b"one\r\ntwo\x1b[2Jx");
    assert_eq!(screen.text(), "x\n");
}

#[test]
fn erase_below_cursor() {
    let implicit = screen(b"one\r\ntwo\r\nsix\x1b[2;2H\x1b[J");
    assert_eq!(implicit.text(), "one\nt\n");
    let explicit = screen(b"one\r\ntwo\r\nsix\x1b[2;2H\x1b[0J");
    assert_eq!(explicit.text(), "one\nt\n");
}

#[test]
fn erase_display_to_cursor() {
    let screen = screen(b"one\r\ntwo\r\nsix\x1b[2;2H\x1b[1J");
    assert_eq!(screen.text(), "\n  o\nsix");
}

#[test]
fn wraps_at_width() {
    let screen = interpret(b"abcdefg", 3, BackgroundMode::Blink);
    assert_eq!(screen.text(), "abc\ndef\ng");
}

#[test]
fn exact_width_line_does_not_leave_blank_row() {
    let screen = interpret(b"abc\r\ndef", 3, BackgroundMode::Blink);
    assert_eq!(screen.text(), "abc\ndef");
}

#[test]
fn cp437_glyphs_are_decoded() {
    assert_eq!(screen(b"\xDB\xB0\x03").text(), "█░♥");
}

#[test]
fn feeding_in_chunks_matches_one_pass() {
    let input = b"\x1b[1;3";
    let rest = b"1mR\x1b[0mr";
    let mut interpreter = AnsiInterpreter::new(80);
    interpreter.feed(input);
    interpreter.feed(rest);
    let mut whole = input.to_vec();
    whole.extend(rest);
    assert_eq!(interpreter.finish(), screen(&whole));
}

proptest! {
    #[test]
    fn printable_bytes_fill_rows_in_order(
        bytes in vec(prop_oneof![0x20u8..=0x7E, 0x80u8..=0xFF], 0..400),
        width in 1usize..100,
    ) {
        let screen = interpret(&bytes, width, BackgroundMode::Blink);
        for (i, &byte) in bytes.iter().enumerate() {
            let cell = screen.cell(i / width, i % width).unwrap();
            prop_assert_eq!(cell.ch, ansiview::cp437::decode(byte));
        }
        prop_assert_eq!(screen.height(), bytes.len().div_ceil(width));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in vec(any::<u8>(), 0..2000), width in 1usize..200) {
        let screen = interpret(&bytes, width, BackgroundMode::Ice);
        for row in screen.rows() {
            prop_assert_eq!(row.cells().len(), width);
        }
    }
}
