use ansiview::{BackgroundMode, Document, ViewOptions, interpret, render_dump, render_to_string};
use proptest::collection::vec;
use proptest::prelude::*;

#[test]
fn dump_is_line_per_row() {
    let screen = interpret(b"\x1b[1;31mred\x1b[0m\r\nplain", 80, BackgroundMode::Blink);
    assert_eq!(render_to_string(&screen), "\x1b[0;1;91mred\x1b[0m\nplain\n");
}

#[test]
fn dump_writes_to_any_writer() {
    let screen = interpret(b"\xC9\xCD\xBB", 80, BackgroundMode::Blink);
    let mut out = Vec::new();
    render_dump(&screen, &mut out).unwrap();
    assert_eq!(out, "╔═╗\n".as_bytes());
}

#[test]
fn blink_and_bright_background_survive() {
    let classic = interpret(b"\x1b[5;41mX", 80, BackgroundMode::Blink);
    assert_eq!(render_to_string(&classic), "\x1b[0;5;41mX\x1b[0m\n");
    let ice = interpret(b"\x1b[5;41mX", 80, BackgroundMode::Ice);
    assert_eq!(render_to_string(&ice), "\x1b[0;101mX\x1b[0m\n");
}

#[test]
fn sauce_is_not_rendered() {
    let record = ansiview::SauceRecordBuilder::default()
        .title(bstr::BString::from("HIDDEN"))
        .unwrap()
        .build();
    let mut data = b"shown".to_vec();
    data.extend(record.to_bytes());
    let doc = Document::from_bytes(&data, &ViewOptions::default());
    assert_eq!(render_to_string(&doc.screen), "shown\n");
}

#[test]
fn dump_is_idempotent() {
    let first = interpret(b"\x1b[33;44mA\x1b[1mB\x1b[0m C\r\n\x1b[5mD", 80, BackgroundMode::Blink);
    let dumped = render_to_string(&first);
    let second = interpret(dumped.replace('\n', "\r\n").as_bytes(), 80, BackgroundMode::Blink);
    assert_eq!(render_to_string(&second), dumped);
}

proptest! {
    #[test]
    fn redumping_ascii_art_is_stable(
        lines in vec(vec(prop_oneof![Just(b'#'), Just(b'.'), Just(b' '), 0x41u8..=0x5A], 0..40), 0..10),
        colors in vec((30u16..=37, 40u16..=47, any::<bool>()), 0..10),
    ) {
        let mut input = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            if let Some((fg, bg, bold)) = colors.get(i) {
                let bold = if *bold { "1;" } else { "" };
                input.extend(format!("\x1b[0;{bold}{fg};{bg}m").as_bytes());
            }
            input.extend(line);
            input.extend(b"\r\n");
        }
        let screen = interpret(&input, 80, BackgroundMode::Blink);
        let dumped = render_to_string(&screen);
        let again = interpret(dumped.replace('\n', "\r\n").as_bytes(), 80, BackgroundMode::Blink);
        prop_assert_eq!(render_to_string(&again), dumped);
    }
}
