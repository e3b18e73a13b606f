#![no_main]
use ansiview::{BackgroundMode, interpret, render_to_string};
use libfuzzer_sys::arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    width: u8,
    ice: bool,
    body: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mode = if input.ice {
        BackgroundMode::Ice
    } else {
        BackgroundMode::Blink
    };
    let screen = interpret(&input.body, usize::from(input.width), mode);
    assert!(screen.rows().iter().all(|row| row.cells().len() == screen.width()));
    let _ = render_to_string(&screen);
});
