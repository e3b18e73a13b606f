//! Viewer for ANSI and CP437 text art.
//!
//! The pipeline runs in one direction: [`extract`] splits the SAUCE record
//! off the raw bytes, [`AnsiInterpreter`] paints the body into a [`Screen`],
//! and the screen is either dumped as SGR text ([`render_dump`]) or paged
//! interactively ([`run_pager`]). [`Document`] bundles the first two steps.
//!
//! ```
//! use ansiview::{Document, ViewOptions, render_to_string};
//!
//! let doc = Document::from_bytes(b"\x1b[32mOK\r\n", &ViewOptions::default());
//! assert_eq!(render_to_string(&doc.screen), "\x1b[0;32mOK\x1b[0m\n");
//! ```

use std::fmt;

pub type Result<T> = std::result::Result<T, AnsiViewError>;

mod builder;
mod character;
pub mod cp437;
mod date;
mod document;
mod errors;
pub mod header;
mod interpreter;
pub mod limits;
mod pager;
pub mod prelude;
mod record;
mod render;
mod screen;
mod util;

pub use builder::SauceRecordBuilder;
pub use character::{AspectRatio, CharacterCapabilities, CharacterFormat, LetterSpacing};
pub use date::SauceDate;
pub use document::{DEFAULT_AUTOPLAY_DELAY, DEFAULT_COLUMNS, Document, ViewOptions, read_input};
pub use errors::AnsiViewError;
pub use interpreter::{AnsiInterpreter, MAX_COLUMNS, MAX_ROWS, ParseState, interpret};
pub use pager::{AutoplayTimer, Pager, PagerAction, PagerState, action_for_key, run_pager};
pub use record::{SauceRecord, extract, strip_sauce};
pub use render::{render_dump, render_to_string};
pub use screen::{BackgroundMode, Cell, Color, Row, Screen, Style};

/// DOS end of file marker, conventionally placed before the SAUCE record.
pub(crate) const EOF_CHAR: u8 = 0x1A;

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SauceDataType {
    None = 0,
    /// Text streams interpreted sequentially: ASCII, ANSI, RIP, PCBoard, ...
    #[default]
    Character = 1,
    Bitmap = 2,
    Vector = 3,
    Audio = 4,
    /// Raw text mode screen memory (.BIN).
    BinaryText = 5,
    XBin = 6,
    Archive = 7,
    Executable = 8,
    /// Any value the format does not define.
    Undefined(u8),
}

impl From<u8> for SauceDataType {
    fn from(byte: u8) -> SauceDataType {
        match byte {
            0 => SauceDataType::None,
            1 => SauceDataType::Character,
            2 => SauceDataType::Bitmap,
            3 => SauceDataType::Vector,
            4 => SauceDataType::Audio,
            5 => SauceDataType::BinaryText,
            6 => SauceDataType::XBin,
            7 => SauceDataType::Archive,
            8 => SauceDataType::Executable,
            other => SauceDataType::Undefined(other),
        }
    }
}

impl From<SauceDataType> for u8 {
    fn from(data_type: SauceDataType) -> u8 {
        match data_type {
            SauceDataType::None => 0,
            SauceDataType::Character => 1,
            SauceDataType::Bitmap => 2,
            SauceDataType::Vector => 3,
            SauceDataType::Audio => 4,
            SauceDataType::BinaryText => 5,
            SauceDataType::XBin => 6,
            SauceDataType::Archive => 7,
            SauceDataType::Executable => 8,
            SauceDataType::Undefined(byte) => byte,
        }
    }
}

impl fmt::Display for SauceDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SauceDataType::None => "None",
            SauceDataType::Character => "Character",
            SauceDataType::Bitmap => "Bitmap",
            SauceDataType::Vector => "Vector",
            SauceDataType::Audio => "Audio",
            SauceDataType::BinaryText => "BinaryText",
            SauceDataType::XBin => "XBin",
            SauceDataType::Archive => "Archive",
            SauceDataType::Executable => "Executable",
            SauceDataType::Undefined(_) => "Undefined",
        };
        write!(f, "{} ({name})", u8::from(*self))
    }
}
