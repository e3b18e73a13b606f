//! The types most programs need, in one import.
//!
//! ```
//! use ansiview::prelude::*;
//!
//! let doc = Document::from_bytes(b"\x1b[1;31m*", &ViewOptions::default());
//! assert_eq!(doc.screen.cell(0, 0).unwrap().foreground, Color::Indexed(9));
//! ```
//!
//! Lower level pieces such as [`crate::header::SauceHeader`] or the
//! [`crate::cp437`] table stay behind their module paths.

pub use crate::{
    // Metadata
    AnsiViewError,
    CharacterCapabilities,
    CharacterFormat,
    Result,
    SauceDataType,
    SauceDate,
    SauceRecord,
    SauceRecordBuilder,
    extract,
    strip_sauce,
    // Rendering
    AnsiInterpreter,
    BackgroundMode,
    Cell,
    Color,
    Document,
    Screen,
    ViewOptions,
    interpret,
    render_dump,
};
