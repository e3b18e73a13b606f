//! From raw file bytes to something the renderers can show.
//!
//! ```
//! use ansiview::{Document, ViewOptions};
//!
//! let doc = Document::from_bytes(b"\x1b[1;33mHi\x1a", &ViewOptions::default());
//! assert_eq!(doc.screen.text(), "Hi");
//! assert!(doc.sauce.is_none());
//! ```

use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::screen::{BackgroundMode, Screen};
use crate::{AnsiViewError, MAX_COLUMNS, SauceRecord, extract, interpret, util};

/// Column count used when neither the caller nor SAUCE gives one.
pub const DEFAULT_COLUMNS: u16 = 80;

/// Delay between two autoplay steps.
pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_millis(100);

/// How a file should be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    /// Print the SAUCE report instead of the art.
    pub show_metadata: bool,
    /// Write the art once to the output instead of paging it.
    pub dump_mode: bool,
    pub autoplay_delay: Duration,
    /// Override the column count.
    pub columns: Option<u16>,
    /// Override the SAUCE iCE colors flag.
    pub ice_colors: Option<bool>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            show_metadata: false,
            dump_mode: false,
            autoplay_delay: DEFAULT_AUTOPLAY_DELAY,
            columns: None,
            ice_colors: None,
        }
    }
}

/// An interpreted file: its grid and its metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub screen: Screen,
    pub sauce: Option<SauceRecord>,
}

impl Document {
    /// Run the full pipeline over `data`. This cannot fail; see
    /// [`extract`] and [`AnsiInterpreter`](crate::AnsiInterpreter) for how
    /// damaged input is handled.
    pub fn from_bytes(data: &[u8], options: &ViewOptions) -> Self {
        let (body, sauce) = extract(data);
        let body = util::trim_eof_markers(body);
        let caps = sauce.as_ref().and_then(SauceRecord::character_capabilities);

        let columns = options
            .columns
            .filter(|&c| c > 0)
            .or_else(|| caps.as_ref().map(|c| c.columns).filter(|&c| c > 0))
            .unwrap_or(DEFAULT_COLUMNS);
        let columns = if usize::from(columns) > MAX_COLUMNS {
            log::warn!("Width of {columns} columns is too wide, using {MAX_COLUMNS}");
            MAX_COLUMNS
        } else {
            usize::from(columns)
        };
        let ice = options
            .ice_colors
            .unwrap_or_else(|| caps.as_ref().is_some_and(|c| c.ice_colors));
        let mode = if ice {
            BackgroundMode::Ice
        } else {
            BackgroundMode::Blink
        };
        log::debug!(
            "Interpreting {} body bytes at {columns} columns, {mode:?} mode",
            body.len()
        );

        Document {
            screen: interpret(body, columns, mode),
            sauce,
        }
    }

    /// The SAUCE fields as `label : value` lines, followed by the comments.
    pub fn metadata_lines(&self) -> Vec<String> {
        let Some(sauce) = &self.sauce else {
            return vec!["No SAUCE metadata found.".to_string()];
        };
        let header = sauce.header();
        let mut lines = vec![
            format!("Version : {}", sauce.version()),
            format!("Title   : {}", sauce.title_text()),
            format!("Author  : {}", sauce.author_text()),
            format!("Group   : {}", sauce.group_text()),
            format!("Date    : {}", sauce.date()),
            format!("DataType: {}", header.data_type),
            format!("FileType: {}", header.file_type),
            format!(
                "TInfo1-4: {} {} {} {}",
                header.t_info1, header.t_info2, header.t_info3, header.t_info4
            ),
            format!("TFlags  : {}", header.t_flags),
            format!("TInfoS  : {}", crate::cp437::decode_bytes(&header.t_info_s)),
        ];
        if !sauce.comments().is_empty() {
            lines.push("Comments:".to_string());
            lines.extend(sauce.comment_lines().map(|c| format!("  {c}")));
        }
        lines
    }

    /// Write [`metadata_lines`](Self::metadata_lines) to `out`.
    ///
    /// # Errors
    ///
    /// Propagates write errors of `out`.
    pub fn write_metadata_report<W: Write>(&self, out: &mut W) -> crate::Result<()> {
        for line in self.metadata_lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Read the whole input; `-` means standard input.
///
/// # Errors
///
/// [`AnsiViewError::InputUnavailable`] when the source cannot be read,
/// [`AnsiViewError::EmptyInput`] when it holds no bytes.
pub fn read_input(path: &Path) -> crate::Result<Vec<u8>> {
    let data = if path == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut data)
            .map_err(|e| AnsiViewError::input_unavailable("<stdin>", e))?;
        data
    } else {
        std::fs::read(path).map_err(|e| AnsiViewError::input_unavailable(path, e))?
    };
    if data.is_empty() {
        return Err(AnsiViewError::EmptyInput);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CharacterCapabilities, CharacterFormat, Color, SauceRecordBuilder};
    use bstr::BString;

    fn with_sauce(body: &[u8], columns: u16, ice: bool) -> Vec<u8> {
        let mut caps = CharacterCapabilities::new(CharacterFormat::Ansi);
        caps.columns = columns;
        caps.ice_colors = ice;
        let record = SauceRecordBuilder::default()
            .title(BString::from("DEMO"))
            .unwrap()
            .character_capabilities(caps)
            .unwrap()
            .build();
        let mut data = body.to_vec();
        data.extend(record.to_bytes());
        data
    }

    #[test]
    fn sauce_width_controls_wrapping() {
        let doc = Document::from_bytes(&with_sauce(b"abcdef", 4, false), &ViewOptions::default());
        assert_eq!(doc.screen.width(), 4);
        assert_eq!(doc.screen.text(), "abcd\nef");
    }

    #[test]
    fn option_overrides_sauce_width() {
        let options = ViewOptions {
            columns: Some(3),
            ..Default::default()
        };
        let doc = Document::from_bytes(&with_sauce(b"abcdef", 4, false), &options);
        assert_eq!(doc.screen.text(), "abc\ndef");
    }

    #[test]
    fn zero_sauce_width_falls_back_to_default() {
        let doc = Document::from_bytes(&with_sauce(b"x", 0, false), &ViewOptions::default());
        assert_eq!(doc.screen.width(), 80);
    }

    #[test]
    fn oversized_sauce_width_is_capped() {
        let data = with_sauce(b"\x1b[2000Bx", u16::MAX, false);
        let doc = Document::from_bytes(&data, &ViewOptions::default());
        assert_eq!(doc.screen.width(), MAX_COLUMNS);
        assert_eq!(doc.screen.height(), 2001);
    }

    #[test]
    fn oversized_column_option_is_capped() {
        let options = ViewOptions {
            columns: Some(u16::MAX),
            ..Default::default()
        };
        let doc = Document::from_bytes(b"x", &options);
        assert_eq!(doc.screen.width(), MAX_COLUMNS);
    }

    #[test]
    fn ice_flag_selects_bright_backgrounds() {
        let doc = Document::from_bytes(&with_sauce(b"\x1b[5;41mX", 80, true), &ViewOptions::default());
        let cell = doc.screen.cell(0, 0).unwrap();
        assert_eq!(cell.background, Color::Indexed(9));
        assert!(!cell.blink);
    }

    #[test]
    fn eof_marker_is_not_drawn() {
        let doc = Document::from_bytes(&with_sauce(b"art", 80, false), &ViewOptions::default());
        assert_eq!(doc.screen.text(), "art");
    }

    #[test]
    fn metadata_report_lists_fields() {
        let doc = Document::from_bytes(&with_sauce(b"art", 80, false), &ViewOptions::default());
        let lines = doc.metadata_lines();
        assert!(lines.contains(&"Title   : DEMO".to_string()));
        assert!(lines.contains(&"TInfo1-4: 80 25 0 0".to_string()));
        assert!(!lines.iter().any(|l| l == "Comments:"));
    }

    #[test]
    fn metadata_report_without_sauce() {
        let doc = Document::from_bytes(b"art", &ViewOptions::default());
        assert_eq!(doc.metadata_lines(), vec!["No SAUCE metadata found."]);
    }

    #[test]
    fn missing_input_is_reported() {
        let path = std::env::temp_dir().join("ansiview-does-not-exist.ans");
        let err = read_input(&path).unwrap_err();
        assert!(matches!(err, AnsiViewError::InputUnavailable { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn empty_input_is_reported() {
        let path = std::env::temp_dir().join(format!("ansiview-empty-{}.ans", std::process::id()));
        std::fs::write(&path, b"").unwrap();
        let result = read_input(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(AnsiViewError::EmptyInput)));
    }

    #[test]
    fn reads_file_contents() {
        let path = std::env::temp_dir().join(format!("ansiview-read-{}.ans", std::process::id()));
        std::fs::write(&path, b"\x1b[0mart").unwrap();
        let data = read_input(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(data, b"\x1b[0mart");
    }
}
