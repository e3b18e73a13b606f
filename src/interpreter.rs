//! ANSI escape sequence interpreter.
//!
//! Consumes the raw body bytes one at a time and paints them into a
//! [`Screen`]. Control bytes and escape introducers are recognized on the raw
//! byte value; everything else is a CP437 glyph.
//!
//! Recognized controls: CR, LF, BS, HT and `ESC [ params final`. Supported
//! finals are `m` (SGR), `A` `B` `C` `D` (relative moves), `H` `f`
//! (absolute position), `G` (column), `J` `K` (erase) and `s` `u`
//! (save/restore). Anything else is consumed and dropped. Malformed input is
//! never an error: the interpreter skips what it cannot use and keeps going.
//!
//! ```
//! use ansiview::{AnsiInterpreter, Color};
//!
//! let mut interpreter = AnsiInterpreter::new(80);
//! interpreter.feed(b"\x1b[31mA\x1b[0mB");
//! let screen = interpreter.finish();
//! assert_eq!(screen.cell(0, 0).unwrap().foreground, Color::RED);
//! assert_eq!(screen.cell(0, 1).unwrap().foreground, Color::Default);
//! ```

use crate::cp437;
use crate::screen::{BackgroundMode, Color, Screen, Style};

const ESC: u8 = 0x1B;
const TAB_WIDTH: usize = 8;
/// Parameters past this count are dropped.
const MAX_PARAMS: usize = 32;
/// Cursor rows are clamped below this to bound memory on hostile input.
pub const MAX_ROWS: usize = 50_000;
/// Widest grid the interpreter builds; wider requests are cut down to it.
pub const MAX_COLUMNS: usize = 1024;

/// Where the escape grammar currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    Ground,
    /// An `ESC` was consumed.
    EscapeSeen,
    /// Inside `ESC [`, collecting `;` separated numbers.
    CollectingParameters {
        params: Vec<u16>,
        partial: Option<u16>,
        /// Private marker or intermediate byte (`?`, `=`, `>`, `<`, `!`, ...).
        /// Sequences carrying one are not ANSI.SYS commands and are ignored.
        marker: Option<u8>,
    },
}

/// Position plus the style the next printed character gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Cursor {
    row: usize,
    /// May equal the screen width: the next print wraps first.
    col: usize,
    style: Style,
}

#[derive(Debug)]
pub struct AnsiInterpreter {
    state: ParseState,
    cursor: Cursor,
    saved: Option<Cursor>,
    screen: Screen,
    mode: BackgroundMode,
}

/// Interpret a whole body in one go.
pub fn interpret(body: &[u8], width: usize, mode: BackgroundMode) -> Screen {
    let mut interpreter = AnsiInterpreter::with_background_mode(width, mode);
    interpreter.feed(body);
    interpreter.finish()
}

impl AnsiInterpreter {
    pub fn new(width: usize) -> Self {
        Self::with_background_mode(width, BackgroundMode::default())
    }

    pub fn with_background_mode(width: usize, mode: BackgroundMode) -> Self {
        AnsiInterpreter {
            state: ParseState::Ground,
            cursor: Cursor::default(),
            saved: None,
            screen: Screen::new(width.min(MAX_COLUMNS)),
            mode,
        }
    }

    /// Feed the next chunk of the body. Chunks may split escape sequences.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.step(byte);
        }
    }

    /// End of stream: drop any unterminated sequence and hand out the grid.
    pub fn finish(self) -> Screen {
        if self.state != ParseState::Ground {
            log::debug!("Discarding unterminated escape sequence at end of input");
        }
        self.screen
    }

    fn width(&self) -> usize {
        self.screen.width()
    }

    fn step(&mut self, byte: u8) {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            ParseState::Ground => self.ground(byte),
            ParseState::EscapeSeen => match byte {
                b'[' => ParseState::CollectingParameters {
                    params: Vec::new(),
                    partial: None,
                    marker: None,
                },
                ESC => ParseState::EscapeSeen,
                _ => {
                    log::debug!("Ignoring unsupported escape ESC {byte:#04X}");
                    ParseState::Ground
                }
            },
            ParseState::CollectingParameters {
                mut params,
                mut partial,
                mut marker,
            } => match byte {
                b'0'..=b'9' => {
                    let digit = u16::from(byte - b'0');
                    partial = Some(partial.unwrap_or(0).saturating_mul(10).saturating_add(digit));
                    ParseState::CollectingParameters {
                        params,
                        partial,
                        marker,
                    }
                }
                b';' => {
                    if params.len() < MAX_PARAMS {
                        params.push(partial.unwrap_or(0));
                    }
                    ParseState::CollectingParameters {
                        params,
                        partial: None,
                        marker,
                    }
                }
                b' '..=b'/' | b':' | b'<'..=b'?' => {
                    marker = marker.or(Some(byte));
                    ParseState::CollectingParameters {
                        params,
                        partial,
                        marker,
                    }
                }
                ESC => {
                    log::debug!("Escape sequence interrupted by ESC");
                    ParseState::EscapeSeen
                }
                _ => {
                    if (partial.is_some() || !params.is_empty()) && params.len() < MAX_PARAMS {
                        params.push(partial.unwrap_or(0));
                    }
                    match marker {
                        None => self.dispatch(byte, &params),
                        Some(m) => log::debug!(
                            "Ignoring CSI sequence with marker {:?} final {:?}",
                            m as char,
                            byte as char
                        ),
                    }
                    ParseState::Ground
                }
            },
        };
    }

    fn ground(&mut self, byte: u8) -> ParseState {
        match byte {
            ESC => return ParseState::EscapeSeen,
            b'\r' => self.cursor.col = 0,
            b'\n' => {
                self.cursor.row = (self.cursor.row + 1).min(MAX_ROWS - 1);
                self.cursor.col = 0;
                self.screen.ensure_row(self.cursor.row);
            }
            0x08 => {
                self.cursor.col = self.cursor.col.min(self.width() - 1).saturating_sub(1);
            }
            b'\t' => {
                if self.cursor.col < self.width() {
                    let next = (self.cursor.col / TAB_WIDTH + 1) * TAB_WIDTH;
                    self.cursor.col = next.min(self.width() - 1);
                }
            }
            _ => self.print(cp437::decode(byte)),
        }
        ParseState::Ground
    }

    fn print(&mut self, ch: char) {
        if self.cursor.col >= self.width() {
            self.cursor.row = (self.cursor.row + 1).min(MAX_ROWS - 1);
            self.cursor.col = 0;
        }
        let cell = self.cursor.style.resolve(ch, self.mode);
        self.screen.put(self.cursor.row, self.cursor.col, cell);
        self.cursor.col += 1;
    }

    fn dispatch(&mut self, command: u8, params: &[u16]) {
        // Movement counts of 0 mean 1, as with an omitted parameter.
        let count = |index: usize| params.get(index).copied().filter(|&n| n > 0).unwrap_or(1) as usize;
        let last_col = self.width() - 1;

        match command {
            b'm' => self.select_graphic_rendition(params),
            b'A' => self.cursor.row = self.cursor.row.saturating_sub(count(0)),
            b'B' => self.move_to_row(self.cursor.row.saturating_add(count(0))),
            b'C' => self.cursor.col = self.cursor.col.saturating_add(count(0)).min(last_col),
            b'D' => self.cursor.col = self.cursor.col.min(last_col).saturating_sub(count(0)),
            b'H' | b'f' => {
                self.cursor.col = (count(1) - 1).min(last_col);
                self.move_to_row(count(0) - 1);
            }
            b'G' => self.cursor.col = (count(0) - 1).min(last_col),
            b'J' => self.erase_display(params.first().copied().unwrap_or(0)),
            b'K' => self.erase_line(params.first().copied().unwrap_or(0)),
            b's' => self.saved = Some(self.cursor),
            b'u' => {
                if let Some(saved) = self.saved {
                    self.cursor = saved;
                }
            }
            _ => log::debug!("Ignoring unsupported CSI command {:?}", command as char),
        }
    }

    fn move_to_row(&mut self, row: usize) {
        self.cursor.row = row.min(MAX_ROWS - 1);
        self.screen.ensure_row(self.cursor.row);
    }

    fn erase_display(&mut self, mode: u16) {
        let Cursor { row, col, .. } = self.cursor;
        match mode {
            0 => {
                self.screen.erase_in_row(row, col, usize::MAX);
                self.screen.erase_rows(row + 1, usize::MAX);
            }
            1 => {
                self.screen.erase_rows(0, row);
                self.screen.erase_in_row(row, 0, col + 1);
            }
            2 => {
                self.screen.erase_all();
                self.cursor.row = 0;
                self.cursor.col = 0;
            }
            _ => log::debug!("Ignoring erase display mode {mode}"),
        }
    }

    fn erase_line(&mut self, mode: u16) {
        let Cursor { row, col, .. } = self.cursor;
        match mode {
            0 => self.screen.erase_in_row(row, col, usize::MAX),
            1 => self.screen.erase_in_row(row, 0, col + 1),
            2 => self.screen.erase_in_row(row, 0, usize::MAX),
            _ => log::debug!("Ignoring erase line mode {mode}"),
        }
    }

    fn select_graphic_rendition(&mut self, params: &[u16]) {
        let style = &mut self.cursor.style;
        if params.is_empty() {
            *style = Style::default();
            return;
        }
        for &code in params {
            match code {
                0 => *style = Style::default(),
                1 => style.bold = true,
                5 | 6 => style.blink = true,
                22 => style.bold = false,
                25 => style.blink = false,
                30..=37 => style.foreground = Color::Indexed((code - 30) as u8),
                39 => style.foreground = Color::Default,
                40..=47 => style.background = Color::Indexed((code - 40) as u8),
                49 => style.background = Color::Default,
                90..=97 => style.foreground = Color::Indexed((code - 90) as u8 + 8),
                100..=107 => style.background = Color::Indexed((code - 100) as u8 + 8),
                _ => log::debug!("Ignoring unsupported SGR code {code}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &[u8]) -> AnsiInterpreter {
        let mut interpreter = AnsiInterpreter::new(80);
        interpreter.feed(input);
        interpreter
    }

    #[test]
    fn unterminated_sequence_leaves_cursor_alone() {
        let interpreter = run(b"AB\x1b[3");
        assert_eq!((interpreter.cursor.row, interpreter.cursor.col), (0, 2));
        assert!(matches!(
            interpreter.state,
            ParseState::CollectingParameters { ref params, partial: Some(3), .. } if params.is_empty()
        ));
        assert_eq!(interpreter.finish().text(), "AB");
    }

    #[test]
    fn parameters_split_on_semicolons() {
        let interpreter = run(b"\x1b[12;;7");
        assert_eq!(
            interpreter.state,
            ParseState::CollectingParameters {
                params: vec![12, 0],
                partial: Some(7),
                marker: None,
            }
        );
    }

    #[test]
    fn save_restore_includes_style() {
        let mut interpreter = run(b"\x1b[1;32m\x1b[s\x1b[0m\x1b[5;5H");
        assert_eq!(interpreter.cursor.style, Style::default());
        interpreter.feed(b"\x1b[u");
        assert_eq!((interpreter.cursor.row, interpreter.cursor.col), (0, 0));
        assert!(interpreter.cursor.style.bold);
        assert_eq!(interpreter.cursor.style.foreground, Color::GREEN);
    }

    #[test]
    fn restore_without_save_is_noop() {
        let interpreter = run(b"abc\x1b[u");
        assert_eq!(interpreter.cursor.col, 3);
    }

    #[test]
    fn print_at_last_column_defers_wrap() {
        let mut interpreter = AnsiInterpreter::new(3);
        interpreter.feed(b"abc");
        assert_eq!((interpreter.cursor.row, interpreter.cursor.col), (0, 3));
        interpreter.feed(b"\r\nd");
        assert_eq!(interpreter.finish().text(), "abc\nd");
    }

    #[test]
    fn huge_moves_are_clamped() {
        let mut interpreter = AnsiInterpreter::new(2);
        interpreter.feed(b"\x1b[65535;65535H");
        assert_eq!(interpreter.cursor.row, MAX_ROWS - 1);
        assert_eq!(interpreter.cursor.col, 1);
        interpreter.feed(b"\x1b[65535A");
        assert_eq!(interpreter.cursor.row, 0);
    }

    #[test]
    fn width_is_capped() {
        let interpreter = AnsiInterpreter::new(usize::from(u16::MAX));
        assert_eq!(interpreter.finish().width(), MAX_COLUMNS);
    }

    #[test]
    fn parameter_overflow_saturates() {
        let interpreter = run(b"\x1b[99999999999");
        assert!(matches!(
            interpreter.state,
            ParseState::CollectingParameters { partial: Some(u16::MAX), .. }
        ));
    }
}
