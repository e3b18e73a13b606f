//! Dump mode: re-encode a finished [`Screen`] as 16 color SGR text.
//!
//! Each row is written left to right, emitting an SGR sequence only when the
//! style changes, and closed with a reset and a newline. Trailing blank cells
//! and trailing blank rows are not written. The output only depends on the
//! screen, so dumping the same screen twice gives identical bytes.

use std::io::Write;

use crate::screen::{Cell, Color, Row, Screen};

/// Write `screen` to `out` as styled text.
///
/// # Errors
///
/// Propagates write errors of `out`.
pub fn render_dump<W: Write>(screen: &Screen, out: &mut W) -> crate::Result<()> {
    for row in &screen.rows()[..screen.used_height()] {
        write_row(out, row, usize::MAX)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// [`render_dump`] into a string.
pub fn render_to_string(screen: &Screen) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render_dump(screen, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

/// Write the content of `row`, at most `max_cols` cells, leaving the
/// terminal in its default style afterwards.
pub(crate) fn write_row<W: Write>(out: &mut W, row: &Row, max_cols: usize) -> std::io::Result<()> {
    let content = row.content();
    let mut current = Cell::BLANK;
    let mut buf = [0u8; 4];
    for cell in content.iter().take(max_cols) {
        if !cell.same_style(&current) {
            write_sgr(out, cell)?;
            current = *cell;
        }
        out.write_all(cell.ch.encode_utf8(&mut buf).as_bytes())?;
    }
    if !current.same_style(&Cell::BLANK) {
        out.write_all(b"\x1b[0m")?;
    }
    Ok(())
}

/// Full SGR for the style of `cell`, starting from a reset.
pub(crate) fn write_sgr<W: Write>(out: &mut W, cell: &Cell) -> std::io::Result<()> {
    out.write_all(b"\x1b[0")?;
    if cell.bold {
        out.write_all(b";1")?;
    }
    if cell.blink {
        out.write_all(b";5")?;
    }
    if let Color::Indexed(n) = cell.foreground {
        write!(out, ";{}", sgr_color(n, 30, 90))?;
    }
    if let Color::Indexed(n) = cell.background {
        write!(out, ";{}", sgr_color(n, 40, 100))?;
    }
    out.write_all(b"m")
}

fn sgr_color(index: u8, base: u16, bright_base: u16) -> u16 {
    let index = u16::from(index & 0x0F);
    if index < 8 {
        base + index
    } else {
        bright_base + index - 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret;
    use crate::screen::BackgroundMode;

    fn dump(input: &[u8]) -> String {
        render_to_string(&interpret(input, 80, BackgroundMode::Blink))
    }

    #[test]
    fn plain_text_has_no_escapes() {
        assert_eq!(dump(b"Hello\r\nWorld"), "Hello\nWorld\n");
    }

    #[test]
    fn style_changes_are_encoded_once() {
        assert_eq!(
            dump(b"\x1b[31mAB\x1b[0mC"),
            "\x1b[0;31mAB\x1b[0mC\n"
        );
    }

    #[test]
    fn bright_colors_use_aixterm_codes() {
        assert_eq!(
            dump(b"\x1b[1;34;42mX"),
            "\x1b[0;1;94;42mX\x1b[0m\n"
        );
    }

    #[test]
    fn trailing_blank_rows_are_skipped() {
        assert_eq!(dump(b"A\r\n\r\n\r\n"), "A\n");
        assert_eq!(dump(b""), "");
    }

    #[test]
    fn blank_rows_inside_are_kept() {
        assert_eq!(dump(b"A\r\n\r\nB"), "A\n\nB\n");
    }
}
