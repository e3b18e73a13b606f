//! The cell grid produced by the interpreter.
//!
//! A [`Screen`] has a fixed column count and grows downwards without limit.
//! Rows are allocated at full width when first touched, so writing a
//! character never allocates. Only the interpreter mutates a screen; every
//! other component receives it finished and reads it.

use std::fmt;

/// One of the 16 palette entries, or the terminal's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Color {
    #[default]
    Default,
    /// Palette index `0..=15`; 8 and up are the bright variants.
    Indexed(u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const RED: Color = Color::Indexed(1);
    pub const GREEN: Color = Color::Indexed(2);
    pub const YELLOW: Color = Color::Indexed(3);
    pub const BLUE: Color = Color::Indexed(4);
    pub const MAGENTA: Color = Color::Indexed(5);
    pub const CYAN: Color = Color::Indexed(6);
    pub const WHITE: Color = Color::Indexed(7);

    fn brighten(self, base_for_default: u8) -> Color {
        match self {
            Color::Indexed(n) if n < 8 => Color::Indexed(n + 8),
            Color::Indexed(n) => Color::Indexed(n),
            Color::Default => Color::Indexed(base_for_default + 8),
        }
    }
}

/// How the blink attribute is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundMode {
    /// Classic text mode: 8 backgrounds, the high bit means blink.
    #[default]
    Blink,
    /// iCE colors: the blink bit selects one of 8 bright backgrounds.
    Ice,
}

/// The pending graphic rendition, as set by SGR.
///
/// Colors here are what the escape codes asked for. They are resolved into
/// the final palette entries by [`Style::resolve`] when a cell is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub foreground: Color,
    pub background: Color,
    pub bold: bool,
    pub blink: bool,
}

impl Style {
    /// Fully resolve this style into a cell holding `ch`.
    pub fn resolve(&self, ch: char, mode: BackgroundMode) -> Cell {
        let foreground = match self.foreground {
            Color::Indexed(_) if self.bold => self.foreground.brighten(0),
            other => other,
        };
        let (background, blink) = match mode {
            BackgroundMode::Ice if self.blink => (self.background.brighten(0), false),
            BackgroundMode::Ice => (self.background, false),
            BackgroundMode::Blink => {
                let background = match self.background {
                    Color::Indexed(n) => Color::Indexed(n & 0x07),
                    Color::Default => Color::Default,
                };
                (background, self.blink)
            }
        };
        Cell {
            ch,
            foreground,
            background,
            bold: self.bold,
            blink,
        }
    }
}

/// One committed screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub foreground: Color,
    pub background: Color,
    pub bold: bool,
    pub blink: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell::BLANK
    }
}

impl Cell {
    pub const BLANK: Cell = Cell {
        ch: ' ',
        foreground: Color::Default,
        background: Color::Default,
        bold: false,
        blink: false,
    };

    /// A space in the default style, the state of erased cells.
    pub fn is_blank(&self) -> bool {
        *self == Cell::BLANK
    }

    /// Whether two cells would be emitted with the same SGR state.
    pub fn same_style(&self, other: &Cell) -> bool {
        self.foreground == other.foreground
            && self.background == other.background
            && self.bold == other.bold
            && self.blink == other.blink
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Box<[Cell]>,
}

impl Row {
    fn new(width: usize) -> Self {
        Row {
            cells: vec![Cell::BLANK; width].into_boxed_slice(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells up to and including the last one that is not blank.
    pub fn content(&self) -> &[Cell] {
        let end = self
            .cells
            .iter()
            .rposition(|c| !c.is_blank())
            .map_or(0, |pos| pos + 1);
        &self.cells[..end]
    }

    pub fn is_blank(&self) -> bool {
        self.content().is_empty()
    }

    /// The characters of this row without trailing blanks.
    pub fn text(&self) -> String {
        let text: String = self.content().iter().map(|c| c.ch).collect();
        text.trim_end_matches(' ').to_string()
    }

    fn erase(&mut self, from: usize, to: usize) {
        let to = to.min(self.cells.len());
        if from < to {
            self.cells[from..to].fill(Cell::BLANK);
        }
    }
}

/// A fixed-width, open-ended grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    width: usize,
    rows: Vec<Row>,
}

impl Screen {
    /// An empty screen; a width of 0 is raised to 1.
    pub fn new(width: usize) -> Self {
        Screen {
            width: width.max(1),
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows touched so far.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Rows up to and including the last one that is not blank.
    pub fn used_height(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| !row.is_blank())
            .map_or(0, |pos| pos + 1)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Plain text of all rows, one line per row, trailing blanks removed.
    pub fn text(&self) -> String {
        self.rows.iter().map(Row::text).collect::<Vec<_>>().join("\n")
    }

    pub(crate) fn ensure_row(&mut self, row: usize) -> &mut Row {
        if row >= self.rows.len() {
            let width = self.width;
            self.rows.resize_with(row + 1, || Row::new(width));
        }
        &mut self.rows[row]
    }

    pub(crate) fn put(&mut self, row: usize, col: usize, cell: Cell) {
        debug_assert!(col < self.width);
        self.ensure_row(row).cells[col] = cell;
    }

    /// Blank `from..to` on `row`; rows that do not exist yet are left alone.
    pub(crate) fn erase_in_row(&mut self, row: usize, from: usize, to: usize) {
        if let Some(r) = self.rows.get_mut(row) {
            r.erase(from, to);
        }
    }

    pub(crate) fn erase_rows(&mut self, from: usize, to: usize) {
        let to = to.min(self.rows.len());
        for row in self.rows.iter_mut().take(to).skip(from) {
            row.erase(0, usize::MAX);
        }
    }

    pub(crate) fn erase_all(&mut self) {
        self.erase_rows(0, usize::MAX);
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
