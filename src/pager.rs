//! Interactive pager with autoplay.
//!
//! The pager is split in two: [`PagerState`] holds the scroll position and
//! modes and reacts to [`PagerAction`]s, and [`Pager`] draws that state for a
//! [`Document`] onto any writer. [`run_pager`] wires both to the real
//! terminal through crossterm.
//!
//! Autoplay advances one line per delay. The wait is an [`AutoplayTimer`]
//! deadline handed to `crossterm::event::poll`, so a key press (including
//! Ctrl-C, which arrives as a key in raw mode) interrupts it at once.

use std::io::{self, Write};
use std::ops::Range;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::Document;
use crate::render::write_row;

const STATUS_TEXT: &str = "ansiview | ↑↓ scroll | PgUp/PgDn page | SPACE autoplay | TAB sauce | Q quit";
const INFO_BOX_MAX_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    ToggleAutoplay,
    ToggleInfo,
    Resize { columns: u16, rows: u16 },
    Quit,
}

/// Map a key press to a pager action.
pub fn action_for_key(key: KeyEvent) -> Option<PagerAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(PagerAction::Quit);
    }
    match key.code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(PagerAction::Quit),
        KeyCode::Char(' ') => Some(PagerAction::ToggleAutoplay),
        KeyCode::Tab => Some(PagerAction::ToggleInfo),
        KeyCode::Down | KeyCode::Char('j') => Some(PagerAction::LineDown),
        KeyCode::Up | KeyCode::Char('k') => Some(PagerAction::LineUp),
        KeyCode::PageDown => Some(PagerAction::PageDown),
        KeyCode::PageUp => Some(PagerAction::PageUp),
        KeyCode::Home | KeyCode::Char('g') => Some(PagerAction::Top),
        KeyCode::End | KeyCode::Char('G') => Some(PagerAction::Bottom),
        _ => None,
    }
}

/// Scroll position and modes of the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerState {
    total_rows: usize,
    page_height: usize,
    offset: usize,
    autoplay: bool,
    show_info: bool,
}

impl PagerState {
    pub fn new(total_rows: usize, page_height: usize) -> Self {
        PagerState {
            total_rows,
            page_height: page_height.max(1),
            offset: 0,
            autoplay: false,
            show_info: false,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_height(&self) -> usize {
        self.page_height
    }

    pub fn is_autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_showing_info(&self) -> bool {
        self.show_info
    }

    /// Row indices currently on screen.
    pub fn visible_rows(&self) -> Range<usize> {
        self.offset..(self.offset + self.page_height).min(self.total_rows)
    }

    fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.page_height)
    }

    fn page_step(&self) -> usize {
        self.page_height.saturating_sub(2).max(1)
    }

    /// Apply `action`. Returns `false` once the pager should close.
    ///
    /// Manual navigation stops autoplay, as does opening the info box.
    pub fn apply(&mut self, action: PagerAction) -> bool {
        match action {
            PagerAction::Quit => return false,
            PagerAction::ToggleInfo => {
                self.show_info = !self.show_info;
                self.autoplay = false;
            }
            PagerAction::ToggleAutoplay if !self.show_info => {
                self.autoplay = !self.autoplay && self.offset < self.max_offset();
            }
            PagerAction::ToggleAutoplay => {}
            PagerAction::Resize { rows, .. } => {
                self.page_height = usize::from(rows).saturating_sub(1).max(1);
                self.offset = self.offset.min(self.max_offset());
            }
            _ if self.show_info => {}
            navigation => {
                self.autoplay = false;
                self.offset = match navigation {
                    PagerAction::LineDown => self.offset + 1,
                    PagerAction::LineUp => self.offset.saturating_sub(1),
                    PagerAction::PageDown => self.offset + self.page_step(),
                    PagerAction::PageUp => self.offset.saturating_sub(self.page_step()),
                    PagerAction::Top => 0,
                    _ => self.max_offset(),
                }
                .min(self.max_offset());
            }
        }
        true
    }

    /// One autoplay step: reveal the next line, stopping at the bottom.
    pub fn tick(&mut self) {
        if !self.autoplay {
            return;
        }
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
        if self.offset >= self.max_offset() {
            self.autoplay = false;
        }
    }
}

/// Deadline based timer driving autoplay.
#[derive(Debug, Clone)]
pub struct AutoplayTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoplayTimer {
    pub fn new(delay: Duration) -> Self {
        AutoplayTimer {
            delay,
            deadline: None,
        }
    }

    /// Arm or disarm to match `running`, keeping an armed deadline as is.
    pub fn sync(&mut self, running: bool, now: Instant) {
        match (running, self.deadline) {
            (true, None) => self.deadline = Some(now + self.delay),
            (false, Some(_)) => self.deadline = None,
            _ => {}
        }
    }

    /// Time left until the next step, `None` while disarmed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whether the deadline passed; re-arms for the following step.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.delay);
                true
            }
            _ => false,
        }
    }
}

/// Draws a [`Document`] page by page.
#[derive(Debug)]
pub struct Pager<'a, W: Write> {
    document: &'a Document,
    out: W,
    state: PagerState,
    columns: u16,
}

impl<'a, W: Write> Pager<'a, W> {
    /// A pager for a terminal of `columns` x `rows`; the last row holds the
    /// status line.
    pub fn new(document: &'a Document, out: W, columns: u16, rows: u16) -> Self {
        let page_height = usize::from(rows).saturating_sub(1);
        Pager {
            document,
            out,
            state: PagerState::new(document.screen.used_height(), page_height),
            columns: columns.max(1),
        }
    }

    pub fn state(&self) -> &PagerState {
        &self.state
    }

    pub fn apply(&mut self, action: PagerAction) -> bool {
        if let PagerAction::Resize { columns, .. } = action {
            self.columns = columns.max(1);
        }
        self.state.apply(action)
    }

    pub fn tick(&mut self) {
        self.state.tick();
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Redraw the whole frame, overwriting each line in place.
    ///
    /// # Errors
    ///
    /// Propagates write errors of the output.
    pub fn draw(&mut self) -> io::Result<()> {
        let screen = &self.document.screen;
        let visible = self.state.visible_rows();
        for y in 0..self.state.page_height() {
            queue!(self.out, MoveTo(0, y as u16))?;
            let index = visible.start + y;
            if let Some(row) = screen.row(index).filter(|_| visible.contains(&index)) {
                write_row(&mut self.out, row, usize::from(self.columns))?;
            }
            queue!(self.out, Clear(ClearType::UntilNewLine))?;
        }
        self.draw_status()?;
        if self.state.is_showing_info() {
            self.draw_info_box()?;
        }
        self.out.flush()
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let mut status = STATUS_TEXT.to_string();
        if self.state.is_autoplay() {
            status.push_str(" | AUTOPLAY ON");
        }
        let visible = self.state.visible_rows();
        status.push_str(&format!(
            " | {}-{}/{}",
            visible.start + 1,
            visible.end,
            self.document.screen.used_height()
        ));
        let status: String = status.chars().take(usize::from(self.columns)).collect();
        queue!(
            self.out,
            MoveTo(0, self.state.page_height() as u16),
            SetAttribute(Attribute::Reverse),
            Print(status),
            SetAttribute(Attribute::Reset),
            Clear(ClearType::UntilNewLine)
        )
    }

    fn draw_info_box(&mut self) -> io::Result<()> {
        let lines = self.document.metadata_lines();
        let columns = usize::from(self.columns);
        let rows = self.state.page_height() + 1;
        let width = INFO_BOX_MAX_WIDTH.min(columns.saturating_sub(4)).max(4);
        let height = (lines.len() + 2).min(rows.saturating_sub(4)).max(3);
        let left = (columns.saturating_sub(width) / 2) as u16;
        let top = (rows.saturating_sub(height) / 2) as u16;
        let inner = width - 2;

        let horizontal = "━".repeat(inner);
        queue!(
            self.out,
            ResetColor,
            MoveTo(left, top),
            Print(format!("┏{horizontal}┓"))
        )?;
        for y in 1..height - 1 {
            let text: String = lines
                .get(y - 1)
                .map(|l| l.chars().take(inner).collect())
                .unwrap_or_default();
            queue!(
                self.out,
                MoveTo(left, top + y as u16),
                Print(format!("┃{text:<inner$}┃"))
            )?;
        }
        queue!(
            self.out,
            MoveTo(left, top + height as u16 - 1),
            Print(format!("┗{horizontal}┛"))
        )
    }
}

/// Raw mode, alternate screen and hidden cursor for as long as it lives.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, ResetColor, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = stdout.flush();
    }
}

/// Page `document` on the controlling terminal until the user quits.
///
/// # Errors
///
/// Terminal I/O failures.
pub fn run_pager(document: &Document, autoplay_delay: Duration) -> crate::Result<()> {
    let (columns, rows) = terminal::size()?;
    let _guard = TerminalGuard::enter()?;
    let mut pager = Pager::new(document, io::BufWriter::new(io::stdout()), columns, rows);
    let mut timer = AutoplayTimer::new(autoplay_delay);

    loop {
        pager.draw()?;
        timer.sync(pager.state().is_autoplay(), Instant::now());

        let input = match timer.remaining(Instant::now()) {
            Some(timeout) => {
                if event::poll(timeout)? {
                    Some(event::read()?)
                } else {
                    None
                }
            }
            None => Some(event::read()?),
        };

        match input {
            Some(Event::Key(key)) => {
                if let Some(action) = action_for_key(key) {
                    if !pager.apply(action) {
                        break;
                    }
                }
            }
            Some(Event::Resize(columns, rows)) => {
                pager.apply(PagerAction::Resize { columns, rows });
            }
            Some(_) => {}
            None => {
                if timer.fire(Instant::now()) {
                    pager.tick();
                }
            }
        }
    }
    log::debug!("Pager closed at offset {}", pager.state().offset());
    Ok(())
}
