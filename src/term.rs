use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::surface::{Rect, Surface};
use crate::PixelInt;

/// Terminal columns used by one grid cell, so cells look roughly square.
const COLUMNS_PER_CELL: usize = 2;
const TEXT_COLOR: Color = Color::White;
const HELP_LINE: &str = "Arrows/WASD move, r restart, Esc quit";

type Coords = (u16, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::Reset, bg: Color::Reset };
}

/// Maps the pixel canvas onto the terminal, one grid cell per two columns.
///
/// Drawing goes to an off-screen buffer; `present` prints only the glyphs that
/// changed since the previous frame.
pub struct TermSurface {
    width: PixelInt,
    height: PixelInt,
    cell_width: PixelInt,
    columns: usize,
    rows: usize,
    origin: Coords,
    stdout: Stdout,
    screen: Vec<Glyph>,
    shown: Vec<Glyph>,
    active: bool,
}

impl TermSurface {
    pub fn new(width: PixelInt, height: PixelInt, cell_width: PixelInt) -> Result<Self> {
        ensure!(cell_width > 0, "cell width must be positive, got {}", cell_width);
        ensure!(width > 0 && height > 0, "canvas has no drawable area ({}x{})", width, height);

        let columns = (width / cell_width) as usize * COLUMNS_PER_CELL;
        let rows = (height / cell_width) as usize;

        let (term_width, term_height) = terminal::size().context("Error reading terminal size")?;
        ensure!(
            columns + 2 <= term_width as usize && rows + 2 <= term_height as usize,
            "terminal is {}x{} but the board needs {}x{}",
            term_width, term_height, columns + 2, rows + 2
        );

        let origin = (
            (term_width - (columns + 2) as u16) / 2,
            (term_height - (rows + 2) as u16) / 2,
        );

        Ok(TermSurface {
            width,
            height,
            cell_width,
            columns,
            rows,
            origin,
            stdout: stdout(),
            screen: vec![Glyph::BLANK; columns * rows],
            shown: vec![Glyph::BLANK; columns * rows],
            active: false,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        self.active = true;
        self.set_raw_mode(true)?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
            .context("Error preparing the terminal")?;

        self.draw_borders()?;
        self.flush()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        self.set_raw_mode(false)?;
        execute!(self.stdout, ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> Result<()> {
        let (left, top) = self.origin;
        let width = (self.columns + 2) as u16;
        let height = (self.rows + 2) as u16;
        let end_x = left + width - 1;
        let end_y = top + height - 1;

        for x in left..=end_x {
            let ch = if x == left || x == end_x {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in top + 1..end_y {
            self.print_at((left, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        let (_, term_height) = terminal::size().context("Error reading terminal size")?;
        if end_y + 1 < term_height {
            queue!(self.stdout, cursor::MoveTo(left, end_y + 1), Print(HELP_LINE))?;
        }

        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing.")
    }

    fn set_raw_mode(&self, option: bool) -> Result<()> {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.context("Error setting raw mode.")
    }

    fn column(&self, x: PixelInt) -> usize {
        let col = x.max(0) as usize * COLUMNS_PER_CELL / self.cell_width as usize;
        col.min(self.columns)
    }

    fn row(&self, y: PixelInt) -> usize {
        (y.max(0) / self.cell_width).min(self.rows as PixelInt) as usize
    }

    /// Terminal cells covered by `rect`, as column and row ranges.
    fn span(&self, rect: Rect) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
        let cols = self.column(rect.x)..self.column(rect.x + rect.width);
        let rows = self.row(rect.y)..self.row(rect.y + rect.height);
        (cols, rows)
    }

    fn glyph_mut(&mut self, col: usize, row: usize) -> &mut Glyph {
        &mut self.screen[row * self.columns + col]
    }
}

impl Surface for TermSurface {
    fn size(&self) -> (PixelInt, PixelInt) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, rect: Rect) {
        let (cols, rows) = self.span(rect);
        for row in rows {
            for col in cols.clone() {
                *self.glyph_mut(col, row) = Glyph::BLANK;
            }
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (cols, rows) = self.span(rect);
        for row in rows {
            for col in cols.clone() {
                *self.glyph_mut(col, row) = Glyph { ch: ' ', fg: color, bg: color };
            }
        }
    }

    // A terminal cell has no room for a real outline, so the rect gets brackets.
    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let (cols, rows) = self.span(rect);
        if cols.is_empty() {
            return;
        }

        let (first, last) = (cols.start, cols.end - 1);
        for row in rows {
            for (col, ch) in [(first, '['), (last, ']')] {
                let glyph = self.glyph_mut(col, row);
                glyph.ch = ch;
                glyph.fg = color;
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: PixelInt, y: PixelInt) {
        if self.rows == 0 {
            return;
        }

        let row = self.row(y).min(self.rows - 1);
        let start = self.column(x);

        for (col, ch) in (start..self.columns).zip(text.chars()) {
            let glyph = self.glyph_mut(col, row);
            glyph.ch = ch;
            glyph.fg = TEXT_COLOR;
        }
    }

    fn present(&mut self) -> Result<()> {
        let (left, top) = self.origin;

        for row in 0..self.rows {
            for col in 0..self.columns {
                let idx = row * self.columns + col;
                let glyph = self.screen[idx];
                if glyph == self.shown[idx] {
                    continue;
                }

                queue!(
                    self.stdout,
                    cursor::MoveTo(left + 1 + col as u16, top + 1 + row as u16),
                    SetForegroundColor(glyph.fg),
                    SetBackgroundColor(glyph.bg),
                    Print(glyph.ch)
                )?;
                self.shown[idx] = glyph;
            }
        }

        queue!(self.stdout, ResetColor)?;
        self.flush()
    }
}

impl Drop for TermSurface {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Waits up to `timeout` for a key press.
pub fn poll_key(timeout: Duration) -> Result<Option<KeyEvent>> {
    if !poll(timeout).context("Error polling terminal events")? {
        return Ok(None);
    }

    match read().context("Error reading terminal event")? {
        Event::Key(ev) => Ok(Some(ev)),
        _ => Ok(None),
    }
}
