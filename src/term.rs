use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use wavegradient::Rgb;

/// Upper half block: foreground paints the top sample, background the bottom.
pub(crate) const HALF_BLOCK: char = '▀';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Rgb,
    pub(crate) bg: Rgb,
}

impl Cell {
    pub(crate) const BLANK: Cell = Cell {
        ch: ' ',
        fg: Rgb::new(255, 255, 255),
        bg: Rgb::new(0, 0, 0),
    };

    pub(crate) fn pixels(upper: Rgb, lower: Rgb) -> Self {
        Self {
            ch: HALF_BLOCK,
            fg: upper,
            bg: lower,
        }
    }
}

/// Previous and next frame, so only changed cells are written.
pub(crate) struct Diff {
    pub(crate) w: u16,
    pub(crate) h: u16,
    prev: Vec<Cell>,
    next: Vec<Cell>,
    // Forces a full repaint after a resize; `prev` no longer matches the screen.
    dirty: bool,
}

impl Diff {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        let n = w as usize * h as usize;
        Self {
            w,
            h,
            prev: vec![Cell::BLANK; n],
            next: vec![Cell::BLANK; n],
            dirty: true,
        }
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        y as usize * self.w as usize + x as usize
    }

    pub(crate) fn set_next(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.w || y >= self.h {
            return;
        }
        let i = self.idx(x, y);
        self.next[i] = cell;
    }

    /// Writes `text` left to right from `(x, y)`, clipped at the right edge.
    pub(crate) fn put_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb, bg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            let Some(cx) = x.checked_add(i as u16) else {
                break;
            };
            if cx >= self.w {
                break;
            }
            self.set_next(cx, y, Cell { ch, fg, bg });
        }
    }

    /// Queues every cell that differs from the last flushed frame. Returns
    /// how many cells were written.
    pub(crate) fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;
        let mut written = 0;

        for y in 0..self.h {
            // Cursor advances by itself along a run of changed cells.
            let mut cursor_at: Option<u16> = None;
            for x in 0..self.w {
                let i = self.idx(x, y);
                let b = self.next[i];
                if !self.dirty && self.prev[i] == b {
                    continue;
                }

                if cursor_at != Some(x) {
                    queue!(out, cursor::MoveTo(x, y))?;
                }
                if last_bg != Some(b.bg) {
                    queue!(out, SetBackgroundColor(color(b.bg)))?;
                    last_bg = Some(b.bg);
                }
                if last_fg != Some(b.fg) {
                    queue!(out, SetForegroundColor(color(b.fg)))?;
                    last_fg = Some(b.fg);
                }
                queue!(out, Print(b.ch))?;
                cursor_at = Some(x.saturating_add(1));
                written += 1;
            }
        }

        self.prev.copy_from_slice(&self.next);
        self.dirty = false;
        Ok(written)
    }
}

fn restore_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(
        out,
        ResetColor,
        Clear(ClearType::All),
        cursor::Show,
        EnableLineWrap,
        LeaveAlternateScreen
    )
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) diff: Diff,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        let setup = terminal::enable_raw_mode().and_then(|()| terminal::size());
        let (cols, rows) = match setup {
            Ok(size) => size,
            Err(err) => {
                let _ = terminal::disable_raw_mode();
                let _ = restore_screen(&mut out);
                return Err(err.into());
            }
        };
        Ok(Self {
            out,
            diff: Diff::new(cols, rows),
        })
    }

    /// Leaves raw mode and the alternate screen. Both are attempted even
    /// if the first fails; the first error is returned.
    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        let raw = terminal::disable_raw_mode();
        let screen = restore_screen(&mut self.out);
        raw.and(screen)?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.diff.w && r == self.diff.h {
            return Ok(false);
        }
        self.diff = Diff::new(c, r);
        queue!(self.out, ResetColor, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<usize> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let written = self.diff.flush(&mut self.out)?;
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        Ok(written)
    }
}
