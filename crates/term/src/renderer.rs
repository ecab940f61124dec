//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Two paths: a full repaint of the whole framebuffer, and a patch that only
//! rewrites the cells the world reported as dirty plus the status row.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::DirtyCell;
use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw_full(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_full_into(fb, &mut self.buf)?;
        self.flush_buf()
    }

    /// Rewrite `cells` and the whole of `status_row`.
    pub fn draw_patch(&mut self, fb: &FrameBuffer, cells: &[DirtyCell], status_row: u16) -> Result<()> {
        self.buf.clear();
        encode_cells_into(fb, cells, &mut self.buf)?;
        encode_row_into(fb, status_row, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        if y + 1 < fb.height() {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the given cells, reading their styled content from `fb`.
///
/// Horizontally adjacent cells share one cursor move.
pub fn encode_cells_into(fb: &FrameBuffer, cells: &[DirtyCell], out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;
    let mut cursor_at: Option<(u16, u16)> = None;

    for dc in cells {
        let Some(cell) = fb.get(dc.x, dc.y) else {
            continue;
        };
        if cursor_at != Some((dc.x, dc.y)) {
            out.queue(cursor::MoveTo(dc.x, dc.y))?;
        }
        if current_style != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            current_style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        cursor_at = Some((dc.x.saturating_add(1), dc.y));
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode one full row of `fb`. Out-of-range rows encode nothing.
pub fn encode_row_into(fb: &FrameBuffer, y: u16, out: &mut Vec<u8>) -> Result<()> {
    if y >= fb.height() {
        return Ok(());
    }
    out.queue(cursor::MoveTo(0, y))?;
    let mut current_style: Option<CellStyle> = None;
    for x in 0..fb.width() {
        let cell = fb.get(x, y).unwrap_or_default();
        if current_style != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            current_style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
