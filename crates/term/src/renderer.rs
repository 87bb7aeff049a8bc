//! TerminalRenderer: flushes a framebuffer to a terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; every other frame only rewrites runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    prev: FrameBuffer,
    full_redraw: bool,
    buf: Vec<u8>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderer<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            prev: FrameBuffer::new(0, 0),
            full_redraw: true,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        self.invalidate();
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

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.full_redraw = true;
    }

    /// Draw `fb`, diffing against the previously drawn frame.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        if self.full_redraw || !self.prev.same_size(fb) {
            encode_full_into(fb, &mut self.buf)?;
        } else {
            encode_diff_into(&self.prev, fb, &mut self.buf)?;
        }
        self.flush_buf()?;

        self.prev.copy_from(fb);
        self.full_redraw = false;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style: Option<CellStyle> = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for cell in fb.row(y) {
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the runs of cells that differ between `prev` and `next`.
///
/// Both framebuffers must have the same size.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style: Option<CellStyle> = None;

    for y in 0..next.height() {
        let row = next.row(y);
        for (start, len) in changed_runs(prev.row(y), row) {
            out.queue(cursor::MoveTo(start as u16, y))?;
            for cell in &row[start..start + len] {
                if current_style != Some(cell.style) {
                    apply_style_into(out, cell.style)?;
                    current_style = Some(cell.style);
                }
                out.queue(Print(cell.ch))?;
            }
        }
    }

    if current_style.is_some() {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// `(start, len)` of every maximal run where the two rows differ.
fn changed_runs<'a, T: PartialEq>(
    prev: &'a [T],
    next: &'a [T],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < next.len() && prev.get(x) == next.get(x) {
            x += 1;
        }
        if x >= next.len() {
            return None;
        }
        let start = x;
        while x < next.len() && prev.get(x) != next.get(x) {
            x += 1;
        }
        Some((start, x - start))
    })
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
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

#[cfg(test)]
mod tests {
    use super::*;

    fn output(renderer: &mut TerminalRenderer<Vec<u8>>) -> String {
        let text = String::from_utf8_lossy(renderer.writer()).into_owned();
        renderer.writer_mut().clear();
        text
    }

    #[test]
    fn test_changed_runs_coalesce_adjacent_cells() {
        let a = [0, 0, 0, 0, 0, 0];
        let b = [0, 1, 1, 1, 0, 2];
        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 3), (5, 1)]);

        assert_eq!(changed_runs(&a, &a).count(), 0);
    }

    #[test]
    fn test_first_draw_is_full() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "AB", CellStyle::default());
        fb.put_str(0, 1, "CD", CellStyle::default());

        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        renderer.draw(&fb).unwrap();

        let text = output(&mut renderer);
        assert!(text.contains("AB"));
        assert!(text.contains("CD"));
    }

    #[test]
    fn test_unchanged_frame_writes_no_cells() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 0, "AB", CellStyle::default());

        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        renderer.draw(&fb).unwrap();
        output(&mut renderer);

        renderer.draw(&fb).unwrap();
        assert!(renderer.writer().is_empty());
    }

    #[test]
    fn test_diff_only_writes_changed_cells() {
        let mut fb = FrameBuffer::new(6, 1);
        fb.put_str(0, 0, "aaaaaa", CellStyle::default());

        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        renderer.draw(&fb).unwrap();
        output(&mut renderer);

        fb.put_char(3, 0, 'Z', CellStyle::default());
        renderer.draw(&fb).unwrap();

        let text = output(&mut renderer);
        assert!(text.contains('Z'));
        assert!(!text.contains('a'));
    }

    #[test]
    fn test_invalidate_forces_full_redraw() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "xyz", CellStyle::default());

        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        renderer.draw(&fb).unwrap();
        output(&mut renderer);

        renderer.invalidate();
        renderer.draw(&fb).unwrap();
        assert!(output(&mut renderer).contains("xyz"));
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = TerminalRenderer::with_writer(Vec::new());
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "xyz", CellStyle::default());
        renderer.draw(&fb).unwrap();
        output(&mut renderer);

        fb.resize(4, 1);
        renderer.draw(&fb).unwrap();
        assert!(output(&mut renderer).contains("xyz"));
    }
}
