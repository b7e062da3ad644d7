use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{ContentStyle, PrintStyledContent, StyledContent};
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;

use crate::render::{Cell, CellBuffer};
use crate::style::Style;

/// Writes frames to a terminal, redrawing only rows that changed since the
/// previous frame.
pub struct TerminalWriter<W: Write> {
    out: W,
    previous: Vec<Vec<Cell>>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: Vec::new(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Forget the previous frame so the next one is drawn in full.
    pub fn invalidate(&mut self) -> io::Result<()> {
        self.previous.clear();
        queue!(self.out, Clear(ClearType::All))?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &CellBuffer) -> io::Result<()> {
        if self.previous.len() != frame.height() as usize {
            self.previous.clear();
        }

        queue!(self.out, Hide)?;
        for y in 0..frame.height() {
            let row: Vec<Cell> = (0..frame.width())
                .filter_map(|x| frame.get(x, y).copied())
                .collect();
            if self.previous.get(y as usize) == Some(&row) {
                continue;
            }
            queue!(self.out, MoveTo(0, y))?;
            self.write_row(&row)?;
            match self.previous.get_mut(y as usize) {
                Some(slot) => *slot = row,
                None => self.previous.push(row),
            }
        }

        if let Some(cursor) = frame.cursor() {
            queue!(self.out, MoveTo(cursor.x, cursor.y), Show)?;
        }
        self.out.flush()
    }

    /// Emit one row as runs of equally styled text.
    fn write_row(&mut self, row: &[Cell]) -> io::Result<()> {
        let mut run = String::new();
        let mut style: Option<Style> = None;
        for cell in row.iter().filter(|c| !c.is_continuation()) {
            if style.is_some_and(|s| s != cell.style) {
                self.flush_run(&mut run, style)?;
            }
            style = Some(cell.style);
            run.push(cell.ch);
        }
        self.flush_run(&mut run, style)
    }

    fn flush_run(&mut self, run: &mut String, style: Option<Style>) -> io::Result<()> {
        if run.is_empty() {
            return Ok(());
        }
        let content = StyledContent::new(ContentStyle::from(style.unwrap_or_default()), run.as_str());
        queue!(self.out, PrintStyledContent(content))?;
        run.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusManager;
    use crate::render::PaintContext;

    fn frame(text: &str) -> CellBuffer {
        let mut buf = CellBuffer::new(6, 2);
        let focus = FocusManager::new();
        let mut ctx = PaintContext::new(&mut buf, &focus);
        ctx.print(0, 0, text, Style::default());
        ctx.print(0, 1, "static", Style::default().bold());
        buf
    }

    #[test]
    fn first_frame_draws_every_row() {
        let mut writer = TerminalWriter::new(Vec::new());
        writer.draw(&frame("hello")).unwrap();
        let out = String::from_utf8_lossy(writer.get_ref()).to_string();
        assert!(out.contains("hello"), "{out:?}");
        assert!(out.contains("static"), "{out:?}");
    }

    #[test]
    fn unchanged_rows_are_skipped() {
        let mut writer = TerminalWriter::new(Vec::new());
        writer.draw(&frame("hello")).unwrap();
        let before = writer.get_ref().len();
        writer.draw(&frame("howdy")).unwrap();
        let second = String::from_utf8_lossy(&writer.get_ref()[before..]).to_string();
        assert!(second.contains("howdy"), "{second:?}");
        assert!(!second.contains("static"), "{second:?}");
    }

    #[test]
    fn invalidate_forces_full_redraw() {
        let mut writer = TerminalWriter::new(Vec::new());
        writer.draw(&frame("hello")).unwrap();
        writer.invalidate().unwrap();
        let before = writer.get_ref().len();
        writer.draw(&frame("hello")).unwrap();
        let second = String::from_utf8_lossy(&writer.get_ref()[before..]).to_string();
        assert!(second.contains("static"), "{second:?}");
    }
}
