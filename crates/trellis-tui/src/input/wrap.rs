//! Visual-line layout of display text for multi-line editing.
//!
//! Lines are recomputed from scratch for every vertical key press; the
//! render width can change between frames and nothing here is cached.

use crate::input::segment::SegmentBuffer;
use crate::text::{char_width, display_width, prev_boundary};

/// Byte range of one visual line within the display text. `soft` lines
/// continue on the next visual line without a hard newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    pub start: usize,
    pub end: usize,
    pub soft: bool,
}

/// Split `text` on hard newlines and soft-wrap each line at `width`
/// columns. A width of zero disables soft wrapping.
pub fn visual_lines(text: &str, width: u16) -> Vec<VisualLine> {
    let width = width as usize;
    let mut lines = Vec::new();
    let mut line_start = 0;

    for hard in text.split('\n') {
        let mut start = line_start;
        let mut used = 0;
        for (i, c) in hard.char_indices() {
            let w = char_width(c);
            if width > 0 && used > 0 && used + w > width {
                lines.push(VisualLine {
                    start,
                    end: line_start + i,
                    soft: true,
                });
                start = line_start + i;
                used = 0;
            }
            used += w;
        }
        lines.push(VisualLine {
            start,
            end: line_start + hard.len(),
            soft: false,
        });
        line_start += hard.len() + 1;
    }
    lines
}

/// Visual row and column of byte offset `cursor`.
pub fn cursor_position(text: &str, lines: &[VisualLine], cursor: usize) -> (usize, usize) {
    let row = lines
        .iter()
        .rposition(|line| line.start <= cursor)
        .unwrap_or(0);
    let Some(line) = lines.get(row) else {
        return (0, 0);
    };
    let end = cursor.min(line.end).max(line.start);
    (row, display_width(&text[line.start..end]))
}

/// Offset on `line` whose column is closest to `column` without passing it.
fn offset_at_column(text: &str, line: &VisualLine, column: usize) -> usize {
    let mut used = 0;
    for (i, c) in text[line.start..line.end].char_indices() {
        let w = char_width(c);
        if used + w > column {
            return line.start + i;
        }
        used += w;
    }
    if line.soft {
        // The end of a soft line is the start of the next one.
        prev_boundary(text, line.end).unwrap_or(line.start).max(line.start)
    } else {
        line.end
    }
}

impl SegmentBuffer {
    /// Move to the visual line above. `false` on the first line.
    pub fn move_up(&mut self, width: u16) -> bool {
        self.move_vertical(width, false)
    }

    /// Move to the visual line below. `false` on the last line.
    pub fn move_down(&mut self, width: u16) -> bool {
        self.move_vertical(width, true)
    }

    fn move_vertical(&mut self, width: u16, down: bool) -> bool {
        let text = self.display_text();
        let lines = visual_lines(&text, width);
        let (row, column) = cursor_position(&text, &lines, self.cursor());

        let before = self.cursor();
        let step = |r: usize| if down { r.checked_add(1) } else { r.checked_sub(1) };
        let mut target = step(row);
        // Landing inside an atomic segment snaps to one of its edges, which
        // may be back on the starting row; keep going until the row changes.
        while let Some(line) = target.and_then(|t| lines.get(t)) {
            self.set_cursor(offset_at_column(&text, line, column));
            let (landed, _) = cursor_position(&text, &lines, self.cursor());
            if (down && landed > row) || (!down && landed < row) {
                return true;
            }
            target = target.and_then(step);
        }
        self.set_cursor(before);
        false
    }
}
