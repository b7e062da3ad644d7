//! Text selection over a list of lines.
//!
//! Positions are `(line, column)` where the column is a byte offset into the
//! line. Columns that land past the end of a line or inside a code point are
//! clamped when text is extracted.

mod mapping;

pub use mapping::ScreenMapper;

use crate::text::{floor_boundary, is_word_char, next_boundary, prev_boundary};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

impl TextPosition {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Selection state driven by mouse press/drag/release.
///
/// `start` is where the selection began and `end` follows the pointer, so
/// `end` may precede `start`. Use [`Selection::normalized`] for an ordered
/// pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: TextPosition,
    pub end: TextPosition,
    pub active: bool,
}

impl Selection {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self {
            start,
            end,
            active: false,
        }
    }

    /// Begin a drag at `point`.
    pub fn start(&mut self, point: TextPosition) {
        self.start = point;
        self.end = point;
        self.active = true;
    }

    /// Move the free end while a drag is in progress.
    pub fn update(&mut self, point: TextPosition) {
        if self.active {
            self.end = point;
        }
    }

    pub fn complete(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn has_selection(&self) -> bool {
        !self.is_empty()
    }

    /// `(min, max)` regardless of drag direction.
    pub fn normalized(&self) -> (TextPosition, TextPosition) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Half-open: the start is selected, the end is not.
    pub fn contains(&self, pos: TextPosition) -> bool {
        let (start, end) = self.normalized();
        start <= pos && pos < end
    }

    /// Selected column span on `line` of length `line_len`, if any.
    pub fn line_range(&self, line: usize, line_len: usize) -> Option<(usize, usize)> {
        let (start, end) = self.normalized();
        if self.is_empty() || line < start.line || line > end.line {
            return None;
        }
        let from = if line == start.line {
            start.column.min(line_len)
        } else {
            0
        };
        let to = if line == end.line {
            end.column.min(line_len)
        } else {
            line_len
        };
        Some((from, to.max(from)))
    }

    /// Concatenate the selected part of every spanned line, joined by `\n`.
    pub fn extract_selected_text<S: AsRef<str>>(&self, lines: &[S]) -> String {
        let (start, end) = self.normalized();
        let mut parts = Vec::new();
        for index in start.line..=end.line.min(lines.len().saturating_sub(1)) {
            let Some(line) = lines.get(index) else {
                break;
            };
            let line = line.as_ref();
            if let Some((from, to)) = self.line_range(index, line.len()) {
                parts.push(&line[floor_boundary(line, from)..floor_boundary(line, to)]);
            }
        }
        parts.join("\n")
    }
}

/// Maximal run of word characters around `pos`. Off a word, the selection
/// is empty at `pos`.
pub fn select_word<S: AsRef<str>>(lines: &[S], pos: TextPosition) -> Selection {
    let Some(line) = lines.get(pos.line).map(AsRef::as_ref) else {
        return Selection::new(pos, pos);
    };
    let column = floor_boundary(line, pos.column);
    let on_word = line[column..].chars().next().is_some_and(is_word_char);
    if !on_word {
        let at = TextPosition::new(pos.line, column);
        return Selection::new(at, at);
    }

    let mut from = column;
    while let Some(prev) = prev_boundary(line, from) {
        if !line[prev..].chars().next().is_some_and(is_word_char) {
            break;
        }
        from = prev;
    }
    let mut to = column;
    while let Some(next) = next_boundary(line, to) {
        if !line[to..].chars().next().is_some_and(is_word_char) {
            break;
        }
        to = next;
    }
    Selection::new(
        TextPosition::new(pos.line, from),
        TextPosition::new(pos.line, to),
    )
}

/// Column 0 through the end of `line`.
pub fn select_line<S: AsRef<str>>(lines: &[S], line: usize) -> Selection {
    let len = lines.get(line).map_or(0, |l| l.as_ref().len());
    Selection::new(TextPosition::new(line, 0), TextPosition::new(line, len))
}
