//! Editable buffer stored as plain and atomic segments.
//!
//! The cursor is a byte offset into the *display* text (the concatenation of
//! every segment's display field). It always sits on a char boundary and
//! never inside a special segment. Scans are linear in the number of
//! segments, which stays in the tens for an input line.

use crate::text::{decode_lossy, floor_boundary, is_word_char, next_boundary, prev_boundary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    display: String,
    actual: String,
    paste: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            display: text.clone(),
            actual: text,
            paste: false,
        }
    }

    /// An atomic unit shown as `display` that stands for `actual`.
    pub fn special(display: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            actual: actual.into(),
            paste: false,
        }
    }

    pub fn paste(display: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            paste: true,
            ..Self::special(display, actual)
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn actual(&self) -> &str {
        &self.actual
    }

    pub fn is_paste(&self) -> bool {
        self.paste
    }

    /// Special segments are inserted and deleted whole.
    pub fn is_special(&self) -> bool {
        self.paste || self.display != self.actual
    }
}

/// Editing behaviour shared by a buffer and the widget that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOptions {
    /// Maximum logical length in code points.
    pub max_length: Option<usize>,
    /// Collapse multi-line pastes into a single caption segment.
    pub paste_placeholder: bool,
    /// Newlines are literal text rather than an atomic glyph.
    pub multiline: bool,
    pub newline_glyph: String,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            max_length: None,
            paste_placeholder: true,
            multiline: false,
            newline_glyph: "↵".to_string(),
        }
    }
}

/// One cursor step: where it lands, and the char crossed (`None` when the
/// step crossed a whole special segment).
type Unit = (usize, Option<char>);

#[derive(Debug, Clone, Default)]
pub struct SegmentBuffer {
    segments: Vec<Segment>,
    cursor: usize,
    options: InputOptions,
}

impl SegmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: InputOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut InputOptions {
        &mut self.options
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn display_text(&self) -> String {
        self.segments.iter().map(|s| s.display.as_str()).collect()
    }

    /// The logical value.
    pub fn value(&self) -> String {
        self.segments.iter().map(|s| s.actual.as_str()).collect()
    }

    pub fn display_len(&self) -> usize {
        self.segments.iter().map(|s| s.display.len()).sum()
    }

    /// Logical length in code points.
    pub fn char_count(&self) -> usize {
        self.segments.iter().map(|s| s.actual.chars().count()).sum()
    }

    /// Code points of display text before the cursor.
    pub fn cursor_chars(&self) -> usize {
        self.display_text()[..self.cursor].chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment holding `offset` plus the offset within it. A boundary
    /// belongs to the segment that ends there.
    fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (i, seg) in self.segments.iter().enumerate() {
            let end = start + seg.display.len();
            if offset <= end {
                return Some((i, offset - start));
            }
            start = end;
        }
        None
    }

    /// Like [`Self::locate`], but a boundary belongs to the segment that
    /// starts there.
    fn locate_forward(&self, offset: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for (i, seg) in self.segments.iter().enumerate() {
            let end = start + seg.display.len();
            if offset < end {
                return Some((i, offset - start));
            }
            start = end;
        }
        None
    }

    fn unit_before(&self, offset: usize) -> Option<Unit> {
        if offset == 0 {
            return None;
        }
        let (idx, off) = self.locate(offset)?;
        let seg = &self.segments[idx];
        if seg.is_special() {
            return Some((offset - off, None));
        }
        let prev = prev_boundary(&seg.display, off)?;
        let ch = seg.display[prev..].chars().next();
        Some((offset - (off - prev), ch))
    }

    fn unit_after(&self, offset: usize) -> Option<Unit> {
        let (idx, off) = self.locate_forward(offset)?;
        let seg = &self.segments[idx];
        if seg.is_special() {
            return Some((offset - off + seg.display.len(), None));
        }
        let next = next_boundary(&seg.display, off)?;
        let ch = seg.display[off..].chars().next();
        Some((offset + (next - off), ch))
    }

    /// Insert plain text at the cursor.
    ///
    /// Returns `false` when the text was refused because of the length limit.
    pub fn insert_str(&mut self, text: &str) -> bool {
        self.insert_segment(Segment::plain(text))
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    /// Literal `\n` in multi-line mode, an atomic glyph otherwise.
    pub fn insert_newline(&mut self) -> bool {
        if self.options.multiline {
            self.insert_str("\n")
        } else {
            let glyph = self.options.newline_glyph.clone();
            self.insert_segment(Segment::special(glyph, "\n"))
        }
    }

    pub fn insert_segment(&mut self, segment: Segment) -> bool {
        if segment.display.is_empty() {
            return false;
        }
        if let Some(max) = self.options.max_length {
            if self.char_count() + segment.actual.chars().count() > max {
                tracing::trace!(max, "insert refused at length limit");
                return false;
            }
        }

        let len = segment.display.len();
        match self.locate(self.cursor) {
            None => self.segments.push(segment),
            Some((idx, off)) if self.segments[idx].is_special() => {
                let at = if off == 0 { idx } else { idx + 1 };
                self.segments.insert(at, segment);
            }
            Some((idx, off)) if segment.is_special() => {
                let target = &mut self.segments[idx];
                let after = Segment::plain(target.display.split_off(off));
                target.actual.truncate(off);
                self.segments.insert(idx + 1, after);
                self.segments.insert(idx + 1, segment);
            }
            Some((idx, off)) => {
                let target = &mut self.segments[idx];
                target.display.insert_str(off, &segment.display);
                target.actual.insert_str(off, &segment.actual);
            }
        }

        self.cursor += len;
        self.merge_adjacent();
        true
    }

    /// Insert pasted text. Multi-line content becomes a single caption
    /// segment when placeholders are enabled. A trailing newline does not
    /// start another line.
    ///
    /// Without a caption, a single-line buffer keeps each pasted newline as
    /// an atomic glyph, the same unit [`Self::insert_newline`] produces.
    pub fn paste(&mut self, content: &str) -> bool {
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
        if normalized.is_empty() {
            return false;
        }
        let lines = normalized.lines().count();
        if lines > 1 && self.options.paste_placeholder {
            return self
                .insert_segment(Segment::paste(format!("[pasted {lines} lines]"), normalized));
        }
        if self.options.multiline || !normalized.contains('\n') {
            return self.insert_str(&normalized);
        }

        if let Some(max) = self.options.max_length {
            if self.char_count() + normalized.chars().count() > max {
                tracing::trace!(max, "paste refused at length limit");
                return false;
            }
        }
        for (i, piece) in normalized.split('\n').enumerate() {
            if i > 0 {
                self.insert_newline();
            }
            self.insert_str(piece);
        }
        true
    }

    /// Paste raw bytes, replacing malformed sequences.
    pub fn paste_bytes(&mut self, bytes: &[u8]) -> bool {
        self.paste(&decode_lossy(bytes))
    }

    /// Remove the unit before the cursor. `false` at the start of the buffer.
    pub fn delete_backward(&mut self) -> bool {
        match self.unit_before(self.cursor) {
            Some((start, _)) => {
                self.remove_range(start, self.cursor);
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    /// Remove the unit after the cursor. `false` at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        match self.unit_after(self.cursor) {
            Some((end, _)) => {
                self.remove_range(self.cursor, end);
                true
            }
            None => false,
        }
    }

    /// Delete back over trailing non-word characters, then the word before
    /// them. A special segment directly before the cursor goes on its own.
    pub fn delete_word_backward(&mut self) -> bool {
        let start = self.word_start_before(self.cursor);
        if start == self.cursor {
            return false;
        }
        self.remove_range(start, self.cursor);
        self.cursor = start;
        true
    }

    fn word_start_before(&self, offset: usize) -> usize {
        match self.unit_before(offset) {
            None => offset,
            Some((start, None)) => start,
            Some(_) => {
                let mut pos = offset;
                while let Some((start, Some(c))) = self.unit_before(pos) {
                    if is_word_char(c) {
                        break;
                    }
                    pos = start;
                }
                while let Some((start, Some(c))) = self.unit_before(pos) {
                    if !is_word_char(c) {
                        break;
                    }
                    pos = start;
                }
                pos
            }
        }
    }

    fn word_end_after(&self, offset: usize) -> usize {
        match self.unit_after(offset) {
            None => offset,
            Some((end, None)) => end,
            Some(_) => {
                let mut pos = offset;
                while let Some((end, Some(c))) = self.unit_after(pos) {
                    if is_word_char(c) {
                        break;
                    }
                    pos = end;
                }
                while let Some((end, Some(c))) = self.unit_after(pos) {
                    if !is_word_char(c) {
                        break;
                    }
                    pos = end;
                }
                pos
            }
        }
    }

    /// Remove display range `from..to`, which must cover only whole special
    /// segments.
    fn remove_range(&mut self, from: usize, to: usize) {
        let mut start = 0;
        self.segments.retain_mut(|seg| {
            let len = seg.display.len();
            let (lo, hi) = (from.max(start), to.min(start + len));
            start += len;
            if lo >= hi {
                return true;
            }
            if seg.is_special() {
                return false;
            }
            let range = lo - (start - len)..hi - (start - len);
            seg.display.replace_range(range.clone(), "");
            seg.actual.replace_range(range, "");
            true
        });
        self.merge_adjacent();
    }

    /// Join neighbouring plain segments and drop empty ones.
    fn merge_adjacent(&mut self) {
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for seg in self.segments.drain(..) {
            if !seg.is_special() && seg.display.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if !last.is_special() && !seg.is_special() => {
                    last.display.push_str(&seg.display);
                    last.actual.push_str(&seg.actual);
                }
                _ => merged.push(seg),
            }
        }
        self.segments = merged;
    }

    pub fn move_left(&mut self) -> bool {
        match self.unit_before(self.cursor) {
            Some((start, _)) => {
                self.cursor = start;
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.unit_after(self.cursor) {
            Some((end, _)) => {
                self.cursor = end;
                true
            }
            None => false,
        }
    }

    pub fn move_word_left(&mut self) -> bool {
        let target = self.word_start_before(self.cursor);
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    pub fn move_word_right(&mut self) -> bool {
        let target = self.word_end_after(self.cursor);
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.display_len();
    }

    /// Start of the hard line holding the cursor.
    pub fn move_line_home(&mut self) {
        let text = self.display_text();
        self.cursor = text[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    /// End of the hard line holding the cursor.
    pub fn move_line_end(&mut self) {
        let text = self.display_text();
        self.cursor = text[self.cursor..]
            .find('\n')
            .map_or(text.len(), |i| self.cursor + i);
    }

    /// Place the cursor at a display offset, clamped to the buffer and
    /// snapped to the nearest edge of a special segment.
    pub fn set_cursor(&mut self, offset: usize) {
        let offset = offset.min(self.display_len());
        let mut start = 0;
        for seg in &self.segments {
            let end = start + seg.display.len();
            if offset > start && offset < end {
                self.cursor = if seg.is_special() {
                    if offset - start <= end - offset {
                        start
                    } else {
                        end
                    }
                } else {
                    start + floor_boundary(&seg.display, offset - start)
                };
                return;
            }
            start = end;
        }
        self.cursor = offset;
    }

    /// Replace the content, ignoring the length limit. Newlines in a
    /// single-line buffer become atomic glyphs.
    pub fn set_value(&mut self, text: &str) {
        self.segments.clear();
        if self.options.multiline {
            self.segments.push(Segment::plain(text));
        } else {
            for (i, piece) in text.split('\n').enumerate() {
                if i > 0 {
                    let glyph = self.options.newline_glyph.clone();
                    self.segments.push(Segment::special(glyph, "\n"));
                }
                self.segments.push(Segment::plain(piece));
            }
        }
        self.merge_adjacent();
        self.cursor = self.display_len();
    }

    pub fn clear(&mut self) -> bool {
        let had_content = !self.segments.is_empty();
        self.segments.clear();
        self.cursor = 0;
        had_content
    }

    /// Return the logical value and empty the buffer.
    pub fn take(&mut self) -> String {
        let value = self.value();
        self.clear();
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(text: &str) -> SegmentBuffer {
        let mut buf = SegmentBuffer::new();
        buf.insert_str(text);
        buf
    }

    fn assert_merged(buf: &SegmentBuffer) {
        for pair in buf.segments().windows(2) {
            assert!(
                pair[0].is_special() || pair[1].is_special(),
                "adjacent plain segments: {:?}",
                buf.segments()
            );
        }
    }

    #[test]
    fn insert_advances_cursor_by_display_len() {
        let mut buf = SegmentBuffer::new();
        assert!(buf.insert_str("héllo"));
        assert_eq!(buf.cursor(), "héllo".len());
        assert_eq!(buf.value(), "héllo");
        assert_eq!(buf.segments().len(), 1);
    }

    #[test]
    fn insert_in_middle_splices_plain_segment() {
        let mut buf = buffer("held");
        buf.set_cursor(2);
        buf.insert_str("l");
        buf.insert_str("lo wor");
        assert_eq!(buf.value(), "hello world");
        assert_eq!(buf.segments().len(), 1);
    }

    #[test]
    fn special_insert_splits_plain_segment() {
        let mut buf = buffer("abcd");
        buf.set_cursor(2);
        buf.insert_segment(Segment::special("<x>", "X"));
        assert_eq!(buf.display_text(), "ab<x>cd");
        assert_eq!(buf.value(), "abXcd");
        assert_eq!(buf.segments().len(), 3);
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn typing_after_special_does_not_merge_into_it() {
        let mut buf = SegmentBuffer::new();
        buf.insert_segment(Segment::special("<x>", "X"));
        buf.insert_str("y");
        buf.move_home();
        buf.insert_str("w");
        assert_eq!(buf.display_text(), "w<x>y");
        assert_eq!(buf.value(), "wXy");
        assert_eq!(buf.segments().len(), 3);
        assert_merged(&buf);
    }

    #[test]
    fn word_deletion_scenario() {
        let mut buf = buffer("hello world test");
        buf.delete_word_backward();
        assert_eq!(buf.value(), "hello world ");
        buf.delete_word_backward();
        assert_eq!(buf.value(), "hello ");
        buf.delete_word_backward();
        assert_eq!(buf.value(), "");
        assert!(!buf.delete_word_backward());
    }

    #[test]
    fn word_deletion_stops_at_punctuation_boundary() {
        let mut buf = buffer("path/to_file.rs");
        buf.delete_word_backward();
        assert_eq!(buf.value(), "path/to_file.");
        buf.delete_word_backward();
        assert_eq!(buf.value(), "path/");
    }

    #[test]
    fn word_deletion_removes_adjacent_special_alone() {
        let mut buf = buffer("word ");
        buf.paste("a\nb");
        buf.delete_word_backward();
        assert_eq!(buf.value(), "word ");
    }

    #[test]
    fn paste_placeholder_scenario() {
        let mut buf = buffer("x");
        let before = buf.cursor();
        assert!(buf.paste("one\ntwo\nthree"));
        assert_eq!(buf.segments().len(), 2);
        let seg = &buf.segments()[1];
        assert_eq!(seg.display(), "[pasted 3 lines]");
        assert_eq!(seg.actual(), "one\ntwo\nthree");
        assert!(seg.is_paste());

        assert!(buf.delete_backward());
        assert_eq!(buf.cursor(), before);
        assert_eq!(buf.value(), "x");
    }

    #[test]
    fn paste_normalizes_crlf_and_counts_lines() {
        let mut buf = SegmentBuffer::new();
        buf.paste("a\r\nb\r\n");
        assert_eq!(buf.segments()[0].display(), "[pasted 2 lines]");
        assert_eq!(buf.value(), "a\nb\n");
    }

    #[test]
    fn paste_without_placeholder_keeps_newlines_atomic() {
        let mut buf = SegmentBuffer::with_options(InputOptions {
            paste_placeholder: false,
            ..InputOptions::default()
        });
        assert!(buf.paste("x\ny"));
        assert_eq!(buf.display_text(), "x↵y");
        assert_eq!(buf.value(), "x\ny");
        assert_eq!(buf.segments().len(), 3);
        assert!(buf.segments()[1].is_special());
        assert_merged(&buf);

        buf.move_left();
        assert!(buf.delete_backward());
        assert_eq!(buf.value(), "xy");
        assert!(buf.delete_backward());
        assert_eq!(buf.value(), "y");
    }

    #[test]
    fn multiline_paste_without_placeholder_is_literal() {
        let mut buf = SegmentBuffer::with_options(InputOptions {
            paste_placeholder: false,
            multiline: true,
            ..InputOptions::default()
        });
        buf.paste("a\nb");
        assert_eq!(buf.display_text(), "a\nb");
        assert_eq!(buf.segments().len(), 1);
        assert!(!buf.segments()[0].is_special());
    }

    #[test]
    fn trailing_newline_paste_is_one_line() {
        let mut buf = buffer("ab");
        assert!(buf.paste("cd\n"));
        assert_eq!(buf.display_text(), "abcd↵");
        assert_eq!(buf.value(), "abcd\n");
        assert!(buf.segments()[1].is_special());
        assert!(!buf.display_text().contains('\n'));

        assert!(buf.delete_backward());
        assert_eq!(buf.value(), "abcd");
    }

    #[test]
    fn single_line_set_value_splits_newlines() {
        let mut buf = SegmentBuffer::new();
        buf.set_value("a\nb");
        assert_eq!(buf.display_text(), "a↵b");
        assert_eq!(buf.value(), "a\nb");
        assert_eq!(buf.cursor(), buf.display_len());
        buf.set_value("");
        assert!(buf.is_empty());
    }

    #[test]
    fn single_line_paste_is_plain() {
        let mut buf = SegmentBuffer::new();
        buf.paste("just text");
        assert!(!buf.segments()[0].is_special());
    }

    #[test]
    fn paste_bytes_replaces_malformed_input() {
        let mut buf = SegmentBuffer::new();
        buf.paste_bytes(&[b'o', 0xFF, b'k']);
        assert_eq!(buf.value(), "o\u{FFFD}k");
    }

    #[test]
    fn delete_removes_one_code_point() {
        let mut buf = buffer("a日é");
        assert!(buf.delete_backward());
        assert_eq!(buf.value(), "a日");
        buf.move_home();
        assert!(buf.delete_forward());
        assert_eq!(buf.value(), "日");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn delete_at_boundary_is_not_consumed() {
        let mut buf = buffer("ab");
        assert!(!buf.delete_forward());
        buf.move_home();
        assert!(!buf.delete_backward());
        assert_eq!(buf.value(), "ab");
    }

    #[test]
    fn delete_forward_removes_special_whole() {
        let mut buf = buffer("ab");
        buf.set_cursor(1);
        buf.insert_newline();
        buf.set_cursor(1);
        assert!(buf.delete_forward());
        assert_eq!(buf.value(), "ab");
        assert_eq!(buf.segments().len(), 1);
    }

    #[test]
    fn single_line_newline_is_atomic_glyph() {
        let mut buf = buffer("a");
        buf.insert_newline();
        buf.insert_str("b");
        assert_eq!(buf.display_text(), "a↵b");
        assert_eq!(buf.value(), "a\nb");
        buf.move_left();
        buf.move_left();
        assert_eq!(buf.cursor(), 1);
    }

    #[test]
    fn multiline_newline_is_plain_text() {
        let mut buf = SegmentBuffer::with_options(InputOptions {
            multiline: true,
            ..InputOptions::default()
        });
        buf.insert_str("a");
        buf.insert_newline();
        buf.insert_str("b");
        assert_eq!(buf.segments().len(), 1);
        assert_eq!(buf.display_text(), "a\nb");
    }

    #[test]
    fn max_length_refuses_insert() {
        let mut buf = SegmentBuffer::with_options(InputOptions {
            max_length: Some(3),
            ..InputOptions::default()
        });
        assert!(buf.insert_str("日本"));
        assert!(buf.insert_char('x'));
        assert!(!buf.insert_char('y'));
        assert!(!buf.paste("a\nb"));
        assert_eq!(buf.value(), "日本x");
    }

    #[test]
    fn word_motion() {
        let mut buf = buffer("foo bar_baz  qux");
        buf.move_word_left();
        assert_eq!(buf.cursor(), 13);
        buf.move_word_left();
        assert_eq!(buf.cursor(), 4);
        buf.move_word_right();
        assert_eq!(buf.cursor(), 11);
        buf.move_home();
        assert!(!buf.move_word_left());
    }

    #[test]
    fn line_home_and_end() {
        let mut buf = SegmentBuffer::with_options(InputOptions {
            multiline: true,
            ..InputOptions::default()
        });
        buf.insert_str("ab\ncde\nf");
        buf.set_cursor(4);
        buf.move_line_home();
        assert_eq!(buf.cursor(), 3);
        buf.move_line_end();
        assert_eq!(buf.cursor(), 6);
    }

    #[test]
    fn set_cursor_snaps_out_of_special_and_multibyte() {
        let mut buf = buffer("é");
        buf.insert_segment(Segment::special("[abcd]", "x"));
        buf.set_cursor(1);
        assert_eq!(buf.cursor(), 0);
        buf.set_cursor(3);
        assert_eq!(buf.cursor(), 2);
        buf.set_cursor(7);
        assert_eq!(buf.cursor(), 8);
        buf.set_cursor(100);
        assert_eq!(buf.cursor(), 8);
    }

    #[test]
    fn take_returns_logical_value() {
        let mut buf = buffer("a");
        buf.paste("1\n2");
        assert_eq!(buf.take(), "a1\n2");
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn cursor_chars_counts_code_points() {
        let buf = buffer("日本");
        assert_eq!(buf.cursor(), 6);
        assert_eq!(buf.cursor_chars(), 2);
    }
}
