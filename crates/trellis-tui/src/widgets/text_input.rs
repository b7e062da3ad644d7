use std::borrow::Cow;
use std::sync::Arc;

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::clipboard::Clipboard;
use crate::focus::Focusable;
use crate::geometry::{Constraints, Point, Rect, Size};
use crate::input::{cursor_position, visual_lines, InputAction, InputOptions, SegmentBuffer};
use crate::layout::{to_cell, LayoutItem, LayoutParams};
use crate::render::PaintContext;
use crate::style::Style;
use crate::text::{char_width, display_width, skip_width, truncate_to_width};
use crate::widgets::{scroll_to_show, Widget};

/// Editable text field backed by a [`SegmentBuffer`].
///
/// Single-line inputs scroll horizontally to keep the cursor visible and may
/// mask their content. Multi-line inputs soft-wrap to their width and scroll
/// vertically. Enter submits a single-line input; the submitted value is
/// held until [`TextInput::take_submitted`] collects it.
pub struct TextInput {
    id: String,
    buffer: SegmentBuffer,
    focused: bool,
    params: LayoutParams,
    bounds: Rect,
    mask: Option<char>,
    placeholder: String,
    style: Style,
    scroll_x: usize,
    scroll_y: usize,
    clipboard: Option<Arc<dyn Clipboard>>,
    submitted: Option<String>,
}

impl TextInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            buffer: SegmentBuffer::new(),
            focused: false,
            params: LayoutParams::default(),
            bounds: Rect::default(),
            mask: None,
            placeholder: String::new(),
            style: Style::default(),
            scroll_x: 0,
            scroll_y: 0,
            clipboard: None,
            submitted: None,
        }
    }

    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.buffer.options_mut().multiline = true;
        self
    }

    /// Show every code point as `mask`. Only single-line inputs mask.
    #[must_use]
    pub fn mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.buffer.options_mut().max_length = Some(max);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = text.into();
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn options(mut self, options: InputOptions) -> Self {
        *self.buffer.options_mut() = options;
        self
    }

    #[must_use]
    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    #[must_use]
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    pub fn buffer(&self) -> &SegmentBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut SegmentBuffer {
        &mut self.buffer
    }

    pub fn value(&self) -> String {
        self.buffer.value()
    }

    pub fn set_value(&mut self, text: &str) {
        self.buffer.set_value(text);
        self.ensure_cursor_visible();
    }

    /// Value submitted with Enter since the last call.
    pub fn take_submitted(&mut self) -> Option<String> {
        self.submitted.take()
    }

    fn is_multiline(&self) -> bool {
        self.buffer.options().multiline
    }

    /// Display text as drawn on a single line.
    fn rendered<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.mask {
            Some(mask) => Cow::Owned(text.chars().map(|_| mask).collect()),
            None if text.contains('\n') => {
                Cow::Owned(text.replace('\n', &self.buffer.options().newline_glyph))
            }
            None => Cow::Borrowed(text),
        }
    }

    /// Screen row and column of the cursor relative to the text origin,
    /// before scrolling.
    fn cursor_cell(&self) -> (usize, usize) {
        let text = self.buffer.display_text();
        if self.is_multiline() {
            let lines = visual_lines(&text, self.bounds.width);
            let (row, column) = cursor_position(&text, &lines, self.buffer.cursor());
            let width = self.bounds.width as usize;
            // After a line that fills the width the cursor starts the next row.
            if width > 0 && column >= width {
                (row + 1, 0)
            } else {
                (row, column)
            }
        } else {
            (0, display_width(&self.rendered(&text[..self.buffer.cursor()])))
        }
    }

    fn ensure_cursor_visible(&mut self) {
        let (row, column) = self.cursor_cell();
        if self.is_multiline() {
            self.scroll_x = 0;
            self.scroll_y = scroll_to_show(self.scroll_y, row, self.bounds.height as usize);
        } else {
            self.scroll_y = 0;
            self.scroll_x = scroll_to_show(self.scroll_x, column, self.bounds.width as usize);
        }
    }

    fn paste_from_clipboard(&mut self) -> bool {
        let Some(clipboard) = &self.clipboard else {
            return false;
        };
        match clipboard.get_text() {
            Ok(text) => {
                self.buffer.paste(&text);
                true
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "clipboard paste failed");
                false
            }
        }
    }

    fn apply(&mut self, action: InputAction) -> bool {
        let before = self.buffer.cursor();
        let moved = |buffer: &SegmentBuffer| buffer.cursor() != before;
        match action {
            // Refused inserts are still consumed.
            InputAction::Insert('\n') | InputAction::Newline => {
                self.buffer.insert_newline();
                true
            }
            InputAction::Insert(c) => {
                self.buffer.insert_char(c);
                true
            }
            InputAction::Backspace => self.buffer.delete_backward(),
            InputAction::Delete => self.buffer.delete_forward(),
            InputAction::DeleteWord => self.buffer.delete_word_backward(),
            InputAction::Left => self.buffer.move_left(),
            InputAction::Right => self.buffer.move_right(),
            InputAction::WordLeft => self.buffer.move_word_left(),
            InputAction::WordRight => self.buffer.move_word_right(),
            InputAction::Up => self.is_multiline() && self.buffer.move_up(self.bounds.width),
            InputAction::Down => self.is_multiline() && self.buffer.move_down(self.bounds.width),
            InputAction::Home => {
                if self.is_multiline() {
                    self.buffer.move_line_home();
                } else {
                    self.buffer.move_home();
                }
                moved(&self.buffer)
            }
            InputAction::End => {
                if self.is_multiline() {
                    self.buffer.move_line_end();
                } else {
                    self.buffer.move_end();
                }
                moved(&self.buffer)
            }
            InputAction::Paste => self.paste_from_clipboard(),
            InputAction::Submit if self.is_multiline() => {
                self.buffer.insert_newline();
                true
            }
            InputAction::Submit => {
                if self.buffer.value().trim().is_empty() {
                    return false;
                }
                let value = self.buffer.take();
                tracing::debug!(id = %self.id, len = value.len(), "input submitted");
                self.submitted = Some(value);
                true
            }
            InputAction::Clear => self.buffer.clear(),
            InputAction::Cancel | InputAction::None => false,
        }
    }

    /// Offset under a click at (x, y) within the input.
    fn offset_at(&self, x: u16, y: u16) -> usize {
        let text = self.buffer.display_text();
        let column = x.saturating_sub(self.bounds.x) as usize;
        if self.is_multiline() {
            let lines = visual_lines(&text, self.bounds.width);
            let row = (y.saturating_sub(self.bounds.y) as usize + self.scroll_y)
                .min(lines.len().saturating_sub(1));
            let Some(line) = lines.get(row) else {
                return 0;
            };
            let mut used = 0;
            for (i, c) in text[line.start..line.end].char_indices() {
                if used >= column {
                    return line.start + i;
                }
                used += char_width(c);
            }
            line.end
        } else {
            let target = column + self.scroll_x;
            let mut used = 0;
            for (i, c) in text.char_indices() {
                if used >= target {
                    return i;
                }
                used += display_width(&self.rendered(&text[i..i + c.len_utf8()]));
            }
            text.len()
        }
    }

    fn paint_single_line(&self, ctx: &mut PaintContext<'_>, text: &str, style: Style) {
        let b = self.bounds;
        let rendered = self.rendered(text);
        let (visible, pad) = skip_width(&rendered, self.scroll_x);
        let x = b.x.saturating_add(to_cell(pad));
        ctx.print_truncated(x, b.y, b.width.saturating_sub(to_cell(pad)), visible, style);
    }

    fn paint_multiline(&self, ctx: &mut PaintContext<'_>, text: &str, style: Style) {
        let b = self.bounds;
        let lines = visual_lines(text, b.width);
        for (row, line) in lines
            .iter()
            .skip(self.scroll_y)
            .take(b.height as usize)
            .enumerate()
        {
            let content = truncate_to_width(&text[line.start..line.end], b.width as usize);
            ctx.print(b.x, b.y + row as u16, content, style);
        }
    }
}

impl LayoutItem for TextInput {
    fn params(&self) -> LayoutParams {
        self.params
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let text = self.buffer.display_text();
        let placeholder = display_width(&self.placeholder);
        let size = if self.is_multiline() {
            let width = constraints.max_width.unwrap_or(0);
            let lines = visual_lines(&text, width);
            let widest = lines
                .iter()
                .map(|l| display_width(&text[l.start..l.end]))
                .max()
                .unwrap_or(0);
            Size::new(to_cell(widest.max(placeholder) + 1), to_cell(lines.len()))
        } else {
            let width = display_width(&self.rendered(&text)).max(placeholder) + 1;
            Size::new(to_cell(width), 1)
        };
        Size::new(
            size.width.min(constraints.width_or(u16::MAX)),
            size.height.min(constraints.height_or(u16::MAX)),
        )
    }
}

impl Widget for TextInput {
    fn arrange(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.ensure_cursor_visible();
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        if self.bounds.is_empty() {
            return;
        }
        if self.buffer.is_empty() && !self.placeholder.is_empty() {
            let b = self.bounds;
            ctx.print_truncated(b.x, b.y, b.width, &self.placeholder, self.style.dim());
        } else {
            let text = self.buffer.display_text();
            if self.is_multiline() {
                self.paint_multiline(ctx, &text, self.style);
            } else {
                self.paint_single_line(ctx, &text, self.style);
            }
        }

        if self.focused {
            let (row, column) = self.cursor_cell();
            let x = column.saturating_sub(self.scroll_x) + self.bounds.x as usize;
            let y = row.saturating_sub(self.scroll_y) + self.bounds.y as usize;
            ctx.set_cursor(Point::new(to_cell(x), to_cell(y)));
        }
    }
}

impl Focusable for TextInput {
    fn focus_id(&self) -> &str {
        &self.id
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let consumed = self.apply(InputAction::from(*key));
        if consumed {
            self.ensure_cursor_visible();
        }
        consumed
    }

    fn focus_bounds(&self) -> Rect {
        self.bounds
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if event.kind != MouseEventKind::Down(MouseButton::Left)
            || !self.bounds.contains(event.column, event.row)
        {
            return false;
        }
        let offset = self.offset_at(event.column, event.row);
        self.buffer.set_cursor(offset);
        true
    }

    fn handle_paste(&mut self, content: &str) -> bool {
        self.buffer.paste(content);
        self.ensure_cursor_visible();
        true
    }
}
