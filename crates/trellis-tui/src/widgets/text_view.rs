use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::clipboard::Clipboard;
use crate::config::TextViewConfig;
use crate::focus::Focusable;
use crate::geometry::{Constraints, Rect, Size};
use crate::layout::{to_cell, LayoutItem, LayoutParams};
use crate::render::PaintContext;
use crate::selection::{select_line, select_word, ScreenMapper, Selection, TextPosition};
use crate::style::Style;
use crate::text::{display_width, floor_boundary};
use crate::widgets::Widget;

#[derive(Debug, Clone, Copy)]
struct LastClick {
    at: Instant,
    pos: TextPosition,
    count: u8,
}

/// Read-only multi-line text with optional line numbers.
///
/// Supports wheel and key scrolling, drag selection, double-click word and
/// triple-click line selection, and copying the selection with Ctrl+C.
pub struct TextView {
    id: String,
    lines: Vec<String>,
    focused: bool,
    params: LayoutParams,
    bounds: Rect,
    style: Style,
    line_numbers: bool,
    scroll: usize,
    scroll_step: u16,
    multi_click: Duration,
    selection: Selection,
    last_click: Option<LastClick>,
    clipboard: Option<Arc<dyn Clipboard>>,
}

impl TextView {
    pub fn new(id: impl Into<String>) -> Self {
        let defaults = TextViewConfig::default();
        Self {
            id: id.into(),
            lines: Vec::new(),
            focused: false,
            params: LayoutParams::default(),
            bounds: Rect::default(),
            style: Style::default(),
            line_numbers: defaults.line_numbers,
            scroll: 0,
            scroll_step: defaults.scroll_step,
            multi_click: defaults.multi_click_window(),
            selection: Selection::default(),
            last_click: None,
            clipboard: None,
        }
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    #[must_use]
    pub fn line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    #[must_use]
    pub fn config(mut self, config: &TextViewConfig) -> Self {
        self.line_numbers = config.line_numbers;
        self.scroll_step = config.scroll_step.max(1);
        self.multi_click = config.multi_click_window();
        self
    }

    /// Replace the content. Scroll is clamped and the selection dropped.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.selection.clear();
        self.last_click = None;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_text(&self) -> Option<String> {
        self.selection
            .has_selection()
            .then(|| self.selection.extract_selected_text(&self.lines))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn scroll_to(&mut self, line: usize) {
        self.scroll = line.min(self.max_scroll());
    }

    fn gutter_width(&self) -> u16 {
        if self.line_numbers {
            to_cell(self.lines.len().max(1).to_string().len() + 1)
        } else {
            0
        }
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(self.bounds.height as usize)
    }

    fn mapper(&self) -> ScreenMapper {
        ScreenMapper::new(self.bounds.origin(), self.scroll, self.gutter_width())
    }

    fn scroll_by(&mut self, delta: isize) -> bool {
        let before = self.scroll;
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
        self.scroll != before
    }

    /// Register a press at `pos`, returning 1, 2 or 3 for single, double and
    /// triple clicks.
    fn click_count(&mut self, pos: TextPosition, now: Instant) -> u8 {
        let count = match self.last_click {
            Some(last)
                if last.pos == pos && now.saturating_duration_since(last.at) <= self.multi_click =>
            {
                last.count % 3 + 1
            }
            _ => 1,
        };
        self.last_click = Some(LastClick { at: now, pos, count });
        count
    }

    fn press(&mut self, pos: TextPosition, now: Instant) {
        match self.click_count(pos, now) {
            1 => self.selection.start(pos),
            2 => self.selection = select_word(&self.lines, pos),
            _ => self.selection = select_line(&self.lines, pos.line),
        }
    }

    fn select_all(&mut self) -> bool {
        let Some(last) = self.lines.len().checked_sub(1) else {
            return false;
        };
        self.selection = Selection::new(
            TextPosition::new(0, 0),
            TextPosition::new(last, self.lines[last].len()),
        );
        true
    }

    fn copy_selection(&self) -> bool {
        let (Some(text), Some(clipboard)) = (self.selected_text(), &self.clipboard) else {
            return false;
        };
        match clipboard.set_text(&text) {
            Ok(()) => {
                tracing::debug!(id = %self.id, len = text.len(), "copied selection");
                true
            }
            Err(err) => {
                tracing::warn!(id = %self.id, error = %err, "clipboard copy failed");
                false
            }
        }
    }

    pub(crate) fn handle_mouse_at(&mut self, event: &MouseEvent, now: Instant) -> bool {
        let inside = self.bounds.contains(event.column, event.row);
        let step = self.scroll_step as isize;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                let pos = self.mapper().screen_to_text(event.column, event.row, &self.lines);
                self.press(pos, now);
                true
            }
            MouseEventKind::Drag(MouseButton::Left) if self.selection.active => {
                let pos = self.mapper().screen_to_text(event.column, event.row, &self.lines);
                self.selection.update(pos);
                true
            }
            MouseEventKind::Up(MouseButton::Left) if self.selection.active => {
                self.selection.complete();
                true
            }
            MouseEventKind::ScrollUp if inside => self.scroll_by(-step),
            MouseEventKind::ScrollDown if inside => self.scroll_by(step),
            _ => false,
        }
    }
}

impl LayoutItem for TextView {
    fn params(&self) -> LayoutParams {
        self.params
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let widest = self.lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
        let width = to_cell(widest).saturating_add(self.gutter_width());
        Size::new(
            width.min(constraints.width_or(u16::MAX)),
            to_cell(self.lines.len()).min(constraints.height_or(u16::MAX)),
        )
    }
}

impl Widget for TextView {
    fn arrange(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let b = self.bounds;
        let gutter = self.gutter_width();
        let text_x = b.x.saturating_add(gutter);
        let text_width = b.width.saturating_sub(gutter);
        let highlight = self.style.reverse();

        for (row, (index, line)) in self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(b.height as usize)
            .enumerate()
        {
            let y = b.y + row as u16;
            if gutter > 0 {
                let number = format!("{:>width$} ", index + 1, width = gutter as usize - 1);
                ctx.print_truncated(b.x, y, b.width, &number, self.style.dim());
            }
            ctx.print_truncated(text_x, y, text_width, line, self.style);

            if let Some((from, to)) = self.selection.line_range(index, line.len()) {
                let (from, to) = (floor_boundary(line, from), floor_boundary(line, to));
                let offset = to_cell(display_width(&line[..from]));
                if offset < text_width {
                    ctx.print_truncated(
                        text_x + offset,
                        y,
                        text_width - offset,
                        &line[from..to],
                        highlight,
                    );
                }
            }
        }
    }
}

impl Focusable for TextView {
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
        let page = self.bounds.height.max(1) as isize;
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.copy_selection(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.select_all(),
            (KeyCode::Esc, _) => {
                let had = self.selection.has_selection();
                self.selection.clear();
                had
            }
            (KeyCode::Up, _) => self.scroll_by(-1),
            (KeyCode::Down, _) => self.scroll_by(1),
            (KeyCode::PageUp, _) => self.scroll_by(-page),
            (KeyCode::PageDown, _) => self.scroll_by(page),
            (KeyCode::Home, _) => self.scroll_by(isize::MIN),
            (KeyCode::End, _) => self.scroll_by(isize::MAX),
            _ => false,
        }
    }

    fn focus_bounds(&self) -> Rect {
        self.bounds
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        self.handle_mouse_at(event, Instant::now())
    }
}
