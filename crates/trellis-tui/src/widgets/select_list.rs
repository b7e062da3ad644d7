use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::focus::Focusable;
use crate::geometry::{Constraints, Rect, Size};
use crate::layout::{to_cell, LayoutItem, LayoutParams};
use crate::render::PaintContext;
use crate::style::Style;
use crate::text::display_width;
use crate::widgets::{scroll_to_show, Widget};

/// A scrollable list with one selected row.
///
/// The selection index is always clamped to the item range; with no items
/// there is no selection.
pub struct SelectList {
    id: String,
    items: Vec<String>,
    selected: usize,
    scroll: usize,
    focused: bool,
    params: LayoutParams,
    bounds: Rect,
    style: Style,
    chosen: Option<usize>,
}

impl SelectList {
    pub fn new<I, S>(id: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            items: items.into_iter().map(Into::into).collect(),
            selected: 0,
            scroll: 0,
            focused: false,
            params: LayoutParams::default(),
            bounds: Rect::default(),
            style: Style::default(),
            chosen: None,
        }
    }

    #[must_use]
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.set_selected(self.selected);
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Select `index`, clamped to the last item.
    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.items.len().saturating_sub(1));
        self.scroll = scroll_to_show(self.scroll, self.selected, self.bounds.height as usize);
    }

    /// Item confirmed with Enter since the last call.
    pub fn take_chosen(&mut self) -> Option<usize> {
        self.chosen.take()
    }

    fn select(&mut self, index: usize) -> bool {
        let before = self.selected;
        self.set_selected(index);
        self.selected != before
    }
}

impl LayoutItem for SelectList {
    fn params(&self) -> LayoutParams {
        self.params
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let widest = self.items.iter().map(|i| display_width(i)).max().unwrap_or(0);
        Size::new(
            to_cell(widest).min(constraints.width_or(u16::MAX)),
            to_cell(self.items.len()).min(constraints.height_or(u16::MAX)),
        )
    }
}

impl Widget for SelectList {
    fn arrange(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.scroll = scroll_to_show(self.scroll, self.selected, bounds.height as usize);
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        let b = self.bounds;
        for (row, (index, item)) in self
            .items
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(b.height as usize)
            .enumerate()
        {
            let y = b.y + row as u16;
            let style = if index == self.selected {
                let style = self.style.reverse();
                ctx.fill(Rect::new(b.x, y, b.width, 1), style);
                style
            } else {
                self.style
            };
            ctx.print_truncated(b.x, y, b.width, item, style);
        }
    }
}

impl Focusable for SelectList {
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
        if self.items.is_empty() {
            return false;
        }
        let page = (self.bounds.height as usize).max(1);
        match key.code {
            KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Down => self.select(self.selected + 1),
            KeyCode::PageUp => self.select(self.selected.saturating_sub(page)),
            KeyCode::PageDown => self.select(self.selected + page),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            KeyCode::Enter => {
                self.chosen = Some(self.selected);
                true
            }
            _ => false,
        }
    }

    fn focus_bounds(&self) -> Rect {
        self.bounds
    }

    fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if !self.bounds.contains(event.column, event.row) {
            return false;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let index = self.scroll + (event.row - self.bounds.y) as usize;
                if index >= self.items.len() {
                    return false;
                }
                self.set_selected(index);
                true
            }
            MouseEventKind::ScrollUp => self.select(self.selected.saturating_sub(1)),
            MouseEventKind::ScrollDown => self.select(self.selected + 1),
            _ => false,
        }
    }
}
