//! Frame driver: one render pass per call, input routed afterwards.

use std::sync::Arc;

use crossterm::event::{Event, KeyEvent, MouseEvent, MouseEventKind};

use crate::focus::FocusManager;
use crate::geometry::{Point, Rect};
use crate::render::{CellBuffer, PaintContext};
use crate::view::View;

/// Owns the frame buffer and the focus context for one screen.
///
/// A render pass clears the focus registrations and the buffer, then paints
/// the root view over the whole screen. Widgets re-register as they paint,
/// so Tab order is always the paint order of the last frame.
#[derive(Debug)]
pub struct Ui {
    focus: Arc<FocusManager>,
    buffer: CellBuffer,
}

impl Ui {
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_focus(Arc::new(FocusManager::new()), width, height)
    }

    /// Share a focus manager created elsewhere.
    pub fn with_focus(focus: Arc<FocusManager>, width: u16, height: u16) -> Self {
        Self {
            focus,
            buffer: CellBuffer::new(width, height),
        }
    }

    pub fn focus(&self) -> &Arc<FocusManager> {
        &self.focus
    }

    pub fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        tracing::debug!(width, height, "resize");
        self.buffer.resize(width, height);
    }

    pub fn render(&mut self, root: &dyn View) {
        self.focus.clear();
        self.buffer.clear();
        let area = Rect::new(0, 0, self.buffer.width(), self.buffer.height());
        let mut ctx = PaintContext::new(&mut self.buffer, &self.focus);
        root.paint(&mut ctx, area);
    }

    /// Cursor requested by the focused widget in the last frame.
    pub fn cursor(&self) -> Option<Point> {
        self.buffer.cursor()
    }

    pub fn screen_text(&self) -> String {
        self.buffer.to_plain_text()
    }

    pub fn dispatch_key(&self, key: &KeyEvent) -> bool {
        self.focus.handle_key(key)
    }

    /// Presses try interactive regions first, then move focus to the clicked
    /// widget and forward the press to it. Everything else goes to the
    /// focused widget.
    pub fn dispatch_mouse(&mut self, event: &MouseEvent) -> bool {
        match event.kind {
            MouseEventKind::Down(_) => {
                if self.buffer.regions_mut().dispatch(event.column, event.row) {
                    return true;
                }
                let clicked = self.focus.handle_click(event.column, event.row);
                self.focus.handle_mouse(event) || clicked
            }
            _ => self.focus.handle_mouse(event),
        }
    }

    /// Route a terminal event. Returns `true` when something handled it and
    /// the screen should be rendered again.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.dispatch_key(key),
            Event::Mouse(mouse) => self.dispatch_mouse(mouse),
            Event::Paste(content) => self.focus.handle_paste(content),
            Event::Resize(width, height) => {
                self.resize(*width, *height);
                true
            }
            Event::FocusGained | Event::FocusLost => false,
        }
    }
}
