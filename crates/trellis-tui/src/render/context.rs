use crate::focus::{FocusHandle, FocusManager};
use crate::geometry::{Point, Rect, Size};
use crate::render::surface::{RegionCallback, Surface};
use crate::style::Style;
use crate::text::{skip_width, truncate_to_width};

/// What a paint call gets: the drawing surface, the frame's focus manager,
/// and the current clip rectangle. Every drawing method clips.
pub struct PaintContext<'a> {
    surface: &'a mut dyn Surface,
    focus: &'a FocusManager,
    clip: Rect,
}

impl<'a> PaintContext<'a> {
    pub fn new(surface: &'a mut dyn Surface, focus: &'a FocusManager) -> Self {
        let clip = Rect::from_size(surface.size());
        Self {
            surface,
            focus,
            clip,
        }
    }

    pub fn focus(&self) -> &FocusManager {
        self.focus
    }

    pub fn register_focusable(&self, handle: FocusHandle) {
        self.focus.register(handle);
    }

    pub fn clip(&self) -> Rect {
        self.clip
    }

    pub fn size(&self) -> Size {
        self.surface.size()
    }

    /// Run `f` with the clip narrowed to `rect`, restoring it afterwards.
    pub fn with_clip<R>(&mut self, rect: Rect, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.clip;
        self.clip = saved.intersect(&rect);
        let out = f(self);
        self.clip = saved;
        out
    }

    pub fn print(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let clip = self.clip;
        if clip.is_empty() || y < clip.y || y >= clip.bottom() || x >= clip.right() {
            return;
        }
        let (mut text, mut x) = (text, x);
        if x < clip.x {
            let (rest, cut) = skip_width(text, (clip.x - x) as usize);
            text = rest;
            x = clip.x.saturating_add(cut as u16);
        }
        let room = clip.right().saturating_sub(x) as usize;
        self.surface.print(x, y, truncate_to_width(text, room), style);
    }

    pub fn print_truncated(&mut self, x: u16, y: u16, max_width: u16, text: &str, style: Style) {
        self.print(x, y, truncate_to_width(text, max_width as usize), style);
    }

    pub fn fill(&mut self, rect: Rect, style: Style) {
        let area = rect.intersect(&self.clip);
        if !area.is_empty() {
            self.surface.fill(area, style);
        }
    }

    /// Register a click target, clipped to what is visible.
    pub fn register_region(&mut self, rect: Rect, callback: RegionCallback) {
        let area = rect.intersect(&self.clip);
        if !area.is_empty() {
            self.surface.register_region(area, callback);
        }
    }

    pub fn set_cursor(&mut self, position: Point) {
        if self.clip.contains(position.x, position.y) {
            self.surface.set_cursor(Some(position));
        }
    }
}
