use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::focus::{FocusHandle, Focusable};
use crate::geometry::{Axis, Constraints, Rect, Size};
use crate::layout::{BoxLayout, LayoutItem, LayoutParams};
use crate::render::PaintContext;
use crate::style::Style;
use crate::widgets::{Widget, WidgetHandle};

struct Child {
    widget: WidgetHandle,
    focus: Option<FocusHandle>,
}

/// Box layout over persistent children.
///
/// The container's own padding insets the area handed to the box engine.
/// Focusable children are registered in child order while painting.
pub struct Container {
    layout: BoxLayout,
    params: LayoutParams,
    background: Option<Style>,
    bounds: Rect,
    children: Vec<Child>,
}

impl Container {
    pub fn new(axis: Axis) -> Self {
        Self {
            layout: BoxLayout::new(axis, 0),
            params: LayoutParams::default(),
            background: None,
            bounds: Rect::default(),
            children: Vec::new(),
        }
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    #[must_use]
    pub fn spacing(mut self, spacing: u16) -> Self {
        self.layout.spacing = spacing;
        self
    }

    #[must_use]
    pub fn params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn background(mut self, style: Style) -> Self {
        self.background = Some(style);
        self
    }

    #[must_use]
    pub fn child<W: Widget + 'static>(mut self, widget: &Arc<Mutex<W>>) -> Self {
        self.push(widget.clone(), None);
        self
    }

    #[must_use]
    pub fn focusable_child<W: Widget + Focusable + 'static>(mut self, widget: &Arc<Mutex<W>>) -> Self {
        let focus: FocusHandle = widget.clone();
        self.push(widget.clone(), Some(focus));
        self
    }

    pub fn push(&mut self, widget: WidgetHandle, focus: Option<FocusHandle>) {
        self.children.push(Child { widget, focus });
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn lock_children(&self) -> Vec<MutexGuard<'_, dyn Widget>> {
        self.children.iter().map(|c| c.widget.lock()).collect()
    }
}

impl LayoutItem for Container {
    fn params(&self) -> LayoutParams {
        self.params
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let padding = self.params.padding;
        let inner = Constraints {
            max_width: constraints
                .max_width
                .map(|w| w.saturating_sub(padding.horizontal())),
            max_height: constraints
                .max_height
                .map(|h| h.saturating_sub(padding.vertical())),
        };
        let guards = self.lock_children();
        let refs: Vec<&dyn Widget> = guards.iter().map(|g| &**g).collect();
        let size = self.layout.measure(&refs, inner);
        Size::new(
            size.width.saturating_add(padding.horizontal()),
            size.height.saturating_add(padding.vertical()),
        )
    }
}

impl Widget for Container {
    fn arrange(&mut self, bounds: Rect) {
        self.bounds = bounds;
        let inner = bounds.inset(self.params.padding);
        let mut guards = self.lock_children();
        let rects = {
            let refs: Vec<&dyn Widget> = guards.iter().map(|g| &**g).collect();
            self.layout.arrange(inner, &refs)
        };
        for (guard, rect) in guards.iter_mut().zip(rects) {
            guard.arrange(rect);
        }
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        if let Some(style) = self.background {
            ctx.fill(self.bounds, style);
        }
        for child in &self.children {
            if let Some(focus) = &child.focus {
                ctx.register_focusable(focus.clone());
            }
            let widget = child.widget.lock();
            let rect = widget.bounds();
            ctx.with_clip(rect, |ctx| widget.paint(ctx));
        }
    }
}
