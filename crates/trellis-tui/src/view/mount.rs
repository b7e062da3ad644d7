use std::sync::Arc;

use parking_lot::Mutex;

use crate::focus::{FocusHandle, Focusable};
use crate::geometry::{Constraints, Rect, Size};
use crate::render::PaintContext;
use crate::view::{bounded, AnyView, View, ViewExt};
use crate::widgets::{Widget, WidgetHandle};

/// Places a persistent widget in the view tree.
///
/// The widget's margin and size constraints apply inside the slot it is
/// given, and a positive `grow` makes it flexible with that weight. When
/// mounted with focus, the widget registers itself with the frame's focus
/// manager each time it is painted. A widget must be mounted at most once per
/// tree.
pub struct Mount {
    widget: WidgetHandle,
    focus: Option<FocusHandle>,
}

impl Mount {
    pub fn new(widget: WidgetHandle, focus: Option<FocusHandle>) -> Self {
        Self { widget, focus }
    }

    /// Mount an interactive widget and make it focusable.
    pub fn focusable<W: Widget + Focusable + 'static>(widget: &Arc<Mutex<W>>) -> AnyView {
        let handle: WidgetHandle = widget.clone();
        let focus: FocusHandle = widget.clone();
        Self::new(handle, Some(focus)).boxed()
    }

    /// Mount a widget that never takes focus.
    pub fn passive<W: Widget + 'static>(widget: &Arc<Mutex<W>>) -> AnyView {
        let handle: WidgetHandle = widget.clone();
        Self::new(handle, None).boxed()
    }
}

impl View for Mount {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        let widget = self.widget.lock();
        let params = widget.params();
        let margin = params.margin;
        let constraints = Constraints {
            max_width: bounded(max_width).map(|w| w.saturating_sub(margin.horizontal())),
            max_height: bounded(max_height).map(|h| h.saturating_sub(margin.vertical())),
        };
        let size = params.constraints.clamp(widget.measure(constraints));
        Size::new(
            size.width.saturating_add(margin.horizontal()).min(max_width),
            size.height.saturating_add(margin.vertical()).min(max_height),
        )
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        // Registration locks the widget, so it has to happen first.
        if let Some(focus) = &self.focus {
            ctx.register_focusable(focus.clone());
        }

        let mut widget = self.widget.lock();
        let params = widget.params();
        let inner = bounds.inset(params.margin);
        let size = params.constraints.clamp(inner.size());
        let rect = Rect::new(inner.x, inner.y, size.width, size.height);
        widget.arrange(rect);
        ctx.with_clip(rect, |ctx| widget.paint(ctx));
    }

    fn flex_weight(&self) -> Option<u16> {
        let grow = self.widget.lock().params().grow;
        (grow > 0).then_some(grow)
    }
}
