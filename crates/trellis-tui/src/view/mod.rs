//! Declarative view tree.
//!
//! Views are cheap values rebuilt on every render. A view answers two
//! questions: how big it would like to be within a maximum size, and how to
//! paint itself into the bounds it was finally given. Views that also report
//! a [`View::flex_weight`] share leftover space in a stack instead of keeping
//! their measured size.
//!
//! Persistent, stateful widgets join the tree through [`Mount`].

mod leaf;
mod mount;
mod stack;

pub use leaf::{Fill, Flex, Padded, Spacer, Text};
pub use mount::Mount;
pub use stack::{Stack, ZStack};

use crate::geometry::{Axis, Edges, Rect, Size};
use crate::render::PaintContext;
use crate::style::Style;

/// Passed as a maximum extent to mean "no limit".
pub const UNBOUNDED: u16 = u16::MAX;

pub trait View {
    fn measure(&self, max_width: u16, max_height: u16) -> Size;

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect);

    /// Weight for sharing leftover stack space. `None` keeps the measured
    /// size.
    fn flex_weight(&self) -> Option<u16> {
        None
    }
}

pub type AnyView = Box<dyn View>;

impl<V: View + ?Sized> View for Box<V> {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        (**self).measure(max_width, max_height)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        (**self).paint(ctx, bounds)
    }

    fn flex_weight(&self) -> Option<u16> {
        (**self).flex_weight()
    }
}

pub trait ViewExt: View + Sized + 'static {
    fn boxed(self) -> AnyView {
        Box::new(self)
    }
}

impl<V: View + Sized + 'static> ViewExt for V {}

pub(crate) fn bounded(extent: u16) -> Option<u16> {
    (extent != UNBOUNDED).then_some(extent)
}

pub fn vstack(children: impl IntoIterator<Item = AnyView>) -> Stack {
    Stack::new(Axis::Vertical, children)
}

pub fn hstack(children: impl IntoIterator<Item = AnyView>) -> Stack {
    Stack::new(Axis::Horizontal, children)
}

pub fn zstack(children: impl IntoIterator<Item = AnyView>) -> ZStack {
    ZStack::new(children)
}

pub fn text(content: impl Into<String>) -> AnyView {
    Text::new(content).boxed()
}

pub fn styled(content: impl Into<String>, style: Style) -> AnyView {
    Text::new(content).style(style).boxed()
}

pub fn spacer() -> AnyView {
    Spacer::new(1).boxed()
}

pub fn fill(style: Style) -> AnyView {
    Fill::new(style).boxed()
}

pub fn flex(weight: u16, view: AnyView) -> AnyView {
    Flex::new(weight, view).boxed()
}

pub fn padded(edges: Edges, view: AnyView) -> AnyView {
    Padded::new(edges, view).boxed()
}
