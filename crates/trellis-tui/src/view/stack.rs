use crate::geometry::{Axis, Rect, Size};
use crate::layout::{calculate_extents, to_cell, Align, ChildMeasurement, FlexLayoutInput};
use crate::render::PaintContext;
use crate::view::{AnyView, View, UNBOUNDED};

/// Children laid out one after another along an axis.
///
/// Fixed children keep their size measured with the stacking axis unbounded.
/// Flexible children split what is left after fixed children and gaps,
/// proportionally to their weights, and are then measured again at the
/// extent they were given so their cross size can follow. With an unbounded
/// main axis there is nothing to split and flexible children keep their
/// natural size too.
pub struct Stack {
    axis: Axis,
    gap: u16,
    align: Align,
    children: Vec<AnyView>,
}

struct Slot {
    offset: usize,
    extent: u16,
    cross: u16,
}

impl Stack {
    pub fn new(axis: Axis, children: impl IntoIterator<Item = AnyView>) -> Self {
        Self {
            axis,
            gap: 0,
            align: Align::Start,
            children: children.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    /// Cross-axis placement of every child.
    #[must_use]
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn push(&mut self, child: AnyView) {
        self.children.push(child);
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn measure_child(&self, child: &dyn View, main: u16, cross: u16) -> Size {
        let max = self.axis.size(main, cross);
        child.measure(max.width, max.height)
    }

    fn plan(&self, main: u16, cross: u16) -> (Vec<Slot>, usize) {
        let unbounded = main == UNBOUNDED;

        let natural: Vec<Option<Size>> = self
            .children
            .iter()
            .map(|child| match child.flex_weight() {
                Some(_) if !unbounded => None,
                _ => Some(self.measure_child(child.as_ref(), UNBOUNDED, cross)),
            })
            .collect();

        let measurements = self
            .children
            .iter()
            .zip(&natural)
            .map(|(child, size)| match size {
                Some(size) => ChildMeasurement::Content(self.axis.main_of(*size) as usize),
                None => ChildMeasurement::Flex(child.flex_weight().unwrap_or(1)),
            })
            .collect();

        let result = calculate_extents(&FlexLayoutInput {
            available: if unbounded { 0 } else { main as usize },
            children: measurements,
            gap: self.gap as usize,
        });

        let slots = self
            .children
            .iter()
            .zip(natural)
            .enumerate()
            .map(|(i, (child, size))| {
                let extent = to_cell(result.extents[i]);
                let size = size.unwrap_or_else(|| self.measure_child(child.as_ref(), extent, cross));
                Slot {
                    offset: result.offsets[i],
                    extent,
                    cross: self.axis.cross_of(size).min(cross),
                }
            })
            .collect();

        (slots, result.total_used)
    }
}

impl View for Stack {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        let max = Size::new(max_width, max_height);
        let (main, cross) = (self.axis.main_of(max), self.axis.cross_of(max));
        let (slots, total) = self.plan(main, cross);
        let cross_used = slots.iter().map(|s| s.cross).max().unwrap_or(0);
        self.axis.size(to_cell(total).min(main), cross_used)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        let axis = self.axis;
        let size = bounds.size();
        let (main, cross) = (axis.main_of(size), axis.cross_of(size));
        let (slots, total) = self.plan(main, cross);
        if total > main as usize {
            tracing::trace!(total, available = main, "stack overflows bounds");
        }

        let main_origin = axis.main_pos(&bounds) as usize;
        let cross_origin = axis.cross_pos(&bounds);
        for (child, slot) in self.children.iter().zip(slots) {
            let (cross_offset, cross_size) = self.align.place(slot.cross, cross);
            let rect = axis.rect(
                to_cell(main_origin + slot.offset),
                cross_origin.saturating_add(cross_offset),
                slot.extent,
                cross_size,
            );
            ctx.with_clip(rect, |ctx| child.paint(ctx, rect));
        }
    }
}

/// Children painted on top of each other, back to front in declaration
/// order, each aligned on its own within the shared bounds.
pub struct ZStack {
    layers: Vec<(AnyView, Align, Align)>,
}

impl ZStack {
    pub fn new(children: impl IntoIterator<Item = AnyView>) -> Self {
        Self {
            layers: children
                .into_iter()
                .map(|child| (child, Align::Stretch, Align::Stretch))
                .collect(),
        }
    }

    /// Add a layer placed by `horizontal` and `vertical` alignment.
    #[must_use]
    pub fn layer(mut self, child: AnyView, horizontal: Align, vertical: Align) -> Self {
        self.layers.push((child, horizontal, vertical));
        self
    }
}

impl View for ZStack {
    fn measure(&self, max_width: u16, max_height: u16) -> Size {
        self.layers.iter().fold(Size::ZERO, |acc, (child, _, _)| {
            let size = child.measure(max_width, max_height);
            Size::new(
                acc.width.max(size.width.min(max_width)),
                acc.height.max(size.height.min(max_height)),
            )
        })
    }

    fn paint(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        for (child, horizontal, vertical) in &self.layers {
            let natural = child.measure(bounds.width, bounds.height);
            let (x, width) = horizontal.place(natural.width, bounds.width);
            let (y, height) = vertical.place(natural.height, bounds.height);
            let rect = Rect::new(
                bounds.x.saturating_add(x),
                bounds.y.saturating_add(y),
                width,
                height,
            );
            ctx.with_clip(rect, |ctx| child.paint(ctx, rect));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusManager;
    use crate::render::CellBuffer;
    use crate::view::{flex, spacer, text, Fill, ViewExt};
    use crate::style::Style;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Fixed-size box that records the bounds it was painted with.
    struct Probe {
        size: Size,
        weight: Option<u16>,
        painted: Rc<RefCell<Vec<Rect>>>,
    }

    fn probe(width: u16, height: u16, log: &Rc<RefCell<Vec<Rect>>>) -> AnyView {
        Probe {
            size: Size::new(width, height),
            weight: None,
            painted: log.clone(),
        }
        .boxed()
    }

    fn weighted(weight: u16, log: &Rc<RefCell<Vec<Rect>>>) -> AnyView {
        Probe {
            size: Size::new(1, 1),
            weight: Some(weight),
            painted: log.clone(),
        }
        .boxed()
    }

    impl View for Probe {
        fn measure(&self, max_width: u16, max_height: u16) -> Size {
            Size::new(self.size.width.min(max_width), self.size.height.min(max_height))
        }

        fn paint(&self, _ctx: &mut PaintContext<'_>, bounds: Rect) {
            self.painted.borrow_mut().push(bounds);
        }

        fn flex_weight(&self) -> Option<u16> {
            self.weight
        }
    }

    fn paint(view: &dyn View, width: u16, height: u16) -> CellBuffer {
        let mut buf = CellBuffer::new(width, height);
        let focus = FocusManager::new();
        let mut ctx = PaintContext::new(&mut buf, &focus);
        view.paint(&mut ctx, Rect::new(0, 0, width, height));
        buf
    }

    #[test]
    fn fixed_children_are_offset_by_gap() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stack = hstack_of(vec![probe(20, 1, &log), probe(30, 1, &log), probe(40, 1, &log)]).gap(10);
        paint(&stack, 200, 1);
        let xs: Vec<u16> = log.borrow().iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![0, 30, 70]);
        assert_eq!(stack.measure(UNBOUNDED, 1), Size::new(110, 1));
    }

    fn hstack_of(children: Vec<AnyView>) -> Stack {
        Stack::new(Axis::Horizontal, children)
    }

    #[test]
    fn flexible_children_share_remaining_space() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stack = Stack::new(
            Axis::Vertical,
            vec![probe(5, 2, &log), weighted(1, &log), weighted(2, &log)],
        );
        paint(&stack, 10, 12);
        let heights: Vec<u16> = log.borrow().iter().map(|r| r.height).collect();
        assert_eq!(heights, vec![2, 3, 7]);
        let ys: Vec<u16> = log.borrow().iter().map(|r| r.y).collect();
        assert_eq!(ys, vec![0, 2, 5]);
    }

    #[test]
    fn last_flexible_child_gets_remainder() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stack = Stack::new(
            Axis::Horizontal,
            vec![weighted(1, &log), weighted(1, &log), weighted(1, &log)],
        );
        paint(&stack, 10, 1);
        let widths: Vec<u16> = log.borrow().iter().map(|r| r.width).collect();
        assert_eq!(widths, vec![3, 3, 4]);
    }

    #[test]
    fn unbounded_main_axis_uses_natural_size() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stack = Stack::new(Axis::Vertical, vec![probe(3, 2, &log), weighted(1, &log)]);
        assert_eq!(stack.measure(10, UNBOUNDED), Size::new(3, 3));
    }

    #[test]
    fn measure_is_stable_across_calls() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stack = Stack::new(
            Axis::Vertical,
            vec![probe(4, 1, &log), weighted(1, &log), probe(2, 2, &log)],
        )
        .gap(1);
        let first = stack.measure(20, 20);
        assert_eq!(first, stack.measure(20, 20));
        assert_eq!(first, Size::new(4, 20));
    }

    #[test]
    fn cross_alignment_centers_children() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let stack = Stack::new(Axis::Vertical, vec![probe(4, 1, &log)]).align(Align::Center);
        paint(&stack, 10, 1);
        assert_eq!(log.borrow()[0], Rect::new(3, 0, 4, 1));
    }

    #[test]
    fn spacer_pushes_text_to_the_end() {
        let row = Stack::new(Axis::Horizontal, vec![text("left"), spacer(), text("right")]);
        let buf = paint(&row, 16, 1);
        assert_eq!(buf.to_plain_text(), "left       right");
    }

    #[test]
    fn flex_wrapper_makes_text_flexible() {
        let column = Stack::new(Axis::Vertical, vec![flex(1, text("top")), text("bottom")]);
        let buf = paint(&column, 8, 4);
        assert_eq!(buf.to_plain_text(), "top\n\n\nbottom");
    }

    #[test]
    fn zstack_paints_back_to_front() {
        let layers = ZStack::new(vec![Fill::new(Style::default()).with_char('.').boxed()])
            .layer(text("hi"), Align::Center, Align::Center);
        let buf = paint(&layers, 6, 3);
        assert_eq!(buf.to_plain_text(), "......\n..hi..\n......");
    }
}
