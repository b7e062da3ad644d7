//! Vertical/horizontal box layout over children with [`LayoutParams`].
//!
//! `arrange` is the fixed layout pass used when painting a container:
//!
//! 1. every child is measured once, unconstrained, and clamped by its own
//!    size constraints; the main-axis sizes plus main-axis margins plus the
//!    spacing between children form the fixed extent;
//! 2. whatever the container has beyond the fixed extent is handed to the
//!    children with `grow > 0` via [`distribute`];
//! 3. cross-axis margins shrink the space the child is aligned in and come
//!    back as a positional offset;
//! 4. the child's constraints clamp the final rectangle.
//!
//! `measure` answers the intrinsic-size question instead: children are asked
//! for their size with the main axis unbounded and the cross axis bounded.

use crate::geometry::{Axis, Constraints, Rect, Size};
use crate::layout::flex::distribute;
use crate::layout::params::{Align, LayoutParams};

/// Anything the box engine can place.
pub trait LayoutItem {
    fn params(&self) -> LayoutParams;
    fn measure(&self, constraints: Constraints) -> Size;
}

impl<T: LayoutItem + ?Sized> LayoutItem for Box<T> {
    fn params(&self) -> LayoutParams {
        (**self).params()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        (**self).measure(constraints)
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn params(&self) -> LayoutParams {
        (**self).params()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        (**self).measure(constraints)
    }
}

pub(crate) fn to_cell(value: usize) -> u16 {
    value.min(u16::MAX as usize) as u16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxLayout {
    pub axis: Axis,
    pub spacing: u16,
}

impl BoxLayout {
    pub fn new(axis: Axis, spacing: u16) -> Self {
        Self { axis, spacing }
    }

    pub fn vertical(spacing: u16) -> Self {
        Self::new(Axis::Vertical, spacing)
    }

    pub fn horizontal(spacing: u16) -> Self {
        Self::new(Axis::Horizontal, spacing)
    }

    fn total_spacing(&self, count: usize) -> usize {
        self.spacing as usize * count.saturating_sub(1)
    }

    /// Compute final child rectangles inside `bounds`.
    pub fn arrange<C: LayoutItem>(&self, bounds: Rect, children: &[C]) -> Vec<Rect> {
        if children.is_empty() {
            return Vec::new();
        }

        let axis = self.axis;
        let cross_axis = axis.cross();
        let main_extent = axis.main_of(bounds.size()) as usize;
        let cross_extent = axis.cross_of(bounds.size());

        let measured: Vec<(LayoutParams, Size)> = children
            .iter()
            .map(|child| {
                let params = child.params();
                let natural = params
                    .constraints
                    .clamp(child.measure(Constraints::UNBOUNDED));
                (params, natural)
            })
            .collect();

        let fixed: usize = measured
            .iter()
            .map(|(params, natural)| {
                axis.main_of(*natural) as usize + params.margin.along(axis) as usize
            })
            .sum::<usize>()
            + self.total_spacing(children.len());

        if fixed > main_extent {
            tracing::trace!(fixed, available = main_extent, "box layout overflows container");
        }

        let extra = main_extent.saturating_sub(fixed);
        let weights: Vec<u16> = measured.iter().map(|(params, _)| params.grow).collect();
        let grown = distribute(extra, &weights);

        let mut cursor = axis.main_pos(&bounds) as usize;
        let cross_origin = axis.cross_pos(&bounds);
        let mut rects = Vec::with_capacity(children.len());

        for (i, (params, natural)) in measured.iter().enumerate() {
            if i > 0 {
                cursor += self.spacing as usize;
            }
            cursor += params.margin.start(axis) as usize;

            let slot_main = axis.main_of(*natural) as usize + grown[i];
            let cross_avail = cross_extent.saturating_sub(params.margin.along(cross_axis));
            let (_, cross_size) = params.align.place(axis.cross_of(*natural), cross_avail);

            let clamped = params
                .constraints
                .clamp(axis.size(to_cell(slot_main), cross_size));
            let final_cross = axis.cross_of(clamped);
            let cross_offset = match params.align {
                Align::Start | Align::Stretch => 0,
                Align::Center => cross_avail.saturating_sub(final_cross) / 2,
                Align::End => cross_avail.saturating_sub(final_cross),
            };

            rects.push(axis.rect(
                to_cell(cursor),
                cross_origin
                    .saturating_add(params.margin.start(cross_axis))
                    .saturating_add(cross_offset),
                axis.main_of(clamped),
                final_cross,
            ));

            cursor += slot_main + params.margin.end(axis) as usize;
        }

        rects
    }

    /// Intrinsic size of `children` laid out along this axis.
    pub fn measure<C: LayoutItem>(&self, children: &[C], constraints: Constraints) -> Size {
        if children.is_empty() {
            return Size::ZERO;
        }

        let axis = self.axis;
        let cross_axis = axis.cross();
        let cross_limit = constraints.along(cross_axis);

        let mut main_total = self.total_spacing(children.len());
        let mut cross_max = 0usize;

        for child in children {
            let params = child.params();
            let cross = cross_limit.map(|limit| limit.saturating_sub(params.margin.along(cross_axis)));
            let size = params
                .constraints
                .clamp(child.measure(Constraints::for_axis(axis, None, cross)));

            main_total += axis.main_of(size) as usize + params.margin.along(axis) as usize;
            cross_max = cross_max
                .max(axis.cross_of(size) as usize + params.margin.along(cross_axis) as usize);
        }

        axis.size(to_cell(main_total), to_cell(cross_max))
    }
}
