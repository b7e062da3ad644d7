//! Persistent widgets.
//!
//! Unlike views, widgets live across frames, carry [`LayoutParams`], and go
//! through an explicit arrange pass before painting. Interactive widgets are
//! also [`Focusable`](crate::focus::Focusable) and are shared as
//! `Arc<Mutex<_>>` so the focus manager can route input to them.

mod container;
mod select_list;
mod text_input;
mod text_view;

pub use container::Container;
pub use select_list::SelectList;
pub use text_input::TextInput;
pub use text_view::TextView;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::Rect;
use crate::layout::LayoutItem;
use crate::render::PaintContext;

pub trait Widget: LayoutItem + Send {
    /// Accept final bounds for this frame.
    fn arrange(&mut self, bounds: Rect);

    fn bounds(&self) -> Rect;

    fn paint(&self, ctx: &mut PaintContext<'_>);
}

pub type WidgetHandle = Arc<Mutex<dyn Widget>>;

/// Rows `offset..offset + height` must include `row`; returns the adjusted
/// offset.
pub(crate) fn scroll_to_show(offset: usize, row: usize, height: usize) -> usize {
    if height == 0 || row < offset {
        row.min(offset)
    } else if row >= offset + height {
        row + 1 - height
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, 3, 5, 0 ; "already visible")]
    #[test_case(4, 2, 5, 2 ; "above the window")]
    #[test_case(0, 7, 5, 3 ; "below the window")]
    #[test_case(2, 6, 5, 2 ; "last visible row")]
    fn scroll_keeps_row_visible(offset: usize, row: usize, height: usize, expected: usize) {
        assert_eq!(scroll_to_show(offset, row, height), expected);
    }
}
