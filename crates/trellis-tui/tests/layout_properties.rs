mod common;

use common::{leaves, Leaf};
use proptest::prelude::*;
use trellis_tui::geometry::{Axis, Rect};
use trellis_tui::layout::{calculate_extents, BoxLayout, ChildMeasurement, FlexLayoutInput};
use trellis_tui::view::{fill, flex, hstack, vstack, ViewExt, UNBOUNDED};
use trellis_tui::{Style, View};

#[test]
fn fixed_children_with_gap() {
    let result = calculate_extents(&FlexLayoutInput {
        available: 200,
        children: vec![
            ChildMeasurement::Fixed(20),
            ChildMeasurement::Fixed(30),
            ChildMeasurement::Fixed(40),
        ],
        gap: 10,
    });
    assert_eq!(result.offsets, vec![0, 30, 70]);
    assert_eq!(result.total_used, 110);
}

#[test]
fn two_growing_children_split_evenly() {
    let children = [Leaf::new(20, 1, 1), Leaf::new(20, 1, 1)];
    let rects = BoxLayout::horizontal(0).arrange(Rect::new(0, 0, 100, 1), &children);
    assert_eq!(rects, vec![Rect::new(0, 0, 50, 1), Rect::new(50, 0, 50, 1)]);
}

#[test]
fn overflow_is_not_shrunk() {
    let children = [Leaf::new(8, 1, 0), Leaf::new(8, 1, 1)];
    let rects = BoxLayout::horizontal(1).arrange(Rect::new(0, 0, 10, 1), &children);
    assert_eq!(rects[0].width, 8);
    assert_eq!(rects[1], Rect::new(9, 0, 8, 1));
}

#[test]
fn nested_stacks_fill_the_screen() {
    let root = vstack([
        hstack([fill(Style::default()), flex(1, fill(Style::default()))]).boxed(),
        flex(1, fill(Style::default())),
    ]);
    let size = root.measure(40, 12);
    assert_eq!(size.width, 40);
    assert_eq!(root.measure(40, UNBOUNDED).height, 0);
}

proptest! {
    #[test]
    fn grown_extents_fill_container(children in leaves(), extent in 0u16..200, spacing in 0u16..3) {
        let layout = BoxLayout::new(Axis::Horizontal, spacing);
        let rects = layout.arrange(Rect::new(0, 0, extent, 4), &children);

        let natural: usize = children.iter().map(|c| c.size.width as usize).sum();
        let fixed = natural + spacing as usize * (children.len() - 1);
        let used: usize = rects.iter().map(|r| r.width as usize).sum::<usize>()
            + spacing as usize * (children.len() - 1);

        if children.iter().any(|c| c.params.grow > 0) && fixed <= extent as usize {
            prop_assert_eq!(used, extent as usize);
        } else {
            prop_assert_eq!(used, fixed);
        }
    }

    #[test]
    fn arrange_is_idempotent(children in leaves(), width in 0u16..120, height in 0u16..10) {
        let layout = BoxLayout::vertical(1);
        let bounds = Rect::new(3, 2, width, height);
        prop_assert_eq!(layout.arrange(bounds, &children), layout.arrange(bounds, &children));
    }

    #[test]
    fn children_never_overlap(children in leaves(), extent in 0u16..200) {
        let rects = BoxLayout::horizontal(0).arrange(Rect::new(0, 0, extent, 3), &children);
        for pair in rects.windows(2) {
            prop_assert!(pair[0].right() <= pair[1].x);
        }
    }

    #[test]
    fn flex_weights_conserve_space(
        fixed in prop::collection::vec(0usize..20, 0..4),
        weights in prop::collection::vec(1u16..5, 1..5),
        available in 0usize..300,
    ) {
        let mut children: Vec<ChildMeasurement> = fixed.iter().map(|n| ChildMeasurement::Fixed(*n)).collect();
        children.extend(weights.iter().map(|w| ChildMeasurement::Flex(*w)));
        let count = children.len();
        let result = calculate_extents(&FlexLayoutInput { available, children, gap: 0 });

        let fixed_total: usize = fixed.iter().sum();
        if fixed_total <= available {
            prop_assert_eq!(result.total_used, available);
        }
        prop_assert_eq!(result.extents.len(), count);
    }
}
