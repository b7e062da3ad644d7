//! Weighted distribution of leftover space along one axis.
//!
//! Shared by the box engine (grow factors) and the declarative stacks (flex
//! weights). Integer division truncates; the last positively weighted child
//! absorbs the whole remainder so that the assigned extents always sum to
//! exactly the space being distributed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildMeasurement {
    Fixed(usize),
    Flex(u16),
    Content(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexLayoutInput {
    pub available: usize,
    pub children: Vec<ChildMeasurement>,
    pub gap: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexLayoutResult {
    pub extents: Vec<usize>,
    pub offsets: Vec<usize>,
    pub total_used: usize,
}

/// Split `extra` among `weights`. Zero weights receive nothing; the last
/// non-zero weight receives the rounding remainder.
pub fn distribute(extra: usize, weights: &[u16]) -> Vec<usize> {
    let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if total == 0 {
        return vec![0; weights.len()];
    }

    let mut shares: Vec<usize> = weights
        .iter()
        .map(|w| (extra as u64 * u64::from(*w) / total) as usize)
        .collect();

    let assigned: usize = shares.iter().sum();
    if let Some(last) = weights.iter().rposition(|w| *w > 0) {
        shares[last] += extra - assigned;
    }
    shares
}

/// Lay out a single line of children: fixed and content children keep their
/// size, flex children split whatever is left after fixed sizes and gaps.
pub fn calculate_extents(input: &FlexLayoutInput) -> FlexLayoutResult {
    if input.children.is_empty() {
        return FlexLayoutResult {
            extents: vec![],
            offsets: vec![],
            total_used: 0,
        };
    }

    let total_gap = input.gap * input.children.len().saturating_sub(1);
    let fixed_used: usize = input
        .children
        .iter()
        .map(|child| match child {
            ChildMeasurement::Fixed(n) | ChildMeasurement::Content(n) => *n,
            ChildMeasurement::Flex(_) => 0,
        })
        .sum();

    let remaining = input.available.saturating_sub(fixed_used + total_gap);
    let weights: Vec<u16> = input
        .children
        .iter()
        .map(|child| match child {
            ChildMeasurement::Flex(weight) => *weight,
            _ => 0,
        })
        .collect();
    let shares = distribute(remaining, &weights);

    let mut extents = Vec::with_capacity(input.children.len());
    let mut offsets = Vec::with_capacity(input.children.len());
    let mut cursor = 0;

    for (i, child) in input.children.iter().enumerate() {
        let extent = match child {
            ChildMeasurement::Fixed(n) | ChildMeasurement::Content(n) => *n,
            ChildMeasurement::Flex(_) => shares[i],
        };
        if i > 0 {
            cursor += input.gap;
        }
        offsets.push(cursor);
        extents.push(extent);
        cursor += extent;
    }

    FlexLayoutResult {
        extents,
        offsets,
        total_used: cursor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn column(available: usize, children: Vec<ChildMeasurement>, gap: usize) -> Vec<usize> {
        calculate_extents(&FlexLayoutInput {
            available,
            children,
            gap,
        })
        .extents
    }

    fn arb_child_measurement() -> impl Strategy<Value = ChildMeasurement> {
        prop_oneof![
            (1usize..200).prop_map(ChildMeasurement::Fixed),
            (1u16..10).prop_map(ChildMeasurement::Flex),
            (1usize..200).prop_map(ChildMeasurement::Content),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn extents_count_matches_children_count(
            available in 10usize..500,
            children in proptest::collection::vec(arb_child_measurement(), 0..10),
            gap in 0usize..5,
        ) {
            let input = FlexLayoutInput { available, children: children.clone(), gap };
            let result = calculate_extents(&input);
            prop_assert_eq!(result.extents.len(), children.len());
            prop_assert_eq!(result.offsets.len(), children.len());
        }

        #[test]
        fn fixed_and_content_preserved(
            available in 10usize..500,
            children in proptest::collection::vec(arb_child_measurement(), 1..10)
        ) {
            let input = FlexLayoutInput { available, children: children.clone(), gap: 0 };
            let result = calculate_extents(&input);

            for (i, child) in children.iter().enumerate() {
                match child {
                    ChildMeasurement::Fixed(w) | ChildMeasurement::Content(w) => {
                        prop_assert_eq!(result.extents[i], *w, "Fixed/Content extent should be preserved");
                    }
                    ChildMeasurement::Flex(_) => {}
                }
            }
        }

        #[test]
        fn flex_children_consume_exactly_the_remainder(
            fixed_width in 10usize..100,
            weights in proptest::collection::vec(1u16..5, 1..6),
            gap in 0usize..4,
        ) {
            let available = 500;
            let mut children = vec![ChildMeasurement::Fixed(fixed_width)];
            children.extend(weights.iter().map(|w| ChildMeasurement::Flex(*w)));

            let input = FlexLayoutInput { available, children: children.clone(), gap };
            let result = calculate_extents(&input);

            let total_flex: usize = result.extents[1..].iter().sum();
            let total_gap = gap * (children.len() - 1);
            prop_assert_eq!(total_flex + fixed_width + total_gap, available);
            prop_assert_eq!(result.total_used, available);
        }

        #[test]
        fn distribute_conserves_extra(
            extra in 0usize..10_000,
            weights in proptest::collection::vec(0u16..8, 0..8),
        ) {
            let shares = distribute(extra, &weights);
            prop_assert_eq!(shares.len(), weights.len());
            if weights.iter().any(|w| *w > 0) {
                prop_assert_eq!(shares.iter().sum::<usize>(), extra);
            } else {
                prop_assert!(shares.iter().all(|s| *s == 0));
            }
            for (share, weight) in shares.iter().zip(&weights) {
                if *weight == 0 {
                    prop_assert_eq!(*share, 0);
                }
            }
        }
    }

    #[test]
    fn empty_children_returns_empty() {
        let input = FlexLayoutInput {
            available: 100,
            children: vec![],
            gap: 3,
        };
        let result = calculate_extents(&input);
        assert!(result.extents.is_empty());
        assert_eq!(result.total_used, 0);
    }

    #[test]
    fn all_fixed_widths() {
        let input = FlexLayoutInput {
            available: 100,
            children: vec![
                ChildMeasurement::Fixed(20),
                ChildMeasurement::Fixed(30),
                ChildMeasurement::Content(15),
            ],
            gap: 0,
        };
        let result = calculate_extents(&input);
        assert_eq!(result.extents, vec![20, 30, 15]);
        assert_eq!(result.total_used, 65);
    }

    #[test]
    fn gaps_shift_offsets() {
        let input = FlexLayoutInput {
            available: 200,
            children: vec![
                ChildMeasurement::Fixed(20),
                ChildMeasurement::Fixed(30),
                ChildMeasurement::Fixed(40),
            ],
            gap: 10,
        };
        let result = calculate_extents(&input);
        assert_eq!(result.offsets, vec![0, 30, 70]);
        assert_eq!(result.total_used, 110);
    }

    #[test]
    fn single_flex_takes_remaining() {
        let input = FlexLayoutInput {
            available: 100,
            children: vec![
                ChildMeasurement::Fixed(20),
                ChildMeasurement::Flex(1),
                ChildMeasurement::Fixed(10),
            ],
            gap: 0,
        };
        let result = calculate_extents(&input);
        assert_eq!(result.extents, vec![20, 70, 10]);
        assert_eq!(result.total_used, 100);
    }

    #[test]
    fn remainder_goes_to_last_flex_child() {
        let input = FlexLayoutInput {
            available: 10,
            children: vec![
                ChildMeasurement::Flex(1),
                ChildMeasurement::Flex(1),
                ChildMeasurement::Flex(1),
            ],
            gap: 0,
        };
        let result = calculate_extents(&input);
        assert_eq!(result.extents, vec![3, 3, 4]);
    }

    #[test]
    fn remainder_skips_trailing_zero_weight() {
        assert_eq!(distribute(10, &[1, 1, 1, 0]), vec![3, 3, 4, 0]);
        assert_eq!(distribute(7, &[0, 0]), vec![0, 0]);
    }

    #[test]
    fn multiple_flex_split_proportionally() {
        let input = FlexLayoutInput {
            available: 100,
            children: vec![ChildMeasurement::Flex(1), ChildMeasurement::Flex(3)],
            gap: 0,
        };
        let result = calculate_extents(&input);
        assert_eq!(result.extents, vec![25, 75]);
        assert_eq!(result.total_used, 100);
    }

    #[test]
    fn overflow_handled_gracefully() {
        let input = FlexLayoutInput {
            available: 50,
            children: vec![
                ChildMeasurement::Fixed(30),
                ChildMeasurement::Flex(2),
                ChildMeasurement::Fixed(40),
            ],
            gap: 0,
        };
        let result = calculate_extents(&input);
        assert_eq!(result.extents, vec![30, 0, 40]);
        assert_eq!(result.total_used, 70);
    }

    #[test]
    fn column_heights_with_gap() {
        let children = vec![
            ChildMeasurement::Fixed(10),
            ChildMeasurement::Flex(1),
            ChildMeasurement::Fixed(10),
        ];
        let heights = column(100, children, 5);
        assert_eq!(heights, vec![10, 70, 10]);
    }

    #[test]
    fn column_multiple_flex() {
        let children = vec![
            ChildMeasurement::Flex(1),
            ChildMeasurement::Flex(2),
            ChildMeasurement::Flex(1),
        ];
        let heights = column(80, children, 0);
        assert_eq!(heights, vec![20, 40, 20]);
    }
}
