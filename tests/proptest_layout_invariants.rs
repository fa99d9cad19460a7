use proptest::prelude::*;
use sankey_flow::layout::{PathCommand, stage_count};
use sankey_flow::{SankeyInput, build_curve, compute_layout};

const KEYS: [&str; 4] = ["k0", "k1", "k2", "k3"];

fn arb_input() -> impl Strategy<Value = SankeyInput> {
    let trajectory = prop::collection::vec(0usize..KEYS.len(), 1..6);
    (
        prop::collection::vec(trajectory, 0..24),
        10.0f32..2000.0,
        10.0f32..2000.0,
        0.05f32..=1.0,
        0.05f32..=1.0,
    )
        .prop_map(|(data, width, height, vertical, horizontal)| {
            let mut input = SankeyInput::new(KEYS)
                .with_viewbox(width, height)
                .with_proportions(vertical, horizontal);
            for labels in data {
                input.push_trajectory(labels.into_iter().map(|idx| KEYS[idx]));
            }
            input
        })
}

fn close(a: f32, b: f32, scale: f32) -> bool {
    (a - b).abs() <= 1e-3 * scale.max(1.0)
}

proptest! {
    #[test]
    fn counts_are_conserved(input in arb_input()) {
        let layout = compute_layout(&input).unwrap();
        prop_assert_eq!(layout.stage_count(), stage_count(&input.data));
        let mut previous = usize::MAX;
        for stage in &layout.stages {
            let alive = input.data.iter().filter(|t| t.len() > stage.index).count();
            prop_assert_eq!(stage.local_total, alive);
            prop_assert!(stage.local_total <= previous);
            previous = stage.local_total;

            let block_total: usize = stage.blocks.iter().map(|b| b.count).sum();
            prop_assert_eq!(block_total, alive);
            prop_assert!(stage.blocks.iter().all(|b| b.count > 0));
        }
    }

    #[test]
    fn outgoing_segments_tile_blocks(input in arb_input()) {
        let layout = compute_layout(&input).unwrap();
        let height = input.viewbox.height;
        for stage in &layout.stages {
            for block in &stage.blocks {
                let outgoing: Vec<_> = stage
                    .transitions
                    .iter()
                    .filter(|t| t.source == block.category)
                    .collect();
                let moved: usize = outgoing.iter().map(|t| t.count).sum();
                prop_assert!(moved <= block.count);
                let covered: f32 = outgoing.iter().map(|t| t.segment.height).sum();
                let shortfall = (block.count - moved) as f32 / layout.global_total as f32
                    * height
                    * input.proportions.vertical;
                prop_assert!(close(covered + shortfall, block.height, height));
            }
        }
    }

    #[test]
    fn stages_are_vertically_centered(input in arb_input()) {
        let layout = compute_layout(&input).unwrap();
        let height = input.viewbox.height;
        for stage in layout.stages.iter().filter(|s| s.local_total > 0) {
            let weight: f32 = stage.blocks.iter().map(|b| b.slot_height).sum();
            let moment: f32 = stage
                .blocks
                .iter()
                .map(|b| b.slot_height * (b.y + b.slot_height / 2.0))
                .sum();
            prop_assert!(close(moment / weight, height / 2.0, height));
            for pair in stage.blocks.windows(2) {
                prop_assert!(pair[0].y + pair[0].height <= pair[1].y + 1e-3 * height);
            }
        }
    }

    #[test]
    fn layout_is_deterministic(input in arb_input()) {
        prop_assert_eq!(compute_layout(&input).unwrap(), compute_layout(&input).unwrap());
    }

    #[test]
    fn connector_endpoints_touch_stage_edges(input in arb_input()) {
        let layout = compute_layout(&input).unwrap();
        for pair in layout.stages.windows(2) {
            let (stage, next) = (&pair[0], &pair[1]);
            for transition in &stage.transitions {
                let source = stage.block(&transition.source).unwrap();
                let start = transition.path.start().unwrap();
                let end = transition.path.end().unwrap();
                prop_assert!(close(start.x, source.x + source.width, input.viewbox.width));
                prop_assert!(close(end.x, next.x, input.viewbox.width));
                prop_assert!(start.y >= source.y - 1e-3 * input.viewbox.height);
            }
        }
    }

    #[test]
    fn curve_controls_stay_between_ends(
        source_y in 0.0f32..500.0,
        dest_y in 0.0f32..500.0,
        segment in 0.1f32..100.0,
        block_width in 1.0f32..300.0,
        horizontal in 0.05f32..=1.0,
    ) {
        let path = build_curve(source_y, dest_y, segment, block_width, horizontal);
        let start = path.start().unwrap();
        let end = path.end().unwrap();
        let PathCommand::CubicTo { c1, c2, .. } = path.commands[1] else {
            panic!("expected cubic");
        };
        for control in [c1, c2] {
            prop_assert!(control.x >= start.x - 1e-3);
            prop_assert!(control.x <= end.x + 1e-3);
        }
        prop_assert_eq!(c1.y, source_y);
        prop_assert_eq!(c2.y, dest_y);
        prop_assert_eq!(path.commands[2], PathCommand::VerticalLineTo { y: dest_y + segment });
    }
}
