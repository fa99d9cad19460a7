mod curve;
mod distribution;
mod types;

pub use curve::build_curve;
pub use distribution::{DistributionEngine, stage_count};
pub use types::*;

use crate::error::Result;
use crate::ir::SankeyInput;

/// Lays out every stage of `input`. Fails before producing any geometry when
/// the input does not validate.
pub fn compute_layout(input: &SankeyInput) -> Result<SankeyLayout> {
    let engine = DistributionEngine::new(input)?;
    let stage_count = engine.stage_count();
    tracing::debug!(
        stages = stage_count,
        trajectories = engine.global_total(),
        categories = input.keys.len(),
        "computing sankey layout"
    );

    let mut stages = Vec::with_capacity(stage_count);
    for index in 0..stage_count {
        let distribution = engine.distribution_at(index);
        let local_total: usize = distribution.values().sum();
        let blocks = engine.layout_stage(index);
        let transitions = engine.layout_transitions(index);
        tracing::trace!(
            stage = index,
            local_total,
            blocks = blocks.len(),
            transitions = transitions.len(),
            "stage laid out"
        );
        stages.push(StageLayout {
            index,
            x: engine.stage_x(index),
            distribution,
            local_total,
            blocks,
            transitions,
        });
    }

    Ok(SankeyLayout {
        width: input.viewbox.width,
        height: input.viewbox.height,
        global_total: engine.global_total(),
        stages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    fn funnel() -> SankeyInput {
        let mut input = SankeyInput::new(["lead", "trial", "qualified", "customer", "lost"])
            .with_viewbox(1500.0, 900.0)
            .with_proportions(0.9, 0.65);
        input.push_trajectory(["lead", "lead", "lost"]);
        input.push_trajectory(["trial", "qualified", "customer"]);
        input.push_trajectory(["trial", "qualified", "lost"]);
        input.push_trajectory(["lead", "trial", "qualified", "customer"]);
        input.push_trajectory(["lead", "lead", "lead", "lead", "trial", "customer"]);
        input
    }

    #[test]
    fn layout_has_one_stage_per_column() {
        let layout = compute_layout(&funnel()).unwrap();
        assert_eq!(layout.stage_count(), 6);
        assert_eq!(layout.global_total, 5);
        let totals: Vec<usize> = layout.stages.iter().map(|s| s.local_total).collect();
        assert_eq!(totals, vec![5, 5, 5, 2, 1, 1]);
        assert!(layout.stages.last().unwrap().transitions.is_empty());
    }

    #[test]
    fn stage_columns_are_evenly_spaced() {
        let layout = compute_layout(&funnel()).unwrap();
        for stage in &layout.stages {
            assert!((stage.x - stage.index as f32 * 250.0).abs() < 1e-3);
            for block in &stage.blocks {
                assert_eq!(block.x, stage.x);
                assert!((block.width - 162.5).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn color_index_is_stable_across_stages() {
        let layout = compute_layout(&funnel()).unwrap();
        for stage in &layout.stages {
            for block in &stage.blocks {
                let expected = funnel().key_index(&block.category).unwrap();
                assert_eq!(block.color_index, expected);
            }
        }
    }

    #[test]
    fn invalid_input_yields_no_layout() {
        let mut input = funnel();
        input.push_trajectory(["lead", "ghost"]);
        assert!(matches!(
            compute_layout(&input),
            Err(ConfigurationError::UnknownCategory { ref label, trajectory: 5, stage: 1 }) if label == "ghost"
        ));
    }

    #[test]
    fn empty_data_yields_empty_layout() {
        let input = SankeyInput::new(["a"]);
        let layout = compute_layout(&input).unwrap();
        assert!(layout.is_empty());
        assert_eq!(layout.global_total, 0);
    }
}
