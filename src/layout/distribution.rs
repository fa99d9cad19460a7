use std::collections::HashMap;

use crate::error::{ConfigurationError, Result};
use crate::ir::{Proportions, SankeyInput, Trajectory, Viewbox};

use super::curve::build_curve;
use super::{Block, Distribution, Transition, TransitionSegment};

/// Per-stage counting and vertical placement over a validated input.
///
/// Every stage is sized against the global trajectory count, so a stage whose
/// trajectories have partly exited is shorter than the canvas and centered in it.
#[derive(Debug, Clone)]
pub struct DistributionEngine<'a> {
    trajectories: &'a [Trajectory],
    keys: &'a [String],
    viewbox: Viewbox,
    proportions: Proportions,
    stage_count: usize,
}

impl<'a> DistributionEngine<'a> {
    pub fn new(input: &'a SankeyInput) -> Result<Self> {
        validate(input)?;
        Ok(Self {
            trajectories: &input.data,
            keys: &input.keys,
            viewbox: input.viewbox,
            proportions: input.proportions,
            stage_count: stage_count(&input.data),
        })
    }

    pub fn stage_count(&self) -> usize {
        self.stage_count
    }

    pub fn global_total(&self) -> usize {
        self.trajectories.len()
    }

    /// Left edge of a stage column in canvas coordinates.
    pub fn stage_x(&self, stage: usize) -> f32 {
        if self.stage_count == 0 {
            return 0.0;
        }
        stage as f32 * self.viewbox.width / self.stage_count as f32
    }

    pub fn block_width(&self) -> f32 {
        if self.stage_count == 0 {
            return 0.0;
        }
        self.viewbox.width / self.stage_count as f32 * self.proportions.horizontal
    }

    pub fn distribution_at(&self, stage: usize) -> Distribution {
        let mut distribution = self.seeded();
        for trajectory in self.trajectories {
            if let Some(label) = trajectory.get(stage) {
                if let Some(count) = distribution.get_mut(label) {
                    *count += 1;
                }
            }
        }
        distribution
    }

    /// Blocks for every category with a non-zero count, stacked in key order.
    pub fn layout_stage(&self, stage: usize) -> Vec<Block> {
        let distribution = self.distribution_at(stage);
        let Some(mut offset) = self.initial_offset(&distribution) else {
            return Vec::new();
        };
        let x = self.stage_x(stage);
        let width = self.block_width();

        let mut blocks = Vec::new();
        for (color_index, (category, &count)) in distribution.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let slot_height = self.scaled(count);
            blocks.push(Block {
                category: category.clone(),
                count,
                color_index,
                x,
                y: offset,
                width,
                height: slot_height * self.proportions.vertical,
                slot_height,
            });
            offset += slot_height;
        }
        blocks
    }

    /// Connectors from `stage` to `stage + 1`, sources then destinations in key order.
    ///
    /// Each source block is tiled top-down by its outgoing segments and each
    /// destination block by its incoming ones; trajectories that end at `stage`
    /// leave the bottom of their source block uncovered.
    pub fn layout_transitions(&self, stage: usize) -> Vec<Transition> {
        let sources = self.layout_stage(stage);
        let destinations = self.layout_stage(stage + 1);
        if sources.is_empty() || destinations.is_empty() {
            return Vec::new();
        }

        let flows = self.transition_counts(stage);
        let mut dest_offsets: HashMap<&str, f32> = destinations
            .iter()
            .map(|block| (block.category.as_str(), block.y))
            .collect();
        let block_width = self.block_width();
        let stage_x = self.stage_x(stage);

        let mut transitions = Vec::new();
        for block in &sources {
            let mut source_y = block.y;
            let row = &flows[block.color_index];
            for (dest_idx, dest) in self.keys.iter().enumerate() {
                let count = row[dest_idx];
                if count == 0 {
                    continue;
                }
                let Some(dest_y) = dest_offsets.get_mut(dest.as_str()) else {
                    continue;
                };
                let height = self.scaled(count) * self.proportions.vertical;
                let segment = TransitionSegment {
                    source_y,
                    dest_y: *dest_y,
                    height,
                };
                let path = build_curve(
                    segment.source_y,
                    segment.dest_y,
                    height,
                    block_width,
                    self.proportions.horizontal,
                )
                .translate(stage_x, 0.0);
                tracing::trace!(
                    stage,
                    source = %block.category,
                    dest = %dest,
                    count,
                    "transition segment"
                );
                transitions.push(Transition {
                    source: block.category.clone(),
                    dest: dest.clone(),
                    count,
                    segment,
                    path,
                });
                source_y += height;
                *dest_y += height;
            }
        }
        transitions
    }

    /// `counts[source][dest]` for trajectories present at both `stage` and `stage + 1`.
    fn transition_counts(&self, stage: usize) -> Vec<Vec<usize>> {
        let index: HashMap<&str, usize> = self
            .keys
            .iter()
            .enumerate()
            .map(|(idx, key)| (key.as_str(), idx))
            .collect();
        let mut counts = vec![vec![0usize; self.keys.len()]; self.keys.len()];
        for trajectory in self.trajectories {
            let (Some(from), Some(to)) = (trajectory.get(stage), trajectory.get(stage + 1)) else {
                continue;
            };
            if let (Some(&from), Some(&to)) = (index.get(from.as_str()), index.get(to.as_str())) {
                counts[from][to] += 1;
            }
        }
        counts
    }

    fn seeded(&self) -> Distribution {
        self.keys.iter().map(|key| (key.clone(), 0)).collect()
    }

    /// Top of the first block, or `None` when there is nothing to place.
    fn initial_offset(&self, distribution: &Distribution) -> Option<f32> {
        let global_total = self.global_total();
        let local_total: usize = distribution.values().sum();
        if global_total == 0 || local_total == 0 {
            return None;
        }
        let missing = (global_total - local_total) as f32;
        Some(missing / global_total as f32 * self.viewbox.height / 2.0)
    }

    fn scaled(&self, count: usize) -> f32 {
        count as f32 / self.global_total() as f32 * self.viewbox.height
    }
}

/// Longest trajectory; zero for empty input.
pub fn stage_count(trajectories: &[Trajectory]) -> usize {
    trajectories.iter().map(Vec::len).max().unwrap_or(0)
}

pub(crate) fn validate(input: &SankeyInput) -> Result<()> {
    let Viewbox { width, height } = input.viewbox;
    if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
        return Err(ConfigurationError::InvalidViewbox { width, height });
    }
    for (name, value) in [
        ("vertical", input.proportions.vertical),
        ("horizontal", input.proportions.horizontal),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            return Err(ConfigurationError::InvalidProportion { name, value });
        }
    }

    if input.keys.is_empty() {
        return Err(ConfigurationError::EmptyCategories);
    }
    let mut known: HashMap<&str, usize> = HashMap::with_capacity(input.keys.len());
    for (idx, key) in input.keys.iter().enumerate() {
        if known.insert(key.as_str(), idx).is_some() {
            return Err(ConfigurationError::DuplicateCategory { label: key.clone() });
        }
    }

    for (trajectory, labels) in input.data.iter().enumerate() {
        if labels.is_empty() {
            return Err(ConfigurationError::EmptyTrajectory { trajectory });
        }
        for (stage, label) in labels.iter().enumerate() {
            if !known.contains_key(label.as_str()) {
                return Err(ConfigurationError::UnknownCategory {
                    label: label.clone(),
                    trajectory,
                    stage,
                });
            }
        }
    }
    Ok(())
}
