use crate::layout::{PathDescription, SankeyLayout};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub total: usize,
    pub stages: Vec<StageDump>,
}

#[derive(Debug, Serialize)]
pub struct StageDump {
    pub index: usize,
    pub x: f32,
    pub total: usize,
    pub distribution: Vec<(String, usize)>,
    pub blocks: Vec<BlockDump>,
    pub transitions: Vec<TransitionDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockDump {
    pub category: String,
    pub count: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color_index: usize,
}

#[derive(Debug, Serialize)]
pub struct TransitionDump {
    pub source: String,
    pub dest: String,
    pub count: usize,
    pub path: PathDescription,
}

impl LayoutDump {
    pub fn from_layout(layout: &SankeyLayout) -> Self {
        let stages = layout
            .stages
            .iter()
            .map(|stage| StageDump {
                index: stage.index,
                x: stage.x,
                total: stage.local_total,
                distribution: stage
                    .distribution
                    .iter()
                    .map(|(category, count)| (category.clone(), *count))
                    .collect(),
                blocks: stage
                    .blocks
                    .iter()
                    .map(|block| BlockDump {
                        category: block.category.clone(),
                        count: block.count,
                        x: block.x,
                        y: block.y,
                        width: block.width,
                        height: block.height,
                        color_index: block.color_index,
                    })
                    .collect(),
                transitions: stage
                    .transitions
                    .iter()
                    .map(|transition| TransitionDump {
                        source: transition.source.clone(),
                        dest: transition.dest.clone(),
                        count: transition.count,
                        path: transition.path.clone(),
                    })
                    .collect(),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            total: layout.global_total,
            stages,
        }
    }
}

pub fn write_layout_dump(output: Option<&Path>, layout: &SankeyLayout) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, &dump)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &dump)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::SankeyInput;
    use crate::layout::compute_layout;

    #[test]
    fn dump_follows_output_contract() {
        let mut input = SankeyInput::new(["a", "b"]).with_viewbox(100.0, 100.0);
        input.push_trajectory(["a", "b"]);
        let layout = compute_layout(&input).unwrap();
        let value = serde_json::to_value(LayoutDump::from_layout(&layout)).unwrap();

        let stage = &value["stages"][0];
        assert_eq!(stage["blocks"][0]["category"], "a");
        assert_eq!(stage["blocks"][0]["colorIndex"], 0);
        assert_eq!(stage["distribution"][1][0], "b");
        assert_eq!(stage["distribution"][1][1], 0);

        let path = stage["transitions"][0]["path"].as_array().unwrap();
        let ops: Vec<&str> = path.iter().map(|c| c["op"].as_str().unwrap()).collect();
        assert_eq!(
            ops,
            vec!["move_to", "cubic_to", "vertical_line_to", "cubic_to", "close"]
        );
        assert_eq!(value["stages"][1]["blocks"][0]["colorIndex"], 1);
    }
}
