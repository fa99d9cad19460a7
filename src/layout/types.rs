use indexmap::IndexMap;
use serde::Serialize;

/// Category label -> count at one stage. Seeded with every key at zero, in key order.
pub type Distribution = IndexMap<String, usize>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Path primitive in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo { to: Point },
    CubicTo { c1: Point, c2: Point, to: Point },
    VerticalLineTo { y: f32 },
    Close,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PathDescription {
    pub commands: Vec<PathCommand>,
}

impl PathDescription {
    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        for command in &mut self.commands {
            match command {
                PathCommand::MoveTo { to } => {
                    to.x += dx;
                    to.y += dy;
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    for point in [c1, c2, to] {
                        point.x += dx;
                        point.y += dy;
                    }
                }
                PathCommand::VerticalLineTo { y } => *y += dy,
                PathCommand::Close => {}
            }
        }
        self
    }

    pub fn start(&self) -> Option<Point> {
        self.commands.iter().find_map(|command| match command {
            PathCommand::MoveTo { to } => Some(*to),
            _ => None,
        })
    }

    /// Endpoint of the first arc, where the connector meets the destination block.
    pub fn end(&self) -> Option<Point> {
        self.commands.iter().find_map(|command| match command {
            PathCommand::CubicTo { to, .. } => Some(*to),
            _ => None,
        })
    }

    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for command in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            match command {
                PathCommand::MoveTo { to } => {
                    d.push_str(&format!("M {:.2} {:.2}", to.x, to.y));
                }
                PathCommand::CubicTo { c1, c2, to } => {
                    d.push_str(&format!(
                        "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                        c1.x, c1.y, c2.x, c2.y, to.x, to.y
                    ));
                }
                PathCommand::VerticalLineTo { y } => {
                    d.push_str(&format!("V {:.2}", y));
                }
                PathCommand::Close => d.push('Z'),
            }
        }
        d
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub category: String,
    pub count: usize,
    /// Position of `category` in the key list; fixed across stages.
    pub color_index: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Drawn height, `slot_height * vertical`.
    pub height: f32,
    /// Un-shrunk stacking advance; the gap below the drawn rect is `slot_height - height`.
    pub slot_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSegment {
    pub source_y: f32,
    pub dest_y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub source: String,
    pub dest: String,
    pub count: usize,
    pub segment: TransitionSegment,
    pub path: PathDescription,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageLayout {
    pub index: usize,
    pub x: f32,
    pub distribution: Distribution,
    pub local_total: usize,
    pub blocks: Vec<Block>,
    pub transitions: Vec<Transition>,
}

impl StageLayout {
    pub fn block(&self, category: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.category == category)
    }

    pub fn transition(&self, source: &str, dest: &str) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|transition| transition.source == source && transition.dest == dest)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLayout {
    pub width: f32,
    pub height: f32,
    pub global_total: usize,
    pub stages: Vec<StageLayout>,
}

impl SankeyLayout {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
