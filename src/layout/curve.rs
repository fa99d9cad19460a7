use super::{PathCommand, PathDescription, Point};

/// Control point x positions as multiples of the block width. Both sit between
/// the block's right edge (`1`) and the next stage's left edge (`1 / horizontal`),
/// the first biased toward the destination and the second toward the source.
pub(crate) fn control_ratios(horizontal: f32) -> (f32, f32) {
    let first = (5.0 / horizontal + horizontal) / 6.0;
    let second = (1.0 / horizontal + horizontal) / 2.0;
    (first, second)
}

/// Closed connector between a segment on the right edge of a block and the
/// matching segment on the left edge of the next stage's block.
///
/// Coordinates are stage-local: the source block's left edge is `x = 0` and the
/// next stage starts at `block_width / horizontal`. Control points share the y of
/// the endpoint they attach to, so both ends leave the blocks horizontally.
pub fn build_curve(
    source_y: f32,
    dest_y: f32,
    segment_height: f32,
    block_width: f32,
    horizontal: f32,
) -> PathDescription {
    let (first_ratio, second_ratio) = control_ratios(horizontal);
    let start_x = block_width;
    let end_x = block_width / horizontal;
    let curve_1_x = first_ratio * block_width;
    let curve_2_x = second_ratio * block_width;

    PathDescription {
        commands: vec![
            PathCommand::MoveTo {
                to: Point::new(start_x, source_y),
            },
            PathCommand::CubicTo {
                c1: Point::new(curve_1_x, source_y),
                c2: Point::new(curve_2_x, dest_y),
                to: Point::new(end_x, dest_y),
            },
            PathCommand::VerticalLineTo {
                y: dest_y + segment_height,
            },
            PathCommand::CubicTo {
                c1: Point::new(curve_2_x, dest_y + segment_height),
                c2: Point::new(curve_1_x, source_y + segment_height),
                to: Point::new(start_x, source_y + segment_height),
            },
            PathCommand::Close,
        ],
    }
}
