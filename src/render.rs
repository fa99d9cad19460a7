use crate::layout::{Block, SankeyLayout, StageLayout, Transition};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Anything that can draw the blocks and connectors of a layout.
///
/// `draw_layout` drives a surface stage by stage with fills already resolved,
/// so implementations only translate geometry into their own primitives.
pub trait DrawSurface {
    fn begin(&mut self, _width: f32, _height: f32) {}
    fn begin_stage(&mut self, _stage: &StageLayout) {}
    fn draw_block(&mut self, block: &Block, fill: &str);
    fn draw_transition(&mut self, transition: &Transition, fill: &str);
    fn end_stage(&mut self, _stage: &StageLayout) {}
    fn finish(&mut self) {}
}

/// Fill for a category: `colors[color_index % colors.len()]`.
pub fn category_color<'a>(colors: &'a [String], color_index: usize) -> &'a str {
    if colors.is_empty() {
        return "#000000";
    }
    colors[color_index % colors.len()].as_str()
}

/// Transitions take the color of their source category.
pub fn draw_layout<S: DrawSurface>(layout: &SankeyLayout, colors: &[String], surface: &mut S) {
    surface.begin(layout.width, layout.height);
    for stage in &layout.stages {
        surface.begin_stage(stage);
        for block in &stage.blocks {
            surface.draw_block(block, category_color(colors, block.color_index));
        }
        for transition in &stage.transitions {
            let color_index = stage
                .block(&transition.source)
                .map(|block| block.color_index)
                .unwrap_or(0);
            surface.draw_transition(transition, category_color(colors, color_index));
        }
        surface.end_stage(stage);
    }
    surface.finish();
}

pub struct SvgSurface<'a> {
    theme: &'a Theme,
    svg: String,
}

impl<'a> SvgSurface<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self {
            theme,
            svg: String::new(),
        }
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

impl DrawSurface for SvgSurface<'_> {
    fn begin(&mut self, width: f32, height: f32) {
        self.svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        ));
        self.svg.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            escape_xml(&self.theme.background)
        ));
        self.svg.push_str("<g class=\"content\">");
    }

    fn begin_stage(&mut self, stage: &StageLayout) {
        self.svg.push_str(&format!(
            "<g class=\"stage stage--{}\" data-total=\"{}\">",
            stage.index, stage.local_total
        ));
    }

    fn draw_block(&mut self, block: &Block, fill: &str) {
        self.svg.push_str(&format!(
            "<rect class=\"block\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" data-category=\"{}\" data-count=\"{}\"/>",
            block.x,
            block.y,
            block.width,
            block.height,
            escape_xml(fill),
            escape_xml(&block.category),
            block.count
        ));
    }

    fn draw_transition(&mut self, transition: &Transition, fill: &str) {
        let stroke = match self.theme.transition_stroke.as_deref() {
            Some(color) if self.theme.transition_stroke_width > 0.0 => format!(
                " stroke=\"{}\" stroke-width=\"{}\"",
                escape_xml(color),
                self.theme.transition_stroke_width
            ),
            _ => String::new(),
        };
        self.svg.push_str(&format!(
            "<path class=\"transition-path\" d=\"{}\" fill=\"{}\" fill-opacity=\"{}\"{} data-source=\"{}\" data-dest=\"{}\" data-count=\"{}\"/>",
            transition.path.to_svg_path(),
            escape_xml(fill),
            self.theme.transition_opacity,
            stroke,
            escape_xml(&transition.source),
            escape_xml(&transition.dest),
            transition.count
        ));
    }

    fn end_stage(&mut self, _stage: &StageLayout) {
        self.svg.push_str("</g>");
    }

    fn finish(&mut self) {
        self.svg.push_str("</g></svg>");
    }
}

pub fn render_svg(layout: &SankeyLayout, colors: &[String], theme: &Theme) -> String {
    let mut surface = SvgSurface::new(theme);
    draw_layout(layout, theme.resolve_colors(colors), &mut surface);
    surface.into_svg()
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("invalid raster size {}x{}", render_cfg.width, render_cfg.height))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let scale_x = render_cfg.width / size.width() as f32;
    let scale_y = render_cfg.height / size.height() as f32;
    let width = render_cfg.width.round().max(1.0) as u32;
    let height = render_cfg.height.round().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale_x, scale_y),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
