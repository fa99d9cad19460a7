#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config, parse_input};
pub use error::ConfigurationError;
pub use ir::{Proportions, SankeyInput, Trajectory, Viewbox};
pub use layout::{
    DistributionEngine, PathCommand, PathDescription, SankeyLayout, build_curve, compute_layout,
};
pub use render::{DrawSurface, SvgSurface, draw_layout, render_svg};
pub use theme::Theme;

/// Parses an input document, applies `config` and renders it to SVG.
pub fn render(input_json: &str, config: &Config) -> anyhow::Result<String> {
    let mut input = parse_input(input_json)?;
    config.layout.apply(&mut input);
    let layout = compute_layout(&input)?;
    Ok(render_svg(&layout, &input.colors, &config.theme))
}
