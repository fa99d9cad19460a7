use sankey_flow::{Config, Proportions, Theme, render};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SankeyRenderOptions {
    theme: Option<String>,
    background: Option<String>,
    transition_opacity: Option<f32>,
    proportions: Option<Proportions>,
}

fn build_config(options: SankeyRenderOptions) -> Config {
    let mut config = Config::default();
    if let Some(theme) = options.theme.as_deref().and_then(Theme::by_name) {
        config.theme = theme;
    }
    if let Some(background) = options.background {
        config.theme.background = background;
    }
    if let Some(opacity) = options.transition_opacity {
        config.theme.transition_opacity = opacity.clamp(0.0, 1.0);
    }
    config.layout.proportions = options.proportions;
    config
}

/// Renders an input document (`viewbox`, `data`, `colors`, `keys`, `proportions`) to SVG.
#[wasm_bindgen]
pub fn render_sankey_svg(input_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SankeyRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SankeyRenderOptions::default()
    };

    render(input_json, &build_config(options)).map_err(|error| JsValue::from_str(&format!("{error:#}")))
}
