use crate::ir::{Proportions, SankeyInput};
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Overrides the proportions carried by the input when set.
    pub proportions: Option<Proportions>,
}

impl LayoutConfig {
    pub fn apply(&self, input: &mut SankeyInput) {
        if let Some(proportions) = self.proportions {
            input.proportions = proportions;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1500.0,
            height: 900.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    palette: Option<Vec<String>>,
    transition_opacity: Option<f32>,
    transition_stroke: Option<String>,
    transition_stroke_width: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    proportions: Option<Proportions>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = serde_json::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme `{theme_name}`"))?;
        config.render.background = config.theme.background.clone();
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.render.background = v.clone();
            config.theme.background = v;
        }
        if let Some(v) = vars.palette {
            if !v.is_empty() {
                config.theme.palette = v;
            }
        }
        if let Some(v) = vars.transition_opacity {
            config.theme.transition_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = vars.transition_stroke {
            config.theme.transition_stroke = Some(v);
        }
        if let Some(v) = vars.transition_stroke_width {
            config.theme.transition_stroke_width = v.max(0.0);
        }
    }

    config.layout.proportions = parsed.proportions;
    Ok(config)
}

/// Parses a JSON document following the input contract.
pub fn parse_input(contents: &str) -> anyhow::Result<SankeyInput> {
    let input: SankeyInput =
        serde_json::from_str(contents).context("input is not a valid sankey document")?;
    Ok(input)
}
