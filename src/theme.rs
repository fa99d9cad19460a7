use serde::{Deserialize, Serialize};

const CLASSIC_PALETTE: [&str; 5] = ["#1f77b4", "#ff7f0e", "#9467bd", "#2ca02c", "#d62728"];

const MODERN_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    /// Used when the input carries no colors of its own.
    pub palette: Vec<String>,
    pub transition_opacity: f32,
    pub transition_stroke: Option<String>,
    pub transition_stroke_width: f32,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            palette: CLASSIC_PALETTE.iter().map(|c| c.to_string()).collect(),
            transition_opacity: 0.35,
            transition_stroke: None,
            transition_stroke_width: 0.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            palette: MODERN_PALETTE.iter().map(|c| c.to_string()).collect(),
            transition_opacity: 0.45,
            transition_stroke: Some("#FFFFFF".to_string()),
            transition_stroke_width: 0.5,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "modern" => Some(Self::modern()),
            _ => None,
        }
    }

    /// Colors for a render: the input's own list when present, the palette otherwise.
    pub fn resolve_colors<'a>(&'a self, colors: &'a [String]) -> &'a [String] {
        if colors.is_empty() {
            &self.palette
        } else {
            colors
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
