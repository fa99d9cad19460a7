use serde::{Deserialize, Serialize};

/// One entity's path through the stages, one category label per stage.
pub type Trajectory = Vec<String>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewbox {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewbox {
    fn default() -> Self {
        Self {
            width: 1500.0,
            height: 900.0,
        }
    }
}

/// `vertical` is the drawn fraction of each block's slot; `horizontal` is the
/// fraction of a stage column taken by the block, the rest is the curve run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Proportions {
    pub vertical: f32,
    pub horizontal: f32,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            vertical: 0.9,
            horizontal: 0.65,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SankeyInput {
    #[serde(default)]
    pub viewbox: Viewbox,
    pub data: Vec<Trajectory>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub keys: Vec<String>,
    #[serde(default)]
    pub proportions: Proportions,
}

impl SankeyInput {
    pub fn new<K, S>(keys: K) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn push_trajectory<T, S>(&mut self, labels: T)
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data.push(labels.into_iter().map(Into::into).collect());
    }

    pub fn with_viewbox(mut self, width: f32, height: f32) -> Self {
        self.viewbox = Viewbox { width, height };
        self
    }

    pub fn with_proportions(mut self, vertical: f32, horizontal: f32) -> Self {
        self.proportions = Proportions {
            vertical,
            horizontal,
        };
        self
    }

    /// Position of `label` in `keys`, which is also its color index.
    pub fn key_index(&self, label: &str) -> Option<usize> {
        self.keys.iter().position(|key| key == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_input_contract() {
        let json = r##"{
            "viewbox": { "width": 300, "height": 200 },
            "data": [["a", "b"], ["a"]],
            "colors": ["#111111"],
            "keys": ["a", "b"],
            "proportions": { "vertical": 0.8, "horizontal": 0.5 }
        }"##;
        let input: SankeyInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.viewbox.width, 300.0);
        assert_eq!(input.data.len(), 2);
        assert_eq!(input.data[0], vec!["a", "b"]);
        assert_eq!(input.proportions.horizontal, 0.5);
        assert_eq!(input.key_index("b"), Some(1));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let input: SankeyInput = serde_json::from_str(r#"{"data": [], "keys": ["x"]}"#).unwrap();
        assert!(input.colors.is_empty());
        assert_eq!(input.proportions, Proportions::default());
        assert_eq!(input.viewbox, Viewbox::default());
    }
}
