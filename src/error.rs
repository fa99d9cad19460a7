/// Input rejected before any geometry is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("category list is empty")]
    EmptyCategories,
    #[error("category `{label}` is listed more than once")]
    DuplicateCategory { label: String },
    #[error("unknown category label `{label}` in trajectory {trajectory} at stage {stage}")]
    UnknownCategory {
        label: String,
        trajectory: usize,
        stage: usize,
    },
    #[error("trajectory {trajectory} has no stages")]
    EmptyTrajectory { trajectory: usize },
    #[error("invalid viewbox {width}x{height}: dimensions must be positive and finite")]
    InvalidViewbox { width: f32, height: f32 },
    #[error("invalid {name} proportion {value}: expected a value in (0, 1]")]
    InvalidProportion { name: &'static str, value: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
