use thiserror::Error;

/// Boundary failures. Everything inside a running match degrades to clamped
/// defaults instead of erroring, so these only surface before `Running`.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid {name} setting: {value} (expected a finite value in 0..=10)")]
    InvalidSetting { name: &'static str, value: f32 },

    #[error("Invalid roster: {0}")]
    InvalidRoster(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Whether the caller can fix the input and retry with the same session.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimError::InvalidSetting { .. } => true,
            SimError::InvalidRoster(_) => true,
            SimError::InvalidConfig(_) => true,
            SimError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
