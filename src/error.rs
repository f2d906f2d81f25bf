use thiserror::Error;

/// Precondition violations detected while building a simulation.
///
/// The algorithms themselves are total; only configuration can be rejected.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("{field} must be a non-empty finite rectangle")]
    InvalidBounds { field: &'static str },

    #[error("path needs at least 2 points, got {len}")]
    PathTooShort { len: usize },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Name of the offending option, when the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::NonPositive { field, .. } => Some(*field),
            ConfigError::NonFinite { field } => Some(*field),
            ConfigError::InvalidBounds { field } => Some(*field),
            ConfigError::PathTooShort { .. } => Some("initial_path"),
            ConfigError::Negative { field, .. } => Some(*field),
            ConfigError::Json(_) => None,
        }
    }
}

/// Rejects NaN/inf and values `<= 0`.
pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

pub(crate) fn require_finite(field: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}
