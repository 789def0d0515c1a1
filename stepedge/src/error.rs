use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("path data parse error at byte {pos}: {reason}")]
    PathParse { pos: usize, reason: &'static str },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

impl EdgeError {
    /// Stable machine-readable code, used by the wasm result envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            EdgeError::InvalidConfig { .. } => "invalid_config",
            EdgeError::NonFinite(_) => "non_finite",
            EdgeError::PathParse { .. } => "parse_error",
            EdgeError::Json(_) => "invalid_json",
        }
    }
}

pub type Result<T> = std::result::Result<T, EdgeError>;
