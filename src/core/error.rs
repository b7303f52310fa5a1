use thiserror::Error;

/// Failure to load a [`crate::config::PageConfig`]. Callers fall back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config: malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config: invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// One step of the share chain failing. Every variant falls through to the next step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("share: capability unavailable")]
    Unavailable,
    #[error("share: declined by the user or the platform")]
    Declined,
    #[error("share: {0}")]
    Failed(String),
}
