/// Convenience result type used across scrollscene.
pub type SceneResult<T> = Result<T, SceneError>;

/// Construction-time error taxonomy.
///
/// Runtime sampling never fails: missing targets, degenerate windows and redundant
/// idle-loop operations all degrade to "feature skipped". Only loading and validating a
/// [`SceneConfig`](crate::SceneConfig) reports errors.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Invalid user-provided scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Inconsistent breakpoint or viewport-class configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing scene documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
