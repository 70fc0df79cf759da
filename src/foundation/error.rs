/// Convenience result type used across selact.
pub type SelResult<T> = Result<T, SelError>;

/// Top-level error taxonomy used by the document, selection and render APIs.
#[derive(thiserror::Error, Debug)]
pub enum SelError {
    /// Selector text that could not be parsed.
    #[error("selector error: {0}")]
    Selector(String),

    /// Invalid document operation (bad tag or attribute name, foreign nodes).
    #[error("dom error: {0}")]
    Dom(String),

    /// Error raised from inside a component body.
    #[error("component error: {0}")]
    Component(String),

    /// Errors when serializing or deserializing markup trees.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SelError {
    /// Build a [`SelError::Selector`] value.
    pub fn selector(msg: impl Into<String>) -> Self {
        Self::Selector(msg.into())
    }

    /// Build a [`SelError::Dom`] value.
    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }

    /// Build a [`SelError::Component`] value.
    pub fn component(msg: impl Into<String>) -> Self {
        Self::Component(msg.into())
    }

    /// Build a [`SelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
