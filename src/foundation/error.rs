/// Result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error taxonomy for scene scripts and engine adapters.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The script is malformed: unknown key, use-after-destroy, incompatible target.
    #[error("script error: {0}")]
    Script(String),

    /// The rendering engine failed to execute a primitive.
    #[error("engine error: {0}")]
    Engine(String),

    /// A value is out of its accepted range.
    #[error("validation error: {0}")]
    Validation(String),

    /// Encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Script`].
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// Build a [`ReelError::Engine`].
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors caused by a malformed script rather than the engine.
    pub fn is_script(&self) -> bool {
        matches!(self, Self::Script(_))
    }
}
