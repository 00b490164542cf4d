/// Convenience result type used across fbpaint.
pub type FbPaintResult<T> = Result<T, FbPaintError>;

/// Top-level error type for fbpaint.
///
/// The painter and surfaces never return errors; this type covers the
/// fallible edges around them (device acquisition, image loading, encoding,
/// configuration).
#[derive(thiserror::Error, Debug)]
pub enum FbPaintError {
    /// Invalid user-supplied input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame buffer device could not be used.
    #[error("device error: {0}")]
    Device(String),

    /// Image data is malformed or inconsistent.
    #[error("image error: {0}")]
    Image(String),

    /// Table-image source generation failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Driver configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FbPaintError {
    /// Build a [`FbPaintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FbPaintError::Device`] value.
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Build a [`FbPaintError::Image`] value.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    /// Build a [`FbPaintError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`FbPaintError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
