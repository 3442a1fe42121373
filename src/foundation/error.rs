/// Result alias used by fallible docmark operations.
pub type DocmarkResult<T> = Result<T, DocmarkError>;

/// Error type for the layers around the (infallible) watermark core.
#[derive(thiserror::Error, Debug)]
pub enum DocmarkError {
    /// Invalid caller input (dimensions, names, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A photo could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The raster backend could not complete a draw.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding or writing an output file failed.
    #[error("export error: {0}")]
    Export(String),

    /// A configuration file or environment value was rejected.
    #[error("config error: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocmarkError {
    /// Build a [`DocmarkError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DocmarkError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`DocmarkError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DocmarkError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`DocmarkError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`DocmarkError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
