/// Convenience result type used across Lucy.
pub type LucyResult<T> = Result<T, LucyError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum LucyError {
    /// Input could not be decoded or parsed into a usable contour.
    #[error("source error: {0}")]
    Source(String),

    /// Contour is unusable for a spectral analysis (too few samples or non-finite points).
    #[error("analysis error: {0}")]
    Analysis(String),

    /// Configuration values are out of range or could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while rasterizing frame geometry.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LucyError {
    /// Build a [`LucyError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`LucyError::Analysis`] value.
    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }

    /// Build a [`LucyError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`LucyError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether a caller may recover by trying an alternate contour source.
    pub fn is_source(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
