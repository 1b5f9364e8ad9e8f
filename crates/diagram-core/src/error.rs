// File: crates/diagram-core/src/error.rs
// Summary: Error taxonomy for config normalization and chart rendering.

/// Convenience result type used across the crate.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// A single rejected field in a raw chart configuration.
///
/// Every variant is raised before anything is drawn; the chart is never
/// partially built.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("the target element is not provided")]
    MissingTarget,

    #[error("target `{0}` is not a valid `#id` reference")]
    InvalidTarget(String),

    #[error("could not find the element `{0}` in the document")]
    UnresolvedTarget(String),

    #[error("data was not provided")]
    MissingData,

    #[error("data must contain at least one point")]
    EmptyData,

    #[error("data[{index}]: {field} was not provided")]
    MissingField { index: usize, field: &'static str },

    #[error("{field} must be {expected}")]
    WrongType { field: String, expected: &'static str },

    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("data[{index}]: label is longer than {max} characters ({len})")]
    LabelTooLong { index: usize, len: usize, max: usize },

    #[error("data[{index}]: `{color}` is not a valid color")]
    InvalidColor { index: usize, color: String },
}

impl ConfigError {
    pub(crate) fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongType { field: field.into(), expected }
    }

    pub(crate) fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutOfRange { field: field.into(), reason: reason.into() }
    }
}

/// Top-level error returned by chart construction and rendering.
#[derive(thiserror::Error, Debug)]
pub enum DiagramError {
    /// Raw configuration was rejected by the normalizer.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The shared chart base was asked to render itself.
    #[error("the method `{0}` must be implemented by a concrete chart")]
    NotImplemented(&'static str),

    /// The configured target vanished from the document between normalization and render.
    #[error("surface `{0}` is no longer attached to the document")]
    SurfaceDetached(String),

    /// Wrapped lower-level error (IO, serialization).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
