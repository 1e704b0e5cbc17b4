/// Crate-wide result alias.
pub type BoothResult<T> = Result<T, BoothError>;

/// Errors surfaced by the collage engine.
///
/// Only [`BoothError::Acquisition`] and [`BoothError::InsufficientInput`] are meant to be shown to
/// the user as blocking notifications. [`BoothError::Decode`] is swallowed (with a warning) by the
/// preview and export paths so that a single bad image never aborts a render.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Camera unavailable or denied, or an input file could not be read.
    #[error("acquisition error: {0}")]
    Acquisition(String),

    /// Fewer than four photos were provided.
    #[error("insufficient input: {0}")]
    InsufficientInput(String),

    /// A source or background image failed to decode.
    #[error("decode error: {0}")]
    Decode(String),

    /// Caller-supplied value outside the accepted domain.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster backend failure.
    #[error("render error: {0}")]
    Render(String),

    /// Context-wrapped failure from an external crate.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build an [`BoothError::Acquisition`].
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    /// Build an [`BoothError::InsufficientInput`].
    pub fn insufficient_input(msg: impl Into<String>) -> Self {
        Self::InsufficientInput(msg.into())
    }

    /// Build a [`BoothError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`BoothError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// `true` for errors the user must acknowledge before the flow can continue.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::Acquisition(_) | Self::InsufficientInput(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
