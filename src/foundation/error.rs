/// Convenience result type used across respin.
pub type RespinResult<T> = Result<T, RespinError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant aborts the current request; the archive processor is the only
/// caller that may downgrade a per-entry failure (see `OnEntryError`).
#[derive(thiserror::Error, Debug)]
pub enum RespinError {
    /// Source bytes are not a valid image/video of a supported format.
    #[error("decode error: {0}")]
    Decode(String),

    /// Request or configuration outside supported bounds.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Writing the encoded output (codec, container, temp storage) failed.
    #[error("encode/export error: {0}")]
    EncodeExport(String),

    /// The build or environment lacks a required capability (e.g. ffmpeg).
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Stable discriminator for [`RespinError`], for callers that map errors to user text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`RespinError::Decode`].
    Decode,
    /// See [`RespinError::Configuration`].
    Configuration,
    /// See [`RespinError::EncodeExport`].
    EncodeExport,
    /// See [`RespinError::UnsupportedFeature`].
    UnsupportedFeature,
    /// See [`RespinError::Other`].
    Other,
}

impl RespinError {
    /// Build a [`RespinError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`RespinError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`RespinError::EncodeExport`] value.
    pub fn encode_export(msg: impl Into<String>) -> Self {
        Self::EncodeExport(msg.into())
    }

    /// Build a [`RespinError::UnsupportedFeature`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFeature(msg.into())
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode(_) => ErrorKind::Decode,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::EncodeExport(_) => ErrorKind::EncodeExport,
            Self::UnsupportedFeature(_) => ErrorKind::UnsupportedFeature,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
