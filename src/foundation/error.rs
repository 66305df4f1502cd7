use std::path::PathBuf;

/// Convenience result type used across the crate.
pub type TrackResult<T> = Result<T, TrackError>;

/// Error taxonomy for track configuration, persistence and ingestion.
///
/// Geometric queries never produce these; they return [`crate::BBox::UNSET`] instead.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    /// Malformed or structurally wrong metadata JSON.
    #[error("invalid json: {0}")]
    InvalidJson(String),

    /// Degenerate configuration, e.g. a zero frame rate or non-positive time scale.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Missing or unreadable tracker data.
    #[error("io error on '{}': {source}", .path.display())]
    Io {
        /// File the operation was reading.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A tracker record could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackError {
    /// Build a [`TrackError::InvalidJson`] value.
    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::InvalidJson(msg.into())
    }

    /// Build a [`TrackError::InvalidState`] value.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Build a [`TrackError::Io`] value.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`TrackError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`TrackError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
