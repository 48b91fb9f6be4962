use std::path::PathBuf;

/// Errors that can occur while converting a container into a mesh file.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Header magic or chunk tag mismatch, truncated framing, malformed JSON.
    #[error("invalid container: {0}")]
    Format(String),

    /// A required mesh, primitive, attribute, accessor or bufferView key is missing.
    #[error("unsupported scene layout: {0}")]
    Schema(String),

    /// A decoded byte range or index falls outside the data it addresses.
    #[error("failed to decode mesh data: {0}")]
    Decode(String),

    #[error("I/O error on '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),
}

impl ConvertError {
    /// Attach a path to a bare stream error.
    pub(crate) fn at(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Stream(e) => Self::Io(path.into(), e),
            other => other,
        }
    }
}
