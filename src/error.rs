use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    /// The path can not be decoded under the layout's grammar. Callers enumerating a
    ///  repository treat this as non-artifact noise and skip the entry.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath {
        path: String,
        reason: String,
    },

    #[error("invalid coordinate: {field} {reason}")]
    InvalidCoordinate {
        field: &'static str,
        reason: String,
    },

    #[error("{layout} layout does not support {operation}")]
    Unsupported {
        layout: &'static str,
        operation: &'static str,
    },

    #[error("unknown repository layout {0:?} - expected 'default' or 'legacy'")]
    UnknownLayout(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ContentError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> ContentError {
        ContentError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_path(&self) -> bool {
        matches!(self, ContentError::InvalidPath { .. })
    }
}
