//! # Error Types

use std::path::PathBuf;

/// Errors from wordtally operations.
#[derive(Debug, thiserror::Error)]
pub enum WordtallyError {
    /// A construction-time parameter is malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Lookup of an absent text or index, with no unknown-token fallback.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A trained model or vocabulary file does not exist.
    #[error("artifact not found: {}", .0.display())]
    ArtifactMissing(PathBuf),

    /// A trained model or vocabulary file is in an unrecognized format.
    #[error("malformed artifact {}: {reason}", path.display())]
    ArtifactMalformed {
        /// The offending file.
        path: PathBuf,

        /// What was wrong with it.
        reason: String,
    },

    /// A configured output location cannot be written to.
    #[error("invalid output path: {}", .0.display())]
    InvalidOutputPath(PathBuf),

    /// No vectorizer is active.
    #[error("no trained vectorizer")]
    NotTrained,

    /// The count vectorizer has not been fit.
    #[error("count vectorizer is not fitted")]
    NotFitted,

    /// Fitting produced no terms.
    #[error("empty vocabulary; the documents may only contain stop words")]
    EmptyVocabulary,

    /// A vocabulary mapping is not a dense bijection.
    #[error("{0}")]
    VocabConflict(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Binary blob encode/decode error.
    #[error(transparent)]
    Blob(#[from] bincode::Error),

    /// Error from an external component.
    #[error("{0}")]
    External(String),
}

impl WordtallyError {
    /// Build an [`WordtallyError::ArtifactMalformed`].
    pub fn malformed<P: Into<PathBuf>, S: ToString>(
        path: P,
        reason: S,
    ) -> Self {
        WordtallyError::ArtifactMalformed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for wordtally operations.
pub type WTResult<T> = core::result::Result<T, WordtallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_errors() {
        assert_eq!(
            WordtallyError::malformed("/tmp/v.json", "not an object").to_string(),
            "malformed artifact /tmp/v.json: not an object"
        );
    }
}
