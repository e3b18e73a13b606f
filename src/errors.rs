use std::path::PathBuf;

use crate::SauceDataType;

/// Errors surfaced by the viewer.
///
/// Malformed SAUCE data and malformed escape sequences are not errors: they are
/// recovered where they occur and only logged. What remains here is input
/// acquisition, terminal I/O and the validation done when building records.
#[derive(Debug, thiserror::Error)]
pub enum AnsiViewError {
    #[error("Cannot read '{path}': {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is empty")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported data type for operation: {0:?}")]
    UnsupportedDataType(SauceDataType),

    #[error("Comment limit exceeded (255)")]
    CommentLimitExceeded,

    #[error("Comment too long: {0} bytes only up to 64 bytes are allowed.")]
    CommentTooLong(usize),

    #[error("Title too long: {0} bytes only up to 35 bytes are allowed.")]
    TitleTooLong(usize),

    #[error("Author too long: {0} bytes only up to 20 bytes are allowed.")]
    AuthorTooLong(usize),

    #[error("Group too long: {0} bytes only up to 20 bytes are allowed.")]
    GroupTooLong(usize),

    #[error("Font name too long: {0} bytes only up to 22 bytes are allowed.")]
    FontNameTooLong(usize),
}

impl AnsiViewError {
    /// Create an `InputUnavailable` error for the given path.
    pub fn input_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnsiViewError::InputUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means there was nothing to render at all.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnsiViewError::InputUnavailable { .. } | AnsiViewError::EmptyInput
        )
    }
}
