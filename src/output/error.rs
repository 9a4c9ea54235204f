//! Output Error Types

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The target (or its parent directory) could not be opened or created
    #[error("Cannot open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing or flushing an open file failed
    #[error("Cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name} stream is closed")]
    Closed { name: String },

    #[error("Offset and length exceed the buffer")]
    InvalidRange,

    #[error("Output synchronisation error: {message}")]
    Synchronisation { message: String },
}

pub type OutputResult<T> = Result<T, OutputError>;

impl OutputError {
    pub(crate) fn synchronisation(message: String) -> Self {
        Self::Synchronisation { message }
    }
}

impl From<OutputError> for io::Error {
    fn from(error: OutputError) -> Self {
        let kind = match &error {
            OutputError::Open { source, .. } | OutputError::Write { source, .. } => source.kind(),
            OutputError::InvalidRange => io::ErrorKind::InvalidInput,
            OutputError::Closed { .. } | OutputError::Synchronisation { .. } => {
                io::ErrorKind::Other
            }
        };
        io::Error::new(kind, error)
    }
}

impl crate::core::error_handling::ContextualError for OutputError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, OutputError::Open { .. } | OutputError::Closed { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            OutputError::Open { .. } => Some("Check that the output path is writable"),
            _ => None,
        }
    }
}
