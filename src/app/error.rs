//! Application level errors

use crate::app::config::ConfigError;
use crate::core::error_handling::ContextualError;
use crate::descriptor::api::DescriptorError;
use crate::host::api::HostError;
use crate::output::api::OutputError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Cannot render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl ContextualError for AppError {
    fn is_user_actionable(&self) -> bool {
        match self {
            AppError::Config(e) => e.is_user_actionable(),
            AppError::Host(e) => e.is_user_actionable(),
            AppError::Descriptor(e) => e.is_user_actionable(),
            AppError::Output(e) => e.is_user_actionable(),
            AppError::Json(_) => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Host(e) => e.user_message(),
            AppError::Descriptor(e) => e.user_message(),
            AppError::Output(e) => e.user_message(),
            AppError::Json(_) => None,
        }
    }
}
