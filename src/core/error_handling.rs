//! Generic error handling utilities
//!
//! Provides unified error reporting across the descriptor, output, host and
//! configuration error types while keeping their domain-specific messages.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some(message)` with a message the user can act on; otherwise it returns
/// `None` and the caller reports the surrounding operation instead.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message that should be shown as-is
    ///
    /// User-actionable: malformed manifests, unknown descriptor ids,
    /// duplicate extension ids.
    /// System: file I/O failures, poisoned locks, provider failures.
    fn is_user_actionable(&self) -> bool;

    /// The message to show when `is_user_actionable()` is true
    fn user_message(&self) -> Option<&str>;
}

/// Log errors with appropriate detail level based on error specificity
///
/// User-actionable errors are logged with their own message; system errors
/// are logged with `operation_context` and the detail goes to debug level.
///
/// # Examples
/// ```rust,no_run
/// # use orgfolder::core::error_handling::log_error_with_context;
/// # use orgfolder::descriptor::api::DescriptorError;
/// let err = DescriptorError::DescriptorNotFound { id: "github".to_string() };
/// log_error_with_context(&err, "Creating organization folder");
/// // Logs: "FATAL: No item descriptor is registered with the requested id"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct ManifestTypo {
        message: String,
    }

    impl fmt::Display for ManifestTypo {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl std::error::Error for ManifestTypo {}

    impl ContextualError for ManifestTypo {
        fn is_user_actionable(&self) -> bool {
            true
        }

        fn user_message(&self) -> Option<&str> {
            Some(&self.message)
        }
    }

    #[derive(Debug)]
    struct DiskFull;

    impl fmt::Display for DiskFull {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "No space left on device")
        }
    }

    impl std::error::Error for DiskFull {}

    impl ContextualError for DiskFull {
        fn is_user_actionable(&self) -> bool {
            false
        }

        fn user_message(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_user_actionable_error_exposes_message() {
        let error = ManifestTypo {
            message: "provider id must not be empty".to_string(),
        };

        assert!(error.is_user_actionable());
        assert_eq!(error.user_message(), Some("provider id must not be empty"));
        log_error_with_context(&error, "Loading manifest");
    }

    #[test]
    fn test_system_error_uses_operation_context() {
        let error = DiskFull;

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        log_error_with_context(&error, "Recording listing");
    }
}
