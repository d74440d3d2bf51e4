use super::{AuthError, StoreError, ValidationError};

/// Every failure a screen can surface. None of them is fatal: the screen
/// stays usable and the user retries by hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl AppError {
    /// Text suitable for a one-shot message on screen.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(e) => e.to_string(),
            AppError::Store(e) => e.to_string(),
            AppError::Validation(e) => e.to_string(),
        }
    }
}
