#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Authentication service error: {0}")]
    Provider(String),
}
