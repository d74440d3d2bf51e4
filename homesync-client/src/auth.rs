use async_trait::async_trait;

use crate::errors::AuthError;

/// Account backend the login and dashboard screens talk to.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in and returns the user id.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError>;

    /// Creates an account and returns its user id. Does not sign in.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError>;

    async fn sign_out(&self);

    fn current_user_id(&self) -> Option<String>;
}
