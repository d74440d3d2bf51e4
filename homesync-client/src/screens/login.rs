use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::errors::{AppError, ValidationError};
use crate::screens::{Notice, Outcome, Route};

const MIN_PASSWORD_LENGTH: usize = 6;

pub struct LoginScreen {
    auth: Arc<dyn AuthProvider>,
}

impl LoginScreen {
    pub fn new(auth: &Arc<dyn AuthProvider>) -> Self {
        Self { auth: Arc::clone(auth) }
    }

    /// Validates and signs in, returning the user id.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<String, AppError> {
        validate_input(email, password)?;

        let uid = self.auth.sign_in(email.trim(), password).await?;
        tracing::info!("user {} signed in", uid);

        Ok(uid)
    }

    /// Validates and creates an account, returning the new user id.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<String, AppError> {
        validate_input(email, password)?;

        let uid = self.auth.sign_up(email.trim(), password).await?;
        tracing::info!("user {} registered", uid);

        Ok(uid)
    }

    pub async fn login(&self, email: &str, password: &str) -> Outcome {
        match self.sign_in(email, password).await {
            Ok(_) => Outcome::navigate(Route::Dashboard).with_notice(Notice::new("Login successful!")),
            Err(e) => Outcome::failed("Login failed", &e),
        }
    }

    /// Registration keeps the user on the login screen.
    pub async fn register(&self, email: &str, password: &str) -> Outcome {
        match self.sign_up(email, password).await {
            Ok(_) => Outcome::stay().with_notice(Notice::new("Registration successful!")),
            Err(e) => Outcome::failed("Registration failed", &e),
        }
    }
}

pub fn validate_input(email: &str, password: &str) -> Result<(), ValidationError> {
    let email = email.trim();

    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::EmptyCredentials);
    }

    if !is_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    Ok(())
}

fn is_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
