use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use argon2::password_hash::{SaltString, rand_core};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash};
use async_trait::async_trait;
use homesync_client::auth::AuthProvider;
use homesync_client::errors::AuthError;
use uuid::Uuid;

struct Account {
    id: Uuid,
    password: String,
}

/// Email/password accounts kept in memory, passwords stored as argon2
/// hashes.
pub struct MemoryAuthProvider {
    hasher: Argon2<'static>,
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<Uuid>>,
}

impl MemoryAuthProvider {
    pub fn new() -> Self {
        Self {
            hasher: Argon2::default(),
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
        }
    }

    fn hash(&self, password: &str) -> Result<String, password_hash::Error> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self.hasher.hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    fn verify(&self, account: &Account, password: &str) -> Result<bool, password_hash::Error> {
        let parsed_hash = PasswordHash::new(&account.password)?;

        Ok(self.hasher.verify_password(password.as_bytes(), &parsed_hash).is_ok())
    }

    fn normalize(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl Default for MemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let id = {
            let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
            let account = accounts.get(&Self::normalize(email)).ok_or(AuthError::UserNotFound)?;

            let matches = self
                .verify(account, password)
                .map_err(|e| AuthError::Provider(e.to_string()))?;
            if !matches {
                return Err(AuthError::InvalidCredentials);
            }

            account.id
        };

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(id);
        tracing::debug!("signed in {}", id);

        Ok(id.to_string())
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email = Self::normalize(email);
        let password = self.hash(password).map_err(|e| AuthError::Provider(e.to_string()))?;

        let mut accounts = self.accounts.write().unwrap_or_else(PoisonError::into_inner);
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailExists);
        }

        let id = Uuid::new_v4();
        accounts.insert(email, Account { id, password });
        tracing::debug!("registered {}", id);

        Ok(id.to_string())
    }

    async fn sign_out(&self) {
        self.current.write().unwrap_or_else(PoisonError::into_inner).take();
    }

    fn current_user_id(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|id| id.to_string())
    }
}
