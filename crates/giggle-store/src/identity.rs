//! In-memory identity provider for tests and offline use.
//!
//! Mimics the hosted provider's session behavior: account creation,
//! email/password sign-in with per-code errors, an optional Google
//! federation stand-in, and a current-user session slot.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use giggle_core::{AuthError, Identity, Result, User};

/// Minimum password length accepted at signup.
const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    password: String,
    user: User,
}

/// HashMap-backed identity provider.
#[derive(Default)]
pub struct MemoryIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    current: Mutex<Option<User>>,
    google_user: Mutex<Option<User>>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a signed-in session for the given user.
    pub fn signed_in(user: User) -> Self {
        let identity = Self::default();
        *identity.current.lock().unwrap() = Some(user);
        identity
    }

    /// Configure the user returned by the Google federation flow.
    pub fn with_google_user(self, user: User) -> Self {
        *self.google_user.lock().unwrap() = Some(user);
        self
    }
}

#[async_trait]
impl Identity for MemoryIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        if !email.contains('@') {
            return Err(AuthError::InvalidEmail.into());
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword.into());
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(AuthError::EmailAlreadyInUse.into());
        }

        let user = User {
            id: Uuid::now_v7().to_string(),
            email: email.to_string(),
            display_name: None,
        };
        accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: user.clone(),
            },
        );
        *self.current.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts.get(email).ok_or(AuthError::UserNotFound)?;
        if account.password != password {
            return Err(AuthError::WrongPassword.into());
        }

        let user = account.user.clone();
        *self.current.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_in_with_google(&self) -> Result<User> {
        let user = self
            .google_user
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AuthError::Other("Google sign-in is not configured".to_string()))?;

        *self.current.lock().unwrap() = Some(user.clone());
        Ok(user)
    }

    async fn sign_out(&self) -> Result<()> {
        *self.current.lock().unwrap() = None;
        Ok(())
    }

    fn current_user(&self) -> Option<User> {
        self.current.lock().unwrap().clone()
    }
}
