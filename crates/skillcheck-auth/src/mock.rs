//! Mock auth provider for development and tests.
//!
//! Validates against a fixed credential table and keeps session state in
//! memory; optionally persists the profile through a [`ProfileStore`] on
//! every mutation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::store::ProfileStore;
use crate::traits::{AuthProvider, User};

/// An in-memory auth provider with a fixed credential table.
pub struct MockAuth {
    /// username → password.
    credentials: HashMap<String, String>,
    current: Mutex<Option<User>>,
    store: Option<ProfileStore>,
    login_count: AtomicU32,
}

impl MockAuth {
    /// Create a provider accepting the given username/password pairs.
    pub fn new(credentials: HashMap<String, String>) -> Self {
        Self {
            credentials,
            current: Mutex::new(None),
            store: None,
            login_count: AtomicU32::new(0),
        }
    }

    /// Create a provider accepting a single credential pair.
    pub fn with_user(username: &str, password: &str) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert(username.to_string(), password.to_string());
        Self::new(credentials)
    }

    /// Persist the signed-in profile through `store` on every mutation.
    pub fn with_store(mut self, store: ProfileStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Number of successful logins performed.
    pub fn login_count(&self) -> u32 {
        self.login_count.load(Ordering::Relaxed)
    }

    fn persist(&self, user: &User) -> Result<(), AuthError> {
        match &self.store {
            Some(store) => store.save(user),
            None => Ok(()),
        }
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    fn name(&self) -> &str {
        "mock"
    }

    fn is_authenticated(&self) -> bool {
        self.lock_current().is_some()
    }

    fn current_user(&self) -> Option<User> {
        self.lock_current().clone()
    }

    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let accepted = self
            .credentials
            .get(username)
            .is_some_and(|expected| expected == password);
        if !accepted {
            tracing::warn!(username, "login rejected");
            return Err(AuthError::InvalidCredentials {
                username: username.to_string(),
            });
        }

        // Resume the stored profile if one exists so recorded scores survive
        // across sessions.
        let user = match &self.store {
            Some(store) => store.load()?.unwrap_or_else(|| User::new(username)),
            None => User::new(username),
        };
        self.persist(&user)?;
        *self.lock_current() = Some(user.clone());
        self.login_count.fetch_add(1, Ordering::Relaxed);
        tracing::info!(username, "login succeeded");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        *self.lock_current() = None;
        Ok(())
    }

    async fn record_score(&self, score: u32) -> Result<(), AuthError> {
        let mut guard = self.lock_current();
        let user = guard.as_mut().ok_or(AuthError::NotAuthenticated)?;
        if user.assessment_score.map_or(true, |best| score > best) {
            user.assessment_score = Some(score);
        }
        let snapshot = user.clone();
        drop(guard);
        self.persist(&snapshot)
    }
}
