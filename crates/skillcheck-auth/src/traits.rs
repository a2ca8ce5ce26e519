//! The auth provider trait and user profile type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// A signed-in (or stored) user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Best assessment score recorded for this user, if any.
    #[serde(default)]
    pub assessment_score: Option<u32>,
    #[serde(default)]
    pub completed_onboarding: bool,
}

impl User {
    /// Create a fresh profile with no recorded score.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            assessment_score: None,
            completed_onboarding: false,
        }
    }
}

/// Capability surface for authentication.
///
/// Implementations own their session state; callers pass the provider
/// around explicitly instead of consulting globals.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Human-readable provider name (e.g. "mock").
    fn name(&self) -> &str;

    /// Whether a user is currently signed in.
    fn is_authenticated(&self) -> bool;

    /// The signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Sign in with a username/password pair.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Sign out the current user. Signing out while signed out is a no-op.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Record an assessment score on the signed-in user's profile.
    ///
    /// Keeps the best score: a lower score never overwrites a higher one.
    async fn record_score(&self, score: u32) -> Result<(), AuthError>;
}
