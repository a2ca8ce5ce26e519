//! JSON file persistence for user profiles.
//!
//! The explicit persistence boundary: providers that want durable profiles
//! go through a `ProfileStore` rather than writing ambient state. One store
//! maps one path to one profile.

use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::traits::User;

/// Load/save boundary for a single user profile.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored profile, or `None` if the file does not exist yet.
    pub fn load(&self) -> Result<Option<User>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| AuthError::Storage(format!("{}: {e}", self.path.display())))?;
        let user: User = serde_json::from_str(&content)
            .map_err(|e| AuthError::Storage(format!("{}: {e}", self.path.display())))?;
        Ok(Some(user))
    }

    /// Persist the profile, creating parent directories as needed.
    pub fn save(&self, user: &User) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AuthError::Storage(format!("{}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(user)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json)
            .map_err(|e| AuthError::Storage(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), user = %user.name, "profile saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("nested/profile.json"));

        let mut user = User::new("Ada");
        user.assessment_score = Some(85);
        store.save(&user).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, user);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = ProfileStore::new(path);
        assert!(matches!(store.load(), Err(AuthError::Storage(_))));
    }
}
