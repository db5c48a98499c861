//! Persisted sign-in state.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use registrar_models::User;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAuth {
    pub token: String,
    pub user: User,
}

/// Token and user kept in a JSON file between runs.
#[derive(Debug)]
pub struct AuthCache {
    path: PathBuf,
    current: Option<StoredAuth>,
}

impl AuthCache {
    /// `~/.registrar/auth.json`.
    pub fn default_path() -> Result<PathBuf, ClientError> {
        dirs::home_dir()
            .map(|home| home.join(".registrar").join("auth.json"))
            .ok_or_else(|| {
                ClientError::Cache(std::io::Error::new(
                    ErrorKind::NotFound,
                    "home directory not found",
                ))
            })
    }

    /// Reads the file at `path`. A missing file means signed out.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(raw) => Some(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, current })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Option<&StoredAuth> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|auth| auth.token.as_str())
    }

    pub fn store(&mut self, auth: StoredAuth) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&auth)?)?;
        self.current = Some(auth);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.current = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn auth() -> StoredAuth {
        StoredAuth {
            token: "token-123".to_string(),
            user: User {
                id: 1,
                email: "admin@university.edu".to_string(),
                name: "Admin User".to_string(),
                role: "admin".to_string(),
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_missing_file_is_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let cache = AuthCache::load(dir.path().join("auth.json")).unwrap();
        assert!(cache.get().is_none());
        assert!(cache.token().is_none());
    }

    #[test]
    fn test_store_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("auth.json");

        let mut cache = AuthCache::load(&path).unwrap();
        cache.store(auth()).unwrap();

        let reloaded = AuthCache::load(&path).unwrap();
        assert_eq!(reloaded.get(), Some(&auth()));
        assert_eq!(reloaded.token(), Some("token-123"));
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");

        let mut cache = AuthCache::load(&path).unwrap();
        cache.store(auth()).unwrap();
        cache.clear().unwrap();

        assert!(cache.get().is_none());
        assert!(!path.exists());
        // Clearing twice is fine.
        cache.clear().unwrap();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            AuthCache::load(&path),
            Err(ClientError::CacheFormat(_))
        ));
    }
}
