//! File-backed user store.
//!
//! A JSON map of `username -> PHC hash string`, kept at
//! `~/.curator/users.json` by default. Written with 0600 permissions and a
//! 0700 parent directory on Unix.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};

const USERS_FILE_NAME: &str = "users.json";

/// Credential store keyed by reviewer username.
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Open a store at an explicit path. The file need not exist yet.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Open the store at the default location under the home directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserStoreError` if the home directory cannot be
    /// resolved.
    pub fn default_location() -> Result<Self, AuthError> {
        let home = dirs::home_dir().ok_or_else(|| {
            AuthError::UserStoreError("home directory not found — cannot locate users file".into())
        })?;
        Ok(Self::new(home.join(".curator").join(USERS_FILE_NAME)))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify a username/password pair against the stored hash.
    ///
    /// Unknown usernames verify as `false`, not as an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the users file cannot be read or the stored
    /// hash is malformed.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let users = self.load()?;
        match users.get(username) {
            Some(hash) => verify_password(password, hash),
            None => Ok(false),
        }
    }

    /// Insert or replace a user's password hash.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if hashing fails or the users file cannot be
    /// written.
    pub fn upsert(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let mut users = self.load()?;
        let hash = hash_password(password)?;
        users.insert(username.to_string(), hash);
        self.save(&users)
    }

    /// Remove a user. Returns whether the user existed.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the users file cannot be read or written.
    pub fn remove(&self, username: &str) -> Result<bool, AuthError> {
        let mut users = self.load()?;
        let existed = users.remove(username).is_some();
        if existed {
            self.save(&users)?;
        }
        Ok(existed)
    }

    /// Usernames currently present, sorted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the users file cannot be read.
    pub fn list(&self) -> Result<Vec<String>, AuthError> {
        Ok(self.load()?.into_keys().collect())
    }

    fn load(&self) -> Result<BTreeMap<String, String>, AuthError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            AuthError::UserStoreError(format!("read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            AuthError::UserStoreError(format!("parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, users: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::UserStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let raw = serde_json::to_string_pretty(users).map_err(|e| {
            AuthError::UserStoreError(format!("serialize users file: {e}"))
        })?;
        fs::write(&self.path, raw).map_err(|e| {
            AuthError::UserStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::UserStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, UserStore) {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = UserStore::new(tmp.path().join("users.json"));
        (tmp, store)
    }

    #[test]
    fn verify_on_missing_file_is_false() {
        let (_tmp, store) = temp_store();
        assert!(!store.verify("ada", "secret").unwrap());
    }

    #[test]
    fn upsert_verify_cycle() {
        let (_tmp, store) = temp_store();
        store.upsert("ada", "secret").unwrap();

        assert!(store.verify("ada", "secret").unwrap());
        assert!(!store.verify("ada", "wrong").unwrap());
        assert!(!store.verify("grace", "secret").unwrap());
    }

    #[test]
    fn upsert_replaces_existing_password() {
        let (_tmp, store) = temp_store();
        store.upsert("ada", "first").unwrap();
        store.upsert("ada", "second").unwrap();

        assert!(!store.verify("ada", "first").unwrap());
        assert!(store.verify("ada", "second").unwrap());
    }

    #[test]
    fn remove_and_list() {
        let (_tmp, store) = temp_store();
        store.upsert("ada", "a").unwrap();
        store.upsert("grace", "g").unwrap();

        assert_eq!(store.list().unwrap(), vec!["ada", "grace"]);
        assert!(store.remove("ada").unwrap());
        assert!(!store.remove("ada").unwrap());
        assert_eq!(store.list().unwrap(), vec!["grace"]);
    }

    #[cfg(unix)]
    #[test]
    fn users_file_is_0600() {
        use std::os::unix::fs::PermissionsExt;

        let (_tmp, store) = temp_store();
        store.upsert("ada", "secret").unwrap();

        let mode = std::fs::metadata(store.path())
            .expect("metadata")
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode, 0o600);
    }
}
