//! JSON-file implementation of `SessionStore`.
//!
//! The record lives at `<dir>/<key>.json`. Saves write a `.tmp` sibling and
//! rename it over the target, so a reader never sees a half-written file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use swastha_contracts::{
    error::{SwasthaError, SwasthaResult},
    profile::UserProfile,
};
use swastha_core::traits::SessionStore;

/// Storage key used when none is configured.
pub const DEFAULT_KEY: &str = "user";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the record under `key` inside `dir`. The directory is created
    /// on first save.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> SwasthaError {
        SwasthaError::StorageError {
            reason: format!("failed to {} '{}': {}", action, self.path.display(), e),
        }
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> SwasthaResult<Option<UserProfile>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no session record on disk");
                return Ok(None);
            }
            Err(e) => return Err(self.storage_error("read", e)),
        };

        let profile: UserProfile =
            serde_json::from_str(&raw).map_err(|e| self.storage_error("parse", e))?;
        debug!(path = %self.path.display(), user_id = %profile.id, "session record loaded");
        Ok(Some(profile))
    }

    fn save(&self, profile: &UserProfile) -> SwasthaResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create directory for", e))?;
        }

        let json =
            serde_json::to_string_pretty(profile).map_err(|e| self.storage_error("serialize", e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.storage_error("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.storage_error("replace", e))?;

        debug!(
            path = %self.path.display(),
            user_id = %profile.id,
            appointments = profile.appointments.len(),
            "session record saved"
        );
        Ok(())
    }

    fn clear(&self) -> SwasthaResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "session record removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error("remove", e)),
        }
    }
}
