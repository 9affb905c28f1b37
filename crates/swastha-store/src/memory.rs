//! In-memory implementation of `SessionStore`.
//!
//! `InMemorySessionStore` keeps the record in an `Option` behind an
//! `Arc<Mutex<_>>`, so clones share one slot. Nothing survives the
//! process, which makes it the store for tests and embedders that want none.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use swastha_contracts::{
    error::{SwasthaError, SwasthaResult},
    profile::UserProfile,
};
use swastha_core::traits::SessionStore;

/// A session store that forgets everything when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    slot: Arc<Mutex<Option<UserProfile>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that starts out holding `profile`.
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(profile))),
        }
    }

    fn lock(&self) -> SwasthaResult<MutexGuard<'_, Option<UserProfile>>> {
        self.slot.lock().map_err(|e| SwasthaError::StorageError {
            reason: format!("session slot lock poisoned: {}", e),
        })
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> SwasthaResult<Option<UserProfile>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, profile: &UserProfile) -> SwasthaResult<()> {
        *self.lock()? = Some(profile.clone());
        debug!(user_id = %profile.id, "session record saved in memory");
        Ok(())
    }

    fn clear(&self) -> SwasthaResult<()> {
        *self.lock()? = None;
        Ok(())
    }
}
