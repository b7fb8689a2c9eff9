//! Session persistence over a string key-value store.
//!
//! The persisted layout is two entries: `isLoggedIn` holding `"true"` and
//! `currentUser` holding the JSON-encoded user. Both are absent when no one is
//! logged in.

use std::sync::Arc;

use crate::error::Result;

use super::model::{Session, User};

/// Key holding the literal `"true"` while a visitor is logged in.
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";
/// Key holding the JSON-encoded `{name, email}` of the logged in visitor.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// A string key-value store scoped to one browsing context.
///
/// Implementations use interior mutability so a single store can be shared
/// through `Arc` by the gate and every handler.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Stores several entries. Backends that can write them in one step
    /// override this; the default writes them in order.
    fn set_all(&self, pairs: &[(&str, &str)]) -> Result<()> {
        for (key, value) in pairs {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Owned access to the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Reads the persisted session.
    ///
    /// A login flag without a readable user record reads as anonymous.
    pub fn get(&self) -> Result<Session> {
        let logged_in = self.backend.get(IS_LOGGED_IN_KEY)?;
        if logged_in.as_deref() != Some("true") {
            return Ok(Session::Anonymous);
        }

        let Some(raw_user) = self.backend.get(CURRENT_USER_KEY)? else {
            tracing::warn!("[SessionStore] {IS_LOGGED_IN_KEY} set without {CURRENT_USER_KEY}; treating as anonymous");
            return Ok(Session::Anonymous);
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Ok(Session::Authenticated(user)),
            Err(e) => {
                tracing::warn!("[SessionStore] Unreadable {CURRENT_USER_KEY} entry: {e}");
                Ok(Session::Anonymous)
            }
        }
    }

    /// Persists `user` as the authenticated visitor.
    ///
    /// On failure the previous entries are put back, so the session reads as
    /// it did before the call.
    pub fn set(&self, user: &User) -> Result<()> {
        let encoded = serde_json::to_string(user)?;
        let previous_user = self.backend.get(CURRENT_USER_KEY)?;
        let previous_flag = self.backend.get(IS_LOGGED_IN_KEY)?;

        let result = self
            .backend
            .set_all(&[(CURRENT_USER_KEY, encoded.as_str()), (IS_LOGGED_IN_KEY, "true")]);
        if let Err(e) = result {
            tracing::warn!("[SessionStore] Failed to persist session, restoring previous: {e}");
            self.restore(CURRENT_USER_KEY, previous_user.as_deref());
            self.restore(IS_LOGGED_IN_KEY, previous_flag.as_deref());
            return Err(e);
        }
        Ok(())
    }

    fn restore(&self, key: &str, value: Option<&str>) {
        let restored = match value {
            Some(value) => self.backend.set(key, value),
            None => self.backend.remove(key),
        };
        if let Err(e) = restored {
            tracing::warn!("[SessionStore] Could not restore {key}: {e}");
        }
    }

    /// Removes both session entries.
    pub fn clear(&self) -> Result<()> {
        self.backend.remove(IS_LOGGED_IN_KEY)?;
        self.backend.remove(CURRENT_USER_KEY)
    }
}
