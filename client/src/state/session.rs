//! Session context: tokens plus user identity, mirrored into a key-value store.
//!
//! DESIGN
//! ======
//! Load/save are free functions over `KeyValueStore` so they can be tested
//! against a `MemoryStore` without an API client. `SessionContext` pairs the
//! in-memory `Session` with its store and is handed to `ApiClient` by `&mut`
//! on every request; there is no global session.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use super::storage::{KeyValueStore, StoreError};
use crate::net::types::{CartItem, Session, SessionUser};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const CART_ITEMS_KEY: &str = "cartItems";

/// Read the persisted session. A corrupt `currentUser` value loads as no user.
#[must_use]
pub fn load_session(store: &dyn KeyValueStore) -> Session {
    let user = store
        .get(CURRENT_USER_KEY)
        .and_then(|raw| serde_json::from_str::<Option<SessionUser>>(&raw).ok())
        .flatten();
    Session {
        access_token: store.get(AUTH_TOKEN_KEY).filter(|v| !v.is_empty()),
        refresh_token: store.get(REFRESH_TOKEN_KEY).filter(|v| !v.is_empty()),
        user,
    }
}

/// Persist `session`; absent fields remove their keys.
///
/// All-or-nothing: if any key fails, the keys already written are restored
/// to their previous values.
///
/// # Errors
///
/// Returns the first write error.
pub fn save_session(store: &mut dyn KeyValueStore, session: &Session) -> Result<(), StoreError> {
    let user = session
        .user
        .as_ref()
        .and_then(|user| serde_json::to_string(user).ok());
    let entries = [
        (AUTH_TOKEN_KEY, session.access_token.as_deref()),
        (REFRESH_TOKEN_KEY, session.refresh_token.as_deref()),
        (CURRENT_USER_KEY, user.as_deref()),
    ];
    let previous: Vec<Option<String>> = entries.iter().map(|(key, _)| store.get(key)).collect();

    for (written, (key, value)) in entries.iter().enumerate() {
        if let Err(e) = put_or_remove(store, key, *value) {
            for ((key, _), old) in entries.iter().zip(&previous).take(written) {
                if let Err(restore) = put_or_remove(store, key, old.as_deref()) {
                    tracing::warn!(key, error = %restore, "session key could not be restored");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

/// Remove every session key, including the cart cache.
///
/// # Errors
///
/// Returns an error if the store rejects a removal.
pub fn clear_session(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(AUTH_TOKEN_KEY)?;
    store.remove(REFRESH_TOKEN_KEY)?;
    store.remove(CURRENT_USER_KEY)?;
    store.remove(CART_ITEMS_KEY)
}

/// Last cart snapshot written by [`save_cart_cache`]. Display-only.
#[must_use]
pub fn load_cart_cache(store: &dyn KeyValueStore) -> Vec<CartItem> {
    store
        .get(CART_ITEMS_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// # Errors
///
/// Returns an error if the store rejects the write.
pub fn save_cart_cache(store: &mut dyn KeyValueStore, items: &[CartItem]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(items).unwrap_or_else(|_| "[]".to_owned());
    store.set(CART_ITEMS_KEY, &raw)
}

fn put_or_remove(store: &mut dyn KeyValueStore, key: &str, value: Option<&str>) -> Result<(), StoreError> {
    match value {
        Some(value) => store.set(key, value),
        None => store.remove(key),
    }
}

/// In-memory session bound to the store it is persisted in.
pub struct SessionContext {
    session: Session,
    store: Box<dyn KeyValueStore>,
}

impl SessionContext {
    /// Wrap `store`, loading whatever session it already holds.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        let store: Box<dyn KeyValueStore> = Box::new(store);
        let session = load_session(&*store);
        Self { session, store }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.session.access_token.as_deref()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.session.refresh_token.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.session.user.as_ref()
    }

    /// Logged in means both an access token and a known user.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.access_token.is_some() && self.session.user.is_some()
    }

    /// Adopt a freshly issued session (login/register).
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write; memory is left as it was.
    pub fn establish(&mut self, session: Session) -> Result<(), StoreError> {
        save_session(&mut *self.store, &session)?;
        self.session = session;
        Ok(())
    }

    /// Swap both tokens together, keeping the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write; memory is left as it was.
    pub fn replace_tokens(&mut self, access_token: String, refresh_token: String) -> Result<(), StoreError> {
        let next = Session {
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            user: self.session.user.clone(),
        };
        self.establish(next)
    }

    /// Drop the session. Memory is always cleared, even if the store fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a removal.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.session = Session::default();
        clear_session(&mut *self.store)
    }

    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        &mut *self.store
    }
}
