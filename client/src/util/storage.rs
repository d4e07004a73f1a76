//! Browser localStorage persistence for the signed-in display name.
//!
//! SYSTEM CONTEXT
//! ==============
//! The comment feed keeps one value across visits: the name chosen in the
//! sign-in bar, stored as JSON under [`DISPLAY_NAME_KEY`]. Outside the
//! browser every load misses and every save is a no-op, so callers need no
//! gating.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::state::auth::{AuthState, normalize_display_name};

/// Storage key holding the signed-in display name.
pub const DISPLAY_NAME_KEY: &str = "comment_feed_display_name";

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read and decode the JSON stored under `key`.
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("storage: ignoring unreadable {key:?}: {e}");
                None
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
        None
    }
}

/// Encode `value` as JSON under `key`. Failures are logged and dropped.
pub fn save_json<T: Serialize>(key: &str, value: &T) {
    #[cfg(feature = "hydrate")]
    {
        let Some(storage) = local_storage() else {
            return;
        };
        let written = serde_json::to_string(value)
            .map_err(|e| e.to_string())
            .and_then(|raw| storage.set_item(key, &raw).map_err(|_| "storage refused write".to_owned()));
        if let Err(e) = written {
            log::warn!("storage: could not save {key:?}: {e}");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, value);
    }
}

/// Rebuild sign-in state from a stored display name.
#[must_use]
pub fn auth_from_stored(stored: Option<String>) -> AuthState {
    AuthState { name: stored.as_deref().and_then(normalize_display_name) }
}

/// Sign-in state remembered by this browser.
#[must_use]
pub fn load_auth() -> AuthState {
    auth_from_stored(load_json::<Option<String>>(DISPLAY_NAME_KEY).flatten())
}

/// Remember `auth` for the next visit; signing out stores `null`.
pub fn save_auth(auth: &AuthState) {
    save_json(DISPLAY_NAME_KEY, &auth.name);
}
