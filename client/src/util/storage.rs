//! `localStorage` backend for the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store keeps its authoritative copy in memory and mirrors it
//! here so a reload restores the signed-in state. Outside the browser the
//! backend reports itself unavailable and the store degrades to memory only.

use session::{SessionBackend, StoreError};

/// Browser `localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            storage()
                .ok_or(StoreError::Unavailable)?
                .set_item(key, value)
                .map_err(|err| StoreError::Write { key: key.to_owned(), reason: format!("{err:?}") })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StoreError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = storage() else {
                return Ok(());
            };
            storage
                .remove_item(key)
                .map_err(|err| StoreError::Write { key: key.to_owned(), reason: format!("{err:?}") })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(())
        }
    }
}
