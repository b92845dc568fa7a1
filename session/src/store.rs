//! Process-wide session store backed by durable key-value storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store is created at startup and shared by the gateway, the route
//! guard and the auth flows. It is the only owner of the credential set.
//!
//! DESIGN
//! ======
//! The authoritative session lives in memory behind a single lock and is
//! replaced wholesale. The durable backend (`access`, `refresh`, `user`
//! keys) is written while that lock is held, so a reader sees either the old
//! session or the new one, never a mix.
//!
//! Every `clear` advances a generation counter. Flows capture the generation
//! before dispatching a request and save through [`SessionStore::save_if_current`],
//! which drops responses that arrive after a logout or a 401 purge.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::StoreError;
use crate::model::{Session, UserProfile};

pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";
pub const USER_KEY: &str = "user";

/// Durable string key-value storage the session is persisted into.
pub trait SessionBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Backend that keeps entries in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with raw entries, as if left by a previous run.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Mutex::new(entries) }
    }
}

impl SessionBackend for MemoryBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).remove(key);
        Ok(())
    }
}

/// Opaque marker of the store's clear-count at some point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

struct State {
    session: Session,
    generation: u64,
}

struct Inner {
    backend: Box<dyn SessionBackend>,
    state: RwLock<State>,
    listeners: RwLock<Vec<Listener>>,
}

/// Shared handle to the process-wide session. Cloning is cheap.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Open the store and hydrate it from whatever the backend holds.
    pub fn open(backend: impl SessionBackend + 'static) -> Self {
        let session = read_durable(&backend);
        log::debug!("session store opened (authenticated: {})", session.is_authenticated());
        Self {
            inner: Arc::new(Inner {
                backend: Box::new(backend),
                state: RwLock::new(State { session, generation: 0 }),
                listeners: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Store with a fresh in-memory backend.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::open(MemoryBackend::new())
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn load(&self) -> Session {
        self.read_state().session.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_state().session.is_authenticated()
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read_state().session.access.clone()
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.read_state().session.refresh.clone()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        Generation(self.read_state().generation)
    }

    /// Replace the current session.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend rejects a write. The store is
    /// left empty in that case rather than half-written.
    pub fn save(&self, session: Session) -> Result<(), StoreError> {
        let session = session.normalized();
        let mut state = self.write_state();
        let result = self.persist(&session);
        state.session = if result.is_ok() { session } else { Session::default() };
        let snapshot = state.session.clone();
        drop(state);
        self.notify(&snapshot);
        result
    }

    /// Save only if no `clear` happened since `generation` was captured.
    /// Returns `Ok(false)` when the session was discarded as stale.
    ///
    /// # Errors
    ///
    /// Same as [`SessionStore::save`].
    pub fn save_if_current(&self, generation: Generation, session: Session) -> Result<bool, StoreError> {
        let session = session.normalized();
        let mut state = self.write_state();
        if state.generation != generation.0 {
            log::debug!("discarding stale session write");
            return Ok(false);
        }
        let result = self.persist(&session);
        state.session = if result.is_ok() { session } else { Session::default() };
        let snapshot = state.session.clone();
        drop(state);
        self.notify(&snapshot);
        result.map(|()| true)
    }

    /// Remove all session fields. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend fails to remove a key. The
    /// in-memory session is cleared regardless.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut state = self.write_state();
        let was_empty = state.session.is_empty();
        state.session = Session::default();
        state.generation += 1;
        let result = self.remove_durable();
        drop(state);
        if !was_empty {
            log::debug!("session cleared");
            self.notify(&Session::default());
        }
        result
    }

    /// Register a callback invoked after every change to the session.
    pub fn watch(&self, listener: impl Fn(&Session) + Send + Sync + 'static) {
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    fn persist(&self, session: &Session) -> Result<(), StoreError> {
        let result = self.write_durable(session);
        if let Err(err) = &result {
            log::warn!("session write failed, clearing storage: {err}");
            let _ = self.remove_durable();
        }
        result
    }

    fn write_durable(&self, session: &Session) -> Result<(), StoreError> {
        let backend = &self.inner.backend;
        let user = session
            .user
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| StoreError::Encode(err.to_string()))?;

        write_or_remove(backend.as_ref(), ACCESS_KEY, session.access.as_deref())?;
        write_or_remove(backend.as_ref(), REFRESH_KEY, session.refresh.as_deref())?;
        write_or_remove(backend.as_ref(), USER_KEY, user.as_deref())
    }

    fn remove_durable(&self) -> Result<(), StoreError> {
        let backend = &self.inner.backend;
        let mut first_error = None;
        for key in [ACCESS_KEY, REFRESH_KEY, USER_KEY] {
            if let Err(err) = backend.remove(key) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn notify(&self, session: &Session) {
        let listeners = self.inner.listeners.read().unwrap_or_else(PoisonError::into_inner).clone();
        for listener in listeners {
            listener(session);
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.inner.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.inner.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn write_or_remove(backend: &dyn SessionBackend, key: &str, value: Option<&str>) -> Result<(), StoreError> {
    match value {
        Some(value) => backend.set(key, value),
        None => backend.remove(key),
    }
}

fn read_durable(backend: &dyn SessionBackend) -> Session {
    let user = backend.get(USER_KEY).and_then(|raw| match serde_json::from_str::<UserProfile>(&raw) {
        Ok(user) => Some(user),
        Err(err) => {
            log::warn!("ignoring unreadable stored user profile: {err}");
            None
        }
    });
    Session {
        access: backend.get(ACCESS_KEY),
        refresh: backend.get(REFRESH_KEY),
        user,
    }
    .normalized()
}
