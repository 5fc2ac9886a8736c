use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use log::{debug, warn};
use medireg_store::MemoryStore;
use uuid::Uuid;

use crate::config::StoreScope;
use crate::AppState;

/// Identifies one browser session. Carried in a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A random, previously unseen session.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Key of the process-wide store used in [`StoreScope::Shared`] mode.
    fn shared() -> Self {
        Self(Uuid::nil())
    }

    /// Reads a cookie value. The nil UUID is refused.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw)
            .ok()
            .filter(|id| !id.is_nil())
            .map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Owns every live record store, one per session (or a single shared one).
///
/// Stores are created lazily on first use and live until the process exits.
#[derive(Debug)]
pub struct SessionRegistry {
    scope: StoreScope,
    cookie_name: String,
    stores: Mutex<HashMap<SessionId, MemoryStore>>,
}

impl SessionRegistry {
    /// An empty registry.
    pub fn new(scope: StoreScope, cookie_name: impl Into<String>) -> Self {
        Self {
            scope,
            cookie_name: cookie_name.into(),
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Configured store sharing.
    pub fn scope(&self) -> StoreScope {
        self.scope
    }

    fn key(&self, session: SessionId) -> SessionId {
        match self.scope {
            StoreScope::Session => session,
            StoreScope::Shared => SessionId::shared(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, MemoryStore>> {
        self.stores.lock().unwrap_or_else(|poisoned| {
            warn!("session registry lock was poisoned, continuing");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Runs `f` against the store belonging to `session`, creating it first
    /// if needed.
    ///
    /// The registry lock is held for the whole call, so each form operation
    /// runs to completion before the next one starts.
    pub fn with_store<R>(&self, session: SessionId, f: impl FnOnce(&mut MemoryStore) -> R) -> R {
        let key = self.key(session);
        let mut stores = self.lock();
        let store = stores.entry(key).or_insert_with(|| {
            debug!("new record store for session {key}");
            MemoryStore::new()
        });
        f(store)
    }

    /// Like [`with_store`](Self::with_store), but a session without a store
    /// sees an empty one that is dropped afterwards.
    ///
    /// Operations that cannot add a record go through here so that requests
    /// which never register anyone leave nothing behind.
    pub fn with_existing_store<R>(
        &self,
        session: SessionId,
        f: impl FnOnce(&mut MemoryStore) -> R,
    ) -> R {
        let key = self.key(session);
        let mut stores = self.lock();
        match stores.get_mut(&key) {
            Some(store) => f(store),
            None => f(&mut MemoryStore::new()),
        }
    }

    /// Number of stores created so far.
    pub fn store_count(&self) -> usize {
        self.stores
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Finds `name=<uuid>` in the request's `Cookie` headers.
pub fn session_from_headers(headers: &HeaderMap, name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .and_then(|(_, value)| SessionId::parse(value.trim()))
}

/// Attaches a [`SessionId`] to every request, minting one (and setting the
/// cookie on the response) when the browser did not send a valid one.
pub async fn session_layer(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let cookie_name = state.sessions.cookie_name();
    let (session, fresh) = match session_from_headers(request.headers(), cookie_name) {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    };
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;
    if fresh {
        let cookie = format!("{cookie_name}={session}; Path=/; HttpOnly; SameSite=Lax");
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(err) => warn!("could not encode session cookie: {err}"),
        }
    }
    response
}
