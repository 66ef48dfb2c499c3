//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The route guard, the API client's interceptors, and user-aware pages all
//! read the session from here. `SessionStore` is created once in the root
//! component and handed out through context; it is the only code that writes
//! the persisted `token` and `user` entries.
//!
//! DESIGN
//! ======
//! Persisted storage is the durable copy and the in-memory `AuthState` is a
//! cache of it. Every action writes both before notifying listeners, so the
//! two cannot diverge within one page lifetime.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::net::types::User;
use crate::util::storage::KeyValueStore;

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the JSON-serialized [`User`].
pub const USER_KEY: &str = "user";

/// Snapshot of the session: who is signed in and whether a call is in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub loading: bool,
}

impl AuthState {
    /// Token presence is the only authentication signal.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

type Listener = Rc<dyn Fn(&AuthState)>;

/// Session store with `localStorage`-backed persistence.
///
/// Cloning is cheap and every clone drives the same session.
#[derive(Clone)]
pub struct SessionStore {
    state: Rc<RefCell<AuthState>>,
    storage: Rc<dyn KeyValueStore>,
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("state", &self.state.borrow()).finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create an empty store over `storage`. Call [`Self::initialize_auth`]
    /// to pick up a persisted session.
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self {
            state: Rc::new(RefCell::new(AuthState::default())),
            storage: Rc::new(storage),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Create a store and load whatever session `storage` already holds.
    pub fn load(storage: impl KeyValueStore + 'static) -> Self {
        let store = Self::new(storage);
        store.initialize_auth();
        store
    }

    /// Re-read the persisted token and user.
    ///
    /// A stored user that no longer parses resets the session through
    /// [`Self::logout`]; the parse error is logged, never returned.
    pub fn initialize_auth(&self) {
        let token = self.storage.get_item(TOKEN_KEY);
        let user = match self.storage.get_item(USER_KEY) {
            None => None,
            Some(raw) => match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    log::error!("error parsing stored user data: {e}");
                    self.logout();
                    return;
                }
            },
        };
        self.update(|state| {
            state.token = token;
            state.user = user;
        });
    }

    /// Replace the current user and persist it.
    pub fn set_user(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(raw) => self.storage.set_item(USER_KEY, &raw),
            Err(e) => log::warn!("could not serialize user for storage: {e}"),
        }
        self.update(|state| state.user = Some(user));
    }

    /// Replace the current token and persist it verbatim.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.storage.set_item(TOKEN_KEY, &token);
        self.update(|state| state.token = Some(token));
    }

    pub fn login(&self, user: User, token: impl Into<String>) {
        self.set_user(user);
        self.set_token(token);
    }

    /// Clear user and token from memory and storage.
    pub fn logout(&self) {
        self.storage.remove_item(USER_KEY);
        self.storage.remove_item(TOKEN_KEY);
        self.update(|state| {
            state.user = None;
            state.token = None;
        });
    }

    /// Toggle the transient loading flag. Never persisted.
    pub fn set_loading(&self, loading: bool) {
        self.update(|state| state.loading = loading);
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Token as held in persisted storage.
    pub fn persisted_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn has_persisted_token(&self) -> bool {
        self.persisted_token().is_some()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Register a listener called with a fresh snapshot after every action.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn update(&self, apply: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };
        // Listeners may call back into the store; release borrows first.
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
