//! Key-value persistence for session data.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store writes `token` and `user` through a [`KeyValueStore`] so
//! the same code runs against browser `localStorage` after hydration and
//! against an in-memory map during SSR and in tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Minimal string key-value store with `localStorage` semantics.
///
/// Writes are best-effort: a failed write is logged by the implementation and
/// never surfaces to the caller.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Browser `localStorage`. Outside the browser every read misses and every
/// write is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Warning for a `localStorage` mutation. `outcome` is `None` when storage
/// is unavailable, otherwise whether the call succeeded.
#[cfg(any(feature = "hydrate", test))]
fn write_warning(action: &str, key: &str, outcome: Option<bool>) -> Option<String> {
    match outcome {
        None => Some(format!("localStorage unavailable; dropping {action} `{key}`")),
        Some(false) => Some(format!("localStorage rejected {action} `{key}`")),
        Some(true) => None,
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let outcome = local_storage().map(|storage| storage.set_item(key, value).is_ok());
            if let Some(warning) = write_warning("write to", key, outcome) {
                log::warn!("{warning}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            let outcome = local_storage().map(|storage| storage.remove_item(key).is_ok());
            if let Some(warning) = write_warning("removal of", key, outcome) {
                log::warn!("{warning}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
