//! Current page location as seen by code outside the router.
//!
//! The API client needs the pathname to decide whether a 401 should tear the
//! session down; it has no access to router hooks, so it reads it through
//! this trait.

use std::cell::RefCell;
use std::rc::Rc;

pub trait PageLocation {
    /// Path part of the current URL, e.g. `/dashboard`.
    fn pathname(&self) -> String;
}

/// `window.location.pathname`; `/` outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserLocation;

impl PageLocation for BrowserLocation {
    fn pathname(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_else(|| "/".to_owned())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            "/".to_owned()
        }
    }
}

/// Settable location. Clones share the same path.
#[derive(Clone, Debug)]
pub struct StaticLocation {
    path: Rc<RefCell<String>>,
}

impl StaticLocation {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: Rc::new(RefCell::new(path.into())) }
    }

    pub fn set(&self, path: impl Into<String>) {
        *self.path.borrow_mut() = path.into();
    }
}

impl PageLocation for StaticLocation {
    fn pathname(&self) -> String {
        self.path.borrow().clone()
    }
}
