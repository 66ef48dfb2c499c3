//! # client
//!
//! Leptos + WASM frontend for the questionnaire platform.
//!
//! This crate contains the route table and navigation guard, the REST client
//! with its auth interceptors, the persisted session store, and the pages
//! that call into them. The questionnaire backend is reached over HTTP only.

pub mod app;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
