//! Networking modules for the questionnaire REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `client` owns the request pipeline and interceptors, `transport` performs
//! the browser `fetch`, `api` groups the endpoint wrappers, `config` resolves
//! the base URL, and `types` defines the wire schema.

pub mod api;
pub mod client;
pub mod config;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
