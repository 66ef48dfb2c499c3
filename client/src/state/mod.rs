//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so individual pages can depend on small focused
//! models. Today only the session lives here.

pub mod auth;
