//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser concerns (storage, location) sit behind small traits here, next to
//! the navigation guard that consumes them.

pub mod auth;
pub mod location;
pub mod storage;
