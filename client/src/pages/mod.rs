//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and calls the endpoint wrappers through the
//! `AppApi` from context. Input checks live in small pure functions next to
//! each page so they can be unit tested without a browser.

pub mod create_questionnaire;
pub mod dashboard;
pub mod home;
pub mod login;
pub mod questionnaires;
pub mod register;
