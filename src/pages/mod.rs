//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration; sign-in logic itself lives in
//! `state::login` so it can be tested without a browser.

pub mod dashboard;
pub mod login;
