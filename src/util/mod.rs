//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure rules (validation, view selection) are kept out of page components so
//! they can be tested natively.

pub mod route_guard;
pub mod validation;
