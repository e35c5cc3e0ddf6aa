//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` is the app-wide signed-in identity; `login` is the per-form
//! controller that writes it.

pub mod login;
pub mod session;
