//! # portal
//!
//! Leptos + WASM sign-in client. Authenticates against a Cognito user pool and
//! gates the dashboard behind the resulting session.
//!
//! The sign-in lifecycle (validation, remote call, session write, redirect)
//! lives in plain Rust under `state`, `net`, and `util`; `pages` and `app` are
//! thin Leptos views over it.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
