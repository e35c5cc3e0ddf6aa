//! Route guard and navigation seam.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard is only reachable with an authenticated session. The login
//! controller redirects explicitly on success; the dashboard page also installs
//! a reactive guard that sends unauthenticated visitors back to `/login`.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/";

/// Top-level views selected by session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Login,
    Dashboard,
}

impl AppView {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Dashboard => DASHBOARD_PATH,
        }
    }
}

/// The view a session is allowed to see.
#[must_use]
pub fn select_view(state: &SessionState) -> AppView {
    match state {
        SessionState::Unauthenticated => AppView::Login,
        SessionState::Authenticated(_) => AppView::Dashboard,
    }
}

/// Where to send a visitor who asked for `requested`, or `None` to stay.
#[must_use]
pub fn redirect_for(requested: AppView, state: &SessionState) -> Option<AppView> {
    let allowed = select_view(state);
    (allowed != requested).then_some(allowed)
}

/// Moves the browser to another route.
pub trait Navigator {
    fn navigate_to(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate_to(&self, path: &str) {
        self(path);
    }
}

/// Redirect away from `requested` whenever the session does not allow it.
pub fn install_session_redirect<F>(session: RwSignal<SessionState>, requested: AppView, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(target) = redirect_for(requested, &session.get()) {
            log::debug!("route guard: {requested:?} -> {target:?}");
            navigate(target.path(), NavigateOptions::default());
        }
    });
}
