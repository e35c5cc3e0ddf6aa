//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::AuthConfig;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};
use crate::state::session::{SessionState, SessionStore};

/// Root application component.
///
/// Creates the app's one [`SessionStore`], mirrors it into a reactive signal
/// for guards and pages, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AuthConfig::from_build_env().unwrap_or_else(|e| {
        log::error!("auth config invalid, using defaults: {e}");
        AuthConfig::default()
    });
    if !config.is_configured() {
        log::warn!("AUTH_COGNITO_CLIENT_ID not set; sign-in will fail");
    }

    let store = SessionStore::new();
    let session = RwSignal::new(store.state());
    store.subscribe(move |state| session.set(state.clone()));

    provide_context(config);
    provide_context(store);
    provide_context(session);

    view! {
        <Title text="Sign in"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=DashboardPage/>
            </Routes>
        </Router>
    }
}
