//! Dashboard page shown to a signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionState;
use crate::util::route_guard::{AppView, install_session_redirect};

/// Dashboard page. Redirects to `/login` if the session is not authenticated.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_session_redirect(session, AppView::Dashboard, use_navigate());

    let identifier = move || {
        session.with(|s| {
            s.identity()
                .map(|identity| identity.identifier.clone())
                .unwrap_or_default()
        })
    };
    let subject = move || {
        session.with(|s| {
            s.identity()
                .map(|identity| identity.subject_id.clone())
                .filter(|sub| !sub.is_empty())
        })
    };

    view! {
        <Show when=move || session.with(SessionState::is_authenticated)>
            <div class="dashboard-page">
                <header class="dashboard-page__header">
                    <h1>"Dashboard"</h1>
                </header>
                <p class="dashboard-page__greeting">"Signed in as " <strong>{identifier}</strong></p>
                <Show when=move || subject().is_some()>
                    <p class="dashboard-page__subject">"Subject: " {move || subject().unwrap_or_default()}</p>
                </Show>
            </div>
        </Show>
    }
}
