use super::*;
use crate::net::types::Identity;
use std::cell::RefCell;

fn signed_in() -> SessionState {
    SessionState::Authenticated(Identity::new("user@example.com", ""))
}

#[test]
fn unauthenticated_selects_login() {
    assert_eq!(select_view(&SessionState::Unauthenticated), AppView::Login);
}

#[test]
fn authenticated_selects_dashboard() {
    assert_eq!(select_view(&signed_in()), AppView::Dashboard);
}

#[test]
fn dashboard_redirects_to_login_without_session() {
    assert_eq!(redirect_for(AppView::Dashboard, &SessionState::Unauthenticated), Some(AppView::Login));
}

#[test]
fn dashboard_stays_with_session() {
    assert_eq!(redirect_for(AppView::Dashboard, &signed_in()), None);
}

#[test]
fn login_stays_without_session() {
    assert_eq!(redirect_for(AppView::Login, &SessionState::Unauthenticated), None);
}

#[test]
fn view_paths_match_routes() {
    assert_eq!(AppView::Login.path(), "/login");
    assert_eq!(AppView::Dashboard.path(), "/");
}

#[test]
fn closures_are_navigators() {
    let visited = RefCell::new(Vec::new());
    let navigator = |path: &str| visited.borrow_mut().push(path.to_owned());
    navigator.navigate_to(DASHBOARD_PATH);
    assert_eq!(*visited.borrow(), vec!["/".to_owned()]);
}
