use edutrack_core::model::{DashboardSnapshot, User};
use services::SessionController;

/// Load state of a dashboard-backed view.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    /// Nobody is logged in.
    Idle,
    Loading,
    Ready(T),
    /// Blocking error; no partial content is shown.
    Error(String),
}

/// Derive a view's state from the session, building its model once data is loaded.
#[must_use]
pub fn view_state_from_session<T>(
    session: &SessionController,
    build: impl FnOnce(&DashboardSnapshot, &User) -> T,
) -> ViewState<T> {
    let Some(user) = session.user() else {
        return ViewState::Idle;
    };
    if let Some(message) = session.load_error() {
        return ViewState::Error(message.to_owned());
    }
    match session.snapshot() {
        Some(snapshot) => ViewState::Ready(build(snapshot, user)),
        None => ViewState::Loading,
    }
}
