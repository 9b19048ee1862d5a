use std::sync::Arc;

use edutrack_core::model::{
    ActivityEvent, CourseId, DashboardSnapshot, LessonSummary, MentorInsight, NewActivity, User,
};
use storage::SessionStore;

use super::record;
use super::reload::{ReloadOutcome, ReloadTicket};
use crate::Clock;
use crate::error::{GatewayError, LoginFailure, SessionError};
use crate::gateway::Backend;

/// Password sent when the login form only asks for an email.
pub const DEFAULT_PASSWORD: &str = "password123";

/// Blocking message shown when the dashboard cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to sync with backend server.";

/// Lifecycle of the authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated,
    Refreshing,
}

/// Result of logging an activity: the submission may fail, the reload still runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityLogResult {
    pub submitted: Result<ActivityEvent, GatewayError>,
    pub reload: ReloadOutcome,
}

/// Owns the session: who is logged in and the current dashboard snapshot.
///
/// There is exactly one owner of the snapshot, and every reload replaces it
/// wholesale. Reloads are tagged with a generation so a late response cannot
/// overwrite newer state.
pub struct SessionController {
    backend: Arc<dyn Backend>,
    store: Arc<dyn SessionStore>,
    clock: Clock,
    state: SessionState,
    user: Option<User>,
    snapshot: Option<DashboardSnapshot>,
    login_failure: Option<LoginFailure>,
    load_error: Option<String>,
    latest_reload: u64,
}

impl SessionController {
    #[must_use]
    pub fn new(backend: Arc<dyn Backend>, store: Arc<dyn SessionStore>, clock: Clock) -> Self {
        Self {
            backend,
            store,
            clock,
            state: SessionState::Unauthenticated,
            user: None,
            snapshot: None,
            login_failure: None,
            load_error: None,
            latest_reload: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The loaded snapshot, if the last reload succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    /// Inline message for the login screen after a failed attempt.
    #[must_use]
    pub fn login_failure(&self) -> Option<LoginFailure> {
        self.login_failure
    }

    /// Blocking message shown instead of dashboard content.
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Resume a session persisted by an earlier run and load its dashboard.
    ///
    /// Returns `true` when a session was restored. A corrupt record is removed
    /// silently and the controller stays unauthenticated.
    pub async fn restore(&mut self) -> bool {
        let Some(user) = record::restore(self.store.as_ref()).await else {
            return false;
        };
        log::info!("restored session for {}", user.email());
        self.user = Some(user);
        self.state = SessionState::Authenticated;
        if let Err(err) = self.reload().await {
            log::warn!("reload after restore skipped: {err}");
        }
        true
    }

    /// Log in with the default password.
    ///
    /// # Errors
    ///
    /// See [`SessionController::login_with_password`].
    pub async fn login(&mut self, email: &str) -> Result<(), LoginFailure> {
        self.login_with_password(email, DEFAULT_PASSWORD).await
    }

    /// Authenticate, persist the session and load the dashboard.
    ///
    /// Any previous session is ended first, persisted record included, so a
    /// failed attempt never leaves an older user to be restored later. A
    /// dashboard failure after a successful login does not fail the login;
    /// it is reported through [`SessionController::load_error`].
    ///
    /// # Errors
    ///
    /// Returns `LoginFailure::InvalidCredentials` when the backend returns no
    /// user and `LoginFailure::ServerUnreachable` when it cannot be reached.
    pub async fn login_with_password(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<(), LoginFailure> {
        self.end_session().await;
        self.state = SessionState::Authenticating;

        let user = match self.backend.login(email, password).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(self.fail_login(LoginFailure::InvalidCredentials)),
            Err(err) => {
                log::warn!("login exchange failed: {err}");
                return Err(self.fail_login(LoginFailure::ServerUnreachable));
            }
        };

        log::info!("logged in as {} ({})", user.email(), user.role());
        record::persist(self.store.as_ref(), &user).await;
        self.user = Some(user);
        self.state = SessionState::Authenticated;
        if let Err(err) = self.reload().await {
            log::warn!("reload after login skipped: {err}");
        }
        Ok(())
    }

    fn fail_login(&mut self, failure: LoginFailure) -> LoginFailure {
        self.state = SessionState::Unauthenticated;
        self.login_failure = Some(failure);
        failure
    }

    /// Start a reload and hand out the ticket that may apply its result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a logged-in user.
    pub fn begin_reload(&mut self) -> Result<ReloadTicket, SessionError> {
        let user_id = self
            .user
            .as_ref()
            .map(|user| user.id().clone())
            .ok_or(SessionError::NotAuthenticated)?;
        self.latest_reload += 1;
        self.state = SessionState::Refreshing;
        Ok(ReloadTicket::new(self.latest_reload, user_id))
    }

    /// Apply a fetched snapshot if `ticket` is still the latest reload.
    pub fn finish_reload(
        &mut self,
        ticket: &ReloadTicket,
        result: Result<DashboardSnapshot, GatewayError>,
    ) -> ReloadOutcome {
        let current_user = self.user.as_ref().map(User::id);
        if ticket.generation() != self.latest_reload || current_user != Some(ticket.user_id()) {
            log::debug!(
                "dropping stale reload {} (latest {})",
                ticket.generation(),
                self.latest_reload
            );
            return ReloadOutcome::Stale;
        }

        self.state = SessionState::Authenticated;
        match result {
            Ok(snapshot) => {
                log::debug!(
                    "snapshot loaded: {} courses, {} activities, {} students",
                    snapshot.courses.len(),
                    snapshot.activities.len(),
                    snapshot.all_students.len()
                );
                self.snapshot = Some(snapshot);
                self.load_error = None;
                ReloadOutcome::Applied
            }
            Err(err) => {
                log::error!("dashboard load failed: {err}");
                self.snapshot = None;
                self.load_error = Some(LOAD_FAILED_MESSAGE.to_owned());
                ReloadOutcome::Failed
            }
        }
    }

    /// Refetch the whole snapshot for the current user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a logged-in user.
    pub async fn reload(&mut self) -> Result<ReloadOutcome, SessionError> {
        let ticket = self.begin_reload()?;
        let backend = Arc::clone(&self.backend);
        let result = backend.fetch_dashboard(ticket.user_id()).await;
        Ok(self.finish_reload(&ticket, result))
    }

    /// Log study time for the current user, then reload.
    ///
    /// A failed submission is logged and returned in the result, but the
    /// reload runs regardless.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a logged-in user and
    /// `SessionError::Activity` when the entry is invalid (nothing is sent).
    pub async fn log_activity(
        &mut self,
        course_id: CourseId,
        minutes: u32,
        lesson_name: &str,
    ) -> Result<ActivityLogResult, SessionError> {
        let student_id = self
            .user
            .as_ref()
            .map(|user| user.id().clone())
            .ok_or(SessionError::NotAuthenticated)?;
        let activity =
            NewActivity::new(student_id, course_id, minutes, lesson_name, self.clock.today())?;

        let submitted = self.backend.log_activity(&activity).await;
        match &submitted {
            Ok(event) => log::info!("logged {} min on {}", minutes, event.course_id()),
            Err(err) => log::warn!("activity log failed, reloading anyway: {err}"),
        }

        let reload = self.reload().await?;
        Ok(ActivityLogResult { submitted, reload })
    }

    /// Advisory statuses for the loaded roster; empty when unavailable.
    pub async fn mentor_insights(&self) -> Vec<MentorInsight> {
        let Some(snapshot) = self.snapshot.as_ref() else {
            return Vec::new();
        };
        match self
            .backend
            .fetch_mentor_insights(&snapshot.all_students, &snapshot.courses, &snapshot.activities)
            .await
        {
            Ok(insights) => insights,
            Err(err) => {
                log::warn!("mentor insights unavailable: {err}");
                Vec::new()
            }
        }
    }

    /// Lessons of one course.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotAuthenticated` without a logged-in user and
    /// `SessionError::Gateway` when the lessons cannot be fetched.
    pub async fn lessons(&self, course_id: &CourseId) -> Result<Vec<LessonSummary>, SessionError> {
        if self.user.is_none() {
            return Err(SessionError::NotAuthenticated);
        }
        Ok(self.backend.fetch_lessons(course_id).await?)
    }

    /// End the session: memory is cleared first, then the persisted record.
    ///
    /// Any reload still in flight becomes stale.
    pub async fn logout(&mut self) {
        if let Some(user) = self.user.as_ref() {
            log::info!("logging out {}", user.email());
        }
        self.end_session().await;
    }

    async fn end_session(&mut self) {
        self.clear_in_memory();
        self.latest_reload += 1;
        record::clear(self.store.as_ref()).await;
    }

    fn clear_in_memory(&mut self) {
        self.state = SessionState::Unauthenticated;
        self.user = None;
        self.snapshot = None;
        self.login_failure = None;
        self.load_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryBackend;
    use edutrack_core::time::fixed_clock;
    use storage::InMemorySessionStore;

    fn controller(backend: &InMemoryBackend, store: &InMemorySessionStore) -> SessionController {
        SessionController::new(
            Arc::new(backend.clone()),
            Arc::new(store.clone()),
            fixed_clock(),
        )
    }

    #[tokio::test]
    async fn login_failure_keeps_unauthenticated() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);

        let err = session.login("ghost@student.edu").await.unwrap_err();
        assert_eq!(err, LoginFailure::InvalidCredentials);
        assert_eq!(session.state(), SessionState::Unauthenticated);
        assert_eq!(session.login_failure(), Some(LoginFailure::InvalidCredentials));
        assert!(!store.contains(record::SESSION_KEY));

        backend.fail_login(GatewayError::Network("connection refused".into()));
        let err = session.login("alex@student.edu").await.unwrap_err();
        assert_eq!(err, LoginFailure::ServerUnreachable);
        assert_ne!(err.to_string(), LoginFailure::InvalidCredentials.to_string());
    }

    #[tokio::test]
    async fn stale_reload_is_discarded() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);
        session.login("alex@student.edu").await.unwrap();

        let older = session.begin_reload().unwrap();
        let newer = session.begin_reload().unwrap();
        assert!(newer.generation() > older.generation());
        assert_eq!(session.state(), SessionState::Refreshing);

        let fresh = backend.fetch_dashboard(newer.user_id()).await.unwrap();
        assert_eq!(session.finish_reload(&newer, Ok(fresh)), ReloadOutcome::Applied);

        let outcome = session.finish_reload(&older, Ok(DashboardSnapshot::default()));
        assert_eq!(outcome, ReloadOutcome::Stale);
        assert_eq!(session.snapshot().map(|s| s.courses.len()), Some(4));
    }

    #[tokio::test]
    async fn reload_after_logout_is_stale() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);
        session.login("alex@student.edu").await.unwrap();

        let ticket = session.begin_reload().unwrap();
        session.logout().await;
        let outcome = session.finish_reload(&ticket, Ok(DashboardSnapshot::default()));
        assert_eq!(outcome, ReloadOutcome::Stale);
        assert!(session.snapshot().is_none());
        assert_eq!(session.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn new_login_attempt_invalidates_pending_reload() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);
        session.login("alex@student.edu").await.unwrap();

        let ticket = session.begin_reload().unwrap();
        session.login("alex@student.edu").await.unwrap();
        let outcome = session.finish_reload(&ticket, Ok(DashboardSnapshot::default()));
        assert_eq!(outcome, ReloadOutcome::Stale);
        assert_eq!(session.snapshot().map(|s| s.courses.len()), Some(4));
    }

    #[tokio::test]
    async fn reload_requires_user() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);
        assert!(matches!(
            session.reload().await,
            Err(SessionError::NotAuthenticated)
        ));
        assert!(matches!(
            session.log_activity(CourseId::new("c1"), 10, "HOCs").await,
            Err(SessionError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn invalid_activity_is_not_submitted() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);
        session.login("alex@student.edu").await.unwrap();
        let calls = backend.dashboard_calls();

        let err = session
            .log_activity(CourseId::new("c1"), 0, "HOCs")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Activity(_)));
        assert_eq!(backend.activity_count(), 3);
        assert_eq!(backend.dashboard_calls(), calls);
    }

    #[tokio::test]
    async fn activity_is_stamped_with_clock_day() {
        let backend = InMemoryBackend::seeded();
        let store = InMemorySessionStore::new();
        let mut session = controller(&backend, &store);
        session.login("alex@student.edu").await.unwrap();

        let result = session
            .log_activity(CourseId::new("c2"), 20, "Typography")
            .await
            .unwrap();
        let event = result.submitted.unwrap();
        assert_eq!(event.date(), fixed_clock().today());
        assert_eq!(result.reload, ReloadOutcome::Applied);
    }
}
