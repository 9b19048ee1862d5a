use std::sync::Arc;

use edutrack_core::model::MentorInsight;
use edutrack_core::time::fixed_clock;
use services::{InMemoryBackend, SessionController};
use storage::repository::InMemorySessionStore;

use crate::context::Navigator;
use crate::routes::AppView;
use crate::views::screen::{DetailError, Screen, build_screen, build_student_detail};
use crate::vm::ALL_CATEGORIES;

pub(crate) struct ViewHarness {
    pub backend: InMemoryBackend,
    pub session: SessionController,
    pub navigator: Option<Navigator>,
    pub filter: String,
    pub insights: Vec<MentorInsight>,
}

impl ViewHarness {
    pub fn new() -> Self {
        let backend = InMemoryBackend::seeded();
        let session = SessionController::new(
            Arc::new(backend.clone()),
            Arc::new(InMemorySessionStore::new()),
            fixed_clock(),
        );
        Self {
            backend,
            session,
            navigator: None,
            filter: ALL_CATEGORIES.to_owned(),
            insights: Vec::new(),
        }
    }

    pub async fn login(&mut self, email: &str) {
        self.session.login(email).await.expect("login");
        let role = self.session.user().expect("user").role();
        self.navigator = Some(Navigator::new(role));
    }

    pub fn select(&mut self, view: AppView) {
        self.navigator.as_mut().expect("navigator").select(view);
    }

    fn navigator(&self) -> Navigator {
        self.navigator
            .unwrap_or_else(|| Navigator::new(edutrack_core::model::UserRole::Student))
    }

    pub fn screen(&self) -> Screen {
        build_screen(&self.session, &self.navigator(), &self.filter, &self.insights)
    }

    pub fn detail(&self, student: &str) -> Result<Screen, DetailError> {
        build_student_detail(&self.session, &self.navigator(), student)
    }

    pub fn render(&self) -> String {
        self.screen().to_string()
    }
}
