use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::gateway::{Backend, GatewayConfig, HttpGateway, InMemoryBackend};
use crate::session::SessionController;

/// Which backend the app talks to.
#[derive(Clone, Debug)]
pub enum BackendChoice {
    /// The EduTrack REST API.
    Http(GatewayConfig),
    /// The seeded in-process cohort, for offline runs.
    Demo,
}

impl BackendChoice {
    fn build(self) -> Result<Arc<dyn Backend>, AppServicesError> {
        match self {
            Self::Http(config) => {
                log::info!("using EduTrack API at {}", config.base_url);
                Ok(Arc::new(HttpGateway::new(config)?))
            }
            Self::Demo => {
                log::info!("using seeded demo backend");
                Ok(Arc::new(InMemoryBackend::seeded()))
            }
        }
    }
}

/// Assembles the backend, the session store and the clock.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    backend: Arc<dyn Backend>,
    storage: Storage,
}

impl AppServices {
    /// Build services whose session record lives in `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or gateway setup fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        backend: BackendChoice,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let backend = backend.build()?;
        Ok(Self {
            clock,
            backend,
            storage,
        })
    }

    /// Build services with a volatile session store around an existing backend.
    #[must_use]
    pub fn in_memory(clock: Clock, backend: Arc<dyn Backend>) -> Self {
        Self {
            clock,
            backend,
            storage: Storage::in_memory(),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// A fresh, unauthenticated controller over the shared backend and store.
    #[must_use]
    pub fn session(&self) -> SessionController {
        SessionController::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.storage.state),
            self.clock,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edutrack_core::time::fixed_clock;

    #[tokio::test]
    async fn sessions_share_the_store() {
        let services = AppServices::in_memory(fixed_clock(), Arc::new(InMemoryBackend::seeded()));
        let mut first = services.session();
        first.login("jordan@student.edu").await.unwrap();

        let mut second = services.session();
        assert!(second.restore().await);
        assert_eq!(second.user().map(|u| u.name()), Some("Jordan Lee"));
    }

    #[tokio::test]
    async fn demo_backend_over_memory_sqlite() {
        let services = AppServices::new_sqlite(
            "sqlite:file:memdb_app_services?mode=memory&cache=shared",
            fixed_clock(),
            BackendChoice::Demo,
        )
        .await
        .unwrap();
        let mut session = services.session();
        session.login("casey@student.edu").await.unwrap();
        assert!(session.snapshot().is_some());
    }
}
