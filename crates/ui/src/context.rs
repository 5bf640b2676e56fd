use std::sync::Arc;

use services::{ProgressService, StudySessionService};

pub trait UiApp: Send + Sync {
    fn study(&self) -> Arc<StudySessionService>;
    fn progress(&self) -> Arc<ProgressService>;
}

#[derive(Clone)]
pub struct AppContext {
    study: Arc<StudySessionService>,
    progress: Arc<ProgressService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            study: app.study(),
            progress: app.progress(),
        }
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudySessionService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
