use std::sync::Arc;

use storage::Storage;
use study_core::ScoreDenominator;
use study_core::model::GeneratorSettings;

use crate::Clock;
use crate::generation::{ChatContentGenerator, ContentGenerator, TemplateContentGenerator};
use crate::sessions::{ProgressService, StudySessionService};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    study: Arc<StudySessionService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services with the chat generator when `settings` is present and
    /// the offline template generator otherwise.
    #[must_use]
    pub fn new(
        storage: &Storage,
        clock: Clock,
        settings: Option<GeneratorSettings>,
        denominator: ScoreDenominator,
    ) -> Self {
        let generator: Arc<dyn ContentGenerator> = match settings {
            Some(settings) => Arc::new(ChatContentGenerator::new(settings)),
            None => Arc::new(TemplateContentGenerator::new()),
        };
        Self::with_generator(storage, clock, generator, denominator)
    }

    #[must_use]
    pub fn with_generator(
        storage: &Storage,
        clock: Clock,
        generator: Arc<dyn ContentGenerator>,
        denominator: ScoreDenominator,
    ) -> Self {
        let study = StudySessionService::new(
            clock,
            generator,
            Arc::clone(&storage.session_records),
        )
        .with_score_denominator(denominator);
        let progress = ProgressService::new(Arc::clone(&storage.session_records));
        Self {
            study: Arc::new(study),
            progress: Arc::new(progress),
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
