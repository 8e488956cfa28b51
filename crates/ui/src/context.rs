use std::sync::Arc;

use services::{ApiClient, AppServices, ParticipationService, QuizSessionService, ThemeService};

/// Per-launch context handed to the view tree.
///
/// Constructed once by the composition root (`crates/app`) and provided via
/// Dioxus context; views never reach for globals.
#[derive(Clone)]
pub struct AppContext {
    services: AppServices,
}

impl AppContext {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }

    #[must_use]
    pub fn services(&self) -> AppServices {
        self.services.clone()
    }

    #[must_use]
    pub fn api(&self) -> ApiClient {
        self.services.api()
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<QuizSessionService> {
        self.services.sessions()
    }

    #[must_use]
    pub fn themes(&self) -> Arc<ThemeService> {
        self.services.themes()
    }

    #[must_use]
    pub fn participation(&self) -> Arc<ParticipationService> {
        self.services.participation()
    }
}
