use std::sync::Arc;

use quiz_core::model::Theme;
use storage::repository::{preference_keys, PreferenceRepository, Storage};

use crate::Clock;
use crate::api::{ApiClient, ApiConfig};
use crate::error::AppServicesError;
use crate::participation::ParticipationService;
use crate::session::QuizSessionService;
use crate::theme::ThemeService;

/// Assembles app-facing services over one storage backend and one API client.
#[derive(Clone)]
pub struct AppServices {
    api: ApiClient,
    preferences: Arc<dyn PreferenceRepository>,
    sessions: Arc<QuizSessionService>,
    themes: Arc<ThemeService>,
    participation: Arc<ParticipationService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// Restores a persisted bearer token into the API client so an admin
    /// login survives restarts.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        api_config: ApiConfig,
        clock: Clock,
        system_theme: Theme,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::new(storage, api_config, clock, system_theme).await
    }

    /// Build services over an already-initialized storage backend.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if reading the stored token fails.
    pub async fn new(
        storage: Storage,
        api_config: ApiConfig,
        clock: Clock,
        system_theme: Theme,
    ) -> Result<Self, AppServicesError> {
        let api = ApiClient::new(api_config);
        let token = storage
            .preferences
            .get_preference(preference_keys::AUTH_TOKEN)
            .await?;
        api.set_token(token);

        let sessions = Arc::new(QuizSessionService::new(
            clock,
            Arc::new(api.clone()),
            Arc::new(api.clone()),
            Arc::clone(&storage.progress),
        ));
        let themes = Arc::new(ThemeService::new(
            Arc::clone(&storage.preferences),
            system_theme,
        ));
        let participation = Arc::new(ParticipationService::new(Arc::clone(&storage.preferences)));

        Ok(Self {
            api,
            preferences: storage.preferences,
            sessions,
            themes,
            participation,
        })
    }

    /// Persist the bearer token so an admin login survives restarts.
    ///
    /// The counterpart of the restore performed in `new`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the token cannot be stored.
    pub async fn remember_auth_token(&self, token: &str) -> Result<(), AppServicesError> {
        self.preferences
            .set_preference(preference_keys::AUTH_TOKEN, token)
            .await?;
        Ok(())
    }

    /// Drop the persisted bearer token and clear it from the API client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the stored token cannot be removed.
    pub async fn forget_auth_token(&self) -> Result<(), AppServicesError> {
        self.api.set_token(None);
        self.preferences
            .remove_preference(preference_keys::AUTH_TOKEN)
            .await?;
        Ok(())
    }

    #[must_use]
    pub fn api(&self) -> ApiClient {
        self.api.clone()
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn themes(&self) -> Arc<ThemeService> {
        Arc::clone(&self.themes)
    }

    #[must_use]
    pub fn participation(&self) -> Arc<ParticipationService> {
        Arc::clone(&self.participation)
    }
}
