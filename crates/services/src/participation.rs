use std::sync::Arc;

use storage::repository::{preference_keys, PreferenceRepository, StorageError};

/// Legacy player-name / last-score fields.
///
/// Older parts of the UI read these directly instead of the progress record;
/// they are kept as independent preferences for backward compatibility.
#[derive(Clone)]
pub struct ParticipationService {
    preferences: Arc<dyn PreferenceRepository>,
}

impl ParticipationService {
    #[must_use]
    pub fn new(preferences: Arc<dyn PreferenceRepository>) -> Self {
        Self { preferences }
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn player_name(&self) -> Result<Option<String>, StorageError> {
        self.preferences
            .get_preference(preference_keys::PLAYER_NAME)
            .await
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn save_player_name(&self, name: &str) -> Result<(), StorageError> {
        self.preferences
            .set_preference(preference_keys::PLAYER_NAME, name)
            .await
    }

    /// The last participation score; unset or unparseable reads as zero,
    /// matching the legacy helper.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn participation_score(&self) -> Result<u32, StorageError> {
        let raw = self
            .preferences
            .get_preference(preference_keys::PARTICIPATION_SCORE)
            .await?;
        Ok(raw.and_then(|v| v.parse().ok()).unwrap_or(0))
    }

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn save_participation_score(&self, score: u32) -> Result<(), StorageError> {
        self.preferences
            .set_preference(preference_keys::PARTICIPATION_SCORE, &score.to_string())
            .await
    }

    /// Remove both legacy fields.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.preferences
            .remove_preference(preference_keys::PLAYER_NAME)
            .await?;
        self.preferences
            .remove_preference(preference_keys::PARTICIPATION_SCORE)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn round_trips_name_and_score() {
        let svc = ParticipationService::new(Arc::new(InMemoryRepository::new()));

        assert!(svc.player_name().await.unwrap().is_none());
        assert_eq!(svc.participation_score().await.unwrap(), 0);

        svc.save_player_name("Ada").await.unwrap();
        svc.save_participation_score(8).await.unwrap();
        assert_eq!(svc.player_name().await.unwrap().as_deref(), Some("Ada"));
        assert_eq!(svc.participation_score().await.unwrap(), 8);

        svc.clear().await.unwrap();
        assert!(svc.player_name().await.unwrap().is_none());
        assert_eq!(svc.participation_score().await.unwrap(), 0);
    }
}
