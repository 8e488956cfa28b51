use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{Answer, QuizId, Theme};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of an in-progress attempt.
///
/// There is exactly one progress slot per installation, overwritten wholesale
/// on every save (last-writer-wins). Answers are stored in question order so
/// the store can rebuild its index-keyed map on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub quiz_id: QuizId,
    pub current_index: usize,
    pub answers: Vec<Answer>,
    pub started_at: DateTime<Utc>,
}

/// Preference keys shared by the SQLite and in-memory backends.
///
/// `player_name` and `participation_score` are the legacy fields the original
/// storage helper maintained alongside the progress record.
pub mod preference_keys {
    pub const THEME: &str = "theme";
    pub const PLAYER_NAME: &str = "player_name";
    pub const PARTICIPATION_SCORE: &str = "participation_score";
    pub const AUTH_TOKEN: &str = "auth_token";
}

/// Repository contract for the single progress slot.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the persisted progress record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure; an empty slot is `Ok(None)`.
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError>;

    /// Overwrite the progress slot with the given record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Empty the progress slot. A no-op when already empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn clear_progress(&self) -> Result<(), StorageError>;
}

/// Repository contract for keyed string preferences.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetch a preference value by key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure; a missing key is `Ok(None)`.
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Persist or update a preference value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a preference by key. A no-op when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn remove_preference(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed helpers over the raw key/value contract.
pub struct Preferences;

impl Preferences {
    /// Read the persisted theme, ignoring unparseable values.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn theme(repo: &dyn PreferenceRepository) -> Result<Option<Theme>, StorageError> {
        let raw = repo.get_preference(preference_keys::THEME).await?;
        Ok(raw.and_then(|v| v.parse().ok()))
    }

    /// Persist the theme preference.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn set_theme(
        repo: &dyn PreferenceRepository,
        theme: Theme,
    ) -> Result<(), StorageError> {
        repo.set_preference(preference_keys::THEME, theme.as_str())
            .await
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<Option<ProgressRecord>>>,
    preferences: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }

    async fn clear_progress(&self) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryRepository {
    async fn get_preference(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_preference(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_preference(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let preferences: Arc<dyn PreferenceRepository> = Arc::new(repo);
        Self {
            progress,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{ChoiceId, QuestionId};
    use quiz_core::time::fixed_now;

    fn record() -> ProgressRecord {
        ProgressRecord {
            quiz_id: QuizId::new(1),
            current_index: 1,
            answers: vec![Answer::new(
                QuestionId::new(1),
                ChoiceId::new(2),
                true,
                fixed_now(),
            )],
            started_at: fixed_now(),
        }
    }

    #[tokio::test]
    async fn progress_slot_round_trips() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_progress().await.unwrap().is_none());

        repo.save_progress(&record()).await.unwrap();
        let loaded = repo.load_progress().await.unwrap().unwrap();
        assert_eq!(loaded, record());

        repo.clear_progress().await.unwrap();
        assert!(repo.load_progress().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_wholesale() {
        let repo = InMemoryRepository::new();
        repo.save_progress(&record()).await.unwrap();

        let mut updated = record();
        updated.current_index = 0;
        updated.answers.clear();
        repo.save_progress(&updated).await.unwrap();

        let loaded = repo.load_progress().await.unwrap().unwrap();
        assert!(loaded.answers.is_empty());
    }

    #[tokio::test]
    async fn theme_preference_round_trips() {
        let repo = InMemoryRepository::new();
        assert!(Preferences::theme(&repo).await.unwrap().is_none());

        Preferences::set_theme(&repo, Theme::Tournament).await.unwrap();
        assert_eq!(
            Preferences::theme(&repo).await.unwrap(),
            Some(Theme::Tournament)
        );
    }

    #[tokio::test]
    async fn unknown_theme_value_reads_as_none() {
        let repo = InMemoryRepository::new();
        repo.set_preference(preference_keys::THEME, "sepia")
            .await
            .unwrap();
        assert!(Preferences::theme(&repo).await.unwrap().is_none());
    }
}
