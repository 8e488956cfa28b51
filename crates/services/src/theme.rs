use std::sync::Arc;

use quiz_core::model::Theme;
use storage::repository::{PreferenceRepository, Preferences, StorageError};

/// Process-wide theme selection over the persisted preference.
///
/// The UI layer is responsible for mutating the document root; this service
/// only decides which theme is current and keeps the preference in sync.
#[derive(Clone)]
pub struct ThemeService {
    preferences: Arc<dyn PreferenceRepository>,
    /// Used when no preference is stored; the composition root passes the
    /// detected system preference here.
    fallback: Theme,
}

impl ThemeService {
    #[must_use]
    pub fn new(preferences: Arc<dyn PreferenceRepository>, fallback: Theme) -> Self {
        Self {
            preferences,
            fallback,
        }
    }

    /// The persisted theme, or the fallback when unset or unparseable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn current(&self) -> Result<Theme, StorageError> {
        let stored = Preferences::theme(self.preferences.as_ref()).await?;
        Ok(stored.unwrap_or(self.fallback))
    }

    /// Select and persist a theme.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn set(&self, theme: Theme) -> Result<(), StorageError> {
        Preferences::set_theme(self.preferences.as_ref(), theme).await
    }

    /// Step to the next theme in the fixed cycle and persist it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    pub async fn cycle(&self) -> Result<Theme, StorageError> {
        let next = self.current().await?.next();
        self.set(next).await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    fn service() -> ThemeService {
        ThemeService::new(Arc::new(InMemoryRepository::new()), Theme::Light)
    }

    #[tokio::test]
    async fn falls_back_when_unset() {
        let svc = ThemeService::new(Arc::new(InMemoryRepository::new()), Theme::Dark);
        assert_eq!(svc.current().await.unwrap(), Theme::Dark);
    }

    #[tokio::test]
    async fn set_persists() {
        let svc = service();
        svc.set(Theme::Tournament).await.unwrap();
        assert_eq!(svc.current().await.unwrap(), Theme::Tournament);
    }

    #[tokio::test]
    async fn cycle_walks_the_closed_set() {
        let svc = service();
        assert_eq!(svc.cycle().await.unwrap(), Theme::Dark);
        assert_eq!(svc.cycle().await.unwrap(), Theme::Tournament);
        assert_eq!(svc.cycle().await.unwrap(), Theme::Light);
    }
}
