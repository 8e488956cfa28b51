use std::sync::Arc;

use quiz_core::model::{AttemptResponse, ChoiceId, Question, QuizId};
use services::{QuizSession, QuizSessionService, SessionError};

use crate::views::ViewError;

/// A choice of the current question, flattened for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub id: ChoiceId,
    pub text: String,
    pub selected: bool,
}

/// View model for the play screen: one session plus the service that
/// persists and submits it.
pub struct PlayVm {
    session: QuizSession,
    service: Arc<QuizSessionService>,
}

impl PlayVm {
    #[must_use]
    pub fn new(session: QuizSession, service: Arc<QuizSessionService>) -> Self {
        Self { session, service }
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.current_question()
    }

    /// Choices of the current question with the recorded selection flagged.
    #[must_use]
    pub fn choices(&self) -> Vec<ChoiceVm> {
        let selected = self
            .session
            .answer_at(self.session.current_index())
            .map(|a| a.choice_id);
        self.session
            .current_question()
            .map(|q| {
                q.choices
                    .iter()
                    .map(|c| ChoiceVm {
                        id: c.id,
                        text: c.text.clone(),
                        selected: selected == Some(c.id),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn player_name(&self) -> &str {
        self.session.player_name()
    }

    #[must_use]
    pub fn question_number(&self) -> usize {
        self.session.current_index() + 1
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        self.session.progress_percent()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.session.score()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.session.can_retreat()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.session.is_last_question()
    }

    #[must_use]
    pub fn all_answered(&self) -> bool {
        self.session.all_answered()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.session.progress().answered
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.service.elapsed_seconds(&self.session)
    }

    /// # Errors
    ///
    /// Returns `ViewError` when persistence fails.
    pub async fn answer(&mut self, choice_id: ChoiceId) -> Result<(), ViewError> {
        self.service
            .answer(&mut self.session, choice_id)
            .await
            .map_err(|e| ViewError::from_session(&e))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ViewError` when persistence fails.
    pub async fn next(&mut self) -> Result<(), ViewError> {
        self.service
            .advance(&mut self.session)
            .await
            .map_err(|e| ViewError::from_session(&e))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ViewError` when persistence fails.
    pub async fn previous(&mut self) -> Result<(), ViewError> {
        self.service
            .retreat(&mut self.session)
            .await
            .map_err(|e| ViewError::from_session(&e))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ViewError` when persistence fails.
    pub async fn jump(&mut self, index: usize) -> Result<(), ViewError> {
        self.service
            .seek(&mut self.session, index)
            .await
            .map_err(|e| ViewError::from_session(&e))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ViewError::Incomplete` with unanswered questions, otherwise
    /// maps API/persistence failures.
    pub async fn submit(&mut self) -> Result<AttemptResponse, ViewError> {
        self.service
            .submit(&mut self.session)
            .await
            .map_err(|e| ViewError::from_session(&e))
    }
}

/// # Errors
///
/// Returns `ViewError::Empty` when the quiz has no questions, and
/// `ViewError::Unknown` for other failures.
pub async fn start_play(
    service: Arc<QuizSessionService>,
    quiz_id: QuizId,
    player: &str,
) -> Result<PlayVm, ViewError> {
    let session = match service.initialize(quiz_id, player).await {
        Ok(session) => session,
        Err(SessionError::Empty) => return Err(ViewError::Empty),
        Err(_) => return Err(ViewError::Unknown),
    };
    Ok(PlayVm::new(session, service))
}
