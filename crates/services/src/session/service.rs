use std::sync::Arc;

use quiz_core::model::{AttemptResponse, ChoiceId, QuizId};
use storage::repository::ProgressRepository;

use crate::Clock;
use crate::error::SessionError;
use super::ports::{AttemptSink, QuestionSource};
use super::store::QuizSession;

/// Orchestrates the session store against the backend ports and the local
/// progress slot.
///
/// Every successful mutation persists the whole record (last-writer-wins);
/// the original client skipped persistence on backward navigation, which is
/// resolved here as persist-on-every-mutation.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    questions: Arc<dyn QuestionSource>,
    attempts: Arc<dyn AttemptSink>,
    progress: Arc<dyn ProgressRepository>,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionSource>,
        attempts: Arc<dyn AttemptSink>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            questions,
            attempts,
            progress,
        }
    }

    /// Start or resume a session for the given quiz.
    ///
    /// Questions are fetched fresh either way; a persisted record only
    /// contributes cursor, answers and start time, and only when its quiz id
    /// matches. A record for a different quiz is left in place until this
    /// session overwrites it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` for a quiz without questions, and
    /// propagates fetch/persistence failures.
    pub async fn initialize(
        &self,
        quiz_id: QuizId,
        player_name: &str,
    ) -> Result<QuizSession, SessionError> {
        let questions = self.questions.fetch_ordered_questions(quiz_id).await?;

        let saved = self.progress.load_progress().await?;
        let session = match saved {
            Some(record) if record.quiz_id == quiz_id => {
                log::debug!("resuming quiz {quiz_id} at index {}", record.current_index);
                QuizSession::resume(quiz_id, player_name, questions, &record)?
            }
            _ => QuizSession::new(quiz_id, player_name, questions, self.clock.now())?,
        };

        self.progress.save_progress(&session.progress_record()).await?;
        Ok(session)
    }

    /// Record a choice for the current question and persist.
    ///
    /// An invalid choice id is a silent no-op (nothing recorded, nothing
    /// persisted); the returned flag tells the caller whether anything
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if persistence fails.
    pub async fn answer(
        &self,
        session: &mut QuizSession,
        choice_id: ChoiceId,
    ) -> Result<bool, SessionError> {
        if !session.answer(choice_id, self.clock.now()) {
            return Ok(false);
        }
        self.progress.save_progress(&session.progress_record()).await?;
        Ok(true)
    }

    /// Advance the cursor and persist; blocked on the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if persistence fails.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<bool, SessionError> {
        if !session.advance() {
            return Ok(false);
        }
        self.progress.save_progress(&session.progress_record()).await?;
        Ok(true)
    }

    /// Move the cursor back and persist; blocked at index 0.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if persistence fails.
    pub async fn retreat(&self, session: &mut QuizSession) -> Result<bool, SessionError> {
        if !session.retreat() {
            return Ok(false);
        }
        self.progress.save_progress(&session.progress_record()).await?;
        Ok(true)
    }

    /// Jump to a question index and persist; bounds-checked.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if persistence fails.
    pub async fn seek(&self, session: &mut QuizSession, index: usize) -> Result<bool, SessionError> {
        if !session.seek(index) {
            return Ok(false);
        }
        self.progress.save_progress(&session.progress_record()).await?;
        Ok(true)
    }

    /// Submit the finished attempt for server-side scoring.
    ///
    /// Validates completeness first; on success stamps the end time, marks
    /// the session completed, reconciles local guesses with the server's
    /// correct-question list and clears the persisted record. A failed
    /// submission leaves the session open so the caller can retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` when questions are unanswered,
    /// `SessionError::Completed` for a double submit, and propagates
    /// API/persistence failures.
    pub async fn submit(
        &self,
        session: &mut QuizSession,
    ) -> Result<AttemptResponse, SessionError> {
        if session.is_completed() {
            return Err(SessionError::Completed);
        }
        if !session.all_answered() {
            return Err(SessionError::Incomplete {
                answered: session.progress().answered,
                total: session.total_questions(),
            });
        }

        let now = self.clock.now();
        let request = session.to_attempt_request(session.elapsed_seconds(now));
        let response = self.attempts.submit(&request).await?;

        session.mark_submitted(now, response.id);
        session.reconcile(&response.correct_answers);
        self.progress.clear_progress().await?;

        Ok(response)
    }

    /// Clear the session and its persisted record.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if clearing the slot fails.
    pub async fn reset(&self, session: &mut QuizSession) -> Result<(), SessionError> {
        session.reset(self.clock.now());
        self.progress.clear_progress().await?;
        Ok(())
    }

    /// Seconds elapsed for an in-flight session, against the service clock.
    #[must_use]
    pub fn elapsed_seconds(&self, session: &QuizSession) -> u32 {
        session.elapsed_seconds(self.clock.now())
    }
}
