use async_trait::async_trait;

use quiz_core::model::{AttemptRequest, AttemptResponse, Question, QuizId};

use crate::error::ApiError;

/// The only two backend capabilities the session store depends on.
///
/// `ApiClient` implements both; tests substitute fixtures.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the questions of a quiz, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    async fn fetch_ordered_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, ApiError>;
}

#[async_trait]
pub trait AttemptSink: Send + Sync {
    /// Submit a finished attempt and receive the server-scored result.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    async fn submit(&self, request: &AttemptRequest) -> Result<AttemptResponse, ApiError>;
}
