use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quiz_core::model::{
    AttemptId, AttemptRequest, AttemptResponse, Choice, ChoiceId, Difficulty, Question, QuestionId,
    QuizId,
};
use quiz_core::time::fixed_clock;
use services::error::{ApiError, SessionError};
use services::session::{AttemptSink, QuestionSource, QuizSessionService};
use storage::repository::{InMemoryRepository, ProgressRepository};

fn question(id: u64, position: u32, choices: &[(u64, bool)]) -> Question {
    Question {
        id: QuestionId::new(id),
        quiz_id: QuizId::new(1),
        position,
        title: format!("Q{id}"),
        text: format!("Question {id}?"),
        image: None,
        difficulty: Difficulty::Easy,
        tags: vec!["test".into()],
        explanation: None,
        choices: choices
            .iter()
            .map(|&(choice_id, correct)| Choice {
                id: ChoiceId::new(choice_id),
                text: format!("Choice {choice_id}"),
                is_correct: Some(correct),
            })
            .collect(),
    }
}

/// Two questions with correct choice ids 1 and 4, mirroring the reference
/// fixture used against the real backend.
fn fixture_questions() -> Vec<Question> {
    vec![
        question(1, 1, &[(1, true), (2, false)]),
        question(2, 2, &[(3, false), (4, true)]),
    ]
}

struct StubBackend {
    questions: Vec<Question>,
    submissions: AtomicUsize,
}

impl StubBackend {
    fn new(questions: Vec<Question>) -> Arc<Self> {
        Arc::new(Self {
            questions,
            submissions: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl QuestionSource for StubBackend {
    async fn fetch_ordered_questions(&self, _quiz_id: QuizId) -> Result<Vec<Question>, ApiError> {
        Ok(self.questions.clone())
    }
}

#[async_trait]
impl AttemptSink for StubBackend {
    async fn submit(&self, request: &AttemptRequest) -> Result<AttemptResponse, ApiError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);

        // Score exactly like the backend: compare submitted choices with the
        // correct flags on the fixture questions.
        let mut correct = Vec::new();
        for answer in &request.answers {
            let question = self
                .questions
                .iter()
                .find(|q| q.id == answer.question_id)
                .expect("submitted answer for unknown question");
            if question.correct_choice_id() == Some(answer.choice_id) {
                correct.push(question.id);
            }
        }

        let score = u32::try_from(correct.len()).expect("score fits u32");
        let total = u32::try_from(self.questions.len()).expect("total fits u32");
        Ok(AttemptResponse {
            id: AttemptId::new(42),
            score,
            total_questions: total,
            percentage: f64::from(score) / f64::from(total) * 100.0,
            time_spent: request.time_spent,
            correct_answers: correct,
        })
    }
}

fn build_service(
    backend: &Arc<StubBackend>,
    progress: &Arc<InMemoryRepository>,
) -> QuizSessionService {
    QuizSessionService::new(
        fixed_clock(),
        Arc::clone(backend) as Arc<dyn QuestionSource>,
        Arc::clone(backend) as Arc<dyn AttemptSink>,
        Arc::clone(progress) as Arc<dyn ProgressRepository>,
    )
}

#[tokio::test]
async fn initialize_without_saved_progress_starts_clean() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let session = service.initialize(QuizId::new(1), "Ada").await.unwrap();

    assert_eq!(session.current_index(), 0);
    assert_eq!(session.progress().answered, 0);
    // Initial state is persisted immediately.
    let saved = progress.load_progress().await.unwrap().unwrap();
    assert_eq!(saved.quiz_id, QuizId::new(1));
    assert!(saved.answers.is_empty());
}

#[tokio::test]
async fn full_play_through_scores_and_reconciles() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut session = service.initialize(QuizId::new(1), "Ada").await.unwrap();

    // Answer {1, 3}: first correct, second wrong.
    assert!(service.answer(&mut session, ChoiceId::new(1)).await.unwrap());
    assert!(service.advance(&mut session).await.unwrap());
    assert!(service.answer(&mut session, ChoiceId::new(3)).await.unwrap());
    assert_eq!(session.score(), 1);
    assert_eq!(session.wrong_answers(), 1);

    // Fix question 2 and submit.
    assert!(service.answer(&mut session, ChoiceId::new(4)).await.unwrap());
    let response = service.submit(&mut session).await.unwrap();

    assert_eq!(response.total_questions, 2);
    assert_eq!(response.score, 2);
    assert!(session.is_completed());
    assert_eq!(session.attempt_id(), Some(AttemptId::new(42)));
    assert_eq!(session.answer_at(0).unwrap().confirmed_correct, Some(true));
    assert_eq!(session.answer_at(1).unwrap().confirmed_correct, Some(true));

    // Submission clears the persisted record.
    assert!(progress.load_progress().await.unwrap().is_none());
}

#[tokio::test]
async fn premature_submit_fails_and_keeps_state() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut session = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    service.answer(&mut session, ChoiceId::new(1)).await.unwrap();

    let err = service.submit(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Incomplete {
            answered: 1,
            total: 2
        }
    ));
    assert!(!session.is_completed());
    assert_eq!(backend.submissions.load(Ordering::SeqCst), 0);
    // The persisted record is untouched.
    assert!(progress.load_progress().await.unwrap().is_some());
}

#[tokio::test]
async fn double_submit_is_rejected() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut session = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    service.answer(&mut session, ChoiceId::new(1)).await.unwrap();
    service.advance(&mut session).await.unwrap();
    service.answer(&mut session, ChoiceId::new(4)).await.unwrap();

    service.submit(&mut session).await.unwrap();
    let err = service.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Completed));
    assert_eq!(backend.submissions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn initialize_resumes_matching_saved_progress() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut first = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    service.answer(&mut first, ChoiceId::new(1)).await.unwrap();
    service.advance(&mut first).await.unwrap();
    drop(first);

    // Simulate a reload: a new session for the same quiz picks up the record.
    let resumed = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    assert_eq!(resumed.current_index(), 1);
    assert_eq!(
        resumed.answer_at(0).unwrap().choice_id,
        ChoiceId::new(1)
    );
}

#[tokio::test]
async fn saved_progress_for_another_quiz_is_ignored() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut first = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    service.answer(&mut first, ChoiceId::new(1)).await.unwrap();
    drop(first);

    let other = service.initialize(QuizId::new(2), "Ada").await.unwrap();
    assert_eq!(other.current_index(), 0);
    assert_eq!(other.progress().answered, 0);
}

#[tokio::test]
async fn backward_navigation_persists_the_cursor() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut session = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    service.answer(&mut session, ChoiceId::new(1)).await.unwrap();
    service.advance(&mut session).await.unwrap();
    service.retreat(&mut session).await.unwrap();

    let saved = progress.load_progress().await.unwrap().unwrap();
    assert_eq!(saved.current_index, 0);
}

#[tokio::test]
async fn seek_persists_the_cursor() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut session = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    assert!(service.seek(&mut session, 1).await.unwrap());

    let saved = progress.load_progress().await.unwrap().unwrap();
    assert_eq!(saved.current_index, 1);

    // Out-of-range seek is a no-op and leaves the record alone.
    assert!(!service.seek(&mut session, 5).await.unwrap());
    let saved = progress.load_progress().await.unwrap().unwrap();
    assert_eq!(saved.current_index, 1);
}

#[tokio::test]
async fn reset_clears_session_and_slot() {
    let backend = StubBackend::new(fixture_questions());
    let progress = Arc::new(InMemoryRepository::new());
    let service = build_service(&backend, &progress);

    let mut session = service.initialize(QuizId::new(1), "Ada").await.unwrap();
    service.answer(&mut session, ChoiceId::new(1)).await.unwrap();

    service.reset(&mut session).await.unwrap();
    assert_eq!(session.progress().answered, 0);
    assert!(progress.load_progress().await.unwrap().is_none());
}
